//! Decorative particles (no gameplay effect)
//!
//! Lifetimes are counted in frames, matching the frame-stepped simulation.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

/// Explosion burst tuning
const EXPLOSION_SPEED_MIN: f32 = 2.0;
const EXPLOSION_SPEED_MAX: f32 = 6.0;
const EXPLOSION_LIFE_MIN: f32 = 30.0;
const EXPLOSION_LIFE_MAX: f32 = 60.0;
const EXPLOSION_SIZE: f32 = 2.0;
/// Velocity kept per frame by explosion particles
pub const EXPLOSION_DAMPING: f32 = 0.95;

/// Ambient food sparkle tuning
pub const AMBIENT_SPAWN_CHANCE: f64 = 0.1;
const AMBIENT_DISTANCE_MIN: f32 = 15.0;
const AMBIENT_DISTANCE_MAX: f32 = 25.0;
const AMBIENT_DRIFT_SPEED: f32 = 0.5;
const AMBIENT_LIFE_MIN: f32 = 60.0;
const AMBIENT_LIFE_MAX: f32 = 90.0;
const AMBIENT_SIZE_MIN: f32 = 1.0;
const AMBIENT_SIZE_MAX: f32 = 3.0;
const AMBIENT_OPACITY: f32 = 100.0 / 255.0;

/// Palette slot for a particle, resolved by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// Food eaten
    Success,
    /// Death burst and food sparkle
    Danger,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames left
    pub life: f32,
    pub max_life: f32,
    /// Radius in pixels
    pub size: f32,
    pub tint: Tint,
    /// Opacity at full life (0-1)
    pub opacity: f32,
}

impl Particle {
    /// Current opacity, fading linearly with remaining life
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0) * self.opacity
    }
}

/// Owner of both particle pools
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    explosions: Vec<Particle>,
    ambient: Vec<Particle>,
    /// Mirrors the `particles` setting; spawning is a no-op when false
    pub enabled: bool,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ParticleSystem {
    pub fn new(enabled: bool) -> Self {
        Self {
            explosions: Vec::new(),
            ambient: Vec::new(),
            enabled,
        }
    }

    /// Emit `count` particles flying out of `center` in random directions
    pub fn spawn_explosion<R: Rng + ?Sized>(
        &mut self,
        center: Vec2,
        tint: Tint,
        count: usize,
        rng: &mut R,
    ) {
        if !self.enabled {
            return;
        }

        self.explosions.reserve(count);
        for _ in 0..count {
            let angle = rng.random_range(0.0..TAU);
            let speed = rng.random_range(EXPLOSION_SPEED_MIN..=EXPLOSION_SPEED_MAX);
            self.explosions.push(Particle {
                pos: center,
                vel: Vec2::from_angle(angle) * speed,
                life: rng.random_range(EXPLOSION_LIFE_MIN..=EXPLOSION_LIFE_MAX),
                max_life: EXPLOSION_LIFE_MAX,
                size: EXPLOSION_SIZE,
                tint,
                opacity: 1.0,
            });
        }
    }

    /// Maybe emit one sparkle around the food, drifting toward it.
    /// Called once per frame while food is on the board.
    pub fn spawn_food_ambient<R: Rng + ?Sized>(&mut self, center: Vec2, rng: &mut R) {
        if !self.enabled || !rng.random_bool(AMBIENT_SPAWN_CHANCE) {
            return;
        }

        let angle = rng.random_range(0.0..TAU);
        let distance = rng.random_range(AMBIENT_DISTANCE_MIN..=AMBIENT_DISTANCE_MAX);
        let outward = Vec2::from_angle(angle);
        self.ambient.push(Particle {
            pos: center + outward * distance,
            vel: -outward * AMBIENT_DRIFT_SPEED,
            life: rng.random_range(AMBIENT_LIFE_MIN..=AMBIENT_LIFE_MAX),
            max_life: AMBIENT_LIFE_MAX,
            size: rng.random_range(AMBIENT_SIZE_MIN..=AMBIENT_SIZE_MAX),
            tint: Tint::Danger,
            opacity: AMBIENT_OPACITY,
        });
    }

    /// Advance every particle one frame and drop the expired ones
    pub fn update(&mut self) {
        for particle in &mut self.explosions {
            particle.pos += particle.vel;
            particle.vel *= EXPLOSION_DAMPING;
            particle.life -= 1.0;
        }
        self.explosions.retain(|p| p.life > 0.0);

        for particle in &mut self.ambient {
            particle.pos += particle.vel;
            particle.life -= 1.0;
        }
        self.ambient.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.explosions.clear();
        self.ambient.clear();
    }

    pub fn explosions(&self) -> &[Particle] {
        &self.explosions
    }

    pub fn ambient(&self) -> &[Particle] {
        &self.ambient
    }

    /// Ambient first so bursts draw on top
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.ambient.iter().chain(self.explosions.iter())
    }

    pub fn len(&self) -> usize {
        self.explosions.len() + self.ambient.len()
    }

    pub fn is_empty(&self) -> bool {
        self.explosions.is_empty() && self.ambient.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_explosion_ranges() {
        let mut system = ParticleSystem::new(true);
        let mut rng = Pcg32::seed_from_u64(5);
        let center = Vec2::new(100.0, 100.0);
        system.spawn_explosion(center, Tint::Success, 15, &mut rng);

        assert_eq!(system.explosions().len(), 15);
        for p in system.explosions() {
            assert_eq!(p.pos, center);
            let speed = p.vel.length();
            assert!((EXPLOSION_SPEED_MIN - 1e-3..=EXPLOSION_SPEED_MAX + 1e-3).contains(&speed));
            assert!((EXPLOSION_LIFE_MIN..=EXPLOSION_LIFE_MAX).contains(&p.life));
            assert_eq!(p.max_life, EXPLOSION_LIFE_MAX);
            assert_eq!(p.tint, Tint::Success);
        }
    }

    #[test]
    fn test_disabled_is_noop() {
        let mut system = ParticleSystem::new(false);
        let mut rng = Pcg32::seed_from_u64(5);
        system.spawn_explosion(Vec2::ZERO, Tint::Danger, 20, &mut rng);
        for _ in 0..500 {
            system.spawn_food_ambient(Vec2::ZERO, &mut rng);
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_explosion_damping_and_expiry() {
        let mut system = ParticleSystem::new(true);
        let mut rng = Pcg32::seed_from_u64(9);
        system.spawn_explosion(Vec2::ZERO, Tint::Danger, 10, &mut rng);
        let before: Vec<_> = system.explosions().to_vec();

        system.update();
        for (old, new) in before.iter().zip(system.explosions()) {
            assert_eq!(new.pos, old.pos + old.vel);
            assert!((new.vel - old.vel * EXPLOSION_DAMPING).length() < 1e-5);
            assert_eq!(new.life, old.life - 1.0);
        }

        for _ in 0..EXPLOSION_LIFE_MAX as usize {
            system.update();
        }
        assert!(system.explosions().is_empty());
    }

    #[test]
    fn test_ambient_spawns_occasionally_and_drifts_inward() {
        let mut system = ParticleSystem::new(true);
        let mut rng = Pcg32::seed_from_u64(11);
        let center = Vec2::new(62.0, 62.0);
        for _ in 0..1000 {
            system.spawn_food_ambient(center, &mut rng);
        }

        // ~10% of frames
        let count = system.ambient().len();
        assert!((40..=200).contains(&count), "spawned {count}");

        for p in system.ambient() {
            let distance = p.pos.distance(center);
            assert!((AMBIENT_DISTANCE_MIN - 1e-3..=AMBIENT_DISTANCE_MAX + 1e-3).contains(&distance));
            assert!(p.vel.dot(center - p.pos) > 0.0);
            assert_eq!(p.tint, Tint::Danger);
        }
    }

    #[test]
    fn test_ambient_keeps_constant_velocity() {
        let mut system = ParticleSystem::new(true);
        let mut rng = Pcg32::seed_from_u64(2);
        while system.ambient().is_empty() {
            system.spawn_food_ambient(Vec2::ZERO, &mut rng);
        }
        let vel = system.ambient()[0].vel;
        system.update();
        assert_eq!(system.ambient()[0].vel, vel);
    }

    #[test]
    fn test_alpha_fades_with_life() {
        let particle = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 45.0,
            max_life: 90.0,
            size: 2.0,
            tint: Tint::Danger,
            opacity: AMBIENT_OPACITY,
        };
        assert!((particle.alpha() - 0.5 * AMBIENT_OPACITY).abs() < 1e-6);
    }

    #[test]
    fn test_clear() {
        let mut system = ParticleSystem::new(true);
        let mut rng = Pcg32::seed_from_u64(1);
        system.spawn_explosion(Vec2::ZERO, Tint::Success, 4, &mut rng);
        assert_eq!(system.len(), 4);
        system.clear();
        assert!(system.is_empty());
    }
}
