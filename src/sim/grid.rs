//! Logical play-field derived from the window size
//!
//! Positions are kept in pixel space (multiples of the cell size); the grid
//! only knows how many whole cells fit. Partial cells at the right and bottom
//! edge are dead space.

use glam::IVec2;

/// Grid dimensions in cells plus the cell edge length in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Grid {
    /// Derive the grid for a window, truncating partial cells
    pub fn recompute(pixel_width: u32, pixel_height: u32, cell_size: i32) -> Self {
        let cell_size = cell_size.max(1);
        let cells = |pixels: u32| i32::try_from(pixels / cell_size as u32).unwrap_or(i32::MAX);
        Self {
            width: cells(pixel_width),
            height: cells(pixel_height),
            cell_size,
        }
    }

    /// Extent of the usable area in pixels
    pub fn pixel_size(&self) -> IVec2 {
        IVec2::new(self.width * self.cell_size, self.height * self.cell_size)
    }

    /// True if `pos` lies in `[0, width) x [0, height)` in pixel space
    #[inline]
    pub fn contains(&self, pos: IVec2) -> bool {
        let extent = self.pixel_size();
        pos.x >= 0 && pos.y >= 0 && pos.x < extent.x && pos.y < extent.y
    }

    /// Cell-aligned center, where a fresh snake starts
    pub fn center(&self) -> IVec2 {
        IVec2::new(
            (self.width / 2) * self.cell_size,
            (self.height / 2) * self.cell_size,
        )
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Every cell position, row by row (y outer, x inner)
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |col| IVec2::new(col * self.cell_size, row * self.cell_size))
        })
    }

    /// Pixel-space center of the cell at `pos`
    pub fn cell_center(&self, pos: IVec2) -> glam::Vec2 {
        (pos + IVec2::splat(self.cell_size / 2)).as_vec2()
    }
}
