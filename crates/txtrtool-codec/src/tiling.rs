//! GX block tiling
//!
//! Pixel data is stored tile by tile, left to right then top to bottom, with
//! each tile's pixels in row-major order. Images are padded up to whole tiles.

use txtrtool_formats::TextureFormat;

/// Tile geometry of one image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    pub block_width: usize,
    pub block_height: usize,
    pub blocks_x: usize,
    pub blocks_y: usize,
    pub block_size: usize,
}

impl BlockLayout {
    pub fn new(format: TextureFormat, width: u32, height: u32) -> Self {
        let (bw, bh) = format.block_dimensions();
        Self {
            block_width: bw as usize,
            block_height: bh as usize,
            blocks_x: width.div_ceil(bw) as usize,
            blocks_y: height.div_ceil(bh) as usize,
            block_size: format.block_size(),
        }
    }

    /// Width of the tile-padded image
    pub fn padded_width(&self) -> usize {
        self.blocks_x * self.block_width
    }

    /// Height of the tile-padded image
    pub fn padded_height(&self) -> usize {
        self.blocks_y * self.block_height
    }

    pub fn pixels_per_block(&self) -> usize {
        self.block_width * self.block_height
    }

    /// Total encoded size in bytes
    pub fn data_size(&self) -> usize {
        self.blocks_x * self.blocks_y * self.block_size
    }

    /// Copy tile `(bx, by)` out of a padded row-major buffer
    pub fn gather<T: Copy>(&self, padded: &[T], bx: usize, by: usize, out: &mut Vec<T>) {
        out.clear();
        let stride = self.padded_width();
        for y in 0..self.block_height {
            let row = (by * self.block_height + y) * stride + bx * self.block_width;
            out.extend_from_slice(&padded[row..row + self.block_width]);
        }
    }

    /// Copy a tile's pixels into a padded row-major buffer
    pub fn scatter<T: Copy>(&self, tile: &[T], bx: usize, by: usize, padded: &mut [T]) {
        let stride = self.padded_width();
        for (y, src) in tile.chunks_exact(self.block_width).enumerate() {
            let row = (by * self.block_height + y) * stride + bx * self.block_width;
            padded[row..row + self.block_width].copy_from_slice(src);
        }
    }
}
