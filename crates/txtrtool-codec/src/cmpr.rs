//! CMPR block compression
//!
//! A CMPR tile is 8x8 pixels made of four 4x4 DXT1 sub-blocks in Z order.
//! Each sub-block stores its two RGB565 endpoints big-endian and its 2-bit
//! selectors most significant first, the reverse of BC1 on PC. Converting the
//! byte order lets `texpresso` do the actual compression work.

use crate::options::SquishFlags;
use crate::pixel::Rgba;

/// Bytes per 4x4 sub-block
pub const SUB_BLOCK_SIZE: usize = 8;

/// Sub-block origins inside an 8x8 tile
pub const SUB_BLOCK_ORIGINS: [(usize, usize); 4] = [(0, 0), (4, 0), (0, 4), (4, 4)];

/// Convert a sub-block between GX and BC1 byte order (the mapping is its own inverse)
pub fn swap_order(block: &[u8; SUB_BLOCK_SIZE]) -> [u8; SUB_BLOCK_SIZE] {
    let reverse = |b: u8| ((b & 0x03) << 6) | ((b & 0x0C) << 2) | ((b & 0x30) >> 2) | ((b & 0xC0) >> 6);
    [
        block[1],
        block[0],
        block[3],
        block[2],
        reverse(block[4]),
        reverse(block[5]),
        reverse(block[6]),
        reverse(block[7]),
    ]
}

/// Decompress one GX sub-block into 16 pixels in row-major order
pub fn decode_sub_block(block: &[u8; SUB_BLOCK_SIZE]) -> [Rgba; 16] {
    let bc1 = swap_order(block);
    let mut rgba = [0u8; 64];
    texpresso::Format::Bc1.decompress(&bc1, 4, 4, &mut rgba);

    let mut out = [[0u8; 4]; 16];
    for (px, chunk) in out.iter_mut().zip(rgba.chunks_exact(4)) {
        px.copy_from_slice(chunk);
    }
    out
}

/// Compress 16 row-major pixels into one GX sub-block
pub fn encode_sub_block(pixels: &[Rgba; 16], flags: SquishFlags, metric: [f32; 3]) -> [u8; SUB_BLOCK_SIZE] {
    let mut rgba = [0u8; 64];
    for (chunk, px) in rgba.chunks_exact_mut(4).zip(pixels) {
        chunk.copy_from_slice(px);
    }

    let params = texpresso::Params {
        algorithm: flags.algorithm(),
        weights: metric,
        weigh_colour_by_alpha: flags.contains(SquishFlags::WEIGHT_COLOUR_BY_ALPHA),
    };

    let mut bc1 = [0u8; SUB_BLOCK_SIZE];
    texpresso::Format::Bc1.compress(&rgba, 4, 4, params, &mut bc1);
    swap_order(&bc1)
}
