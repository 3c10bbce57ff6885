//! TXTR pixel decoding

use image::{imageops, RgbaImage};
use tracing::{debug, trace};
use txtrtool_core::CancelToken;
use txtrtool_formats::{TextureFormat, Txtr, MAX_DIMENSION, MAX_MIPMAPS};

use crate::cmpr::{self, SUB_BLOCK_ORIGINS, SUB_BLOCK_SIZE};
use crate::error::{DecodeError, DecodeResult};
use crate::options::DecodeOptions;
use crate::pixel::{self, expand, Rgba};
use crate::tiling::BlockLayout;

/// Decode the first level, or every level, of a TXTR into RGBA8 images
pub fn decode(txtr: &Txtr, options: &DecodeOptions, cancel: &CancelToken) -> DecodeResult<Vec<RgbaImage>> {
    let header = &txtr.header;
    if header.width == 0 || header.width > MAX_DIMENSION {
        return Err(DecodeError::InvalidTextureWidth);
    }
    if header.height == 0 || header.height > MAX_DIMENSION {
        return Err(DecodeError::InvalidTextureHeight);
    }
    if header.mip_count == 0 || header.mip_count > MAX_MIPMAPS {
        return Err(DecodeError::InvalidTextureMipCount);
    }

    let palette = if header.format.is_indexed() {
        decode_palette(txtr)?
    } else {
        Vec::new()
    };

    let count = if options.all_mips { header.mip_count as usize } else { 1 };
    if txtr.mipmaps.len() < count {
        return Err(DecodeError::MissingMipmaps);
    }

    debug!(format = ?header.format, width = header.width, height = header.height, count, "decoding TXTR");

    let mut images = Vec::new();
    images.try_reserve_exact(count).map_err(|_| DecodeError::MipmapAllocFailed)?;

    for (level, mip) in txtr.mipmaps.iter().take(count).enumerate() {
        if cancel.is_cancelled() {
            return Err(DecodeError::Interrupted);
        }

        let (width, height, size) = txtr.level_layout(level as u32);
        if mip.width != width || mip.height != height || mip.data.len() < size {
            return Err(DecodeError::InvalidParams);
        }

        let mut image = decode_level(header.format, &mip.data, width, height, &palette, cancel)?;
        if options.flip_x {
            imageops::flip_horizontal_in_place(&mut image);
        }
        if options.flip_y {
            imageops::flip_vertical_in_place(&mut image);
        }

        trace!(level, width, height, "decoded mipmap");
        images.push(image);
    }

    Ok(images)
}

fn decode_palette(txtr: &Txtr) -> DecodeResult<Vec<Rgba>> {
    let palette = txtr.palette.as_ref().ok_or(DecodeError::MissingPalette)?;
    if palette.entries.len() != palette.declared_len() {
        return Err(DecodeError::PaletteDecodeFailed);
    }

    let mut colors = Vec::new();
    colors
        .try_reserve_exact(palette.entries.len())
        .map_err(|_| DecodeError::PaletteAllocFailed)?;
    colors.extend(
        palette
            .entries
            .iter()
            .map(|&entry| pixel::decode_palette_entry(palette.format, entry)),
    );
    Ok(colors)
}

/// Decode one level of tiled pixel data
fn decode_level(
    format: TextureFormat,
    data: &[u8],
    width: u16,
    height: u16,
    palette: &[Rgba],
    cancel: &CancelToken,
) -> DecodeResult<RgbaImage> {
    let layout = BlockLayout::new(format, u32::from(width), u32::from(height));

    let mut padded: Vec<Rgba> = Vec::new();
    let padded_len = layout.padded_width() * layout.padded_height();
    padded
        .try_reserve_exact(padded_len)
        .map_err(|_| DecodeError::MipmapAllocFailed)?;
    padded.resize(padded_len, [0; 4]);

    let mut tile = Vec::with_capacity(layout.pixels_per_block());
    let mut blocks = data.chunks_exact(layout.block_size);
    for by in 0..layout.blocks_y {
        if cancel.is_cancelled() {
            return Err(DecodeError::Interrupted);
        }
        for bx in 0..layout.blocks_x {
            let block = blocks.next().ok_or(DecodeError::InvalidParams)?;
            decode_block(format, block, palette, &mut tile);
            layout.scatter(&tile, bx, by, &mut padded);
        }
    }

    let (w, h) = (usize::from(width), usize::from(height));
    let mut buf = Vec::new();
    buf.try_reserve_exact(w * h * 4)
        .map_err(|_| DecodeError::MipmapAllocFailed)?;
    for row in padded.chunks_exact(layout.padded_width()).take(h) {
        buf.extend(row[..w].iter().flatten());
    }

    RgbaImage::from_raw(u32::from(width), u32::from(height), buf).ok_or(DecodeError::InvalidParams)
}

/// Decode one tile into row-major pixels
fn decode_block(format: TextureFormat, block: &[u8], palette: &[Rgba], tile: &mut Vec<Rgba>) {
    let lookup = |index: usize| palette.get(index).copied().unwrap_or([0; 4]);
    let words = || block.chunks_exact(2).map(|b| u16::from_be_bytes([b[0], b[1]]));

    tile.clear();
    match format {
        TextureFormat::I4 => {
            for &b in block {
                for nibble in [b >> 4, b & 0x0F] {
                    let i = expand(u16::from(nibble), 4);
                    tile.push([i, i, i, i]);
                }
            }
        }
        TextureFormat::I8 => tile.extend(block.iter().map(|&i| [i, i, i, i])),
        TextureFormat::IA4 => {
            for &b in block {
                let i = expand(u16::from(b & 0x0F), 4);
                tile.push([i, i, i, expand(u16::from(b >> 4), 4)]);
            }
        }
        TextureFormat::IA8 => tile.extend(words().map(pixel::decode_ia8)),
        TextureFormat::CI4 => {
            for &b in block {
                tile.push(lookup(usize::from(b >> 4)));
                tile.push(lookup(usize::from(b & 0x0F)));
            }
        }
        TextureFormat::CI8 => tile.extend(block.iter().map(|&i| lookup(usize::from(i)))),
        TextureFormat::CI14X2 => tile.extend(words().map(|w| lookup(usize::from(w & 0x3FFF)))),
        TextureFormat::R5G6B5 => tile.extend(words().map(pixel::decode_rgb565)),
        TextureFormat::RGB5A3 => tile.extend(words().map(pixel::decode_rgb5a3)),
        TextureFormat::RGBA8 => {
            let (ar, gb) = block.split_at(32);
            for (a_r, g_b) in ar.chunks_exact(2).zip(gb.chunks_exact(2)) {
                tile.push([a_r[1], g_b[0], g_b[1], a_r[0]]);
            }
        }
        TextureFormat::CMP => {
            tile.resize(64, [0; 4]);
            for (sub, &(ox, oy)) in block.chunks_exact(SUB_BLOCK_SIZE).zip(&SUB_BLOCK_ORIGINS) {
                let mut bytes = [0u8; SUB_BLOCK_SIZE];
                bytes.copy_from_slice(sub);
                let pixels = cmpr::decode_sub_block(&bytes);
                for (y, row) in pixels.chunks_exact(4).enumerate() {
                    let start = (oy + y) * 8 + ox;
                    tile[start..start + 4].copy_from_slice(row);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txtrtool_formats::{PaletteFormat, RawMipmap, TxtrHeader, TxtrPalette};

    fn texture(format: TextureFormat, width: u16, height: u16, data: Vec<u8>) -> Txtr {
        Txtr {
            header: TxtrHeader { format, width, height, mip_count: 1 },
            palette: None,
            mipmaps: vec![RawMipmap { width, height, data }],
        }
    }

    fn decode_one(txtr: &Txtr) -> RgbaImage {
        let mut images = decode(txtr, &DecodeOptions::default(), &CancelToken::new()).unwrap();
        images.remove(0)
    }

    #[test]
    fn test_decode_i4() {
        let mut data = vec![0u8; 32];
        data[0] = 0xF0;
        let image = decode_one(&texture(TextureFormat::I4, 8, 8, data));
        assert_eq!(image.get_pixel(0, 0).0, [0xFF; 4]);
        assert_eq!(image.get_pixel(1, 0).0, [0; 4]);
    }

    #[test]
    fn test_decode_rgba8_tile_split() {
        let mut data = vec![0u8; 64];
        data[0] = 0x80; // A
        data[1] = 0x10; // R
        data[32] = 0x20; // G
        data[33] = 0x30; // B
        let image = decode_one(&texture(TextureFormat::RGBA8, 4, 4, data));
        assert_eq!(image.get_pixel(0, 0).0, [0x10, 0x20, 0x30, 0x80]);
    }

    #[test]
    fn test_decode_crops_padding() {
        let data = vec![0xFF; TextureFormat::I8.data_size(3, 2)];
        let image = decode_one(&texture(TextureFormat::I8, 3, 2, data));
        assert_eq!(image.dimensions(), (3, 2));
    }

    #[test]
    fn test_decode_second_tile() {
        // 16x4 I8: tiles are 8x4, second tile starts at byte 32
        let mut data = vec![0u8; 64];
        data[32] = 0x7F;
        let image = decode_one(&texture(TextureFormat::I8, 16, 4, data));
        assert_eq!(image.get_pixel(8, 0).0, [0x7F; 4]);
        assert_eq!(image.get_pixel(0, 0).0, [0; 4]);
    }

    #[test]
    fn test_decode_ci8_uses_palette() {
        let mut txtr = texture(TextureFormat::CI8, 8, 4, vec![1; 32]);
        let mut entries = vec![0u16; 256];
        entries[1] = 0xF800;
        txtr.palette = Some(TxtrPalette { format: PaletteFormat::R5G6B5, width: 256, height: 1, entries });
        let image = decode_one(&txtr);
        assert_eq!(image.get_pixel(5, 3).0, [0xFF, 0, 0, 0xFF]);
    }

    #[test]
    fn test_missing_palette() {
        let txtr = texture(TextureFormat::CI4, 8, 8, vec![0; 32]);
        let result = decode(&txtr, &DecodeOptions::default(), &CancelToken::new());
        assert_eq!(result, Err(DecodeError::MissingPalette));
    }

    #[test]
    fn test_missing_mipmaps() {
        let mut txtr = texture(TextureFormat::I8, 8, 4, vec![0; 32]);
        txtr.header.mip_count = 2;
        let options = DecodeOptions { all_mips: true, ..Default::default() };
        assert_eq!(decode(&txtr, &options, &CancelToken::new()), Err(DecodeError::MissingMipmaps));
    }

    #[test]
    fn test_flip_y() {
        let mut data = vec![0u8; 32];
        data[0] = 0xFF;
        let options = DecodeOptions { flip_y: true, ..Default::default() };
        let images = decode(&texture(TextureFormat::I8, 8, 4, data), &options, &CancelToken::new()).unwrap();
        assert_eq!(images[0].get_pixel(0, 3).0, [0xFF; 4]);
        assert_eq!(images[0].get_pixel(0, 0).0, [0; 4]);
    }

    #[test]
    fn test_interrupted() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let txtr = texture(TextureFormat::I8, 8, 4, vec![0; 32]);
        assert_eq!(decode(&txtr, &DecodeOptions::default(), &cancel), Err(DecodeError::Interrupted));
    }

    #[test]
    fn test_short_data() {
        let txtr = texture(TextureFormat::RGBA8, 8, 8, vec![0; 64]);
        let result = decode(&txtr, &DecodeOptions::default(), &CancelToken::new());
        assert_eq!(result, Err(DecodeError::InvalidParams));
    }
}
