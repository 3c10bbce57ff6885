//! TXTR pixel encoding and mipmap generation

use image::{imageops, RgbaImage};
use tracing::{debug, trace};
use txtrtool_core::CancelToken;
use txtrtool_formats::{
    mip_dimensions, PaletteFormat, RawMipmap, TextureFormat, Txtr, TxtrHeader, TxtrPalette,
    MAX_DIMENSION, MAX_MIPMAPS,
};

use crate::cmpr::{self, SUB_BLOCK_ORIGINS};
use crate::error::{EncodeError, EncodeResult};
use crate::options::{AverageType, EncodeOptions, SquishFlags};
use crate::palette;
use crate::pixel::{self, greyscale, quantize, Rgba};
use crate::resample;
use crate::tiling::BlockLayout;

/// Encode `width` x `height` RGBA8 pixels into a TXTR with generated mipmaps
pub fn encode(
    format: TextureFormat,
    palette_format: PaletteFormat,
    width: u16,
    height: u16,
    pixels: &[u8],
    options: &EncodeOptions,
    cancel: &CancelToken,
) -> EncodeResult<Txtr> {
    if width == 0 || width > MAX_DIMENSION {
        return Err(EncodeError::InvalidTextureWidth);
    }
    if height == 0 || height > MAX_DIMENSION {
        return Err(EncodeError::InvalidTextureHeight);
    }
    if pixels.len() != usize::from(width) * usize::from(height) * 4 {
        return Err(EncodeError::InvalidParams);
    }
    if options.mip_limit == 0 || u32::from(options.mip_limit) > MAX_MIPMAPS {
        return Err(EncodeError::InvalidMipLimit);
    }
    if format.is_indexed() && options.mip_limit > 1 {
        return Err(EncodeError::MipmappedPaletteFormat);
    }
    if options.width_limit == 0 || options.width_limit > width {
        return Err(EncodeError::InvalidWidthLimit);
    }
    if options.height_limit == 0 || options.height_limit > height {
        return Err(EncodeError::InvalidHeightLimit);
    }
    let metric: [f32; 3] = options
        .squish_metric
        .as_slice()
        .try_into()
        .map_err(|_| EncodeError::InvalidMetricSize)?;

    let mut source = Vec::new();
    source
        .try_reserve_exact(pixels.len())
        .map_err(|_| EncodeError::SourcePixelsAllocFailed)?;
    source.extend_from_slice(pixels);
    let mut source = RgbaImage::from_raw(u32::from(width), u32::from(height), source)
        .ok_or(EncodeError::InvalidParams)?;
    if options.flip_x {
        imageops::flip_horizontal_in_place(&mut source);
    }
    if options.flip_y {
        imageops::flip_vertical_in_place(&mut source);
    }

    let count = level_count(width, height, options);
    debug!(?format, width, height, count, "encoding TXTR");

    let mut txtr = Txtr {
        header: TxtrHeader { format, width, height, mip_count: count },
        palette: None,
        mipmaps: Vec::new(),
    };
    txtr.mipmaps
        .try_reserve_exact(count as usize)
        .map_err(|_| EncodeError::MipmapAllocFailed)?;

    if format.is_indexed() {
        let (palette, indices) = quantize_source(format, palette_format, &source, options, cancel)?;
        let data = encode_level(format, width, height, Tile::Indexed(&indices), options, metric, cancel)?;
        txtr.palette = Some(palette);
        txtr.mipmaps.push(RawMipmap { width, height, data });
        return Ok(txtr);
    }

    for level in 0..count {
        if cancel.is_cancelled() {
            return Err(EncodeError::Interrupted);
        }
        let (w, h) = mip_dimensions(width, height, level);
        let resized;
        let image = if level == 0 {
            &source
        } else {
            resized = resample::resize(&source, u32::from(w), u32::from(h), options.filter, options.edge)?;
            &resized
        };

        let pixels: Vec<Rgba> = image.pixels().map(|p| p.0).collect();
        let data = encode_level(format, w, h, Tile::Direct(&pixels), options, metric, cancel)?;
        trace!(level, width = w, height = h, bytes = data.len(), "encoded mipmap");
        txtr.mipmaps.push(RawMipmap { width: w, height: h, data });
    }

    Ok(txtr)
}

/// Number of levels to generate under the limits in `options`
fn level_count(width: u16, height: u16, options: &EncodeOptions) -> u32 {
    let mut count = 1;
    while count < u32::from(options.mip_limit) {
        if mip_dimensions(width, height, count - 1) == (1, 1) {
            break;
        }
        let (w, h) = mip_dimensions(width, height, count);
        if w < options.width_limit || h < options.height_limit {
            break;
        }
        count += 1;
    }
    count
}

fn quantize_source(
    format: TextureFormat,
    palette_format: PaletteFormat,
    source: &RgbaImage,
    options: &EncodeOptions,
    cancel: &CancelToken,
) -> EncodeResult<(TxtrPalette, Vec<u16>)> {
    let capacity = format.palette_capacity().ok_or(EncodeError::InvalidTextureFormat)?;
    let (pal_width, pal_height) = format.palette_dimensions().ok_or(EncodeError::InvalidTextureFormat)?;

    let pixels: Vec<Rgba> = source.pixels().map(|p| p.0).collect();
    let built = palette::build(&pixels, palette_format, options.average, capacity)?;
    let indices = palette::map_indices(
        &pixels,
        source.width() as usize,
        source.height() as usize,
        &built,
        options.dither,
        cancel,
    )?;

    let declared = usize::from(pal_width) * usize::from(pal_height);
    if built.entries.len() > declared {
        return Err(EncodeError::PaletteEncodeFailed);
    }
    let mut entries = Vec::new();
    entries
        .try_reserve_exact(declared)
        .map_err(|_| EncodeError::PaletteAllocFailed)?;
    entries.extend_from_slice(&built.entries);
    entries.resize(declared, 0);

    let palette = TxtrPalette { format: palette_format, width: pal_width, height: pal_height, entries };
    Ok((palette, indices))
}

/// Pixels of one level, either as colors or as palette indices
enum Tile<'a> {
    Direct(&'a [Rgba]),
    Indexed(&'a [u16]),
}

/// Pad a row-major buffer out to whole tiles by repeating edge samples
fn pad<T: Copy>(src: &[T], width: usize, height: usize, layout: &BlockLayout) -> EncodeResult<Vec<T>> {
    let (pw, ph) = (layout.padded_width(), layout.padded_height());
    let mut padded = Vec::new();
    padded
        .try_reserve_exact(pw * ph)
        .map_err(|_| EncodeError::MipmapAllocFailed)?;
    for y in 0..ph {
        let row = &src[y.min(height - 1) * width..][..width];
        padded.extend((0..pw).map(|x| row[x.min(width - 1)]));
    }
    Ok(padded)
}

fn encode_level(
    format: TextureFormat,
    width: u16,
    height: u16,
    tile: Tile<'_>,
    options: &EncodeOptions,
    metric: [f32; 3],
    cancel: &CancelToken,
) -> EncodeResult<Vec<u8>> {
    let layout = BlockLayout::new(format, u32::from(width), u32::from(height));
    let (w, h) = (usize::from(width), usize::from(height));

    let mut out = Vec::new();
    out.try_reserve_exact(layout.data_size())
        .map_err(|_| EncodeError::MipmapAllocFailed)?;

    match tile {
        Tile::Direct(pixels) => {
            let padded = pad(pixels, w, h, &layout)?;
            let mut block = Vec::with_capacity(layout.pixels_per_block());
            for by in 0..layout.blocks_y {
                if cancel.is_cancelled() {
                    return Err(EncodeError::Interrupted);
                }
                for bx in 0..layout.blocks_x {
                    layout.gather(&padded, bx, by, &mut block);
                    encode_block(format, &block, options.average, options.squish_flags, metric, &mut out);
                }
            }
        }
        Tile::Indexed(indices) => {
            let padded = pad(indices, w, h, &layout)?;
            let mut block = Vec::with_capacity(layout.pixels_per_block());
            for by in 0..layout.blocks_y {
                if cancel.is_cancelled() {
                    return Err(EncodeError::Interrupted);
                }
                for bx in 0..layout.blocks_x {
                    layout.gather(&padded, bx, by, &mut block);
                    encode_index_block(format, &block, &mut out);
                }
            }
        }
    }

    Ok(out)
}

/// Append one tile of colors in `format`
fn encode_block(
    format: TextureFormat,
    block: &[Rgba],
    average: AverageType,
    flags: SquishFlags,
    metric: [f32; 3],
    out: &mut Vec<u8>,
) {
    let grey = |px: Rgba| greyscale(px, average);
    match format {
        TextureFormat::I4 => {
            for pair in block.chunks_exact(2) {
                let hi = quantize(grey(pair[0]), 4) as u8;
                let lo = quantize(grey(pair[1]), 4) as u8;
                out.push((hi << 4) | lo);
            }
        }
        TextureFormat::I8 => out.extend(block.iter().map(|&px| grey(px))),
        TextureFormat::IA4 => {
            for &px in block {
                out.push(((quantize(px[3], 4) as u8) << 4) | quantize(grey(px), 4) as u8);
            }
        }
        TextureFormat::IA8 => {
            for &px in block {
                out.extend_from_slice(&pixel::encode_ia8(grey(px), px[3]).to_be_bytes());
            }
        }
        TextureFormat::R5G6B5 => {
            for &px in block {
                out.extend_from_slice(&pixel::encode_rgb565(px).to_be_bytes());
            }
        }
        TextureFormat::RGB5A3 => {
            for &px in block {
                out.extend_from_slice(&pixel::encode_rgb5a3(px).to_be_bytes());
            }
        }
        TextureFormat::RGBA8 => {
            for px in block {
                out.extend_from_slice(&[px[3], px[0]]);
            }
            for px in block {
                out.extend_from_slice(&[px[1], px[2]]);
            }
        }
        TextureFormat::CMP => {
            for &(ox, oy) in &SUB_BLOCK_ORIGINS {
                let mut sub = [[0u8; 4]; 16];
                for (i, px) in sub.iter_mut().enumerate() {
                    *px = block[(oy + i / 4) * 8 + ox + i % 4];
                }
                out.extend_from_slice(&cmpr::encode_sub_block(&sub, flags, metric));
            }
        }
        TextureFormat::CI4 | TextureFormat::CI8 | TextureFormat::CI14X2 => {
            out.resize(out.len() + format.block_size(), 0);
        }
    }
}

/// Append one tile of palette indices in `format`
fn encode_index_block(format: TextureFormat, block: &[u16], out: &mut Vec<u8>) {
    match format {
        TextureFormat::CI4 => {
            for pair in block.chunks_exact(2) {
                out.push((((pair[0] & 0x0F) << 4) | (pair[1] & 0x0F)) as u8);
            }
        }
        TextureFormat::CI8 => out.extend(block.iter().map(|&i| (i & 0xFF) as u8)),
        _ => {
            for &i in block {
                out.extend_from_slice(&(i & 0x3FFF).to_be_bytes());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::options::{DecodeOptions, ResizeFilter};

    fn gradient(width: u16, height: u16) -> Vec<u8> {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 16) as u8, (y * 16) as u8, 0x40, 0xFF]);
            }
        }
        pixels
    }

    fn run(format: TextureFormat, width: u16, height: u16, pixels: &[u8], options: &EncodeOptions) -> EncodeResult<Txtr> {
        encode(format, PaletteFormat::RGB5A3, width, height, pixels, options, &CancelToken::new())
    }

    #[test]
    fn test_rgba8_is_lossless() {
        let pixels = gradient(6, 5);
        let txtr = run(TextureFormat::RGBA8, 6, 5, &pixels, &EncodeOptions::default()).unwrap();
        let images = decode(&txtr, &DecodeOptions::default(), &CancelToken::new()).unwrap();
        assert_eq!(images[0].as_raw(), &pixels);
    }

    #[test]
    fn test_level_sizes_match_format() {
        let options = EncodeOptions { mip_limit: 11, ..Default::default() };
        for &format in TextureFormat::ALL.iter().filter(|f| !f.is_indexed()) {
            let txtr = run(format, 16, 8, &gradient(16, 8), &options).unwrap();
            assert_eq!(txtr.header.mip_count, 5, "{format:?}");
            for (level, mip) in txtr.mipmaps.iter().enumerate() {
                let (_, _, size) = txtr.level_layout(level as u32);
                assert_eq!(mip.data.len(), size, "{format:?} level {level}");
            }
        }
    }

    #[test]
    fn test_limits_stop_chain() {
        let options = EncodeOptions { mip_limit: 11, width_limit: 4, height_limit: 2, ..Default::default() };
        let txtr = run(TextureFormat::RGB5A3, 16, 16, &gradient(16, 16), &options).unwrap();
        assert_eq!(txtr.header.mip_count, 3);
        assert_eq!((txtr.mipmaps[2].width, txtr.mipmaps[2].height), (4, 4));
    }

    #[test]
    fn test_mip_limit_caps_chain() {
        let options = EncodeOptions { mip_limit: 2, filter: ResizeFilter::Box, ..Default::default() };
        let txtr = run(TextureFormat::RGBA8, 8, 8, &vec![0x80; 256], &options).unwrap();
        assert_eq!(txtr.mipmaps.len(), 2);
        assert!(txtr.mipmaps[1].data.iter().all(|&b| b == 0x80));
    }

    #[test]
    fn test_deferred_limit_checks() {
        let pixels = gradient(4, 4);
        let wide = EncodeOptions { width_limit: 5, ..Default::default() };
        assert_eq!(run(TextureFormat::I8, 4, 4, &pixels, &wide), Err(EncodeError::InvalidWidthLimit));
        let tall = EncodeOptions { height_limit: 5, ..Default::default() };
        assert_eq!(run(TextureFormat::I8, 4, 4, &pixels, &tall), Err(EncodeError::InvalidHeightLimit));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let pixels = gradient(4, 4);
        assert_eq!(run(TextureFormat::I8, 4, 3, &pixels, &EncodeOptions::default()), Err(EncodeError::InvalidParams));
        assert_eq!(run(TextureFormat::I8, 0, 4, &[], &EncodeOptions::default()), Err(EncodeError::InvalidTextureWidth));

        let mipmapped = EncodeOptions { mip_limit: 2, ..Default::default() };
        assert_eq!(run(TextureFormat::CI8, 4, 4, &pixels, &mipmapped), Err(EncodeError::MipmappedPaletteFormat));

        let metric = EncodeOptions { squish_metric: vec![1.0, 1.0], ..Default::default() };
        assert_eq!(run(TextureFormat::CMP, 4, 4, &pixels, &metric), Err(EncodeError::InvalidMetricSize));

        let zero = EncodeOptions { mip_limit: 0, ..Default::default() };
        assert_eq!(run(TextureFormat::I8, 4, 4, &pixels, &zero), Err(EncodeError::InvalidMipLimit));
    }

    #[test]
    fn test_indexed_round_trip() {
        let mut pixels = Vec::new();
        for i in 0..64u8 {
            let px: [u8; 4] = if i % 3 == 0 { [0xFF, 0, 0, 0xFF] } else { [0, 0, 0xFF, 0xFF] };
            pixels.extend_from_slice(&px);
        }
        for format in [TextureFormat::CI4, TextureFormat::CI8, TextureFormat::CI14X2] {
            let txtr = run(format, 8, 8, &pixels, &EncodeOptions::default()).unwrap();
            let palette = txtr.palette.as_ref().unwrap();
            assert_eq!(palette.entries.len(), palette.declared_len());
            let images = decode(&txtr, &DecodeOptions::default(), &CancelToken::new()).unwrap();
            assert_eq!(images[0].as_raw(), &pixels, "{format:?}");
        }
    }

    #[test]
    fn test_cmp_solid_color() {
        let pixels = [0x00, 0xFF, 0x00, 0xFF].repeat(64);
        let txtr = run(TextureFormat::CMP, 8, 8, &pixels, &EncodeOptions::default()).unwrap();
        assert_eq!(txtr.mipmaps[0].data.len(), 32);
        let images = decode(&txtr, &DecodeOptions::default(), &CancelToken::new()).unwrap();
        assert_eq!(images[0].as_raw(), &pixels);
    }

    #[test]
    fn test_flip_y_reverses_rows() {
        let pixels = gradient(4, 4);
        let options = EncodeOptions { flip_y: true, ..Default::default() };
        let txtr = run(TextureFormat::RGBA8, 4, 4, &pixels, &options).unwrap();
        let back = DecodeOptions { flip_y: true, ..Default::default() };
        let images = decode(&txtr, &back, &CancelToken::new()).unwrap();
        assert_eq!(images[0].as_raw(), &pixels);
    }

    #[test]
    fn test_interrupted() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let pixels = gradient(4, 4);
        let result = encode(
            TextureFormat::RGBA8,
            PaletteFormat::RGB5A3,
            4,
            4,
            &pixels,
            &EncodeOptions::default(),
            &cancel,
        );
        assert_eq!(result, Err(EncodeError::Interrupted));
    }
}
