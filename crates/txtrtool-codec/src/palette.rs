//! Palette construction and error-diffusion mapping for indexed formats

use std::collections::{BTreeMap, HashMap};

use tracing::debug;
use txtrtool_core::CancelToken;
use txtrtool_formats::PaletteFormat;

use crate::error::{EncodeError, EncodeResult};
use crate::options::{AverageType, DitherType};
use crate::pixel::{self, Rgba};

/// A palette in both encoded and displayable form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub entries: Vec<u16>,
    pub colors: Vec<Rgba>,
}

/// Round-trip a pixel through the palette format's precision
fn reduce(format: PaletteFormat, px: Rgba, average: AverageType) -> (u16, Rgba) {
    let entry = pixel::encode_palette_entry(format, px, average);
    (entry, pixel::decode_palette_entry(format, entry))
}

/// Build a palette of at most `capacity` entries for `pixels`
pub fn build(
    pixels: &[Rgba],
    format: PaletteFormat,
    average: AverageType,
    capacity: usize,
) -> EncodeResult<Palette> {
    let mut histogram: BTreeMap<u16, (Rgba, u32)> = BTreeMap::new();
    for &px in pixels {
        let (entry, color) = reduce(format, px, average);
        histogram.entry(entry).or_insert((color, 0)).1 += 1;
    }
    if histogram.is_empty() || capacity == 0 {
        return Err(EncodeError::PaletteBuildFailed);
    }

    let mut entries = Vec::new();
    entries
        .try_reserve_exact(capacity.min(histogram.len()))
        .map_err(|_| EncodeError::PaletteAllocFailed)?;

    if histogram.len() <= capacity {
        entries.extend(histogram.keys().copied());
    } else {
        let weighted: Vec<(Rgba, u32)> = histogram.values().copied().collect();
        for color in median_cut(weighted, capacity) {
            let (entry, _) = reduce(format, color, average);
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
    }

    debug!(unique = histogram.len(), entries = entries.len(), capacity, "built palette");
    let colors = entries.iter().map(|&e| pixel::decode_palette_entry(format, e)).collect();
    Ok(Palette { entries, colors })
}

/// A box of weighted colors in RGBA space
struct ColorBox {
    colors: Vec<(Rgba, u32)>,
}

impl ColorBox {
    /// Channel with the widest spread, and that spread
    fn widest_channel(&self) -> (usize, u8) {
        (0..4)
            .map(|c| {
                let (lo, hi) = self
                    .colors
                    .iter()
                    .fold((u8::MAX, u8::MIN), |(lo, hi), (px, _)| (lo.min(px[c]), hi.max(px[c])));
                (c, hi.saturating_sub(lo))
            })
            .max_by_key(|&(_, spread)| spread)
            .unwrap_or((0, 0))
    }

    fn mean(&self) -> Rgba {
        let mut sum = [0u64; 4];
        let mut total = 0u64;
        for (px, count) in &self.colors {
            for (s, v) in sum.iter_mut().zip(px) {
                *s += u64::from(*v) * u64::from(*count);
            }
            total += u64::from(*count);
        }
        let total = total.max(1);
        sum.map(|s| ((s + total / 2) / total) as u8)
    }

    /// Split at the weighted median of the widest channel
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (channel, _) = self.widest_channel();
        self.colors.sort_by_key(|(px, _)| px[channel]);
        let half: u64 = self.colors.iter().map(|(_, n)| u64::from(*n)).sum::<u64>() / 2;

        let mut running = 0u64;
        let mut at = 1;
        for (i, (_, n)) in self.colors.iter().enumerate() {
            running += u64::from(*n);
            if running >= half {
                at = i + 1;
                break;
            }
        }
        let at = at.clamp(1, self.colors.len() - 1);
        let upper = self.colors.split_off(at);
        (self, ColorBox { colors: upper })
    }
}

/// Reduce weighted colors to at most `count` representatives
fn median_cut(colors: Vec<(Rgba, u32)>, count: usize) -> Vec<Rgba> {
    let mut boxes = vec![ColorBox { colors }];
    while boxes.len() < count {
        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.colors.len() > 1)
            .max_by_key(|(_, b)| {
                let weight: u64 = b.colors.iter().map(|(_, n)| u64::from(*n)).sum();
                (u64::from(b.widest_channel().1) * weight, b.colors.len())
            })
            .map(|(i, _)| i);
        let Some(index) = candidate else { break };
        let (lower, upper) = boxes.swap_remove(index).split();
        boxes.push(lower);
        boxes.push(upper);
    }
    boxes.iter().map(ColorBox::mean).collect()
}

type Taps = &'static [(isize, isize, f32)];

const THRESHOLD: Taps = &[];

const FLOYD_STEINBERG: Taps = &[(1, 0, 7.0), (-1, 1, 3.0), (0, 1, 5.0), (1, 1, 1.0)];

const ATKINSON: Taps = &[(1, 0, 1.0), (2, 0, 1.0), (-1, 1, 1.0), (0, 1, 1.0), (1, 1, 1.0), (0, 2, 1.0)];

const JARVIS_JUDICE_NINKE: Taps = &[
    (1, 0, 7.0), (2, 0, 5.0),
    (-2, 1, 3.0), (-1, 1, 5.0), (0, 1, 7.0), (1, 1, 5.0), (2, 1, 3.0),
    (-2, 2, 1.0), (-1, 2, 3.0), (0, 2, 5.0), (1, 2, 3.0), (2, 2, 1.0),
];

const STUCKI: Taps = &[
    (1, 0, 8.0), (2, 0, 4.0),
    (-2, 1, 2.0), (-1, 1, 4.0), (0, 1, 8.0), (1, 1, 4.0), (2, 1, 2.0),
    (-2, 2, 1.0), (-1, 2, 2.0), (0, 2, 4.0), (1, 2, 2.0), (2, 2, 1.0),
];

const BURKES: Taps = &[
    (1, 0, 8.0), (2, 0, 4.0),
    (-2, 1, 2.0), (-1, 1, 4.0), (0, 1, 8.0), (1, 1, 4.0), (2, 1, 2.0),
];

const TWO_ROW_SIERRA: Taps = &[
    (1, 0, 4.0), (2, 0, 3.0),
    (-2, 1, 1.0), (-1, 1, 2.0), (0, 1, 3.0), (1, 1, 2.0), (2, 1, 1.0),
];

const SIERRA: Taps = &[
    (1, 0, 5.0), (2, 0, 3.0),
    (-2, 1, 2.0), (-1, 1, 4.0), (0, 1, 5.0), (1, 1, 4.0), (2, 1, 2.0),
    (-1, 2, 2.0), (0, 2, 3.0), (1, 2, 2.0),
];

const SIERRA_LITE: Taps = &[(1, 0, 2.0), (-1, 1, 1.0), (0, 1, 1.0)];

/// Offsets and weights of an error-diffusion kernel, and its divisor
fn kernel(dither: DitherType) -> (Taps, f32) {
    match dither {
        DitherType::Threshold => (THRESHOLD, 1.0),
        DitherType::FloydSteinberg => (FLOYD_STEINBERG, 16.0),
        DitherType::Atkinson => (ATKINSON, 8.0),
        DitherType::JarvisJudiceNinke => (JARVIS_JUDICE_NINKE, 48.0),
        DitherType::Stucki => (STUCKI, 42.0),
        DitherType::Burkes => (BURKES, 32.0),
        DitherType::TwoRowSierra => (TWO_ROW_SIERRA, 16.0),
        DitherType::Sierra => (SIERRA, 32.0),
        DitherType::SierraLite => (SIERRA_LITE, 4.0),
    }
}

fn nearest(colors: &[Rgba], target: Rgba) -> usize {
    colors
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| {
            c.iter()
                .zip(target)
                .map(|(&a, b)| {
                    let d = i32::from(a) - i32::from(b);
                    (d * d) as u32
                })
                .sum::<u32>()
        })
        .map_or(0, |(i, _)| i)
}

/// Map every pixel of a `width` x `height` image to a palette index
pub fn map_indices(
    pixels: &[Rgba],
    width: usize,
    height: usize,
    palette: &Palette,
    dither: DitherType,
    cancel: &CancelToken,
) -> EncodeResult<Vec<u16>> {
    let (taps, divisor) = kernel(dither);

    let mut indices = Vec::new();
    indices
        .try_reserve_exact(pixels.len())
        .map_err(|_| EncodeError::SourcePixelsAllocFailed)?;

    let mut error = Vec::new();
    if !taps.is_empty() {
        error
            .try_reserve_exact(pixels.len())
            .map_err(|_| EncodeError::SourcePixelsAllocFailed)?;
        error.resize(pixels.len(), [0.0f32; 4]);
    }

    let mut cache: HashMap<Rgba, u16> = HashMap::new();
    for y in 0..height {
        if cancel.is_cancelled() {
            return Err(EncodeError::Interrupted);
        }
        for x in 0..width {
            let i = y * width + x;
            let mut target = pixels[i];
            if !taps.is_empty() {
                for (c, e) in target.iter_mut().zip(error[i]) {
                    *c = (f32::from(*c) + e).round().clamp(0.0, 255.0) as u8;
                }
            }

            let index = *cache
                .entry(target)
                .or_insert_with(|| nearest(&palette.colors, target) as u16);
            indices.push(index);

            if taps.is_empty() {
                continue;
            }
            let chosen = palette.colors[usize::from(index)];
            let residual: [f32; 4] =
                std::array::from_fn(|c| f32::from(target[c]) - f32::from(chosen[c]));
            for &(dx, dy, weight) in taps {
                let (nx, ny) = (x as isize + dx, y as isize + dy);
                if nx < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let slot = &mut error[ny as usize * width + nx as usize];
                for (s, r) in slot.iter_mut().zip(residual) {
                    *s += r * weight / divisor;
                }
            }
        }
    }

    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_palette_when_colors_fit() {
        let pixels = [[255, 0, 0, 255], [0, 255, 0, 255], [255, 0, 0, 255]];
        let palette = build(&pixels, PaletteFormat::R5G6B5, AverageType::Average, 16).unwrap();
        assert_eq!(palette.entries.len(), 2);
        assert!(palette.entries.contains(&0xF800));
        assert!(palette.entries.contains(&0x07E0));
    }

    #[test]
    fn test_median_cut_respects_capacity() {
        let pixels: Vec<Rgba> = (0..=255u8).map(|v| [v, 255 - v, v / 2, 255]).collect();
        let palette = build(&pixels, PaletteFormat::RGB5A3, AverageType::Average, 16).unwrap();
        assert!(palette.entries.len() <= 16);
        assert!(palette.entries.len() > 1);
        assert_eq!(palette.entries.len(), palette.colors.len());
    }

    #[test]
    fn test_ia8_palette_is_greyscale() {
        let pixels = [[255, 0, 0, 128]];
        let palette = build(&pixels, PaletteFormat::IA8, AverageType::Average, 16).unwrap();
        assert_eq!(palette.colors, vec![[85, 85, 85, 128]]);
    }

    #[test]
    fn test_empty_image_fails() {
        let result = build(&[], PaletteFormat::IA8, AverageType::Average, 16);
        assert_eq!(result, Err(EncodeError::PaletteBuildFailed));
    }

    #[test]
    fn test_threshold_maps_exactly() {
        let pixels = [[255, 0, 0, 255], [0, 255, 0, 255]];
        let palette = build(&pixels, PaletteFormat::R5G6B5, AverageType::Average, 16).unwrap();
        let indices =
            map_indices(&pixels, 2, 1, &palette, DitherType::Threshold, &CancelToken::new()).unwrap();
        assert_eq!(palette.colors[usize::from(indices[0])], [255, 0, 0, 255]);
        assert_eq!(palette.colors[usize::from(indices[1])], [0, 255, 0, 255]);
    }

    #[test]
    fn test_dithering_mixes_entries() {
        let palette = Palette {
            entries: vec![0x0000, 0xFFFF],
            colors: vec![[0, 0, 0, 255], [255, 255, 255, 255]],
        };
        let pixels = vec![[128, 128, 128, 255]; 16];
        let indices =
            map_indices(&pixels, 4, 4, &palette, DitherType::FloydSteinberg, &CancelToken::new())
                .unwrap();
        assert!(indices.contains(&0));
        assert!(indices.contains(&1));
    }

    #[test]
    fn test_kernel_weights_sum_to_divisor() {
        for dither in DitherType::ALL.iter().skip(1) {
            let (taps, divisor) = kernel(*dither);
            let sum: f32 = taps.iter().map(|t| t.2).sum();
            if *dither == DitherType::Atkinson {
                assert_eq!(sum, 6.0);
            } else {
                assert_eq!(sum, divisor, "{dither:?}");
            }
        }
    }
}
