//! Separable image resampling for mipmap generation
//!
//! Kernels widen by the scale factor when minifying. Color channels are
//! filtered premultiplied by alpha.

use image::RgbaImage;

use crate::error::{EncodeError, EncodeResult};
use crate::options::{EdgeMode, ResizeFilter};

/// One source sample contributing to a destination sample
#[derive(Debug, Clone, Copy)]
struct Tap {
    index: usize,
    weight: f32,
}

/// Taps for every destination sample of one axis
struct Contributions {
    taps: Vec<Tap>,
    ranges: Vec<(usize, usize)>,
}

impl Contributions {
    fn taps(&self, i: usize) -> &[Tap] {
        let (start, end) = self.ranges[i];
        &self.taps[start..end]
    }
}

fn cubic(x: f32, b: f32, c: f32) -> f32 {
    let x = x.abs();
    let value = if x < 1.0 {
        (12.0 - 9.0 * b - 6.0 * c) * x * x * x + (-18.0 + 12.0 * b + 6.0 * c) * x * x + (6.0 - 2.0 * b)
    } else if x < 2.0 {
        (-b - 6.0 * c) * x * x * x + (6.0 * b + 30.0 * c) * x * x + (-12.0 * b - 48.0 * c) * x
            + (8.0 * b + 24.0 * c)
    } else {
        0.0
    };
    value / 6.0
}

/// Concrete kernel after resolving `Default` for one axis
#[derive(Debug, Clone, Copy, PartialEq)]
enum Kernel {
    Box,
    Triangle,
    Cubic { b: f32, c: f32 },
    Point,
}

impl Kernel {
    fn resolve(filter: ResizeFilter, minifying: bool) -> Self {
        match filter {
            ResizeFilter::Default if minifying => Self::Cubic { b: 1.0 / 3.0, c: 1.0 / 3.0 },
            ResizeFilter::Default => Self::Cubic { b: 0.0, c: 0.5 },
            ResizeFilter::Box => Self::Box,
            ResizeFilter::Triangle => Self::Triangle,
            ResizeFilter::CubicBSpline => Self::Cubic { b: 1.0, c: 0.0 },
            ResizeFilter::CatmullRom => Self::Cubic { b: 0.0, c: 0.5 },
            ResizeFilter::Mitchell => Self::Cubic { b: 1.0 / 3.0, c: 1.0 / 3.0 },
            ResizeFilter::PointSample => Self::Point,
        }
    }

    fn support(self) -> f32 {
        match self {
            Self::Box | Self::Point => 0.5,
            Self::Triangle => 1.0,
            Self::Cubic { .. } => 2.0,
        }
    }

    fn weight(self, x: f32) -> f32 {
        match self {
            Self::Box | Self::Point => {
                if (-0.5..0.5).contains(&x) {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Triangle => (1.0 - x.abs()).max(0.0),
            Self::Cubic { b, c } => cubic(x, b, c),
        }
    }
}

/// Map a possibly out-of-range sample index onto the source
fn edge_index(index: isize, len: usize, edge: EdgeMode) -> Option<usize> {
    let n = len as isize;
    if (0..n).contains(&index) {
        return Some(index as usize);
    }
    let mapped = match edge {
        EdgeMode::Clamp => index.clamp(0, n - 1),
        EdgeMode::Reflect => {
            let m = index.rem_euclid(2 * n);
            if m >= n {
                2 * n - 1 - m
            } else {
                m
            }
        }
        EdgeMode::Wrap => index.rem_euclid(n),
        EdgeMode::Zero => return None,
    };
    Some(mapped as usize)
}

fn contributions(src_len: usize, dst_len: usize, filter: ResizeFilter, edge: EdgeMode) -> Contributions {
    let scale = src_len as f32 / dst_len as f32;
    let kernel = Kernel::resolve(filter, scale > 1.0);
    let mut taps = Vec::new();
    let mut ranges = Vec::with_capacity(dst_len);

    for i in 0..dst_len {
        let center = (i as f32 + 0.5) * scale;
        let start = taps.len();

        if kernel == Kernel::Point {
            let index = (center.floor() as usize).min(src_len - 1);
            taps.push(Tap { index, weight: 1.0 });
            ranges.push((start, taps.len()));
            continue;
        }

        let stretch = scale.max(1.0);
        let radius = kernel.support() * stretch;
        let first = (center - radius).floor() as isize;
        let last = (center + radius).ceil() as isize;

        let mut total = 0.0;
        for j in first..=last {
            let weight = kernel.weight((j as f32 + 0.5 - center) / stretch);
            if weight == 0.0 {
                continue;
            }
            total += weight;
            if let Some(index) = edge_index(j, src_len, edge) {
                taps.push(Tap { index, weight });
            }
        }

        if total != 0.0 {
            for tap in &mut taps[start..] {
                tap.weight /= total;
            }
        }
        ranges.push((start, taps.len()));
    }

    Contributions { taps, ranges }
}

/// Resize `src` to `width` x `height`
pub fn resize(
    src: &RgbaImage,
    width: u32,
    height: u32,
    filter: ResizeFilter,
    edge: EdgeMode,
) -> EncodeResult<RgbaImage> {
    let (sw, sh) = (src.width() as usize, src.height() as usize);
    let (dw, dh) = (width as usize, height as usize);
    if sw == 0 || sh == 0 || dw == 0 || dh == 0 {
        return Err(EncodeError::ResizeFailed);
    }

    let premultiplied: Vec<[f32; 4]> = src
        .pixels()
        .map(|p| {
            let a = f32::from(p[3]) / 255.0;
            [f32::from(p[0]) * a, f32::from(p[1]) * a, f32::from(p[2]) * a, f32::from(p[3])]
        })
        .collect();

    let horizontal = contributions(sw, dw, filter, edge);
    let mut rows = Vec::new();
    rows.try_reserve_exact(dw * sh).map_err(|_| EncodeError::ResizeFailed)?;
    for y in 0..sh {
        let line = &premultiplied[y * sw..(y + 1) * sw];
        for x in 0..dw {
            rows.push(accumulate(horizontal.taps(x), |i| line[i]));
        }
    }

    let vertical = contributions(sh, dh, filter, edge);
    let mut out = Vec::new();
    out.try_reserve_exact(dw * dh * 4).map_err(|_| EncodeError::ResizeFailed)?;
    for y in 0..dh {
        let taps = vertical.taps(y);
        for x in 0..dw {
            let [r, g, b, a] = accumulate(taps, |i| rows[i * dw + x]);
            let alpha = a.round().clamp(0.0, 255.0);
            let unpremultiply = |c: f32| {
                if alpha > 0.0 {
                    (c * 255.0 / alpha).round().clamp(0.0, 255.0) as u8
                } else {
                    0
                }
            };
            out.extend_from_slice(&[unpremultiply(r), unpremultiply(g), unpremultiply(b), alpha as u8]);
        }
    }

    RgbaImage::from_raw(width, height, out).ok_or(EncodeError::ResizeFailed)
}

fn accumulate(taps: &[Tap], sample: impl Fn(usize) -> [f32; 4]) -> [f32; 4] {
    let mut acc = [0.0f32; 4];
    for tap in taps {
        let s = sample(tap.index);
        for (a, v) in acc.iter_mut().zip(s) {
            *a += v * tap.weight;
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_cubic_kernels_interpolate() {
        assert!((cubic(0.0, 0.0, 0.5) - 1.0).abs() < 1e-6);
        assert!(cubic(1.0, 0.0, 0.5).abs() < 1e-6);
        assert!(cubic(2.5, 1.0 / 3.0, 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_edge_modes() {
        assert_eq!(edge_index(-1, 4, EdgeMode::Clamp), Some(0));
        assert_eq!(edge_index(5, 4, EdgeMode::Clamp), Some(3));
        assert_eq!(edge_index(-1, 4, EdgeMode::Reflect), Some(0));
        assert_eq!(edge_index(4, 4, EdgeMode::Reflect), Some(3));
        assert_eq!(edge_index(-1, 4, EdgeMode::Wrap), Some(3));
        assert_eq!(edge_index(4, 4, EdgeMode::Wrap), Some(0));
        assert_eq!(edge_index(-1, 4, EdgeMode::Zero), None);
        assert_eq!(edge_index(2, 4, EdgeMode::Zero), Some(2));
    }

    #[test]
    fn test_solid_color_is_preserved() {
        let src = RgbaImage::from_pixel(16, 16, Rgba([10, 200, 30, 255]));
        for filter in ResizeFilter::ALL {
            let out = resize(&src, 8, 4, *filter, EdgeMode::Clamp).unwrap();
            assert_eq!(out.dimensions(), (8, 4));
            assert!(out.pixels().all(|p| p.0 == [10, 200, 30, 255]), "{filter:?}");
        }
    }

    #[test]
    fn test_box_averages() {
        let mut src = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        src.put_pixel(1, 0, Rgba([200, 100, 50, 255]));
        let out = resize(&src, 1, 1, ResizeFilter::Box, EdgeMode::Clamp).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [100, 50, 25, 255]);
    }

    #[test]
    fn test_zero_edge_darkens_border() {
        let src = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]));
        let out = resize(&src, 4, 4, ResizeFilter::Triangle, EdgeMode::Zero).unwrap();
        assert!(out.get_pixel(0, 0)[3] < 255);
    }

    #[test]
    fn test_point_sample_picks_source() {
        let src = RgbaImage::from_fn(4, 1, |x, _| Rgba([x as u8 * 10, 0, 0, 255]));
        let out = resize(&src, 2, 1, ResizeFilter::PointSample, EdgeMode::Clamp).unwrap();
        assert_eq!(out.get_pixel(0, 0)[0], 10);
        assert_eq!(out.get_pixel(1, 0)[0], 30);
    }
}
