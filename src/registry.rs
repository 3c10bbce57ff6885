//! Canonical command-line spellings of every enumeration domain

use txtrtool_codec::{AverageType, DitherType, EdgeMode, ResizeFilter};
use txtrtool_core::Registry;
use txtrtool_formats::{PaletteFormat, TextureFormat};

pub static TEXTURE_FORMATS: Registry<TextureFormat> = Registry::new(
    "texture format",
    &[
        (TextureFormat::I4, "I4"),
        (TextureFormat::I8, "I8"),
        (TextureFormat::IA4, "IA4"),
        (TextureFormat::IA8, "IA8"),
        (TextureFormat::CI4, "CI4"),
        (TextureFormat::CI8, "CI8"),
        (TextureFormat::CI14X2, "CI14X2"),
        (TextureFormat::R5G6B5, "R5G6B5"),
        (TextureFormat::RGB5A3, "RGB5A3"),
        (TextureFormat::RGBA8, "RGBA8"),
        (TextureFormat::CMP, "CMP"),
    ],
);

pub static PALETTE_FORMATS: Registry<PaletteFormat> = Registry::new(
    "palette format",
    &[
        (PaletteFormat::IA8, "IA8"),
        (PaletteFormat::R5G6B5, "R5G6B5"),
        (PaletteFormat::RGB5A3, "RGB5A3"),
    ],
);

pub static AVERAGE_TYPES: Registry<AverageType> = Registry::new(
    "average type",
    &[
        (AverageType::Average, "AVERAGE"),
        (AverageType::Squared, "SQUARED"),
        (AverageType::W3c, "W3C"),
        (AverageType::Srgb, "SRGB"),
    ],
);

pub static EDGE_MODES: Registry<EdgeMode> = Registry::new(
    "edge mode",
    &[
        (EdgeMode::Clamp, "CLAMP"),
        (EdgeMode::Reflect, "REFLECT"),
        (EdgeMode::Wrap, "WRAP"),
        (EdgeMode::Zero, "ZERO"),
    ],
);

pub static RESIZE_FILTERS: Registry<ResizeFilter> = Registry::new(
    "filter mode",
    &[
        (ResizeFilter::Default, "DEFAULT"),
        (ResizeFilter::Box, "BOX"),
        (ResizeFilter::Triangle, "TRIANGLE"),
        (ResizeFilter::CubicBSpline, "CUBICBSPLINE"),
        (ResizeFilter::CatmullRom, "CATMULLROM"),
        (ResizeFilter::Mitchell, "MITCHELL"),
        (ResizeFilter::PointSample, "POINT_SAMPLE"),
    ],
);

pub static DITHER_TYPES: Registry<DitherType> = Registry::new(
    "dither type",
    &[
        (DitherType::Threshold, "THRESHOLD"),
        (DitherType::FloydSteinberg, "FLOYD_STEINBERG"),
        (DitherType::Atkinson, "ATKINSON"),
        (DitherType::JarvisJudiceNinke, "JARVIS_JUDICE_NINKE"),
        (DitherType::Stucki, "STUCKI"),
        (DitherType::Burkes, "BURKES"),
        (DitherType::TwoRowSierra, "TWO_ROW_SIERRA"),
        (DitherType::Sierra, "SIERRA"),
        (DitherType::SierraLite, "SIERRA_LITE"),
    ],
);

/// Option help text listing a registry's valid values
pub fn choices_help<T: Copy + PartialEq + 'static>(summary: &str, registry: &Registry<T>) -> String {
    format!("{summary} [valid values: {}]", registry.list())
}
