//! Decode and encode options

use bitflags::bitflags;

/// Per-channel weights used by the block compressor when none are given
pub const DEFAULT_METRIC: [f32; 3] = [1.0, 1.0, 1.0];

/// Formula turning RGB into a single intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AverageType {
    /// Arithmetic mean
    #[default]
    Average,
    /// Root mean square
    Squared,
    /// W3C luma weights (0.299, 0.587, 0.114)
    W3c,
    /// sRGB luminance weights (0.2126, 0.7152, 0.0722)
    Srgb,
}

impl AverageType {
    pub const ALL: &'static [Self] = &[Self::Average, Self::Squared, Self::W3c, Self::Srgb];
}

/// Sampling behaviour outside the source image when resampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeMode {
    #[default]
    Clamp,
    Reflect,
    Wrap,
    Zero,
}

impl EdgeMode {
    pub const ALL: &'static [Self] = &[Self::Clamp, Self::Reflect, Self::Wrap, Self::Zero];
}

/// Resampling kernel used for mipmap generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResizeFilter {
    /// Mitchell when minifying, Catmull-Rom when magnifying
    #[default]
    Default,
    Box,
    Triangle,
    CubicBSpline,
    CatmullRom,
    Mitchell,
    PointSample,
}

impl ResizeFilter {
    pub const ALL: &'static [Self] = &[
        Self::Default,
        Self::Box,
        Self::Triangle,
        Self::CubicBSpline,
        Self::CatmullRom,
        Self::Mitchell,
        Self::PointSample,
    ];
}

/// Error diffusion kernel used when mapping pixels onto a palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherType {
    /// Nearest color, no diffusion
    #[default]
    Threshold,
    FloydSteinberg,
    Atkinson,
    JarvisJudiceNinke,
    Stucki,
    Burkes,
    TwoRowSierra,
    Sierra,
    SierraLite,
}

impl DitherType {
    pub const ALL: &'static [Self] = &[
        Self::Threshold,
        Self::FloydSteinberg,
        Self::Atkinson,
        Self::JarvisJudiceNinke,
        Self::Stucki,
        Self::Burkes,
        Self::TwoRowSierra,
        Self::Sierra,
        Self::SierraLite,
    ];
}

bitflags! {
    /// Block compressor quality flags
    ///
    /// Bit values match the squish library so flag words can be passed through
    /// unchanged.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SquishFlags: u32 {
        const COLOUR_CLUSTER_FIT = 1 << 5;
        const COLOUR_RANGE_FIT = 1 << 6;
        const WEIGHT_COLOUR_BY_ALPHA = 1 << 7;
        const COLOUR_ITERATIVE_CLUSTER_FIT = 1 << 8;
        const FIT = Self::COLOUR_CLUSTER_FIT.bits()
            | Self::COLOUR_RANGE_FIT.bits()
            | Self::COLOUR_ITERATIVE_CLUSTER_FIT.bits();
    }
}

impl SquishFlags {
    /// Fit algorithm selected by the flags
    ///
    /// Range fit and iterative cluster fit win only when they are the sole fit
    /// flag; any other combination falls back to cluster fit.
    pub fn algorithm(self) -> texpresso::Algorithm {
        let fit = self & Self::FIT;
        if fit == Self::COLOUR_RANGE_FIT {
            texpresso::Algorithm::RangeFit
        } else if fit == Self::COLOUR_ITERATIVE_CLUSTER_FIT {
            texpresso::Algorithm::IterativeClusterFit
        } else {
            texpresso::Algorithm::ClusterFit
        }
    }
}

/// Options for [`crate::decode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub flip_x: bool,
    pub flip_y: bool,
    /// Decode every stored level instead of only the first
    pub all_mips: bool,
}

/// Options for [`crate::encode`]
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeOptions {
    pub flip_x: bool,
    pub flip_y: bool,
    /// Most levels to generate, 1..=11
    pub mip_limit: u8,
    /// Smallest level width to generate
    pub width_limit: u16,
    /// Smallest level height to generate
    pub height_limit: u16,
    pub average: AverageType,
    pub squish_flags: SquishFlags,
    /// Red, green and blue weights for the block compressor
    pub squish_metric: Vec<f32>,
    pub edge: EdgeMode,
    pub filter: ResizeFilter,
    pub dither: DitherType,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            flip_x: false,
            flip_y: false,
            mip_limit: 1,
            width_limit: 1,
            height_limit: 1,
            average: AverageType::default(),
            squish_flags: SquishFlags::COLOUR_CLUSTER_FIT,
            squish_metric: DEFAULT_METRIC.to_vec(),
            edge: EdgeMode::default(),
            filter: ResizeFilter::default(),
            dither: DitherType::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_bits() {
        assert_eq!(SquishFlags::COLOUR_CLUSTER_FIT.bits(), 0x20);
        assert_eq!(SquishFlags::COLOUR_RANGE_FIT.bits(), 0x40);
        assert_eq!(SquishFlags::WEIGHT_COLOUR_BY_ALPHA.bits(), 0x80);
        assert_eq!(SquishFlags::COLOUR_ITERATIVE_CLUSTER_FIT.bits(), 0x100);
    }

    #[test]
    fn test_algorithm_precedence() {
        assert!(matches!(SquishFlags::empty().algorithm(), texpresso::Algorithm::ClusterFit));
        assert!(matches!(
            SquishFlags::COLOUR_RANGE_FIT.algorithm(),
            texpresso::Algorithm::RangeFit
        ));
        assert!(matches!(
            (SquishFlags::COLOUR_ITERATIVE_CLUSTER_FIT | SquishFlags::WEIGHT_COLOUR_BY_ALPHA)
                .algorithm(),
            texpresso::Algorithm::IterativeClusterFit
        ));
        assert!(matches!(
            (SquishFlags::COLOUR_RANGE_FIT | SquishFlags::COLOUR_CLUSTER_FIT).algorithm(),
            texpresso::Algorithm::ClusterFit
        ));
    }

    #[test]
    fn test_flag_union() {
        let mut flags = SquishFlags::COLOUR_CLUSTER_FIT;
        flags |= SquishFlags::WEIGHT_COLOUR_BY_ALPHA;
        assert!(flags.contains(SquishFlags::WEIGHT_COLOUR_BY_ALPHA));
        assert!(flags.contains(SquishFlags::COLOUR_CLUSTER_FIT));
        assert!(!flags.contains(SquishFlags::COLOUR_RANGE_FIT));
        assert!(flags.intersects(SquishFlags::FIT));
        assert!(!SquishFlags::WEIGHT_COLOUR_BY_ALPHA.intersects(SquishFlags::FIT));
    }

    #[test]
    fn test_encode_defaults() {
        let options = EncodeOptions::default();
        assert_eq!(options.mip_limit, 1);
        assert_eq!(options.squish_metric, DEFAULT_METRIC);
        assert_eq!(options.filter, ResizeFilter::Default);
    }
}
