//! Validation and normalization of subcommand options
//!
//! Encode options arrive from the command line as raw strings and numbers.
//! [`validate_encode`] resolves them against the registries in a fixed order
//! and stops at the first rejected value, before any file is touched.

use thiserror::Error;
use txtrtool_codec::{AverageType, DitherType, EdgeMode, ResizeFilter, SquishFlags, DEFAULT_METRIC};
use txtrtool_core::Registry;
use txtrtool_formats::{PaletteFormat, TextureFormat, MAX_MIPMAPS};

use crate::cli::{DecodeArgs, EncodeArgs, PrintArgs};
use crate::fileio::OverwritePolicy;
use crate::registry::{
    AVERAGE_TYPES, DITHER_TYPES, EDGE_MODES, PALETTE_FORMATS, RESIZE_FILTERS, TEXTURE_FORMATS,
};

/// Number of components of a perceptual metric
pub const METRIC_SIZE: usize = 3;

/// A rejected encode option
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionError {
    #[error("--texfmt: Invalid format \"{value}\". Valid values: {valid}")]
    TextureFormat { value: String, valid: String },

    #[error("--palfmt: Invalid format \"{value}\". Valid values: {valid}")]
    PaletteFormat { value: String, valid: String },

    #[error("--miplimit: Limit {0} must be less than 12.")]
    MipLimitTooLarge(u8),

    #[error("--miplimit: Limit {0} must be either 1 or 0 on indexed formats.")]
    IndexedMipLimit(u8),

    #[error("--widthlimit: Limit 0 must be greater than 0.")]
    WidthLimit,

    #[error("--heightlimit: Limit 0 must be greater than 0.")]
    HeightLimit,

    #[error("--avgtype: Invalid average type \"{value}\". Valid values: {valid}")]
    AverageType { value: String, valid: String },

    #[error("--stbiredge: Invalid edge mode \"{value}\". Valid values: {valid}")]
    EdgeMode { value: String, valid: String },

    #[error("--stbirfilter: Invalid filter mode \"{value}\". Valid values: {valid}")]
    Filter { value: String, valid: String },

    #[error("--dithertype: Invalid dither type \"{value}\". Valid values: {valid}")]
    DitherType { value: String, valid: String },

    #[error("--squishmetric: Metric of size {0} must be 3.")]
    MetricSize(usize),

    #[error("--squishmetric: Metric's {} component must be between 0.0 and 1.0.", ordinal(.0))]
    MetricComponent(usize),
}

fn ordinal(index: &usize) -> &'static str {
    match *index {
        0 => "first",
        1 => "second",
        _ => "third",
    }
}

/// Look up `value`, building the error from the registry's list on failure
fn resolve<T: Copy + PartialEq + 'static>(
    registry: &Registry<T>,
    value: &str,
    error: impl FnOnce(String, String) -> OptionError,
) -> Result<T, OptionError> {
    registry
        .parse(value)
        .ok_or_else(|| error(value.to_string(), registry.list()))
}

/// Settings of the decode subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeSettings {
    pub policy: OverwritePolicy,
    pub all_mipmaps: bool,
    pub prefix: String,
    pub suffix: String,
}

impl From<&DecodeArgs> for DecodeSettings {
    fn from(args: &DecodeArgs) -> Self {
        Self {
            policy: OverwritePolicy { assume_yes: args.confirm.yes, assume_no: args.confirm.no },
            all_mipmaps: args.mipmaps,
            prefix: args.prefix.clone(),
            suffix: args.suffix.clone(),
        }
    }
}

/// Settings of the print subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintSettings {
    pub json: bool,
}

impl From<&PrintArgs> for PrintSettings {
    fn from(args: &PrintArgs) -> Self {
        Self { json: args.json }
    }
}

/// Fully resolved settings of the encode subcommand
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeSettings {
    pub policy: OverwritePolicy,
    pub texture_format: TextureFormat,
    pub palette_format: PaletteFormat,
    /// Normalized mip limit, 1..=11
    pub mip_limit: u8,
    pub width_limit: u16,
    pub height_limit: u16,
    pub average: AverageType,
    pub edge: EdgeMode,
    pub filter: ResizeFilter,
    pub dither: DitherType,
    pub squish_metric: Vec<f32>,
    pub squish_flags: SquishFlags,
}

/// Resolve and check every encode option in order
pub fn validate_encode(args: &EncodeArgs) -> Result<EncodeSettings, OptionError> {
    let texture_format = resolve(&TEXTURE_FORMATS, &args.texfmt, |value, valid| {
        OptionError::TextureFormat { value, valid }
    })?;
    let palette_format = resolve(&PALETTE_FORMATS, &args.palfmt, |value, valid| {
        OptionError::PaletteFormat { value, valid }
    })?;

    let mip_limit = normalize_mip_limit(args.miplimit, texture_format)?;

    // Upper bounds need the source image and are checked by the encoder
    if args.widthlimit == 0 {
        return Err(OptionError::WidthLimit);
    }
    if args.heightlimit == 0 {
        return Err(OptionError::HeightLimit);
    }

    let average = resolve(&AVERAGE_TYPES, &args.avgtype, |value, valid| {
        OptionError::AverageType { value, valid }
    })?;
    let edge = resolve(&EDGE_MODES, &args.stbiredge, |value, valid| OptionError::EdgeMode { value, valid })?;
    let filter = resolve(&RESIZE_FILTERS, &args.stbirfilter, |value, valid| OptionError::Filter { value, valid })?;
    let dither = resolve(&DITHER_TYPES, &args.dithertype, |value, valid| {
        OptionError::DitherType { value, valid }
    })?;

    let squish_metric = match &args.squishmetric {
        Some(metric) => validate_metric(metric)?,
        None => DEFAULT_METRIC.to_vec(),
    };

    Ok(EncodeSettings {
        policy: OverwritePolicy { assume_yes: args.confirm.yes, assume_no: args.confirm.no },
        texture_format,
        palette_format,
        mip_limit,
        width_limit: args.widthlimit,
        height_limit: args.heightlimit,
        average,
        edge,
        filter,
        dither,
        squish_metric,
        squish_flags: squish_flags(args),
    })
}

/// 0 means the most levels the format allows
fn normalize_mip_limit(limit: u8, format: TextureFormat) -> Result<u8, OptionError> {
    if u32::from(limit) > MAX_MIPMAPS {
        return Err(OptionError::MipLimitTooLarge(limit));
    }
    if format.is_indexed() {
        return match limit {
            0 | 1 => Ok(1),
            _ => Err(OptionError::IndexedMipLimit(limit)),
        };
    }
    Ok(if limit == 0 { MAX_MIPMAPS as u8 } else { limit })
}

fn validate_metric(metric: &[f32]) -> Result<Vec<f32>, OptionError> {
    if metric.len() != METRIC_SIZE {
        return Err(OptionError::MetricSize(metric.len()));
    }
    if let Some(index) = metric.iter().position(|c| !(0.0..=1.0).contains(c)) {
        return Err(OptionError::MetricComponent(index));
    }
    Ok(metric.to_vec())
}

/// Fit algorithm defaults to cluster fit when none is requested
fn squish_flags(args: &EncodeArgs) -> SquishFlags {
    let mut flags = SquishFlags::empty();
    flags.set(SquishFlags::WEIGHT_COLOUR_BY_ALPHA, args.squishalphaweight);
    flags.set(SquishFlags::COLOUR_CLUSTER_FIT, args.squishclusterfit);
    flags.set(SquishFlags::COLOUR_RANGE_FIT, args.squishrangefit);
    flags.set(SquishFlags::COLOUR_ITERATIVE_CLUSTER_FIT, args.squishiterclusterfit);
    if !flags.intersects(SquishFlags::FIT) {
        flags |= SquishFlags::COLOUR_CLUSTER_FIT;
    }
    flags
}
