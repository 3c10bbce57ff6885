//! Fine-grained pixel codec errors

use thiserror::Error;

/// Errors reported while decoding TXTR pixel data
///
/// `InvalidTextureFormat` and `InvalidPaletteFormat` cannot be produced by the
/// native decoder, whose inputs are already typed; they remain part of the
/// closed set so substitute decoders can report them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeError {
    #[error("Invalid parameters")]
    InvalidParams,

    #[error("Invalid texture format")]
    InvalidTextureFormat,

    #[error("Invalid palette format")]
    InvalidPaletteFormat,

    #[error("Invalid texture width")]
    InvalidTextureWidth,

    #[error("Invalid texture height")]
    InvalidTextureHeight,

    #[error("Invalid texture mipmap count")]
    InvalidTextureMipCount,

    #[error("Failed to allocate memory for the palette")]
    PaletteAllocFailed,

    #[error("Failed to allocate memory for a mipmap")]
    MipmapAllocFailed,

    #[error("Indexed texture has no palette")]
    MissingPalette,

    #[error("Texture is missing mipmaps")]
    MissingMipmaps,

    #[error("Interrupted")]
    Interrupted,

    #[error("Failed to decode the palette")]
    PaletteDecodeFailed,
}

impl DecodeError {
    /// Every variant
    pub const ALL: &'static [Self] = &[
        Self::InvalidParams,
        Self::InvalidTextureFormat,
        Self::InvalidPaletteFormat,
        Self::InvalidTextureWidth,
        Self::InvalidTextureHeight,
        Self::InvalidTextureMipCount,
        Self::PaletteAllocFailed,
        Self::MipmapAllocFailed,
        Self::MissingPalette,
        Self::MissingMipmaps,
        Self::Interrupted,
        Self::PaletteDecodeFailed,
    ];
}

/// Errors reported while encoding RGBA pixels into a TXTR
///
/// The `Invalid*Type`, `InvalidEdgeMode`, `InvalidFilter` and format variants
/// are reserved for encoders that accept raw identifiers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodeError {
    #[error("Failed to allocate memory for the source pixels")]
    SourcePixelsAllocFailed,

    #[error("Failed to allocate memory for a mipmap")]
    MipmapAllocFailed,

    #[error("Failed to allocate memory for the palette")]
    PaletteAllocFailed,

    #[error("Invalid parameters")]
    InvalidParams,

    #[error("Invalid texture format")]
    InvalidTextureFormat,

    #[error("Invalid palette format")]
    InvalidPaletteFormat,

    #[error("Invalid texture width")]
    InvalidTextureWidth,

    #[error("Invalid texture height")]
    InvalidTextureHeight,

    #[error("Invalid mipmap limit")]
    InvalidMipLimit,

    #[error("Width limit is larger than the texture width")]
    InvalidWidthLimit,

    #[error("Height limit is larger than the texture height")]
    InvalidHeightLimit,

    #[error("Invalid average type")]
    InvalidAverageType,

    #[error("Indexed formats cannot carry more than one mipmap")]
    MipmappedPaletteFormat,

    #[error("Invalid edge mode")]
    InvalidEdgeMode,

    #[error("Invalid filter")]
    InvalidFilter,

    #[error("Invalid metric size")]
    InvalidMetricSize,

    #[error("Invalid dither type")]
    InvalidDitherType,

    #[error("Failed to build the palette")]
    PaletteBuildFailed,

    #[error("Failed to resize a mipmap")]
    ResizeFailed,

    #[error("Interrupted")]
    Interrupted,

    #[error("Failed to encode the palette")]
    PaletteEncodeFailed,
}

impl EncodeError {
    /// Every variant
    pub const ALL: &'static [Self] = &[
        Self::SourcePixelsAllocFailed,
        Self::MipmapAllocFailed,
        Self::PaletteAllocFailed,
        Self::InvalidParams,
        Self::InvalidTextureFormat,
        Self::InvalidPaletteFormat,
        Self::InvalidTextureWidth,
        Self::InvalidTextureHeight,
        Self::InvalidMipLimit,
        Self::InvalidWidthLimit,
        Self::InvalidHeightLimit,
        Self::InvalidAverageType,
        Self::MipmappedPaletteFormat,
        Self::InvalidEdgeMode,
        Self::InvalidFilter,
        Self::InvalidMetricSize,
        Self::InvalidDitherType,
        Self::PaletteBuildFailed,
        Self::ResizeFailed,
        Self::Interrupted,
        Self::PaletteEncodeFailed,
    ];
}

/// Result type for decoding
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encoding
pub type EncodeResult<T> = Result<T, EncodeError>;
