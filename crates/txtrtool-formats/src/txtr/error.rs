//! Fine-grained TXTR container errors

use thiserror::Error;

/// Errors reported while parsing a TXTR container
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxtrReadError {
    #[error("Invalid parameters")]
    InvalidParams,

    #[error("Invalid texture format")]
    InvalidTextureFormat,

    #[error("Invalid texture width")]
    InvalidTextureWidth,

    #[error("Invalid texture height")]
    InvalidTextureHeight,

    #[error("Invalid mipmap count")]
    InvalidMipCount,

    #[error("Invalid palette format")]
    InvalidPaletteFormat,

    #[error("Invalid palette width")]
    InvalidPaletteWidth,

    #[error("Invalid palette height")]
    InvalidPaletteHeight,

    #[error("Invalid palette size")]
    InvalidPaletteSize,

    #[error("Failed to allocate memory for the palette")]
    PaletteAllocFailed,

    #[error("Failed to allocate memory for the mipmaps")]
    MipmapsAllocFailed,
}

impl TxtrReadError {
    /// Every variant
    pub const ALL: &'static [Self] = &[
        Self::InvalidParams,
        Self::InvalidTextureFormat,
        Self::InvalidTextureWidth,
        Self::InvalidTextureHeight,
        Self::InvalidMipCount,
        Self::InvalidPaletteFormat,
        Self::InvalidPaletteWidth,
        Self::InvalidPaletteHeight,
        Self::InvalidPaletteSize,
        Self::PaletteAllocFailed,
        Self::MipmapsAllocFailed,
    ];
}

/// Errors reported while serializing a TXTR container
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxtrWriteError {
    #[error("Invalid parameters")]
    InvalidParams,

    #[error("Invalid texture format")]
    InvalidTextureFormat,

    #[error("Invalid texture width")]
    InvalidTextureWidth,

    #[error("Invalid texture height")]
    InvalidTextureHeight,

    #[error("Invalid mipmap count")]
    InvalidMipCount,

    #[error("Invalid palette format")]
    InvalidPaletteFormat,

    #[error("Invalid palette width")]
    InvalidPaletteWidth,

    #[error("Invalid palette height")]
    InvalidPaletteHeight,

    #[error("Invalid palette size")]
    InvalidPaletteSize,

    #[error("Texture palette is missing or unexpected")]
    InvalidTexturePalette,

    #[error("Texture mipmaps do not match the header")]
    InvalidTextureMipmaps,

    #[error("Failed to allocate memory for the mipmaps")]
    MipmapsAllocFailed,

    #[error("Interrupted")]
    Interrupted,
}

impl TxtrWriteError {
    /// Every variant
    pub const ALL: &'static [Self] = &[
        Self::InvalidParams,
        Self::InvalidTextureFormat,
        Self::InvalidTextureWidth,
        Self::InvalidTextureHeight,
        Self::InvalidMipCount,
        Self::InvalidPaletteFormat,
        Self::InvalidPaletteWidth,
        Self::InvalidPaletteHeight,
        Self::InvalidPaletteSize,
        Self::InvalidTexturePalette,
        Self::InvalidTextureMipmaps,
        Self::MipmapsAllocFailed,
        Self::Interrupted,
    ];
}

/// Result type for TXTR parsing
pub type TxtrReadResult<T> = Result<T, TxtrReadError>;

/// Result type for TXTR serialization
pub type TxtrWriteResult<T> = Result<T, TxtrWriteError>;
