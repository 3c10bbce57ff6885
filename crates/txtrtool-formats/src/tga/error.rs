//! Fine-grained TGA container errors

use thiserror::Error;

/// Errors reported while parsing a TGA file
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TgaReadError {
    #[error("Invalid parameters")]
    InvalidParams,

    #[error("Color map present")]
    ColorMapPresent,

    #[error("Not an uncompressed truecolor TGA")]
    NotAColorTga,

    #[error("Invalid x origin")]
    InvalidXOrigin,

    #[error("Invalid y origin")]
    InvalidYOrigin,

    #[error("Invalid width")]
    InvalidWidth,

    #[error("Invalid height")]
    InvalidHeight,

    #[error("Invalid pixel depth")]
    InvalidPixelDepth,

    #[error("Invalid alpha bit size")]
    InvalidAlphaBitSize,

    #[error("Failed to allocate memory for the image id")]
    IdAllocFailed,

    #[error("Failed to allocate memory for the image data")]
    DataAllocFailed,
}

impl TgaReadError {
    /// Every variant
    pub const ALL: &'static [Self] = &[
        Self::InvalidParams,
        Self::ColorMapPresent,
        Self::NotAColorTga,
        Self::InvalidXOrigin,
        Self::InvalidYOrigin,
        Self::InvalidWidth,
        Self::InvalidHeight,
        Self::InvalidPixelDepth,
        Self::InvalidAlphaBitSize,
        Self::IdAllocFailed,
        Self::DataAllocFailed,
    ];
}

/// Errors reported while serializing a TGA file
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TgaWriteError {
    #[error("Failed to allocate memory for the image data")]
    DataAllocFailed,

    #[error("Color map present")]
    ColorMapPresent,

    #[error("Not an uncompressed truecolor TGA")]
    NotAColorTga,

    #[error("Invalid x origin")]
    InvalidXOrigin,

    #[error("Invalid y origin")]
    InvalidYOrigin,

    #[error("Invalid width")]
    InvalidWidth,

    #[error("Invalid height")]
    InvalidHeight,

    #[error("Invalid pixel depth")]
    InvalidPixelDepth,

    #[error("Invalid alpha bit size")]
    InvalidAlphaBitSize,

    #[error("Invalid parameters")]
    InvalidParams,

    #[error("Invalid image data size")]
    InvalidData,

    #[error("Invalid image id")]
    InvalidId,

    #[error("Invalid footer signature")]
    InvalidSignature,
}

impl TgaWriteError {
    /// Every variant
    pub const ALL: &'static [Self] = &[
        Self::DataAllocFailed,
        Self::ColorMapPresent,
        Self::NotAColorTga,
        Self::InvalidXOrigin,
        Self::InvalidYOrigin,
        Self::InvalidWidth,
        Self::InvalidHeight,
        Self::InvalidPixelDepth,
        Self::InvalidAlphaBitSize,
        Self::InvalidParams,
        Self::InvalidData,
        Self::InvalidId,
        Self::InvalidSignature,
    ];
}

/// Result type for TGA parsing
pub type TgaReadResult<T> = Result<T, TgaReadError>;

/// Result type for TGA serialization
pub type TgaWriteResult<T> = Result<T, TgaWriteError>;
