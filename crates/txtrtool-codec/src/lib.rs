//! txtrtool-codec
//!
//! Converts between GX pixel data stored in TXTR containers and RGBA8 images.
//!
//! Decoding covers every TXTR pixel format, including palette expansion and
//! CMPR block decompression. Encoding adds greyscale averaging, palette
//! quantization with error diffusion, CMPR block compression and mipmap
//! generation by resampling.
//!
//! # Example
//!
//! ```rust,ignore
//! use txtrtool_codec::{decode, DecodeOptions};
//! use txtrtool_core::CancelToken;
//!
//! let images = decode(&txtr, &DecodeOptions::default(), &CancelToken::new())?;
//! ```

mod cmpr;
mod decode;
mod encode;
pub mod error;
pub mod options;
mod palette;
pub mod pixel;
mod resample;
mod tiling;

pub use decode::decode;
pub use encode::encode;
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use image::RgbaImage;
pub use options::{
    AverageType, DecodeOptions, DitherType, EdgeMode, EncodeOptions, ResizeFilter, SquishFlags,
    DEFAULT_METRIC,
};
