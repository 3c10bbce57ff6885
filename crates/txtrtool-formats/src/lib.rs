//! txtrtool-formats
//!
//! Container-level parsing and serialization for the two file formats
//! txtrtool converts between.
//!
//! | Format | Extension | Description |
//! |--------|-----------|-------------|
//! | TXTR   | `.txtr`   | Metroid Prime texture container (big-endian, GX pixel data) |
//! | TGA    | `.tga`    | Truevision TGA, uncompressed truecolor only |
//!
//! Pixel data is carried through untouched; decoding GX pixel formats is the
//! job of `txtrtool-codec`.
//!
//! # Example
//!
//! ```rust,ignore
//! use txtrtool_formats::Txtr;
//!
//! let txtr = Txtr::read(&std::fs::read("texture.txtr")?)?;
//! println!("{:?} {}x{}", txtr.header.format, txtr.header.width, txtr.header.height);
//! ```

pub mod tga;
pub mod txtr;

pub use tga::{Tga, TgaFooter, TgaHeader, TgaReadError, TgaReadResult, TgaWriteError, TgaWriteResult};
pub use txtr::{
    mip_dimensions, PaletteFormat, RawMipmap, TextureFormat, Txtr, TxtrHeader, TxtrPalette, TxtrReadError,
    TxtrReadResult, TxtrWriteError, TxtrWriteResult, MAX_DIMENSION, MAX_MIPMAPS,
};
