//! TXTR texture container
//!
//! Layout (all fields big-endian):
//!
//! ```text
//! u32 format | u16 width | u16 height | u32 mip_count
//! [indexed formats only] u32 palette_format | u16 palette_width | u16 palette_height | u16 entries[w * h]
//! mip level 0 data | mip level 1 data | ...
//! ```

mod error;
mod format;
mod reader;
mod writer;

pub use error::{TxtrReadError, TxtrReadResult, TxtrWriteError, TxtrWriteResult};
pub use format::{mip_dimensions, PaletteFormat, TextureFormat};

/// Largest texture width or height the GX can sample
pub const MAX_DIMENSION: u16 = 1024;

/// Most mip levels a TXTR may carry
pub const MAX_MIPMAPS: u32 = 11;

/// Size of the texture header in bytes
pub const HEADER_SIZE: usize = 12;

/// Size of the palette header in bytes
pub const PALETTE_HEADER_SIZE: usize = 8;

/// TXTR texture header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxtrHeader {
    pub format: TextureFormat,
    pub width: u16,
    pub height: u16,
    pub mip_count: u32,
}

/// Palette of an indexed texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtrPalette {
    pub format: PaletteFormat,
    pub width: u16,
    pub height: u16,
    /// Raw 16-bit entries in `format`
    pub entries: Vec<u16>,
}

impl TxtrPalette {
    /// Number of entries declared by the palette header
    pub fn declared_len(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Encoded pixel data of one mip level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMipmap {
    pub width: u16,
    pub height: u16,
    /// Block-tiled GX pixel data
    pub data: Vec<u8>,
}

/// A parsed TXTR container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Txtr {
    pub header: TxtrHeader,
    pub palette: Option<TxtrPalette>,
    /// Mip levels, largest first
    pub mipmaps: Vec<RawMipmap>,
}

impl Txtr {
    /// Whether the texture is palette-driven
    pub fn is_indexed(&self) -> bool {
        self.header.format.is_indexed()
    }

    /// Expected dimensions and byte size of mip level `level`
    pub fn level_layout(&self, level: u32) -> (u16, u16, usize) {
        let (w, h) = mip_dimensions(self.header.width, self.header.height, level);
        (w, h, self.header.format.data_size(u32::from(w), u32::from(h)))
    }
}
