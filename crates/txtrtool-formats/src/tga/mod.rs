//! Truevision TGA container
//!
//! Only uncompressed truecolor images without a color map are supported,
//! which is everything txtrtool produces and consumes.

mod error;
mod reader;
mod writer;

pub use error::{TgaReadError, TgaReadResult, TgaWriteError, TgaWriteResult};

/// Size of the file header in bytes
pub const HEADER_SIZE: usize = 18;

/// Size of the "new TGA format" footer in bytes
pub const FOOTER_SIZE: usize = 26;

/// Footer signature of the "new TGA format"
pub const FOOTER_SIGNATURE: [u8; 18] = *b"TRUEVISION-XFILE.\0";

/// Image type codes
pub mod image_type {
    pub const NO_DATA: u8 = 0;
    pub const COLOR_MAPPED: u8 = 1;
    pub const TRUE_COLOR: u8 = 2;
    pub const GREYSCALE: u8 = 3;
    pub const RLE_COLOR_MAPPED: u8 = 9;
    pub const RLE_TRUE_COLOR: u8 = 10;
    pub const RLE_GREYSCALE: u8 = 11;
}

/// Image descriptor bits
pub mod descriptor {
    pub const ALPHA_BITS_MASK: u8 = 0x0F;
    pub const RIGHT_TO_LEFT: u8 = 0x10;
    pub const TOP_TO_BOTTOM: u8 = 0x20;
}

/// TGA file header (18 bytes, little-endian)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub color_map_first_entry: u16,
    pub color_map_length: u16,
    pub color_map_entry_size: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub pixel_depth: u8,
    pub image_descriptor: u8,
}

impl TgaHeader {
    /// Alpha channel depth declared by the descriptor
    pub fn alpha_bits(&self) -> u8 {
        self.image_descriptor & descriptor::ALPHA_BITS_MASK
    }

    /// Bytes per stored pixel
    pub fn bytes_per_pixel(&self) -> usize {
        usize::from(self.pixel_depth) / 8
    }

    /// Byte size of the pixel data
    pub fn data_size(&self) -> usize {
        usize::from(self.width) * usize::from(self.height) * self.bytes_per_pixel()
    }
}

/// "New TGA format" footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TgaFooter {
    pub extension_offset: u32,
    pub developer_offset: u32,
    pub signature: [u8; 18],
}

impl Default for TgaFooter {
    fn default() -> Self {
        Self {
            extension_offset: 0,
            developer_offset: 0,
            signature: FOOTER_SIGNATURE,
        }
    }
}

/// A TGA image with pixel data in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tga {
    pub header: TgaHeader,
    pub id: Vec<u8>,
    /// BGR or BGRA pixels, rows in the order the descriptor declares
    pub data: Vec<u8>,
    pub footer: Option<TgaFooter>,
}

impl Tga {
    /// Build a 32-bit, bottom-left origin image from RGBA rows
    ///
    /// `rgba` rows must already be ordered bottom to top.
    pub fn from_rgba(width: u16, height: u16, rgba: &[u8], id: &str, footer: bool) -> Self {
        let header = TgaHeader {
            id_length: u8::try_from(id.len()).unwrap_or(u8::MAX),
            image_type: image_type::TRUE_COLOR,
            width,
            height,
            pixel_depth: 32,
            image_descriptor: 8,
            ..TgaHeader::default()
        };

        let data = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[2], px[1], px[0], px[3]])
            .collect();

        Self {
            header,
            id: id.as_bytes().to_vec(),
            data,
            footer: footer.then(TgaFooter::default),
        }
    }

    /// Whether the file carried the "new TGA format" footer
    pub fn is_new_format(&self) -> bool {
        self.footer.is_some()
    }

    /// Pixels as RGBA, rows top to bottom, columns left to right
    ///
    /// Fails when the pixel depth is not 24 or 32 bits or `data` is shorter
    /// than the header declares.
    pub fn to_rgba(&self) -> TgaReadResult<Vec<u8>> {
        let width = usize::from(self.header.width);
        let height = usize::from(self.header.height);
        let bpp = self.header.bytes_per_pixel();
        if !matches!(bpp, 3 | 4) {
            return Err(TgaReadError::InvalidPixelDepth);
        }
        let bottom_up = self.header.image_descriptor & descriptor::TOP_TO_BOTTOM == 0;
        let right_to_left = self.header.image_descriptor & descriptor::RIGHT_TO_LEFT != 0;

        let mut out = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            let src_y = if bottom_up { height - 1 - y } else { y };
            for x in 0..width {
                let src_x = if right_to_left { width - 1 - x } else { x };
                let offset = (src_y * width + src_x) * bpp;
                let px = self
                    .data
                    .get(offset..offset + bpp)
                    .ok_or(TgaReadError::InvalidParams)?;
                let alpha = if bpp == 4 { px[3] } else { u8::MAX };
                out.extend_from_slice(&[px[2], px[1], px[0], alpha]);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_swizzles_to_bgra() {
        let tga = Tga::from_rgba(1, 1, &[1, 2, 3, 4], "id", true);
        assert_eq!(tga.data, vec![3, 2, 1, 4]);
        assert_eq!(tga.header.id_length, 2);
        assert_eq!(tga.header.alpha_bits(), 8);
        assert!(tga.is_new_format());
    }

    #[test]
    fn test_to_rgba_flips_bottom_up_rows() {
        // Two rows: file order bottom (red) then top (blue)
        let tga = Tga::from_rgba(1, 2, &[255, 0, 0, 255, 0, 0, 255, 255], "", false);
        assert_eq!(tga.to_rgba().unwrap(), vec![0, 0, 255, 255, 255, 0, 0, 255]);
    }

    #[test]
    fn test_to_rgba_24_bit() {
        let header = TgaHeader {
            image_type: image_type::TRUE_COLOR,
            width: 1,
            height: 1,
            pixel_depth: 24,
            image_descriptor: descriptor::TOP_TO_BOTTOM,
            ..TgaHeader::default()
        };
        let tga = Tga { header, id: Vec::new(), data: vec![10, 20, 30], footer: None };
        assert_eq!(tga.to_rgba().unwrap(), vec![30, 20, 10, 255]);
    }

    #[test]
    fn test_to_rgba_short_data() {
        let mut tga = Tga::from_rgba(2, 2, &[0; 16], "", false);
        tga.data.truncate(12);
        assert_eq!(tga.to_rgba(), Err(TgaReadError::InvalidParams));
    }

    #[test]
    fn test_to_rgba_unsupported_depth() {
        let mut tga = Tga::from_rgba(1, 1, &[0; 4], "", false);
        tga.header.pixel_depth = 16;
        assert_eq!(tga.to_rgba(), Err(TgaReadError::InvalidPixelDepth));
    }
}
