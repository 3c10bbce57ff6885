//! TGA parsing

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use tracing::trace;

use super::{
    image_type, Tga, TgaFooter, TgaHeader, TgaReadError, TgaReadResult, FOOTER_SIGNATURE,
    FOOTER_SIZE, HEADER_SIZE,
};

impl TgaHeader {
    /// Parse the 18-byte header without validating it
    pub fn parse<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        Ok(Self {
            id_length: reader.read_u8()?,
            color_map_type: reader.read_u8()?,
            image_type: reader.read_u8()?,
            color_map_first_entry: reader.read_u16::<LittleEndian>()?,
            color_map_length: reader.read_u16::<LittleEndian>()?,
            color_map_entry_size: reader.read_u8()?,
            x_origin: reader.read_u16::<LittleEndian>()?,
            y_origin: reader.read_u16::<LittleEndian>()?,
            width: reader.read_u16::<LittleEndian>()?,
            height: reader.read_u16::<LittleEndian>()?,
            pixel_depth: reader.read_u8()?,
            image_descriptor: reader.read_u8()?,
        })
    }

    fn validate_for_read(&self) -> TgaReadResult<()> {
        if self.color_map_type != 0 {
            return Err(TgaReadError::ColorMapPresent);
        }
        if self.image_type != image_type::TRUE_COLOR {
            return Err(TgaReadError::NotAColorTga);
        }
        if self.x_origin != 0 {
            return Err(TgaReadError::InvalidXOrigin);
        }
        if self.y_origin != 0 {
            return Err(TgaReadError::InvalidYOrigin);
        }
        if self.width == 0 {
            return Err(TgaReadError::InvalidWidth);
        }
        if self.height == 0 {
            return Err(TgaReadError::InvalidHeight);
        }
        let expected_alpha = match self.pixel_depth {
            24 => 0,
            32 => 8,
            _ => return Err(TgaReadError::InvalidPixelDepth),
        };
        if self.alpha_bits() != expected_alpha {
            return Err(TgaReadError::InvalidAlphaBitSize);
        }
        Ok(())
    }
}

impl TgaFooter {
    /// Parse a footer from the last [`FOOTER_SIZE`] bytes, if the signature matches
    pub fn parse(tail: &[u8]) -> Option<Self> {
        if tail.len() != FOOTER_SIZE || tail[8..] != FOOTER_SIGNATURE {
            return None;
        }
        let mut cursor = Cursor::new(tail);
        let extension_offset = cursor.read_u32::<LittleEndian>().ok()?;
        let developer_offset = cursor.read_u32::<LittleEndian>().ok()?;
        Some(Self {
            extension_offset,
            developer_offset,
            signature: FOOTER_SIGNATURE,
        })
    }
}

impl Tga {
    /// Parse a whole TGA file held in memory
    pub fn read(data: &[u8]) -> TgaReadResult<Self> {
        if data.len() < HEADER_SIZE {
            return Err(TgaReadError::InvalidParams);
        }

        let mut cursor = Cursor::new(data);
        let header = TgaHeader::parse(&mut cursor).map_err(|_| TgaReadError::InvalidParams)?;
        header.validate_for_read()?;

        let id_start = HEADER_SIZE;
        let id_end = id_start + usize::from(header.id_length);
        let id_bytes = data.get(id_start..id_end).ok_or(TgaReadError::InvalidParams)?;
        let mut id = Vec::new();
        id.try_reserve_exact(id_bytes.len())
            .map_err(|_| TgaReadError::IdAllocFailed)?;
        id.extend_from_slice(id_bytes);

        let data_end = id_end + header.data_size();
        let pixel_bytes = data.get(id_end..data_end).ok_or(TgaReadError::InvalidParams)?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(pixel_bytes.len())
            .map_err(|_| TgaReadError::DataAllocFailed)?;
        pixels.extend_from_slice(pixel_bytes);

        let footer = (data.len() >= data_end + FOOTER_SIZE)
            .then(|| TgaFooter::parse(&data[data.len() - FOOTER_SIZE..]))
            .flatten();

        trace!(
            width = header.width,
            height = header.height,
            depth = header.pixel_depth,
            new_format = footer.is_some(),
            "TGA header"
        );

        Ok(Self { header, id, data: pixels, footer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(image_type: u8, depth: u8, descriptor: u8) -> Vec<u8> {
        let mut out = vec![0, 0, image_type, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.push(depth);
        out.push(descriptor);
        out
    }

    #[test]
    fn test_short_header() {
        assert_eq!(Tga::read(&[0; 17]), Err(TgaReadError::InvalidParams));
    }

    #[test]
    fn test_rejects_rle() {
        let data = header(image_type::RLE_TRUE_COLOR, 32, 8);
        assert_eq!(Tga::read(&data), Err(TgaReadError::NotAColorTga));
    }

    #[test]
    fn test_rejects_color_map() {
        let mut data = header(image_type::TRUE_COLOR, 32, 8);
        data[1] = 1;
        assert_eq!(Tga::read(&data), Err(TgaReadError::ColorMapPresent));
    }

    #[test]
    fn test_alpha_bits_must_match_depth() {
        let data = header(image_type::TRUE_COLOR, 32, 0);
        assert_eq!(Tga::read(&data), Err(TgaReadError::InvalidAlphaBitSize));
        let data = header(image_type::TRUE_COLOR, 16, 0);
        assert_eq!(Tga::read(&data), Err(TgaReadError::InvalidPixelDepth));
    }

    #[test]
    fn test_truncated_pixels() {
        let mut data = header(image_type::TRUE_COLOR, 24, 0);
        data.extend_from_slice(&[1, 2, 3]);
        assert_eq!(Tga::read(&data), Err(TgaReadError::InvalidParams));
    }

    #[test]
    fn test_reads_24_bit_without_footer() {
        let mut data = header(image_type::TRUE_COLOR, 24, 0);
        data.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
        let tga = Tga::read(&data).unwrap();
        assert!(!tga.is_new_format());
        assert_eq!(tga.data.len(), 6);
    }
}
