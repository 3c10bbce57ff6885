//! TXTR parsing

use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt};
use tracing::trace;

use super::{
    mip_dimensions, PaletteFormat, RawMipmap, TextureFormat, Txtr, TxtrHeader, TxtrPalette,
    TxtrReadError, TxtrReadResult, HEADER_SIZE, MAX_DIMENSION, MAX_MIPMAPS,
};

impl TxtrHeader {
    /// Parse and validate the texture header
    pub fn parse<R: Read>(reader: &mut R) -> TxtrReadResult<Self> {
        let raw_format = reader.read_u32::<BigEndian>().map_err(|_| TxtrReadError::InvalidParams)?;
        let width = reader.read_u16::<BigEndian>().map_err(|_| TxtrReadError::InvalidParams)?;
        let height = reader.read_u16::<BigEndian>().map_err(|_| TxtrReadError::InvalidParams)?;
        let mip_count = reader.read_u32::<BigEndian>().map_err(|_| TxtrReadError::InvalidParams)?;

        let format = TextureFormat::from_u32(raw_format).ok_or(TxtrReadError::InvalidTextureFormat)?;
        if width == 0 || width > MAX_DIMENSION {
            return Err(TxtrReadError::InvalidTextureWidth);
        }
        if height == 0 || height > MAX_DIMENSION {
            return Err(TxtrReadError::InvalidTextureHeight);
        }
        if mip_count == 0 || mip_count > MAX_MIPMAPS {
            return Err(TxtrReadError::InvalidMipCount);
        }

        Ok(Self { format, width, height, mip_count })
    }
}

impl TxtrPalette {
    /// Parse the palette block that follows the header of an indexed texture
    pub fn parse<R: Read>(reader: &mut R, texture_format: TextureFormat) -> TxtrReadResult<Self> {
        let raw_format = reader.read_u32::<BigEndian>().map_err(|_| TxtrReadError::InvalidPaletteFormat)?;
        let format = PaletteFormat::from_u32(raw_format).ok_or(TxtrReadError::InvalidPaletteFormat)?;

        let width = reader.read_u16::<BigEndian>().map_err(|_| TxtrReadError::InvalidPaletteWidth)?;
        if width == 0 {
            return Err(TxtrReadError::InvalidPaletteWidth);
        }
        let height = reader.read_u16::<BigEndian>().map_err(|_| TxtrReadError::InvalidPaletteHeight)?;
        if height == 0 {
            return Err(TxtrReadError::InvalidPaletteHeight);
        }

        let count = usize::from(width) * usize::from(height);
        let capacity = texture_format.palette_capacity().unwrap_or(0);
        if count > capacity {
            return Err(TxtrReadError::InvalidPaletteSize);
        }

        let mut entries = Vec::new();
        entries
            .try_reserve_exact(count)
            .map_err(|_| TxtrReadError::PaletteAllocFailed)?;
        for _ in 0..count {
            let entry = reader.read_u16::<BigEndian>().map_err(|_| TxtrReadError::InvalidPaletteSize)?;
            entries.push(entry);
        }

        Ok(Self { format, width, height, entries })
    }
}

impl Txtr {
    /// Parse a whole TXTR file held in memory
    pub fn read(data: &[u8]) -> TxtrReadResult<Self> {
        if data.len() < HEADER_SIZE {
            return Err(TxtrReadError::InvalidParams);
        }

        let mut cursor = Cursor::new(data);
        let header = TxtrHeader::parse(&mut cursor)?;
        trace!(format = ?header.format, width = header.width, height = header.height, mips = header.mip_count, "TXTR header");

        let palette = if header.format.is_indexed() {
            Some(TxtrPalette::parse(&mut cursor, header.format)?)
        } else {
            None
        };

        let mut offset = usize::try_from(cursor.position()).map_err(|_| TxtrReadError::InvalidParams)?;
        let mut mipmaps = Vec::new();
        mipmaps
            .try_reserve_exact(header.mip_count as usize)
            .map_err(|_| TxtrReadError::MipmapsAllocFailed)?;

        for level in 0..header.mip_count {
            let (width, height) = mip_dimensions(header.width, header.height, level);
            let size = header.format.data_size(u32::from(width), u32::from(height));
            let chunk = data
                .get(offset..offset + size)
                .ok_or(TxtrReadError::InvalidMipCount)?;

            let mut bytes = Vec::new();
            bytes
                .try_reserve_exact(size)
                .map_err(|_| TxtrReadError::MipmapsAllocFailed)?;
            bytes.extend_from_slice(chunk);

            mipmaps.push(RawMipmap { width, height, data: bytes });
            offset += size;
        }

        if offset < data.len() {
            trace!(trailing = data.len() - offset, "ignoring trailing TXTR bytes");
        }

        Ok(Self { header, palette, mipmaps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(format: u32, width: u16, height: u16, mips: u32) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&format.to_be_bytes());
        out.extend_from_slice(&width.to_be_bytes());
        out.extend_from_slice(&height.to_be_bytes());
        out.extend_from_slice(&mips.to_be_bytes());
        out
    }

    #[test]
    fn test_short_buffer_is_invalid_params() {
        assert_eq!(Txtr::read(&[0, 0, 0]), Err(TxtrReadError::InvalidParams));
    }

    #[test]
    fn test_header_validation_order() {
        assert_eq!(Txtr::read(&header_bytes(99, 8, 8, 1)), Err(TxtrReadError::InvalidTextureFormat));
        assert_eq!(Txtr::read(&header_bytes(1, 0, 8, 1)), Err(TxtrReadError::InvalidTextureWidth));
        assert_eq!(Txtr::read(&header_bytes(1, 8, 2048, 1)), Err(TxtrReadError::InvalidTextureHeight));
        assert_eq!(Txtr::read(&header_bytes(1, 8, 8, 12)), Err(TxtrReadError::InvalidMipCount));
    }

    #[test]
    fn test_truncated_mip_data() {
        let mut data = header_bytes(1, 8, 4, 1);
        data.extend_from_slice(&[0u8; 16]);
        assert_eq!(Txtr::read(&data), Err(TxtrReadError::InvalidMipCount));
    }

    #[test]
    fn test_palette_over_capacity() {
        let mut data = header_bytes(4, 8, 8, 1);
        data.extend_from_slice(&2u32.to_be_bytes());
        data.extend_from_slice(&1u16.to_be_bytes());
        data.extend_from_slice(&17u16.to_be_bytes());
        assert_eq!(Txtr::read(&data), Err(TxtrReadError::InvalidPaletteSize));
    }

    #[test]
    fn test_reads_single_level() {
        let mut data = header_bytes(1, 8, 4, 1);
        data.extend((0..32u8).collect::<Vec<_>>());
        let txtr = Txtr::read(&data).unwrap();
        assert_eq!(txtr.header.format, TextureFormat::I8);
        assert!(txtr.palette.is_none());
        assert_eq!(txtr.mipmaps.len(), 1);
        assert_eq!(txtr.mipmaps[0].data[31], 31);
    }
}
