//! TGA serialization

use super::{image_type, Tga, TgaWriteError, TgaWriteResult, FOOTER_SIGNATURE, FOOTER_SIZE, HEADER_SIZE};

impl Tga {
    /// Check the image against what the writer can emit
    pub fn validate(&self) -> TgaWriteResult<()> {
        let header = &self.header;
        if header.color_map_type != 0 {
            return Err(TgaWriteError::ColorMapPresent);
        }
        if header.image_type != image_type::TRUE_COLOR {
            return Err(TgaWriteError::NotAColorTga);
        }
        if header.x_origin != 0 {
            return Err(TgaWriteError::InvalidXOrigin);
        }
        if header.y_origin != 0 {
            return Err(TgaWriteError::InvalidYOrigin);
        }
        if header.width == 0 {
            return Err(TgaWriteError::InvalidWidth);
        }
        if header.height == 0 {
            return Err(TgaWriteError::InvalidHeight);
        }
        let expected_alpha = match header.pixel_depth {
            24 => 0,
            32 => 8,
            _ => return Err(TgaWriteError::InvalidPixelDepth),
        };
        if header.alpha_bits() != expected_alpha {
            return Err(TgaWriteError::InvalidAlphaBitSize);
        }
        if self.id.len() != usize::from(header.id_length) {
            return Err(TgaWriteError::InvalidId);
        }
        if self.data.len() != header.data_size() {
            return Err(TgaWriteError::InvalidData);
        }
        if let Some(footer) = &self.footer {
            if footer.signature != FOOTER_SIGNATURE {
                return Err(TgaWriteError::InvalidSignature);
            }
            // No extension or developer area is ever written
            if footer.extension_offset != 0 || footer.developer_offset != 0 {
                return Err(TgaWriteError::InvalidParams);
            }
        }
        Ok(())
    }

    /// Serialize to the on-disk layout
    pub fn write(&self) -> TgaWriteResult<Vec<u8>> {
        self.validate()?;

        let footer_size = if self.footer.is_some() { FOOTER_SIZE } else { 0 };
        let total = HEADER_SIZE + self.id.len() + self.data.len() + footer_size;
        let mut out = Vec::new();
        out.try_reserve_exact(total)
            .map_err(|_| TgaWriteError::DataAllocFailed)?;

        let h = &self.header;
        out.extend_from_slice(&[h.id_length, h.color_map_type, h.image_type]);
        out.extend_from_slice(&h.color_map_first_entry.to_le_bytes());
        out.extend_from_slice(&h.color_map_length.to_le_bytes());
        out.push(h.color_map_entry_size);
        out.extend_from_slice(&h.x_origin.to_le_bytes());
        out.extend_from_slice(&h.y_origin.to_le_bytes());
        out.extend_from_slice(&h.width.to_le_bytes());
        out.extend_from_slice(&h.height.to_le_bytes());
        out.extend_from_slice(&[h.pixel_depth, h.image_descriptor]);
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.data);

        if let Some(footer) = &self.footer {
            out.extend_from_slice(&footer.extension_offset.to_le_bytes());
            out.extend_from_slice(&footer.developer_offset.to_le_bytes());
            out.extend_from_slice(&footer.signature);
        }

        Ok(out)
    }
}
