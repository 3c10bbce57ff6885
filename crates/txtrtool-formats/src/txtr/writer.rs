//! TXTR serialization

use tracing::trace;
use txtrtool_core::CancelToken;

use super::{
    Txtr, TxtrWriteError, TxtrWriteResult, HEADER_SIZE, MAX_DIMENSION, MAX_MIPMAPS,
    PALETTE_HEADER_SIZE,
};

impl Txtr {
    /// Check that the header, palette and mipmaps agree with each other
    pub fn validate(&self) -> TxtrWriteResult<()> {
        let header = &self.header;
        if header.width == 0 || header.width > MAX_DIMENSION {
            return Err(TxtrWriteError::InvalidTextureWidth);
        }
        if header.height == 0 || header.height > MAX_DIMENSION {
            return Err(TxtrWriteError::InvalidTextureHeight);
        }
        if header.mip_count == 0 || header.mip_count > MAX_MIPMAPS {
            return Err(TxtrWriteError::InvalidMipCount);
        }

        match (&self.palette, header.format.palette_capacity()) {
            (Some(palette), Some(capacity)) => {
                if palette.width == 0 {
                    return Err(TxtrWriteError::InvalidPaletteWidth);
                }
                if palette.height == 0 {
                    return Err(TxtrWriteError::InvalidPaletteHeight);
                }
                if palette.entries.len() != palette.declared_len() || palette.entries.len() > capacity {
                    return Err(TxtrWriteError::InvalidPaletteSize);
                }
            }
            (None, None) => {}
            _ => return Err(TxtrWriteError::InvalidTexturePalette),
        }

        if self.mipmaps.len() != header.mip_count as usize {
            return Err(TxtrWriteError::InvalidTextureMipmaps);
        }
        for (level, mip) in (0u32..).zip(&self.mipmaps) {
            let (width, height, size) = self.level_layout(level);
            if mip.width != width || mip.height != height || mip.data.len() != size {
                return Err(TxtrWriteError::InvalidTextureMipmaps);
            }
        }

        Ok(())
    }

    /// Serialize to the on-disk layout
    pub fn write(&self, cancel: &CancelToken) -> TxtrWriteResult<Vec<u8>> {
        self.validate()?;

        let palette_size = self
            .palette
            .as_ref()
            .map_or(0, |p| PALETTE_HEADER_SIZE + p.entries.len() * 2);
        let total = self
            .mipmaps
            .iter()
            .try_fold(HEADER_SIZE + palette_size, |acc, mip| acc.checked_add(mip.data.len()))
            .ok_or(TxtrWriteError::InvalidParams)?;

        let mut out = Vec::new();
        out.try_reserve_exact(total)
            .map_err(|_| TxtrWriteError::MipmapsAllocFailed)?;

        let header = &self.header;
        out.extend_from_slice(&(header.format as u32).to_be_bytes());
        out.extend_from_slice(&header.width.to_be_bytes());
        out.extend_from_slice(&header.height.to_be_bytes());
        out.extend_from_slice(&header.mip_count.to_be_bytes());

        if let Some(palette) = &self.palette {
            out.extend_from_slice(&(palette.format as u32).to_be_bytes());
            out.extend_from_slice(&palette.width.to_be_bytes());
            out.extend_from_slice(&palette.height.to_be_bytes());
            for entry in &palette.entries {
                out.extend_from_slice(&entry.to_be_bytes());
            }
        }

        for mip in &self.mipmaps {
            if cancel.is_cancelled() {
                return Err(TxtrWriteError::Interrupted);
            }
            out.extend_from_slice(&mip.data);
        }

        trace!(bytes = out.len(), "serialized TXTR");
        Ok(out)
    }
}
