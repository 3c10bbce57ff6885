//! TXTR pixel and palette formats and their storage geometry

/// GX texture pixel format as stored in a TXTR header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TextureFormat {
    /// 4-bit intensity
    I4 = 0,
    /// 8-bit intensity
    I8 = 1,
    /// 4-bit intensity, 4-bit alpha
    IA4 = 2,
    /// 8-bit intensity, 8-bit alpha
    IA8 = 3,
    /// 4-bit palette index
    CI4 = 4,
    /// 8-bit palette index
    CI8 = 5,
    /// 14-bit palette index in 16-bit storage
    CI14X2 = 6,
    /// 16-bit RGB 5:6:5
    R5G6B5 = 7,
    /// 16-bit RGB555 or ARGB3444
    RGB5A3 = 8,
    /// 32-bit RGBA, split into AR and GB tiles
    RGBA8 = 9,
    /// DXT1-style block compression
    CMP = 10,
}

impl TextureFormat {
    /// Every format, in on-disk code order
    pub const ALL: &'static [TextureFormat] = &[
        TextureFormat::I4,
        TextureFormat::I8,
        TextureFormat::IA4,
        TextureFormat::IA8,
        TextureFormat::CI4,
        TextureFormat::CI8,
        TextureFormat::CI14X2,
        TextureFormat::R5G6B5,
        TextureFormat::RGB5A3,
        TextureFormat::RGBA8,
        TextureFormat::CMP,
    ];

    /// Create from the on-disk code
    pub fn from_u32(value: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| *f as u32 == value)
    }

    /// Whether pixels are palette indices
    pub fn is_indexed(self) -> bool {
        matches!(self, TextureFormat::CI4 | TextureFormat::CI8 | TextureFormat::CI14X2)
    }

    /// Storage bits per pixel
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            TextureFormat::I4 | TextureFormat::CI4 | TextureFormat::CMP => 4,
            TextureFormat::I8 | TextureFormat::IA4 | TextureFormat::CI8 => 8,
            TextureFormat::IA8
            | TextureFormat::CI14X2
            | TextureFormat::R5G6B5
            | TextureFormat::RGB5A3 => 16,
            TextureFormat::RGBA8 => 32,
        }
    }

    /// Tile width and height in pixels
    pub fn block_dimensions(self) -> (u32, u32) {
        match self.bits_per_pixel() {
            4 => (8, 8),
            8 => (8, 4),
            _ => (4, 4),
        }
    }

    /// Bytes per tile
    pub fn block_size(self) -> usize {
        let (bw, bh) = self.block_dimensions();
        (bw * bh * self.bits_per_pixel() / 8) as usize
    }

    /// Block-padded byte size of one image of the given dimensions
    pub fn data_size(self, width: u32, height: u32) -> usize {
        let (bw, bh) = self.block_dimensions();
        let blocks_x = width.div_ceil(bw) as usize;
        let blocks_y = height.div_ceil(bh) as usize;
        blocks_x * blocks_y * self.block_size()
    }

    /// Maximum number of palette entries an indexed format can address
    pub fn palette_capacity(self) -> Option<usize> {
        match self {
            TextureFormat::CI4 => Some(16),
            TextureFormat::CI8 => Some(256),
            TextureFormat::CI14X2 => Some(16384),
            _ => None,
        }
    }

    /// Palette width and height used when encoding
    pub fn palette_dimensions(self) -> Option<(u16, u16)> {
        match self {
            TextureFormat::CI4 => Some((1, 16)),
            TextureFormat::CI8 => Some((256, 1)),
            TextureFormat::CI14X2 => Some((256, 64)),
            _ => None,
        }
    }
}

/// Palette entry format for indexed textures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PaletteFormat {
    /// 8-bit intensity, 8-bit alpha
    IA8 = 0,
    /// 16-bit RGB 5:6:5
    R5G6B5 = 1,
    /// 16-bit RGB555 or ARGB3444
    RGB5A3 = 2,
}

impl PaletteFormat {
    /// Every palette format, in on-disk code order
    pub const ALL: &'static [PaletteFormat] =
        &[PaletteFormat::IA8, PaletteFormat::R5G6B5, PaletteFormat::RGB5A3];

    /// Create from the on-disk code
    pub fn from_u32(value: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| *f as u32 == value)
    }
}

/// Dimensions of mip level `level` of a `width` x `height` texture
pub fn mip_dimensions(width: u16, height: u16, level: u32) -> (u16, u16) {
    let shrink = |v: u16| v.checked_shr(level).unwrap_or(0).max(1);
    (shrink(width), shrink(height))
}
