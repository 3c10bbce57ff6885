//! Packed GX pixel conversions

use txtrtool_formats::PaletteFormat;

use crate::options::AverageType;

/// One RGBA8 pixel
pub type Rgba = [u8; 4];

/// Widen an `bits`-bit channel to 8 bits by replicating its high bits
pub fn expand(value: u16, bits: u32) -> u8 {
    let v = u32::from(value) & ((1 << bits) - 1);
    let mut out = v << (8 - bits);
    let mut shift = bits;
    while shift < 8 {
        out |= out >> shift;
        shift *= 2;
    }
    (out & 0xFF) as u8
}

/// Narrow an 8-bit channel to `bits` bits with rounding
pub fn quantize(value: u8, bits: u32) -> u16 {
    let max = (1u32 << bits) - 1;
    ((u32::from(value) * max + 127) / 255) as u16
}

pub fn decode_rgb565(v: u16) -> Rgba {
    [expand(v >> 11, 5), expand(v >> 5, 6), expand(v, 5), 0xFF]
}

pub fn encode_rgb565(px: Rgba) -> u16 {
    (quantize(px[0], 5) << 11) | (quantize(px[1], 6) << 5) | quantize(px[2], 5)
}

/// Top bit set: opaque RGB555. Clear: A3 RGB444.
pub fn decode_rgb5a3(v: u16) -> Rgba {
    if v & 0x8000 != 0 {
        [expand(v >> 10, 5), expand(v >> 5, 5), expand(v, 5), 0xFF]
    } else {
        [expand(v >> 8, 4), expand(v >> 4, 4), expand(v, 4), expand(v >> 12, 3)]
    }
}

pub fn encode_rgb5a3(px: Rgba) -> u16 {
    let alpha = quantize(px[3], 3);
    if alpha == 7 {
        0x8000 | (quantize(px[0], 5) << 10) | (quantize(px[1], 5) << 5) | quantize(px[2], 5)
    } else {
        (alpha << 12) | (quantize(px[0], 4) << 8) | (quantize(px[1], 4) << 4) | quantize(px[2], 4)
    }
}

/// High byte alpha, low byte intensity
pub fn decode_ia8(v: u16) -> Rgba {
    let i = (v & 0xFF) as u8;
    [i, i, i, (v >> 8) as u8]
}

pub fn encode_ia8(intensity: u8, alpha: u8) -> u16 {
    (u16::from(alpha) << 8) | u16::from(intensity)
}

pub fn decode_palette_entry(format: PaletteFormat, v: u16) -> Rgba {
    match format {
        PaletteFormat::IA8 => decode_ia8(v),
        PaletteFormat::R5G6B5 => decode_rgb565(v),
        PaletteFormat::RGB5A3 => decode_rgb5a3(v),
    }
}

pub fn encode_palette_entry(format: PaletteFormat, px: Rgba, average: AverageType) -> u16 {
    match format {
        PaletteFormat::IA8 => encode_ia8(greyscale(px, average), px[3]),
        PaletteFormat::R5G6B5 => encode_rgb565(px),
        PaletteFormat::RGB5A3 => encode_rgb5a3(px),
    }
}

/// Intensity of `px` under the given formula
pub fn greyscale(px: Rgba, average: AverageType) -> u8 {
    let [r, g, b, _] = px.map(f32::from);
    let value = match average {
        AverageType::Average => (r + g + b) / 3.0,
        AverageType::Squared => ((r * r + g * g + b * b) / 3.0).sqrt(),
        AverageType::W3c => 0.299 * r + 0.587 * g + 0.114 * b,
        AverageType::Srgb => 0.2126 * r + 0.7152 * g + 0.0722 * b,
    };
    value.round().clamp(0.0, 255.0) as u8
}
