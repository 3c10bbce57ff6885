//! `print`: TXTR header report

use std::fmt;
use std::path::Path;

use serde::Serialize;
use txtrtool_core::{Failure, TaskResult};
use txtrtool_formats::Txtr;

use crate::backend::Codec;
use crate::console::Console;
use crate::fileio::read_whole_file;
use crate::options::PrintSettings;
use crate::registry::{PALETTE_FORMATS, TEXTURE_FORMATS};
use crate::translate::report;

/// Header fields of a texture, in report order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureReport {
    pub texture_format: &'static str,
    pub texture_width: u16,
    pub texture_height: u16,
    pub texture_mipmap_count: u32,
    /// Empty when the texture is not indexed
    pub palette_format: &'static str,
    pub palette_width: u16,
    pub palette_height: u16,
}

impl TextureReport {
    pub fn new(txtr: &Txtr) -> Self {
        let palette = txtr.palette.as_ref().filter(|_| txtr.is_indexed());
        Self {
            texture_format: TEXTURE_FORMATS.name(txtr.header.format),
            texture_width: txtr.header.width,
            texture_height: txtr.header.height,
            texture_mipmap_count: txtr.header.mip_count,
            palette_format: palette.map_or("", |p| PALETTE_FORMATS.name(p.format)),
            palette_width: palette.map_or(0, |p| p.width),
            palette_height: palette.map_or(0, |p| p.height),
        }
    }

    /// Pretty-printed JSON with four-space indentation
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only emits UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl fmt::Display for TextureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Texture format: {}", self.texture_format)?;
        writeln!(f, "Texture dimensions: {}x{}", self.texture_width, self.texture_height)?;
        writeln!(f, "Texture mipmaps: {}", self.texture_mipmap_count)?;
        if !self.palette_format.is_empty() {
            writeln!(f, "Palette format: {}", self.palette_format)?;
            writeln!(f, "Palette dimensions: {}x{}", self.palette_width, self.palette_height)?;
        }
        Ok(())
    }
}

pub fn run(
    console: &mut Console<'_>,
    codec: &dyn Codec,
    settings: PrintSettings,
    input: &Path,
) -> TaskResult {
    console.note(format_args!("Reading input TXTR \"{}\"...", input.display()));
    let data = read_whole_file(console, input)?;
    let txtr = codec.read_txtr(&data).map_err(|e| report(console, e))?;

    let summary = TextureReport::new(&txtr);
    if settings.json {
        let json = summary.to_json().map_err(|e| {
            console.error(format_args!("Failed to serialize report: {e}"));
            Failure::Program
        })?;
        console.info(json);
    } else {
        console.print(summary);
    }
    Ok(())
}
