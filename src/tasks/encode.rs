//! `encode`: TGA to TXTR

use std::fs;
use std::path::Path;

use tracing::info;
use txtrtool_codec::EncodeOptions;
use txtrtool_core::{CancelToken, Failure, TaskResult};

use crate::backend::{Codec, EncodeRequest};
use crate::console::Console;
use crate::fileio::{ensure_directory, read_whole_file, write_whole_file, DirectoryRole};
use crate::options::EncodeSettings;
use crate::translate::report;

pub fn run(
    console: &mut Console<'_>,
    codec: &dyn Codec,
    cancel: &CancelToken,
    settings: &EncodeSettings,
    input: &Path,
    output: &Path,
) -> TaskResult {
    if fs::metadata(input).is_ok_and(|m| m.is_dir()) {
        console.error(format_args!("Input file \"{}\" must be a file", input.display()));
        return Err(Failure::Program);
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            ensure_directory(console, parent, DirectoryRole::OutputParent, settings.policy)?;
        }
    }

    console.info(format_args!("Reading input TGA \"{}\"...", input.display()));
    let data = read_whole_file(console, input)?;
    let tga = codec.read_tga(&data).map_err(|e| report(console, e))?;
    drop(data);
    if tga.is_new_format() {
        console.warn(format_args!(
            "Input file \"{}\" is of the \"New TGA Format\". Information in the file's footer will be \
             ignored. This may produce incorrect results.",
            input.display()
        ));
    }
    let pixels = tga.to_rgba().map_err(|e| report(console, e))?;

    console.info("Encoding TXTR...");
    let request = EncodeRequest {
        format: settings.texture_format,
        palette_format: settings.palette_format,
        width: tga.header.width,
        height: tga.header.height,
        pixels: &pixels,
    };
    let options = EncodeOptions {
        flip_x: false,
        flip_y: false,
        mip_limit: settings.mip_limit,
        width_limit: settings.width_limit,
        height_limit: settings.height_limit,
        average: settings.average,
        squish_flags: settings.squish_flags,
        squish_metric: settings.squish_metric.clone(),
        edge: settings.edge,
        filter: settings.filter,
        dither: settings.dither,
    };
    let txtr = codec
        .encode_txtr(request, &options, cancel)
        .map_err(|e| report(console, e))?;
    drop(pixels);

    let count = txtr.mipmaps.len();
    info!(format = ?txtr.header.format, levels = count, "encoded texture");
    console.info(format_args!(
        "Writing {count} mipmap{} to output TXTR \"{}\"...",
        if count == 1 { "" } else { "s" },
        output.display()
    ));
    let bytes = codec.write_txtr(&txtr, cancel).map_err(|e| report(console, e))?;
    write_whole_file(console, output, &bytes, settings.policy)
}
