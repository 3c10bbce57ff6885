//! `decode`: TXTR to one or more TGA files

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use txtrtool_codec::{DecodeOptions, RgbaImage};
use txtrtool_core::{CancelToken, Failure, TaskResult};
use txtrtool_formats::Tga;

use crate::backend::Codec;
use crate::console::Console;
use crate::fileio::{ensure_directory, read_whole_file, write_whole_file, DirectoryRole};
use crate::mipmap::{MipmapNames, OutputNames};
use crate::options::DecodeSettings;
use crate::translate::report;

/// Image id stamped into every written TGA
pub fn image_id() -> String {
    format!("txtrtool {}", env!("CARGO_PKG_VERSION"))
}

pub fn run(
    console: &mut Console<'_>,
    codec: &dyn Codec,
    cancel: &CancelToken,
    settings: &DecodeSettings,
    input: &Path,
    output: &Path,
) -> TaskResult {
    let mut names = output_names(console, settings, input, output)?;

    console.info(format_args!("Reading input TXTR \"{}\"...", input.display()));
    let data = read_whole_file(console, input)?;
    let txtr = codec.read_txtr(&data).map_err(|e| report(console, e))?;
    drop(data);

    console.info("Decoding TXTR...");
    let options = DecodeOptions { flip_x: false, flip_y: true, all_mips: settings.all_mipmaps };
    let mipmaps = codec
        .decode_txtr(&txtr, &options, cancel)
        .map_err(|e| report(console, e))?;
    info!(format = ?txtr.header.format, levels = mipmaps.len(), "decoded texture");

    let id = image_id();
    for (index, image) in mipmaps.iter().enumerate() {
        if cancel.is_cancelled() {
            console.error("Interrupted");
            return Err(Failure::Program);
        }

        let path = names.name(index);
        console.info(format_args!("Writing mipmap {} to output TGA \"{}\"", index + 1, path.display()));
        let bytes = encode_tga(console, codec, image, &id)?;
        write_whole_file(console, &path, &bytes, settings.policy)?;
        debug!(level = index, path = %path.display(), "wrote mipmap");
    }

    Ok(())
}

/// Check the output location before any input is read
fn output_names(
    console: &mut Console<'_>,
    settings: &DecodeSettings,
    input: &Path,
    output: &Path,
) -> TaskResult<OutputNames> {
    if !settings.all_mipmaps {
        if fs::metadata(output).is_ok_and(|m| m.is_dir()) {
            console.error(format_args!("Output file \"{}\" must be a file", output.display()));
            return Err(Failure::Program);
        }
        return Ok(OutputNames::Single(PathBuf::from(output)));
    }

    ensure_directory(console, output, DirectoryRole::Output, settings.policy)?;
    match MipmapNames::new(input, output, &settings.prefix, &settings.suffix) {
        Some(names) => Ok(OutputNames::Sequence(names)),
        None => {
            console.error(format_args!(
                "Failed to get file name from input file path \"{}\"",
                input.display()
            ));
            Err(Failure::Memory)
        }
    }
}

fn encode_tga(
    console: &mut Console<'_>,
    codec: &dyn Codec,
    image: &RgbaImage,
    id: &str,
) -> TaskResult<Vec<u8>> {
    let (Ok(width), Ok(height)) = (u16::try_from(image.width()), u16::try_from(image.height())) else {
        console.error(format_args!("Mipmap of {}x{} is too large for TGA", image.width(), image.height()));
        return Err(Failure::Program);
    };
    let tga = Tga::from_rgba(width, height, image.as_raw(), id, true);
    codec.write_tga(&tga).map_err(|e| report(console, e))
}
