//! End-to-end tests for the txtrtool command layer
//!
//! These drive [`txtrtool::run`] with captured output streams, a scripted
//! prompter and real files in temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use txtrtool::{run, CancelToken, Codec, Console, EncodeRequest, NativeCodec, ScriptedPrompter, Status};
use txtrtool_codec::{DecodeError, DecodeOptions, EncodeError, EncodeOptions, RgbaImage};
use txtrtool_formats::{
    PaletteFormat, TextureFormat, Tga, TgaReadError, TgaWriteError, Txtr, TxtrReadError, TxtrWriteError,
};

struct Outcome {
    status: Status,
    out: String,
    err: String,
    asked: usize,
}

fn run_with(codec: &dyn Codec, args: &[&str], answers: &[&str], cancel: &CancelToken) -> Outcome {
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let mut prompter = ScriptedPrompter::new(answers.iter().copied());
    let mut console = Console::new(&mut out, &mut err, &mut prompter);
    let mut argv = vec!["txtrtool"];
    argv.extend_from_slice(args);
    let status = run(argv, &mut console, codec, cancel);
    drop(console);
    Outcome {
        status,
        out: String::from_utf8_lossy(&out).into_owned(),
        err: String::from_utf8_lossy(&err).into_owned(),
        asked: prompter.asked(),
    }
}

fn txtrtool(args: &[&str], answers: &[&str]) -> Outcome {
    run_with(&NativeCodec, args, answers, &CancelToken::new())
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn gradient(width: u16, height: u16) -> Vec<u8> {
    let mut pixels = Vec::new();
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x * 7) as u8, (y * 5) as u8, (x ^ y) as u8, 0xFF - (x as u8)]);
        }
    }
    pixels
}

/// Write an RGBA8 texture with `mips` levels to `path`
fn write_txtr(path: &Path, width: u16, height: u16, mips: u8) {
    let options = EncodeOptions { mip_limit: mips, ..Default::default() };
    let cancel = CancelToken::new();
    let txtr = txtrtool_codec::encode(
        TextureFormat::RGBA8,
        PaletteFormat::RGB5A3,
        width,
        height,
        &gradient(width, height),
        &options,
        &cancel,
    )
    .unwrap();
    fs::write(path, txtr.write(&cancel).unwrap()).unwrap();
}

/// Write a top-down RGBA image as a bottom-left origin TGA
fn write_tga(path: &Path, width: u16, height: u16, pixels: &[u8], footer: bool) {
    let row = usize::from(width) * 4;
    let bottom_up: Vec<u8> = pixels.chunks_exact(row).rev().flatten().copied().collect();
    let tga = Tga::from_rgba(width, height, &bottom_up, "test", footer);
    fs::write(path, tga.write().unwrap()).unwrap();
}

mod print_tests {
    use super::*;

    #[test]
    fn test_print_json_without_palette() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tex.txtr");
        write_txtr(&input, 64, 64, 1);

        let result = txtrtool(&["print", "--json", path_str(&input)], &[]);
        assert_eq!(result.status, Status::Success);
        assert!(result.err.starts_with("Reading input TXTR"));

        let json: serde_json::Value = serde_json::from_str(&result.out).unwrap();
        assert_eq!(json["texture_format"], "RGBA8");
        assert_eq!(json["texture_width"], 64);
        assert_eq!(json["texture_mipmap_count"], 1);
        assert_eq!(json["palette_format"], "");
        assert_eq!(json["palette_height"], 0);
    }

    #[test]
    fn test_print_text_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tex.txtr");
        write_txtr(&input, 32, 16, 2);

        let result = txtrtool(&["print", "-e", path_str(&input)], &[]);
        assert_eq!(result.status, Status::Success);
        assert!(result.err.is_empty());
        assert_eq!(result.out, "Texture format: RGBA8\nTexture dimensions: 32x16\nTexture mipmaps: 2\n");
    }

    #[test]
    fn test_print_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.txtr");
        fs::write(&input, [0xFF; 16]).unwrap();

        let result = txtrtool(&["print", path_str(&input)], &[]);
        assert_eq!(result.status, Status::FormatError);
        assert!(result.err.contains("ERROR: Failed to read TXTR data: Invalid texture format"));
    }

    #[test]
    fn test_print_empty_and_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.txtr");
        fs::write(&empty, b"").unwrap();
        assert_eq!(txtrtool(&["print", path_str(&empty)], &[]).status, Status::ArgumentError);

        let missing = dir.path().join("missing.txtr");
        assert_eq!(txtrtool(&["print", path_str(&missing)], &[]).status, Status::IoError);
    }
}

mod decode_tests {
    use super::*;

    #[test]
    fn test_decode_all_mipmaps_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rock.txtr");
        write_txtr(&input, 16, 8, 3);
        let out_dir = dir.path().join("mips");

        let result = txtrtool(&["decode", "--mipmaps", path_str(&input), path_str(&out_dir)], &["y\n"]);
        assert_eq!(result.status, Status::Success, "{}", result.err);
        assert_eq!(result.asked, 1);
        assert!(result.out.contains("does not exist. Create it?"));

        let mut names: Vec<String> = fs::read_dir(&out_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["rock00.tga", "rock01.tga", "rock02.tga"]);

        let last = Tga::read(&fs::read(out_dir.join("rock02.tga")).unwrap()).unwrap();
        assert_eq!((last.header.width, last.header.height), (4, 2));
        assert_eq!(last.id, format!("txtrtool {}", env!("CARGO_PKG_VERSION")).into_bytes());
        assert!(last.is_new_format());
    }

    #[test]
    fn test_decode_existing_directory_does_not_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rock.txtr");
        write_txtr(&input, 8, 8, 3);

        let result = txtrtool(
            &["decode", "-m", "-b", "pre_", "-a", "_mip", path_str(&input), path_str(dir.path())],
            &[],
        );
        assert_eq!(result.status, Status::Success, "{}", result.err);
        assert_eq!(result.asked, 0);
        for i in 0..3 {
            assert!(dir.path().join(format!("pre_rock_mip0{i}.tga")).is_file());
        }
        assert!(result.out.contains("Writing mipmap 3 to output TGA"));
    }

    #[test]
    fn test_decode_refused_directory_creation() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rock.txtr");
        write_txtr(&input, 8, 8, 1);
        let out_dir = dir.path().join("mips");

        let result = txtrtool(&["decode", "-m", "-n", path_str(&input), path_str(&out_dir)], &[]);
        assert_eq!(result.status, Status::ProgramError);
        assert_eq!(result.asked, 0);
        assert!(result.err.contains("Not creating output directory"));
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_decode_mipmaps_input_without_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("..");
        let out_dir = dir.path().join("mips");
        fs::create_dir(&out_dir).unwrap();

        let result = txtrtool(&["decode", "-m", "-y", path_str(&input), path_str(&out_dir)], &[]);
        assert_eq!(result.status, Status::MemoryError);
        assert!(result.err.contains("Failed to get file name from input file path"));
        assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_decode_single_output_must_be_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rock.txtr");
        write_txtr(&input, 8, 8, 1);

        let result = txtrtool(&["decode", "-y", path_str(&input), path_str(dir.path())], &[]);
        assert_eq!(result.status, Status::ProgramError);
        assert!(result.err.contains("must be a file"));
    }

    #[test]
    fn test_decode_overwrite_gating() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rock.txtr");
        write_txtr(&input, 8, 8, 1);
        let output = dir.path().join("rock.tga");
        fs::write(&output, b"keep").unwrap();

        let refused = txtrtool(&["decode", "-n", path_str(&input), path_str(&output)], &[]);
        assert_eq!(refused.status, Status::ProgramError);
        assert_eq!(refused.asked, 0);
        assert_eq!(fs::read(&output).unwrap(), b"keep");

        let declined = txtrtool(&["decode", path_str(&input), path_str(&output)], &["no\n"]);
        assert_eq!(declined.status, Status::ProgramError);
        assert_eq!(declined.asked, 1);

        let forced = txtrtool(&["decode", "-y", path_str(&input), path_str(&output)], &[]);
        assert_eq!(forced.status, Status::Success);
        assert_eq!(forced.asked, 0);
        assert!(Tga::read(&fs::read(&output).unwrap()).is_ok());
    }

    #[test]
    fn test_decode_silent_output_skips_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rock.txtr");
        write_txtr(&input, 8, 8, 1);
        let output = dir.path().join("rock.tga");
        fs::write(&output, b"old").unwrap();

        let result = txtrtool(&["decode", "-s", path_str(&input), path_str(&output)], &[]);
        assert_eq!(result.status, Status::Success);
        assert_eq!(result.asked, 0);
        assert!(result.out.is_empty());
    }

    #[test]
    fn test_decode_interrupted() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rock.txtr");
        write_txtr(&input, 8, 8, 2);
        let cancel = CancelToken::new();
        cancel.cancel();

        let out_dir = dir.path().join("mips");
        let result = run_with(
            &NativeCodec,
            &["decode", "-m", "-y", path_str(&input), path_str(&out_dir)],
            &[],
            &cancel,
        );
        assert_eq!(result.status, Status::ProgramError);
        assert!(fs::read_dir(&out_dir).unwrap().next().is_none());
    }
}

mod encode_tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.tga");
        let pixels = gradient(16, 8);
        write_tga(&source, 16, 8, &pixels, false);
        let texture = dir.path().join("tex.txtr");

        let encoded = txtrtool(&["encode", "-m", "0", path_str(&source), path_str(&texture)], &[]);
        assert_eq!(encoded.status, Status::Success, "{}", encoded.err);
        assert!(encoded.out.contains("Writing 5 mipmaps to output TXTR"));

        let txtr = Txtr::read(&fs::read(&texture).unwrap()).unwrap();
        assert_eq!(txtr.header.format, TextureFormat::RGBA8);
        assert_eq!(txtr.header.mip_count, 5);

        let decoded = dir.path().join("decoded.tga");
        let result = txtrtool(&["decode", path_str(&texture), path_str(&decoded)], &[]);
        assert_eq!(result.status, Status::Success, "{}", result.err);
        let tga = Tga::read(&fs::read(&decoded).unwrap()).unwrap();
        assert_eq!(tga.to_rgba().unwrap(), pixels);
    }

    #[test]
    fn test_encode_single_mipmap_message() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.tga");
        write_tga(&source, 8, 8, &gradient(8, 8), false);
        let texture = dir.path().join("tex.txtr");

        let result = txtrtool(
            &["encode", "-t", "CI4", "--dithertype", "ATKINSON", path_str(&source), path_str(&texture)],
            &[],
        );
        assert_eq!(result.status, Status::Success, "{}", result.err);
        assert!(result.out.contains("Writing 1 mipmap to output TXTR"));
        let txtr = Txtr::read(&fs::read(&texture).unwrap()).unwrap();
        assert!(txtr.palette.is_some());
    }

    #[test]
    fn test_encode_warns_on_new_format() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.tga");
        write_tga(&source, 8, 8, &gradient(8, 8), true);
        let texture = dir.path().join("tex.txtr");

        let result = txtrtool(&["encode", "-t", "CMP", path_str(&source), path_str(&texture)], &[]);
        assert_eq!(result.status, Status::Success, "{}", result.err);
        assert!(result.err.contains("WARN: Input file"));
        assert!(result.err.contains("\"New TGA Format\""));
    }

    #[test]
    fn test_encode_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.tga");
        write_tga(&source, 8, 8, &gradient(8, 8), false);
        let texture = dir.path().join("nested").join("tex.txtr");

        let refused = txtrtool(&["encode", path_str(&source), path_str(&texture)], &["n\n"]);
        assert_eq!(refused.status, Status::ProgramError);
        assert!(refused.err.contains("Not creating output file's directory"));

        let accepted = txtrtool(&["encode", path_str(&source), path_str(&texture)], &["Y\n"]);
        assert_eq!(accepted.status, Status::Success, "{}", accepted.err);
        assert!(texture.is_file());
    }

    #[test]
    fn test_encode_width_limit_above_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.tga");
        write_tga(&source, 8, 8, &gradient(8, 8), false);
        let texture = dir.path().join("tex.txtr");

        let result = txtrtool(&["encode", "-w", "16", path_str(&source), path_str(&texture)], &[]);
        assert_eq!(result.status, Status::ArgumentError);
        assert!(result.err.contains("ERROR: Failed to encode TXTR data"));
        assert!(!texture.exists());
    }

    #[test]
    fn test_encode_input_directory() {
        let dir = tempfile::tempdir().unwrap();
        let texture = dir.path().join("tex.txtr");
        let result = txtrtool(&["encode", path_str(dir.path()), path_str(&texture)], &[]);
        assert_eq!(result.status, Status::ProgramError);
        assert!(result.err.contains("must be a file"));
    }
}

mod validation_tests {
    use super::*;

    fn encode_status(options: &[&str]) -> Status {
        let mut args = vec!["encode"];
        args.extend_from_slice(options);
        args.extend_from_slice(&["missing.tga", "out.txtr"]);
        txtrtool(&args, &[]).status
    }

    #[test]
    fn test_rejected_options_are_argument_errors() {
        assert_eq!(encode_status(&["--miplimit", "12"]), Status::ArgumentError);
        assert_eq!(encode_status(&["-t", "CI8", "-m", "2"]), Status::ArgumentError);
        assert_eq!(encode_status(&["--widthlimit", "0"]), Status::ArgumentError);
        assert_eq!(encode_status(&["-h", "0"]), Status::ArgumentError);
        assert_eq!(encode_status(&["--texfmt", "rgba8"]), Status::ArgumentError);
        assert_eq!(encode_status(&["--squishmetric", "0.5,0.5"]), Status::ArgumentError);
        assert_eq!(encode_status(&["--squishmetric", "-0.5,0.5,0.5"]), Status::ArgumentError);
    }

    #[test]
    fn test_valid_options_reach_file_io() {
        assert_eq!(encode_status(&["-t", "CI8", "-m", "0"]), Status::IoError);
        assert_eq!(encode_status(&["--stbirfilter", "POINT_SAMPLE", "--stbiredge", "WRAP"]), Status::IoError);
    }

    #[test]
    fn test_missing_operands_are_generic_errors() {
        assert_eq!(txtrtool(&["encode", "in.tga"], &[]).status, Status::Error);
        assert_eq!(txtrtool(&["decode"], &[]).status, Status::Error);
        assert_eq!(txtrtool(&["print", ""], &[]).status, Status::Error);
    }
}

mod codec_seam_tests {
    use super::*;

    /// Fails every container read with a fixed code
    struct BrokenReader(TxtrReadError);

    impl Codec for BrokenReader {
        fn read_txtr(&self, _: &[u8]) -> Result<Txtr, TxtrReadError> {
            Err(self.0)
        }

        fn write_txtr(&self, txtr: &Txtr, cancel: &CancelToken) -> Result<Vec<u8>, TxtrWriteError> {
            NativeCodec.write_txtr(txtr, cancel)
        }

        fn decode_txtr(
            &self,
            txtr: &Txtr,
            options: &DecodeOptions,
            cancel: &CancelToken,
        ) -> Result<Vec<RgbaImage>, DecodeError> {
            NativeCodec.decode_txtr(txtr, options, cancel)
        }

        fn encode_txtr(
            &self,
            request: EncodeRequest<'_>,
            options: &EncodeOptions,
            cancel: &CancelToken,
        ) -> Result<Txtr, EncodeError> {
            NativeCodec.encode_txtr(request, options, cancel)
        }

        fn read_tga(&self, data: &[u8]) -> Result<Tga, TgaReadError> {
            NativeCodec.read_tga(data)
        }

        fn write_tga(&self, tga: &Tga) -> Result<Vec<u8>, TgaWriteError> {
            NativeCodec.write_tga(tga)
        }
    }

    fn print_with(code: TxtrReadError) -> Outcome {
        let dir = tempfile::tempdir().unwrap();
        let input: PathBuf = dir.path().join("tex.txtr");
        fs::write(&input, [0u8; 4]).unwrap();
        run_with(&BrokenReader(code), &["print", path_str(&input)], &[], &CancelToken::new())
    }

    #[test]
    fn test_read_codes_translate() {
        assert_eq!(print_with(TxtrReadError::PaletteAllocFailed).status, Status::MemoryError);
        assert_eq!(print_with(TxtrReadError::InvalidParams).status, Status::ArgumentError);

        let result = print_with(TxtrReadError::InvalidPaletteSize);
        assert_eq!(result.status, Status::FormatError);
        assert!(result.err.ends_with("ERROR: Failed to read TXTR data: Invalid palette size\n"));
    }

    #[test]
    fn test_noerrp_silences_translated_errors() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tex.txtr");
        fs::write(&input, [0u8; 4]).unwrap();
        let result = run_with(
            &BrokenReader(TxtrReadError::MipmapsAllocFailed),
            &["print", "-e", path_str(&input)],
            &[],
            &CancelToken::new(),
        );
        assert_eq!(result.status, Status::MemoryError);
        assert!(result.err.is_empty());
    }
}

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;
    use txtrtool::mipmap::MipmapNames;
    use txtrtool::registry::{DITHER_TYPES, TEXTURE_FORMATS};

    proptest! {
        #[test]
        fn mipmap_names_are_two_digit(stem in "[a-z][a-z0-9_]{0,12}", index in 0usize..=10) {
            let input = PathBuf::from(format!("{stem}.txtr"));
            let mut names = MipmapNames::new(&input, Path::new("out"), "", "").unwrap();
            let name = names.next_name(index);
            prop_assert_eq!(name, Path::new("out").join(format!("{stem}{index:02}.tga")));
        }

        #[test]
        fn unknown_names_never_resolve(name in "[A-Za-z0-9_]{0,16}") {
            if let Some(format) = TEXTURE_FORMATS.parse(&name) {
                prop_assert_eq!(TEXTURE_FORMATS.name(format), name.as_str());
            }
            if let Some(dither) = DITHER_TYPES.parse(&name) {
                prop_assert_eq!(DITHER_TYPES.name(dither), name.as_str());
            }
        }
    }
}
