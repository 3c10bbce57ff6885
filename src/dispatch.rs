//! Subcommand selection and dispatch
//!
//! [`parse`] turns raw arguments into the selected [`Mode`] or an early exit
//! status (help, version, tokenizer errors). [`dispatch`] checks operands,
//! validates options and runs the task of that mode exactly once.

use std::ffi::OsString;
use std::path::Path;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::debug;
use txtrtool_core::{CancelToken, Status};

use crate::backend::Codec;
use crate::cli::{Cli, Commands, DecodeArgs, EncodeArgs, PrintArgs, StreamArgs};
use crate::console::Console;
use crate::options::{validate_encode, DecodeSettings, PrintSettings};
use crate::tasks;

/// The subcommand selected on the command line
#[derive(Debug, Clone)]
pub enum Mode {
    Decode(DecodeArgs),
    Encode(EncodeArgs),
    Print(PrintArgs),
}

/// Outcome of argument parsing
#[derive(Debug, Clone)]
pub enum Parsed {
    /// Run `mode` with `verbose` diagnostics
    Run { verbose: u8, mode: Mode },
    /// Nothing left to do
    Exit(Status),
}

/// Version line printed by `version` and `--version`
pub fn version_line() -> String {
    format!("txtrtool {}", env!("CARGO_PKG_VERSION"))
}

/// Tokenize `args`, printing help, version and usage errors directly
pub fn parse<I, T>(args: I, console: &mut Console<'_>) -> Parsed
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let text = e.render().to_string();
            return match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    console.print_always(text);
                    Parsed::Exit(Status::Success)
                }
                _ => {
                    console.eprint_always(text);
                    Parsed::Exit(Status::Error)
                }
            };
        }
    };

    let mode = match cli.command {
        None => {
            console.print_always(Cli::command().render_help());
            return Parsed::Exit(Status::Success);
        }
        Some(Commands::Version) => {
            console.print_always(format_args!("{}\n", version_line()));
            return Parsed::Exit(Status::Success);
        }
        Some(Commands::Decode(args)) => Mode::Decode(args),
        Some(Commands::Encode(args)) => Mode::Encode(args),
        Some(Commands::Print(args)) => Mode::Print(args),
    };
    Parsed::Run { verbose: cli.verbose, mode }
}

/// The first `N` operands, or `None` if any of them is missing or empty
fn operands<const N: usize>(given: &[String]) -> Option<[&Path; N]> {
    let mut out = [Path::new(""); N];
    for (slot, operand) in out.iter_mut().zip(given) {
        *slot = Path::new(operand.as_str());
    }
    (given.len() >= N && out.iter().all(|p| !p.as_os_str().is_empty())).then_some(out)
}

fn apply_streams(console: &mut Console<'_>, streams: StreamArgs) {
    console.set_suppression(streams.nooutp, streams.noerrp);
}

/// Run the task of `mode` once and fold its result into an exit status
pub fn dispatch(
    mode: &Mode,
    console: &mut Console<'_>,
    codec: &dyn Codec,
    cancel: &CancelToken,
) -> Status {
    match mode {
        Mode::Decode(args) => {
            let Some([input, output]) = operands::<2>(&args.operands) else {
                console.error_always("At least two operands are required.");
                return Status::Error;
            };
            apply_streams(console, args.streams);
            let settings = DecodeSettings::from(args);
            debug!(?settings, "decode");
            tasks::decode::run(console, codec, cancel, &settings, input, output).into()
        }
        Mode::Encode(args) => {
            let Some([input, output]) = operands::<2>(&args.operands) else {
                console.error_always("At least two operands are required.");
                return Status::Error;
            };
            let settings = match validate_encode(args) {
                Ok(settings) => settings,
                Err(e) => {
                    console.error_always(e);
                    return Status::ArgumentError;
                }
            };
            apply_streams(console, args.streams);
            debug!(?settings, "encode");
            tasks::encode::run(console, codec, cancel, &settings, input, output).into()
        }
        Mode::Print(args) => {
            let Some([input]) = operands::<1>(&args.operands) else {
                console.error_always("At least one operand is required.");
                return Status::Error;
            };
            apply_streams(console, args.streams);
            tasks::print::run(console, codec, PrintSettings::from(args), input).into()
        }
    }
}

/// Parse `args` and run the selected subcommand
pub fn run<I, T>(args: I, console: &mut Console<'_>, codec: &dyn Codec, cancel: &CancelToken) -> Status
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match parse(args, console) {
        Parsed::Run { mode, .. } => dispatch(&mode, console, codec, cancel),
        Parsed::Exit(status) => status,
    }
}
