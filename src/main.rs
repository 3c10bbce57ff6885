//! txtrtool - Metroid Prime TXTR converter
//!
//! Entry point: parses arguments, sets up tracing and interrupt handling,
//! then runs the selected subcommand.

use std::io;
use std::process::ExitCode;

use tracing::warn;
use txtrtool::{dispatch, parse, CancelToken, Console, NativeCodec, Parsed, StdinPrompter};
use txtrtool_core::logging::{init_with_config, TracingConfig};

fn main() -> ExitCode {
    let (mut stdout, mut stderr) = (io::stdout(), io::stderr());
    let mut prompter = StdinPrompter;
    let mut console = Console::new(&mut stdout, &mut stderr, &mut prompter);

    let (verbose, mode) = match parse(std::env::args_os(), &mut console) {
        Parsed::Run { verbose, mode } => (verbose, mode),
        Parsed::Exit(status) => return status.into(),
    };
    init_with_config(&TracingConfig::from_verbosity(verbose));

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!(error = %e, "failed to install interrupt handler");
    }

    dispatch(&mode, &mut console, &NativeCodec, &cancel).into()
}
