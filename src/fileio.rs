//! Whole-file reads and gated writes

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;
use txtrtool_core::{Failure, TaskResult};

use crate::console::Console;

/// How to answer "overwrite?" and "create?" questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverwritePolicy {
    pub assume_yes: bool,
    pub assume_no: bool,
}

impl OverwritePolicy {
    /// `--no` refuses outright; `--yes` or suppressed output proceeds without asking
    fn permits(self, console: &mut Console<'_>, question: impl std::fmt::Display) -> bool {
        if self.assume_no {
            return false;
        }
        if self.assume_yes || console.output_suppressed() {
            return true;
        }
        console.confirm(question)
    }
}

/// Which directory [`ensure_directory`] is asked about, for messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryRole {
    /// Target of `decode --mipmaps`
    Output,
    /// Parent of an `encode` output file
    OutputParent,
}

impl DirectoryRole {
    fn label(self) -> &'static str {
        match self {
            DirectoryRole::Output => "output directory",
            DirectoryRole::OutputParent => "output file's directory",
        }
    }

    fn title(self) -> &'static str {
        match self {
            DirectoryRole::Output => "Output directory",
            DirectoryRole::OutputParent => "Output file's directory",
        }
    }
}

/// Read a whole non-empty file into memory
pub fn read_whole_file(console: &mut Console<'_>, path: &Path) -> TaskResult<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| {
        console.error(format_args!("Failed to open input file \"{}\": {e}", path.display()));
        Failure::Io
    })?;

    let size = file.metadata().map(|m| m.len()).map_err(|e| {
        console.error(format_args!("Failed to get size of input file \"{}\": {e}", path.display()));
        Failure::Io
    })?;
    if size == 0 {
        console.error(format_args!("Input file \"{}\" is empty", path.display()));
        return Err(Failure::Argument);
    }

    let mut data = Vec::new();
    let reserved = usize::try_from(size)
        .ok()
        .and_then(|size| data.try_reserve_exact(size).ok().map(|()| size));
    let Some(size) = reserved else {
        console.error("Failed to allocate memory for file data");
        return Err(Failure::Memory);
    };
    data.resize(size, 0);

    file.read_exact(&mut data).map_err(|e| {
        console.error(format_args!("Failed to read input file \"{}\": {e}", path.display()));
        Failure::Io
    })?;

    debug!(path = %path.display(), size, "read input file");
    Ok(data)
}

/// Write `bytes` to `path`, asking before replacing an existing file
pub fn write_whole_file(
    console: &mut Console<'_>,
    path: &Path,
    bytes: &[u8],
    policy: OverwritePolicy,
) -> TaskResult {
    if let Ok(meta) = fs::metadata(path) {
        if meta.is_dir() {
            console.error(format_args!("Output file \"{}\" is a directory; cannot overwrite", path.display()));
            return Err(Failure::Program);
        }
        let question = format!("Do you want to overwrite output file \"{}\"? (y,Y/ANY) ", path.display());
        if !policy.permits(console, question) {
            console.error(format_args!("Not overwriting output file \"{}\"", path.display()));
            return Err(Failure::Program);
        }
    }

    let mut file = File::create(path).map_err(|e| {
        console.error(format_args!("Failed to open output file \"{}\": {e}", path.display()));
        Failure::Io
    })?;
    file.write_all(bytes).map_err(|e| {
        console.error(format_args!("Failed to write output file \"{}\": {e}", path.display()));
        Failure::Io
    })?;
    if let Err(e) = file.sync_all() {
        console.warn(format_args!("Failed to close output file \"{}\": {e}", path.display()));
    }

    debug!(path = %path.display(), size = bytes.len(), "wrote output file");
    Ok(())
}

/// Make sure `path` is a directory, asking before creating it
pub fn ensure_directory(
    console: &mut Console<'_>,
    path: &Path,
    role: DirectoryRole,
    policy: OverwritePolicy,
) -> TaskResult {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => {
            console.error(format_args!("{} \"{}\" must be a directory", role.title(), path.display()));
            return Err(Failure::Program);
        }
        Err(_) => {}
    }

    let question = format!("{} \"{}\" does not exist. Create it? (y,Y/ANY) ", role.title(), path.display());
    if !policy.permits(console, question) {
        console.error(format_args!("Not creating {} \"{}\"", role.label(), path.display()));
        return Err(Failure::Program);
    }

    fs::create_dir_all(path).map_err(|e| {
        console.error(format_args!("Failed to create {} \"{}\": {e}", role.label(), path.display()));
        Failure::Io
    })?;
    debug!(path = %path.display(), "created directory");
    Ok(())
}
