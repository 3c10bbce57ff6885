//! Output file names for decoded mipmaps

use std::path::{Path, PathBuf};

/// Extension of every generated mipmap file
const EXTENSION: &str = ".tga";

/// Per-level output name template
///
/// Holds `<prefix><stem><suffix>XX.tga` where `XX` is rewritten in place with
/// the two-digit level index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipmapNames {
    directory: PathBuf,
    name: String,
    slot: usize,
}

impl MipmapNames {
    /// Template for the mipmaps of `input`, or `None` if it has no file stem
    pub fn new(input: &Path, directory: &Path, prefix: &str, suffix: &str) -> Option<Self> {
        let stem = input.file_stem()?.to_string_lossy();
        let mut name = format!("{prefix}{stem}{suffix}");
        let slot = name.len();
        name.push_str("00");
        name.push_str(EXTENSION);
        Some(Self { directory: directory.to_path_buf(), name, slot })
    }

    /// Path of mip level `index` (0..=10)
    pub fn next_name(&mut self, index: usize) -> PathBuf {
        debug_assert!(index <= 10, "mip index {index} out of range");
        let digits = format!("{:02}", index % 100);
        self.name.replace_range(self.slot..self.slot + 2, &digits);
        self.directory.join(&self.name)
    }
}

/// Where decoded images are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNames {
    /// First level only, to the literal output path
    Single(PathBuf),
    /// Every level, into a directory
    Sequence(MipmapNames),
}

impl OutputNames {
    pub fn name(&mut self, index: usize) -> PathBuf {
        match self {
            OutputNames::Single(path) => path.clone(),
            OutputNames::Sequence(names) => names.next_name(index),
        }
    }
}
