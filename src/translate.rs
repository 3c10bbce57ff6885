//! Fine-grained collaborator errors folded into coarse outcomes
//!
//! Each collaborator operation has its own closed error enum. The tables
//! below list every code of every enum exactly once; a code missing from its
//! table falls back to [`Failure::Program`].

use std::fmt;

use txtrtool_codec::{DecodeError, EncodeError};
use txtrtool_core::{Failure, Operation};
use txtrtool_formats::{TgaReadError, TgaWriteError, TxtrReadError, TxtrWriteError};

use crate::console::Console;

/// A fine-grained error code with a declarative outcome table
pub trait Translate: Copy + PartialEq + fmt::Display + 'static {
    /// Operation that reports this error type
    const OPERATION: Operation;
    /// Every code
    const ALL: &'static [Self];
    /// Outcome of each code
    const TABLE: &'static [(Self, Failure)];

    fn failure(self) -> Failure {
        Self::TABLE
            .iter()
            .find(|(code, _)| *code == self)
            .map_or(Failure::Program, |(_, failure)| *failure)
    }
}

/// Print the failure of a collaborator operation and return its outcome
pub fn report<E: Translate>(console: &mut Console<'_>, error: E) -> Failure {
    let failure = error.failure();
    tracing::debug!(operation = %E::OPERATION, code = %error, ?failure, "collaborator failed");
    console.error(format_args!("Failed to {} data: {error}", E::OPERATION));
    failure
}

impl Translate for TxtrReadError {
    const OPERATION: Operation = Operation::TxtrRead;
    const ALL: &'static [Self] = TxtrReadError::ALL;
    const TABLE: &'static [(Self, Failure)] = &[
        (TxtrReadError::InvalidParams, Failure::Argument),
        (TxtrReadError::InvalidTextureFormat, Failure::Format),
        (TxtrReadError::InvalidTextureWidth, Failure::Format),
        (TxtrReadError::InvalidTextureHeight, Failure::Format),
        (TxtrReadError::InvalidMipCount, Failure::Format),
        (TxtrReadError::InvalidPaletteFormat, Failure::Format),
        (TxtrReadError::InvalidPaletteWidth, Failure::Format),
        (TxtrReadError::InvalidPaletteHeight, Failure::Format),
        (TxtrReadError::InvalidPaletteSize, Failure::Format),
        (TxtrReadError::PaletteAllocFailed, Failure::Memory),
        (TxtrReadError::MipmapsAllocFailed, Failure::Memory),
    ];
}

impl Translate for DecodeError {
    const OPERATION: Operation = Operation::TxtrDecode;
    const ALL: &'static [Self] = DecodeError::ALL;
    const TABLE: &'static [(Self, Failure)] = &[
        (DecodeError::InvalidParams, Failure::Argument),
        (DecodeError::InvalidTextureFormat, Failure::Format),
        (DecodeError::InvalidPaletteFormat, Failure::Format),
        (DecodeError::InvalidTextureWidth, Failure::Format),
        (DecodeError::InvalidTextureHeight, Failure::Format),
        (DecodeError::InvalidTextureMipCount, Failure::Format),
        (DecodeError::PaletteAllocFailed, Failure::Memory),
        (DecodeError::MipmapAllocFailed, Failure::Memory),
        (DecodeError::MissingPalette, Failure::Memory),
        (DecodeError::MissingMipmaps, Failure::Memory),
        (DecodeError::Interrupted, Failure::Program),
        (DecodeError::PaletteDecodeFailed, Failure::Program),
    ];
}

impl Translate for EncodeError {
    const OPERATION: Operation = Operation::TxtrEncode;
    const ALL: &'static [Self] = EncodeError::ALL;
    const TABLE: &'static [(Self, Failure)] = &[
        (EncodeError::SourcePixelsAllocFailed, Failure::Memory),
        (EncodeError::MipmapAllocFailed, Failure::Memory),
        (EncodeError::PaletteAllocFailed, Failure::Memory),
        (EncodeError::InvalidParams, Failure::Argument),
        (EncodeError::InvalidTextureFormat, Failure::Argument),
        (EncodeError::InvalidPaletteFormat, Failure::Argument),
        (EncodeError::InvalidTextureWidth, Failure::Argument),
        (EncodeError::InvalidTextureHeight, Failure::Argument),
        (EncodeError::InvalidMipLimit, Failure::Argument),
        (EncodeError::InvalidWidthLimit, Failure::Argument),
        (EncodeError::InvalidHeightLimit, Failure::Argument),
        (EncodeError::InvalidAverageType, Failure::Argument),
        (EncodeError::MipmappedPaletteFormat, Failure::Argument),
        (EncodeError::InvalidEdgeMode, Failure::Argument),
        (EncodeError::InvalidFilter, Failure::Argument),
        (EncodeError::InvalidMetricSize, Failure::Argument),
        (EncodeError::InvalidDitherType, Failure::Argument),
        (EncodeError::PaletteBuildFailed, Failure::Program),
        (EncodeError::ResizeFailed, Failure::Program),
        (EncodeError::Interrupted, Failure::Program),
        (EncodeError::PaletteEncodeFailed, Failure::Program),
    ];
}

impl Translate for TxtrWriteError {
    const OPERATION: Operation = Operation::TxtrWrite;
    const ALL: &'static [Self] = TxtrWriteError::ALL;
    const TABLE: &'static [(Self, Failure)] = &[
        (TxtrWriteError::InvalidParams, Failure::Argument),
        (TxtrWriteError::InvalidTextureFormat, Failure::Format),
        (TxtrWriteError::InvalidTextureWidth, Failure::Format),
        (TxtrWriteError::InvalidTextureHeight, Failure::Format),
        (TxtrWriteError::InvalidMipCount, Failure::Format),
        (TxtrWriteError::InvalidPaletteFormat, Failure::Format),
        (TxtrWriteError::InvalidPaletteWidth, Failure::Format),
        (TxtrWriteError::InvalidPaletteHeight, Failure::Format),
        (TxtrWriteError::InvalidPaletteSize, Failure::Format),
        (TxtrWriteError::InvalidTexturePalette, Failure::Memory),
        (TxtrWriteError::InvalidTextureMipmaps, Failure::Memory),
        (TxtrWriteError::MipmapsAllocFailed, Failure::Memory),
        (TxtrWriteError::Interrupted, Failure::Program),
    ];
}

impl Translate for TgaReadError {
    const OPERATION: Operation = Operation::TgaRead;
    const ALL: &'static [Self] = TgaReadError::ALL;
    const TABLE: &'static [(Self, Failure)] = &[
        (TgaReadError::InvalidParams, Failure::Argument),
        (TgaReadError::ColorMapPresent, Failure::Format),
        (TgaReadError::NotAColorTga, Failure::Format),
        (TgaReadError::InvalidXOrigin, Failure::Format),
        (TgaReadError::InvalidYOrigin, Failure::Format),
        (TgaReadError::InvalidWidth, Failure::Format),
        (TgaReadError::InvalidHeight, Failure::Format),
        (TgaReadError::InvalidPixelDepth, Failure::Format),
        (TgaReadError::InvalidAlphaBitSize, Failure::Format),
        (TgaReadError::IdAllocFailed, Failure::Memory),
        (TgaReadError::DataAllocFailed, Failure::Memory),
    ];
}

impl Translate for TgaWriteError {
    const OPERATION: Operation = Operation::TgaWrite;
    const ALL: &'static [Self] = TgaWriteError::ALL;
    const TABLE: &'static [(Self, Failure)] = &[
        (TgaWriteError::DataAllocFailed, Failure::Memory),
        (TgaWriteError::ColorMapPresent, Failure::Argument),
        (TgaWriteError::NotAColorTga, Failure::Argument),
        (TgaWriteError::InvalidXOrigin, Failure::Argument),
        (TgaWriteError::InvalidYOrigin, Failure::Argument),
        (TgaWriteError::InvalidWidth, Failure::Argument),
        (TgaWriteError::InvalidHeight, Failure::Argument),
        (TgaWriteError::InvalidPixelDepth, Failure::Argument),
        (TgaWriteError::InvalidAlphaBitSize, Failure::Argument),
        (TgaWriteError::InvalidParams, Failure::Argument),
        (TgaWriteError::InvalidData, Failure::Argument),
        (TgaWriteError::InvalidId, Failure::Argument),
        (TgaWriteError::InvalidSignature, Failure::Argument),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedPrompter;
    use std::collections::HashSet;
    use std::fmt::Debug;

    /// Every code appears in its table exactly once and nothing else does
    fn assert_total<E: Translate + Debug>() {
        for code in E::ALL {
            let hits = E::TABLE.iter().filter(|(c, _)| c == code).count();
            assert_eq!(hits, 1, "{:?} {code:?} mapped {hits} times", E::OPERATION);
        }
        assert_eq!(E::TABLE.len(), E::ALL.len(), "{:?}", E::OPERATION);
    }

    #[test]
    fn test_tables_are_total() {
        assert_total::<TxtrReadError>();
        assert_total::<DecodeError>();
        assert_total::<EncodeError>();
        assert_total::<TxtrWriteError>();
        assert_total::<TgaReadError>();
        assert_total::<TgaWriteError>();
    }

    #[test]
    fn test_operations_are_distinct() {
        let ops: HashSet<Operation> = [
            TxtrReadError::OPERATION,
            DecodeError::OPERATION,
            EncodeError::OPERATION,
            TxtrWriteError::OPERATION,
            TgaReadError::OPERATION,
            TgaWriteError::OPERATION,
        ]
        .into_iter()
        .collect();
        assert_eq!(ops.len(), Operation::ALL.len());
    }

    #[test]
    fn test_same_name_differs_by_operation() {
        assert_eq!(TgaReadError::ColorMapPresent.failure(), Failure::Format);
        assert_eq!(TgaWriteError::ColorMapPresent.failure(), Failure::Argument);
        assert_eq!(DecodeError::MissingPalette.failure(), Failure::Memory);
        assert_eq!(TxtrWriteError::InvalidTexturePalette.failure(), Failure::Memory);
        assert_eq!(EncodeError::InvalidWidthLimit.failure(), Failure::Argument);
        assert_eq!(EncodeError::Interrupted.failure(), Failure::Program);
    }

    #[test]
    fn test_report_message() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let mut prompter = ScriptedPrompter::default();
        let mut console = Console::new(&mut out, &mut err, &mut prompter);
        let failure = report(&mut console, TxtrReadError::InvalidTextureFormat);
        drop(console);

        assert_eq!(failure, Failure::Format);
        assert_eq!(String::from_utf8(err).unwrap(), "ERROR: Failed to read TXTR data: Invalid texture format\n");
    }
}
