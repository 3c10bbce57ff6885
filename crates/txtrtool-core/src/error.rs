//! Coarse outcome taxonomy for txtrtool
//!
//! Every collaborator reports fine-grained error codes of its own; the
//! command layer folds them into the small closed set below, which doubles
//! as the process exit status.

use std::fmt;
use std::process::ExitCode;

use thiserror::Error;

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    /// The requested action completed
    Success = 0,
    /// Argument count or shape was wrong before a task ran
    Error = 1,
    /// Refused action or unreachable internal state
    ProgramError = 2,
    /// A caller-supplied value was rejected
    ArgumentError = 3,
    /// File system open/read/write failure
    IoError = 4,
    /// Malformed on-disk structure
    FormatError = 5,
    /// Allocation failure
    MemoryError = 6,
}

impl Status {
    /// Every status, in exit code order
    pub const ALL: &'static [Status] = &[
        Status::Success,
        Status::Error,
        Status::ProgramError,
        Status::ArgumentError,
        Status::IoError,
        Status::FormatError,
        Status::MemoryError,
    ];

    /// Numeric exit code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether this status reports success
    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

impl From<Failure> for Status {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::Generic => Status::Error,
            Failure::Program => Status::ProgramError,
            Failure::Argument => Status::ArgumentError,
            Failure::Io => Status::IoError,
            Failure::Format => Status::FormatError,
            Failure::Memory => Status::MemoryError,
        }
    }
}

impl<T> From<Result<T, Failure>> for Status {
    fn from(result: Result<T, Failure>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(failure) => failure.into(),
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}

/// A non-success outcome
///
/// Used as the error half of every task and helper result so that a
/// failing path can never claim [`Status::Success`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Failure {
    /// Generic error
    #[error("error")]
    Generic,
    /// Internal or refused action
    #[error("program error")]
    Program,
    /// Rejected argument or field value
    #[error("argument error")]
    Argument,
    /// File system failure
    #[error("I/O error")]
    Io,
    /// Malformed data
    #[error("format error")]
    Format,
    /// Allocation failure
    #[error("memory error")]
    Memory,
}

/// Result type for tasks that only report a coarse outcome
pub type TaskResult<T = ()> = std::result::Result<T, Failure>;

/// Collaborator operations whose fine-grained errors get translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    TxtrRead,
    TxtrDecode,
    TxtrEncode,
    TxtrWrite,
    TgaRead,
    TgaWrite,
}

impl Operation {
    /// Every operation
    pub const ALL: &'static [Operation] = &[
        Operation::TxtrRead,
        Operation::TxtrDecode,
        Operation::TxtrEncode,
        Operation::TxtrWrite,
        Operation::TgaRead,
        Operation::TgaWrite,
    ];

    /// Verb and container used in user-facing failure messages
    pub fn describe(self) -> &'static str {
        match self {
            Operation::TxtrRead => "read TXTR",
            Operation::TxtrDecode => "decode TXTR",
            Operation::TxtrEncode => "encode TXTR",
            Operation::TxtrWrite => "write TXTR",
            Operation::TgaRead => "read TGA",
            Operation::TgaWrite => "write TGA",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
