//! Subcommand tasks
//!
//! Each task reads its input fully, hands it to the collaborators behind
//! [`crate::backend::Codec`], and writes the result. Failures are reported on
//! the console where they happen and returned as a coarse [`txtrtool_core::Failure`].

pub mod decode;
pub mod encode;
pub mod print;
