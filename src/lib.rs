//! txtrtool
//!
//! Command layer of a converter between Metroid Prime TXTR textures and TGA
//! images: subcommand dispatch, option validation, enum/string registries,
//! error translation, gated file I/O and mipmap file naming.
//!
//! | Subcommand | Operands | Result |
//! |------------|----------|--------|
//! | `decode`   | `<input txtr> <output tga or directory>` | One TGA, or every mip level with `--mipmaps` |
//! | `encode`   | `<input tga> <output txtr>` | A TXTR with generated mipmaps |
//! | `print`    | `<input txtr>` | Header report, optionally JSON |
//!
//! The exit status of every run is a [`txtrtool_core::Status`].

pub mod backend;
pub mod cli;
pub mod console;
pub mod dispatch;
pub mod fileio;
pub mod mipmap;
pub mod options;
pub mod registry;
pub mod tasks;
pub mod translate;

pub use backend::{Codec, EncodeRequest, NativeCodec};
pub use console::{Console, Prompter, ScriptedPrompter, StdinPrompter};
pub use dispatch::{dispatch, parse, run, Mode, Parsed};
pub use txtrtool_core::{CancelToken, Status};
