//! # Go Emitter
//!
//! Rendering of IR into gofmt-aligned Go source, and the writers that put
//! it on disk.

mod format;
mod render;
mod writer;

pub use format::{check_identifier, format_go_source, is_go_identifier};
pub use render::{go_literal, go_quote, render_enum, render_struct};
pub use writer::{output_path, EnumFileWriter, GoEnumWriter, GoStructWriter, StructFileWriter};
