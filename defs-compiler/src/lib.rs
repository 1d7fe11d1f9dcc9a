// Library interface for defs-compiler: reads `.defs` interface
// descriptions and produces PHP-GTK marshaling fragments for them.

pub mod config;
pub mod defs_parser;
pub mod definitions;
pub mod error;
pub mod generate;
pub mod reader;
pub mod summary;
pub mod trace;

pub use defs_parser::{DefsParser, Keyword};
pub use error::DefsError;
pub use generate::{Bundle, CallableKind, FunctionFragments, RegisterDefinitions, generate_bundle};
pub use reader::{Record, parse_source, read_records};
