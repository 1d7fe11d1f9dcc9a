use std::path::PathBuf;

use marshal_bridge::MarshalError;

use crate::definitions::DefinitionError;
use crate::reader::ParseError;

/// Anything that aborts a parse or generation pass.
#[derive(Debug, thiserror::Error)]
pub enum DefsError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{file}: invalid {keyword} definition: {source}")]
    Definition {
        file: String,
        keyword: &'static str,
        source: DefinitionError,
    },

    #[error("{file}: include record does not name a file")]
    MissingInclude { file: String },

    #[error("include cycle: {} is already being parsed", .path.display())]
    IncludeCycle { path: PathBuf },

    #[error("no object named '{0}'")]
    UnknownObject(String),

    #[error("while generating {c_name}: {source}")]
    Generate { c_name: String, source: MarshalError },

    #[error("failed to serialize bundle: {0}")]
    Serialize(#[from] serde_json::Error),
}
