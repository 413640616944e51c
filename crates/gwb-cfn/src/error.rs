use std::io;
use std::path::PathBuf;

use thiserror::Error;

use gwb_core::error::ParseError;

/// Errors that terminate a build run. None are retried; a failure partway
/// through `Append` leaves partial output on disk, nothing rolls back.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read schema {path}: {source}")]
    ReadSchema { path: PathBuf, source: io::Error },

    #[error("malformed schema: {0}")]
    Schema(#[from] ParseError),

    #[error("schema defines no paths to build")]
    EmptyPaths,

    #[error("base template does not exist: {0}")]
    MissingTemplate(PathBuf),

    #[error("failed to initialize {output} from {template}: {source}")]
    Init {
        template: PathBuf,
        output: PathBuf,
        source: io::Error,
    },

    #[error("failed to serialize declaration {logical_id}: {source}")]
    Serialize {
        logical_id: String,
        source: serde_yaml_ng::Error,
    },

    #[error("failed to append declaration {logical_id}: {source}")]
    Append {
        logical_id: String,
        source: io::Error,
    },
}
