//! Error taxonomy of a run.
//!
//! Only errors that abort the whole run live here. Per-case failures
//! (compiler errors, output mismatches) are not errors: they become an
//! [`Outcome`](crate::core::models::Outcome).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::models::Stage;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// The case root does not exist or is not a directory.
    #[error("test directory '{}' does not exist or is not a directory", path.display())]
    MissingRoot { path: PathBuf },

    /// The case root exists but could not be listed.
    #[error("failed to read test directory '{}': {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A collaborator command line is empty or cannot be split.
    #[error("invalid {stage} command line: '{command}'")]
    InvalidCommand { stage: Stage, command: String },

    /// A collaborator process could not be started or awaited.
    #[error("failed to run {stage} collaborator '{program}': {source}")]
    Spawn {
        stage: Stage,
        program: String,
        #[source]
        source: io::Error,
    },

    /// A case artifact needed to wire a collaborator's stdio could not be opened.
    #[error("failed to open case artifact '{}': {source}", path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
