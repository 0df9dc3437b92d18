use crate::kind::StatementKind;
use common::diag;
use common::error::{ConfigError, DiagnosticMessage};
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    /// A statement matched a create grammar but its `WITH` clause has no
    /// `KAFKA_TOPIC='...'` assignment.
    #[error("missing KAFKA_TOPIC for {kind}: {context}")]
    MissingTopic {
        kind: StatementKind,
        context: DiagnosticMessage,
    },
    #[error("I/O error: {context}")]
    Io {
        context: DiagnosticMessage,
        #[source]
        source: io::Error,
    },
    #[error("configuration error: {context}")]
    Config {
        context: DiagnosticMessage,
        #[source]
        source: ConfigError,
    },
}

impl ScriptError {
    #[track_caller]
    pub fn missing_topic(kind: StatementKind, statement: &str) -> Self {
        Self::MissingTopic {
            kind,
            context: diag!("WITH clause of `{}` does not set KAFKA_TOPIC", statement),
        }
    }

    #[track_caller]
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            context: diag!("failed to read script '{}'", path.as_ref().display()),
            source,
        }
    }
}

impl From<ConfigError> for ScriptError {
    #[track_caller]
    fn from(err: ConfigError) -> Self {
        ScriptError::Config {
            context: DiagnosticMessage::new(err.to_string()),
            source: err,
        }
    }
}
