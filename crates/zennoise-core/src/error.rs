//! Error types for the audio session and preset storage.

use thiserror::Error;

/// Failures reported by an [`AudioHost`](crate::graph::AudioHost) while
/// building or driving a session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("failed to create {stage} node: {reason}")]
    NodeCreation { stage: &'static str, reason: String },

    #[error("failed to connect nodes: {0}")]
    Connection(String),

    #[error("failed to schedule parameter change: {0}")]
    Scheduling(String),

    #[error("failed to start source: {0}")]
    SourceStart(String),

    /// Sources may only be stopped once; callers treat this as benign.
    #[error("source already stopped")]
    AlreadyStopped,

    #[error("layer has no {0:?} stage")]
    MissingStage(crate::graph::Role),
}

/// Failures from the preset store.
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("preset name is empty")]
    EmptyName,

    #[error("preset not found: {0}")]
    NotFound(String),

    #[error("stored presets are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("preset storage failed: {0}")]
    Storage(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
pub type PresetResult<T> = std::result::Result<T, PresetError>;
