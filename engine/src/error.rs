//! Error types for the NailFeed engine.
//!
//! The reconciler itself never fails. These errors only surface at the
//! boundaries where events and post lists arrive as JSON.

use thiserror::Error;

/// All possible errors from the NailFeed engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error("invalid post list: {0}")]
    InvalidPosts(String),

    #[error("optimistic post is missing a tempId")]
    MissingTempId,
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
