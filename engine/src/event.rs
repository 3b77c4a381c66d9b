//! Feed events: the callbacks a feed receives, expressed as data.
//!
//! Each event corresponds to one reconciler operation. Hosts that cannot call
//! the reconciler directly (FFI, recorded scripts) send these as JSON.

use crate::{error::Result, Error, PostRecord, PostRef, TempId};
use serde::{Deserialize, Serialize};

/// An event that can be applied to a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FeedEvent {
    /// A post was created, optimistically or confirmed by the backend
    Created { post: PostRecord },
    /// The backend rejected an optimistic create
    #[serde(rename_all = "camelCase")]
    CreationFailed { temp_id: TempId },
    /// The backend returned an updated post
    Updated { post: PostRecord },
    /// A post was deleted
    #[serde(rename_all = "camelCase")]
    Deleted { post_id: PostRef },
    /// The post source delivered a fresh list
    Refreshed { posts: Vec<PostRecord> },
    /// Drop every pending placeholder
    ClearOptimistic,
}

impl FeedEvent {
    /// Decode an event from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidEvent(e.to_string()))
    }

    /// Check caller discipline the reconciler would otherwise silently absorb.
    pub fn validate(&self) -> Result<()> {
        match self {
            FeedEvent::Created { post } if post.is_optimistic && post.temp_id.is_none() => {
                Err(Error::MissingTempId)
            }
            _ => Ok(()),
        }
    }

    /// Short name of the event kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedEvent::Created { .. } => "created",
            FeedEvent::CreationFailed { .. } => "creationFailed",
            FeedEvent::Updated { .. } => "updated",
            FeedEvent::Deleted { .. } => "deleted",
            FeedEvent::Refreshed { .. } => "refreshed",
            FeedEvent::ClearOptimistic => "clearOptimistic",
        }
    }
}

/// Decode a post list, as delivered by the post source.
pub fn posts_from_json(json: &str) -> Result<Vec<PostRecord>> {
    serde_json::from_str(json).map_err(|e| Error::InvalidPosts(e.to_string()))
}
