//! Reconciliation of optimistic and confirmed posts into one feed.
//!
//! The feed holds two collections:
//!
//! 1. Pending placeholders, keyed by their `tempId`, in insertion order
//! 2. Confirmed posts, in display order
//!
//! The rendered feed is the pending placeholders followed by the confirmed
//! posts. A confirmed post carrying a `tempId` retires the placeholder with
//! that key, so a post is never shown twice.

use crate::{FeedEvent, PostRecord, PostRef, TempId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// What an operation did to the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "camelCase")]
pub enum FeedChange {
    /// Nothing changed
    Unchanged,
    /// An optimistic placeholder was added (or overwritten)
    PendingAdded,
    /// A confirmed post was prepended
    Inserted { retired: bool },
    /// A confirmed post replaced an existing one in place
    Replaced { index: usize, retired: bool },
    /// A placeholder was dropped after a failed create
    Discarded,
    /// A confirmed post was merged with an update
    Updated { index: usize },
    /// Posts were removed by a delete
    Removed { confirmed: usize, pending: usize },
    /// The confirmed list was replaced
    Refreshed { len: usize },
    /// All placeholders were dropped
    Cleared { count: usize },
}

impl FeedChange {
    /// Whether the feed is different after this change.
    pub fn is_change(&self) -> bool {
        !matches!(self, FeedChange::Unchanged)
    }
}

/// Serializable projection of the feed, as handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView {
    /// Placeholders first, then confirmed posts
    pub posts: Vec<PostRecord>,
    /// Number of placeholders at the front of `posts`
    pub optimistic_posts_count: usize,
    /// Revision the view was taken at
    pub revision: u64,
}

/// Merges optimistic placeholders and confirmed posts for one feed view.
///
/// Every operation is synchronous and infallible. Operations that find
/// nothing to do return [`FeedChange::Unchanged`] and leave the revision
/// untouched, so callers can skip re-rendering.
#[derive(Debug, Clone, Default)]
pub struct FeedReconciler {
    confirmed: Arc<Vec<PostRecord>>,
    pending: IndexMap<TempId, PostRecord>,
    revision: u64,
}

impl FeedReconciler {
    /// Create an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a feed seeded with the first batch from the post source.
    pub fn with_posts(posts: Vec<PostRecord>) -> Self {
        Self {
            confirmed: Arc::new(posts),
            ..Self::default()
        }
    }

    /// Apply a feed event.
    pub fn apply(&mut self, event: FeedEvent) -> FeedChange {
        match event {
            FeedEvent::Created { post } => self.handle_post_created(post),
            FeedEvent::CreationFailed { temp_id } => self.handle_post_creation_failed(&temp_id),
            FeedEvent::Updated { post } => self.handle_post_updated(&post),
            FeedEvent::Deleted { post_id } => self.handle_post_deleted(post_id),
            FeedEvent::Refreshed { posts } => self.update_posts(posts),
            FeedEvent::ClearOptimistic => self.clear_optimistic_posts(),
        }
    }

    /// Record a created post.
    ///
    /// Optimistic posts are parked by `tempId`; a second placeholder with the
    /// same key overwrites the first. Confirmed posts retire their
    /// placeholder, then replace a matching confirmed post in place or are
    /// prepended.
    pub fn handle_post_created(&mut self, post: PostRecord) -> FeedChange {
        if post.is_optimistic {
            let Some(temp_id) = post.temp_id.clone() else {
                warn!("ignoring optimistic post without a tempId");
                return FeedChange::Unchanged;
            };
            trace!(temp_id = %temp_id, "optimistic post pending");
            self.pending.insert(temp_id, post);
            return self.changed(FeedChange::PendingAdded);
        }

        let retired = match &post.temp_id {
            Some(temp_id) => self.pending.shift_remove(temp_id).is_some(),
            None => false,
        };
        if retired {
            debug!(
                temp_id = ?post.temp_id,
                id = ?post.id,
                "placeholder retired by confirmed post"
            );
        }

        let confirmed = Arc::make_mut(&mut self.confirmed);
        let change = match confirmed.iter().position(|existing| existing.same_post(&post)) {
            Some(index) => {
                confirmed[index] = post;
                FeedChange::Replaced { index, retired }
            }
            None => {
                confirmed.insert(0, post);
                FeedChange::Inserted { retired }
            }
        };
        self.changed(change)
    }

    /// Drop the placeholder for a create the backend rejected.
    pub fn handle_post_creation_failed(&mut self, temp_id: &str) -> FeedChange {
        if self.pending.shift_remove(temp_id).is_none() {
            return FeedChange::Unchanged;
        }
        debug!(temp_id, "placeholder discarded after failed create");
        self.changed(FeedChange::Discarded)
    }

    /// Merge an updated post into the confirmed post with the same `id` or
    /// `documentId`. Updates for unknown posts are ignored: they usually lost
    /// a race with a delete.
    pub fn handle_post_updated(&mut self, post: &PostRecord) -> FeedChange {
        let Some(index) = self
            .confirmed
            .iter()
            .position(|existing| post.same_backend_post(existing))
        else {
            trace!(id = ?post.id, document_id = ?post.document_id, "update for unknown post");
            return FeedChange::Unchanged;
        };

        Arc::make_mut(&mut self.confirmed)[index].merge_from(post);
        self.changed(FeedChange::Updated { index })
    }

    /// Remove a post from both collections.
    pub fn handle_post_deleted(&mut self, post_ref: impl Into<PostRef>) -> FeedChange {
        let post_ref = post_ref.into();

        let confirmed = self
            .confirmed
            .iter()
            .filter(|post| post_ref.matches(post))
            .count();
        if confirmed > 0 {
            Arc::make_mut(&mut self.confirmed).retain(|post| !post_ref.matches(post));
        }
        let pending = usize::from(self.pending.shift_remove(&post_ref.pending_key()).is_some());

        if confirmed + pending == 0 {
            return FeedChange::Unchanged;
        }
        self.changed(FeedChange::Removed { confirmed, pending })
    }

    /// Replace the confirmed posts with a fresh list from the post source.
    ///
    /// A list with the same length and the same `id` at every position is
    /// treated as equivalent and the current list is kept as is.
    pub fn update_posts(&mut self, posts: Vec<PostRecord>) -> FeedChange {
        let equivalent = posts.len() == self.confirmed.len()
            && posts
                .iter()
                .zip(self.confirmed.iter())
                .all(|(new, current)| new.id == current.id);
        if equivalent {
            debug!(len = posts.len(), "refresh skipped, posts unchanged");
            return FeedChange::Unchanged;
        }

        let len = posts.len();
        self.confirmed = Arc::new(posts);
        self.changed(FeedChange::Refreshed { len })
    }

    /// Drop every pending placeholder.
    pub fn clear_optimistic_posts(&mut self) -> FeedChange {
        let count = self.pending.len();
        if count == 0 {
            return FeedChange::Unchanged;
        }
        self.pending.clear();
        self.changed(FeedChange::Cleared { count })
    }

    /// Borrow the rendered feed: placeholders, then confirmed posts.
    pub fn iter(&self) -> impl Iterator<Item = &PostRecord> {
        self.pending.values().chain(self.confirmed.iter())
    }

    /// The rendered feed.
    pub fn posts(&self) -> Vec<PostRecord> {
        self.iter().cloned().collect()
    }

    /// Snapshot of the rendered feed with its counters.
    pub fn view(&self) -> FeedView {
        FeedView {
            posts: self.posts(),
            optimistic_posts_count: self.optimistic_posts_count(),
            revision: self.revision,
        }
    }

    /// Number of pending placeholders.
    pub fn optimistic_posts_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether any placeholder is pending.
    pub fn has_optimistic_posts(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The confirmed posts. The `Arc` is only replaced when the list changes.
    pub fn confirmed_posts(&self) -> &Arc<Vec<PostRecord>> {
        &self.confirmed
    }

    /// The pending placeholders in insertion order.
    pub fn pending_posts(&self) -> impl Iterator<Item = &PostRecord> {
        self.pending.values()
    }

    /// Total number of rendered posts.
    pub fn len(&self) -> usize {
        self.pending.len() + self.confirmed.len()
    }

    /// Whether the feed renders nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counter bumped on every change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn changed(&mut self, change: FeedChange) -> FeedChange {
        self.revision += 1;
        trace!(revision = self.revision, ?change, "feed changed");
        change
    }
}
