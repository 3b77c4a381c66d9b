//! # NailFeed Engine
//!
//! Optimistic feed reconciliation for the NailFeed post feed.
//!
//! When a user creates a post, the web app shows a placeholder right away and
//! sends the request in the background. This crate keeps the placeholders and
//! the posts confirmed by the backend in one feed, and guarantees that a post
//! never shows up twice once its confirmation arrives.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine only reacts to outcomes reported by its caller
//! - **Infallible**: races (update after delete, double delete) are no-ops
//! - **Owned state**: one [`FeedReconciler`] per feed view, no globals
//!
//! ## Core Concepts
//!
//! ### Posts
//!
//! A [`PostRecord`] is identified by any of three keys ([`PostKey`]):
//! - the backend `id`
//! - the backend `documentId`
//! - the client `tempId` correlating a placeholder with its confirmation
//!
//! Everything else on a post is opaque payload.
//!
//! ### Feed
//!
//! The [`FeedReconciler`] holds pending placeholders (keyed by `tempId`) and
//! confirmed posts. The rendered feed is placeholders first, then confirmed
//! posts. Every operation returns a [`FeedChange`] so callers know whether
//! anything needs re-rendering.
//!
//! ### Events
//!
//! [`FeedEvent`] expresses every operation as data, for hosts that drive the
//! feed over the [`ffi`] boundary or from a recorded script.
//!
//! ## Quick Start
//!
//! ```rust
//! use nailfeed_engine::{FeedChange, FeedReconciler, PostRecord};
//!
//! // 1. Seed the feed with the server-rendered batch
//! let mut feed = FeedReconciler::with_posts(vec![PostRecord::confirmed(1, "doc-1")]);
//!
//! // 2. Show a placeholder while the create request is in flight
//! let placeholder = PostRecord::optimistic().with_field("title", "Glazed donut");
//! feed.handle_post_created(placeholder.clone());
//! assert_eq!(feed.optimistic_posts_count(), 1);
//!
//! // 3. The backend confirms; the placeholder is retired
//! let change = feed.handle_post_created(placeholder.confirm(2, "doc-2"));
//! assert_eq!(change, FeedChange::Inserted { retired: true });
//!
//! let ids: Vec<_> = feed.iter().map(|post| post.id).collect();
//! assert_eq!(ids, vec![Some(2), Some(1)]);
//! ```

pub mod error;
pub mod event;
pub mod ffi;
pub mod key;
pub mod post;
pub mod reconcile;

// Re-export main types at crate root
pub use error::Error;
pub use event::{posts_from_json, FeedEvent};
pub use key::{PostKey, PostRef};
pub use post::PostRecord;
pub use reconcile::{FeedChange, FeedReconciler, FeedView};

/// Type aliases for clarity
pub type PostId = u64;
pub type DocumentId = String;
pub type TempId = String;
