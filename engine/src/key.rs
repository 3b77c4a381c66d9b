//! Identity keys for posts.
//!
//! A post can be known by its backend `id`, its `documentId`, or the client
//! `tempId` that correlates an optimistic placeholder with its confirmation.
//! Two records are the same post when any key present on both is equal.

use crate::{DocumentId, PostId, PostRecord, TempId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One way of identifying a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PostKey {
    /// Numeric id assigned by the backend
    Id(PostId),
    /// Backend document key
    DocumentId(DocumentId),
    /// Client correlation key
    TempId(TempId),
}

impl PostKey {
    /// Whether this key was assigned by the backend (as opposed to the client).
    pub fn is_backend(&self) -> bool {
        !matches!(self, PostKey::TempId(_))
    }

    /// Whether `record` carries this exact key.
    pub fn matches(&self, record: &PostRecord) -> bool {
        match self {
            PostKey::Id(id) => record.id == Some(*id),
            PostKey::DocumentId(doc) => record.document_id.as_deref() == Some(doc.as_str()),
            PostKey::TempId(temp) => record.temp_id.as_deref() == Some(temp.as_str()),
        }
    }
}

impl fmt::Display for PostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostKey::Id(id) => write!(f, "id:{}", id),
            PostKey::DocumentId(doc) => write!(f, "documentId:{}", doc),
            PostKey::TempId(temp) => write!(f, "tempId:{}", temp),
        }
    }
}

/// Reference to a post being deleted.
///
/// Callers hand over whichever identifier they have: the numeric id or the
/// document key. On the wire this is a bare JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostRef {
    Id(PostId),
    DocumentId(DocumentId),
}

impl PostRef {
    /// Whether `record` is identified by this reference.
    ///
    /// Comparison is strict: `Id(42)` does not match a `documentId` of `"42"`.
    pub fn matches(&self, record: &PostRecord) -> bool {
        match self {
            PostRef::Id(id) => record.id == Some(*id),
            PostRef::DocumentId(doc) => record.document_id.as_deref() == Some(doc.as_str()),
        }
    }

    /// The key this reference would have in the pending set.
    pub fn pending_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostRef::Id(id) => write!(f, "{}", id),
            PostRef::DocumentId(doc) => f.write_str(doc),
        }
    }
}

impl From<PostId> for PostRef {
    fn from(id: PostId) -> Self {
        PostRef::Id(id)
    }
}

impl From<&str> for PostRef {
    fn from(doc: &str) -> Self {
        PostRef::DocumentId(doc.to_string())
    }
}

impl From<String> for PostRef {
    fn from(doc: String) -> Self {
        PostRef::DocumentId(doc)
    }
}

impl From<PostRef> for PostKey {
    fn from(post_ref: PostRef) -> Self {
        match post_ref {
            PostRef::Id(id) => PostKey::Id(id),
            PostRef::DocumentId(doc) => PostKey::DocumentId(doc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_matches_only_its_own_field() {
        let record = PostRecord::confirmed(42, "d42");

        assert!(PostKey::Id(42).matches(&record));
        assert!(PostKey::DocumentId("d42".into()).matches(&record));
        assert!(!PostKey::DocumentId("42".into()).matches(&record));
        assert!(!PostKey::TempId("d42".into()).matches(&record));
    }

    #[test]
    fn absent_fields_never_match() {
        let record = PostRecord::default();

        assert!(!PostKey::Id(0).matches(&record));
        assert!(!PostKey::DocumentId(String::new()).matches(&record));
        assert!(!PostKey::TempId(String::new()).matches(&record));
    }

    #[test]
    fn backend_keys() {
        assert!(PostKey::Id(1).is_backend());
        assert!(PostKey::DocumentId("d1".into()).is_backend());
        assert!(!PostKey::TempId("t1".into()).is_backend());
    }

    #[test]
    fn post_ref_is_strict() {
        let record = PostRecord::confirmed(42, "d42");

        assert!(PostRef::from(42u64).matches(&record));
        assert!(PostRef::from("d42").matches(&record));
        assert!(!PostRef::from("42").matches(&record));
    }

    #[test]
    fn post_ref_pending_key() {
        assert_eq!(PostRef::Id(7).pending_key(), "7");
        assert_eq!(PostRef::from("temp-7").pending_key(), "temp-7");
    }

    #[test]
    fn post_ref_converts_to_key() {
        assert_eq!(PostKey::from(PostRef::Id(1)), PostKey::Id(1));
        assert_eq!(
            PostKey::from(PostRef::from("d1")),
            PostKey::DocumentId("d1".into())
        );
    }

    #[test]
    fn post_ref_from_json_number_or_string() {
        let by_id: PostRef = serde_json::from_str("42").unwrap();
        assert_eq!(by_id, PostRef::Id(42));

        let by_doc: PostRef = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(by_doc, PostRef::DocumentId("abc123".into()));
    }

    #[test]
    fn key_display() {
        assert_eq!(PostKey::Id(3).to_string(), "id:3");
        assert_eq!(PostKey::DocumentId("d3".into()).to_string(), "documentId:d3");
        assert_eq!(PostKey::TempId("t3".into()).to_string(), "tempId:t3");
    }
}
