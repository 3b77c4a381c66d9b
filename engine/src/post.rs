//! Post records flowing through the feed.

use crate::{DocumentId, PostId, PostKey, TempId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A post as the feed sees it.
///
/// Only the identity fields are interpreted. Everything else the backend
/// sends (author, media, counts, timestamps) rides along in `fields` and is
/// serialized back flat, next to the identity fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// Backend id, absent until the post is confirmed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    /// Backend document key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<DocumentId>,
    /// Client correlation key for optimistic placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<TempId>,
    /// Locally synthesized and not yet confirmed by the backend
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_optimistic: bool,
    /// Opaque payload
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl PostRecord {
    /// A post confirmed by the backend.
    pub fn confirmed(id: PostId, document_id: impl Into<DocumentId>) -> Self {
        Self {
            id: Some(id),
            document_id: Some(document_id.into()),
            ..Self::default()
        }
    }

    /// An optimistic placeholder with a freshly generated correlation key.
    pub fn optimistic() -> Self {
        Self::optimistic_with(uuid::Uuid::new_v4().to_string())
    }

    /// An optimistic placeholder with the given correlation key.
    pub fn optimistic_with(temp_id: impl Into<TempId>) -> Self {
        Self {
            temp_id: Some(temp_id.into()),
            is_optimistic: true,
            ..Self::default()
        }
    }

    /// Set a payload field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set the correlation key.
    pub fn with_temp_id(mut self, temp_id: impl Into<TempId>) -> Self {
        self.temp_id = Some(temp_id.into());
        self
    }

    /// Read a payload field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Turn a placeholder into the confirmed record that supersedes it.
    ///
    /// The correlation key is kept so the feed can retire the placeholder.
    pub fn confirm(mut self, id: PostId, document_id: impl Into<DocumentId>) -> Self {
        self.id = Some(id);
        self.document_id = Some(document_id.into());
        self.is_optimistic = false;
        self
    }

    /// Every key present on this record.
    pub fn keys(&self) -> Vec<PostKey> {
        let mut keys = Vec::with_capacity(3);
        if let Some(id) = self.id {
            keys.push(PostKey::Id(id));
        }
        if let Some(doc) = &self.document_id {
            keys.push(PostKey::DocumentId(doc.clone()));
        }
        if let Some(temp) = &self.temp_id {
            keys.push(PostKey::TempId(temp.clone()));
        }
        keys
    }

    /// Whether the backend has given this record any identity.
    pub fn is_matchable(&self) -> bool {
        self.id.is_some() || self.document_id.is_some()
    }

    /// Same post by `id`, `documentId` or `tempId`.
    pub fn same_post(&self, other: &PostRecord) -> bool {
        self.keys().iter().any(|key| key.matches(other))
    }

    /// Same post by `id` or `documentId` only.
    pub fn same_backend_post(&self, other: &PostRecord) -> bool {
        self.keys()
            .iter()
            .filter(|key| key.is_backend())
            .any(|key| key.matches(other))
    }

    /// Shallow merge: whatever `update` carries overwrites this record.
    pub fn merge_from(&mut self, update: &PostRecord) {
        if update.id.is_some() {
            self.id = update.id;
        }
        if update.document_id.is_some() {
            self.document_id = update.document_id.clone();
        }
        if update.temp_id.is_some() {
            self.temp_id = update.temp_id.clone();
        }
        self.is_optimistic = update.is_optimistic;
        for (name, value) in &update.fields {
            self.fields.insert(name.clone(), value.clone());
        }
    }
}
