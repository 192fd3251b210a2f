//! In-memory collections.
//!
//! Documents are kept in insertion order behind a `tokio` `RwLock`. Each
//! call counts as one store operation, which tests use to check that a
//! resolver did or did not reach the store.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Document, DocumentCollection, Filter, RepositoryError};

/// A collection held in process memory.
pub struct MemoryCollection<T> {
    docs: RwLock<Vec<T>>,
    operations: AtomicUsize,
}

impl<T: Document> MemoryCollection<T> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
            operations: AtomicUsize::new(0),
        }
    }

    /// Number of store operations issued so far.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Number of documents currently stored.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    /// Whether the collection holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }

    fn record_operation(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }

    fn filtered(docs: &[T], filter: &Filter) -> Result<Vec<T>, RepositoryError> {
        let mut matched = Vec::new();
        for doc in docs {
            if filter.matches(&serde_json::to_value(doc)?) {
                matched.push(doc.clone());
            }
        }
        Ok(matched)
    }
}

impl<T: Document> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document> DocumentCollection<T> for MemoryCollection<T> {
    async fn insert_many(&self, docs: &[T]) -> Result<u64, RepositoryError> {
        self.record_operation();
        let mut stored = self.docs.write().await;

        let mut seen: std::collections::HashSet<&str> =
            stored.iter().map(Document::id).collect();
        for doc in docs {
            if !seen.insert(doc.id()) {
                return Err(RepositoryError::Conflict(format!(
                    "duplicate {} id: {}",
                    T::COLLECTION,
                    doc.id()
                )));
            }
        }
        drop(seen);

        stored.extend_from_slice(docs);
        Ok(docs.len() as u64)
    }

    async fn find_all(&self) -> Result<Vec<T>, RepositoryError> {
        self.record_operation();
        Ok(self.docs.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, RepositoryError> {
        self.record_operation();
        Ok(self
            .docs
            .read()
            .await
            .iter()
            .find(|doc| doc.id() == id)
            .cloned())
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<T>, RepositoryError> {
        self.record_operation();
        let docs = self.docs.read().await;
        for doc in docs.iter() {
            if filter.matches(&serde_json::to_value(doc)?) {
                return Ok(Some(doc.clone()));
            }
        }
        Ok(None)
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<T>, RepositoryError> {
        self.record_operation();
        let docs = self.docs.read().await;
        Self::filtered(&docs, filter)
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        self.record_operation();
        let mut docs = self.docs.write().await;
        let removed = docs.len() as u64;
        docs.clear();
        Ok(removed)
    }
}
