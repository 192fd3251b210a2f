//! Per-request resolver context.
//!
//! A [`RequestContext`] is built for every GraphQL request and attached to
//! it as request data. Resolvers read their capabilities from it instead of
//! reaching for process-wide handles.

use crate::cache::SharedCache;
use crate::db::Collections;

/// Data sources available to resolvers.
#[derive(Clone)]
pub struct DataSources {
    /// Users and Orders collections.
    pub business: Collections,
}

/// Capabilities handed to every resolver for one request.
#[derive(Clone)]
pub struct RequestContext {
    /// Store access.
    pub data_sources: DataSources,
    /// Server-side key-value cache.
    pub cache: SharedCache,
}

impl RequestContext {
    /// Create a new request context.
    #[must_use]
    pub const fn new(data_sources: DataSources, cache: SharedCache) -> Self {
        Self {
            data_sources,
            cache,
        }
    }

    /// Shortcut to the business collections.
    #[must_use]
    pub const fn business(&self) -> &Collections {
        &self.data_sources.business
    }
}
