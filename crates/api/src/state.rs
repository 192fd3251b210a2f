//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::{MokaCache, SharedCache};
use crate::config::ApiConfig;
use crate::context::{DataSources, RequestContext};
use crate::db::Collections;
use crate::graphql::{self, QuarrySchema};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and owns the process-wide
/// resources each request context is built from.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: Option<PgPool>,
    data_sources: DataSources,
    cache: SharedCache,
    schema: QuarrySchema,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `pool` - `PostgreSQL` connection pool; `None` selects the in-memory store
    #[must_use]
    pub fn new(config: ApiConfig, pool: Option<PgPool>) -> Self {
        let business = pool
            .as_ref()
            .map_or_else(Collections::in_memory, Collections::postgres);

        Self::with_data_sources(config, pool, DataSources { business })
    }

    /// Create application state around already-built data sources.
    #[must_use]
    pub fn with_data_sources(
        config: ApiConfig,
        pool: Option<PgPool>,
        data_sources: DataSources,
    ) -> Self {
        let cache = MokaCache::new(config.cache).shared();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                data_sources,
                cache,
                schema: graphql::build_schema(),
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool, if any.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    /// Get a reference to the executable schema.
    #[must_use]
    pub fn schema(&self) -> &QuarrySchema {
        &self.inner.schema
    }

    /// Build the context handed to resolvers for one request.
    #[must_use]
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(self.inner.data_sources.clone(), Arc::clone(&self.inner.cache))
    }

    /// Close the database pool, waiting for checked-out connections.
    pub async fn close(&self) {
        if let Some(pool) = self.pool() {
            pool.close().await;
            tracing::info!("Database pool closed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    use super::*;

    #[tokio::test]
    async fn test_state_exposes_bind_address() {
        let config = ApiConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 4100,
            ..ApiConfig::default()
        };
        let state = AppState::new(config, None);

        assert_eq!(
            state.config().socket_addr(),
            SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 4100)
        );
        assert!(state.pool().is_none());
        state.close().await;
    }
}
