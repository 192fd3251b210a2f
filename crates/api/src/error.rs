//! Unified resolver error handling with Sentry integration.
//!
//! Resolvers collect their failures into [`ApiError`] and hand them to the
//! GraphQL engine through [`IntoFieldResult`], which attaches an
//! `extensions.code` and reports store failures to Sentry before they reach
//! the client.

use async_graphql::ErrorExtensions;
use thiserror::Error;

use quarry_core::ScalarError;

use crate::db::RepositoryError;
use crate::seed::SeedError;

/// Application-level error type for resolvers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A scalar value failed coercion.
    #[error(transparent)]
    Scalar(#[from] ScalarError),

    /// Seeding was rejected or failed.
    #[error(transparent)]
    Seed(#[from] SeedError),

    /// Store operation failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ApiError {
    /// Machine-readable error code for client payloads.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Scalar(err) => err.code(),
            Self::Seed(SeedError::InvalidArgument(_)) => "INVALID_ARGUMENT",
            Self::Seed(SeedError::Repository(_)) | Self::Repository(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Whether the error is a server fault rather than bad input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Repository(_) | Self::Seed(SeedError::Repository(_))
        )
    }

    /// Capture server faults to Sentry and the log.
    fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Resolver error"
            );
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        // Don't expose internal error details to clients
        let message = if self.is_internal() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        let code = self.code();

        async_graphql::Error::new(message).extend_with(|_, extensions| {
            extensions.set("code", code.to_string());
        })
    }
}

/// Convert a fallible result into a resolver result.
pub trait IntoFieldResult<T> {
    /// Report and extend the error, if any.
    ///
    /// # Errors
    ///
    /// Returns the extended GraphQL error.
    fn into_field_result(self) -> async_graphql::Result<T>;
}

impl<T, E> IntoFieldResult<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn into_field_result(self) -> async_graphql::Result<T> {
        self.map_err(|err| {
            let err: ApiError = err.into();
            err.report();
            err.extend()
        })
    }
}
