//! # Request Handlers
//!
//! HTML page handlers for customers and pets, the read-only JSON API, and the
//! service health endpoint. Mutating handlers share the transaction helpers
//! in this module: a transaction is opened per request, committed when the
//! repository call succeeds and explicitly rolled back when it fails.

use axum::{extract::State, http::StatusCode, response::Json};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::db;
use crate::error::RepositoryError;
use crate::forms::FormError;
use crate::models::ServiceInfo;
use crate::server::AppState;

pub mod api;
pub mod customers;
pub mod flash;
pub mod pets;
pub mod views;

/// Service information and database reachability
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = ServiceInfo),
        (status = 503, description = "Database unavailable", body = ServiceInfo)
    ),
    tag = "service"
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ServiceInfo>) {
    let mut info = ServiceInfo::default();
    match db::health_check(&state.db).await {
        Ok(()) => {
            info.database = Some("ok".to_string());
            (StatusCode::OK, Json(info))
        }
        Err(err) => {
            tracing::warn!(error = %err, "Health check failed");
            info.database = Some("unavailable".to_string());
            (StatusCode::SERVICE_UNAVAILABLE, Json(info))
        }
    }
}

/// Everything a mutating page handler can fail with.
#[derive(Debug, thiserror::Error)]
pub(crate) enum MutationError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl MutationError {
    pub(crate) fn is_not_found(&self) -> bool {
        matches!(self, MutationError::Repository(RepositoryError::NotFound(_)))
    }
}

/// Opens the request-scoped transaction.
pub(crate) async fn begin(db: &DatabaseConnection) -> Result<DatabaseTransaction, RepositoryError> {
    db.begin().await.map_err(RepositoryError::database_error)
}

/// Commits on success; rolls back on failure and hands the original error back.
pub(crate) async fn settle<T>(
    txn: DatabaseTransaction,
    outcome: Result<T, RepositoryError>,
) -> Result<T, RepositoryError> {
    match outcome {
        Ok(value) => {
            txn.commit()
                .await
                .map_err(RepositoryError::database_error)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!(error = ?rollback_err, "Failed to roll back transaction");
            }
            Err(err)
        }
    }
}
