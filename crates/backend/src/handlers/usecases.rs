use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use contracts::usecases::common::UseCaseError;
use contracts::usecases::u508_build_picking_list::{ExportTable, PickingRequest, PickingResponse};
use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::shared::config::{Config, DictionaryCacheConfig, ExportConfig};
use crate::usecases::u508_build_picking_list::PickingExecutor;

// ============================================================================
// UseCase u508: Build picking list
// ============================================================================

static PICKING_EXECUTOR: OnceCell<Arc<PickingExecutor>> = OnceCell::new();

/// Configure the executor from config; called once at startup
pub fn init(config: &Config) {
    let executor = PickingExecutor::from_settings(&config.dictionary_cache, &config.export);
    if PICKING_EXECUTOR.set(Arc::new(executor)).is_err() {
        tracing::warn!("u508 executor already initialized");
    }
}

fn picking_executor() -> Arc<PickingExecutor> {
    PICKING_EXECUTOR
        .get_or_init(|| {
            Arc::new(PickingExecutor::from_settings(
                &DictionaryCacheConfig::default(),
                &ExportConfig::default(),
            ))
        })
        .clone()
}

type ErrorResponse = (StatusCode, Json<UseCaseError>);

fn error_response(err: UseCaseError) -> ErrorResponse {
    let status = match err.code.as_str() {
        UseCaseError::CONFIGURATION => StatusCode::UNPROCESSABLE_ENTITY,
        UseCaseError::VALIDATION => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

fn join_error(e: tokio::task::JoinError) -> ErrorResponse {
    tracing::error!("u508 task failed: {}", e);
    error_response(UseCaseError::internal(format!("Processing task failed: {}", e)))
}

/// POST /api/u508/picking/process
pub async fn u508_process(
    Json(request): Json<PickingRequest>,
) -> Result<Json<PickingResponse>, ErrorResponse> {
    let executor = picking_executor();
    let result = tokio::task::spawn_blocking(move || executor.process(&request))
        .await
        .map_err(join_error)?;

    match result {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to build picking list: {}", e);
            Err(error_response(e))
        }
    }
}

/// POST /api/u508/picking/export/:table
pub async fn u508_export(
    Path(table): Path<String>,
    Json(request): Json<PickingRequest>,
) -> Result<Response, ErrorResponse> {
    let table = ExportTable::from_path(&table).ok_or_else(|| {
        error_response(UseCaseError::validation(format!(
            "Unknown table '{}', expected 'detail' or 'summary'",
            table
        )))
    })?;

    let executor = picking_executor();
    let result = tokio::task::spawn_blocking(move || executor.export_csv(&request, table))
        .await
        .map_err(join_error)?;

    match result {
        Ok(bytes) => Ok((
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", table.file_name()),
                ),
            ],
            bytes,
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Failed to export picking list: {}", e);
            Err(error_response(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            error_response(UseCaseError::configuration("x")).0,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            error_response(UseCaseError::validation("x")).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(UseCaseError::internal("x")).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
