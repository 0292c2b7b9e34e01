use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::store::shopping_cart::load_shopping_list;
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use foodgram_core::{render_shopping_list, ExportFormat, ExportOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DownloadParams {
    /// `txt` (default) or `pdf`
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmptyShoppingListResponse {
    pub detail: String,
}

#[utoipa::path(
    get,
    path = "/api/recipes/download_shopping_cart",
    tag = "recipes",
    params(DownloadParams),
    responses(
        (
            status = 200,
            description = "Merged shopping list attachment (text/plain or application/pdf); \
                JSON `{detail}` when the cart is empty",
            content_type = "application/octet-stream"
        ),
        (status = 400, description = "Unsupported format", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn download_shopping_cart(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = match params.format.as_deref() {
        Some(raw) => raw.parse()?,
        None => ExportFormat::default(),
    };

    let mut conn = get_conn!(pool);
    let entries = load_shopping_list(&mut conn, user.id)?;

    match render_shopping_list(&entries, format)? {
        ExportOutcome::Empty(notice) => Ok(Json(EmptyShoppingListResponse {
            detail: notice.to_string(),
        })
        .into_response()),
        ExportOutcome::Document(document) => {
            tracing::info!(
                user_id = %user.id,
                %format,
                entries = entries.len(),
                "Exported shopping list"
            );
            Ok((
                [
                    (header::CONTENT_TYPE, document.content_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", document.filename),
                    ),
                ],
                document.bytes,
            )
                .into_response())
        }
    }
}
