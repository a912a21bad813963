use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use bytes::Bytes;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{Item, UpdateItem};
use crate::services::AppState;
use crate::storage::object_key;

struct UploadedImage {
    filename: String,
    content_type: String,
    bytes: Bytes,
}

struct CreateItemForm {
    name: String,
    quantity: i64,
    image: Option<UploadedImage>,
}

impl CreateItemForm {
    /// Decode the multipart body. Only the request shape is checked here:
    /// `name` and `quantity` must be present and `quantity` must parse.
    async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut name = None;
        let mut quantity = None;
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::InvalidInput(format!("malformed multipart body: {}", e)))?
        {
            let field_name = field.name().map(str::to_string);
            match field_name.as_deref() {
                Some("name") => {
                    name = Some(field.text().await.map_err(|e| {
                        AppError::InvalidInput(format!("unreadable name field: {}", e))
                    })?);
                }
                Some("quantity") => {
                    let raw = field.text().await.map_err(|e| {
                        AppError::InvalidInput(format!("unreadable quantity field: {}", e))
                    })?;
                    quantity = Some(raw.trim().parse::<i64>().map_err(|_| {
                        AppError::InvalidInput(format!("quantity must be a number, got {:?}", raw))
                    })?);
                }
                Some("image") => {
                    let filename = field.file_name().unwrap_or("upload").to_string();
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::InvalidInput(format!("unreadable image field: {}", e))
                    })?;
                    image = Some(UploadedImage {
                        filename,
                        content_type,
                        bytes,
                    });
                }
                _ => {}
            }
        }

        let name = name.ok_or_else(|| AppError::InvalidInput("name is required".to_string()))?;
        let quantity =
            quantity.ok_or_else(|| AppError::InvalidInput("quantity is required".to_string()))?;

        Ok(Self {
            name,
            quantity,
            image,
        })
    }
}

/// POST /api/items
///
/// If a file is present it is uploaded first; the item is never inserted
/// when the upload fails.
pub async fn create_item(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Item>)> {
    let form = CreateItemForm::from_multipart(multipart).await?;

    let image_url = match form.image {
        Some(file) => {
            tracing::info!("file received: {}", file.filename);
            let key = object_key(&file.filename);
            state
                .storage
                .upload(&key, &file.bytes, &file.content_type)
                .await?
        }
        None => String::new(),
    };

    let item = state.items.create(form.name, form.quantity, image_url).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/items
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    let items = state.items.list_all().await?;
    Ok(Json(items))
}

/// PUT /api/items/:id
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateItem>,
) -> AppResult<Json<Item>> {
    let item = state
        .items
        .update_by_id(&id, payload.name, payload.quantity)
        .await?;
    Ok(Json(item))
}

/// DELETE /api/items/:id
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    state.items.delete_by_id(&id).await?;
    Ok(Json(json!({ "message": "Item deleted successfully" })))
}
