use super::{ApiJson, ApiPath, AppState};
use crate::app::{
    item_create, item_delete, item_delete_many, item_list, item_update, ItemCreateReq,
    ItemDeleteManyReq, ItemDeleteManyResult, ItemDto, ItemUpdateReq,
};
use crate::error::AppError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResp {
    pub message: String,
}

pub async fn create_item(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ItemCreateReq>,
) -> Result<(StatusCode, Json<ItemDto>), AppError> {
    let item = state.run(move |pool| item_create(pool, req)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<ItemDto>>, AppError> {
    state.run(item_list).await.map(Json)
}

pub async fn update_item(
    State(state): State<AppState>,
    ApiPath(item_id): ApiPath<i64>,
    ApiJson(req): ApiJson<ItemUpdateReq>,
) -> Result<Json<ItemDto>, AppError> {
    state
        .run(move |pool| item_update(pool, item_id, req))
        .await
        .map(Json)
}

pub async fn delete_item(
    State(state): State<AppState>,
    ApiPath(item_id): ApiPath<i64>,
) -> Result<Json<MessageResp>, AppError> {
    state.run(move |pool| item_delete(pool, item_id)).await?;
    Ok(Json(MessageResp {
        message: "Item deleted successfully".to_string(),
    }))
}

pub async fn delete_items(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ItemDeleteManyReq>,
) -> Result<Json<ItemDeleteManyResult>, AppError> {
    state
        .run(move |pool| item_delete_many(pool, req))
        .await
        .map(Json)
}
