//! Equipment catalog endpoints. Browsing is public; no token needed.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{Equipment, EquipmentQuery},
};

/// List equipment, optionally filtered by free text and category
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Matching equipment, in catalog order", body = Vec<Equipment>),
        (status = 400, description = "Unknown category slug")
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<Vec<Equipment>>> {
    let category = query.parsed_category().map_err(AppError::Validation)?;
    let equipment = state
        .services
        .catalog
        .search(query.q.as_deref(), category)
        .await?;
    Ok(Json(equipment))
}

/// Featured equipment for promotional placement
#[utoipa::path(
    get,
    path = "/equipment/featured",
    tag = "equipment",
    responses(
        (status = 200, description = "Featured equipment", body = Vec<Equipment>)
    )
)]
pub async fn list_featured(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.catalog.list_featured().await?;
    Ok(Json(equipment))
}

/// Get equipment details by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.catalog.get_by_id(id).await?;
    Ok(Json(equipment))
}
