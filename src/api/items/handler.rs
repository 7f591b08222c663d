//! Item API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::Item;
use crate::pricing::{self, PriceRequest, PriceResult};
use crate::search::{self, SearchPage, SearchQuery, SortDir};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, Copy, Deserialize)]
enum ItemSortBy {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "createdAt")]
    CreatedAt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    sort: Option<ItemSortBy>,
    order: Option<SortDir>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: u32,
    pub items: Vec<Item>,
}

/// GET /items - paginated listing of active items
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ItemPage>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(state.config.default_page_limit)
        .clamp(1, state.config.max_page_limit);

    let mut items = state.store.active_items();
    let ordering = query.sort.unwrap_or(ItemSortBy::CreatedAt);
    items.sort_by(|a, b| {
        let cmp = match ordering {
            ItemSortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            ItemSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        match query.order.unwrap_or(SortDir::Asc) {
            SortDir::Asc => cmp,
            SortDir::Desc => cmp.reverse(),
        }
    });

    let total = items.len();
    let total_pages = (total as u32).div_ceil(limit);
    let offset = (page as usize)
        .saturating_sub(1)
        .saturating_mul(limit as usize);
    let items = items
        .into_iter()
        .skip(offset)
        .take(limit as usize)
        .collect();

    Ok(Json(ItemPage {
        page,
        limit,
        total,
        total_pages,
        items,
    }))
}

/// GET /items/search - filtered catalog search
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<SearchPage>> {
    let limit = query.limit(state.config.default_page_limit, state.config.max_page_limit);
    let details = state.store.visible_item_details();
    Ok(Json(search::search(&details, &query, Utc::now(), limit)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuery {
    usage: Option<u32>,
    /// Comma-separated add-on ids
    addon_ids: Option<String>,
    /// Evaluation instant override, RFC 3339; defaults to now
    at: Option<DateTime<Utc>>,
}

/// GET /items/{id}/price - resolve the effective price
pub async fn price(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<PriceQuery>,
) -> AppResult<Json<PriceResult>> {
    let selected_addon_ids = query
        .addon_ids
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let request = PriceRequest {
        usage: query.usage,
        selected_addon_ids,
        now: query.at.unwrap_or_else(Utc::now),
    };

    let result = pricing::resolve_item_price(&state.store, &id, &request)?;
    Ok(Json(result))
}

/// PATCH /items/delete/{id} - soft-delete an item
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    state.store.deactivate_item(&id).map_err(AppError::from)?;
    Ok(Json(serde_json::json!({ "message": "Item deleted" })))
}
