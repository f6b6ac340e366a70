// --- File: crates/reservas_common/src/handlers.rs ---
use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::filter::CategoryFilter;
use crate::models::Room;

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct CategoryTab {
    pub value: &'static str,
    pub label: &'static str,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub rooms: Vec<Room>,
    /// Slot start times, "HH:MM".
    pub time_slots: Vec<String>,
    pub categories: Vec<CategoryTab>,
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Rooms, slots and category tabs. Public, no session needed.
pub async fn catalog_handler(State(catalog): State<Arc<Catalog>>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        rooms: catalog.rooms().to_vec(),
        time_slots: catalog
            .time_slots()
            .iter()
            .map(|t| t.format("%H:%M").to_string())
            .collect(),
        categories: CategoryFilter::tabs()
            .into_iter()
            .map(|tab| CategoryTab {
                value: tab.as_str(),
                label: tab.label(),
            })
            .collect(),
    })
}
