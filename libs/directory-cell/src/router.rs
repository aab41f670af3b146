// libs/directory-cell/src/router.rs
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::models::{CLINICS, DOCTORS};

async fn list_doctors() -> Json<Value> {
    Json(json!({ "doctors": DOCTORS }))
}

async fn list_clinics() -> Json<Value> {
    Json(json!({ "clinics": CLINICS }))
}

pub fn directory_routes() -> Router {
    Router::new()
        .route("/doctors", get(list_doctors))
        .route("/clinics", get(list_clinics))
}
