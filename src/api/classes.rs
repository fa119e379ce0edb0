// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{auth::Auth, models::ClassRecord, state::AppState};

#[utoipa::path(
    get,
    path = "/api/v1/class/load",
    tag = "Classes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = [ClassRecord]),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn list_classes(_auth: Auth, State(state): State<AppState>) -> Json<Vec<ClassRecord>> {
    let store = state.store.read().await;
    Json(store.list_classes())
}
