// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{gateway_middleware, AuthenticatedUser},
    models::{
        ClassRecord, LoginRequest, LoginResponse, Student, StudentPage, StudentRequest,
        StudentResponse,
    },
    state::AppState,
};

pub mod classes;
pub mod login;
pub mod students;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/login", post(login::login))
        .route("/class/load", get(classes::list_classes))
        .route("/student/load", get(students::list_students))
        .route("/student/create", post(students::create_student))
        .route(
            "/student/update/{student_id}",
            put(students::update_student),
        )
        .route(
            "/student/delete/{student_id}",
            delete(students::delete_student),
        )
        .with_state(state.clone());

    Router::new()
        .nest("/api/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(from_fn_with_state(state.gateway.clone(), gateway_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        login::login,
        classes::list_classes,
        students::list_students,
        students::create_student,
        students::update_student,
        students::delete_student
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            ClassRecord,
            Student,
            StudentRequest,
            StudentResponse,
            StudentPage,
            AuthenticatedUser
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Session token issuance"),
        (name = "Classes", description = "Class listing"),
        (name = "Students", description = "Student records")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
