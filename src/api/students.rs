// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Student management API endpoints.
//!
//! All operations sit behind the token gateway. Validation failures and
//! unknown students are reported as 400 with a short message.

use std::path::Path as FsPath;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{Student, StudentPage, StudentRequest, StudentResponse},
    state::AppState,
    store::InMemoryStore,
};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 45;

/// Accepted avatar file extensions.
const AVATAR_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

const STUDENT_NOT_FOUND: &str = "Student not found.";

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StudentQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    /// Only students of this class
    pub class_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/v1/student/load",
    params(StudentQuery),
    tag = "Students",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = StudentPage),
        (status = 400, description = "Invalid paging parameters"),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn list_students(
    _auth: Auth,
    State(state): State<AppState>,
    Query(params): Query<StudentQuery>,
) -> Result<Json<StudentPage>, ApiError> {
    let page = usize::try_from(params.page)
        .ok()
        .filter(|p| *p >= 1)
        .ok_or_else(|| ApiError::bad_request("page must be at least 1"))?;
    let page_size = usize::try_from(params.page_size)
        .ok()
        .filter(|p| *p >= 1)
        .ok_or_else(|| ApiError::bad_request("pageSize must be at least 1"))?;

    let store = state.store.read().await;
    Ok(Json(store.list_students(page, page_size, params.class_id)))
}

#[utoipa::path(
    post,
    path = "/api/v1/student/create",
    request_body = StudentRequest,
    tag = "Students",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = StudentResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn create_student(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<StudentRequest>,
) -> Result<Json<StudentResponse>, ApiError> {
    let mut store = state.store.write().await;
    validate_request(&store, &request)?;

    let student_id = store.insert_student(Student {
        student_id: Uuid::new_v4(),
        first_name: request.first_name,
        last_name: request.last_name,
        class_id: request.class_id,
        gender: request.gender,
        day_of_birth: request.day_of_birth,
        avatar: request.avatar.unwrap_or_default(),
    });

    info!(subject = %user.subject, student_id = %student_id, "Student created");

    Ok(Json(StudentResponse {
        msg: "Student created successfully.".to_string(),
        student_id: student_id.to_string(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/v1/student/update/{student_id}",
    params(
        ("student_id" = String, Path, description = "Identifier of the student to update")
    ),
    request_body = StudentRequest,
    tag = "Students",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = StudentResponse),
        (status = 400, description = "Unknown student or validation failed"),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn update_student(
    Auth(user): Auth,
    Path(student_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<StudentRequest>,
) -> Result<Json<StudentResponse>, ApiError> {
    let mut store = state.store.write().await;
    let mut student = find_student(&store, &student_id)?;
    validate_request(&store, &request)?;

    student.first_name = request.first_name;
    student.last_name = request.last_name;
    student.class_id = request.class_id;
    if request.gender != 0 {
        student.gender = request.gender;
    }
    if let Some(day_of_birth) = request.day_of_birth {
        student.day_of_birth = Some(day_of_birth);
    }
    if let Some(avatar) = request.avatar {
        student.avatar = avatar;
    }

    let student_id = student.student_id;
    store.update_student(student)?;

    info!(subject = %user.subject, student_id = %student_id, "Student updated");

    Ok(Json(StudentResponse {
        msg: "Student updated successfully.".to_string(),
        student_id: student_id.to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/student/delete/{student_id}",
    params(
        ("student_id" = String, Path, description = "Identifier of the student to delete")
    ),
    tag = "Students",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = StudentResponse),
        (status = 400, description = "Unknown student"),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn delete_student(
    Auth(user): Auth,
    Path(student_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StudentResponse>, ApiError> {
    let mut store = state.store.write().await;
    let student = find_student(&store, &student_id)?;
    store.delete_student(&student.student_id)?;

    info!(subject = %user.subject, student_id = %student.student_id, "Student deleted");

    Ok(Json(StudentResponse {
        msg: "Student deleted successfully.".to_string(),
        student_id: String::new(),
    }))
}

fn find_student(store: &InMemoryStore, raw_id: &str) -> Result<Student, ApiError> {
    Uuid::parse_str(raw_id)
        .ok()
        .and_then(|id| store.get_student(&id))
        .ok_or_else(|| ApiError::bad_request(STUDENT_NOT_FOUND))
}

fn validate_request(store: &InMemoryStore, request: &StudentRequest) -> Result<(), ApiError> {
    if request.first_name.trim().is_empty() {
        return Err(ApiError::bad_request("First name is required."));
    }
    if request.last_name.trim().is_empty() {
        return Err(ApiError::bad_request("Last name is required."));
    }
    if !store.class_exists(&request.class_id) {
        return Err(ApiError::bad_request("ClassId is invalid."));
    }
    if let Some(avatar) = request.avatar.as_deref() {
        if !avatar.is_empty() && !is_valid_image_format(avatar) {
            return Err(ApiError::bad_request(
                "Avatar must be a jpg, jpeg or png image.",
            ));
        }
    }
    Ok(())
}

fn is_valid_image_format(avatar: &str) -> bool {
    FsPath::new(avatar)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            AVATAR_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use axum::http::StatusCode;
    use chrono::{TimeZone, Utc};

    fn auth() -> Auth {
        Auth(AuthenticatedUser {
            subject: "admin".to_string(),
            token_id: "jti".to_string(),
            issued_at: None,
            expires_at: Utc::now(),
            issuer: None,
            audience: None,
        })
    }

    fn request(class_id: Uuid) -> StudentRequest {
        StudentRequest {
            first_name: "An".to_string(),
            last_name: "Nguyen".to_string(),
            class_id,
            gender: 1,
            day_of_birth: None,
            avatar: Some("avatars/an.PNG".to_string()),
        }
    }

    async fn state_with_class() -> (AppState, Uuid) {
        let state = AppState::default();
        let class_id = state.store.write().await.insert_class("10A1").class_id;
        (state, class_id)
    }

    #[test]
    fn avatar_extensions() {
        assert!(is_valid_image_format("a.jpg"));
        assert!(is_valid_image_format("https://cdn.example.com/x/a.JPEG"));
        assert!(is_valid_image_format("a.png"));
        assert!(!is_valid_image_format("a.gif"));
        assert!(!is_valid_image_format("noextension"));
    }

    #[tokio::test]
    async fn create_student_success() {
        let (state, class_id) = state_with_class().await;

        let Json(response) = create_student(auth(), State(state.clone()), Json(request(class_id)))
            .await
            .expect("student creation succeeds");

        let id = Uuid::parse_str(&response.student_id).unwrap();
        let stored = state.store.read().await.get_student(&id).unwrap();
        assert_eq!(stored.last_name, "Nguyen");
        assert_eq!(stored.avatar, "avatars/an.PNG");
    }

    #[tokio::test]
    async fn create_student_validation() {
        let (state, class_id) = state_with_class().await;

        let mut blank_name = request(class_id);
        blank_name.first_name = "  ".to_string();
        let mut unknown_class = request(class_id);
        unknown_class.class_id = Uuid::new_v4();
        let mut bad_avatar = request(class_id);
        bad_avatar.avatar = Some("photo.bmp".to_string());

        for invalid in [blank_name, unknown_class, bad_avatar] {
            let err = create_student(auth(), State(state.clone()), Json(invalid))
                .await
                .unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
        assert_eq!(state.store.read().await.list_students(1, 45, None).total_items, 0);
    }

    #[tokio::test]
    async fn list_students_rejects_bad_paging() {
        let state = AppState::default();
        for (page, page_size) in [(0, 45), (1, 0), (-1, 10)] {
            let err = list_students(
                auth(),
                State(state.clone()),
                Query(StudentQuery {
                    page,
                    page_size,
                    class_id: None,
                }),
            )
            .await
            .unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn update_student_keeps_omitted_fields() {
        let (state, class_id) = state_with_class().await;
        let birthday = Utc.with_ymd_and_hms(2010, 5, 1, 0, 0, 0).unwrap();
        let mut original = request(class_id);
        original.gender = 2;
        original.day_of_birth = Some(birthday);
        let Json(created) = create_student(auth(), State(state.clone()), Json(original))
            .await
            .unwrap();

        let update = StudentRequest {
            first_name: "Binh".to_string(),
            last_name: "Tran".to_string(),
            class_id,
            gender: 0,
            day_of_birth: None,
            avatar: None,
        };
        let Json(updated) = update_student(
            auth(),
            Path(created.student_id.clone()),
            State(state.clone()),
            Json(update),
        )
        .await
        .expect("update succeeds");
        assert_eq!(updated.student_id, created.student_id);

        let id = Uuid::parse_str(&created.student_id).unwrap();
        let stored = state.store.read().await.get_student(&id).unwrap();
        assert_eq!(stored.first_name, "Binh");
        assert_eq!(stored.last_name, "Tran");
        assert_eq!(stored.gender, 2);
        assert_eq!(stored.day_of_birth, Some(birthday));
        assert_eq!(stored.avatar, "avatars/an.PNG");
    }

    #[tokio::test]
    async fn update_unknown_student_is_bad_request() {
        let (state, class_id) = state_with_class().await;
        for id in ["not-a-uuid".to_string(), Uuid::new_v4().to_string()] {
            let err = update_student(auth(), Path(id), State(state.clone()), Json(request(class_id)))
                .await
                .unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.message, STUDENT_NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn delete_student_success() {
        let (state, class_id) = state_with_class().await;
        let Json(created) = create_student(auth(), State(state.clone()), Json(request(class_id)))
            .await
            .unwrap();

        let Json(response) = delete_student(auth(), Path(created.student_id.clone()), State(state.clone()))
            .await
            .expect("deletion succeeds");
        assert!(response.student_id.is_empty());

        let err = delete_student(auth(), Path(created.student_id), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
