// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize`, `Deserialize`, and `ToSchema`
//! for automatic JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Login**: Credential submission and the in-band `Code`/`Data` outcome
//! - **Classes**: Read-only class records
//! - **Students**: Student records, their create/update payload, and pages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// =============================================================================
// Login Models
// =============================================================================

/// Login request body.
///
/// Both fields are optional on the wire; an absent field never matches a
/// configured value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default, alias = "Username")]
    pub username: Option<String>,
    #[serde(default, alias = "Password")]
    pub password: Option<String>,
}

/// Outcome code carried in [`LoginResponse::code`].
pub const LOGIN_SUCCESS: u8 = 1;
pub const LOGIN_FAILURE: u8 = 2;

/// Login response, always sent with HTTP 200.
///
/// `Code` is 1 with the token in `Data`, or 2 with a message in `Data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[serde(rename = "Code")]
    pub code: u8,
    #[serde(rename = "Data")]
    pub data: String,
}

impl LoginResponse {
    pub fn success(token: impl Into<String>) -> Self {
        Self {
            code: LOGIN_SUCCESS,
            data: token.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            code: LOGIN_FAILURE,
            data: message.into(),
        }
    }
}

// =============================================================================
// Class Models
// =============================================================================

/// A class students belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub class_id: Uuid,
    pub fullname: String,
}

// =============================================================================
// Student Models
// =============================================================================

/// Default gender code for new students.
pub const DEFAULT_GENDER: i16 = 1;

fn default_gender() -> i16 {
    DEFAULT_GENDER
}

/// A stored student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub class_id: Uuid,
    pub gender: i16,
    pub day_of_birth: Option<DateTime<Utc>>,
    /// Image path or URL (`.jpg`, `.jpeg` or `.png`), may be empty.
    pub avatar: String,
}

/// Payload for creating or updating a student.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Must reference an existing class.
    #[serde(default)]
    pub class_id: Uuid,
    /// On update, 0 keeps the stored value.
    #[serde(default = "default_gender")]
    pub gender: i16,
    #[serde(default)]
    pub day_of_birth: Option<DateTime<Utc>>,
    /// On update, absent keeps the stored value.
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Result of a student mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub msg: String,
    /// Empty for deletions.
    pub student_id: String,
}

/// One page of students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentPage {
    #[serde(rename = "totalItems")]
    pub total_items: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
    #[serde(rename = "currentPage")]
    pub current_page: usize,
    #[serde(rename = "pagesize")]
    pub page_size: usize,
    pub data: Vec<Student>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_uses_pascal_case_keys() {
        let json = serde_json::to_value(LoginResponse::success("tok")).unwrap();
        assert_eq!(json, serde_json::json!({"Code": 1, "Data": "tok"}));

        let json = serde_json::to_value(LoginResponse::failure("nope")).unwrap();
        assert_eq!(json["Code"], 2);
    }

    #[test]
    fn login_request_accepts_either_casing() {
        let lower: LoginRequest =
            serde_json::from_str(r#"{"username":"a","password":"b"}"#).unwrap();
        let pascal: LoginRequest =
            serde_json::from_str(r#"{"Username":"a","Password":"b"}"#).unwrap();
        assert_eq!(lower.username, pascal.username);
        assert_eq!(lower.password.as_deref(), Some("b"));

        let empty: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.username.is_none());
    }

    #[test]
    fn student_request_defaults() {
        let request: StudentRequest =
            serde_json::from_str(r#"{"firstName":"An","lastName":"Nguyen"}"#).unwrap();
        assert_eq!(request.gender, DEFAULT_GENDER);
        assert!(request.class_id.is_nil());
        assert!(request.avatar.is_none());
        assert!(request.day_of_birth.is_none());
    }

    #[test]
    fn student_page_field_names() {
        let page = StudentPage {
            total_items: 0,
            total_pages: 0,
            current_page: 1,
            page_size: 45,
            data: vec![],
        };
        let json = serde_json::to_value(page).unwrap();
        for key in ["totalItems", "totalPages", "currentPage", "pagesize", "data"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
