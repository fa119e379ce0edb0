// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Classroom API - Token-Authenticated Class and Student Records
//!
//! A small REST service that issues HS256 session tokens for a single
//! configured account and requires them on every other endpoint.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers and router (Axum)
//! - `auth` - Token issuance and the validation gateway
//! - `config` - Environment configuration
//! - `store` - In-memory class and student records

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
pub mod telemetry;
