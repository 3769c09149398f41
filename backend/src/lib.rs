//! # Availability Service
//!
//! Shift availability tracking backend.
//!
//! Users submit which day/time-slot shifts they can cover. The service lists a
//! user's availability, finds who is on call for a shift, and deletes entries
//! by id. Rows live in a single `availability` table; the backend exposes a
//! REST API via Axum and serves the frontend bundle.
//!
//! ## Architecture
//!
//! - [`api`]: Domain types and response DTOs
//! - [`db`]: Repository pattern, storage backends, configuration, and services
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;

pub mod db;

#[cfg(feature = "http-server")]
pub mod http;
