//! # Rail Dispatch Backend
//!
//! Track allocation and conflict resolution engine for train schedules.
//!
//! This crate manages bookings of trains onto a fixed pool of station tracks.
//! Every booking occupies exactly one track for a time interval, and the
//! engine guarantees that no two bookings overlap on the same track and that
//! consecutive bookings keep a maintenance gap between them. Rejected
//! requests come back with alternative free slots instead of a bare error.
//! The backend exposes a REST API via Axum.
//!
//! ## Features
//!
//! - **Conflict Detection**: Interval overlap and maintenance-window checks
//! - **Slot Finding**: Alternative free-slot suggestions near a requested time
//! - **Recurrence**: Daily/weekly/monthly expansion of a booking into a series
//! - **Master Data**: Train and station registries backing physics checks
//! - **Audit Trail**: Before/after snapshots of every mutation
//! - **HTTP API**: RESTful endpoints for dispatch clients
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain types (bookings, intervals, trains, stations, audit)
//! - [`engine`]: Allocation rules (conflict checker, slot finder, recurrence)
//! - [`db`]: Repository pattern and persistence layer
//! - [`services`]: High-level operations combining engine and store
//! - [`http`]: Axum-based HTTP server and request handlers
//!

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod db;
pub mod engine;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
