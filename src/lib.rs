//! Mealdrop - A food donation listing backend
//!
//! This library provides the core functionality for the Mealdrop service:
//! a small HTTP API for browsing and managing donated food listings, with
//! cookie-based session tokens guarding the per-user routes.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
