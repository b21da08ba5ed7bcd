//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles CRUD operations for a specific entity.

pub mod food;

pub use food::{FoodRepository, SqlxFoodRepository};
