//! Data models
//!
//! This module contains the data structures used throughout the Mealdrop
//! backend: the food listing entity with its input types, and the
//! authenticated principal attached to requests by the auth middleware.

mod food;
mod identity;

pub use food::{CreateFoodInput, Food, FoodFilter, SortOrder, UpdateFoodInput};
pub use identity::Identity;
