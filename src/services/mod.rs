//! Services layer - Business logic
//!
//! This module contains the business logic services for the Mealdrop backend.
//! Services are responsible for:
//! - Implementing business rules
//! - Coordinating between the API layer and repositories
//! - Handling error cases

pub mod food;
pub mod session;

pub use food::{FoodService, FoodServiceError};
pub use session::{SessionError, SessionService, TOKEN_COOKIE};
