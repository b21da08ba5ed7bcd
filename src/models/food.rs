//! Food listing model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A donated food listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub food_name: String,
    pub food_image: Option<String>,
    pub food_quantity: Option<i64>,
    pub pickup_location: Option<String>,
    pub expired_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub donor_name: Option<String>,
    pub donor_image: Option<String>,
    pub donor_email: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Food {
    /// Build a new listing from client input. The id is assigned by the
    /// repository on insert.
    pub fn new(input: CreateFoodInput) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            food_name: input.food_name,
            food_image: input.food_image,
            food_quantity: input.food_quantity,
            pickup_location: input.pickup_location,
            expired_date: input.expired_date,
            notes: input.notes,
            donor_name: input.donor_name,
            donor_image: input.donor_image,
            donor_email: input.donor_email,
            status: input.status.unwrap_or_else(|| "available".to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a listing
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFoodInput {
    pub food_name: String,
    #[serde(default)]
    pub food_image: Option<String>,
    #[serde(default)]
    pub food_quantity: Option<i64>,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub expired_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub donor_name: Option<String>,
    #[serde(default)]
    pub donor_image: Option<String>,
    pub donor_email: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Input for partially updating a listing. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFoodInput {
    pub food_name: Option<String>,
    pub food_image: Option<String>,
    pub food_quantity: Option<i64>,
    pub pickup_location: Option<String>,
    pub expired_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub donor_name: Option<String>,
    pub donor_image: Option<String>,
    pub status: Option<String>,
}

/// Sort direction for the public browse listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a client-supplied sort parameter. Exactly "asc" sorts
    /// ascending; any other value sorts descending.
    pub fn parse(s: &str) -> Self {
        if s == "asc" {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

/// Filter for the public browse listing
#[derive(Debug, Clone, Default)]
pub struct FoodFilter {
    /// Case-insensitive substring match on food_name
    pub search: Option<String>,
    /// Exact match on status
    pub status: Option<String>,
    /// Sort by expired_date; unsorted when absent
    pub sort: Option<SortOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        // Only the exact "asc" value sorts ascending
        assert_eq!(SortOrder::parse("ASC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("anything"), SortOrder::Desc);
        assert_eq!(SortOrder::parse(""), SortOrder::Desc);
    }

    #[test]
    fn test_new_food_defaults_status() {
        let input = CreateFoodInput {
            food_name: "Rice".to_string(),
            food_image: None,
            food_quantity: Some(3),
            pickup_location: None,
            expired_date: None,
            notes: None,
            donor_name: None,
            donor_image: None,
            donor_email: "donor@example.com".to_string(),
            status: None,
        };

        let food = Food::new(input);
        assert_eq!(food.status, "available");
        assert_eq!(food.id, 0);
    }
}
