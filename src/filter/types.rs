use serde::{Deserialize, Serialize};

/// Listing document field names
pub mod fields {
    pub const ID: &str = "_id";
    pub const FOOD_NAME: &str = "food_name";
    pub const FOOD_IMAGE: &str = "food_image";
    pub const FOOD_QUANTITY: &str = "food_quantity";
    pub const PICKUP_LOCATION: &str = "pickup_location";
    pub const EXPIRED_DATE: &str = "expired_date";
    pub const ADDITIONAL_NOTES: &str = "additional_notes";
    pub const FOOD_STATUS: &str = "food_status";
    pub const DONATOR_NAME: &str = "donator_name";
    pub const DONATOR_IMAGE: &str = "donator_image";
    pub const DONATOR_EMAIL: &str = "donator_email";
    pub const USER_EMAIL: &str = "user_email";
    pub const REQUEST_DATE: &str = "request_date";

    /// Fields an edit may touch when edits are restricted
    pub const LISTING_FIELDS: &[&str] = &[
        FOOD_NAME,
        FOOD_IMAGE,
        FOOD_QUANTITY,
        PICKUP_LOCATION,
        EXPIRED_DATE,
        ADDITIONAL_NOTES,
        FOOD_STATUS,
        DONATOR_NAME,
        DONATOR_IMAGE,
        DONATOR_EMAIL,
        USER_EMAIL,
        REQUEST_DATE,
    ];
}

pub const STATUS_AVAILABLE: &str = "available";
pub const STATUS_REQUESTED: &str = "Requested";

/// Number of listings shown in the featured section
pub const FEATURED_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse the `sort` query parameter. Only `asc` and `des` are recognised;
    /// anything else means "leave the store order alone".
    pub fn from_param(param: Option<&str>) -> Option<Self> {
        match param? {
            "asc" => Some(SortDirection::Asc),
            "des" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn to_mongo(self) -> i32 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodSort {
    pub field: String,
    pub direction: SortDirection,
}
