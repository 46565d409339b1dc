//! Deal model: the single entity held by the record store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Currency stamped on every new deal unless the caller supplies one.
pub const DEFAULT_CURRENCY: &str = "nzh";

/// A food deal offered by a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    /// Opaque generated identifier, unique within the store.
    pub id: String,
    /// Creation timestamp, serialized as RFC 3339.
    pub created_at: DateTime<Utc>,
    /// Dish or offer title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Price as a decimal string, e.g. `"7.50"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Restaurant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<String>,
    /// Currency code the price is quoted in.
    pub currency: String,
}

impl Deal {
    /// Build a deal from a partial set of fields, merged over the defaults.
    #[must_use]
    pub fn new(id: String, created_at: DateTime<Utc>, values: DealMutation) -> Self {
        let mut deal = Self {
            id,
            created_at,
            title: None,
            price: None,
            restaurant: None,
            currency: DEFAULT_CURRENCY.to_owned(),
        };
        values.apply_to(&mut deal);
        deal
    }
}

/// Partial field set used to create or update a deal.
///
/// Absent fields leave the target untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DealMutation {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// New restaurant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<String>,
    /// New currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl DealMutation {
    /// Shorthand for the common title/restaurant/price triple.
    #[must_use]
    pub fn new(title: &str, restaurant: &str, price: &str) -> Self {
        Self {
            title: Some(title.to_owned()),
            price: Some(price.to_owned()),
            restaurant: Some(restaurant.to_owned()),
            currency: None,
        }
    }

    /// Overwrite the fields of `deal` that this mutation supplies.
    pub fn apply_to(self, deal: &mut Deal) {
        if let Some(title) = self.title {
            deal.title = Some(title);
        }
        if let Some(price) = self.price {
            deal.price = Some(price);
        }
        if let Some(restaurant) = self.restaurant {
            deal.restaurant = Some(restaurant);
        }
        if let Some(currency) = self.currency {
            deal.currency = currency;
        }
    }
}
