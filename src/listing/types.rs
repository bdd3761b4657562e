use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ListingError;
use crate::code::PropertyCode;

/// Default `[min, max]` range of simulated view counts shown on a listing.
pub const DEFAULT_VIEWS_RANGE: [u64; 2] = [100, 300];

/// Property types a listing may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ListingKind {
    Office,
    Retail,
    #[serde(rename = "Co-Working")]
    CoWorking,
}

impl ListingKind {
    pub const ALL: [ListingKind; 3] = [ListingKind::Office, ListingKind::Retail, ListingKind::CoWorking];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ListingKind::Office => "Office",
            ListingKind::Retail => "Retail",
            ListingKind::CoWorking => "Co-Working",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ListingKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ListingError::validation("Type must be Office, Retail, or Co-Working"))
    }
}

/// A stored listing.
///
/// `property_code` is assigned once at creation and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ListingKind,
    pub location: String,
    pub property_code: PropertyCode,
    pub area: String,
    pub price: String,
    pub price_numeric: f64,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub views_range: [u64; 2],
    pub is_active: bool,
    pub featured: bool,
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Options for creating a listing. The property code is always generated.
#[derive(Debug, Clone, Default)]
pub struct CreateListingOptions {
    pub title: String,
    pub kind: String,
    pub location: String,
    pub area: String,
    pub price: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
    /// `None` uses [`DEFAULT_VIEWS_RANGE`].
    pub views_range: Option<[u64; 2]>,
}

/// Partial update. Property codes are immutable, so there is no field for one.
#[derive(Debug, Clone, Default)]
pub struct UpdateListingOptions {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub location: Option<String>,
    pub area: Option<String>,
    pub price: Option<String>,
    pub images: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub views_range: Option<[u64; 2]>,
    pub is_active: Option<bool>,
    pub featured: Option<bool>,
}
