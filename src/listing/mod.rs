//! Property listings: records that carry an allocated property code.

mod error;
mod price;
mod query;
mod store;
mod types;
mod validation;

pub use error::ListingError;
pub use price::extract_numeric_price;
pub use query::{
    paginate, ListingPage, ListingQuery, Pagination, SortField, SortOrder, DEFAULT_PAGE_LIMIT,
    MAX_PAGE_LIMIT,
};
pub use store::ListingStore;
pub use types::{CreateListingOptions, Listing, ListingKind, UpdateListingOptions, DEFAULT_VIEWS_RANGE};
pub use validation::{
    validate_create, validate_update, ValidatedListing, MAX_AREA_LEN, MAX_LOCATION_LEN,
    MAX_PRICE_LEN, MAX_TITLE_LEN,
};
