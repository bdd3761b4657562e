//! Property code derivation and formatting.
//!
//! Everything in this module is pure: no I/O, no shared state. The only
//! mutation on the allocation path lives in [`crate::sequence`].

mod error;
mod property_code;
mod tables;

pub use error::CodeError;
pub use property_code::{
    format_sequence, is_location_code, is_type_code, is_valid_property_code, prefix_for,
    PropertyCode, PROPERTY_CODE_REGEX, SEQUENCE_MIN_WIDTH,
};
pub use tables::{CodeTables, DEFAULT_LOCATION_CODES, DEFAULT_TYPE_CODES};
