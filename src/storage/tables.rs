//! Table layout of the embedded database.

use redb::TableDefinition;

/// prefix → (last issued sequence, updated-at unix millis)
pub const SEQUENCE_COUNTERS: TableDefinition<'static, &'static str, (u64, i64)> =
    TableDefinition::new("sequence_counters");

/// listing id → JSON-encoded listing record
pub const LISTINGS: TableDefinition<'static, &'static str, &'static [u8]> =
    TableDefinition::new("listings");

/// property code → listing id. Enforces code uniqueness across listings.
pub const LISTING_CODES: TableDefinition<'static, &'static str, &'static str> =
    TableDefinition::new("listing_property_codes");

/// lead id → JSON-encoded lead record
pub const LEADS: TableDefinition<'static, &'static str, &'static [u8]> = TableDefinition::new("leads");
