pub mod code_allocate;
pub mod code_stats;
pub mod daemon;
pub mod lead_create;
pub mod lead_list;
pub mod lead_read;
pub mod lead_update;
pub mod listing_create;
pub mod listing_delete;
pub mod listing_facets;
pub mod listing_list;
pub mod listing_read;
pub mod listing_update;
