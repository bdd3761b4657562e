//! Lead capture: enquiries from the space calculator, contact forms and
//! property report requests, tracked through a sales pipeline.

mod error;
mod notifier;
mod query;
mod store;
mod types;
mod validation;

pub use error::LeadError;
pub use notifier::{
    admin_body, admin_subject, client_subject, Delivery, LeadNotifier, LoggingNotifier, NotifyError,
};
pub use query::{LeadPage, LeadQuery, DEFAULT_LEAD_PAGE_LIMIT};
pub use store::LeadStore;
pub use types::{
    format_area, ConferenceRoomType, ConferenceRooms, ContactInfo, CreateLeadOptions, Lead,
    LeadSource, LeadStatus, PantryType, Pantry, PropertyInterest, Rooms, SpaceRequirements,
    UpdateLeadOptions, WorkstationType, Workstations,
};
pub use validation::{
    parse_follow_up, validate_contact, validate_create, validate_update, LeadPatch, LeadRequest,
    ValidatedLead, MAX_COMPANY_LEN, MAX_DESIGNATION_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN,
    MAX_NOTES_LEN, MAX_PHONE_LEN,
};
