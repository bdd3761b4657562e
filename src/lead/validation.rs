//! Field validation for lead capture and follow-up updates.

use chrono::{DateTime, NaiveDate, Utc};

use super::error::LeadError;
use super::types::{
    ContactInfo, CreateLeadOptions, LeadSource, LeadStatus, PropertyInterest, SpaceRequirements,
    UpdateLeadOptions,
};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_COMPANY_LEN: usize = 100;
pub const MAX_DESIGNATION_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MAX_NOTES_LEN: usize = 2000;
pub const MAX_PROPERTY_TITLE_LEN: usize = 200;
pub const MAX_PROPERTY_FIELD_LEN: usize = 100;

fn required_text(field: &str, value: &str, max_len: usize) -> Result<String, LeadError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LeadError::validation(format!("{field} is required")));
    }
    check_len(field, value, max_len)?;
    Ok(value.to_string())
}

fn check_len(field: &str, value: &str, max_len: usize) -> Result<(), LeadError> {
    if value.chars().count() > max_len {
        return Err(LeadError::validation(format!(
            "{field} cannot exceed {max_len} characters"
        )));
    }
    Ok(())
}

fn check_area(field: &str, value: f64) -> Result<f64, LeadError> {
    if !value.is_finite() || value < 0.0 {
        return Err(LeadError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(value)
}

pub fn validate_contact(contact: &ContactInfo) -> Result<ContactInfo, LeadError> {
    Ok(ContactInfo {
        name: required_text("Name", &contact.name, MAX_NAME_LEN)?,
        company: required_text("Company", &contact.company, MAX_COMPANY_LEN)?,
        designation: required_text("Designation", &contact.designation, MAX_DESIGNATION_LEN)?,
        phone: required_text("Phone", &contact.phone, MAX_PHONE_LEN)?,
        email: required_text("Email", &contact.email, MAX_EMAIL_LEN)?.to_lowercase(),
    })
}

fn validate_space(space: &SpaceRequirements) -> Result<(), LeadError> {
    for (field, area) in space.areas() {
        check_area(field, area)?;
    }
    Ok(())
}

fn validate_property(property: &PropertyInterest) -> Result<PropertyInterest, LeadError> {
    let optional = |field: &str, value: &str| -> Result<String, LeadError> {
        let value = value.trim();
        check_len(field, value, MAX_PROPERTY_FIELD_LEN)?;
        Ok(value.to_string())
    };

    Ok(PropertyInterest {
        title: required_text("Property title", &property.title, MAX_PROPERTY_TITLE_LEN)?,
        property_code: required_text(
            "Property code",
            &property.property_code,
            MAX_PROPERTY_FIELD_LEN,
        )?,
        location: optional("Property location", &property.location)?,
        area: optional("Property area", &property.area)?,
        price: optional("Property price", &property.price)?,
        kind: optional("Property type", &property.kind)?,
        features: property
            .features
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// What kind of request a lead records.
#[derive(Debug, Clone, PartialEq)]
pub enum LeadRequest {
    SpaceCalculation {
        space: SpaceRequirements,
        total_area: f64,
    },
    PropertyReport(PropertyInterest),
}

/// Create options after validation, ready to persist.
#[derive(Debug, Clone)]
pub struct ValidatedLead {
    pub contact: ContactInfo,
    pub request: LeadRequest,
    pub source: LeadSource,
    pub ip_address: Option<String>,
}

/// Validate a capture request.
///
/// A property report takes precedence over space data; a request with
/// neither is rejected. Without an explicit source the request kind picks
/// one.
pub fn validate_create(options: &CreateLeadOptions) -> Result<ValidatedLead, LeadError> {
    let contact = validate_contact(&options.contact)?;

    let request = match (&options.property, &options.space, options.total_area) {
        (Some(property), _, _) => LeadRequest::PropertyReport(validate_property(property)?),
        (None, Some(space), Some(total_area)) => {
            validate_space(space)?;
            LeadRequest::SpaceCalculation {
                space: *space,
                total_area: check_area("Total area", total_area)?,
            }
        }
        _ => {
            return Err(LeadError::validation(
                "Missing space data or property details",
            ))
        }
    };

    let source = match options.source.as_deref().map(str::trim) {
        Some(source) if !source.is_empty() => source.parse()?,
        _ => match request {
            LeadRequest::PropertyReport(_) => LeadSource::PropertyReport,
            LeadRequest::SpaceCalculation { .. } => LeadSource::SpaceCalculator,
        },
    };

    Ok(ValidatedLead {
        contact,
        request,
        source,
        ip_address: options
            .ip_address
            .as_deref()
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .map(str::to_string),
    })
}

/// Parse a follow-up date given as RFC 3339 or a bare `YYYY-MM-DD`.
pub fn parse_follow_up(value: &str) -> Result<DateTime<Utc>, LeadError> {
    let value = value.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
        .ok_or_else(|| {
            LeadError::validation("Follow-up date must be RFC 3339 or YYYY-MM-DD")
        })
}

/// A checked follow-up update. `follow_up_date` stays `None` when absent.
#[derive(Debug, Clone, Default)]
pub struct LeadPatch {
    pub status: Option<LeadStatus>,
    pub notes: Option<String>,
    pub follow_up_date: Option<DateTime<Utc>>,
}

/// Blank status and follow-up values count as absent; notes may be cleared.
pub fn validate_update(options: &UpdateLeadOptions) -> Result<LeadPatch, LeadError> {
    let status = options
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<LeadStatus>)
        .transpose()?;

    let notes = options
        .notes
        .as_deref()
        .map(|n| {
            let n = n.trim();
            check_len("Notes", n, MAX_NOTES_LEN).map(|()| n.to_string())
        })
        .transpose()?;

    let follow_up_date = options
        .follow_up_date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(parse_follow_up)
        .transpose()?;

    Ok(LeadPatch {
        status,
        notes,
        follow_up_date,
    })
}
