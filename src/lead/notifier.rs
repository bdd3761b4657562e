//! Outbound notifications for captured leads.
//!
//! Delivery (mail, chat, CRM) lives behind [`LeadNotifier`]. The daemon
//! ships [`LoggingNotifier`], which writes the messages to the log and
//! reports them as not delivered.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use super::types::Lead;

#[derive(Error, Debug)]
#[error("Notification failed: {0}")]
pub struct NotifyError(pub String);

/// Outcome of a notification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No delivery channel is configured.
    Skipped,
}

#[async_trait]
pub trait LeadNotifier: Send + Sync {
    /// Tell the sales team about a new lead.
    async fn notify_admin(&self, lead: &Lead) -> Result<Delivery, NotifyError>;

    /// Acknowledge the enquiry to the client.
    async fn acknowledge_client(&self, lead: &Lead) -> Result<Delivery, NotifyError>;
}

/// Subject line for the admin notification.
#[must_use]
pub fn admin_subject(lead: &Lead) -> String {
    match &lead.property {
        Some(property) => format!(
            "Property Report Request - {} - {}",
            property.title, lead.company
        ),
        None => format!("New Space Calculator Inquiry - {}", lead.company),
    }
}

/// Plain-text body for the admin notification.
#[must_use]
pub fn admin_body(lead: &Lead) -> String {
    let mut lines = vec![
        format!("Name: {}", lead.name),
        format!("Company: {}", lead.company),
        format!("Designation: {}", lead.designation),
        format!("Phone: {}", lead.phone),
        format!("Email: {}", lead.email),
    ];

    match &lead.property {
        Some(property) => {
            lines.push(format!(
                "Requested property: {} ({})",
                property.title, property.property_code
            ));
            for (label, value) in [
                ("Location", &property.location),
                ("Area", &property.area),
                ("Price", &property.price),
                ("Type", &property.kind),
            ] {
                if !value.is_empty() {
                    lines.push(format!("{label}: {value}"));
                }
            }
            if !property.features.is_empty() {
                lines.push(format!("Features: {}", property.features.join(", ")));
            }
        }
        None => {
            lines.push(format!("Total space required: {}", lead.formatted_total_area()));
            lines.extend(lead.space_breakdown().into_iter().map(|item| format!("- {item}")));
        }
    }

    lines.push(format!("Source: {}", lead.source));
    lines.push(format!("Received: {}", lead.created_at.to_rfc3339()));
    lines.join("\n")
}

/// Subject line for the client acknowledgement.
#[must_use]
pub fn client_subject(lead: &Lead) -> String {
    if lead.property.is_some() {
        "Thank you for your property report request".to_string()
    } else {
        "Thank you for your space calculation inquiry".to_string()
    }
}

/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl LeadNotifier for LoggingNotifier {
    async fn notify_admin(&self, lead: &Lead) -> Result<Delivery, NotifyError> {
        info!(
            lead_id = %lead.id,
            subject = %admin_subject(lead),
            body = %admin_body(lead),
            "Lead notification (no delivery channel configured)"
        );
        Ok(Delivery::Skipped)
    }

    async fn acknowledge_client(&self, lead: &Lead) -> Result<Delivery, NotifyError> {
        info!(
            lead_id = %lead.id,
            to = %lead.email,
            subject = %client_subject(lead),
            "Client acknowledgement (no delivery channel configured)"
        );
        Ok(Delivery::Skipped)
    }
}
