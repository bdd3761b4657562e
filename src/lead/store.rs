use std::sync::Arc;

use chrono::Utc;
use redb::{Database, ReadableTable};
use tracing::{debug, info, warn};

use super::error::LeadError;
use super::notifier::{Delivery, LeadNotifier};
use super::query::{LeadPage, LeadQuery};
use super::types::{CreateLeadOptions, Lead, LeadStatus, SpaceRequirements, UpdateLeadOptions};
use super::validation::{validate_create, validate_update, LeadPatch, LeadRequest};
use crate::storage::tables::LEADS;
use crate::storage::Storage;

/// Captured leads, kept in the listings database.
#[derive(Clone)]
pub struct LeadStore {
    storage: Storage,
    notifier: Arc<dyn LeadNotifier>,
}

impl std::fmt::Debug for LeadStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadStore")
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

fn decode(bytes: &[u8]) -> Result<Lead, LeadError> {
    Ok(serde_json::from_slice(bytes)?)
}

fn write_one(db: &Database, lead: &Lead) -> Result<(), LeadError> {
    let bytes = serde_json::to_vec(lead)?;
    let txn = db.begin_write()?;
    {
        let mut table = txn.open_table(LEADS)?;
        table.insert(lead.id.as_str(), bytes.as_slice())?;
    }
    txn.commit()?;
    Ok(())
}

fn read_one(db: &Database, id: &str) -> Result<Lead, LeadError> {
    let txn = db.begin_read()?;
    let table = txn.open_table(LEADS)?;
    let bytes = table
        .get(id)?
        .map(|guard| guard.value().to_vec())
        .ok_or_else(|| LeadError::not_found(id))?;
    decode(&bytes)
}

fn read_all(db: &Database) -> Result<Vec<Lead>, LeadError> {
    let txn = db.begin_read()?;
    let table = txn.open_table(LEADS)?;

    let mut leads = Vec::new();
    for entry in table.iter()? {
        let (_, value) = entry?;
        leads.push(decode(value.value())?);
    }
    Ok(leads)
}

/// Read-modify-write of one lead inside a single write transaction.
fn modify_one<F>(db: &Database, id: &str, change: F) -> Result<Lead, LeadError>
where
    F: FnOnce(&mut Lead),
{
    let txn = db.begin_write()?;
    let lead = {
        let mut table = txn.open_table(LEADS)?;
        let bytes = table
            .get(id)?
            .map(|guard| guard.value().to_vec())
            .ok_or_else(|| LeadError::not_found(id))?;

        let mut lead = decode(&bytes)?;
        change(&mut lead);
        lead.updated_at = Utc::now();
        let bytes = serde_json::to_vec(&lead)?;
        table.insert(id, bytes.as_slice())?;
        lead
    };
    txn.commit()?;
    Ok(lead)
}

fn apply_patch(lead: &mut Lead, patch: LeadPatch) {
    if let Some(status) = patch.status {
        lead.status = status;
    }
    if let Some(notes) = patch.notes {
        lead.notes = notes;
    }
    if let Some(follow_up_date) = patch.follow_up_date {
        lead.follow_up_date = Some(follow_up_date);
    }
}

impl LeadStore {
    #[must_use]
    pub fn new(storage: Storage, notifier: Arc<dyn LeadNotifier>) -> Self {
        Self { storage, notifier }
    }

    /// Validate and persist a lead, then notify.
    ///
    /// Notification failures are logged and never fail the capture. The
    /// lead is marked `notification_sent` only when the admin message was
    /// actually delivered.
    pub async fn create_lead(&self, options: CreateLeadOptions) -> Result<Lead, LeadError> {
        let validated = validate_create(&options)?;
        let (space_requirements, total_area, property) = match validated.request {
            LeadRequest::SpaceCalculation { space, total_area } => (space, total_area, None),
            LeadRequest::PropertyReport(property) => {
                (SpaceRequirements::default(), 0.0, Some(property))
            }
        };

        let now = Utc::now();
        let contact = validated.contact;
        let lead = Lead {
            id: uuid::Uuid::new_v4().to_string(),
            name: contact.name,
            company: contact.company,
            designation: contact.designation,
            phone: contact.phone,
            email: contact.email,
            space_requirements,
            total_area,
            source: validated.source,
            status: LeadStatus::New,
            notes: String::new(),
            follow_up_date: None,
            notification_sent: false,
            ip_address: validated.ip_address,
            property,
            created_at: now,
            updated_at: now,
        };

        let record = lead.clone();
        self.storage
            .run("create_lead", move |db| write_one(db, &record))
            .await?;
        info!(
            id = %lead.id,
            company = %lead.company,
            source = %lead.source,
            "Created lead"
        );

        Ok(self.notify(lead).await)
    }

    async fn notify(&self, mut lead: Lead) -> Lead {
        match self.notifier.notify_admin(&lead).await {
            Ok(Delivery::Sent) => {
                let id = lead.id.clone();
                match self
                    .storage
                    .run("mark_lead_notified", move |db| {
                        modify_one(db, &id, |l| l.notification_sent = true)
                    })
                    .await
                {
                    Ok(updated) => lead = updated,
                    Err(e) => warn!(id = %lead.id, error = %e, "Failed to mark lead as notified"),
                }
            }
            Ok(Delivery::Skipped) => debug!(id = %lead.id, "Admin notification skipped"),
            Err(e) => warn!(id = %lead.id, error = %e, "Admin notification failed"),
        }

        if let Err(e) = self.notifier.acknowledge_client(&lead).await {
            warn!(id = %lead.id, error = %e, "Client acknowledgement failed");
        }
        lead
    }

    pub async fn get_lead(&self, id: &str) -> Result<Lead, LeadError> {
        let id = id.to_string();
        self.storage.run("get_lead", move |db| read_one(db, &id)).await
    }

    /// Newest first, filtered by source, status and free-text search.
    pub async fn list_leads(&self, query: &LeadQuery) -> Result<LeadPage, LeadError> {
        let all = self.storage.run("list_leads", read_all).await?;
        Ok(query.apply(all))
    }

    /// Change status, notes and follow-up date. Contact and space data are
    /// fixed once captured.
    pub async fn update_lead_status(
        &self,
        id: &str,
        options: UpdateLeadOptions,
    ) -> Result<Lead, LeadError> {
        let patch = validate_update(&options)?;
        let key = id.to_string();
        let lead = self
            .storage
            .run("update_lead_status", move |db| {
                modify_one(db, &key, |lead| apply_patch(lead, patch))
            })
            .await?;
        debug!(id = %id, status = %lead.status, "Updated lead");
        Ok(lead)
    }
}
