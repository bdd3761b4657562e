use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use redb::{Database, ReadableTable, ReadableTableMetadata};
use tracing::{debug, info};

use super::error::ListingError;
use super::price::extract_numeric_price;
use super::query::{ListingPage, ListingQuery};
use super::types::{CreateListingOptions, Listing, UpdateListingOptions};
use super::validation::{validate_create, validate_update};
use crate::allocator::PropertyCodeAllocator;
use crate::stats::{CountError, ListingCounter};
use crate::storage::tables::{LISTINGS, LISTING_CODES};
use crate::storage::Storage;

/// Listing records and their property code index, kept in the same
/// database as the sequence counters.
#[derive(Debug, Clone)]
pub struct ListingStore {
    storage: Storage,
}

fn decode(bytes: &[u8]) -> Result<Listing, ListingError> {
    Ok(serde_json::from_slice(bytes)?)
}

fn insert_new(db: &Database, listing: &Listing) -> Result<(), ListingError> {
    let code = listing.property_code.to_string();
    let bytes = serde_json::to_vec(listing)?;

    let txn = db.begin_write()?;
    let duplicate = {
        let mut codes = txn.open_table(LISTING_CODES)?;
        if codes.get(code.as_str())?.is_some() {
            true
        } else {
            codes.insert(code.as_str(), listing.id.as_str())?;
            let mut listings = txn.open_table(LISTINGS)?;
            listings.insert(listing.id.as_str(), bytes.as_slice())?;
            false
        }
    };

    if duplicate {
        txn.abort()?;
        return Err(ListingError::DuplicateCode(code));
    }
    txn.commit()?;
    Ok(())
}

fn read_one(db: &Database, id: &str) -> Result<Listing, ListingError> {
    let txn = db.begin_read()?;
    let table = txn.open_table(LISTINGS)?;
    let bytes = table
        .get(id)?
        .map(|guard| guard.value().to_vec())
        .ok_or_else(|| ListingError::not_found(id))?;
    decode(&bytes)
}

fn read_all(db: &Database) -> Result<Vec<Listing>, ListingError> {
    let txn = db.begin_read()?;
    let table = txn.open_table(LISTINGS)?;

    let mut listings = Vec::new();
    for entry in table.iter()? {
        let (_, value) = entry?;
        listings.push(decode(value.value())?);
    }
    Ok(listings)
}

fn apply_patch(listing: &mut Listing, patch: UpdateListingOptions) -> Result<(), ListingError> {
    if let Some(title) = patch.title {
        listing.title = title;
    }
    if let Some(kind) = patch.kind {
        listing.kind = kind.parse()?;
    }
    if let Some(location) = patch.location {
        listing.location = location;
    }
    if let Some(area) = patch.area {
        listing.area = area;
    }
    if let Some(price) = patch.price {
        listing.price_numeric = extract_numeric_price(&price);
        listing.price = price;
    }
    if let Some(images) = patch.images {
        listing.images = images;
    }
    if let Some(features) = patch.features {
        listing.features = features;
    }
    if let Some(range) = patch.views_range {
        listing.views_range = range;
    }
    if let Some(is_active) = patch.is_active {
        listing.is_active = is_active;
    }
    if let Some(featured) = patch.featured {
        listing.featured = featured;
    }
    listing.updated_at = Utc::now();
    Ok(())
}

fn update_one(db: &Database, id: &str, patch: UpdateListingOptions) -> Result<Listing, ListingError> {
    let txn = db.begin_write()?;
    let listing = {
        let mut table = txn.open_table(LISTINGS)?;
        let bytes = table
            .get(id)?
            .map(|guard| guard.value().to_vec())
            .ok_or_else(|| ListingError::not_found(id))?;

        let mut listing = decode(&bytes)?;
        apply_patch(&mut listing, patch)?;
        let bytes = serde_json::to_vec(&listing)?;
        table.insert(id, bytes.as_slice())?;
        listing
    };
    txn.commit()?;
    Ok(listing)
}

fn delete_one(db: &Database, id: &str) -> Result<Listing, ListingError> {
    let txn = db.begin_write()?;
    let listing = {
        let mut table = txn.open_table(LISTINGS)?;
        let bytes = table
            .remove(id)?
            .map(|guard| guard.value().to_vec())
            .ok_or_else(|| ListingError::not_found(id))?;
        let listing = decode(&bytes)?;

        // The counter is left alone so the code is never handed out again.
        let mut codes = txn.open_table(LISTING_CODES)?;
        codes.remove(listing.property_code.to_string().as_str())?;
        listing
    };
    txn.commit()?;
    Ok(listing)
}

fn count_all(db: &Database) -> Result<u64, ListingError> {
    let txn = db.begin_read()?;
    let table = txn.open_table(LISTINGS)?;
    Ok(table.len()?)
}

impl ListingStore {
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Validate, allocate a property code, and persist a new listing.
    ///
    /// Validation runs before allocation, so a rejected request does not
    /// consume a sequence number. If the insert fails after allocation the
    /// code is burned, leaving a gap.
    pub async fn create_listing(
        &self,
        allocator: &PropertyCodeAllocator,
        options: CreateListingOptions,
    ) -> Result<Listing, ListingError> {
        let validated = validate_create(&options)?;
        let property_code = allocator
            .allocate(&validated.location, validated.kind.as_str())
            .await?;

        let now = Utc::now();
        let listing = Listing {
            id: uuid::Uuid::new_v4().to_string(),
            price_numeric: extract_numeric_price(&validated.price),
            title: validated.title,
            kind: validated.kind,
            location: validated.location,
            property_code,
            area: validated.area,
            price: validated.price,
            images: validated.images,
            features: validated.features,
            views_range: validated.views_range,
            is_active: true,
            featured: false,
            views: 0,
            created_at: now,
            updated_at: now,
        };

        let record = listing.clone();
        self.storage
            .run("create_listing", move |db| insert_new(db, &record))
            .await?;

        info!(
            id = %listing.id,
            property_code = %listing.property_code,
            "Created listing"
        );
        Ok(listing)
    }

    pub async fn get_listing(&self, id: &str) -> Result<Listing, ListingError> {
        let id = id.to_string();
        self.storage
            .run("get_listing", move |db| read_one(db, &id))
            .await
    }

    /// Apply a partial update. The property code never changes.
    pub async fn update_listing(
        &self,
        id: &str,
        options: UpdateListingOptions,
    ) -> Result<Listing, ListingError> {
        let patch = validate_update(&options)?;
        let key = id.to_string();
        let listing = self
            .storage
            .run("update_listing", move |db| update_one(db, &key, patch))
            .await?;
        debug!(id = %id, "Updated listing");
        Ok(listing)
    }

    /// Remove a listing and its code index entry, returning the removed record.
    pub async fn delete_listing(&self, id: &str) -> Result<Listing, ListingError> {
        let key = id.to_string();
        let listing = self
            .storage
            .run("delete_listing", move |db| delete_one(db, &key))
            .await?;
        info!(id = %id, property_code = %listing.property_code, "Deleted listing");
        Ok(listing)
    }

    pub async fn list_listings(&self, query: &ListingQuery) -> Result<ListingPage, ListingError> {
        let all = self.storage.run("list_listings", read_all).await?;
        Ok(query.apply(all))
    }

    /// Sorted, de-duplicated locations across all listings.
    pub async fn distinct_locations(&self) -> Result<Vec<String>, ListingError> {
        let all = self.storage.run("distinct_locations", read_all).await?;
        let locations: BTreeSet<String> = all.into_iter().map(|l| l.location).collect();
        Ok(locations.into_iter().collect())
    }

    /// Sorted, de-duplicated listing types in use.
    pub async fn distinct_types(&self) -> Result<Vec<String>, ListingError> {
        let all = self.storage.run("distinct_types", read_all).await?;
        let kinds: BTreeSet<String> = all.into_iter().map(|l| l.kind.to_string()).collect();
        Ok(kinds.into_iter().collect())
    }

    pub async fn count_listings(&self) -> Result<u64, ListingError> {
        self.storage.run("count_listings", count_all).await
    }
}

#[async_trait]
impl ListingCounter for ListingStore {
    async fn count_listings(&self) -> Result<u64, CountError> {
        Ok(ListingStore::count_listings(self).await?)
    }
}
