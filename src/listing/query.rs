//! Filtering, sorting and pagination for listing queries.

use std::cmp::Ordering;

use super::types::Listing;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    PriceNumeric,
    Title,
    Views,
}

impl SortField {
    /// Parse the wire names; anything unrecognized sorts by creation time.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "priceNumeric" | "price" => SortField::PriceNumeric,
            "title" => SortField::Title,
            "views" => SortField::Views,
            _ => SortField::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    /// 1-based page number; 0 is treated as 1.
    pub page: u32,
    /// Page size; 0 means [`DEFAULT_PAGE_LIMIT`], capped at [`MAX_PAGE_LIMIT`].
    pub limit: u32,
    pub kind: Option<String>,
    /// Case-insensitive substring of the location.
    pub location: Option<String>,
    /// Case-insensitive substring of title, location, property code or area.
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub pages: u32,
    pub total: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone)]
pub struct ListingPage {
    pub listings: Vec<Listing>,
    pub pagination: Pagination,
}

/// Empty strings and `"all"` disable a filter.
fn active_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        .map(str::to_lowercase)
}

impl ListingQuery {
    fn matches(&self, listing: &Listing) -> bool {
        if let Some(kind) = active_filter(self.kind.as_deref()) {
            if listing.kind.as_str().to_lowercase() != kind {
                return false;
            }
        }

        if let Some(location) = active_filter(self.location.as_deref()) {
            if !listing.location.to_lowercase().contains(&location) {
                return false;
            }
        }

        if let Some(search) = active_filter(self.search.as_deref()) {
            let code = listing.property_code.to_string().to_lowercase();
            let hit = listing.title.to_lowercase().contains(&search)
                || listing.location.to_lowercase().contains(&search)
                || code.contains(&search)
                || listing.area.to_lowercase().contains(&search);
            if !hit {
                return false;
            }
        }

        if self.min_price.is_some_and(|min| listing.price_numeric < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| listing.price_numeric > max) {
            return false;
        }
        true
    }

    fn compare(&self, a: &Listing, b: &Listing) -> Ordering {
        let ordering = match self.sort_by {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::PriceNumeric => a.price_numeric.total_cmp(&b.price_numeric),
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortField::Views => a.views.cmp(&b.views),
        };
        // Tie-break on the code so pages are stable.
        let ordering = ordering.then_with(|| a.property_code.cmp(&b.property_code));
        match self.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Filter, sort and slice `listings` into one page.
    #[must_use]
    pub fn apply(&self, listings: Vec<Listing>) -> ListingPage {
        let mut matched: Vec<Listing> = listings.into_iter().filter(|l| self.matches(l)).collect();
        matched.sort_by(|a, b| self.compare(a, b));

        let (listings, pagination) = paginate(matched, self.page, self.limit, DEFAULT_PAGE_LIMIT);
        ListingPage {
            listings,
            pagination,
        }
    }
}

/// Slice already sorted `items` into one page.
///
/// Page 0 is treated as 1, limit 0 as `default_limit`, and the limit is
/// capped at [`MAX_PAGE_LIMIT`].
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: u32, limit: u32, default_limit: u32) -> (Vec<T>, Pagination) {
    let page = page.max(1);
    let limit = match limit {
        0 => default_limit.clamp(1, MAX_PAGE_LIMIT),
        n => n.min(MAX_PAGE_LIMIT),
    };
    let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
    let pages = u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX);

    let skip = usize::try_from(u64::from(page.saturating_sub(1)).saturating_mul(u64::from(limit)))
        .unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    let items: Vec<T> = items.into_iter().skip(skip).take(take).collect();

    let shown_through = u64::from(page).saturating_mul(u64::from(limit));
    let pagination = Pagination {
        current: page,
        pages,
        total,
        has_next: shown_through < total,
        has_prev: page > 1,
    };
    (items, pagination)
}
