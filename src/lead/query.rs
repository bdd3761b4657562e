use super::error::LeadError;
use super::types::{Lead, LeadSource, LeadStatus};
use crate::listing::{paginate, Pagination};

pub const DEFAULT_LEAD_PAGE_LIMIT: u32 = 50;

#[derive(Debug, Clone, Default)]
pub struct LeadQuery {
    /// 1-based page number; 0 is treated as 1.
    pub page: u32,
    /// Page size; 0 means [`DEFAULT_LEAD_PAGE_LIMIT`].
    pub limit: u32,
    pub source: Option<LeadSource>,
    pub status: Option<LeadStatus>,
    /// Case-insensitive substring of name, company, email or phone.
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LeadPage {
    pub leads: Vec<Lead>,
    pub pagination: Pagination,
}

fn nonblank(s: &str) -> Option<&str> {
    Some(s.trim()).filter(|s| !s.is_empty())
}

impl LeadQuery {
    /// Build a query from wire strings; blank filters are ignored and
    /// unknown source or status names are rejected.
    pub fn parse(
        page: u32,
        limit: u32,
        source: &str,
        status: &str,
        search: &str,
    ) -> Result<Self, LeadError> {
        Ok(Self {
            page,
            limit,
            source: nonblank(source).map(str::parse).transpose()?,
            status: nonblank(status).map(str::parse).transpose()?,
            search: nonblank(search).map(str::to_string),
        })
    }

    fn matches(&self, lead: &Lead) -> bool {
        if self.source.is_some_and(|source| lead.source != source) {
            return false;
        }
        if self.status.is_some_and(|status| lead.status != status) {
            return false;
        }
        if let Some(search) = &self.search {
            let search = search.to_lowercase();
            let hit = [&lead.name, &lead.company, &lead.email, &lead.phone]
                .iter()
                .any(|field| field.to_lowercase().contains(&search));
            if !hit {
                return false;
            }
        }
        true
    }

    /// Filter, sort newest first and slice `leads` into one page.
    #[must_use]
    pub fn apply(&self, leads: Vec<Lead>) -> LeadPage {
        let mut matched: Vec<Lead> = leads.into_iter().filter(|l| self.matches(l)).collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));

        let (leads, pagination) = paginate(matched, self.page, self.limit, DEFAULT_LEAD_PAGE_LIMIT);
        LeadPage { leads, pagination }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::types::SpaceRequirements;
    use chrono::{Duration, Utc};

    fn lead(n: i64, source: LeadSource, status: LeadStatus, company: &str) -> Lead {
        let created = Utc::now() + Duration::seconds(n);
        Lead {
            id: format!("lead-{n}"),
            name: format!("Contact {n}"),
            company: company.to_string(),
            designation: "Manager".to_string(),
            phone: format!("+91 90000 0000{n}"),
            email: format!("contact{n}@example.com"),
            space_requirements: SpaceRequirements::default(),
            total_area: 0.0,
            source,
            status,
            notes: String::new(),
            follow_up_date: None,
            notification_sent: false,
            ip_address: None,
            property: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn sample() -> Vec<Lead> {
        vec![
            lead(1, LeadSource::SpaceCalculator, LeadStatus::New, "Northwind"),
            lead(2, LeadSource::ContactForm, LeadStatus::Contacted, "Contoso"),
            lead(3, LeadSource::SpaceCalculator, LeadStatus::Qualified, "Fabrikam"),
            lead(4, LeadSource::PropertyReport, LeadStatus::New, "Northwind Labs"),
        ]
    }

    fn ids(page: &LeadPage) -> Vec<&str> {
        page.leads.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_newest_first() {
        let page = LeadQuery::default().apply(sample());
        assert_eq!(ids(&page), vec!["lead-4", "lead-3", "lead-2", "lead-1"]);
        assert_eq!(page.pagination.total, 4);
    }

    #[test]
    fn test_filter_by_source_and_status() {
        let query = LeadQuery::parse(1, 0, "spacecalculator", "new", "").unwrap();
        assert_eq!(ids(&query.apply(sample())), vec!["lead-1"]);
    }

    #[test]
    fn test_search_spans_contact_fields() {
        let by_company = LeadQuery::parse(0, 0, "", "", "NORTHWIND").unwrap();
        assert_eq!(ids(&by_company.apply(sample())), vec!["lead-4", "lead-1"]);

        let by_email = LeadQuery::parse(0, 0, "", "", "contact2@").unwrap();
        assert_eq!(ids(&by_email.apply(sample())), vec!["lead-2"]);
    }

    #[test]
    fn test_unknown_filter_value_rejected() {
        assert!(LeadQuery::parse(0, 0, "billboard", "", "").is_err());
        assert!(LeadQuery::parse(0, 0, "", "won", "").is_err());
    }

    #[test]
    fn test_pagination() {
        let query = LeadQuery {
            page: 2,
            limit: 3,
            ..Default::default()
        };
        let page = query.apply(sample());
        assert_eq!(ids(&page), vec!["lead-1"]);
        assert_eq!(page.pagination.pages, 2);
        assert!(page.pagination.has_prev);
        assert!(!page.pagination.has_next);
    }
}
