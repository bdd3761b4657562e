#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create_test_dir, in_memory_fixture, lead_options, listing_options, on_disk_fixture};
use futures::future::join_all;
use listings_daemon::lead::{LeadQuery, LeadSource, LeadStatus, UpdateLeadOptions};

#[tokio::test]
async fn test_leads_survive_reopen() {
    let temp_dir = create_test_dir();

    let id = {
        let fixture = on_disk_fixture(temp_dir.path());
        let lead = fixture
            .leads
            .create_lead(lead_options("Initech", 20))
            .await
            .unwrap();
        fixture
            .leads
            .update_lead_status(
                &lead.id,
                UpdateLeadOptions {
                    status: Some("closed_won".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        lead.id
    };

    let fixture = on_disk_fixture(temp_dir.path());
    let lead = fixture.leads.get_lead(&id).await.unwrap();
    assert_eq!(lead.company, "Initech");
    assert_eq!(lead.status, LeadStatus::ClosedWon);
    assert_eq!(lead.formatted_total_area(), "1,200 sq.ft");
}

#[tokio::test]
async fn test_leads_share_the_database_with_listings() {
    let fixture = in_memory_fixture();

    fixture
        .leads
        .create_lead(lead_options("Hooli", 8))
        .await
        .unwrap();
    fixture
        .listings
        .create_listing(&fixture.allocator, listing_options("Pune", "Office"))
        .await
        .unwrap();

    assert_eq!(fixture.listings.count_listings().await.unwrap(), 1);
    let page = fixture.leads.list_leads(&LeadQuery::default()).await.unwrap();
    assert_eq!(page.pagination.total, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_captures_are_all_kept() {
    let fixture = in_memory_fixture();

    let companies: Vec<String> = (0..20).map(|i| format!("Tenant {i}")).collect();
    let results = join_all(
        companies
            .iter()
            .map(|company| fixture.leads.create_lead(lead_options(company, 4))),
    )
    .await;
    assert!(results.iter().all(Result::is_ok));

    let query = LeadQuery {
        limit: 100,
        source: Some(LeadSource::SpaceCalculator),
        ..Default::default()
    };
    let page = fixture.leads.list_leads(&query).await.unwrap();
    assert_eq!(page.leads.len(), 20);
    assert!(page
        .leads
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
}
