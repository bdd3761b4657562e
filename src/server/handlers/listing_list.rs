use crate::listing::{ListingQuery, ListingStore, SortField, SortOrder};
use crate::server::convert::{listing_to_proto, pagination_to_proto};
use crate::server::helpers::nonblank;
use crate::server::proto::{ListListingsRequest, ListListingsResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

pub async fn list_listings(
    listings: &ListingStore,
    req: ListListingsRequest,
) -> Result<Response<ListListingsResponse>, Status> {
    let query = ListingQuery {
        page: req.page,
        limit: req.limit,
        kind: nonblank(req.r#type),
        location: nonblank(req.location),
        search: nonblank(req.search),
        min_price: req.min_price,
        max_price: req.max_price,
        sort_by: SortField::parse(&req.sort_by),
        sort_order: SortOrder::parse(&req.sort_order),
    };

    match listings.list_listings(&query).await {
        Ok(page) => Ok(Response::new(ListListingsResponse {
            success: true,
            error: String::new(),
            listings: page.listings.into_iter().map(listing_to_proto).collect(),
            pagination: Some(pagination_to_proto(page.pagination)),
        })),
        Err(e) => Ok(Response::new(ListListingsResponse {
            success: false,
            error: to_error_json(&e),
            ..Default::default()
        })),
    }
}
