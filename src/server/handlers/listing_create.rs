use crate::allocator::PropertyCodeAllocator;
use crate::listing::{CreateListingOptions, ListingStore};
use crate::server::convert::listing_to_proto;
use crate::server::helpers::views_range;
use crate::server::proto::{CreateListingRequest, CreateListingResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

pub async fn create_listing(
    allocator: &PropertyCodeAllocator,
    listings: &ListingStore,
    req: CreateListingRequest,
) -> Result<Response<CreateListingResponse>, Status> {
    let options = CreateListingOptions {
        title: req.title,
        kind: req.r#type,
        location: req.location,
        area: req.area,
        price: req.price,
        images: req.images,
        features: req.features,
        views_range: views_range(req.views_min, req.views_max),
    };

    match listings.create_listing(allocator, options).await {
        Ok(listing) => Ok(Response::new(CreateListingResponse {
            success: true,
            error: String::new(),
            listing: Some(listing_to_proto(listing)),
        })),
        Err(e) => Ok(Response::new(CreateListingResponse {
            success: false,
            error: to_error_json(&e),
            listing: None,
        })),
    }
}
