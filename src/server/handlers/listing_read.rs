use crate::listing::ListingStore;
use crate::server::convert::listing_to_proto;
use crate::server::proto::{GetListingRequest, GetListingResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

pub async fn get_listing(
    listings: &ListingStore,
    req: GetListingRequest,
) -> Result<Response<GetListingResponse>, Status> {
    match listings.get_listing(&req.id).await {
        Ok(listing) => Ok(Response::new(GetListingResponse {
            success: true,
            error: String::new(),
            listing: Some(listing_to_proto(listing)),
        })),
        Err(e) => Ok(Response::new(GetListingResponse {
            success: false,
            error: to_error_json(&e),
            listing: None,
        })),
    }
}
