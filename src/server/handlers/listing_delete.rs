use crate::listing::ListingStore;
use crate::server::convert::listing_to_proto;
use crate::server::proto::{DeleteListingRequest, DeleteListingResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

pub async fn delete_listing(
    listings: &ListingStore,
    req: DeleteListingRequest,
) -> Result<Response<DeleteListingResponse>, Status> {
    match listings.delete_listing(&req.id).await {
        Ok(listing) => Ok(Response::new(DeleteListingResponse {
            success: true,
            error: String::new(),
            listing: Some(listing_to_proto(listing)),
        })),
        Err(e) => Ok(Response::new(DeleteListingResponse {
            success: false,
            error: to_error_json(&e),
            listing: None,
        })),
    }
}
