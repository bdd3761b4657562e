use crate::listing::ListingStore;
use crate::server::proto::{
    ListLocationsRequest, ListLocationsResponse, ListTypesRequest, ListTypesResponse,
};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

pub async fn list_locations(
    listings: &ListingStore,
    _req: ListLocationsRequest,
) -> Result<Response<ListLocationsResponse>, Status> {
    match listings.distinct_locations().await {
        Ok(locations) => Ok(Response::new(ListLocationsResponse {
            success: true,
            error: String::new(),
            locations,
        })),
        Err(e) => Ok(Response::new(ListLocationsResponse {
            success: false,
            error: to_error_json(&e),
            locations: Vec::new(),
        })),
    }
}

pub async fn list_types(
    listings: &ListingStore,
    _req: ListTypesRequest,
) -> Result<Response<ListTypesResponse>, Status> {
    match listings.distinct_types().await {
        Ok(types) => Ok(Response::new(ListTypesResponse {
            success: true,
            error: String::new(),
            types,
        })),
        Err(e) => Ok(Response::new(ListTypesResponse {
            success: false,
            error: to_error_json(&e),
            types: Vec::new(),
        })),
    }
}
