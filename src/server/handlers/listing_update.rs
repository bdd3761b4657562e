use crate::listing::{ListingStore, UpdateListingOptions};
use crate::server::convert::listing_to_proto;
use crate::server::helpers::replacement;
use crate::server::proto::{UpdateListingRequest, UpdateListingResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};
use tracing::debug;

pub async fn update_listing(
    listings: &ListingStore,
    req: UpdateListingRequest,
) -> Result<Response<UpdateListingResponse>, Status> {
    if req.property_code.is_some() {
        debug!(id = %req.id, "Ignoring property code in update; codes are immutable");
    }

    let options = UpdateListingOptions {
        title: req.title,
        kind: req.r#type,
        location: req.location,
        area: req.area,
        price: req.price,
        images: replacement(req.replace_images, req.images),
        features: replacement(req.replace_features, req.features),
        views_range: req.views_min.zip(req.views_max).map(|(min, max)| [min, max]),
        is_active: req.is_active,
        featured: req.featured,
    };

    match listings.update_listing(&req.id, options).await {
        Ok(listing) => Ok(Response::new(UpdateListingResponse {
            success: true,
            error: String::new(),
            listing: Some(listing_to_proto(listing)),
        })),
        Err(e) => Ok(Response::new(UpdateListingResponse {
            success: false,
            error: to_error_json(&e),
            listing: None,
        })),
    }
}
