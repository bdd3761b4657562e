use crate::allocator::PropertyCodeAllocator;
use crate::listing::ListingStore;
use crate::server::convert::prefix_stats_to_proto;
use crate::server::proto::{GetPropertyCodeStatsRequest, GetPropertyCodeStatsResponse};
use crate::server::structured_error::to_error_json;
use crate::stats;
use tonic::{Response, Status};

pub async fn get_property_code_stats(
    allocator: &PropertyCodeAllocator,
    listings: &ListingStore,
    _req: GetPropertyCodeStatsRequest,
) -> Result<Response<GetPropertyCodeStatsResponse>, Status> {
    match stats::collect(allocator.store().as_ref(), listings).await {
        Ok(stats) => Ok(Response::new(GetPropertyCodeStatsResponse {
            success: true,
            error: String::new(),
            total_counters: u32::try_from(stats.total_counters).unwrap_or(u32::MAX),
            counters: stats.per_prefix.into_iter().map(prefix_stats_to_proto).collect(),
            total_listings: stats.total_listings,
        })),
        Err(e) => Ok(Response::new(GetPropertyCodeStatsResponse {
            success: false,
            error: to_error_json(&e),
            ..Default::default()
        })),
    }
}
