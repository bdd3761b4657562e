use crate::allocator::PropertyCodeAllocator;
use crate::server::proto::{AllocatePropertyCodeRequest, AllocatePropertyCodeResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

pub async fn allocate_property_code(
    allocator: &PropertyCodeAllocator,
    req: AllocatePropertyCodeRequest,
) -> Result<Response<AllocatePropertyCodeResponse>, Status> {
    match allocator.allocate(&req.location, &req.r#type).await {
        Ok(code) => Ok(Response::new(AllocatePropertyCodeResponse {
            success: true,
            error: String::new(),
            property_code: code.to_string(),
            prefix: code.prefix(),
            sequence: code.sequence(),
        })),
        Err(e) => Ok(Response::new(AllocatePropertyCodeResponse {
            success: false,
            error: to_error_json(&e),
            ..Default::default()
        })),
    }
}
