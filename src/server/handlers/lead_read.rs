use crate::lead::LeadStore;
use crate::server::convert::lead_to_proto;
use crate::server::proto::{GetLeadRequest, GetLeadResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

pub async fn get_lead(
    leads: &LeadStore,
    req: GetLeadRequest,
) -> Result<Response<GetLeadResponse>, Status> {
    match leads.get_lead(&req.id).await {
        Ok(lead) => Ok(Response::new(GetLeadResponse {
            success: true,
            error: String::new(),
            lead: Some(lead_to_proto(lead)),
        })),
        Err(e) => Ok(Response::new(GetLeadResponse {
            success: false,
            error: to_error_json(&e),
            lead: None,
        })),
    }
}
