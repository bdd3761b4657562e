use crate::lead::{LeadStore, UpdateLeadOptions};
use crate::server::convert::lead_to_proto;
use crate::server::proto::{UpdateLeadStatusRequest, UpdateLeadStatusResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

pub async fn update_lead_status(
    leads: &LeadStore,
    req: UpdateLeadStatusRequest,
) -> Result<Response<UpdateLeadStatusResponse>, Status> {
    let options = UpdateLeadOptions {
        status: req.status,
        notes: req.notes,
        follow_up_date: req.follow_up_date,
    };

    match leads.update_lead_status(&req.id, options).await {
        Ok(lead) => Ok(Response::new(UpdateLeadStatusResponse {
            success: true,
            error: String::new(),
            lead: Some(lead_to_proto(lead)),
        })),
        Err(e) => Ok(Response::new(UpdateLeadStatusResponse {
            success: false,
            error: to_error_json(&e),
            lead: None,
        })),
    }
}
