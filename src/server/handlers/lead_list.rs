use crate::lead::{LeadQuery, LeadStore};
use crate::server::convert::{lead_to_proto, pagination_to_proto};
use crate::server::proto::{ListLeadsRequest, ListLeadsResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

pub async fn list_leads(
    leads: &LeadStore,
    req: ListLeadsRequest,
) -> Result<Response<ListLeadsResponse>, Status> {
    let result = match LeadQuery::parse(req.page, req.limit, &req.source, &req.status, &req.search) {
        Ok(query) => leads.list_leads(&query).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(page) => Ok(Response::new(ListLeadsResponse {
            success: true,
            error: String::new(),
            leads: page.leads.into_iter().map(lead_to_proto).collect(),
            pagination: Some(pagination_to_proto(page.pagination)),
        })),
        Err(e) => Ok(Response::new(ListLeadsResponse {
            success: false,
            error: to_error_json(&e),
            ..Default::default()
        })),
    }
}
