use crate::lead::{ContactInfo, CreateLeadOptions, LeadError, LeadStore};
use crate::server::convert::{lead_to_proto, property_from_proto, space_from_proto};
use crate::server::proto::{CreateLeadRequest, CreateLeadResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

fn options(req: CreateLeadRequest, ip_address: Option<String>) -> Result<CreateLeadOptions, LeadError> {
    Ok(CreateLeadOptions {
        contact: ContactInfo {
            name: req.name,
            company: req.company,
            designation: req.designation,
            phone: req.phone,
            email: req.email,
        },
        space: req.space.map(space_from_proto).transpose()?,
        total_area: req.total_area,
        property: req.property.map(property_from_proto),
        source: Some(req.source),
        ip_address,
    })
}

/// `ip_address` is the caller's address as seen by the transport.
pub async fn create_lead(
    leads: &LeadStore,
    req: CreateLeadRequest,
    ip_address: Option<String>,
) -> Result<Response<CreateLeadResponse>, Status> {
    let result = match options(req, ip_address) {
        Ok(options) => leads.create_lead(options).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(lead) => {
            let message = if lead.property.is_some() {
                "Property report request submitted successfully"
            } else {
                "Space calculation saved successfully"
            };
            Ok(Response::new(CreateLeadResponse {
                success: true,
                error: String::new(),
                message: message.to_string(),
                lead: Some(lead_to_proto(lead)),
            }))
        }
        Err(e) => Ok(Response::new(CreateLeadResponse {
            success: false,
            error: to_error_json(&e),
            ..Default::default()
        })),
    }
}
