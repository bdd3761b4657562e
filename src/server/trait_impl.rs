use crate::metrics::{generate_request_id, OperationTimer};
use tonic::{Request, Response, Status};
use tracing::instrument;

use super::handlers;
use super::proto::listings_daemon_server::ListingsDaemon;
use super::proto::*;
use super::ListingsDaemonService;

#[tonic::async_trait]
impl ListingsDaemon for ListingsDaemonService {
    #[instrument(
        name = "grpc.allocate_property_code",
        skip(self, request),
        fields(request_id = tracing::field::Empty)
    )]
    async fn allocate_property_code(
        &self,
        request: Request<AllocatePropertyCodeRequest>,
    ) -> Result<Response<AllocatePropertyCodeResponse>, Status> {
        let request_id = generate_request_id();
        tracing::Span::current().record("request_id", request_id.as_str());
        let _timer = OperationTimer::new("allocate_property_code", &request_id);
        handlers::code_allocate::allocate_property_code(&self.allocator, request.into_inner()).await
    }

    #[instrument(
        name = "grpc.get_property_code_stats",
        skip(self, request),
        fields(request_id = tracing::field::Empty)
    )]
    async fn get_property_code_stats(
        &self,
        request: Request<GetPropertyCodeStatsRequest>,
    ) -> Result<Response<GetPropertyCodeStatsResponse>, Status> {
        let request_id = generate_request_id();
        tracing::Span::current().record("request_id", request_id.as_str());
        let _timer = OperationTimer::new("get_property_code_stats", &request_id);
        handlers::code_stats::get_property_code_stats(
            &self.allocator,
            &self.listings,
            request.into_inner(),
        )
        .await
    }

    #[instrument(
        name = "grpc.create_listing",
        skip(self, request),
        fields(request_id = tracing::field::Empty)
    )]
    async fn create_listing(
        &self,
        request: Request<CreateListingRequest>,
    ) -> Result<Response<CreateListingResponse>, Status> {
        let request_id = generate_request_id();
        tracing::Span::current().record("request_id", request_id.as_str());
        let _timer = OperationTimer::new("create_listing", &request_id);
        handlers::listing_create::create_listing(&self.allocator, &self.listings, request.into_inner())
            .await
    }

    #[instrument(
        name = "grpc.get_listing",
        skip(self, request),
        fields(request_id = tracing::field::Empty)
    )]
    async fn get_listing(
        &self,
        request: Request<GetListingRequest>,
    ) -> Result<Response<GetListingResponse>, Status> {
        let request_id = generate_request_id();
        tracing::Span::current().record("request_id", request_id.as_str());
        let _timer = OperationTimer::new("get_listing", &request_id);
        handlers::listing_read::get_listing(&self.listings, request.into_inner()).await
    }

    #[instrument(
        name = "grpc.list_listings",
        skip(self, request),
        fields(request_id = tracing::field::Empty)
    )]
    async fn list_listings(
        &self,
        request: Request<ListListingsRequest>,
    ) -> Result<Response<ListListingsResponse>, Status> {
        let request_id = generate_request_id();
        tracing::Span::current().record("request_id", request_id.as_str());
        let _timer = OperationTimer::new("list_listings", &request_id);
        handlers::listing_list::list_listings(&self.listings, request.into_inner()).await
    }

    #[instrument(
        name = "grpc.update_listing",
        skip(self, request),
        fields(request_id = tracing::field::Empty)
    )]
    async fn update_listing(
        &self,
        request: Request<UpdateListingRequest>,
    ) -> Result<Response<UpdateListingResponse>, Status> {
        let request_id = generate_request_id();
        tracing::Span::current().record("request_id", request_id.as_str());
        let _timer = OperationTimer::new("update_listing", &request_id);
        handlers::listing_update::update_listing(&self.listings, request.into_inner()).await
    }

    #[instrument(
        name = "grpc.delete_listing",
        skip(self, request),
        fields(request_id = tracing::field::Empty)
    )]
    async fn delete_listing(
        &self,
        request: Request<DeleteListingRequest>,
    ) -> Result<Response<DeleteListingResponse>, Status> {
        let request_id = generate_request_id();
        tracing::Span::current().record("request_id", request_id.as_str());
        let _timer = OperationTimer::new("delete_listing", &request_id);
        handlers::listing_delete::delete_listing(&self.listings, request.into_inner()).await
    }

    async fn list_locations(
        &self,
        request: Request<ListLocationsRequest>,
    ) -> Result<Response<ListLocationsResponse>, Status> {
        handlers::listing_facets::list_locations(&self.listings, request.into_inner()).await
    }

    async fn list_types(
        &self,
        request: Request<ListTypesRequest>,
    ) -> Result<Response<ListTypesResponse>, Status> {
        handlers::listing_facets::list_types(&self.listings, request.into_inner()).await
    }

    #[instrument(
        name = "grpc.create_lead",
        skip(self, request),
        fields(request_id = tracing::field::Empty)
    )]
    async fn create_lead(
        &self,
        request: Request<CreateLeadRequest>,
    ) -> Result<Response<CreateLeadResponse>, Status> {
        let request_id = generate_request_id();
        tracing::Span::current().record("request_id", request_id.as_str());
        let _timer = OperationTimer::new("create_lead", &request_id);
        let ip_address = request.remote_addr().map(|addr| addr.ip().to_string());
        handlers::lead_create::create_lead(&self.leads, request.into_inner(), ip_address).await
    }

    #[instrument(
        name = "grpc.get_lead",
        skip(self, request),
        fields(request_id = tracing::field::Empty)
    )]
    async fn get_lead(
        &self,
        request: Request<GetLeadRequest>,
    ) -> Result<Response<GetLeadResponse>, Status> {
        let request_id = generate_request_id();
        tracing::Span::current().record("request_id", request_id.as_str());
        let _timer = OperationTimer::new("get_lead", &request_id);
        handlers::lead_read::get_lead(&self.leads, request.into_inner()).await
    }

    #[instrument(
        name = "grpc.list_leads",
        skip(self, request),
        fields(request_id = tracing::field::Empty)
    )]
    async fn list_leads(
        &self,
        request: Request<ListLeadsRequest>,
    ) -> Result<Response<ListLeadsResponse>, Status> {
        let request_id = generate_request_id();
        tracing::Span::current().record("request_id", request_id.as_str());
        let _timer = OperationTimer::new("list_leads", &request_id);
        handlers::lead_list::list_leads(&self.leads, request.into_inner()).await
    }

    #[instrument(
        name = "grpc.update_lead_status",
        skip(self, request),
        fields(request_id = tracing::field::Empty)
    )]
    async fn update_lead_status(
        &self,
        request: Request<UpdateLeadStatusRequest>,
    ) -> Result<Response<UpdateLeadStatusResponse>, Status> {
        let request_id = generate_request_id();
        tracing::Span::current().record("request_id", request_id.as_str());
        let _timer = OperationTimer::new("update_lead_status", &request_id);
        handlers::lead_update::update_lead_status(&self.leads, request.into_inner()).await
    }

    async fn get_daemon_info(
        &self,
        request: Request<GetDaemonInfoRequest>,
    ) -> Result<Response<DaemonInfo>, Status> {
        handlers::daemon::get_daemon_info(self.data_path.as_deref(), request.into_inner()).await
    }

    async fn shutdown(
        &self,
        request: Request<ShutdownRequest>,
    ) -> Result<Response<ShutdownResponse>, Status> {
        handlers::daemon::shutdown(request.into_inner(), &self.shutdown_tx).await
    }
}
