use std::time::{Duration, Instant};
use tracing::info;

/// Logs how long a gRPC handler took when dropped, tagged with the
/// request id so it can be matched with the handler's other log lines.
pub struct OperationTimer {
    name: &'static str,
    request_id: String,
    start: Instant,
}

impl OperationTimer {
    #[must_use]
    pub fn new(name: &'static str, request_id: &str) -> Self {
        Self {
            name,
            request_id: request_id.to_string(),
            start: Instant::now(),
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        info!(
            operation = %self.name,
            request_id = %self.request_id,
            duration_ms = %self.elapsed().as_millis(),
            "Operation completed"
        );
    }
}

/// Short request id (first 8 hex chars of a v4 UUID) for log correlation.
#[must_use]
pub fn generate_request_id() -> String {
    let uuid_str = uuid::Uuid::new_v4().simple().to_string();
    uuid_str.get(..8).unwrap_or(&uuid_str).to_string()
}
