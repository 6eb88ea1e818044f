//! Per-request data set by the request-id middleware.

/// Read by handlers to correlate their log lines with the access log.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}
