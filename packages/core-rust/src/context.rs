/// Per-request context threaded from the HTTP middleware into the services.
///
/// Carries the correlation identifier used to tag every log line emitted
/// while the request is being handled. Scoped to one request; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlation identifier, either propagated from `x-request-id` or generated.
    pub request_id: String,
}

impl RequestContext {
    /// Creates a context for the given correlation identifier.
    #[must_use]
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}
