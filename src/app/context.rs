//! Request-scoped identifiers supplied by the execution environment.

use std::future::Future;
use uuid::Uuid;

tokio::task_local! {
    static REQUEST_ID: String;
}

/// Runs `fut` with `request_id` visible to [`current_request_id`].
pub async fn with_request_id<F>(request_id: impl Into<String>, fut: F) -> F::Output
where
    F: Future,
{
    REQUEST_ID.scope(request_id.into(), fut).await
}

/// The identifier of the request being served: the task-local scope first,
/// then the `AWS_REQUEST_ID` environment variable.
pub fn current_request_id() -> Option<String> {
    REQUEST_ID
        .try_with(|id| id.clone())
        .ok()
        .or_else(|| std::env::var("AWS_REQUEST_ID").ok())
        .filter(|id| !id.is_empty())
}

/// Like [`current_request_id`], falling back to a fresh UUID so that storage
/// keys built in the same second never collide.
pub fn request_id_or_random() -> String {
    current_request_id().unwrap_or_else(|| Uuid::new_v4().to_string())
}
