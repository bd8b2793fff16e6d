//! Runs API requests on the tokio runtime while the UI keeps drawing.
//!
//! Each request is spawned as its own task and reports back through a
//! oneshot channel. The UI loop polls the handles without blocking.

use crate::api::{ApiClient, ApiRequest, ApiResponse};
use anyhow::Result;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tracing::debug;

/// Handle for polling a request's completion.
pub struct RequestHandle {
    /// Kept so a task that dies without answering can still be reported
    /// to the screen as a failed response for this request.
    request: ApiRequest,
    receiver: oneshot::Receiver<ApiResponse>,
}

impl RequestHandle {
    pub(crate) fn new(request: ApiRequest, receiver: oneshot::Receiver<ApiResponse>) -> Self {
        Self { request, receiver }
    }

    pub fn name(&self) -> &'static str {
        self.request.name()
    }

    /// Try to receive the response without blocking.
    ///
    /// `None` while the request is still running.
    pub fn try_recv(&mut self) -> Option<Result<ApiResponse>> {
        match self.receiver.try_recv() {
            Ok(response) => Some(Ok(response)),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(anyhow::anyhow!(
                "Request '{}' ended without a response",
                self.name()
            ))),
        }
    }

    /// Failed response for a request whose task ended without answering.
    pub fn into_failure(self, error: &anyhow::Error) -> ApiResponse {
        self.request.failed(format!("{:#}", error))
    }
}

pub struct RequestService;

impl RequestService {
    /// Spawn `request` on `runtime` and return a handle to poll.
    pub fn start(runtime: &Runtime, client: &ApiClient, request: ApiRequest) -> RequestHandle {
        let (sender, receiver) = oneshot::channel();
        let client = client.clone();

        debug!("Dispatching request: {}", request.name());
        let task = request.clone();
        runtime.spawn(async move {
            let response = task.execute(&client).await;
            let _ = sender.send(response);
        });

        RequestHandle::new(request, receiver)
    }

    /// Run `request` to completion on the current thread. Used by the CLI.
    pub fn run_blocking(runtime: &Runtime, client: &ApiClient, request: ApiRequest) -> ApiResponse {
        runtime.block_on(request.execute(client))
    }
}
