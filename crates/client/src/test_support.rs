//! In-process fakes shared by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use shopadmin_core::CsrfToken;
use tokio::sync::Barrier;
use url::Url;

use crate::api::{ApiResponse, CreateProductRequest, ProductApi, TransportError};
use crate::config::SubmitterConfig;

pub(crate) fn test_config() -> SubmitterConfig {
    SubmitterConfig::new(
        Url::parse("http://shop.test/api/products/create/").unwrap(),
        Url::parse("http://shop.test/admin-panel/products/").unwrap(),
        CsrfToken::new("test-token").unwrap(),
    )
}

/// Records requests and answers each with the same scripted result.
pub(crate) struct FakeApi {
    response: Option<ApiResponse>,
    requests: Mutex<Vec<CreateProductRequest>>,
    barrier: Option<Barrier>,
}

impl FakeApi {
    pub(crate) fn responding(response: ApiResponse) -> Self {
        Self {
            response: Some(response),
            requests: Mutex::new(Vec::new()),
            barrier: None,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            response: None,
            requests: Mutex::new(Vec::new()),
            barrier: None,
        }
    }

    /// Each call waits until `n` calls are in flight before answering.
    pub(crate) fn rendezvous(mut self, n: usize) -> Self {
        self.barrier = Some(Barrier::new(n));
        self
    }

    pub(crate) fn requests(&self) -> Vec<CreateProductRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductApi for FakeApi {
    async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        self.response
            .clone()
            .ok_or_else(|| TransportError::Network("connection refused".to_string()))
    }
}
