//! The create-product submit handler.

use std::sync::Arc;

use shopadmin_core::SubmissionId;
use shopadmin_products::{DraftError, FormFields, MultipartPayload, ProductDraft};
use thiserror::Error;
use tracing::Instrument;
use url::Url;

use crate::api::{CreateProductRequest, ProductApi, TransportError};
use crate::config::SubmitterConfig;
use crate::feedback::UserFeedback;
use crate::form::{FormSource, SubmitEvent};

/// Why a sent request did not create a product.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("server rejected product ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SubmitError {
    /// Message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            SubmitError::Server { message, .. } => message.as_deref(),
            SubmitError::Transport(_) => None,
        }
    }
}

/// Result of one submit. Exactly one user-visible effect accompanies each.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Required fields were blank; nothing was sent.
    Rejected(DraftError),
    /// The server accepted the product; the user was sent to `redirect`.
    Created { redirect: Url },
    /// The request was sent but failed; the user was alerted.
    Failed(SubmitError),
}

impl SubmitOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, SubmitOutcome::Created { .. })
    }
}

/// Validates the form, posts it, and navigates or alerts.
///
/// Holds no per-submit state: concurrent calls issue independent requests.
pub struct FormSubmitter<A, F> {
    config: Arc<SubmitterConfig>,
    api: A,
    feedback: F,
}

impl<A, F> FormSubmitter<A, F>
where
    A: ProductApi,
    F: UserFeedback,
{
    pub fn new(config: SubmitterConfig, api: A, feedback: F) -> Self {
        Self {
            config: Arc::new(config),
            api,
            feedback,
        }
    }

    pub fn config(&self) -> &SubmitterConfig {
        &self.config
    }

    /// Submit listener body: suppress the default action, read the form,
    /// then run [`FormSubmitter::submit`].
    pub async fn handle_submit(&self, event: &mut SubmitEvent, form: &dyn FormSource) -> SubmitOutcome {
        let fields = self.intercept(event, form);
        self.submit(&fields).await
    }

    /// Synchronous part of the listener, run before the first suspension point.
    pub(crate) fn intercept(&self, event: &mut SubmitEvent, form: &dyn FormSource) -> FormFields {
        event.prevent_default();
        form.read_fields()
    }

    pub async fn submit(&self, fields: &FormFields) -> SubmitOutcome {
        let submission_id = SubmissionId::new();
        let span = tracing::info_span!("product_submit", %submission_id);
        self.submit_inner(fields).instrument(span).await
    }

    async fn submit_inner(&self, fields: &FormFields) -> SubmitOutcome {
        let draft = match ProductDraft::from_fields(fields) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::info!(error = %e, "submission rejected before sending");
                self.feedback.alert(&self.config.messages.required_fields);
                return SubmitOutcome::Rejected(e);
            }
        };

        let request = CreateProductRequest {
            endpoint: self.config.create_endpoint.clone(),
            csrf_header: self.config.csrf_header.clone(),
            csrf_token: self.config.csrf_token.clone(),
            payload: MultipartPayload::from_draft(&draft, &self.config.field_names),
        };

        tracing::debug!(
            endpoint = %request.endpoint,
            category_id = %draft.category_id(),
            price = draft.price(),
            has_image = draft.image().is_some(),
            "sending create-product request"
        );

        match self.api.create_product(request).await {
            Ok(resp) if resp.is_success() => {
                tracing::info!(status = resp.status, "product created");
                let redirect = self.config.success_redirect.clone();
                self.feedback.navigate(&redirect);
                SubmitOutcome::Created { redirect }
            }
            Ok(resp) => {
                let message = resp.error_message();
                tracing::warn!(
                    status = resp.status,
                    server_message = message.as_deref().unwrap_or(""),
                    "product creation rejected by server"
                );
                self.feedback.alert(
                    message
                        .as_deref()
                        .unwrap_or(&self.config.messages.creation_failed),
                );
                SubmitOutcome::Failed(SubmitError::Server {
                    status: resp.status,
                    message,
                })
            }
            Err(e) => {
                // Surfaced the same way as a server error without a message.
                tracing::warn!(error = %e, "create-product request failed");
                self.feedback.alert(&self.config.messages.creation_failed);
                SubmitOutcome::Failed(SubmitError::Transport(e))
            }
        }
    }
}

impl<A, F> core::fmt::Debug for FormSubmitter<A, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FormSubmitter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
