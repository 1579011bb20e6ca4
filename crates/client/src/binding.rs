//! Attaching the submitter to a form.
//!
//! A [`FormBinding`] plays the part of a registered submit listener. While
//! attached, each [`FormBinding::submit`] suppresses the default action,
//! snapshots the form, and runs the handler as its own tokio task, so a user
//! who submits twice gets two concurrent requests. Detaching stops future
//! submits from being intercepted; requests already in flight still finish.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::api::ProductApi;
use crate::feedback::UserFeedback;
use crate::form::{FormSource, SubmitEvent};
use crate::submitter::{FormSubmitter, SubmitOutcome};

pub struct FormBinding<A, F> {
    submitter: Arc<FormSubmitter<A, F>>,
    form: Arc<dyn FormSource>,
    attached: AtomicBool,
}

/// What happened to one submit event.
#[derive(Debug)]
pub struct SubmitDispatch {
    event: SubmitEvent,
    handle: Option<JoinHandle<SubmitOutcome>>,
}

impl SubmitDispatch {
    pub fn default_prevented(&self) -> bool {
        self.event.default_prevented()
    }

    /// Whether a handler picked the event up.
    pub fn is_handled(&self) -> bool {
        self.handle.is_some()
    }

    /// Wait for the handler to finish.
    ///
    /// `None` when no handler was attached, or the handler task was aborted.
    pub async fn outcome(self) -> Option<SubmitOutcome> {
        let handle = self.handle?;
        match handle.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(error = %e, "submit handler task failed");
                None
            }
        }
    }
}

impl<A, F> FormSubmitter<A, F>
where
    A: ProductApi + 'static,
    F: UserFeedback + 'static,
{
    /// Register this submitter as the form's submit handler.
    pub fn attach(self: &Arc<Self>, form: Arc<dyn FormSource>) -> FormBinding<A, F> {
        tracing::debug!("submit handler attached");
        FormBinding {
            submitter: Arc::clone(self),
            form,
            attached: AtomicBool::new(true),
        }
    }
}

impl<A, F> FormBinding<A, F>
where
    A: ProductApi + 'static,
    F: UserFeedback + 'static,
{
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    pub fn detach(&self) {
        if self.attached.swap(false, Ordering::AcqRel) {
            tracing::debug!("submit handler detached");
        }
    }

    pub fn reattach(&self) {
        if !self.attached.swap(true, Ordering::AcqRel) {
            tracing::debug!("submit handler attached");
        }
    }

    /// Fire a user submit on the bound form.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self) -> SubmitDispatch {
        let mut event = SubmitEvent::new();
        if !self.is_attached() {
            return SubmitDispatch {
                event,
                handle: None,
            };
        }

        let fields = self.submitter.intercept(&mut event, self.form.as_ref());
        let submitter = Arc::clone(&self.submitter);
        let handle = tokio::spawn(async move { submitter.submit(&fields).await });

        SubmitDispatch {
            event,
            handle: Some(handle),
        }
    }
}

impl<A, F> core::fmt::Debug for FormBinding<A, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FormBinding")
            .field("attached", &self.attached.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use shopadmin_products::FormFields;

    use crate::api::ApiResponse;
    use crate::feedback::RecordingFeedback;
    use crate::test_support::{test_config, FakeApi};

    struct EditableForm(Mutex<FormFields>);

    impl FormSource for EditableForm {
        fn read_fields(&self) -> FormFields {
            self.0.lock().unwrap().clone()
        }
    }

    fn bind(
        api: Arc<FakeApi>,
        form: Arc<dyn FormSource>,
    ) -> (FormBinding<Arc<FakeApi>, Arc<RecordingFeedback>>, Arc<RecordingFeedback>) {
        let feedback = Arc::new(RecordingFeedback::new());
        let submitter = Arc::new(FormSubmitter::new(test_config(), api, feedback.clone()));
        (submitter.attach(form), feedback)
    }

    #[tokio::test]
    async fn attached_submit_prevents_default_and_sends() {
        let api = Arc::new(FakeApi::responding(ApiResponse::new(201, "{}")));
        let (binding, feedback) = bind(api.clone(), Arc::new(FormFields::new("Chair", "3")));

        let dispatch = binding.submit();
        assert!(dispatch.default_prevented());
        assert!(dispatch.is_handled());

        let outcome = dispatch.outcome().await.unwrap();
        assert!(outcome.is_created());
        assert_eq!(api.requests().len(), 1);
        assert_eq!(feedback.navigations().len(), 1);
    }

    #[tokio::test]
    async fn detached_binding_lets_event_through() {
        let api = Arc::new(FakeApi::responding(ApiResponse::new(201, "{}")));
        let (binding, feedback) = bind(api.clone(), Arc::new(FormFields::new("Chair", "3")));

        binding.detach();
        assert!(!binding.is_attached());

        let dispatch = binding.submit();
        assert!(!dispatch.default_prevented());
        assert!(!dispatch.is_handled());
        assert!(dispatch.outcome().await.is_none());
        assert!(api.requests().is_empty());
        assert!(feedback.effects().is_empty());
    }

    #[tokio::test]
    async fn reattached_binding_handles_again() {
        let api = Arc::new(FakeApi::responding(ApiResponse::new(201, "{}")));
        let (binding, _feedback) = bind(api.clone(), Arc::new(FormFields::new("Chair", "3")));

        binding.detach();
        binding.reattach();

        let dispatch = binding.submit();
        assert!(dispatch.default_prevented());
        dispatch.outcome().await.unwrap();
        assert_eq!(api.requests().len(), 1);
    }

    #[tokio::test]
    async fn form_is_read_at_trigger_time() {
        let api = Arc::new(FakeApi::responding(ApiResponse::new(201, "{}")));
        let form = Arc::new(EditableForm(Mutex::new(FormFields::new("Chair", "3"))));
        let (binding, _feedback) = bind(api.clone(), form.clone());

        let dispatch = binding.submit();
        *form.0.lock().unwrap() = FormFields::new("Table", "3");
        dispatch.outcome().await.unwrap();

        assert_eq!(api.requests()[0].payload.text("name"), Some("Chair"));
    }

    #[tokio::test]
    async fn double_submit_issues_concurrent_requests() {
        // Neither request can complete until both are in flight.
        let api = Arc::new(FakeApi::responding(ApiResponse::new(201, "{}")).rendezvous(2));
        let (binding, feedback) = bind(api.clone(), Arc::new(FormFields::new("Chair", "3")));

        let first = binding.submit();
        let second = binding.submit();

        let outcomes = tokio::time::timeout(Duration::from_secs(5), async {
            (first.outcome().await, second.outcome().await)
        })
        .await
        .expect("requests were not in flight concurrently");

        assert!(outcomes.0.unwrap().is_created());
        assert!(outcomes.1.unwrap().is_created());
        let requests = api.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].payload, requests[1].payload);
        assert_eq!(feedback.navigations().len(), 2);
    }

    #[tokio::test]
    async fn detach_does_not_cancel_in_flight_submit() {
        let api = Arc::new(FakeApi::responding(ApiResponse::new(201, "{}")));
        let (binding, feedback) = bind(api.clone(), Arc::new(FormFields::new("Chair", "3")));

        let dispatch = binding.submit();
        binding.detach();

        assert!(dispatch.outcome().await.unwrap().is_created());
        assert_eq!(feedback.navigations().len(), 1);
    }
}
