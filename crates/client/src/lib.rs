//! `shopadmin-client`
//!
//! **Responsibility:** submit the admin "create product" form to the Product API.
//!
//! This crate provides:
//! - Injected configuration (endpoint, redirect target, anti-forgery token)
//! - A transport seam ([`ProductApi`]) with a reqwest implementation
//! - A UI seam ([`UserFeedback`]) for navigation and alerts
//! - The submit handler ([`FormSubmitter`]) and its attach/detach binding
//!
//! The client is a **thin shell**: the server stays the authority on what a
//! valid product is; locally only presence of the required fields is checked.

pub mod api;
pub mod binding;
pub mod config;
pub mod feedback;
pub mod form;
pub mod submitter;

pub use api::{ApiResponse, CreateProductRequest, HttpProductApi, ProductApi, TransportError};
pub use binding::{FormBinding, SubmitDispatch};
pub use config::{ConfigError, Messages, SubmitterConfig};
pub use feedback::{ConsoleFeedback, Effect, RecordingFeedback, UserFeedback};
pub use form::{FormSource, SubmitEvent};
pub use submitter::{FormSubmitter, SubmitError, SubmitOutcome};

#[cfg(test)]
mod test_support;
