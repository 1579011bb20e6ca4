//! `shopadmin-core` — primitives shared by the admin client crates.
//!
//! This crate contains **pure** building blocks (no IO, no HTTP).

pub mod error;
pub mod id;
pub mod token;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, SubmissionId};
pub use token::CsrfToken;
pub use value_object::ValueObject;
