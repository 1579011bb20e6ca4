//! Products domain module (client side).
//!
//! This crate turns a raw admin form snapshot into a validated product draft
//! and the multipart payload sent to the Product API. It is pure logic: no IO,
//! no HTTP.

pub mod draft;
pub mod fields;
pub mod payload;

pub use draft::{
    parse_price, DraftError, FormFields, ImageAttachment, ProductDraft, RequiredField,
};
pub use fields::FieldNames;
pub use payload::{MultipartPayload, Part, PartValue};
