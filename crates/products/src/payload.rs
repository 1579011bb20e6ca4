//! Transport-neutral multipart payload.
//!
//! The HTTP layer maps this onto its own form type; the boundary and the
//! content-type header are left to it.

use crate::draft::{ImageAttachment, ProductDraft};
use crate::fields::FieldNames;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(ImageAttachment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub value: PartValue,
}

/// Ordered list of form-data parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    parts: Vec<Part>,
}

impl MultipartPayload {
    /// Build the create-product payload.
    ///
    /// Text fields are always present (description may be empty). The image
    /// part is appended only when the draft carries a file.
    pub fn from_draft(draft: &ProductDraft, names: &FieldNames) -> Self {
        let mut payload = Self::default();
        payload.push_text(&names.name, draft.name());
        payload.push_text(&names.description, draft.description());
        payload.push_text(&names.price, draft.price().to_string());
        payload.push_text(&names.category_id, draft.category_id().as_str());
        if let Some(image) = draft.image() {
            payload.push_file(&names.image, image.clone());
        }
        payload
    }

    pub fn push_text(&mut self, name: &str, value: impl Into<String>) {
        self.parts.push(Part {
            name: name.to_string(),
            value: PartValue::Text(value.into()),
        });
    }

    pub fn push_file(&mut self, name: &str, file: ImageAttachment) {
        self.parts.push(Part {
            name: name.to_string(),
            value: PartValue::File(file),
        });
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|p| p.name == name)
    }

    /// First text value stored under `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match &p.value {
            PartValue::Text(v) if p.name == name => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn files<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ImageAttachment> + 'a {
        self.parts.iter().filter_map(move |p| match &p.value {
            PartValue::File(f) if p.name == name => Some(f),
            _ => None,
        })
    }
}
