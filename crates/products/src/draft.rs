use thiserror::Error;

use shopadmin_core::{CategoryId, ValueObject};

/// A file picked in the form's image input.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

// Image bodies can be megabytes; log the size, not the bytes.
impl core::fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Raw snapshot of the create-product form, exactly as the inputs hold it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub description: String,
    /// Raw text of the numeric price input.
    pub price: String,
    /// Raw value of the category selector.
    pub category_id: String,
    /// Files currently selected in the image picker.
    pub images: Vec<ImageAttachment>,
}

impl FormFields {
    pub fn new(name: impl Into<String>, category_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category_id: category_id.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.images.push(image);
        self
    }
}

/// Fields that must be non-blank before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Category,
}

impl core::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RequiredField::Name => f.write_str("name"),
            RequiredField::Category => f.write_str("category"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("missing required fields: {}", join_fields(.0))]
    MissingRequiredFields(Vec<RequiredField>),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse the price input the way a browser's `parseInt(value, 10) || 0` does,
/// clamped to the non-negative range.
///
/// Leading whitespace and an optional sign are skipped, then the longest run
/// of ASCII digits is read; anything after it is ignored (`"12.5"` is 12).
/// No digits, or a negative number, yields 0. Values beyond `u64::MAX`
/// saturate rather than fail.
pub fn parse_price(raw: &str) -> u64 {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if digits.is_empty() || negative {
        return 0;
    }

    digits.bytes().fold(0u64, |acc, d| {
        acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
    })
}

/// Validated, transient product draft built at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    name: String,
    description: String,
    price: u64,
    category_id: CategoryId,
    image: Option<ImageAttachment>,
}

impl ValueObject for ProductDraft {}

impl ProductDraft {
    /// Build a draft from a form snapshot.
    ///
    /// Name and category are the only gate: both must be non-blank after
    /// trimming. Every missing field is reported, not just the first.
    pub fn from_fields(fields: &FormFields) -> Result<Self, DraftError> {
        let name = fields.name.trim();
        let category_id = CategoryId::parse(&fields.category_id).ok();

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push(RequiredField::Name);
        }
        let Some(category_id) = category_id else {
            missing.push(RequiredField::Category);
            return Err(DraftError::MissingRequiredFields(missing));
        };
        if !missing.is_empty() {
            return Err(DraftError::MissingRequiredFields(missing));
        }

        Ok(Self {
            name: name.to_string(),
            description: fields.description.trim().to_string(),
            price: parse_price(&fields.price),
            category_id,
            // Only the first selected file is ever sent.
            image: fields.images.first().cloned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }
}
