//! Form surface consumed by the submitter.

use shopadmin_products::FormFields;

/// Anything that can hand over the current values of the create-product form.
///
/// Read once per submit, at trigger time.
pub trait FormSource: Send + Sync {
    fn read_fields(&self) -> FormFields;
}

impl FormSource for FormFields {
    fn read_fields(&self) -> FormFields {
        self.clone()
    }
}

impl<T: FormSource + ?Sized> FormSource for std::sync::Arc<T> {
    fn read_fields(&self) -> FormFields {
        (**self).read_fields()
    }
}

/// A user-initiated submit.
///
/// Unless a handler calls [`SubmitEvent::prevent_default`], the host performs
/// its own navigation-on-submit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
