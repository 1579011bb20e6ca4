//! What the user sees after a submit: a navigation or an alert.

use std::sync::{Arc, Mutex};

use url::Url;

/// UI seam standing in for page navigation and `alert()`.
pub trait UserFeedback: Send + Sync {
    /// Full navigation away from the form.
    fn navigate(&self, destination: &Url);

    /// Blocking user-visible message; the form stays on screen.
    fn alert(&self, message: &str);
}

impl<T: UserFeedback + ?Sized> UserFeedback for Arc<T> {
    fn navigate(&self, destination: &Url) {
        (**self).navigate(destination)
    }

    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}

/// Terminal implementation used by the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleFeedback;

impl UserFeedback for ConsoleFeedback {
    fn navigate(&self, destination: &Url) {
        tracing::info!(%destination, "navigating");
        println!("{destination}");
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Observable effect recorded by [`RecordingFeedback`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Navigated(Url),
    Alerted(String),
}

/// Records every effect in order. Useful for embedding and tests.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    effects: Mutex<Vec<Effect>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, effect: Effect) {
        if let Ok(mut effects) = self.effects.lock() {
            effects.push(effect);
        }
    }

    pub fn effects(&self) -> Vec<Effect> {
        self.effects.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.effects()
            .into_iter()
            .filter_map(|e| match e {
                Effect::Alerted(m) => Some(m),
                Effect::Navigated(_) => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<Url> {
        self.effects()
            .into_iter()
            .filter_map(|e| match e {
                Effect::Navigated(u) => Some(u),
                Effect::Alerted(_) => None,
            })
            .collect()
    }
}

impl UserFeedback for RecordingFeedback {
    fn navigate(&self, destination: &Url) {
        self.record(Effect::Navigated(destination.clone()));
    }

    fn alert(&self, message: &str) {
        self.record(Effect::Alerted(message.to_string()));
    }
}
