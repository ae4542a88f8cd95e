//! Single-slot status region.

/// Holds the last outcome message. Every `show` replaces the previous text
/// in full; there is no history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusChannel {
    message: String,
}

impl StatusChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, text: impl Into<String>) {
        self.message = text.into();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
