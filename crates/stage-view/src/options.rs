//! Session-wide options threaded through elaboration.

/// Recognized session options. `extra` preserves any unrecognized keys a
/// loader (e.g. `stage-config`) picked up from a config file, so round-tripping
/// a config through this type never silently drops fields it doesn't know about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub theme: Option<String>,
    /// Suppress visual output; a session in this mode is expected to drive
    /// only the event backend (log-replay, non-TTY deployments).
    pub headless: bool,
    pub extra: Vec<(String, String)>,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }
}
