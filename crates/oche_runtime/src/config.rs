//! Configuration for the REPL.

/// Settings consumed by [`crate::Repl`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Print the welcome banner on start.
    pub show_banner: bool,

    /// Emit ANSI colors in prompts, errors, and the board.
    pub color: bool,

    /// Log at debug level instead of warn.
    pub trace: bool,

    /// Primary prompt.
    pub prompt: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            show_banner: true,
            color: true,
            trace: false,
            prompt: "oche> ".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Builder method to toggle the banner.
    #[must_use]
    pub fn with_banner(mut self, show_banner: bool) -> Self {
        self.show_banner = show_banner;
        self
    }

    /// Builder method to toggle colored output.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Builder method to toggle debug logging.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Builder method to set the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Default log filter directive when `RUST_LOG` is unset.
    #[must_use]
    pub fn log_directive(&self) -> &'static str {
        if self.trace { "debug" } else { "warn" }
    }

    /// Wraps `text` in an ANSI style when color is enabled.
    #[must_use]
    pub fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{style}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}
