use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// Terminal presentation settings for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    /// Replace box-drawing and marker glyphs with ASCII
    pub ascii_only: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            ascii_only: false,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode, ascii_only: bool) -> Self {
        Self { color, ascii_only }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    /// Create a plain output configuration (ASCII-only, no colors)
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            ascii_only: true,
        }
    }

    /// Marker for a present / absent adjacency cell
    pub fn markers(&self) -> (&'static str, &'static str) {
        if self.ascii_only {
            ("*", ".")
        } else {
            ("●", "·")
        }
    }

    pub fn rule_char(&self) -> char {
        if self.ascii_only {
            '='
        } else {
            '═'
        }
    }

    pub fn arrow(&self) -> &'static str {
        if self.ascii_only {
            "->"
        } else {
            "→"
        }
    }
}

pub trait OutputFormatter {
    fn header(&self, text: &str) -> String;
    fn highlight(&self, text: &str) -> String;
    fn success(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
}

pub struct ColoredFormatter {
    config: FormattingConfig,
}

impl ColoredFormatter {
    pub fn new(config: FormattingConfig) -> Self {
        colored::control::set_override(config.color.should_use_color());
        Self { config }
    }

    pub fn config(&self) -> &FormattingConfig {
        &self.config
    }

    fn enabled(&self) -> bool {
        self.config.color.should_use_color()
    }
}

impl OutputFormatter for ColoredFormatter {
    fn header(&self, text: &str) -> String {
        if self.enabled() {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn highlight(&self, text: &str) -> String {
        if self.enabled() {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn success(&self, text: &str) -> String {
        if self.enabled() {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.enabled() {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}
