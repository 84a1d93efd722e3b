//! Browser command-line options and WebDriver capabilities.
//!
//! Provides a type-safe interface for the Chromium process options
//! requested when a WebDriver session is created.
//!
//! # Example
//!
//! ```ignore
//! use eprel_scraper::BrowserOptions;
//!
//! let options = BrowserOptions::new()
//!     .with_headless()
//!     .with_window_size(1920, 1080);
//!
//! let caps = options.to_capabilities();
//! // {"goog:chromeOptions": {"args": ["--autoplay-policy=...", ..., "--headless=new", ...]}}
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

// ============================================================================
// Constants
// ============================================================================

/// Capability key carrying Chromium launch options.
pub const CHROME_OPTIONS_KEY: &str = "goog:chromeOptions";

/// Minimal flag set for a quiet, throttle-free automation browser.
pub const MINIMAL_ARGS: &[&str] = &[
    "--autoplay-policy=user-gesture-required",
    "--disable-background-networking",
    "--disable-background-timer-throttling",
    "--disable-backgrounding-occluded-windows",
    "--disable-breakpad",
    "--disable-client-side-phishing-detection",
    "--disable-component-update",
    "--disable-default-apps",
    "--disable-dev-shm-usage",
    "--disable-domain-reliability",
    "--disable-extensions",
    "--disable-features=AudioServiceOutOfProcess",
    "--disable-hang-monitor",
    "--disable-ipc-flooding-protection",
    "--disable-notifications",
    "--disable-offer-store-unmasked-wallet-cards",
    "--disable-popup-blocking",
    "--disable-print-preview",
    "--disable-prompt-on-repost",
    "--disable-renderer-backgrounding",
    "--disable-setuid-sandbox",
    "--disable-speech-api",
    "--disable-sync",
    "--hide-scrollbars",
    "--ignore-gpu-blacklist",
    "--metrics-recording-only",
    "--mute-audio",
    "--no-default-browser-check",
    "--no-first-run",
    "--no-pings",
    "--no-sandbox",
    "--no-zygote",
    "--password-store=basic",
    "--use-gl=swiftshader",
    "--use-mock-keychain",
];

// ============================================================================
// BrowserOptions
// ============================================================================

/// Browser process configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserOptions {
    /// Run the browser without a visible window.
    pub headless: bool,

    /// Window dimensions in pixels (width, height).
    pub window_size: Option<(u32, u32)>,

    /// Command-line arguments. Defaults to [`MINIMAL_ARGS`].
    pub args: Vec<String>,

    /// Browser binary, when WebDriver should not pick its default.
    pub binary: Option<PathBuf>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl BrowserOptions {
    /// Creates options with the minimal flag set, headed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            headless: false,
            window_size: None,
            args: MINIMAL_ARGS.iter().map(|arg| (*arg).to_string()).collect(),
            binary: None,
        }
    }

    /// Creates options without any default flags.
    #[inline]
    #[must_use]
    pub fn bare() -> Self {
        Self {
            args: Vec::new(),
            ..Self::new()
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl BrowserOptions {
    /// Enables headless mode.
    #[inline]
    #[must_use]
    pub fn with_headless(mut self) -> Self {
        self.headless = true;
        self
    }

    /// Sets window size in pixels.
    #[inline]
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = Some((width, height));
        self
    }

    /// Adds a custom command-line argument.
    #[inline]
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple custom command-line arguments.
    #[inline]
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the browser binary.
    #[inline]
    #[must_use]
    pub fn with_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.binary = Some(path.into());
        self
    }
}

// ============================================================================
// Conversion Methods
// ============================================================================

impl BrowserOptions {
    /// Converts options to browser command-line arguments.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.args.len() + 2);
        args.extend(self.args.iter().cloned());

        if self.headless {
            args.push("--headless=new".to_string());
        }

        if let Some((width, height)) = self.window_size {
            args.push(format!("--window-size={width},{height}"));
        }

        args
    }

    /// Converts options to WebDriver session capabilities.
    #[must_use]
    pub fn to_capabilities(&self) -> Map<String, Value> {
        let mut chrome = Map::new();
        chrome.insert("args".to_string(), json!(self.to_args()));

        if let Some(binary) = &self.binary {
            chrome.insert(
                "binary".to_string(),
                Value::String(binary.display().to_string()),
            );
        }

        let mut caps = Map::new();
        caps.insert(CHROME_OPTIONS_KEY.to_string(), Value::Object(chrome));
        caps
    }

    /// Validates the options configuration.
    ///
    /// # Errors
    ///
    /// Returns error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if let Some((width, height)) = self.window_size
            && (width == 0 || height == 0)
        {
            return Err("Window dimensions must be greater than zero".to_string());
        }

        if let Some(arg) = self.args.iter().find(|arg| !arg.starts_with("--")) {
            return Err(format!("Browser argument must start with '--': {arg}"));
        }

        Ok(())
    }

    /// Returns `true` if headless mode is enabled.
    #[inline]
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.headless
    }
}

// ============================================================================
// Tests
// ============================================================================
