//! Pagination options and configuration.

use crate::error::{Error, Result};
use crate::model::{CANVAS_HEIGHT, CANVAS_WIDTH};
use serde::{Deserialize, Serialize};

/// Size of the reading surface showing one spread (two pages side by side).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Spread width in pixels
    pub width: f32,
    /// Spread height in pixels
    pub height: f32,
}

impl Viewport {
    /// Create a viewport.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

/// Fixed typography used when measuring page text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    /// CSS-style font family list
    pub font_family: String,
    /// Font size in pixels
    pub font_size: f32,
    /// Line height as a multiple of the font size
    pub line_height: f32,
}

impl Typography {
    /// Line height in pixels.
    pub fn line_height_px(&self) -> f32 {
        self.font_size * self.line_height
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: "Georgia, serif".to_string(),
            font_size: 18.0,
            line_height: 1.6,
        }
    }
}

/// Options for the post-pass page balancer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceOptions {
    /// Run the balancing pass at all
    pub enabled: bool,
    /// A left page with fewer characters than this counts as very short
    pub short_page_chars: usize,
    /// A right page with more characters than this counts as very long
    pub long_page_chars: usize,
    /// The right page must also be at least this many times the left
    pub long_to_short_ratio: f32,
    /// Maximum whole sentences moved per page pair
    pub max_sentences: usize,
}

impl Default for BalanceOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            short_page_chars: 120,
            long_page_chars: 600,
            long_to_short_ratio: 3.0,
            max_sentences: 3,
        }
    }
}

/// Options for splitting a narrative into page chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationOptions {
    /// Reading surface size
    pub viewport: Viewport,

    /// Typography for measured pagination
    pub typography: Typography,

    /// Inner padding of each page in pixels
    pub page_padding: f32,

    /// Character capacity per page when no measurement is available
    pub char_budget: usize,

    /// Separator placed between chunks when they are rejoined
    pub separator: String,

    /// Balancer settings
    pub balance: BalanceOptions,
}

impl PaginationOptions {
    /// Create new pagination options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the typography.
    pub fn with_typography(mut self, typography: Typography) -> Self {
        self.typography = typography;
        self
    }

    /// Set the page padding.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.page_padding = padding;
        self
    }

    /// Set the fallback character budget.
    pub fn with_char_budget(mut self, chars: usize) -> Self {
        self.char_budget = chars;
        self
    }

    /// Set balancer options.
    pub fn with_balance(mut self, balance: BalanceOptions) -> Self {
        self.balance = balance;
        self
    }

    /// Disable the balancing pass.
    pub fn without_balance(mut self) -> Self {
        self.balance.enabled = false;
        self
    }

    /// Text width of a single page.
    pub fn page_width(&self) -> f32 {
        (self.viewport.width / 2.0 - 2.0 * self.page_padding).max(0.0)
    }

    /// Text height of a single page.
    pub fn page_height(&self) -> f32 {
        (self.viewport.height - 2.0 * self.page_padding).max(0.0)
    }

    /// Validate option consistency.
    pub fn validate(&self) -> Result<()> {
        if self.char_budget == 0 {
            return Err(Error::InvalidConfig(
                "char_budget must be positive".to_string(),
            ));
        }
        if !(self.typography.font_size > 0.0 && self.typography.line_height > 0.0) {
            return Err(Error::InvalidConfig(
                "font_size and line_height must be positive".to_string(),
            ));
        }
        if !(self.viewport.width.is_finite() && self.viewport.height.is_finite()) {
            return Err(Error::InvalidConfig(
                "viewport dimensions must be finite".to_string(),
            ));
        }
        if !self.separator.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "separator must consist of whitespace only".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            typography: Typography::default(),
            page_padding: 48.0,
            char_budget: 900,
            separator: "\n\n".to_string(),
            balance: BalanceOptions::default(),
        }
    }
}
