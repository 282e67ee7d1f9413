//! Page geometry for exported documents.
//!
//! All measurements are in PDF points (1/72 inch).

use crate::error::{Error, Result};

/// US Letter width in points.
pub const LETTER_WIDTH: f32 = 612.0;
/// US Letter height in points.
pub const LETTER_HEIGHT: f32 = 792.0;
/// Default margin on every side (1 inch).
pub const DEFAULT_MARGIN: f32 = 72.0;
/// Body font size.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;
/// Baseline-to-baseline distance.
pub const DEFAULT_LINE_HEIGHT: f32 = 15.0;
/// Rows reserved per page: the title row, the blank row under it and one spare.
pub const DEFAULT_HEADER_RESERVE: usize = 3;
/// Character budget of a wrapped line.
pub const DEFAULT_MAX_COLUMNS: usize = 88;

/// Fixed page geometry shared by layout and the content stream builder.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Left margin (x of the text origin)
    pub margin_left: f32,
    /// Top margin (text origin sits this far below the top edge)
    pub margin_top: f32,
    /// Bottom margin
    pub margin_bottom: f32,
    /// Font size used for every line
    pub font_size: f32,
    /// Line advance
    pub line_height: f32,
    /// Lines reserved for the per-page title block
    pub header_reserve: usize,
    /// Maximum characters per wrapped line
    pub max_columns: usize,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

impl PageGeometry {
    /// US Letter with one inch margins.
    pub fn letter() -> Self {
        Self {
            width: LETTER_WIDTH,
            height: LETTER_HEIGHT,
            margin_left: DEFAULT_MARGIN,
            margin_top: DEFAULT_MARGIN,
            margin_bottom: DEFAULT_MARGIN,
            font_size: DEFAULT_FONT_SIZE,
            line_height: DEFAULT_LINE_HEIGHT,
            header_reserve: DEFAULT_HEADER_RESERVE,
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }

    /// Set page dimensions.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the same margin on every side.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin_left = margin;
        self.margin_top = margin;
        self.margin_bottom = margin;
        self
    }

    /// Set the line advance.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Set the wrap column budget.
    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    /// Body lines that fit on one page below the title block.
    ///
    /// `floor((height - margin_top - margin_bottom) / line_height) - header_reserve`,
    /// saturating at zero. Use [`validate`](Self::validate) to reject zero.
    pub fn lines_per_page(&self) -> usize {
        if self.line_height <= 0.0 {
            return 0;
        }
        let usable = self.height - self.margin_top - self.margin_bottom;
        if usable <= 0.0 {
            return 0;
        }
        let total = (usable / self.line_height).floor() as usize;
        total.saturating_sub(self.header_reserve)
    }

    /// Text origin: left margin, `margin_top` below the top edge.
    pub fn text_origin(&self) -> (f32, f32) {
        (self.margin_left, self.height - self.margin_top)
    }

    /// Reject geometry that leaves no room for body text.
    pub fn validate(&self) -> Result<()> {
        if self.max_columns == 0 {
            return Err(Error::InvalidGeometry("column budget is zero".to_string()));
        }
        if self.lines_per_page() == 0 {
            return Err(Error::InvalidGeometry(format!(
                "{}x{} page with {} pt lines has no room below the title",
                self.width, self.height, self.line_height
            )));
        }
        Ok(())
    }
}
