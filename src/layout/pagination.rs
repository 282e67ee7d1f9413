//! Splitting wrapped lines into pages.

use crate::error::{Error, Result};
use crate::geometry::PageGeometry;

use super::wrap::wrap_text;

/// Line drawn on the single page produced for an empty body.
pub const EMPTY_PLACEHOLDER: &str = "(empty)";

/// One page worth of wrapped lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    /// Wrapped lines in drawing order
    pub lines: Vec<String>,
}

impl Page {
    /// Number of body lines on this page.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Partition wrapped lines into consecutive pages of `lines_per_page`.
///
/// The last page may be shorter. No lines at all gives a single page holding
/// [`EMPTY_PLACEHOLDER`].
pub fn paginate(lines: Vec<String>, lines_per_page: usize) -> Result<Vec<Page>> {
    if lines_per_page == 0 {
        return Err(Error::InvalidGeometry("lines per page is zero".to_string()));
    }

    if lines.is_empty() {
        return Ok(vec![Page {
            number: 1,
            lines: vec![EMPTY_PLACEHOLDER.to_string()],
        }]);
    }

    let pages = lines
        .chunks(lines_per_page)
        .enumerate()
        .map(|(i, chunk)| Page {
            number: i + 1,
            lines: chunk.to_vec(),
        })
        .collect();
    Ok(pages)
}

/// Wrap `text` to `max_columns` and paginate it.
pub fn layout(text: &str, max_columns: usize, lines_per_page: usize) -> Result<Vec<Page>> {
    if max_columns == 0 {
        return Err(Error::InvalidGeometry("column budget is zero".to_string()));
    }
    let lines = wrap_text(text, max_columns);
    let total = lines.len();
    let pages = paginate(lines, lines_per_page)?;
    log::debug!(
        "layout: {} wrapped lines over {} page(s), {} per page",
        total,
        pages.len(),
        lines_per_page
    );
    Ok(pages)
}

/// [`layout`] driven by a validated [`PageGeometry`].
pub fn layout_with_geometry(text: &str, geometry: &PageGeometry) -> Result<Vec<Page>> {
    geometry.validate()?;
    layout(text, geometry.max_columns, geometry.lines_per_page())
}
