//! Text layout for exported documents.
//!
//! Turns a plain-text body into pages of wrapped lines:
//! - Fixed-column wrapping (characters, not glyph widths)
//! - Pagination against the page geometry

pub mod pagination;
pub mod wrap;

// Re-export main types
pub use pagination::{layout, layout_with_geometry, paginate, Page, EMPTY_PLACEHOLDER};
pub use wrap::{wrap_line, wrap_text};
