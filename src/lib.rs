// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Lesson PDF
//!
//! Minimal PDF export for lesson plans and other teaching material.
//!
//! ## Pipeline
//!
//! - **Text layout**: fixed-column wrapping (88 characters) and pagination
//!   against US Letter geometry
//! - **Document objects**: catalog, page tree, one page and content stream per
//!   page, a single shared Helvetica font
//! - **Serializer**: header, objects, cross-reference table and trailer with
//!   offsets taken from the bytes actually written
//!
//! Every call builds its document from scratch; there is no shared state, so
//! concurrent exports need no coordination.
//!
//! ## Quick Start
//!
//! ```ignore
//! use lesson_pdf::api::{ExportRequest, PdfExport};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = ExportRequest::new("Photosynthesis", "Objectives\nWarm-up\nLab");
//! let response = PdfExport::new().export(&request)?;
//! response.save(&response.filename)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 (<http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license (<http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Object model
pub mod object;

// Page geometry and text layout
pub mod geometry;
pub mod layout;

// PDF writing
pub mod writer;

// High-level export API
pub mod api;

// Re-exports
pub use api::{generate_pdf, ExportRequest, ExportResponse, ExportVariant, PdfExport};
pub use error::{Error, Result, Stage};
pub use geometry::PageGeometry;
pub use layout::{layout, Page};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
