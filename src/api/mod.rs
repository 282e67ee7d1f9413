//! Caller-facing export API.
//!
//! Wraps the layout → build → serialize pipeline behind a request/response
//! pair suitable for an HTTP download handler:
//! - `ExportRequest` validation (missing title or body is a 400)
//! - `PdfExport` to render with a chosen geometry
//! - Suggested filenames per export variant
//!
//! ## Quick Start
//!
//! ```ignore
//! use lesson_pdf::api::{generate_pdf, ExportRequest, PdfExport};
//!
//! // Plain bytes
//! let bytes = generate_pdf("Fractions", "Warm-up\nGroup work")?;
//!
//! // Full response with filename and status
//! let request = ExportRequest::from_json(r#"{"title":"Fractions","body":"Warm-up"}"#)?;
//! let response = PdfExport::new().export(&request)?;
//! ```

mod export;

pub use export::{
    generate_pdf, suggested_filename, ExportRequest, ExportResponse, ExportVariant, PdfExport,
    PDF_MIME_TYPE,
};
