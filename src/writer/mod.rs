//! PDF writing module for generating export files.
//!
//! ## Architecture
//!
//! ```text
//! Page[] (from layout)
//!     ↓
//! [DocumentBuilder] (pages → object graph, one content stream per page)
//!     ↓
//! [ContentStreamBuilder] (text operators → content stream bytes)
//!     ↓
//! [PdfWriter] (header, objects, xref table, trailer)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use lesson_pdf::layout::layout;
//! use lesson_pdf::writer::{DocumentBuilder, PdfWriter};
//!
//! let pages = layout("Warm-up\nGroup work", 88, 40)?;
//! let graph = DocumentBuilder::new().build("Fractions", &pages)?;
//! let bytes = PdfWriter::new().serialize(&graph)?;
//! ```

mod content_stream;
mod document_builder;
mod object_serializer;
mod pdf_writer;

pub use content_stream::{escape_literal, ContentStreamBuilder, ContentStreamOp};
pub use document_builder::{
    DocumentBuilder, DocumentObject, ObjectGraph, ObjectKind, CATALOG_ID, PAGES_ID,
};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{PdfWriter, PdfWriterConfig, SerializedDocument, XrefEntry};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let _serializer = ObjectSerializer::new();
        let _builder = ContentStreamBuilder::new();
        let _writer = PdfWriter::default();
    }
}
