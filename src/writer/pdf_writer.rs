//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer. Offsets in the xref table are the
//! lengths of bytes actually emitted before each object.

use super::document_builder::ObjectGraph;
use super::object_serializer::ObjectSerializer;
use crate::error::{Error, Result};
use std::io::Write;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.4")
    pub version: String,
    /// Emit the binary-marker comment after the header line
    pub binary_marker: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.4".to_string(),
            binary_marker: true,
        }
    }
}

impl PdfWriterConfig {
    /// Set the header version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Enable or disable the binary-marker comment.
    pub fn with_binary_marker(mut self, enabled: bool) -> Self {
        self.binary_marker = enabled;
        self
    }
}

/// One in-use cross-reference entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrefEntry {
    /// Object number
    pub id: u32,
    /// Byte offset of `id 0 obj` from the start of the file
    pub offset: usize,
}

/// Serialized document plus the byte accounting that went into it.
#[derive(Debug, Clone)]
pub struct SerializedDocument {
    /// Complete file contents
    pub bytes: Vec<u8>,
    /// In-use xref entries in identifier order
    pub xref: Vec<XrefEntry>,
    /// Offset of the `xref` keyword
    pub startxref: usize,
}

/// PDF document writer.
///
/// Serializes an [`ObjectGraph`] into a complete file.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    config: PdfWriterConfig,
    serializer: ObjectSerializer,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            serializer: ObjectSerializer::new(),
        }
    }

    /// Serialize `graph` into PDF bytes.
    pub fn serialize(&self, graph: &ObjectGraph) -> Result<Vec<u8>> {
        Ok(self.serialize_with_xref(graph)?.bytes)
    }

    /// Serialize `graph`, also returning the cross-reference entries.
    pub fn serialize_with_xref(&self, graph: &ObjectGraph) -> Result<SerializedDocument> {
        check_graph(graph)?;

        let mut output = Vec::new();
        let mut xref = Vec::with_capacity(graph.len());

        // PDF Header
        writeln!(output, "%PDF-{}", self.config.version)?;
        if self.config.binary_marker {
            output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");
        }

        for obj in graph.objects() {
            let offset = output.len();
            log::trace!("object {} ({:?}) at offset {}", obj.id, obj.kind, offset);
            xref.push(XrefEntry { id: obj.id, offset });
            output.extend_from_slice(&self.serializer.serialize_indirect(obj.id, 0, &obj.object)?);
        }

        let size = graph.len() + 1;
        let startxref = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", size)?;
        // Object 0 is always free
        writeln!(output, "0000000000 65535 f ")?;
        for entry in &xref {
            writeln!(output, "{:010} 00000 n ", entry.offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(size as i64)),
            ("Root", ObjectSerializer::reference(graph.root(), 0)),
        ]);
        writeln!(output, "trailer")?;
        output.extend_from_slice(&self.serializer.serialize(&trailer)?);
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", startxref)?;
        writeln!(output, "%%EOF")?;

        log::debug!(
            "serialize: {} objects, {} bytes, xref at {}",
            graph.len(),
            output.len(),
            startxref
        );
        Ok(SerializedDocument {
            bytes: output,
            xref,
            startxref,
        })
    }

    /// Serialize `graph` and write it to `path`.
    pub fn save(&self, graph: &ObjectGraph, path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.serialize(graph)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifiers must run 1..=n in order and every reference, the trailer root
/// included, must land inside that range.
fn check_graph(graph: &ObjectGraph) -> Result<()> {
    for (i, obj) in graph.objects().iter().enumerate() {
        let expected = i as u32 + 1;
        if obj.id != expected {
            return Err(Error::NonSequentialObject {
                expected,
                found: obj.id,
            });
        }
    }

    let defined = graph.len() as u32;
    let resolves = |id: u32| id >= 1 && id <= defined;

    if !resolves(graph.root()) {
        return Err(Error::UnresolvedReference {
            from: 0,
            target: graph.root(),
        });
    }
    for obj in graph.objects() {
        if let Some(r) = obj.object.references().into_iter().find(|r| !resolves(r.id)) {
            return Err(Error::UnresolvedReference {
                from: obj.id,
                target: r.id,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Page;
    use crate::writer::document_builder::{DocumentBuilder, DocumentObject, ObjectKind};

    fn one_page_graph() -> ObjectGraph {
        let pages = vec![Page {
            number: 1,
            lines: vec!["Hello, World!".to_string()],
        }];
        DocumentBuilder::new().build("Title", &pages).unwrap()
    }

    #[test]
    fn test_create_pdf_structure() {
        let bytes = PdfWriter::new().serialize(&one_page_graph()).unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.starts_with("%PDF-1.4\n"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Type /Pages"));
        assert!(content.contains("/Type /Page "));
        assert!(content.contains("/BaseFont /Helvetica"));
        assert!(content.contains("(Hello, World!) Tj"));
        assert!(content.contains("trailer\n<</Size 6 /Root 1 0 R>>\n"));
        assert!(content.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_offsets_point_at_object_headers() {
        let doc = PdfWriter::new().serialize_with_xref(&one_page_graph()).unwrap();
        assert_eq!(doc.xref.len(), 5);
        for entry in &doc.xref {
            let marker = format!("{} 0 obj", entry.id);
            assert!(doc.bytes[entry.offset..].starts_with(marker.as_bytes()));
        }
        assert!(doc.bytes[doc.startxref..].starts_with(b"xref\n0 6\n0000000000 65535 f \n"));
    }

    #[test]
    fn test_startxref_matches() {
        let doc = PdfWriter::new().serialize_with_xref(&one_page_graph()).unwrap();
        let tail = format!("startxref\n{}\n%%EOF\n", doc.startxref);
        assert!(doc.bytes.ends_with(tail.as_bytes()));
    }

    #[test]
    fn test_xref_lines_are_twenty_bytes() {
        let doc = PdfWriter::new().serialize_with_xref(&one_page_graph()).unwrap();
        let table = &doc.bytes[doc.startxref..];
        let text = String::from_utf8_lossy(table);
        for line in text.split_inclusive('\n').skip(2).take(6) {
            assert_eq!(line.len(), 20, "{:?}", line);
        }
    }

    #[test]
    fn test_without_binary_marker() {
        let writer = PdfWriter::with_config(
            PdfWriterConfig::default()
                .with_version("1.7")
                .with_binary_marker(false),
        );
        let doc = writer.serialize_with_xref(&one_page_graph()).unwrap();
        assert!(doc.bytes.starts_with(b"%PDF-1.7\n1 0 obj"));
        assert_eq!(doc.xref[0].offset, "%PDF-1.7\n".len());
    }

    #[test]
    fn test_dangling_reference_fails() {
        let objects = vec![DocumentObject {
            id: 1,
            kind: ObjectKind::Catalog,
            object: ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Catalog")),
                ("Pages", ObjectSerializer::reference(2, 0)),
            ]),
        }];
        let graph = ObjectGraph::from_objects(objects, 1);
        let err = PdfWriter::new().serialize(&graph).unwrap_err();
        assert!(matches!(err, Error::UnresolvedReference { from: 1, target: 2 }));
    }

    #[test]
    fn test_missing_root_fails() {
        let graph = ObjectGraph::from_objects(Vec::new(), 1);
        let err = PdfWriter::new().serialize(&graph).unwrap_err();
        assert!(matches!(err, Error::UnresolvedReference { from: 0, target: 1 }));
    }

    #[test]
    fn test_gap_in_identifiers_fails() {
        let mut objects = one_page_graph().objects().to_vec();
        objects.remove(2);
        let graph = ObjectGraph::from_objects(objects, 1);
        let err = PdfWriter::new().serialize(&graph).unwrap_err();
        assert!(matches!(
            err,
            Error::NonSequentialObject {
                expected: 3,
                found: 4
            }
        ));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        PdfWriter::new().save(&one_page_graph(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
