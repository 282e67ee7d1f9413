//! Object graph construction for exported documents.
//!
//! Identifiers are assigned in a fixed order: catalog 1, page tree 2, then a
//! (page, content stream) pair per page, and the shared font last.

use super::content_stream::ContentStreamBuilder;
use super::object_serializer::{check_stream_length, ObjectSerializer};
use crate::error::Result;
use crate::geometry::PageGeometry;
use crate::layout::Page;
use crate::object::{Dictionary, Object};

/// Identifier of the document catalog.
pub const CATALOG_ID: u32 = 1;
/// Identifier of the page tree root.
pub const PAGES_ID: u32 = 2;

/// Role of an object in the document graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Document catalog (root)
    Catalog,
    /// Page tree root
    Pages,
    /// Page with the given 1-based number
    Page(usize),
    /// Content stream of the given 1-based page
    ContentStream(usize),
    /// Shared font resource
    Font,
}

/// One indirect object of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentObject {
    /// Object number
    pub id: u32,
    /// What the object is
    pub kind: ObjectKind,
    /// Object body
    pub object: Object,
}

/// All objects of one document, in ascending identifier order.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectGraph {
    objects: Vec<DocumentObject>,
    root: u32,
}

impl ObjectGraph {
    /// Wrap a hand-assembled object list whose root is `root`.
    ///
    /// No checking happens here; the writer validates identifiers and
    /// references before it emits anything.
    pub fn from_objects(objects: Vec<DocumentObject>, root: u32) -> Self {
        Self { objects, root }
    }

    /// Objects in identifier order.
    pub fn objects(&self) -> &[DocumentObject] {
        &self.objects
    }

    /// Number of objects (the free entry 0 not included).
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the graph holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Identifier of the catalog named in the trailer.
    pub fn root(&self) -> u32 {
        self.root
    }

    /// Look up an object by identifier.
    pub fn get(&self, id: u32) -> Option<&DocumentObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Number of page objects.
    pub fn page_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|o| matches!(o.kind, ObjectKind::Page(_)))
            .count()
    }

    /// Serialized `N 0 obj ... endobj` bodies keyed by identifier, before any
    /// offsets are known.
    pub fn serialized_bodies(&self, serializer: &ObjectSerializer) -> Result<Vec<(u32, Vec<u8>)>> {
        self.objects
            .iter()
            .map(|o| Ok((o.id, serializer.serialize_indirect(o.id, 0, &o.object)?)))
            .collect()
    }
}

/// Builds the object graph for a titled, paginated text document.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    geometry: PageGeometry,
    base_font: String,
    font_resource: String,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Builder with US Letter geometry and Helvetica.
    pub fn new() -> Self {
        Self::with_geometry(PageGeometry::default())
    }

    /// Builder with custom geometry.
    pub fn with_geometry(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            base_font: "Helvetica".to_string(),
            font_resource: "F1".to_string(),
        }
    }

    /// Page geometry in use.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Build the objects for `title` drawn on top of every page in `pages`.
    pub fn build(&self, title: &str, pages: &[Page]) -> Result<ObjectGraph> {
        let page_count = pages.len() as u32;
        let font_id = PAGES_ID + 2 * page_count + 1;
        let page_ids: Vec<(u32, u32)> = (0..page_count)
            .map(|i| (PAGES_ID + 1 + 2 * i, PAGES_ID + 2 + 2 * i))
            .collect();

        let mut objects = Vec::with_capacity(page_ids.len() * 2 + 3);

        objects.push(DocumentObject {
            id: CATALOG_ID,
            kind: ObjectKind::Catalog,
            object: ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Catalog")),
                ("Pages", ObjectSerializer::reference(PAGES_ID, 0)),
            ]),
        });

        let kids = page_ids
            .iter()
            .map(|&(page_id, _)| ObjectSerializer::reference(page_id, 0))
            .collect();
        objects.push(DocumentObject {
            id: PAGES_ID,
            kind: ObjectKind::Pages,
            object: ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Pages")),
                ("Kids", ObjectSerializer::array(kids)),
                ("Count", ObjectSerializer::integer(page_count as i64)),
            ]),
        });

        for (page, &(page_id, content_id)) in pages.iter().zip(&page_ids) {
            objects.push(DocumentObject {
                id: page_id,
                kind: ObjectKind::Page(page.number),
                object: self.page_object(content_id, font_id),
            });

            let program = self.page_program(title, page)?;
            let mut dict = Dictionary::new();
            dict.insert("Length".to_string(), Object::Integer(program.len() as i64));
            check_stream_length(content_id, &dict, &program)?;
            objects.push(DocumentObject {
                id: content_id,
                kind: ObjectKind::ContentStream(page.number),
                object: Object::Stream {
                    dict,
                    data: bytes::Bytes::from(program),
                },
            });
        }

        objects.push(DocumentObject {
            id: font_id,
            kind: ObjectKind::Font,
            object: ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Font")),
                ("Subtype", ObjectSerializer::name("Type1")),
                ("BaseFont", ObjectSerializer::name(&self.base_font)),
                // Text is written as UTF-8 bytes; only ASCII maps to the right glyphs.
                ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
            ]),
        });

        log::debug!(
            "build: {} page(s), {} objects, font object {}",
            page_count,
            objects.len(),
            font_id
        );
        Ok(ObjectGraph::from_objects(objects, CATALOG_ID))
    }

    /// Page dictionary pointing at its content stream and the shared font.
    fn page_object(&self, content_id: u32, font_id: u32) -> Object {
        let g = &self.geometry;
        ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Page")),
            ("Parent", ObjectSerializer::reference(PAGES_ID, 0)),
            (
                "MediaBox",
                ObjectSerializer::rect(0.0, 0.0, g.width as f64, g.height as f64),
            ),
            (
                "Resources",
                ObjectSerializer::dict(vec![(
                    "Font",
                    ObjectSerializer::dict(vec![(
                        self.font_resource.as_str(),
                        ObjectSerializer::reference(font_id, 0),
                    )]),
                )]),
            ),
            ("Contents", ObjectSerializer::reference(content_id, 0)),
        ])
    }

    /// Drawing program of one page: title, two blank advances, then the body.
    ///
    /// The body therefore starts two line-heights below the title, one row
    /// short of `header_reserve`; the spare row keeps the last body line
    /// clear of the bottom margin.
    pub fn page_program(&self, title: &str, page: &Page) -> Result<Vec<u8>> {
        let g = &self.geometry;
        let (x, y) = g.text_origin();

        let mut content = ContentStreamBuilder::new();
        content
            .begin_text()
            .set_font(&self.font_resource, g.font_size)
            .move_text(x, y)
            .show_text(title)
            .move_text(0.0, -g.line_height)
            .move_text(0.0, -g.line_height);
        for line in &page.lines {
            content.line(line, g.line_height);
        }
        content.end_text();
        content.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectRef;

    fn page(number: usize, lines: &[&str]) -> Page {
        Page {
            number,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_identifier_order() {
        let pages = vec![page(1, &["a"]), page(2, &["b"]), page(3, &["c"])];
        let graph = DocumentBuilder::new().build("T", &pages).unwrap();

        let kinds: Vec<(u32, ObjectKind)> = graph.objects().iter().map(|o| (o.id, o.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (1, ObjectKind::Catalog),
                (2, ObjectKind::Pages),
                (3, ObjectKind::Page(1)),
                (4, ObjectKind::ContentStream(1)),
                (5, ObjectKind::Page(2)),
                (6, ObjectKind::ContentStream(2)),
                (7, ObjectKind::Page(3)),
                (8, ObjectKind::ContentStream(3)),
                (9, ObjectKind::Font),
            ]
        );
        assert_eq!(graph.root(), CATALOG_ID);
        assert_eq!(graph.page_count(), 3);
    }

    #[test]
    fn test_pages_kids_and_count() {
        let pages = vec![page(1, &["a"]), page(2, &["b"])];
        let graph = DocumentBuilder::new().build("T", &pages).unwrap();
        let dict = graph.get(PAGES_ID).unwrap().object.as_dict().unwrap();

        assert_eq!(dict.get("Count").and_then(|o| o.as_integer()), Some(2));
        let kids: Vec<ObjectRef> = dict
            .get("Kids")
            .and_then(|o| o.as_array())
            .unwrap()
            .iter()
            .filter_map(|o| o.as_reference())
            .collect();
        assert_eq!(kids, vec![ObjectRef::new(3, 0), ObjectRef::new(5, 0)]);
    }

    #[test]
    fn test_every_page_uses_shared_font() {
        let pages = vec![page(1, &["a"]), page(2, &["b"])];
        let graph = DocumentBuilder::new().build("T", &pages).unwrap();
        let font_id = graph.len() as u32;

        for obj in graph.objects() {
            if let ObjectKind::Page(_) = obj.kind {
                let refs: Vec<u32> = obj.object.references().iter().map(|r| r.id).collect();
                assert!(refs.contains(&font_id));
                assert!(refs.contains(&(obj.id + 1)), "contents follows page");
            }
        }
    }

    #[test]
    fn test_all_references_resolve() {
        let pages = vec![page(1, &["x"]); 4];
        let graph = DocumentBuilder::new().build("T", &pages).unwrap();
        for obj in graph.objects() {
            for r in obj.object.references() {
                assert!(graph.get(r.id).is_some(), "dangling {}", r);
            }
        }
    }

    #[test]
    fn test_page_program() {
        let builder = DocumentBuilder::new();
        let program = builder
            .page_program("Unit (Test)", &page(1, &["first", "a \\ b"]))
            .unwrap();
        let expected = "BT\n/F1 12 Tf\n72 720 Td\n(Unit \\(Test\\)) Tj\n0 -15 Td\n0 -15 Td\n\
                        (first) Tj\n0 -15 Td\n(a \\\\ b) Tj\n0 -15 Td\nET\n";
        assert_eq!(String::from_utf8(program).unwrap(), expected);
    }

    #[test]
    fn test_stream_length_is_byte_length() {
        let pages = vec![page(1, &["naïve café – ok"])];
        let graph = DocumentBuilder::new().build("Été", &pages).unwrap();
        let stream = graph.get(4).unwrap();
        match &stream.object {
            Object::Stream { dict, data } => {
                let declared = dict.get("Length").and_then(|o| o.as_integer()).unwrap();
                assert_eq!(declared as usize, data.len());
                let text = std::str::from_utf8(data).unwrap();
                assert!(data.len() > text.chars().count());
            },
            other => panic!("expected stream, got {:?}", other),
        }
    }

    #[test]
    fn test_serialized_bodies_keyed_by_id() {
        let graph = DocumentBuilder::new().build("T", &[page(1, &["a"])]).unwrap();
        let bodies = graph.serialized_bodies(&ObjectSerializer::new()).unwrap();
        let ids: Vec<u32> = bodies.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(bodies[0].1.starts_with(b"1 0 obj\n<</Type /Catalog"));
    }

    #[test]
    fn test_font_declares_winansi_and_text_stays_utf8() {
        let graph = DocumentBuilder::new().build("Été", &[page(1, &["café"])]).unwrap();
        let font = graph.get(graph.len() as u32).unwrap();
        assert_eq!(font.kind, ObjectKind::Font);

        let dict = font.object.as_dict().unwrap();
        let keys: Vec<&str> = dict.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Type", "Subtype", "BaseFont", "Encoding"]);
        assert_eq!(
            dict.get("Encoding"),
            Some(&Object::Name("WinAnsiEncoding".into()))
        );

        let bodies = graph.serialized_bodies(&ObjectSerializer::new()).unwrap();
        let program = &bodies[3].1;
        let utf8 = "(caf\u{e9}) Tj".as_bytes();
        assert!(program.windows(utf8.len()).any(|w| w == utf8));
    }

    #[test]
    fn test_full_page_stays_above_bottom_margin() {
        let geometry = PageGeometry::default();
        let lines = vec!["row"; geometry.lines_per_page()];
        let builder = DocumentBuilder::with_geometry(geometry.clone());
        let program = builder.page_program("T", &page(1, &lines)).unwrap();
        let program = String::from_utf8(program).unwrap();

        let (_, mut y) = geometry.text_origin();
        let mut baselines = Vec::new();
        for op in program.lines() {
            if let Some(dy) = op.strip_prefix("0 ").and_then(|r| r.strip_suffix(" Td")) {
                y += dy.parse::<f32>().unwrap();
            } else if op.ends_with(" Tj") {
                baselines.push(y);
            }
        }

        assert_eq!(baselines.len(), geometry.lines_per_page() + 1);
        let first_body = baselines[1];
        assert_eq!(baselines[0] - first_body, 2.0 * geometry.line_height);
        let last = *baselines.last().unwrap();
        assert!(last >= geometry.margin_bottom, "last baseline {} below margin", last);
        assert_eq!(last, 105.0);
    }
}
