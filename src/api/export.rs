//! Export requests, responses and the layout → build → serialize pipeline.

use crate::error::{Error, Result};
use crate::geometry::PageGeometry;
use crate::layout::layout_with_geometry;
use crate::writer::{DocumentBuilder, PdfWriter, PdfWriterConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Registered media type of the output.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Filename stem used when the title has no usable characters.
const FALLBACK_STEM: &str = "lesson_plan";

/// Which document the export is for; decides the filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportVariant {
    /// Full lesson plan
    #[default]
    LessonPlan,
    /// Student worksheet
    Worksheet,
    /// Grading rubric
    Rubric,
    /// Teacher notes
    Notes,
}

impl ExportVariant {
    /// Suffix appended to the filename stem.
    pub fn suffix(&self) -> &'static str {
        match self {
            ExportVariant::LessonPlan => "lesson_plan",
            ExportVariant::Worksheet => "worksheet",
            ExportVariant::Rubric => "rubric",
            ExportVariant::Notes => "teacher_notes",
        }
    }
}

impl FromStr for ExportVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lesson-plan" => Ok(ExportVariant::LessonPlan),
            "worksheet" => Ok(ExportVariant::Worksheet),
            "rubric" => Ok(ExportVariant::Rubric),
            "notes" => Ok(ExportVariant::Notes),
            other => Err(Error::InvalidRequest(format!("unknown export variant '{}'", other))),
        }
    }
}

/// Suggested download name: non-alphanumerics become `_`, variant suffix appended.
pub fn suggested_filename(title: &str, variant: ExportVariant) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem.as_str() };
    format!("{}_{}.pdf", stem, variant.suffix())
}

/// Export request as sent by a caller, typically decoded from JSON.
///
/// Title and body are optional at the type level so a missing field can be
/// told apart from an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Document title
    #[serde(default)]
    pub title: Option<String>,
    /// Plain-text body, Markdown already stripped
    #[serde(default)]
    pub body: Option<String>,
    /// Export variant
    #[serde(default)]
    pub variant: ExportVariant,
}

impl ExportRequest {
    /// Request with both fields present.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            variant: ExportVariant::default(),
        }
    }

    /// Set the export variant.
    pub fn with_variant(mut self, variant: ExportVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Decode a JSON request body.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Title and body, or the first missing field.
    pub fn validate(&self) -> Result<(&str, &str)> {
        let title = self.title.as_deref().ok_or(Error::MissingField("title"))?;
        let body = self.body.as_deref().ok_or(Error::MissingField("body"))?;
        Ok((title, body))
    }
}

/// A finished export, ready to hand back as a download.
#[derive(Debug, Clone)]
pub struct ExportResponse {
    /// PDF bytes
    pub bytes: Vec<u8>,
    /// Suggested download name
    pub filename: String,
    /// Media type
    pub content_type: &'static str,
    /// HTTP status
    pub status: u16,
}

impl ExportResponse {
    /// Get the PDF bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Convert to PDF bytes, consuming the response.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Save the PDF to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), &self.bytes)?;
        Ok(())
    }
}

/// Runs the export pipeline with a fixed geometry and writer configuration.
///
/// # Example
///
/// ```ignore
/// use lesson_pdf::api::{ExportRequest, PdfExport};
///
/// let response = PdfExport::new().export(&ExportRequest::new("Fractions", "Warm-up"))?;
/// response.save(&response.filename)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfExport {
    geometry: PageGeometry,
    writer_config: PdfWriterConfig,
}

impl PdfExport {
    /// Exporter with US Letter geometry and default writer settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom page geometry.
    pub fn geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Use a custom writer configuration.
    pub fn writer_config(mut self, config: PdfWriterConfig) -> Self {
        self.writer_config = config;
        self
    }

    /// Layout, build and serialize `body` under `title`.
    pub fn render(&self, title: &str, body: &str) -> Result<Vec<u8>> {
        let pages = layout_with_geometry(body, &self.geometry)?;
        let graph = DocumentBuilder::with_geometry(self.geometry.clone()).build(title, &pages)?;
        PdfWriter::with_config(self.writer_config.clone()).serialize(&graph)
    }

    /// Validate `request` and render it into a downloadable response.
    pub fn export(&self, request: &ExportRequest) -> Result<ExportResponse> {
        let (title, body) = request.validate().inspect_err(|err| {
            log::warn!("export rejected: {}", err);
        })?;

        let bytes = self.render(title, body).inspect_err(|err| {
            let stage = err.stage().map(|s| s.to_string()).unwrap_or_default();
            log::error!("export failed in {} stage: {}", stage, err);
        })?;

        let filename = suggested_filename(title, request.variant);
        log::info!("exported {} ({} bytes)", filename, bytes.len());
        Ok(ExportResponse {
            bytes,
            filename,
            content_type: PDF_MIME_TYPE,
            status: 200,
        })
    }
}

/// Render with the default geometry.
pub fn generate_pdf(title: &str, body: &str) -> Result<Vec<u8>> {
    PdfExport::new().render(title, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_filename() {
        assert_eq!(
            suggested_filename("Unit 3: Fractions & Decimals", ExportVariant::LessonPlan),
            "Unit_3__Fractions___Decimals_lesson_plan.pdf"
        );
        assert_eq!(suggested_filename("Quiz", ExportVariant::Rubric), "Quiz_rubric.pdf");
    }

    #[test]
    fn test_suggested_filename_non_ascii_and_empty() {
        assert_eq!(suggested_filename("Été", ExportVariant::Notes), "_t__teacher_notes.pdf");
        assert_eq!(
            suggested_filename("", ExportVariant::Worksheet),
            "lesson_plan_worksheet.pdf"
        );
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("worksheet".parse::<ExportVariant>().unwrap(), ExportVariant::Worksheet);
        assert_eq!("lesson-plan".parse::<ExportVariant>().unwrap(), ExportVariant::LessonPlan);
        assert!("slides".parse::<ExportVariant>().is_err());
    }

    #[test]
    fn test_request_from_json() {
        let req = ExportRequest::from_json(
            r#"{"title": "Photosynthesis", "body": "Intro", "variant": "worksheet"}"#,
        )
        .unwrap();
        assert_eq!(req.title.as_deref(), Some("Photosynthesis"));
        assert_eq!(req.variant, ExportVariant::Worksheet);
    }

    #[test]
    fn test_request_missing_fields() {
        let req = ExportRequest::from_json(r#"{"body": "text"}"#).unwrap();
        let err = req.validate().unwrap_err();
        assert!(matches!(err, Error::MissingField("title")));
        assert_eq!(err.http_status(), 400);

        let req = ExportRequest::from_json(r#"{"title": "t"}"#).unwrap();
        assert!(matches!(req.validate(), Err(Error::MissingField("body"))));
    }

    #[test]
    fn test_malformed_json_is_input_error() {
        let err = ExportRequest::from_json("{not json").unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_empty_fields_are_accepted() {
        let response = PdfExport::new().export(&ExportRequest::new("", "")).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, "application/pdf");
        assert!(response.as_bytes().starts_with(b"%PDF-1.4"));
        let text = String::from_utf8_lossy(response.as_bytes());
        assert!(text.contains("() Tj"));
        assert!(text.contains("(\\(empty\\)) Tj"));
    }

    #[test]
    fn test_export_sets_filename() {
        let request =
            ExportRequest::new("Cell Biology", "Objectives").with_variant(ExportVariant::Rubric);
        let response = PdfExport::new().export(&request).unwrap();
        assert_eq!(response.filename, "Cell_Biology_rubric.pdf");
    }

    #[test]
    fn test_bad_geometry_is_pipeline_error() {
        let export = PdfExport::new().geometry(PageGeometry::letter().with_size(100.0, 100.0));
        let err = export.export(&ExportRequest::new("t", "b")).unwrap_err();
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn test_generate_pdf_is_deterministic() {
        let a = generate_pdf("Same", "input\ntext").unwrap();
        let b = generate_pdf("Same", "input\ntext").unwrap();
        assert_eq!(a, b);
    }
}
