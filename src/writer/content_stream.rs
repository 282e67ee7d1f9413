//! PDF content stream builder.
//!
//! Builds the text-drawing operator program of one page according to
//! PDF specification ISO 32000-1:2008 Section 9.4.

use crate::error::Result;
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f32),
    /// Move text position (Td)
    MoveText(f32, f32),
    /// Show text (Tj) - literal string
    ShowText(String),
}

/// Escape the literal-string delimiters `(`, `)` and `\`.
///
/// Every other byte passes through untouched, including non-ASCII UTF-8
/// and a lone `\r` left inside a source line. A strict reader may take that
/// unescaped `\r` as an end-of-line and show it as `\n`.
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '(' | ')' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Builder for PDF content streams.
///
/// Creates the byte sequence for a content stream from operations.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Current font resource name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Whether we're in a text object
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Operations recorded so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font for text operations.
    pub fn set_font(&mut self, resource_name: &str, size: f32) -> &mut Self {
        if self.current_font.as_deref() != Some(resource_name) || self.current_font_size != size {
            self.op(ContentStreamOp::SetFont(resource_name.to_string(), size));
            self.current_font = Some(resource_name.to_string());
            self.current_font_size = size;
        }
        self
    }

    /// Move the text position relative to the start of the current line.
    pub fn move_text(&mut self, tx: f32, ty: f32) -> &mut Self {
        self.op(ContentStreamOp::MoveText(tx, ty))
    }

    /// Show a string at the current text position.
    pub fn show_text(&mut self, text: &str) -> &mut Self {
        self.op(ContentStreamOp::ShowText(text.to_string()))
    }

    /// Show a line of text, then advance one line down.
    pub fn line(&mut self, text: &str, line_height: f32) -> &mut Self {
        self.show_text(text);
        self.move_text(0.0, -line_height)
    }

    /// Build the content stream to bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for op in &self.operations {
            self.write_op(&mut buf, op)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }

    /// Write a single operation to the buffer.
    fn write_op<W: Write>(&self, w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
        match op {
            ContentStreamOp::BeginText => write!(w, "BT"),
            ContentStreamOp::EndText => write!(w, "ET"),
            ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, size),
            ContentStreamOp::MoveText(tx, ty) => write!(w, "{} {} Td", tx, ty),
            ContentStreamOp::ShowText(text) => write!(w, "({}) Tj", escape_literal(text)),
        }
    }
}
