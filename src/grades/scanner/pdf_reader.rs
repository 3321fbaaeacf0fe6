use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, trace, warn};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId};

/// `TJ` offsets below this start a new word
const WORD_GAP_THRESHOLD: f64 = -100.0;

/// Text of a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// One-based page number
    pub number: u32,

    /// Extracted text, empty when extraction failed
    pub text: String,

    /// Whether the text could be extracted
    pub extracted: bool,
}

impl PageText {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            extracted: true,
        }
    }

    /// A page whose text could not be extracted
    pub fn unreadable(number: u32) -> Self {
        Self {
            number,
            text: String::new(),
            extracted: false,
        }
    }
}

/// Anything that can hand out the text of its pages in order
pub trait PageTextSource {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Page texts in page order, produced lazily
    fn pages(&self) -> impl Iterator<Item = PageText> + '_;
}

/// Report-card PDF loaded with lopdf
#[derive(Debug)]
pub struct PdfDocument {
    path: PathBuf,
    document: Document,
}

impl PdfDocument {
    /// Load a PDF; the file is read fully and closed before this returns
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading PDF: {}", path.display());

        let document = Document::load(path)
            .with_context(|| format!("Failed to read PDF {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    fn page_text(&self, number: u32, page_id: ObjectId) -> PageText {
        match self.decode_page(page_id) {
            Ok(text) => PageText::new(number, text),
            Err(e) => {
                warn!(
                    "Could not extract text from page {} of {}: {}",
                    number,
                    self.path.display(),
                    e
                );
                PageText::unreadable(number)
            }
        }
    }

    fn decode_page(&self, page_id: ObjectId) -> lopdf::Result<String> {
        let encodings = self
            .document
            .get_page_fonts(page_id)?
            .into_iter()
            .map(|(name, font)| font.get_font_encoding(&self.document).map(|encoding| (name, encoding)))
            .collect::<lopdf::Result<BTreeMap<_, _>>>()?;
        let content = Content::decode(&self.document.get_page_content(page_id)?)?;

        layout_text(&content.operations, |font, bytes| match encodings.get(font) {
            Some(encoding) => Document::decode_text(encoding, bytes).map(Some),
            None => Ok(None),
        })
    }
}

impl PageTextSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    fn pages(&self) -> impl Iterator<Item = PageText> + '_ {
        self.document
            .get_pages()
            .into_iter()
            .map(move |(number, page_id)| self.page_text(number, page_id))
    }
}

/// Rebuild page text from content stream operations, one text line per line.
///
/// A line ends at the end of a text object and at every operator that moves
/// to another line: `T*`, `'`, `"`, `Td`/`TD` with a vertical offset, and `Tm`
/// placing text at a new height. `decode` turns the bytes of a shown string
/// into text for the current font; `None` means the font cannot be decoded
/// and the string is dropped.
pub fn layout_text<D>(operations: &[Operation], mut decode: D) -> lopdf::Result<String>
where
    D: FnMut(&[u8], &[u8]) -> lopdf::Result<Option<String>>,
{
    let mut text = String::new();
    let mut font: Option<&[u8]> = None;
    let mut line_y: Option<f64> = None;

    for operation in operations {
        let operands = operation.operands.as_slice();
        match operation.operator.as_str() {
            "Tf" => font = operands.first().and_then(|name| name.as_name().ok()),
            "Td" | "TD" => {
                if operands.get(1).and_then(number).is_some_and(|ty| ty != 0.0) {
                    break_line(&mut text);
                }
            }
            "Tm" => {
                let y = operands.get(5).and_then(number);
                if line_y.is_some() && y != line_y {
                    break_line(&mut text);
                }
                line_y = y;
            }
            "T*" | "ET" => break_line(&mut text),
            "'" | "\"" => {
                break_line(&mut text);
                if let Some(shown) = operands.last() {
                    show_text(&mut text, font, shown, &mut decode)?;
                }
            }
            "Tj" | "TJ" => {
                for shown in operands {
                    show_text(&mut text, font, shown, &mut decode)?;
                }
            }
            _ => {}
        }
    }

    Ok(text)
}

fn show_text<D>(text: &mut String, font: Option<&[u8]>, shown: &Object, decode: &mut D) -> lopdf::Result<()>
where
    D: FnMut(&[u8], &[u8]) -> lopdf::Result<Option<String>>,
{
    match shown {
        Object::String(bytes, _) => {
            let Some(font) = font else {
                trace!("Dropping text shown before any font was selected");
                return Ok(());
            };
            if let Some(decoded) = decode(font, bytes)? {
                text.push_str(&decoded);
            }
        }
        Object::Array(items) => {
            for item in items {
                show_text(text, font, item, decode)?;
            }
        }
        other => {
            if number(other).is_some_and(|offset| offset < WORD_GAP_THRESHOLD) {
                text.push(' ');
            }
        }
    }
    Ok(())
}

fn break_line(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}
