/*!
 * Saving a summary to disk as UTF-8 text or as a PDF document.
 *
 * The PDF writer is deliberately small: one standard Courier font, A4
 * pages, the summary word-wrapped to a fixed column width. Characters the
 * font encoding cannot represent are replaced with '?'.
 */

use log::info;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::ExportError;
use crate::file_utils::{FileManager, FileType};

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 56;
const FONT_SIZE: i64 = 11;
const LINE_HEIGHT: i64 = 13;
const WRAP_COLUMNS: usize = 90;
// Lines that fit between the top and bottom margins
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LINE_HEIGHT) as usize;

/// Output format for a saved summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Pdf,
}

impl ExportFormat {
    /// Pick the format from the file extension, defaulting to text
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match FileManager::detect_file_type(path) {
            FileType::Pdf => Self::Pdf,
            FileType::Text | FileType::Unknown => Self::Text,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Pdf => write!(f, "pdf"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "pdf" => Ok(Self::Pdf),
            other => Err(format!("Unknown export format '{}', expected text or pdf", other)),
        }
    }
}

/// Split `<PATH> [text|pdf]` where the path may contain spaces
///
/// Returns `None` when no path was given.
pub fn parse_save_argument(argument: &str) -> Option<(PathBuf, Option<ExportFormat>)> {
    let argument = argument.trim();
    if argument.is_empty() {
        return None;
    }

    if let Some((path, last)) = argument.rsplit_once(char::is_whitespace) {
        if let Ok(format) = last.parse::<ExportFormat>() {
            let path = path.trim_end();
            if !path.is_empty() {
                return Some((PathBuf::from(path), Some(format)));
            }
        }
    }

    Some((PathBuf::from(argument), None))
}

fn write_error(error: anyhow::Error) -> ExportError {
    ExportError::Io(std::io::Error::other(format!("{:#}", error)))
}

/// Write the summary to `path`, inferring the format when none is given
pub fn export_summary<P: AsRef<Path>>(summary: &str, path: P, format: Option<ExportFormat>) -> Result<(), ExportError> {
    let path = path.as_ref();
    if summary.trim().is_empty() {
        return Err(ExportError::NothingToSave);
    }

    let format = format.unwrap_or_else(|| ExportFormat::from_path(path));
    match format {
        ExportFormat::Text => FileManager::write_to_file(path, summary).map_err(write_error)?,
        ExportFormat::Pdf => {
            let bytes = render_pdf(summary)?;
            FileManager::write_bytes(path, &bytes).map_err(write_error)?;
        }
    }

    info!("Saved summary as {} to {:?}", format, path);
    Ok(())
}

/// Wrap text at word boundaries, hard-splitting words longer than a line
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                lines.push(word.drain(..width).collect());
            }

            let word: String = word.into_iter().collect();
            let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }

        lines.push(current);
    }

    lines
}

// Courier with WinAnsiEncoding covers Latin-1 only
fn encode_latin1(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| match u32::from(c) {
            code @ 0x20..=0x7E | code @ 0xA0..=0xFF => code as u8,
            _ => b'?',
        })
        .collect()
}

/// Build the PDF bytes for a summary
pub fn render_pdf(summary: &str) -> Result<Vec<u8>, ExportError> {
    let mut lines = wrap_lines(summary, WRAP_COLUMNS);
    if lines.is_empty() {
        lines.push(String::new());
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for chunk in lines.chunks(LINES_PER_PAGE) {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
            Operation::new("TL", vec![LINE_HEIGHT.into()]),
            Operation::new("Td", vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN).into()]),
        ];
        for line in chunk {
            operations.push(Operation::new("Tj", vec![Object::string_literal(encode_latin1(line))]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let encoded = content.encode()
            .map_err(|e| ExportError::Pdf(format!("Failed to encode page content: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(pages_id, Object::Dictionary(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    }));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::Pdf(format!("Failed to serialize PDF: {}", e)))?;
    Ok(bytes)
}
