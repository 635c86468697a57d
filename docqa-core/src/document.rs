//! PDF document loading
//!
//! Turns the source PDF into an ordered list of page-level text records.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Document loading was interrupted: {0}")]
    Interrupted(String),
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// One page of extracted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number within the document
    pub number: u32,
    pub text: String,
}

impl Page {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Trait for document loaders (allows mocking)
#[cfg_attr(test, mockall::automock)]
pub trait DocumentLoader: Send + Sync {
    /// Load a document into pages, in page order
    fn load(&self, path: &Path) -> Result<Vec<Page>>;
}

/// Loader backed by `lopdf` text extraction
#[derive(Debug, Clone, Default)]
pub struct PdfLoader;

impl PdfLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PdfLoader {
    fn load(&self, path: &Path) -> Result<Vec<Page>> {
        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        if !metadata.is_file() {
            return Err(LoadError::Parse {
                path: path.to_path_buf(),
                reason: "not a regular file".to_string(),
            });
        }

        let document = lopdf::Document::load(path).map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        // get_pages is keyed by page number, so iteration is already in order
        let mut pages = Vec::new();
        for number in document.get_pages().into_keys() {
            // An undecodable page stays in place with no text
            let text = document.extract_text(&[number]).unwrap_or_else(|e| {
                warn!(path = %path.display(), page = number, error = %e, "skipping page text");
                String::new()
            });
            pages.push(Page::new(number, text));
        }

        debug!(path = %path.display(), pages = pages.len(), "loaded PDF");
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};
    use tempfile::tempdir;

    fn show_text(text: &str) -> Vec<Operation> {
        vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![100.into(), 600.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]
    }

    /// One page per operation list, all sharing a Courier font
    fn write_pdf(path: &Path, pages: Vec<Vec<Operation>>) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for operations in pages {
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.pdf");

        let result = PdfLoader::new().load(&path);
        assert!(matches!(result, Err(LoadError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_load_invalid_pdf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.pdf");
        std::fs::write(&path, b"this is not a pdf at all").unwrap();

        let result = PdfLoader::new().load(&path);
        assert!(matches!(result, Err(LoadError::Parse { .. })));
    }

    #[test]
    fn test_load_directory_is_rejected() {
        let dir = tempdir().unwrap();

        let result = PdfLoader::new().load(dir.path());
        assert!(matches!(result, Err(LoadError::Parse { .. })));
    }

    #[test]
    fn test_load_single_page_pdf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hello.pdf");
        write_pdf(&path, vec![show_text("Hello OCR")]);

        let pages = PdfLoader::new().load(&path).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 1);
        assert!(pages[0].text.contains("Hello"));
    }

    #[test]
    fn test_undecodable_page_keeps_the_rest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.pdf");
        // Tf without a font operand cannot be extracted
        let broken = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![]),
            Operation::new("ET", vec![]),
        ];
        write_pdf(
            &path,
            vec![show_text("First page"), broken, show_text("Third page")],
        );

        let pages = PdfLoader::new().load(&path).unwrap();

        assert_eq!(pages.len(), 3);
        assert!(pages[0].text.contains("First"));
        assert_eq!(pages[1].number, 2);
        assert!(pages[1].text.is_empty());
        assert!(pages[2].text.contains("Third"));
    }

    #[test]
    fn test_load_error_display() {
        let err = LoadError::NotFound(PathBuf::from("paper.pdf"));
        assert_eq!(err.to_string(), "Document not found: paper.pdf");
    }
}
