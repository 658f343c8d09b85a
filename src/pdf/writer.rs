//! Output PDF assembly
//!
//! Copies a subset of a source PDF's pages into a new document by loading the
//! source, dropping every unselected page, and pruning the objects that are
//! no longer referenced.

use std::collections::BTreeSet;

use lopdf::Document;
use thiserror::Error;

/// Errors while building the output PDF
#[derive(Error, Debug)]
pub enum PdfWriteError {
    #[error("Failed to load source PDF: {0}")]
    Load(#[from] lopdf::Error),
    #[error("No pages were added")]
    NoPages,
    #[error("Failed to serialize PDF: {0}")]
    Save(String),
}

/// Serialized output document
#[derive(Debug, Clone)]
pub struct SelectedPdf {
    /// PDF file contents
    pub bytes: Vec<u8>,
    /// Number of pages copied from the source
    pub pages_added: usize,
}

/// Build a PDF containing the given zero-indexed pages of `source`
///
/// Indices past the end of the source are ignored. Output pages keep the
/// source order regardless of the order of `page_indices`.
pub fn select_pages(source: &[u8], page_indices: &[usize]) -> Result<SelectedPdf, PdfWriteError> {
    let mut doc = Document::load_mem(source)?;
    let pages = doc.get_pages();

    let keep: BTreeSet<u32> = page_indices
        .iter()
        .filter_map(|&idx| u32::try_from(idx + 1).ok())
        .filter(|number| pages.contains_key(number))
        .collect();

    if keep.is_empty() {
        return Err(PdfWriteError::NoPages);
    }

    let to_delete: Vec<u32> = pages
        .keys()
        .copied()
        .filter(|number| !keep.contains(number))
        .collect();

    tracing::debug!(
        "Selecting {} of {} pages ({} removed)",
        keep.len(),
        pages.len(),
        to_delete.len()
    );

    if !to_delete.is_empty() {
        doc.delete_pages(&to_delete);
    }
    doc.prune_objects();
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| PdfWriteError::Save(e.to_string()))?;

    Ok(SelectedPdf {
        bytes,
        pages_added: keep.len(),
    })
}

/// Count the pages of a serialized PDF
pub fn count_pages(data: &[u8]) -> Result<usize, PdfWriteError> {
    let doc = Document::load_mem(data)?;
    Ok(doc.get_pages().len())
}

#[cfg(test)]
pub(crate) mod test_support {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Build a PDF with one page per entry, each page showing its lines of text
    pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids = Vec::new();
        for lines in pages {
            let mut operations = vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("TL", vec![16.into()]),
                Operation::new("Td", vec![72.into(), 760.into()]),
            ];
            for line in lines.iter() {
                operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
                operations.push(Operation::new("T*", vec![]));
            }
            operations.push(Operation::new("ET", vec![]));

            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode content"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("save test pdf");
        bytes
    }
}
