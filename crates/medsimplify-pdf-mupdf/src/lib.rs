use mupdf::{Document, TextPageFlags};

use medsimplify_core::{BackendError, PdfBackend};

const PDF_MAGIC: &str = "application/pdf";

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency so
/// that builds without the `pdf` feature of `medsimplify-ingest` do not
/// depend on it.
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>, BackendError> {
        let document = Document::from_bytes(data, PDF_MAGIC)
            .map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut pages_text = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            // Image-only pages have no text blocks and yield an empty string.
            let mut page_text = String::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    if !page_text.is_empty() {
                        page_text.push('\n');
                    }
                    page_text.push_str(&line_text);
                }
            }
            pages_text.push(page_text);
        }

        Ok(pages_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Assemble a PDF with one page per entry; `None` is a page with no content stream.
    fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            String::new(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];
        let mut kids = Vec::new();
        for page in pages {
            let page_id = objects.len() + 1;
            kids.push(format!("{page_id} 0 R"));
            match page {
                Some(text) => {
                    let stream = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
                    objects.push(format!(
                        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                        page_id + 1
                    ));
                    objects.push(format!(
                        "<< /Length {} >>\nstream\n{stream}\nendstream",
                        stream.len()
                    ));
                }
                None => objects.push(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>".to_string(),
                ),
            }
        }
        objects[1] = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        );

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref_at = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        out
    }

    #[test]
    fn garbage_bytes_fail_to_open() {
        let err = MupdfBackend::new()
            .extract_pages(b"this is not a pdf at all")
            .unwrap_err();
        assert!(matches!(err, BackendError::OpenError(_)));
    }

    #[test]
    fn blank_page_yields_empty_string() {
        let pages = MupdfBackend::new()
            .extract_pages(&build_pdf(&[None]))
            .unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].trim().is_empty());
    }

    #[test]
    fn pages_come_back_in_order() {
        let pdf = build_pdf(&[Some("Take two tablets"), None, Some("Call your doctor")]);
        let pages = MupdfBackend::new().extract_pages(&pdf).unwrap();
        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("Take two tablets"));
        assert!(pages[1].trim().is_empty());
        assert!(pages[2].contains("Call your doctor"));
    }
}
