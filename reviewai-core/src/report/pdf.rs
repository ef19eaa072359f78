//! PDF painting for laid-out report documents
//!
//! Consumes a [`ReportDocument`] and produces the final PDF bytes. This is
//! the only place aware of printpdf's bottom-origin coordinate system; the
//! layout pass works top-down and the conversion happens here.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect,
    Rgb as PdfRgb,
};

use crate::{Error, Result};

use super::document::{Block, ReportDocument, Rgb};

/// Paint a laid-out document into PDF bytes
pub fn paint(document: &ReportDocument, title: &str) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(document.width as f32),
        Mm(document.height as f32),
        "content",
    );

    let regular = builtin_font(&doc, BuiltinFont::Helvetica)?;
    let bold = builtin_font(&doc, BuiltinFont::HelveticaBold)?;
    let mono = builtin_font(&doc, BuiltinFont::Courier)?;

    let mut layers = Vec::with_capacity(document.pages.len());
    layers.push(doc.get_page(first_page).get_layer(first_layer));
    for _ in 1..document.pages.len() {
        let (page, layer) =
            doc.add_page(Mm(document.width as f32), Mm(document.height as f32), "content");
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for (page, layer) in document.pages.iter().zip(&layers) {
        for block in &page.blocks {
            paint_block(block, layer, document.height, &regular, &bold, &mono);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| Error::Render(e.to_string()))
}

fn builtin_font(
    doc: &printpdf::PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef> {
    doc.add_builtin_font(font)
        .map_err(|e| Error::Render(e.to_string()))
}

fn fill_color(color: &Rgb) -> Color {
    Color::Rgb(PdfRgb::new(color.r as f32, color.g as f32, color.b as f32, None))
}

fn paint_block(
    block: &Block,
    layer: &PdfLayerReference,
    page_height: f64,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    mono: &IndirectFontRef,
) {
    match block {
        Block::Text {
            x,
            y,
            size,
            bold: is_bold,
            mono: is_mono,
            color,
            content,
        } => {
            let font = if *is_mono {
                mono
            } else if *is_bold {
                bold
            } else {
                regular
            };

            layer.set_fill_color(fill_color(color));
            layer.use_text(
                content.clone(),
                *size as f32,
                Mm(*x as f32),
                Mm((page_height - y) as f32),
                font,
            );
        }
        Block::Rect {
            x,
            y,
            width,
            height,
            color,
        } => {
            layer.set_fill_color(fill_color(color));
            let rect = Rect::new(
                Mm(*x as f32),
                Mm((page_height - (y + height)) as f32),
                Mm((x + width) as f32),
                Mm((page_height - y) as f32),
            )
            .with_mode(PaintMode::Fill);
            layer.add_rect(rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::document::Page;

    fn sample_document(pages: usize) -> ReportDocument {
        let mut doc = ReportDocument::new(210.0, 297.0);
        for _ in 1..pages {
            doc.add_page();
        }
        for index in 0..pages {
            doc.push_block(
                index,
                Block::Text {
                    x: 20.0,
                    y: 25.0,
                    size: 10.0,
                    bold: index % 2 == 0,
                    mono: false,
                    color: Rgb::new(0.0, 0.0, 0.0),
                    content: format!("page {}", index + 1),
                },
            );
        }
        doc.push_block(
            0,
            Block::Rect {
                x: 20.0,
                y: 40.0,
                width: 170.0,
                height: 8.0,
                color: Rgb::new(0.13, 0.55, 0.13),
            },
        );
        doc
    }

    #[test]
    fn test_paint_produces_pdf_bytes() {
        let doc = sample_document(1);
        let bytes = paint(&doc, "test").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_paint_multiple_pages() {
        let doc = sample_document(3);
        let bytes = paint(&doc, "test").unwrap();
        let haystack = String::from_utf8_lossy(&bytes);
        // One /Type /Page entry per laid-out page (plus the /Pages tree node)
        let page_objects = haystack.matches("/Type /Page").count();
        assert!(page_objects >= 3);
    }

    #[test]
    fn test_paint_empty_page() {
        let doc = ReportDocument {
            width: 210.0,
            height: 297.0,
            pages: vec![Page::default()],
        };
        let bytes = paint(&doc, "empty").unwrap();
        assert!(!bytes.is_empty());
    }
}
