//! PDF report rendering.
//!
//! Turns an analysis text into a paginated PDF with a fixed visual style:
//! a 16pt dark-blue title, 12pt Times-Roman body where every non-blank line
//! of the analysis becomes one paragraph, and a small right-aligned page
//! footer. Rendering is in-memory; a failure here aborts only the download
//! action, never the stored record.

use lopdf::{dictionary, Document, Object, Stream};

use crate::error::AppError;

const MARGIN: f32 = 72.0;
const TITLE_SIZE: f32 = 16.0;
const TITLE_LEADING: f32 = 24.0;
const BODY_SIZE: f32 = 12.0;
const BODY_LEADING: f32 = 14.0;
const PARAGRAPH_GAP: f32 = 12.0;
const FOOTER_SIZE: f32 = 10.0;
const FOOTER_Y: f32 = 40.0;

/// Title color #003366.
const TITLE_RGB: (f32, f32, f32) = (0.0, 0.2, 0.4);
const BODY_RGB: (f32, f32, f32) = (0.0, 0.0, 0.0);

/// Average Times glyph width as a fraction of the font size, used for the
/// character-count line budget.
const AVG_GLYPH_WIDTH: f32 = 0.5;

pub const DEFAULT_TITLE: &str = "Relatório Oficial";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Letter,
    A4,
}

impl PageSize {
    pub fn parse(s: &str) -> Option<PageSize> {
        match s {
            "letter" => Some(PageSize::Letter),
            "a4" => Some(PageSize::A4),
            _ => None,
        }
    }

    /// Page dimensions in PDF points (width, height).
    fn dims(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
        }
    }
}

/// One positioned text line in the laid-out document.
struct Line {
    x: f32,
    y: f32,
    size: f32,
    color: (f32, f32, f32),
    text: String,
}

/// Renders an analysis text as PDF bytes.
///
/// The text is split on line breaks; each non-blank line becomes one body
/// paragraph, word-wrapped to the page width. Pagination is automatic.
pub fn render(analysis_text: &str, title: &str, page_size: PageSize) -> Result<Vec<u8>, AppError> {
    let (page_w, page_h) = page_size.dims();
    let body_chars = ((page_w - 2.0 * MARGIN) / (BODY_SIZE * AVG_GLYPH_WIDTH)) as usize;
    let title_chars = ((page_w - 2.0 * MARGIN) / (TITLE_SIZE * AVG_GLYPH_WIDTH)) as usize;

    let mut pages: Vec<Vec<Line>> = Vec::new();
    let mut current: Vec<Line> = Vec::new();
    let mut y = page_h - MARGIN;

    for line in wrap(title, title_chars) {
        y -= TITLE_LEADING;
        current.push(Line {
            x: MARGIN,
            y,
            size: TITLE_SIZE,
            color: TITLE_RGB,
            text: line,
        });
    }
    y -= PARAGRAPH_GAP;

    for paragraph in analysis_text.split('\n') {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        for line in wrap(paragraph, body_chars) {
            if y - BODY_LEADING < MARGIN {
                pages.push(std::mem::take(&mut current));
                y = page_h - MARGIN;
            }
            y -= BODY_LEADING;
            current.push(Line {
                x: MARGIN,
                y,
                size: BODY_SIZE,
                color: BODY_RGB,
                text: line,
            });
        }
        y -= PARAGRAPH_GAP;
    }
    pages.push(current);

    for (index, page) in pages.iter_mut().enumerate() {
        let footer = format!("Página {}", index + 1);
        let x = page_w - MARGIN - footer.chars().count() as f32 * FOOTER_SIZE * AVG_GLYPH_WIDTH;
        page.push(Line {
            x,
            y: FOOTER_Y,
            size: FOOTER_SIZE,
            color: BODY_RGB,
            text: footer,
        });
    }

    build_document(&pages, page_w, page_h)
}

fn build_document(pages: &[Vec<Line>], page_w: f32, page_h: f32) -> Result<Vec<u8>, AppError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Roman",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page_lines in pages {
        let mut content = Vec::new();
        for line in page_lines {
            let (r, g, b) = line.color;
            content.extend_from_slice(b"BT\n");
            content.extend_from_slice(format!("/F1 {:.1} Tf\n", line.size).as_bytes());
            content.extend_from_slice(format!("{:.3} {:.3} {:.3} rg\n", r, g, b).as_bytes());
            content.extend_from_slice(format!("{:.2} {:.2} Td\n", line.x, line.y).as_bytes());
            content.push(b'(');
            content.extend_from_slice(&encode_pdf_string(&line.text));
            content.extend_from_slice(b") Tj\nET\n");
        }
        let content_id = doc.add_object(Object::Stream(Stream::new(dictionary! {}, content)));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_w.into(), page_h.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = pages.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| AppError::Extraction(format!("PDF generation failed: {}", e)))?;
    Ok(out)
}

/// Greedy word wrap by character count; words longer than the budget are
/// hard-split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();
        if current.is_empty() && word_len <= max_chars {
            current.push_str(word);
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut rest: Vec<char> = word.chars().collect();
            while rest.len() > max_chars {
                lines.push(rest.drain(..max_chars).collect());
            }
            current = rest.into_iter().collect();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Encode a line as a WinAnsi PDF string literal body, escaping the literal
/// delimiters. Characters outside WinAnsi become '?'.
fn encode_pdf_string(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' => out.extend_from_slice(b"\\("),
            ')' => out.extend_from_slice(b"\\)"),
            '\\' => out.extend_from_slice(b"\\\\"),
            '\u{2018}' => out.push(0x91),
            '\u{2019}' => out.push(0x92),
            '\u{201C}' => out.push(0x93),
            '\u{201D}' => out.push(0x94),
            '\u{2013}' => out.push(0x96),
            '\u{2014}' => out.push(0x97),
            c if (c as u32) < 0x80 => out.push(c as u8),
            // Latin-1 range coincides with WinAnsi above 0x9F.
            c if (0xA0..0x100).contains(&(c as u32)) => out.push(c as u8),
            _ => out.push(b'?'),
        }
    }
    out
}
