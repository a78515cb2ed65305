//! Complaint letter rendering.
//!
//! Turns a refined complaint body into a paginated PDF with a fixed layout:
//! centered title, reference/date/sector meta block, separator rule, the
//! word-wrapped body, and a footer line — plus an optional second page
//! embedding an attached evidence image. Rendering is pure: no network, and
//! a bad attachment is logged and skipped rather than failing the letter.

pub mod error;
mod image;
pub mod wrap;

use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::warn;

pub use error::LetterError;
pub use wrap::wrap;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 56.0;
const BODY_SIZE: i64 = 12;
const META_SIZE: i64 = 10;
const TITLE_SIZE: i64 = 18;
const LINE_HEIGHT: f32 = 16.0;
const WRAP_COLUMN: usize = 80;
const FOOTER_TEXT: &str = "Generated by GovConnect";

/// Fixed metadata printed in the letter head.
#[derive(Debug, Clone)]
pub struct LetterMeta {
    pub reference: String,
    pub date: String,
    pub sector: String,
}

/// Download filename for an exported letter.
pub fn filename(sector: &str, at: DateTime<Utc>) -> String {
    format!("Complaint_{}_{}.pdf", sector, at.timestamp_millis())
}

/// Render the letter. `attachment` may hold PNG or JPEG bytes; if it cannot
/// be decoded the evidence page is skipped and the letter still renders.
pub fn render_letter(
    meta: &LetterMeta,
    body: &str,
    attachment: Option<&[u8]>,
) -> Result<Vec<u8>, LetterError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(font_dictionary(b"Helvetica"));
    let bold = doc.add_object(font_dictionary(b"Helvetica-Bold"));
    let fonts = Dictionary::from_iter(vec![
        ("F1", Object::Reference(regular)),
        ("F2", Object::Reference(bold)),
    ]);

    let mut page_ids = Vec::new();
    let body_lines = wrap(body, WRAP_COLUMN);
    let mut lines = body_lines.iter();

    // First page carries the head block; overflow continues on plain pages.
    let mut first = true;
    loop {
        let mut ops = Vec::new();
        let mut y = PAGE_HEIGHT - MARGIN;

        if first {
            set_fill_color(&mut ops, 22, 163, 74);
            draw_text(&mut ops, "F2", TITLE_SIZE, centered_x("Official Complaint Letter", TITLE_SIZE), y, "Official Complaint Letter");
            y -= 28.0;

            set_fill_color(&mut ops, 100, 100, 100);
            for meta_line in [
                format!("Reference: {}", meta.reference),
                format!("Date: {}", meta.date),
                format!("Sector: {}", meta.sector),
            ] {
                draw_text(&mut ops, "F1", META_SIZE, MARGIN, y, &meta_line);
                y -= 14.0;
            }

            y -= 10.0;
            draw_separator(&mut ops, y);
            y -= 24.0;
        }

        set_fill_color(&mut ops, 0, 0, 0);
        for line in lines.by_ref() {
            if !line.is_empty() {
                draw_text(&mut ops, "F1", BODY_SIZE, MARGIN, y, line);
            }
            y -= LINE_HEIGHT;
            if y < MARGIN + 30.0 {
                break;
            }
        }

        set_fill_color(&mut ops, 150, 150, 150);
        draw_text(&mut ops, "F1", META_SIZE, centered_x(FOOTER_TEXT, META_SIZE), MARGIN - 16.0, FOOTER_TEXT);

        let resources = Dictionary::from_iter(vec![("Font", Object::Dictionary(fonts.clone()))]);
        page_ids.push(add_page(&mut doc, pages_id, resources, ops)?);

        // Stop once the body iterator is drained. The first page is always
        // emitted, even for an empty body.
        if lines.len() == 0 {
            break;
        }
        first = false;
    }

    if let Some(bytes) = attachment {
        match image::decode(bytes) {
            Ok(img) => page_ids.push(evidence_page(&mut doc, pages_id, &fonts, img)?),
            // A bad image never blocks the letter itself.
            Err(e) => warn!(error = %e, "skipping evidence attachment"),
        }
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(page_ids.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| LetterError::Write(e.to_string()))?;
    Ok(buffer)
}

fn font_dictionary(base_font: &[u8]) -> Dictionary {
    Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(base_font.to_vec())),
    ])
}

/// Approximate horizontal centering for Helvetica (mean glyph width 0.5 em).
fn centered_x(text: &str, size: i64) -> f32 {
    let width = text.chars().count() as f32 * size as f32 * 0.5;
    ((PAGE_WIDTH - width) / 2.0).max(MARGIN)
}

fn set_fill_color(ops: &mut Vec<Operation>, r: u8, g: u8, b: u8) {
    ops.push(Operation::new(
        "rg",
        vec![
            Object::Real(r as f32 / 255.0),
            Object::Real(g as f32 / 255.0),
            Object::Real(b as f32 / 255.0),
        ],
    ));
}

fn draw_text(ops: &mut Vec<Operation>, font: &str, size: i64, x: f32, y: f32, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(font.as_bytes().to_vec()), Object::Integer(size)],
    ));
    ops.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(text.as_bytes().to_vec(), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn draw_separator(ops: &mut Vec<Operation>, y: f32) {
    ops.push(Operation::new(
        "RG",
        vec![Object::Real(0.78), Object::Real(0.78), Object::Real(0.78)],
    ));
    ops.push(Operation::new("w", vec![Object::Real(1.0)]));
    ops.push(Operation::new("m", vec![Object::Real(MARGIN), Object::Real(y)]));
    ops.push(Operation::new(
        "l",
        vec![Object::Real(PAGE_WIDTH - MARGIN), Object::Real(y)],
    ));
    ops.push(Operation::new("S", vec![]));
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    resources: Dictionary,
    ops: Vec<Operation>,
) -> Result<ObjectId, LetterError> {
    let content = Content { operations: ops };
    let encoded = content
        .encode()
        .map_err(|e| LetterError::Encode(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

    let page = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH as i64),
                Object::Integer(PAGE_HEIGHT as i64),
            ]),
        ),
        ("Resources", Object::Dictionary(resources)),
        ("Contents", Object::Reference(content_id)),
    ]);
    Ok(doc.add_object(page))
}

/// Second page: "Attached Evidence:" label plus the image, aspect-fit into
/// a fixed box under the label.
fn evidence_page(
    doc: &mut Document,
    pages_id: ObjectId,
    fonts: &Dictionary,
    img: image::EmbeddedImage,
) -> Result<ObjectId, LetterError> {
    let image_id = doc.add_object(img.stream);

    let box_w = PAGE_WIDTH - 2.0 * MARGIN;
    let box_h = 380.0;
    let box_top = PAGE_HEIGHT - MARGIN - 40.0;

    let scale = (box_w / img.width as f32).min(box_h / img.height as f32);
    let draw_w = img.width as f32 * scale;
    let draw_h = img.height as f32 * scale;

    let mut ops = Vec::new();
    set_fill_color(&mut ops, 0, 0, 0);
    draw_text(&mut ops, "F1", BODY_SIZE, MARGIN, PAGE_HEIGHT - MARGIN, "Attached Evidence:");

    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "cm",
        vec![
            Object::Real(draw_w),
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(draw_h),
            Object::Real(MARGIN),
            Object::Real(box_top - draw_h),
        ],
    ));
    ops.push(Operation::new("Do", vec![Object::Name(b"Im1".to_vec())]));
    ops.push(Operation::new("Q", vec![]));

    let xobjects = Dictionary::from_iter(vec![("Im1", Object::Reference(image_id))]);
    let resources = Dictionary::from_iter(vec![
        ("Font", Object::Dictionary(fonts.clone())),
        ("XObject", Object::Dictionary(xobjects)),
    ]);
    add_page(doc, pages_id, resources, ops)
}
