//! # PDF Serializer
//!
//! Takes a laid-out [`Document`] and writes a valid PDF file.
//!
//! This is a from-scratch PDF 1.7 writer covering the subset the resume
//! needs: filled rectangles, rounded rectangles, stroked lines and text in
//! the standard Helvetica faces.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, pages, content streams, etc.)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! The layout works in millimetres with y growing downwards; PDF user space
//! is points with y growing upwards. Every coordinate goes through
//! [`PageTransform`] on the way out.
//!
//! Output is deterministic: the same document always produces the same
//! bytes. The only date written is the one carried by the document
//! metadata.

use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::error::CvError;
use crate::font::{winansi_code, StandardFont};
use crate::layout::{Document, DrawOp, Metadata, Page, Rect, TextRun};
use crate::style::Color;
use crate::text::MM_PER_PT;

const PRODUCER: &str = concat!("cvpdf ", env!("CARGO_PKG_VERSION"));

pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Fonts in resource order: `/F0`, `/F1`, ... -> object id.
    font_objects: Vec<(StandardFont, usize)>,
}

struct PdfObject {
    data: Vec<u8>,
}

/// Millimetre, y-down page coordinates to PDF points, y-up.
#[derive(Debug, Clone, Copy)]
struct PageTransform {
    page_height_mm: f64,
}

impl PageTransform {
    fn len(&self, mm: f64) -> f64 {
        mm / MM_PER_PT
    }

    fn x(&self, mm: f64) -> f64 {
        mm / MM_PER_PT
    }

    fn y(&self, mm: f64) -> f64 {
        (self.page_height_mm - mm) / MM_PER_PT
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize `document` to PDF bytes.
    ///
    /// Fails without producing output when the document holds coordinates
    /// that can't be written (NaN or infinite).
    pub fn write(&self, document: &Document) -> Result<Vec<u8>, CvError> {
        validate(document)?;

        let unencodable = unencodable_chars(document);
        if !unencodable.is_empty() {
            let chars: String = unencodable.iter().collect();
            tracing::warn!(%chars, "characters outside WinAnsiEncoding drawn as '?'");
        }

        let mut builder = PdfBuilder {
            objects: Vec::new(),
            font_objects: Vec::new(),
        };

        // Reserve object IDs:
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3+ = fonts, then content streams and page objects
        builder.objects.push(PdfObject { data: vec![] });
        builder.objects.push(PdfObject { data: vec![] });
        builder.objects.push(PdfObject { data: vec![] });

        self.register_fonts(&mut builder, &document.pages);

        let transform = PageTransform {
            page_height_mm: document.geometry.height,
        };
        let media_w = transform.len(document.geometry.width);
        let media_h = transform.len(document.geometry.height);
        let font_resources = self.build_font_resource_dict(&builder.font_objects);

        let mut page_obj_ids: Vec<usize> = Vec::new();
        for page in &document.pages {
            let content = self.build_content_stream(page, &transform, &builder.font_objects);
            let compressed = compress_to_vec_zlib(&content, 6);

            let content_obj_id = builder.objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            )?;
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            builder.objects.push(PdfObject { data: content_data });

            let page_obj_id = builder.objects.len();
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                media_w, media_h, content_obj_id, font_resources
            );
            builder.objects.push(PdfObject {
                data: page_dict.into_bytes(),
            });
            page_obj_ids.push(page_obj_id);
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj_id = builder.objects.len();
        builder.objects.push(PdfObject {
            data: Self::build_info_dict(&document.metadata),
        });

        let bytes = self.serialize(&builder, info_obj_id)?;
        tracing::debug!(
            pages = page_obj_ids.len(),
            objects = builder.objects.len(),
            bytes = bytes.len(),
            "pdf serialized"
        );
        Ok(bytes)
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(
        &self,
        page: &Page,
        transform: &PageTransform,
        font_objects: &[(StandardFont, usize)],
    ) -> Vec<u8> {
        let mut stream: Vec<u8> = Vec::new();
        for op in &page.ops {
            let mut ops = String::new();
            match op {
                DrawOp::FillRect { rect, color } => {
                    let (x, y, w, h) = Self::pdf_rect(rect, transform);
                    let _ = write!(
                        ops,
                        "q\n{}{:.2} {:.2} {:.2} {:.2} re\nf\nQ\n",
                        Self::fill_color(color),
                        x,
                        y,
                        w,
                        h
                    );
                }
                DrawOp::FillRoundedRect {
                    rect,
                    radius,
                    color,
                } => {
                    let (x, y, w, h) = Self::pdf_rect(rect, transform);
                    let _ = write!(ops, "q\n{}", Self::fill_color(color));
                    self.write_rounded_rect(&mut ops, x, y, w, h, transform.len(*radius));
                    let _ = write!(ops, "f\nQ\n");
                }
                DrawOp::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    width,
                    color,
                } => {
                    let _ = write!(
                        ops,
                        "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                        color.r,
                        color.g,
                        color.b,
                        transform.len(*width),
                        transform.x(*x1),
                        transform.y(*y1),
                        transform.x(*x2),
                        transform.y(*y2)
                    );
                }
                DrawOp::Text(run) => {
                    self.write_text(&mut stream, run, transform, font_objects);
                    continue;
                }
            }
            stream.extend_from_slice(ops.as_bytes());
        }
        stream
    }

    /// Text goes straight into the byte stream: WinAnsi bytes above 0x7F
    /// are not valid UTF-8.
    fn write_text(
        &self,
        stream: &mut Vec<u8>,
        run: &TextRun,
        transform: &PageTransform,
        font_objects: &[(StandardFont, usize)],
    ) {
        if run.text.is_empty() {
            return;
        }
        let font = StandardFont::for_spec(&run.style.font);
        let font_idx = Self::font_index(font, font_objects);
        let color = run.style.color;

        let mut header = String::new();
        let _ = write!(
            header,
            "BT\n{:.3} {:.3} {:.3} rg\n/F{} {:.1} Tf\n{:.2} {:.2} Td\n(",
            color.r,
            color.g,
            color.b,
            font_idx,
            run.style.font.size,
            transform.x(run.x),
            transform.y(run.y)
        );
        stream.extend_from_slice(header.as_bytes());
        stream.extend_from_slice(&Self::encode_pdf_string(&run.text));
        stream.extend_from_slice(b") Tj\nET\n");
    }

    /// Rounded rectangle path in PDF space, `(x, y)` the lower-left corner.
    fn write_rounded_rect(&self, stream: &mut String, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        let k = 0.5522847498;
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);

        let _ = write!(stream, "{:.2} {:.2} m\n", x + r, y);

        let _ = write!(stream, "{:.2} {:.2} l\n", x + w - r, y);
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
            x + w - r + r * k,
            y,
            x + w,
            y + r - r * k,
            x + w,
            y + r
        );

        let _ = write!(stream, "{:.2} {:.2} l\n", x + w, y + h - r);
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
            x + w,
            y + h - r + r * k,
            x + w - r + r * k,
            y + h,
            x + w - r,
            y + h
        );

        let _ = write!(stream, "{:.2} {:.2} l\n", x + r, y + h);
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
            x + r - r * k,
            y + h,
            x,
            y + h - r + r * k,
            x,
            y + h - r
        );

        let _ = write!(stream, "{:.2} {:.2} l\n", x, y + r);
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
            x,
            y + r - r * k,
            x + r - r * k,
            y,
            x + r,
            y
        );

        let _ = write!(stream, "h\n");
    }

    fn pdf_rect(rect: &Rect, transform: &PageTransform) -> (f64, f64, f64, f64) {
        (
            transform.x(rect.x),
            transform.y(rect.y + rect.height),
            transform.len(rect.width),
            transform.len(rect.height),
        )
    }

    fn fill_color(color: &Color) -> String {
        format!("{:.3} {:.3} {:.3} rg\n", color.r, color.g, color.b)
    }

    /// One Type1 font object per Helvetica face that appears in the
    /// document, in a stable order.
    fn register_fonts(&self, builder: &mut PdfBuilder, pages: &[Page]) {
        let mut fonts: Vec<StandardFont> = pages
            .iter()
            .flat_map(|page| page.texts())
            .map(|run| StandardFont::for_spec(&run.style.font))
            .collect();
        fonts.sort();
        fonts.dedup();

        // Always have at least Helvetica
        if fonts.is_empty() {
            fonts.push(StandardFont::Helvetica);
        }

        for font in fonts {
            let obj_id = builder.objects.len();
            let font_dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} \
                 /Encoding /WinAnsiEncoding >>",
                font.pdf_name()
            );
            builder.objects.push(PdfObject {
                data: font_dict.into_bytes(),
            });
            builder.font_objects.push((font, obj_id));
        }
    }

    fn build_font_resource_dict(&self, font_objects: &[(StandardFont, usize)]) -> String {
        font_objects
            .iter()
            .enumerate()
            .map(|(i, (_, obj_id))| format!("/F{} {} 0 R", i, obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Look up the font index (/F0, /F1, etc.) for a face.
    fn font_index(font: StandardFont, font_objects: &[(StandardFont, usize)]) -> usize {
        font_objects
            .iter()
            .position(|(f, _)| *f == font)
            .unwrap_or(0)
    }

    fn build_info_dict(metadata: &Metadata) -> Vec<u8> {
        let mut info: Vec<u8> = b"<< ".to_vec();
        let mut entry = |key: &str, value: &str| {
            info.extend_from_slice(format!("/{} (", key).as_bytes());
            info.extend_from_slice(&Self::encode_pdf_string(value));
            info.extend_from_slice(b") ");
        };
        if let Some(ref title) = metadata.title {
            entry("Title", title);
        }
        if let Some(ref author) = metadata.author {
            entry("Author", author);
        }
        if let Some(ref subject) = metadata.subject {
            entry("Subject", subject);
        }
        if let Some(created) = metadata.created {
            entry("CreationDate", &format!("D:{}000000", created.format("%Y%m%d")));
        }
        entry("Producer", PRODUCER);
        entry("Creator", "cvpdf");
        info.extend_from_slice(b">>");
        info
    }

    /// Encode a string as the body of a PDF literal string: WinAnsi bytes,
    /// with `\`, `(` and `)` escaped. Characters outside WinAnsi become `?`.
    fn encode_pdf_string(s: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(s.len());
        for ch in s.chars() {
            let byte = winansi_code(ch).unwrap_or(b'?');
            if matches!(byte, b'\\' | b'(' | b')') {
                out.push(b'\\');
            }
            out.push(byte);
        }
        out
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Result<Vec<u8>, CvError> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        // Header
        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            write!(output, "{} 0 obj\n", i)?;
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        write!(output, "xref\n0 {}\n", builder.objects.len())?;
        write!(output, "0000000000 65535 f \n")?;
        for offset in offsets.iter().skip(1) {
            write!(output, "{:010} 00000 n \n", offset)?;
        }

        write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        )?;

        Ok(output)
    }
}

/// Distinct characters of the document, metadata included, that have no
/// WinAnsi code.
fn unencodable_chars(document: &Document) -> BTreeSet<char> {
    let meta = &document.metadata;
    let texts = document
        .pages
        .iter()
        .flat_map(|page| page.texts())
        .map(|run| run.text.as_str())
        .chain(meta.title.as_deref())
        .chain(meta.author.as_deref())
        .chain(meta.subject.as_deref());
    texts
        .flat_map(str::chars)
        .filter(|ch| winansi_code(*ch).is_none())
        .collect()
}

/// Reject documents that would produce a corrupt file.
fn validate(document: &Document) -> Result<(), CvError> {
    let g = &document.geometry;
    if !(g.width.is_finite() && g.height.is_finite()) || g.width <= 0.0 || g.height <= 0.0 {
        return Err(CvError::Generation(format!(
            "invalid page size {}x{}mm",
            g.width, g.height
        )));
    }
    if document.pages.is_empty() {
        return Err(CvError::Generation("document has no pages".to_string()));
    }

    for (index, page) in document.pages.iter().enumerate() {
        for op in &page.ops {
            let finite = match op {
                DrawOp::FillRect { rect, .. } | DrawOp::FillRoundedRect { rect, .. } => {
                    [rect.x, rect.y, rect.width, rect.height].iter().all(|v| v.is_finite())
                }
                DrawOp::Line {
                    x1, y1, x2, y2, width, ..
                } => [*x1, *y1, *x2, *y2, *width].iter().all(|v| v.is_finite()),
                DrawOp::Text(run) => {
                    [run.x, run.y, run.style.font.size].iter().all(|v| v.is_finite())
                }
            };
            if !finite {
                return Err(CvError::Generation(format!(
                    "non-finite coordinate on page {}",
                    index + 1
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Canvas, PageGeometry};
    use crate::style::{text_styles, FontSpec, TextStyle};

    fn one_page() -> Document {
        let mut doc = Document::new(PageGeometry::A4);
        doc.add_page();
        doc
    }

    fn run(text: &str, style: TextStyle) -> TextRun {
        TextRun {
            x: 20.0,
            y: 30.0,
            width: 10.0,
            text: text.to_string(),
            style,
        }
    }

    fn inflate_first_stream(bytes: &[u8]) -> Vec<u8> {
        let start = bytes.windows(7).position(|w| w == b"stream\n").unwrap() + 7;
        let end = bytes.windows(10).position(|w| w == b"\nendstream").unwrap();
        miniz_oxide::inflate::decompress_to_vec_zlib(&bytes[start..end]).unwrap()
    }

    #[test]
    fn test_encode_pdf_string() {
        assert_eq!(
            PdfWriter::encode_pdf_string("Hello (World)"),
            b"Hello \\(World\\)".to_vec()
        );
        assert_eq!(PdfWriter::encode_pdf_string("back\\slash"), b"back\\\\slash".to_vec());
        assert_eq!(PdfWriter::encode_pdf_string("Présent"), b"Pr\xe9sent".to_vec());
        assert_eq!(PdfWriter::encode_pdf_string("漢字"), b"??".to_vec());
    }

    #[test]
    fn test_unencodable_chars_collected_once_per_document() {
        let mut doc = one_page();
        doc.add_page();
        doc.text(run("李 Lovelace", text_styles::BODY));
        doc.set_page(0);
        doc.text(run("李 Lovelace", text_styles::BODY));
        doc.text(run("Présent", text_styles::DATES));
        doc.metadata.author = Some("李 Ada \u{263A}".to_string());

        let chars: Vec<char> = unencodable_chars(&doc).into_iter().collect();
        assert_eq!(chars, vec!['\u{263A}', '李']);
        assert!(unencodable_chars(&one_page()).is_empty());
    }

    #[test]
    fn test_empty_page_produces_valid_pdf() {
        let bytes = PdfWriter::new().write(&one_page()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
        assert!(bytes.windows(4).any(|w| w == b"xref"));
        assert!(bytes.windows(7).any(|w| w == b"trailer"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/MediaBox [0 0 595.28 841.89]"));
    }

    #[test]
    fn test_no_pages_is_an_error() {
        let doc = Document::new(PageGeometry::A4);
        assert!(matches!(PdfWriter::new().write(&doc), Err(CvError::Generation(_))));
    }

    #[test]
    fn test_nan_coordinate_is_an_error() {
        let mut doc = one_page();
        doc.text(TextRun {
            x: f64::NAN,
            ..run("x", text_styles::BODY)
        });
        match PdfWriter::new().write(&doc) {
            Err(CvError::Generation(msg)) => assert!(msg.contains("page 1")),
            other => panic!("expected generation failure, got {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn test_metadata_in_pdf() {
        let mut doc = one_page();
        doc.metadata.title = Some("CV - Ada Lovelace".to_string());
        doc.metadata.author = Some("Ada Lovelace".to_string());
        doc.metadata.created = chrono::NaiveDate::from_ymd_opt(2026, 1, 15);
        let bytes = PdfWriter::new().write(&doc).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/Title (CV - Ada Lovelace)"));
        assert!(text.contains("/Author (Ada Lovelace)"));
        assert!(text.contains("/CreationDate (D:20260115000000)"));
        assert!(text.contains("/Info "));
    }

    #[test]
    fn test_fonts_registered_per_face() {
        let mut doc = one_page();
        doc.text(run("Regular", TextStyle::new(FontSpec::regular(10.0), Color::BLACK)));
        doc.text(run("Bold", TextStyle::new(FontSpec::bold(12.0), Color::BLACK)));
        doc.text(run("Italic", TextStyle::new(FontSpec::italic(8.0), Color::BLACK)));
        let bytes = PdfWriter::new().write(&doc).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/BaseFont /Helvetica "));
        assert!(text.contains("/BaseFont /Helvetica-Bold "));
        assert!(text.contains("/BaseFont /Helvetica-Oblique "));
        assert!(!text.contains("Helvetica-BoldOblique"));
    }

    #[test]
    fn test_content_stream_coordinates() {
        let mut doc = one_page();
        doc.fill_rect(Rect::new(0.0, 0.0, 210.0, 45.0), Color::WHITE);
        doc.text(run("Hi", TextStyle::new(FontSpec::regular(10.0), Color::BLACK)));
        let bytes = PdfWriter::new().write(&doc).unwrap();
        let content = String::from_utf8(inflate_first_stream(&bytes)).unwrap();

        // band: lower-left at (297 - 45)mm = 714.33pt, 595.28 x 127.56pt
        assert!(content.contains("0.00 714.33 595.28 127.56 re"), "{}", content);
        // text at (20mm, 30mm from top)
        assert!(content.contains("/F0 10.0 Tf\n56.69 756.85 Td\n(Hi) Tj"), "{}", content);
    }

    #[test]
    fn test_rounded_rect_path_closes() {
        let mut doc = one_page();
        doc.fill_rounded_rect(Rect::new(20.0, 60.0, 30.0, 7.0), 2.0, Color::WHITE);
        let bytes = PdfWriter::new().write(&doc).unwrap();
        let content = String::from_utf8(inflate_first_stream(&bytes)).unwrap();
        assert_eq!(content.matches(" c\n").count(), 4);
        assert!(content.contains("h\nf\nQ"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let mut doc = one_page();
        doc.text(run("Présent", text_styles::DATES));
        let a = PdfWriter::new().write(&doc).unwrap();
        let b = PdfWriter::new().write(&doc).unwrap();
        assert_eq!(a, b);
    }
}
