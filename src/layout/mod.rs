//! # Resume Layout Engine
//!
//! Turns a [`ProfileRecord`] into a paginated [`Document`].
//!
//! The template is fixed. Sections are emitted in one order (header band,
//! summary, skills, experience, education, additional info) and a footer is
//! stamped on every page at the end. A single [`LayoutCursor`] carries the
//! vertical position through every step:
//!
//! 1. Before a block, ask the cursor whether `y + h` still fits above the
//!    bottom margin. If not, add a page and restart at the top margin.
//! 2. Measure, place, advance. Each step returns the next cursor.
//!
//! Heights used for step 1 are fixed per block kind, not measured. An
//! experience entry with a very long description reserves the same 35mm as
//! a short one, so it can run past the bottom margin. Break points depend
//! on these estimates; keep them stable.
//!
//! Drawing goes through the [`Canvas`] trait and measurement through
//! [`TextMeasure`], so the algorithm runs the same against the recording
//! [`Document`] and against test doubles.

pub mod flow;
pub mod page_break;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Education, Experience, ProfileRecord};
use crate::style::{palette, text_styles, Color, TextStyle};
use crate::text::{ellipsize, wrap_text, TextMeasure, MM_PER_PT};

use flow::RowFlow;
pub use page_break::{BreakDecision, LayoutCursor, PageGeometry};

// ── Template constants (mm) ─────────────────────────────────────

const HEADER_BAND_HEIGHT: f64 = 45.0;
const NAME_BASELINE: f64 = 20.0;
const PROFESSION_BASELINE: f64 = 30.0;
const CONTACT_BASELINE: f64 = 40.0;
const CONTENT_TOP: f64 = 55.0;
const CONTACT_SEPARATOR: &str = "  |  ";

const SECTION_TITLE_ADVANCE: f64 = 6.0;
const SEPARATOR_ADVANCE: f64 = 8.0;
const SEPARATOR_WIDTH: f64 = 0.5;

/// Cursor advance per wrapped body line.
const BODY_LINE_ADVANCE: f64 = 5.0;
/// Baseline pitch inside a multi-line block, as a multiple of font size.
const LINE_HEIGHT_FACTOR: f64 = 1.15;

const SUMMARY_GAP_AFTER: f64 = 10.0;

const PILL_PADDING: f64 = 3.0;
const PILL_HEIGHT: f64 = 7.0;
const PILL_GAP: f64 = 4.0;
const PILL_RADIUS: f64 = 2.0;
/// Distance from the pill's text baseline up to its top edge.
const PILL_ASCENT: f64 = 5.0;
const PILL_ROW_HEIGHT: f64 = PILL_HEIGHT + 3.0;
const SKILLS_GAP_AFTER: f64 = 20.0;

const ENTRY_LINE_ADVANCE: f64 = 5.0;
const EXPERIENCE_GAP_AFTER: f64 = 12.0;
const EDUCATION_GAP_AFTER: f64 = 14.0;
const INFO_LINE_ADVANCE: f64 = 6.0;

/// Footer baseline, measured up from the bottom edge.
const FOOTER_OFFSET: f64 = 10.0;

// Reserved heights for page-break checks.
const SECTION_ESTIMATE: f64 = 30.0;
const LIST_SECTION_ESTIMATE: f64 = 40.0;
const EXPERIENCE_ESTIMATE: f64 = 35.0;
const EDUCATION_ESTIMATE: f64 = 25.0;

pub const TITLE_SUMMARY: &str = "PROFIL";
pub const TITLE_SKILLS: &str = "COMPÉTENCES";
pub const TITLE_EXPERIENCE: &str = "EXPÉRIENCES PROFESSIONNELLES";
pub const TITLE_EDUCATION: &str = "FORMATION";
pub const TITLE_ADDITIONAL: &str = "INFORMATIONS COMPLÉMENTAIRES";

// ── Output document ─────────────────────────────────────────────

/// An axis-aligned rectangle; `y` is the top edge, measured from the page
/// top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// A single line of positioned text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    /// Left edge, after alignment was resolved.
    pub x: f64,
    /// Baseline.
    pub y: f64,
    /// Measured width.
    pub width: f64,
    pub text: String,
    pub style: TextStyle,
}

impl TextRun {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// What to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillRoundedRect {
        rect: Rect,
        radius: f64,
        color: Color,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Color,
    },
    Text(TextRun),
}

/// One laid-out page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|run| run.text == needle)
    }
}

/// Document information written to the PDF Info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub created: Option<NaiveDate>,
}

/// The laid-out resume: fixed-size pages of draw operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
    pub metadata: Metadata,
    #[serde(skip)]
    current: usize,
}

impl Document {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            metadata: Metadata::default(),
            current: 0,
        }
    }

    fn push(&mut self, op: DrawOp) {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        self.pages[self.current].ops.push(op);
    }
}

// ── Drawing seam ────────────────────────────────────────────────

/// Drawing primitives the engine needs. Coordinates are millimetres from
/// the top-left page corner; text `y` is the baseline.
pub trait Canvas {
    /// Append a blank page and make it current.
    fn add_page(&mut self);
    fn page_count(&self) -> usize;
    /// Index of the page draw calls go to.
    fn current_page(&self) -> usize;
    /// Make an existing page current. Out-of-range indices are ignored.
    fn set_page(&mut self, index: usize);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Color);
    fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
    fn text(&mut self, run: TextRun);
}

impl Canvas for Document {
    fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.current = self.pages.len() - 1;
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current_page(&self) -> usize {
        self.current
    }

    fn set_page(&mut self, index: usize) {
        if index < self.pages.len() {
            self.current = index;
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawOp::FillRect { rect, color });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Color) {
        self.push(DrawOp::FillRoundedRect {
            rect,
            radius,
            color,
        });
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
        self.push(DrawOp::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            width,
            color,
        });
    }

    fn text(&mut self, run: TextRun) {
        self.push(DrawOp::Text(run));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

// ── Engine ──────────────────────────────────────────────────────

/// The resume layout engine.
pub struct LayoutEngine<M> {
    measure: M,
    geometry: PageGeometry,
}

impl<M: TextMeasure> LayoutEngine<M> {
    pub fn new(measure: M) -> Self {
        Self::with_geometry(measure, PageGeometry::A4)
    }

    pub fn with_geometry(measure: M, geometry: PageGeometry) -> Self {
        Self { measure, geometry }
    }

    /// Lay out `profile` into a new document. `generated_on` is the date
    /// printed in the footer.
    pub fn layout(&self, profile: &ProfileRecord, generated_on: NaiveDate) -> Document {
        let mut document = Document::new(self.geometry);
        document.metadata = Metadata {
            title: Some(format!("CV - {} {}", profile.first_name, profile.last_name)),
            author: Some(format!("{} {}", profile.first_name, profile.last_name)),
            subject: profile.profession().map(str::to_string),
            created: Some(generated_on),
        };
        self.render(profile, generated_on, &mut document);
        tracing::info!(
            pages = document.pages.len(),
            skills = profile.skills.len(),
            experiences = profile.experiences.len(),
            education = profile.education.len(),
            "resume laid out"
        );
        document
    }

    /// Draw `profile` onto `canvas`, starting with a fresh page.
    pub fn render<C: Canvas>(&self, profile: &ProfileRecord, generated_on: NaiveDate, canvas: &mut C) {
        canvas.add_page();
        let first_page = canvas.current_page();
        let mut cursor = LayoutCursor::start(&self.geometry, first_page);

        cursor = self.header(cursor, profile, canvas);

        if let Some(summary) = profile.summary() {
            cursor = self.summary(cursor, summary, canvas);
        }
        if !profile.skills.is_empty() {
            cursor = self.skills(cursor, &profile.skills, canvas);
        }
        if !profile.experiences.is_empty() {
            cursor = self.experiences(cursor, &profile.experiences, canvas);
        }
        if !profile.education.is_empty() {
            cursor = self.education(cursor, &profile.education, canvas);
        }

        let info = additional_info(profile);
        if !info.is_empty() {
            cursor = self.additional_info(cursor, &info, canvas);
        }

        tracing::debug!(last_page = cursor.page, y = cursor.y, "body done");
        self.footers(first_page, generated_on, canvas);
    }

    // ── Steps ───────────────────────────────────────────────────

    /// Break to a new page when `needed` would cross the bottom margin.
    fn ensure<C: Canvas>(&self, cursor: LayoutCursor, needed: f64, canvas: &mut C) -> LayoutCursor {
        match cursor.decide(needed, &self.geometry) {
            BreakDecision::Place => cursor,
            BreakDecision::NewPage => {
                canvas.add_page();
                let next = cursor.next_page(&self.geometry);
                tracing::debug!(page = next.page, needed, from_y = cursor.y, "page break");
                next
            }
        }
    }

    /// Filled band across the top of the first page with name, profession
    /// and contact line, all centred.
    fn header<C: Canvas>(&self, cursor: LayoutCursor, profile: &ProfileRecord, canvas: &mut C) -> LayoutCursor {
        let g = &self.geometry;
        canvas.fill_rect(Rect::new(0.0, 0.0, g.width, HEADER_BAND_HEIGHT), palette::PRIMARY);

        let center = g.width / 2.0;
        self.draw_text(canvas, &profile.display_name(), center, NAME_BASELINE, text_styles::NAME, Align::Center);

        if let Some(profession) = profile.profession() {
            self.draw_text(canvas, profession, center, PROFESSION_BASELINE, text_styles::PROFESSION, Align::Center);
        }

        let contact = profile.contact_parts();
        if !contact.is_empty() {
            let line = contact.join(CONTACT_SEPARATOR);
            self.draw_text(canvas, &line, center, CONTACT_BASELINE, text_styles::CONTACT, Align::Center);
        }

        cursor.at(CONTENT_TOP)
    }

    /// Title, then a rule across the content width.
    fn section_header<C: Canvas>(
        &self,
        cursor: LayoutCursor,
        title: &str,
        estimate: f64,
        canvas: &mut C,
    ) -> LayoutCursor {
        let cursor = self.ensure(cursor, estimate, canvas);
        tracing::debug!(section = title, page = cursor.page, y = cursor.y, "section");
        let g = &self.geometry;

        self.draw_text(canvas, title, g.margin, cursor.y, text_styles::SECTION_TITLE, Align::Left);
        let cursor = cursor.advance(SECTION_TITLE_ADVANCE);

        canvas.line(
            (g.margin, cursor.y),
            (g.right_edge(), cursor.y),
            SEPARATOR_WIDTH,
            palette::SECONDARY,
        );
        cursor.advance(SEPARATOR_ADVANCE)
    }

    fn summary<C: Canvas>(&self, cursor: LayoutCursor, summary: &str, canvas: &mut C) -> LayoutCursor {
        let cursor = self.section_header(cursor, TITLE_SUMMARY, SECTION_ESTIMATE, canvas);
        let lines = self.paragraph(canvas, summary, cursor.y, text_styles::BODY);
        cursor.advance(lines as f64 * BODY_LINE_ADVANCE + SUMMARY_GAP_AFTER)
    }

    /// Rounded pills flowing left to right, wrapping greedily.
    fn skills<C: Canvas>(&self, cursor: LayoutCursor, skills: &[String], canvas: &mut C) -> LayoutCursor {
        let mut cursor = self.section_header(cursor, TITLE_SKILLS, SECTION_ESTIMATE, canvas);
        let g = &self.geometry;
        let style = text_styles::SKILL;
        let mut flow = RowFlow::new(g.margin, g.right_edge(), PILL_GAP);
        let max_text = flow.max_width() - 2.0 * PILL_PADDING;

        for skill in skills {
            let mut label = skill.clone();
            let mut text_width = self.measure.text_width(&label, &style.font);
            if text_width > max_text {
                label = ellipsize(&self.measure, skill, max_text, &style.font);
                text_width = self.measure.text_width(&label, &style.font);
                tracing::warn!(skill = %skill, "skill label truncated to fit the content width");
            }
            let pill_width = text_width + 2.0 * PILL_PADDING;

            let slot = flow.place(pill_width);
            if slot.wrapped {
                cursor = cursor.advance(PILL_ROW_HEIGHT);
                cursor = self.ensure(cursor, PILL_ROW_HEIGHT, canvas);
            }

            canvas.fill_rounded_rect(
                Rect::new(slot.x, cursor.y - PILL_ASCENT, pill_width, PILL_HEIGHT),
                PILL_RADIUS,
                palette::PILL,
            );
            canvas.text(TextRun {
                x: slot.x + PILL_PADDING,
                y: cursor.y,
                width: text_width,
                text: label,
                style,
            });
        }

        cursor.advance(SKILLS_GAP_AFTER)
    }

    fn experiences<C: Canvas>(
        &self,
        cursor: LayoutCursor,
        experiences: &[Experience],
        canvas: &mut C,
    ) -> LayoutCursor {
        let mut cursor = self.section_header(cursor, TITLE_EXPERIENCE, LIST_SECTION_ESTIMATE, canvas);
        for exp in experiences {
            cursor = self.experience_entry(cursor, exp, canvas);
        }
        cursor
    }

    /// Position and dates on one line, company below, then the wrapped
    /// description. The gap after is fixed whatever was drawn.
    fn experience_entry<C: Canvas>(&self, cursor: LayoutCursor, exp: &Experience, canvas: &mut C) -> LayoutCursor {
        let cursor = self.ensure(cursor, EXPERIENCE_ESTIMATE, canvas);
        let g = &self.geometry;

        self.draw_text(canvas, &exp.position, g.margin, cursor.y, text_styles::ENTRY_TITLE, Align::Left);
        self.draw_text(canvas, &exp.date_range(), g.right_edge(), cursor.y, text_styles::DATES, Align::Right);
        let cursor = cursor.advance(ENTRY_LINE_ADVANCE);

        self.draw_text(canvas, &exp.company, g.margin, cursor.y, text_styles::ORGANIZATION, Align::Left);
        let mut cursor = cursor.advance(ENTRY_LINE_ADVANCE);

        if !exp.description.is_empty() {
            let lines = self.paragraph(canvas, &exp.description, cursor.y, text_styles::BODY);
            cursor = cursor.advance(lines as f64 * BODY_LINE_ADVANCE);
        }

        cursor.advance(EXPERIENCE_GAP_AFTER)
    }

    fn education<C: Canvas>(&self, cursor: LayoutCursor, education: &[Education], canvas: &mut C) -> LayoutCursor {
        let mut cursor = self.section_header(cursor, TITLE_EDUCATION, LIST_SECTION_ESTIMATE, canvas);
        for edu in education {
            cursor = self.education_entry(cursor, edu, canvas);
        }
        cursor
    }

    fn education_entry<C: Canvas>(&self, cursor: LayoutCursor, edu: &Education, canvas: &mut C) -> LayoutCursor {
        let cursor = self.ensure(cursor, EDUCATION_ESTIMATE, canvas);
        let g = &self.geometry;

        self.draw_text(canvas, &edu.title(), g.margin, cursor.y, text_styles::ENTRY_TITLE, Align::Left);
        self.draw_text(canvas, &edu.date_range(), g.right_edge(), cursor.y, text_styles::DATES, Align::Right);
        let cursor = cursor.advance(ENTRY_LINE_ADVANCE);

        self.draw_text(canvas, &edu.school, g.margin, cursor.y, text_styles::ORGANIZATION, Align::Left);
        cursor.advance(EDUCATION_GAP_AFTER)
    }

    fn additional_info<C: Canvas>(&self, cursor: LayoutCursor, lines: &[String], canvas: &mut C) -> LayoutCursor {
        let mut cursor = self.section_header(cursor, TITLE_ADDITIONAL, SECTION_ESTIMATE, canvas);
        for line in lines {
            self.draw_text(canvas, line, self.geometry.margin, cursor.y, text_styles::BODY, Align::Left);
            cursor = cursor.advance(INFO_LINE_ADVANCE);
        }
        cursor
    }

    /// Generation date, centred near the bottom edge of every page.
    fn footers<C: Canvas>(&self, first_page: usize, generated_on: NaiveDate, canvas: &mut C) {
        let text = footer_text(generated_on);
        let y = self.geometry.height - FOOTER_OFFSET;
        let center = self.geometry.width / 2.0;
        for page in first_page..canvas.page_count() {
            canvas.set_page(page);
            self.draw_text(canvas, &text, center, y, text_styles::FOOTER, Align::Center);
        }
    }

    // ── Primitives ──────────────────────────────────────────────

    fn draw_text<C: Canvas>(&self, canvas: &mut C, text: &str, anchor_x: f64, y: f64, style: TextStyle, align: Align) {
        let width = self.measure.text_width(text, &style.font);
        let x = match align {
            Align::Left => anchor_x,
            Align::Center => anchor_x - width / 2.0,
            Align::Right => anchor_x - width,
        };
        canvas.text(TextRun {
            x,
            y,
            width,
            text: text.to_string(),
            style,
        });
    }

    /// Word-wrapped block at the content width, first baseline at `y`.
    /// Returns the number of lines drawn.
    fn paragraph<C: Canvas>(&self, canvas: &mut C, text: &str, y: f64, style: TextStyle) -> usize {
        let g = &self.geometry;
        let lines = wrap_text(&self.measure, text, g.content_width(), &style.font);
        let pitch = style.font.size * LINE_HEIGHT_FACTOR * MM_PER_PT;
        for (i, line) in lines.iter().enumerate() {
            canvas.text(TextRun {
                x: g.margin,
                y: y + i as f64 * pitch,
                width: line.width,
                text: line.text.clone(),
                style,
            });
        }
        lines.len()
    }
}

/// Labelled lines of the additional-info block, in print order.
fn additional_info(profile: &ProfileRecord) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(birth_date) = profile.birth_date() {
        lines.push(format!("Date de naissance: {}", birth_date));
    }
    if let Some(address) = profile.full_address() {
        lines.push(format!("Adresse: {}", address));
    }
    lines
}

/// "CV généré le DD/MM/YYYY".
pub fn footer_text(date: NaiveDate) -> String {
    format!("CV généré le {}", date.format("%d/%m/%Y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FontSpec;

    /// Every character is `size / 10` mm wide, so a 10pt string of n chars
    /// is n mm.
    struct Fixed;

    impl TextMeasure for Fixed {
        fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
            text.chars().count() as f64 * font.size / 10.0
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    }

    fn profile() -> ProfileRecord {
        ProfileRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            ..Default::default()
        }
    }

    fn layout(p: &ProfileRecord) -> Document {
        LayoutEngine::new(Fixed).layout(p, date())
    }

    #[test]
    fn footer_date_format() {
        assert_eq!(footer_text(date()), "CV généré le 09/03/2026");
    }

    #[test]
    fn header_band_spans_page_width() {
        let doc = layout(&profile());
        match &doc.pages[0].ops[0] {
            DrawOp::FillRect { rect, color } => {
                assert_eq!(*rect, Rect::new(0.0, 0.0, 210.0, 45.0));
                assert_eq!(*color, palette::PRIMARY);
            }
            other => panic!("expected header band, got {:?}", other),
        }
    }

    #[test]
    fn name_is_centered() {
        let doc = layout(&profile());
        let name = doc.pages[0].texts().find(|t| t.text == "ADA LOVELACE").unwrap();
        assert!((name.x + name.width / 2.0 - 105.0).abs() < 1e-9);
        assert_eq!(name.y, NAME_BASELINE);
    }

    #[test]
    fn contact_line_joins_parts() {
        let mut p = profile();
        p.phone = Some("0600000000".to_string());
        p.city = Some("London".to_string());
        let doc = layout(&p);
        assert!(doc.pages[0].contains_text("ada@x.com  |  0600000000  |  London"));
    }

    #[test]
    fn profession_only_when_present() {
        let doc = layout(&profile());
        assert!(!doc.pages[0].texts().any(|t| t.y == PROFESSION_BASELINE));

        let mut p = profile();
        p.profession = Some("Mathematician".to_string());
        let doc = layout(&p);
        let prof = doc.pages[0].texts().find(|t| t.text == "Mathematician").unwrap();
        assert_eq!(prof.y, PROFESSION_BASELINE);
    }

    #[test]
    fn summary_section_layout() {
        let mut p = profile();
        p.summary = Some("First computer programmer.".to_string());
        let doc = layout(&p);
        let page = &doc.pages[0];

        let title = page.texts().find(|t| t.text == TITLE_SUMMARY).unwrap();
        assert_eq!(title.y, CONTENT_TOP);
        let rule_y = page
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Line { y1, .. } => Some(*y1),
                _ => None,
            })
            .unwrap();
        assert_eq!(rule_y, CONTENT_TOP + SECTION_TITLE_ADVANCE);
        let body = page.texts().find(|t| t.text == "First computer programmer.").unwrap();
        assert_eq!(body.y, CONTENT_TOP + SECTION_TITLE_ADVANCE + SEPARATOR_ADVANCE);
        assert_eq!(body.x, 20.0);
    }

    #[test]
    fn dates_are_right_aligned() {
        let mut p = profile();
        p.experiences.push(Experience {
            position: "Engineer".to_string(),
            company: "Babbage & Co".to_string(),
            start_date: "2020-01".to_string(),
            ..Default::default()
        });
        let doc = layout(&p);
        let dates = doc.pages[0].texts().find(|t| t.text == "2020-01 - Présent").unwrap();
        assert!((dates.right() - 190.0).abs() < 1e-9);
        let position = doc.pages[0].texts().find(|t| t.text == "Engineer").unwrap();
        assert_eq!(position.y, dates.y);
        assert_eq!(position.style, text_styles::ENTRY_TITLE);
    }

    #[test]
    fn pills_wrap_and_stay_inside_margin() {
        let mut p = profile();
        // each pill is 30 + 6 = 36mm wide; four fit in 170mm with 4mm gaps
        p.skills = (0..9).map(|i| format!("{:0>30}", i)).collect();
        let doc = layout(&p);
        let pills: Vec<Rect> = doc.pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRoundedRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(pills.len(), 9);
        let rows: Vec<f64> = pills.iter().map(|r| r.y).collect();
        assert_eq!(rows[0], rows[3]);
        assert_eq!(rows[4] - rows[0], PILL_ROW_HEIGHT);
        assert_eq!(rows[8] - rows[4], PILL_ROW_HEIGHT);
        assert!(pills.iter().all(|r| r.right() <= 190.0 + 1e-9));
    }

    #[test]
    fn oversized_skill_is_truncated() {
        let mut p = profile();
        p.skills = vec!["x".repeat(400)];
        let doc = layout(&p);
        let pill = doc.pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::FillRoundedRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .unwrap();
        assert!(pill.right() <= 190.0 + 1e-9);
        assert!(doc.pages[0].texts().any(|t| t.text.ends_with('\u{2026}')));
    }

    #[test]
    fn entries_break_onto_new_pages() {
        let mut p = profile();
        p.education = (0..20)
            .map(|i| Education {
                school: format!("School {}", i),
                degree: "MSc".to_string(),
                field: "Maths".to_string(),
                start_date: "2000".to_string(),
                end_date: "2002".to_string(),
            })
            .collect();
        let doc = layout(&p);
        assert!(doc.pages.len() >= 2);
        // header band only on the first page
        let bands = doc
            .pages
            .iter()
            .filter(|page| matches!(page.ops.first(), Some(DrawOp::FillRect { .. })))
            .count();
        assert_eq!(bands, 1);
        // continuation pages start at the top margin
        let first_on_page_two = doc.pages[1].texts().next().unwrap();
        assert_eq!(first_on_page_two.y, 20.0);
    }

    #[test]
    fn footer_on_every_page() {
        let mut p = profile();
        p.skills = (0..200).map(|i| format!("skill-{:03}", i)).collect();
        let doc = layout(&p);
        assert!(doc.pages.len() >= 2);
        for page in &doc.pages {
            let footer = page.texts().filter(|t| t.text == "CV généré le 09/03/2026").count();
            assert_eq!(footer, 1);
        }
    }

    #[test]
    fn additional_info_lines() {
        let mut p = profile();
        p.birth_date = Some("1815-12-10".to_string());
        p.address = Some("12 St James's Square".to_string());
        p.city = Some("London".to_string());
        let doc = layout(&p);
        let page = &doc.pages[0];
        assert!(page.contains_text(TITLE_ADDITIONAL));
        assert!(page.contains_text("Date de naissance: 1815-12-10"));
        assert!(page.contains_text("Adresse: 12 St James's Square London"));
    }

    #[test]
    fn render_onto_existing_canvas_appends_pages() {
        let mut doc = Document::new(PageGeometry::A4);
        doc.add_page();
        LayoutEngine::new(Fixed).render(&profile(), date(), &mut doc);
        assert_eq!(doc.pages.len(), 2);
        assert!(doc.pages[0].ops.is_empty());
        assert!(doc.pages[1].contains_text("ADA LOVELACE"));
    }
}
