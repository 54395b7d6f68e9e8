//! # cvpdf
//!
//! A page-native resume renderer.
//!
//! A profile record goes in, a paginated A4 document comes out. There is one
//! template: a coloured header band, then the summary, skills, experience,
//! education and additional-info sections, each emitted only when it has
//! content. Sections flow *into* pages. Before every block the engine checks
//! whether it still fits above the bottom margin and starts a new page if
//! it doesn't.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON / ProfileRecord)
//!       ↓
//!   [model]    — Profile record, entries, size limits
//!       ↓
//!   [layout]   — Fixed template, cursor + page breaks
//!       ↓        (measures through [text] / [font])
//!   [pdf]      — Serialize to PDF bytes
//! ```

pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod style;
pub mod text;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::CvError;
pub use layout::{Canvas, Document, LayoutEngine, PageGeometry};
pub use model::{Education, Experience, ProfileLimits, ProfileRecord};

use chrono::NaiveDate;

use font::FontContext;
use pdf::PdfWriter;

/// A finished resume, ready to be saved or sent.
#[derive(Debug, Clone)]
pub struct RenderedResume {
    /// `CV_<first>_<last>.pdf`
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Lay out a profile on A4 with the built-in Helvetica metrics.
///
/// Never fails: every field combination produces a document.
pub fn render_resume(profile: &ProfileRecord, generated_on: NaiveDate) -> Document {
    LayoutEngine::new(FontContext::new()).layout(profile, generated_on)
}

/// Serialize a laid-out document.
pub fn render_pdf(document: &Document) -> Result<Vec<u8>, CvError> {
    PdfWriter::new().write(document)
}

/// Check, lay out and serialize a profile with the default size limits.
///
/// This is the primary entry point.
pub fn render_profile(profile: &ProfileRecord, generated_on: NaiveDate) -> Result<RenderedResume, CvError> {
    render_profile_with_limits(profile, generated_on, &ProfileLimits::default())
}

pub fn render_profile_with_limits(
    profile: &ProfileRecord,
    generated_on: NaiveDate,
    limits: &ProfileLimits,
) -> Result<RenderedResume, CvError> {
    limits.check(profile)?;
    let document = render_resume(profile, generated_on);
    let bytes = render_pdf(&document)?;
    Ok(RenderedResume {
        file_name: profile.suggested_file_name(),
        bytes,
        page_count: document.pages.len(),
    })
}

/// Render a profile given as JSON.
pub fn render_json(json: &str, generated_on: NaiveDate) -> Result<RenderedResume, CvError> {
    let profile: ProfileRecord = serde_json::from_str(json)?;
    render_profile(&profile, generated_on)
}

/// The local calendar date, for callers that want "now" in the footer.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
