//! # Profile Model
//!
//! The input representation for the renderer: a user's profile record as
//! the profile store hands it over. Field names follow the camelCase JSON
//! used on the wire, so a record fetched from the API deserializes as-is.
//!
//! Optional strings are `Option<String>`, but an empty string is treated
//! exactly like an absent one everywhere in the engine. The helpers on each
//! type (`phone()`, `end_date()`, ...) do that normalization so layout code
//! never has to.

use serde::{Deserialize, Serialize};

use crate::error::CvError;

/// A complete profile ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Rendered in sequence order.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
}

/// One work experience entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    /// Empty means the position is still held.
    pub end_date: String,
    pub description: String,
}

/// One education entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
}

/// Label used in place of a missing experience end date.
pub const PRESENT: &str = "Présent";

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl ProfileRecord {
    pub fn phone(&self) -> Option<&str> {
        non_empty(&self.phone)
    }

    pub fn address(&self) -> Option<&str> {
        non_empty(&self.address)
    }

    pub fn city(&self) -> Option<&str> {
        non_empty(&self.city)
    }

    pub fn postal_code(&self) -> Option<&str> {
        non_empty(&self.postal_code)
    }

    pub fn country(&self) -> Option<&str> {
        non_empty(&self.country)
    }

    pub fn birth_date(&self) -> Option<&str> {
        non_empty(&self.birth_date)
    }

    pub fn profession(&self) -> Option<&str> {
        non_empty(&self.profession)
    }

    pub fn summary(&self) -> Option<&str> {
        non_empty(&self.summary)
    }

    /// "FIRST LAST", as printed in the header band.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).to_uppercase()
    }

    /// Email, phone, then location, in that order, skipping what is missing.
    /// Location is "city, country" when both are known, otherwise whichever
    /// one is.
    pub fn contact_parts(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if !self.email.is_empty() {
            parts.push(self.email.clone());
        }
        if let Some(phone) = self.phone() {
            parts.push(phone.to_string());
        }
        match (self.city(), self.country()) {
            (Some(city), Some(country)) => parts.push(format!("{}, {}", city, country)),
            (Some(city), None) => parts.push(city.to_string()),
            (None, Some(country)) => parts.push(country.to_string()),
            (None, None) => {}
        }
        parts
    }

    /// "address[, postal code][ city]", or `None` without an address.
    pub fn full_address(&self) -> Option<String> {
        let mut text = self.address()?.to_string();
        if let Some(postal_code) = self.postal_code() {
            text.push_str(", ");
            text.push_str(postal_code);
        }
        if let Some(city) = self.city() {
            text.push(' ');
            text.push_str(city);
        }
        Some(text)
    }

    /// Suggested download name: `CV_<first>_<last>.pdf` with every run of
    /// whitespace collapsed to a single underscore.
    pub fn suggested_file_name(&self) -> String {
        let raw = format!("CV_{}_{}.pdf", self.first_name, self.last_name);
        let mut name = String::with_capacity(raw.len());
        let mut in_space = false;
        for ch in raw.chars() {
            if ch.is_whitespace() {
                if !in_space {
                    name.push('_');
                }
                in_space = true;
            } else {
                name.push(ch);
                in_space = false;
            }
        }
        name
    }
}

impl Experience {
    /// "start - end", with a missing end date printed as "Présent".
    pub fn date_range(&self) -> String {
        let end = if self.end_date.is_empty() {
            PRESENT
        } else {
            self.end_date.as_str()
        };
        format!("{} - {}", self.start_date, end)
    }
}

impl Education {
    /// "start - end", verbatim.
    pub fn date_range(&self) -> String {
        format!("{} - {}", self.start_date, self.end_date)
    }

    /// "degree - field".
    pub fn title(&self) -> String {
        format!("{} - {}", self.degree, self.field)
    }
}

// ── Boundary guard ──────────────────────────────────────────────

/// Size limits enforced before a profile reaches the layout engine.
///
/// Document size grows with the number of entries, so callers that accept
/// profiles from the outside check them here first. The engine itself never
/// refuses input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileLimits {
    /// Max length of `skills`, `experiences` and `education`, each.
    pub max_entries: usize,
    /// Max byte length of any single text field.
    pub max_text_len: usize,
}

impl Default for ProfileLimits {
    fn default() -> Self {
        Self {
            max_entries: 500,
            max_text_len: 64 * 1024,
        }
    }
}

impl ProfileLimits {
    /// Reject the profile if any sequence has more than `max_entries` items
    /// or any string field, nested entries included, is longer than
    /// `max_text_len` bytes.
    pub fn check(&self, profile: &ProfileRecord) -> Result<(), CvError> {
        self.check_len("skills", profile.skills.len(), self.max_entries)?;
        self.check_len("experiences", profile.experiences.len(), self.max_entries)?;
        self.check_len("education", profile.education.len(), self.max_entries)?;

        for (field, text) in text_fields(profile) {
            self.check_len(field, text.len(), self.max_text_len)?;
        }
        Ok(())
    }

    fn check_len(&self, field: &'static str, len: usize, max: usize) -> Result<(), CvError> {
        if len > max {
            return Err(CvError::InputTooLarge { field, len, max });
        }
        Ok(())
    }
}

/// Every string in the profile, labelled with its field name.
fn text_fields(profile: &ProfileRecord) -> Vec<(&'static str, &str)> {
    let mut fields = vec![
        ("firstName", profile.first_name.as_str()),
        ("lastName", profile.last_name.as_str()),
        ("email", profile.email.as_str()),
    ];
    let optional = [
        ("phone", &profile.phone),
        ("address", &profile.address),
        ("city", &profile.city),
        ("postalCode", &profile.postal_code),
        ("country", &profile.country),
        ("birthDate", &profile.birth_date),
        ("profession", &profile.profession),
        ("summary", &profile.summary),
    ];
    for (field, value) in optional {
        if let Some(text) = value {
            fields.push((field, text.as_str()));
        }
    }
    for skill in &profile.skills {
        fields.push(("skills[]", skill.as_str()));
    }
    for exp in &profile.experiences {
        fields.push(("experiences[].company", exp.company.as_str()));
        fields.push(("experiences[].position", exp.position.as_str()));
        fields.push(("experiences[].startDate", exp.start_date.as_str()));
        fields.push(("experiences[].endDate", exp.end_date.as_str()));
        fields.push(("experiences[].description", exp.description.as_str()));
    }
    for edu in &profile.education {
        fields.push(("education[].school", edu.school.as_str()));
        fields.push(("education[].degree", edu.degree.as_str()));
        fields.push(("education[].field", edu.field.as_str()));
        fields.push(("education[].startDate", edu.start_date.as_str()));
        fields.push(("education[].endDate", edu.end_date.as_str()));
    }
    fields
}
