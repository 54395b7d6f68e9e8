use wasm_bindgen::prelude::*;

use crate::model::ProfileRecord;

/// Render a profile given as a JSON string. Returns the PDF bytes, which
/// arrive in JavaScript as a `Uint8Array`.
#[wasm_bindgen]
pub fn render_cv(json: &str) -> Result<Vec<u8>, JsValue> {
    crate::render_json(json, crate::today())
        .map(|resume| resume.bytes)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Same as [`render_cv`], taking a plain JavaScript object.
#[wasm_bindgen]
pub fn render_cv_object(profile: JsValue) -> Result<Vec<u8>, JsValue> {
    let profile: ProfileRecord = serde_wasm_bindgen::from_value(profile)
        .map_err(|e| JsValue::from_str(&format!("Invalid profile: {}", e)))?;
    crate::render_profile(&profile, crate::today())
        .map(|resume| resume.bytes)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Suggested download name for a profile given as JSON.
#[wasm_bindgen]
pub fn suggested_file_name(json: &str) -> Result<String, JsValue> {
    let profile: ProfileRecord =
        serde_json::from_str(json).map_err(|e| JsValue::from_str(&crate::CvError::from(e).to_string()))?;
    Ok(profile.suggested_file_name())
}
