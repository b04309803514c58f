use crate::error::ExtractionError;

/// Marker wrapping the translated text on the mobile translation page.
pub const RESULT_OPEN_MARKER: &str = r#"<div class="result-container">"#;
pub const RESULT_CLOSE_MARKER: &str = "</div>";

/// Return the trimmed text between the first `open_marker` and the next
/// `close_marker` after it.
///
/// This is a positional scrape, not an HTML parser: nested elements inside
/// the block end the match early and entities are returned undecoded.
pub fn extract(html: &str, open_marker: &str, close_marker: &str) -> Result<String, ExtractionError> {
    let start = html
        .find(open_marker)
        .map(|idx| idx + open_marker.len())
        .ok_or_else(|| ExtractionError::OpenMarkerNotFound(open_marker.to_string()))?;

    let rest = &html[start..];
    let end = rest
        .find(close_marker)
        .ok_or_else(|| ExtractionError::CloseMarkerNotFound(close_marker.to_string()))?;

    Ok(rest[..end].trim().to_string())
}

/// [`extract`] with the result-container markers.
pub fn extract_translation(html: &str) -> Result<String, ExtractionError> {
    extract(html, RESULT_OPEN_MARKER, RESULT_CLOSE_MARKER)
}
