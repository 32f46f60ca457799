//! Simulated location detection.

/// The coordinate string the simulated GPS always reports.
pub const DETECTED_LOCATION: &str = "28.5458° N, 77.1703° E";

/// Detect the caller's location.
///
/// There is no real geolocation: this always returns
/// [`DETECTED_LOCATION`], ready to drop into a form's coordinates field.
#[must_use]
pub fn detect_location() -> String {
    tracing::debug!("Simulating location detection");
    DETECTED_LOCATION.to_string()
}
