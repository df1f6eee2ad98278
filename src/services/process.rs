//! Ore transport delay configuration.
//!
//! DESIGN
//! ======
//! The flowsheet has ten transport legs, each with a delay in seconds.
//! Edits only take effect when the operator confirms them: [`apply`] is a
//! pure `(current, inputs) -> (next, changed)` step, and the caller
//! re-renders the flowsheet overlay only when `changed` is true.
//!
//! Only t1..t3 are drawn onto the flowsheet image; the other seven delays
//! are stored but not overlaid.

use serde::{Deserialize, Serialize};

pub const DELAY_COUNT: usize = 10;

/// Leg labels and default delays (seconds), t1..t10.
const LEGS: [(&str, f64); DELAY_COUNT] = [
    ("Dump Truck → Feed Chute", 2.0),
    ("Gyratory Crusher", 3.0),
    ("Gyratory Crusher → Bottom Bin", 4.0),
    ("Bottom Bin → Belt Feeder", 5.0),
    ("Belt Feeder → Long Belt", 6.0),
    ("Long Belt → Stacker", 5.0),
    ("Stacker → RoM Ore Stockpile", 4.0),
    ("RoM Ore Stockpile → Feeder", 3.0),
    ("Feeder → Mill Feed Belt", 2.0),
    ("Mill Feed Belt → AG Mill", 12.0),
];

/// Pixel anchors on the flowsheet image for the overlaid delays.
const OVERLAY_ANCHORS: [(u32, u32); 3] = [(270, 20), (50, 130), (70, 280)];
const OVERLAY_COLOR: &str = "#FF0000";
const OVERLAY_FONT_SIZE: u32 = 40;

pub const FLOWSHEET_IMAGE: &str = "resources/processing flowsheet.png";

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("delay t{index} must be a finite, non-negative number of seconds (got {value})")]
    InvalidDelay { index: usize, value: f64 },
}

/// Confirmed delays, t1 at index 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Delays(pub [f64; DELAY_COUNT]);

impl Default for Delays {
    fn default() -> Self {
        Self(LEGS.map(|(_, secs)| secs))
    }
}

impl Delays {
    /// Reject negative, NaN, or infinite delays.
    ///
    /// # Errors
    ///
    /// Names the first offending delay (1-based).
    pub fn validate(&self) -> Result<(), ProcessError> {
        for (i, &value) in self.0.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ProcessError::InvalidDelay { index: i + 1, value });
            }
        }
        Ok(())
    }

    /// Delay `tN`, 1-based.
    #[must_use]
    pub fn get(&self, n: usize) -> Option<f64> {
        n.checked_sub(1).and_then(|i| self.0.get(i)).copied()
    }
}

/// One text label to draw over the flowsheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLabel {
    pub text: String,
    pub x: u32,
    pub y: u32,
    pub color: &'static str,
    pub font_size: u32,
}

/// Labels for the annotated flowsheet.
#[must_use]
pub fn overlay_for(delays: &Delays) -> Vec<OverlayLabel> {
    OVERLAY_ANCHORS
        .iter()
        .zip(delays.0)
        .enumerate()
        .map(|(i, (&(x, y), secs))| OverlayLabel {
            text: format!("t{}={}s", i + 1, format_secs(secs)),
            x,
            y,
            color: OVERLAY_COLOR,
            font_size: OVERLAY_FONT_SIZE,
        })
        .collect()
}

/// `2.0` renders as `2.0`, `2.5` as `2.5`.
fn format_secs(secs: f64) -> String {
    if secs.fract() == 0.0 { format!("{secs:.1}") } else { secs.to_string() }
}

/// Process-parameter state kept per session.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProcessState {
    pub delays: Delays,
    /// `None` until the first confirmed change; the plain flowsheet is shown.
    pub overlay: Option<Vec<OverlayLabel>>,
}

/// Confirm new delays against the current state.
///
/// Returns the next state and whether anything changed. An unchanged
/// submission returns the current state untouched.
///
/// # Errors
///
/// Rejects invalid delays without touching the state.
pub fn apply(current: &ProcessState, inputs: Delays) -> Result<(ProcessState, bool), ProcessError> {
    inputs.validate()?;
    if inputs == current.delays {
        return Ok((current.clone(), false));
    }
    Ok((ProcessState { delays: inputs, overlay: Some(overlay_for(&inputs)) }, true))
}

/// One input field on the configuration form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayField {
    pub key: String,
    pub label: &'static str,
    pub value: f64,
    pub step: f64,
}

/// Form fields for the current delays, t1..t10.
#[must_use]
pub fn delay_fields(delays: &Delays) -> Vec<DelayField> {
    LEGS.iter()
        .zip(delays.0)
        .enumerate()
        .map(|(i, (&(label, _), value))| DelayField { key: format!("t{}", i + 1), label, value, step: 1.0 })
        .collect()
}

#[cfg(test)]
#[path = "process_test.rs"]
mod tests;
