//! Vitals parser.
//!
//! Reads `Label: value` lines. The label is matched by keyword and the first
//! number of the right shape is taken from the value, so units and trailing
//! words are tolerated:
//! - weight (`244 lbs`)
//! - height (`5'10"`, in inches)
//! - heart rate / pulse (`80`, `80 bpm`)
//! - oxygen saturation / SpO2 (`94%`, `94% on room air`)
//! - blood pressure (`167/106`, `167/106 mmHg`)

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::{CommandKind, ParseContext, SectionContent, VitalsReading};

use super::{ParseOptions, ParseResult};

static HEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\d+)\s*'\s*(?:(\d+)\s*(?:"|''|in\b)?)?"#).expect("valid height regex")
});

static WEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:lbs?|pounds?)\b").expect("valid weight regex")
});

static BLOOD_PRESSURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*/\s*(\d+)").expect("valid blood pressure regex"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid number regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VitalSign {
    Weight,
    Height,
    BloodPressure,
    Pulse,
    OxygenSaturation,
}

impl VitalSign {
    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        if label.contains("weight") {
            Some(Self::Weight)
        } else if label.contains("height") {
            Some(Self::Height)
        } else if label.contains("blood pressure") || label == "bp" {
            Some(Self::BloodPressure)
        } else if label.contains("heart rate") || label.contains("pulse") {
            Some(Self::Pulse)
        } else if label.contains("oxygen") || label.contains("o2 sat") || label.contains("spo2") {
            Some(Self::OxygenSaturation)
        } else {
            None
        }
    }
}

/// Exactly one vitals command per section; unknown values stay `None`.
///
/// A line whose value cannot be read leaves the field as it was, so a later
/// `Weight: not recorded` never erases an earlier `Weight: 244 lbs`.
pub fn parse_vitals(
    content: &SectionContent,
    _context: &ParseContext,
    _options: &ParseOptions,
) -> ParseResult<Vec<CommandKind>> {
    let mut reading = VitalsReading::default();

    for line in &content.arguments {
        let (label, value) = line.split_once(':').unwrap_or((line.as_str(), line.as_str()));

        let Some(sign) = VitalSign::from_label(label) else {
            debug!(line = %line, "unsupported vital sign");
            continue;
        };

        let applied = match sign {
            VitalSign::Weight => parse_weight(value).map(|w| reading.weight_lbs = Some(w)),
            VitalSign::Height => parse_height(value).map(|h| reading.height = Some(h)),
            VitalSign::BloodPressure => parse_blood_pressure(value).map(|(systole, diastole)| {
                reading.blood_pressure_systole = Some(systole);
                reading.blood_pressure_diastole = Some(diastole);
            }),
            VitalSign::Pulse => first_number(value).map(|p| reading.pulse = Some(p)),
            VitalSign::OxygenSaturation => {
                first_number(value).map(|o| reading.oxygen_saturation = Some(o))
            }
        };

        if applied.is_none() {
            debug!(?sign, line = %line, "unreadable vital sign value");
        }
    }

    Ok(vec![CommandKind::Vitals(reading)])
}

/// Parse a height like `5'10"` into inches.
pub fn parse_height(value: &str) -> Option<u32> {
    let caps = HEIGHT.captures(value)?;
    let feet: u32 = caps[1].parse().ok()?;
    let inches: u32 = match caps.get(2) {
        Some(inches) => inches.as_str().parse().ok()?,
        None => 0,
    };

    feet.checked_mul(12)?.checked_add(inches)
}

/// Parse a weight like `244 lbs` into whole pounds.
pub fn parse_weight(value: &str) -> Option<u32> {
    let caps = WEIGHT.captures(value)?;
    whole_number(&caps[1])
}

/// Parse a blood pressure like `120/80` into (systole, diastole).
pub fn parse_blood_pressure(value: &str) -> Option<(u32, u32)> {
    let caps = BLOOD_PRESSURE.captures(value)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

fn first_number(value: &str) -> Option<u32> {
    whole_number(NUMBER.find(value)?.as_str())
}

fn whole_number(value: &str) -> Option<u32> {
    if let Ok(n) = value.parse::<u32>() {
        return Some(n);
    }
    let n: f64 = value.parse().ok()?;
    (n.is_finite() && n >= 0.0 && n <= u32::MAX as f64).then(|| n.round() as u32)
}
