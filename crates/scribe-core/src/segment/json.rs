//! Segmentation output delivered as JSON.
//!
//! Expected shape: an object mapping section name to
//! `{ "arguments": [...], "extra": {...} }`, in transcript order. Providers
//! sometimes wrap the object in prose, so only the outermost `{...}` span is
//! read. A malformed section is skipped; the rest still parse.

use serde_json::{Map, Value};
use tracing::warn;

use crate::models::SectionContent;

use super::{SegmentError, SegmentResult, Segmenter, Sections};

/// Segmenter for JSON section maps.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSegmenter;

impl JsonSegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl Segmenter for JsonSegmenter {
    fn segment(&self, transcript: &str) -> SegmentResult<Sections> {
        let start = transcript.find('{').ok_or_else(|| {
            SegmentError::InvalidFormat("No JSON object found in response".into())
        })?;
        let end = transcript.rfind('}').ok_or_else(|| {
            SegmentError::InvalidFormat("No closing brace found in response".into())
        })?;
        if end < start {
            return Err(SegmentError::InvalidFormat(
                "Closing brace precedes opening brace".into(),
            ));
        }

        let object: Map<String, Value> = serde_json::from_str(&transcript[start..=end])?;
        let mut sections = Sections::new();

        for (name, value) in object {
            match serde_json::from_value::<SectionContent>(value) {
                Ok(content) => sections.insert(name, content),
                Err(e) => warn!(section = %name, error = %e, "skipping malformed section"),
            }
        }

        Ok(sections)
    }
}
