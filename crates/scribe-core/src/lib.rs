//! Scribe Core Library
//!
//! Translates AI scribe transcripts into structured clinical note commands.
//!
//! # Architecture
//!
//! ```text
//! Audio → Transcription/Summary (provider) → Segmentation
//!                                                 │
//!                             { section_name: SectionContent }
//!                                                 │
//!                                  Vocabulary → SectionKind
//!                                                 │
//!              ┌──────────────┬──────────────┬────┴─────────┬──────────────┐
//!              ▼              ▼              ▼              ▼              ▼
//!          Reason/HPI       Plan      Past Medical      Vitals       Assessment
//!           (joined)     (per line)  History (codes)                  (codes)
//!              │              │              │              │              │
//!              └──────────────┴──────┬───────┴──────────────┴──────────────┘
//!                                    ▼
//!                        Order (reverse) → Stamp (note id, line)
//!                                    │
//!                                    ▼
//!                          Emission → Host runtime
//! ```
//!
//! # Core Principle
//!
//! **Codes are only recorded on a full match.** A near match leaves the text
//! unstructured rather than risk a wrong diagnosis code.
//!
//! # Modules
//!
//! - [`models`]: Section content, candidate codes, commands
//! - [`matcher`]: Code matcher (normalization + partial-match scoring)
//! - [`parsers`]: Section parsers and the section registry
//! - [`segment`]: Segmentation boundary and provider vocabularies
//! - [`pipeline`]: Dispatcher, ordering, stamping, emission

pub mod matcher;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod segment;

// Re-export commonly used types
pub use matcher::{CodeMatch, CodeMatcher};
pub use models::{
    CandidateCode, Command, CommandKind, NoteId, ParseContext, PatientContext, SectionContent,
    VitalsReading,
};
pub use parsers::{ParseError, SectionKind};
pub use pipeline::{
    Dispatcher, Effect, Emission, NoteTarget, PipelineConfig, PipelineError, Reversal,
};
pub use segment::{HeaderSegmenter, JsonSegmenter, Provider, Sections, Segmenter};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ScribeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Segmentation error: {0}")]
    SegmentationError(String),

    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<PipelineError> for ScribeError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::MissingNoteId | PipelineError::InvalidNoteId(..) => {
                ScribeError::InvalidInput(e.to_string())
            }
            PipelineError::Unstamped(_) | PipelineError::NoteMismatch { .. } => {
                ScribeError::ContractViolation(e.to_string())
            }
            PipelineError::Segment(_) => ScribeError::SegmentationError(e.to_string()),
            PipelineError::Json(_) => ScribeError::SerializationError(e.to_string()),
        }
    }
}

impl From<segment::SegmentError> for ScribeError {
    fn from(e: segment::SegmentError) -> Self {
        ScribeError::SegmentationError(e.to_string())
    }
}

impl From<serde_json::Error> for ScribeError {
    fn from(e: serde_json::Error) -> Self {
        ScribeError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create a pipeline for a provider. `config_json` overrides defaults.
#[uniffi::export]
pub fn new_scribe_core(
    provider: Provider,
    config_json: Option<String>,
) -> Result<Arc<ScribeCore>, ScribeError> {
    let config = match config_json {
        Some(json) => PipelineConfig::from_json(&json)
            .map_err(|e| ScribeError::InvalidInput(format!("config: {}", e)))?,
        None => PipelineConfig::default(),
    };

    Ok(Arc::new(ScribeCore {
        provider,
        dispatcher: Dispatcher::new(provider.vocabulary(), config),
        segmenter: provider.segmenter(),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Stateless pipeline handle for the host runtime.
#[derive(uniffi::Object)]
pub struct ScribeCore {
    provider: Provider,
    dispatcher: Dispatcher,
    segmenter: Box<dyn Segmenter + Send + Sync>,
}

#[uniffi::export]
impl ScribeCore {
    /// Provider this pipeline was built for.
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Section names this pipeline parses.
    pub fn section_names(&self) -> Vec<String> {
        self.dispatcher
            .vocabulary()
            .entries()
            .iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Segment a text transcript and return ordered, stamped effects.
    pub fn parse_transcript(
        &self,
        transcript: String,
        note_id: String,
        context_json: Option<String>,
    ) -> Result<Vec<FfiEffect>, ScribeError> {
        let emission = self.run(self.segmenter.as_ref(), &transcript, &note_id, context_json)?;
        emission.effects.iter().map(FfiEffect::try_from).collect()
    }

    /// Same as `parse_transcript`, for providers that deliver sections as JSON.
    pub fn parse_sections_json(
        &self,
        sections_json: String,
        note_id: String,
        context_json: Option<String>,
    ) -> Result<Vec<FfiEffect>, ScribeError> {
        let emission = self.run(&JsonSegmenter::new(), &sections_json, &note_id, context_json)?;
        emission.effects.iter().map(FfiEffect::try_from).collect()
    }

    /// Digest of the emission for a transcript, for idempotency checks.
    pub fn emission_digest(
        &self,
        transcript: String,
        note_id: String,
        context_json: Option<String>,
    ) -> Result<String, ScribeError> {
        let emission = self.run(self.segmenter.as_ref(), &transcript, &note_id, context_json)?;
        Ok(emission.digest)
    }
}

impl ScribeCore {
    fn run(
        &self,
        segmenter: &dyn Segmenter,
        input: &str,
        note_id: &str,
        context_json: Option<String>,
    ) -> Result<Emission, ScribeError> {
        let target = NoteTarget::parse(note_id)?;
        let context = match context_json {
            Some(json) => serde_json::from_str::<ParseContext>(&json)?,
            None => ParseContext::default(),
        };
        Ok(self.dispatcher.run(segmenter, input, &target, &context)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe persistence effect.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiEffect {
    pub note_id: String,
    pub line_number: u32,
    pub command_type: String,
    pub payload_json: String,
}

impl TryFrom<&Effect> for FfiEffect {
    type Error = ScribeError;

    fn try_from(effect: &Effect) -> Result<Self, Self::Error> {
        Ok(Self {
            note_id: effect.note_id.to_string(),
            line_number: effect.line_number,
            command_type: effect.command_type.clone(),
            payload_json: serde_json::to_string(&effect.payload)?,
        })
    }
}
