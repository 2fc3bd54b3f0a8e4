//! Pipeline dispatcher.
//!
//! Pipeline: Segmentation → Section Parsers → Ordering → Stamping → Emission
//!
//! The dispatcher holds no state between runs. The same sections and note
//! target always produce the same commands.

mod config;
mod emission;

pub use config::*;
pub use emission::*;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Command, CommandKind, NoteId, ParseContext};
use crate::segment::{Provider, SegmentError, Sections, Segmenter, Vocabulary};

/// Pipeline errors. These are contract violations and are never degraded.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Missing note id")]
    MissingNoteId,

    #[error("Invalid note id {0:?}: {1}")]
    InvalidNoteId(String, uuid::Error),

    #[error("Command {0} reached emission without a note stamp")]
    Unstamped(String),

    #[error("Command stamped for note {found}, expected {expected}")]
    NoteMismatch { expected: NoteId, found: NoteId },

    #[error("Segmentation error: {0}")]
    Segment(#[from] SegmentError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// The note commands are stamped for, and where numbering starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteTarget {
    pub note_id: NoteId,
    /// Persistence order of the first emitted command
    pub first_line_number: u32,
}

impl NoteTarget {
    pub fn new(note_id: NoteId) -> Self {
        Self {
            note_id,
            first_line_number: 0,
        }
    }

    /// Parse a host-supplied note id. Blank ids are rejected.
    pub fn parse(note_id: &str) -> PipelineResult<Self> {
        if note_id.trim().is_empty() {
            return Err(PipelineError::MissingNoteId);
        }
        NoteId::parse(note_id)
            .map(Self::new)
            .map_err(|e| PipelineError::InvalidNoteId(note_id.to_string(), e))
    }

    /// Start numbering at `line_number`.
    pub fn starting_at(mut self, line_number: u32) -> Self {
        self.first_line_number = line_number;
        self
    }
}

/// Routes sections to parsers and orders, stamps, and emits the result.
pub struct Dispatcher {
    vocabulary: Vocabulary,
    config: PipelineConfig,
}

impl Dispatcher {
    /// Create a dispatcher.
    pub fn new(vocabulary: Vocabulary, config: PipelineConfig) -> Self {
        Self { vocabulary, config }
    }

    /// Dispatcher with a provider's vocabulary and default settings.
    pub fn for_provider(provider: Provider) -> Self {
        Self::new(provider.vocabulary(), PipelineConfig::default())
    }

    /// Parse every known section, in section order.
    ///
    /// Unknown section names are skipped. A section whose parser fails
    /// yields no commands; other sections are unaffected.
    pub fn parse_sections(
        &self,
        sections: &Sections,
        context: &ParseContext,
    ) -> Vec<Vec<CommandKind>> {
        let options = self.config.parse_options();
        let mut parsed = Vec::with_capacity(sections.len());

        for section in sections {
            let Some(kind) = self.vocabulary.resolve(&section.name) else {
                debug!(section = %section.name, "no parser registered, skipping");
                continue;
            };

            match kind.parse(&section.content, context, &options) {
                Ok(commands) => {
                    debug!(section = %section.name, %kind, commands = commands.len(), "parsed section");
                    parsed.push(commands);
                }
                Err(e) => {
                    warn!(section = %section.name, %kind, error = %e, "section parse failed, emitting nothing for it");
                }
            }
        }

        parsed
    }

    /// Parse, order, and stamp commands for one note.
    pub fn dispatch(
        &self,
        sections: &Sections,
        target: &NoteTarget,
        context: &ParseContext,
    ) -> Vec<Command> {
        let parsed = self.parse_sections(sections, context);
        let ordered = order(parsed, self.config.reversal);

        ordered
            .into_iter()
            .enumerate()
            .map(|(index, kind)| {
                let mut command = Command::new(kind);
                let offset = u32::try_from(index).unwrap_or(u32::MAX);
                command.stamp(target.note_id, target.first_line_number.saturating_add(offset));
                command
            })
            .collect()
    }

    /// Dispatch and build the emission handed to the host.
    pub fn emit(
        &self,
        sections: &Sections,
        target: &NoteTarget,
        context: &ParseContext,
    ) -> PipelineResult<Emission> {
        let commands = self.dispatch(sections, target, context);
        let emission = Emission::from_commands(target.note_id, &commands)?;

        info!(
            note_id = %target.note_id,
            commands = emission.len(),
            digest = %emission.digest,
            "emitting commands"
        );

        Ok(emission)
    }

    /// Segment a raw transcript, then emit.
    pub fn run(
        &self,
        segmenter: &dyn Segmenter,
        transcript: &str,
        target: &NoteTarget,
        context: &ParseContext,
    ) -> PipelineResult<Emission> {
        let sections = segmenter.segment(transcript)?;
        self.emit(&sections, target, context)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

/// Flatten per-section commands into emission order.
fn order(parsed: Vec<Vec<CommandKind>>, reversal: Reversal) -> Vec<CommandKind> {
    match reversal {
        Reversal::Global => {
            let mut flat: Vec<CommandKind> = parsed.into_iter().flatten().collect();
            flat.reverse();
            flat
        }
        Reversal::PerSection => parsed
            .into_iter()
            .flat_map(|section| section.into_iter().rev())
            .collect(),
    }
}
