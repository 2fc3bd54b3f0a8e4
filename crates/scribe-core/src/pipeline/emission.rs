//! Emission of stamped commands to the host runtime.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::models::{Command, NoteId};

use super::{PipelineError, PipelineResult};

/// One persistence effect for the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Effect {
    pub note_id: NoteId,
    pub line_number: u32,
    pub command_type: String,
    /// Command fields, tagged with `type`
    pub payload: Value,
}

impl Effect {
    /// Originate an effect from a stamped command.
    ///
    /// An unstamped command is a contract violation and is refused.
    pub fn originate(command: &Command) -> PipelineResult<Self> {
        let command_type = command.kind.command_type();
        let (Some(note_id), Some(line_number)) = (command.note_id, command.line_number) else {
            return Err(PipelineError::Unstamped(command_type.to_string()));
        };

        Ok(Self {
            note_id,
            line_number,
            command_type: command_type.to_string(),
            payload: serde_json::to_value(&command.kind)?,
        })
    }
}

/// The ordered effects for one note, with a digest over their content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Emission {
    pub note_id: NoteId,
    pub effects: Vec<Effect>,
    /// Hex SHA-256 of the effects' JSON encoding
    pub digest: String,
}

impl Emission {
    /// Build an emission from commands already stamped for `note_id`.
    pub fn from_commands(note_id: NoteId, commands: &[Command]) -> PipelineResult<Self> {
        let effects = commands
            .iter()
            .map(|command| {
                let effect = Effect::originate(command)?;
                if effect.note_id != note_id {
                    return Err(PipelineError::NoteMismatch {
                        expected: note_id,
                        found: effect.note_id,
                    });
                }
                Ok(effect)
            })
            .collect::<PipelineResult<Vec<_>>>()?;

        let digest = hash_data(&serde_json::to_vec(&effects)?);

        Ok(Self {
            note_id,
            effects,
            digest,
        })
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Hex SHA-256 of arbitrary bytes.
pub fn hash_data(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
