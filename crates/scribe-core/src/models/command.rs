//! Structured clinical commands produced from transcript sections.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of the note a command is persisted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Parse a note identifier supplied by the host.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s.trim()).map(Self)
    }

    /// Generate a fresh identifier.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for NoteId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A structured clinical assertion, before stamping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandKind {
    /// Reason for visit, one comment per section
    ReasonForVisit { comment: String },
    /// History of present illness narrative
    HistoryOfPresentIllness { narrative: String },
    /// One plan item
    Plan { narrative: String },
    /// One matched past diagnosis
    PastMedicalHistory { code: String },
    /// Vital signs read from the vitals section
    Vitals(VitalsReading),
    /// New diagnosis from the assessment section
    Diagnose {
        icd10_code: String,
        today_assessment: String,
    },
    /// Assessment of a condition already on the patient's record
    Assess {
        condition_id: String,
        narrative: String,
    },
}

impl CommandKind {
    /// Stable name of the command type, as the host knows it.
    pub fn command_type(&self) -> &'static str {
        match self {
            CommandKind::ReasonForVisit { .. } => "reason_for_visit",
            CommandKind::HistoryOfPresentIllness { .. } => "history_of_present_illness",
            CommandKind::Plan { .. } => "plan",
            CommandKind::PastMedicalHistory { .. } => "past_medical_history",
            CommandKind::Vitals(_) => "vitals",
            CommandKind::Diagnose { .. } => "diagnose",
            CommandKind::Assess { .. } => "assess",
        }
    }
}

/// Vital signs. Unknown values stay `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VitalsReading {
    /// Height in inches
    pub height: Option<u32>,
    pub weight_lbs: Option<u32>,
    pub pulse: Option<u32>,
    /// Oxygen saturation in percent
    pub oxygen_saturation: Option<u32>,
    pub blood_pressure_systole: Option<u32>,
    pub blood_pressure_diastole: Option<u32>,
}

impl VitalsReading {
    /// Check whether no vital sign was recognized.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A command together with its note stamp.
///
/// Parsers produce unstamped commands; only the dispatcher stamps them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    /// Owning note, set by stamping
    pub note_id: Option<NoteId>,
    /// Persistence order within the note, set by stamping
    pub line_number: Option<u32>,
}

impl Command {
    /// Create an unstamped command.
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            note_id: None,
            line_number: None,
        }
    }

    /// Attach the owning note and persistence order.
    pub fn stamp(&mut self, note_id: NoteId, line_number: u32) {
        self.note_id = Some(note_id);
        self.line_number = Some(line_number);
    }

    /// Check if both note and persistence order are set.
    pub fn is_stamped(&self) -> bool {
        self.note_id.is_some() && self.line_number.is_some()
    }
}

impl From<CommandKind> for Command {
    fn from(kind: CommandKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_id_parse() {
        let id = NoteId::parse(" 6f1c2a4e-8b7d-4d8e-9f10-2a3b4c5d6e7f ").unwrap();
        assert_eq!(id.to_string(), "6f1c2a4e-8b7d-4d8e-9f10-2a3b4c5d6e7f");

        assert!(NoteId::parse("").is_err());
        assert!(NoteId::parse("not-a-note").is_err());
    }

    #[test]
    fn test_stamping() {
        let mut command = Command::new(CommandKind::Plan {
            narrative: "Schedule follow-up".into(),
        });
        assert!(!command.is_stamped());

        let note = NoteId::new_v4();
        command.stamp(note, 3);

        assert!(command.is_stamped());
        assert_eq!(command.note_id, Some(note));
        assert_eq!(command.line_number, Some(3));
    }

    #[test]
    fn test_command_kind_serialization() {
        let kind = CommandKind::PastMedicalHistory { code: "I10".into() };
        let json = serde_json::to_value(&kind).unwrap();

        assert_eq!(json["type"], "past_medical_history");
        assert_eq!(json["code"], "I10");
        assert_eq!(kind.command_type(), "past_medical_history");
    }

    #[test]
    fn test_vitals_serialization_is_flat() {
        let kind = CommandKind::Vitals(VitalsReading {
            pulse: Some(72),
            ..Default::default()
        });
        let json = serde_json::to_value(&kind).unwrap();

        assert_eq!(json["type"], "vitals");
        assert_eq!(json["pulse"], 72);
        assert!(json["height"].is_null());
    }

    #[test]
    fn test_empty_vitals() {
        assert!(VitalsReading::default().is_empty());
        assert!(!VitalsReading {
            height: Some(70),
            ..Default::default()
        }
        .is_empty());
    }
}
