//! Shared data record passed through the component pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::segment::SegmentSequence;

/// Narrative importance of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    Main,
    Support,
    Minor,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterGender {
    Male,
    Female,
    Other,
    #[default]
    Unknown,
}

/// A character extracted from (or annotated on) the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    /// Display name of the character.
    pub name: String,
    /// Unique identifier used by quote attributions.
    pub identifier: String,
    pub kind: CharacterKind,
    pub gender: CharacterGender,
    /// Free-text personality notes.
    pub personality: String,
    /// Voice assigned to this character downstream, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_speaker_id: Option<String>,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            name: String::new(),
            identifier: String::new(),
            kind: CharacterKind::Unknown,
            gender: CharacterGender::Unknown,
            personality: String::new(),
            assigned_speaker_id: None,
        }
    }
}

impl Character {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            ..Self::default()
        }
    }
}

/// The record every pipeline component reads from and writes to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineData {
    /// The source document text.
    pub original_text: String,
    /// Characters known to speak in the document.
    pub characters: Vec<Character>,
    /// The (predicted or loaded) segment sequence for the document.
    pub segments: SegmentSequence,
    /// Reference sequence used by the evaluation component.
    pub ground_truth: Option<SegmentSequence>,
    /// Free-form side channel for component statistics and reports.
    pub attributes: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Segment;

    #[test]
    fn default_data_is_empty() {
        let data = PipelineData::default();
        assert!(data.original_text.is_empty());
        assert!(data.characters.is_empty());
        assert!(data.segments.is_empty());
        assert!(data.ground_truth.is_none());
        assert!(data.attributes.is_empty());
    }

    #[test]
    fn serde_round_trip() {
        let mut data = PipelineData {
            original_text: "He said hi.".to_string(),
            characters: vec![Character::new("Tom", "TOM_1")],
            ..PipelineData::default()
        };
        data.segments = SegmentSequence::new(vec![
            Segment::other(1, "He said "),
            Segment::quote(2, "hi.", Some("TOM_1".to_string())),
        ])
        .unwrap();
        data.attributes
            .insert("note".to_string(), serde_json::json!(42));

        let json = serde_json::to_string_pretty(&data).unwrap();
        let back: PipelineData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.original_text, data.original_text);
        assert_eq!(back.segments, data.segments);
        assert_eq!(back.characters, data.characters);
        assert_eq!(back.attributes["note"], serde_json::json!(42));
    }

    #[test]
    fn character_defaults_to_unknown() {
        let character = Character::new("Anna", "ANNA_1");
        assert_eq!(character.kind, CharacterKind::Unknown);
        assert_eq!(character.gender, CharacterGender::Unknown);
        assert!(character.assigned_speaker_id.is_none());
    }

    #[test]
    fn character_kind_serializes_lowercase() {
        let json = serde_json::to_string(&CharacterKind::Main).unwrap();
        assert_eq!(json, "\"main\"");
    }
}
