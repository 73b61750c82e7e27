//! Result-side data model.
//!
//! Serialized field names follow the wire format the backends are asked to
//! produce (`feedback_uk`, `strengths_uk`, ...); the Rust names spell out the
//! role of the second language instead.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A scored evaluation, produced once per request and handed to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: f64,
    pub max_score: f64,
    pub feedback: String,
    #[serde(rename = "feedback_uk")]
    pub feedback_localized: String,
    #[serde(default)]
    pub corrections: Vec<Correction>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(rename = "strengths_uk", default)]
    pub strengths_localized: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(rename = "weaknesses_uk", default)]
    pub weaknesses_localized: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(rename = "recommendations_uk", default)]
    pub recommendations_localized: Vec<String>,
    /// Per-question breakdown, only for comprehension evaluations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_results: Option<Vec<QuestionResult>>,
}

impl EvaluationResult {
    /// Score as a percentage of the maximum (0 when the maximum is 0).
    pub fn percentage(&self) -> f64 {
        if self.max_score > 0.0 {
            self.score / self.max_score * 100.0
        } else {
            0.0
        }
    }
}

/// Category of a correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionKind {
    Grammar,
    Vocabulary,
    Structure,
    Content,
    Spelling,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Moderate,
    Major,
}

/// A single correction to the student's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    #[serde(rename = "type")]
    pub kind: CorrectionKind,
    pub original: String,
    pub correction: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(rename = "explanation_uk", default)]
    pub explanation_localized: String,
    pub severity: Severity,
}

/// Per-question row of a comprehension evaluation.
///
/// Backends phrase these rows loosely, so every field is optional and
/// anything unrecognized is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub question_id: Option<Value>,
    #[serde(
        default,
        alias = "is_correct",
        skip_serializing_if = "Option::is_none"
    )]
    pub correct: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_earned: Option<f64>,
    #[serde(default, alias = "max_points", skip_serializing_if = "Option::is_none")]
    pub points_possible: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(
        rename = "explanation_uk",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub explanation_localized: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A personalized study recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Skill the recommendation targets (e.g. `production_ecrite`).
    pub skill: String,
    pub priority: Priority,
    pub message: String,
    #[serde(rename = "message_uk", default)]
    pub message_localized: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_exercise_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn percentage_of_max_score() {
        let result: EvaluationResult = serde_json::from_value(json!({
            "score": 18.0,
            "max_score": 24.0,
            "feedback": "Bien",
            "feedback_uk": "Добре"
        }))
        .unwrap();
        assert_eq!(result.percentage(), 75.0);
        assert!(result.corrections.is_empty());
        assert!(result.detailed_results.is_none());
    }

    #[test]
    fn unknown_correction_kind_is_other() {
        let c: Correction = serde_json::from_value(json!({
            "type": "punctuation",
            "original": "Bonjour ,",
            "correction": "Bonjour,",
            "severity": "minor"
        }))
        .unwrap();
        assert_eq!(c.kind, CorrectionKind::Other);
        assert_eq!(c.severity, Severity::Minor);
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let err = serde_json::from_value::<Correction>(json!({
            "type": "grammar",
            "original": "je suis allé",
            "correction": "je suis allée",
            "severity": "critical"
        }));
        assert!(err.is_err());
    }

    #[test]
    fn question_result_accepts_loose_field_names() {
        let row: QuestionResult = serde_json::from_value(json!({
            "id": "q1",
            "is_correct": true,
            "points_earned": 2,
            "comment": "Parfait"
        }))
        .unwrap();
        assert_eq!(row.question_id, Some(json!("q1")));
        assert_eq!(row.correct, Some(true));
        assert_eq!(row.points_earned, Some(2.0));
        assert_eq!(row.extra.get("comment"), Some(&json!("Parfait")));
    }

    #[test]
    fn result_serializes_wire_names() {
        let result = EvaluationResult {
            score: 20.0,
            max_score: 25.0,
            feedback: "Bien".into(),
            feedback_localized: "Добре".into(),
            corrections: vec![],
            strengths: vec![],
            strengths_localized: vec!["Чітко".into()],
            weaknesses: vec![],
            weaknesses_localized: vec![],
            recommendations: vec![],
            recommendations_localized: vec![],
            detailed_results: None,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["feedback_uk"], json!("Добре"));
        assert_eq!(value["strengths_uk"], json!(["Чітко"]));
        assert!(value.get("detailed_results").is_none());
    }
}
