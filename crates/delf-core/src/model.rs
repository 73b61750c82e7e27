//! Request-side data model.
//!
//! These types describe what a caller hands to the evaluator: the exercise
//! type, the student's answer and whatever reference material the exercise
//! carries (criteria for production, questions for comprehension).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maximum score used when an exercise defines neither criteria nor question points.
pub const DEFAULT_MAX_SCORE: f64 = 25.0;

/// The four DELF B2 skill categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    /// Written production.
    #[serde(alias = "written-production")]
    ProductionEcrite,
    /// Written comprehension.
    #[serde(alias = "written-comprehension")]
    ComprehensionEcrite,
    /// Spoken production.
    #[serde(alias = "spoken-production")]
    ProductionOrale,
    /// Spoken comprehension.
    #[serde(alias = "spoken-comprehension")]
    ComprehensionOrale,
}

impl ExerciseType {
    /// Whether a backend can grade this exercise type.
    pub fn is_automatable(self) -> bool {
        matches!(
            self,
            ExerciseType::ProductionEcrite | ExerciseType::ComprehensionEcrite
        )
    }

    pub fn is_production(self) -> bool {
        matches!(
            self,
            ExerciseType::ProductionEcrite | ExerciseType::ProductionOrale
        )
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseType::ProductionEcrite => write!(f, "production_ecrite"),
            ExerciseType::ComprehensionEcrite => write!(f, "comprehension_ecrite"),
            ExerciseType::ProductionOrale => write!(f, "production_orale"),
            ExerciseType::ComprehensionOrale => write!(f, "comprehension_orale"),
        }
    }
}

impl FromStr for ExerciseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production_ecrite" | "written-production" => Ok(ExerciseType::ProductionEcrite),
            "comprehension_ecrite" | "written-comprehension" => {
                Ok(ExerciseType::ComprehensionEcrite)
            }
            "production_orale" | "spoken-production" => Ok(ExerciseType::ProductionOrale),
            "comprehension_orale" | "spoken-comprehension" => Ok(ExerciseType::ComprehensionOrale),
            other => Err(format!("unknown exercise type: {other}")),
        }
    }
}

/// A named scoring dimension for production exercises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_uk: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_uk: Option<String>,
    pub max_points: f64,
}

/// A question of a comprehension exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensionQuestion {
    pub id: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_uk: Option<String>,
    /// `multiple_choice`, `true_false` or `open`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// A single answer or a list of accepted answers.
    pub correct_answer: Value,
    #[serde(default = "default_points")]
    pub points: f64,
}

fn default_points() -> f64 {
    1.0
}

/// The exercise definition passed through to the backend for grounding.
///
/// Only the fields the evaluator reads are typed; everything else is kept in
/// `extra` and serialized back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<Criterion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<ComprehensionQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Input to the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub exercise_type: ExerciseType,
    /// Free text for production, structured answers for comprehension.
    pub user_answer: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<Criterion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_content: Option<ExerciseContent>,
}

impl EvaluationRequest {
    pub fn new(exercise_type: ExerciseType, user_answer: impl Into<Value>) -> Self {
        Self {
            exercise_type,
            user_answer: user_answer.into(),
            correct_answer: None,
            criteria: Vec::new(),
            exercise_content: None,
        }
    }

    pub fn with_criteria(mut self, criteria: Vec<Criterion>) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn with_correct_answer(mut self, correct_answer: Value) -> Self {
        self.correct_answer = Some(correct_answer);
        self
    }

    pub fn with_content(mut self, content: ExerciseContent) -> Self {
        self.exercise_content = Some(content);
        self
    }

    /// Criteria from the request, falling back to those of the exercise content.
    pub fn effective_criteria(&self) -> &[Criterion] {
        if !self.criteria.is_empty() {
            return &self.criteria;
        }
        self.exercise_content
            .as_ref()
            .map(|c| c.criteria.as_slice())
            .unwrap_or(&[])
    }

    fn questions(&self) -> &[ComprehensionQuestion] {
        self.exercise_content
            .as_ref()
            .map(|c| c.questions.as_slice())
            .unwrap_or(&[])
    }

    /// Maximum score defined by the exercise itself: the criteria total for
    /// production, the question points total for comprehension.
    pub fn defined_max_score(&self) -> Option<f64> {
        let total: f64 = if self.exercise_type.is_production() {
            self.effective_criteria().iter().map(|c| c.max_points).sum()
        } else {
            self.questions().iter().map(|q| q.points).sum()
        };
        (total > 0.0).then_some(total)
    }

    /// The maximum score embedded in every evaluation prompt.
    pub fn max_score(&self) -> f64 {
        self.defined_max_score().unwrap_or(DEFAULT_MAX_SCORE)
    }

    /// Reference answers for comprehension grading.
    ///
    /// Uses `correct_answer` when given, otherwise maps each question id of
    /// the exercise content to its correct answer.
    pub fn answer_key(&self) -> Option<Value> {
        if let Some(answer) = &self.correct_answer {
            return Some(answer.clone());
        }
        let questions = self.questions();
        if questions.is_empty() {
            return None;
        }
        let key = questions
            .iter()
            .map(|q| (q.id.clone(), q.correct_answer.clone()))
            .collect::<Map<_, _>>();
        Some(Value::Object(key))
    }

    /// The student's answer as prompt text: strings verbatim, anything else as JSON.
    pub fn answer_text(&self) -> String {
        match &self.user_answer {
            Value::String(s) => s.clone(),
            Value::Object(map) => match map.get("text") {
                Some(Value::String(s)) => s.clone(),
                _ => self.user_answer.to_string(),
            },
            other => other.to_string(),
        }
    }

    /// Check that the fields required by the exercise type are present.
    pub fn check_contract(&self) -> Result<(), String> {
        match self.exercise_type {
            ExerciseType::ProductionEcrite => {
                if self.effective_criteria().is_empty() {
                    return Err("written production requires scoring criteria".into());
                }
                if self.answer_text().trim().is_empty() {
                    return Err("written production requires a non-empty answer".into());
                }
            }
            ExerciseType::ComprehensionEcrite => {
                if self.answer_key().is_none() {
                    return Err(
                        "written comprehension requires correct answers or exercise questions"
                            .into(),
                    );
                }
            }
            ExerciseType::ProductionOrale | ExerciseType::ComprehensionOrale => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn criterion(name: &str, max_points: f64) -> Criterion {
        Criterion {
            name: name.into(),
            name_uk: None,
            description: String::new(),
            description_uk: None,
            max_points,
        }
    }

    #[test]
    fn exercise_type_round_trips_wire_names() {
        for ty in [
            ExerciseType::ProductionEcrite,
            ExerciseType::ComprehensionEcrite,
            ExerciseType::ProductionOrale,
            ExerciseType::ComprehensionOrale,
        ] {
            assert_eq!(ty.to_string().parse::<ExerciseType>().unwrap(), ty);
        }
        assert_eq!(
            "spoken-production".parse::<ExerciseType>().unwrap(),
            ExerciseType::ProductionOrale
        );
        assert!("dictation".parse::<ExerciseType>().is_err());
    }

    #[test]
    fn max_score_sums_criteria() {
        let req = EvaluationRequest::new(ExerciseType::ProductionEcrite, "Bonjour")
            .with_criteria(vec![criterion("grammar", 15.0), criterion("lexique", 10.0)]);
        assert_eq!(req.max_score(), 25.0);
    }

    #[test]
    fn max_score_falls_back_to_default() {
        let req = EvaluationRequest::new(ExerciseType::ProductionEcrite, "Bonjour");
        assert_eq!(req.defined_max_score(), None);
        assert_eq!(req.max_score(), DEFAULT_MAX_SCORE);
    }

    #[test]
    fn criteria_fall_back_to_exercise_content() {
        let content = ExerciseContent {
            criteria: vec![criterion("coherence", 12.0)],
            ..Default::default()
        };
        let req =
            EvaluationRequest::new(ExerciseType::ProductionEcrite, "Bonjour").with_content(content);
        assert_eq!(req.effective_criteria().len(), 1);
        assert_eq!(req.max_score(), 12.0);
    }

    #[test]
    fn answer_key_derived_from_questions() {
        let content: ExerciseContent = serde_json::from_value(json!({
            "text": "Le texte",
            "questions": [
                {"id": "q1", "question": "Vrai ou faux ?", "correct_answer": "vrai", "points": 2},
                {"id": "q2", "question": "Pourquoi ?", "correct_answer": ["a", "b"], "points": 3}
            ]
        }))
        .unwrap();
        let req = EvaluationRequest::new(ExerciseType::ComprehensionEcrite, json!({"q1": "vrai"}))
            .with_content(content);

        assert_eq!(req.answer_key(), Some(json!({"q1": "vrai", "q2": ["a", "b"]})));
        assert_eq!(req.max_score(), 5.0);
        assert!(req.check_contract().is_ok());
    }

    #[test]
    fn contract_rejects_missing_fields() {
        let writing = EvaluationRequest::new(ExerciseType::ProductionEcrite, "Bonjour");
        assert!(writing.check_contract().unwrap_err().contains("criteria"));

        let reading = EvaluationRequest::new(ExerciseType::ComprehensionEcrite, json!({}));
        assert!(reading.check_contract().is_err());

        let speaking = EvaluationRequest::new(ExerciseType::ProductionOrale, "");
        assert!(speaking.check_contract().is_ok());
    }

    #[test]
    fn unknown_content_fields_are_kept() {
        let content: ExerciseContent = serde_json::from_value(json!({
            "prompt": "Écrivez une lettre",
            "min_words": 250
        }))
        .unwrap();
        assert_eq!(content.extra.get("min_words"), Some(&json!(250)));
        let back = serde_json::to_value(&content).unwrap();
        assert_eq!(back["min_words"], json!(250));
    }

    #[test]
    fn answer_text_unwraps_text_field() {
        let req = EvaluationRequest::new(
            ExerciseType::ProductionEcrite,
            json!({"text": "Madame, Monsieur"}),
        );
        assert_eq!(req.answer_text(), "Madame, Monsieur");
    }
}
