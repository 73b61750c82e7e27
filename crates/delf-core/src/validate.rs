//! Schema validation of parsed backend replies.
//!
//! Parsed JSON is converted into typed results here. A reply with the right
//! syntax but the wrong shape (a string where a number belongs, an unknown
//! severity) is reported as [`EvaluationError::SchemaMismatch`], and a score
//! outside its bound as [`EvaluationError::ScoreOutOfRange`].

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::EvaluationError;
use crate::model::DEFAULT_MAX_SCORE;
use crate::result::{Correction, EvaluationResult, QuestionResult, Recommendation};

/// The result shapes a backend can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSchema {
    WrittenProduction,
    Comprehension,
    Recommendations,
}

impl ResultSchema {
    pub fn name(self) -> &'static str {
        match self {
            ResultSchema::WrittenProduction => "written production",
            ResultSchema::Comprehension => "comprehension",
            ResultSchema::Recommendations => "recommendations",
        }
    }
}

#[derive(Debug, Deserialize)]
struct WrittenReply {
    score: f64,
    #[serde(default)]
    max_score: Option<f64>,
    feedback: String,
    #[serde(default)]
    feedback_uk: String,
    #[serde(default)]
    corrections: Vec<Correction>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    strengths_uk: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    weaknesses_uk: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    recommendations_uk: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ComprehensionReply {
    score: f64,
    #[serde(default)]
    max_score: Option<f64>,
    feedback: String,
    #[serde(default)]
    feedback_uk: String,
    #[serde(default)]
    detailed_results: Vec<QuestionResult>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    strengths_uk: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    weaknesses_uk: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    recommendations_uk: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecommendationReply {
    Wrapped { recommendations: Vec<Recommendation> },
    Bare(Vec<Recommendation>),
}

fn decode<T: DeserializeOwned>(schema: ResultSchema, value: Value) -> Result<T, EvaluationError> {
    serde_json::from_value(value).map_err(|e| EvaluationError::SchemaMismatch {
        schema: schema.name(),
        reason: e.to_string(),
    })
}

/// Resolve the bound for a reply and check the score against it.
///
/// The exercise's own maximum wins over whatever the backend reports; the
/// backend's value is only used when the exercise defines none.
fn bounded_score(
    score: f64,
    reported_max: Option<f64>,
    defined_max: Option<f64>,
) -> Result<(f64, f64), EvaluationError> {
    let max_score = defined_max
        .or(reported_max.filter(|m| m.is_finite() && *m > 0.0))
        .unwrap_or(DEFAULT_MAX_SCORE);
    if !score.is_finite() || score < 0.0 || score > max_score {
        return Err(EvaluationError::ScoreOutOfRange { score, max_score });
    }
    Ok((score, max_score))
}

/// Validate a written production reply.
pub fn validate_written(
    value: Value,
    defined_max: Option<f64>,
) -> Result<EvaluationResult, EvaluationError> {
    let reply: WrittenReply = decode(ResultSchema::WrittenProduction, value)?;
    let (score, max_score) = bounded_score(reply.score, reply.max_score, defined_max)?;
    Ok(EvaluationResult {
        score,
        max_score,
        feedback: reply.feedback,
        feedback_localized: reply.feedback_uk,
        corrections: reply.corrections,
        strengths: reply.strengths,
        strengths_localized: reply.strengths_uk,
        weaknesses: reply.weaknesses,
        weaknesses_localized: reply.weaknesses_uk,
        recommendations: reply.recommendations,
        recommendations_localized: reply.recommendations_uk,
        detailed_results: None,
    })
}

/// Validate a comprehension reply.
pub fn validate_comprehension(
    value: Value,
    defined_max: Option<f64>,
) -> Result<EvaluationResult, EvaluationError> {
    let reply: ComprehensionReply = decode(ResultSchema::Comprehension, value)?;
    let (score, max_score) = bounded_score(reply.score, reply.max_score, defined_max)?;
    Ok(EvaluationResult {
        score,
        max_score,
        feedback: reply.feedback,
        feedback_localized: reply.feedback_uk,
        corrections: Vec::new(),
        strengths: reply.strengths,
        strengths_localized: reply.strengths_uk,
        weaknesses: reply.weaknesses,
        weaknesses_localized: reply.weaknesses_uk,
        recommendations: reply.recommendations,
        recommendations_localized: reply.recommendations_uk,
        detailed_results: Some(reply.detailed_results),
    })
}

/// Validate a recommendation reply, either `{"recommendations": [...]}` or a bare array.
pub fn validate_recommendations(value: Value) -> Result<Vec<Recommendation>, EvaluationError> {
    let reply: RecommendationReply = decode(ResultSchema::Recommendations, value)?;
    Ok(match reply {
        RecommendationReply::Wrapped { recommendations } => recommendations,
        RecommendationReply::Bare(recommendations) => recommendations,
    })
}
