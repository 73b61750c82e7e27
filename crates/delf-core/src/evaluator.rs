//! Evaluation orchestrator.
//!
//! The caller-facing entry point. Each request moves through
//! `Dispatching → (placeholder | Calling → Sanitizing → Parsing → Validating)`
//! and ends either with an [`EvaluationResult`] or an [`EvaluationFailed`]
//! naming the stage that failed. Nothing is retried and nothing is persisted.

use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use crate::adapter::{ProviderAdapter, TranslationRequest};
use crate::cancel::CancelSignal;
use crate::error::{EvaluationError, EvaluationFailed, Stage};
use crate::model::{EvaluationRequest, ExerciseType, DEFAULT_MAX_SCORE};
use crate::parser::parse_structured;
use crate::result::{EvaluationResult, Recommendation};
use crate::sanitize::sanitize_response;
use crate::validate::{self, ResultSchema};

/// Score given to exercise types without automated grading.
pub const PLACEHOLDER_SCORE: f64 = 20.0;

/// Runs the evaluation pipeline against one configured backend.
///
/// Holds no per-request state; share it behind an `Arc` across tasks.
pub struct Evaluator {
    adapter: ProviderAdapter,
}

impl Evaluator {
    pub fn new(adapter: ProviderAdapter) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &ProviderAdapter {
        &self.adapter
    }

    /// Evaluate a submission.
    pub async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResult, EvaluationFailed> {
        self.evaluate_with_cancel(request, &CancelSignal::never())
            .await
    }

    /// Evaluate a submission, aborting the backend call if `cancel` fires.
    #[instrument(
        skip_all,
        fields(
            evaluation_id = %Uuid::new_v4(),
            exercise_type = %request.exercise_type,
            provider = %self.adapter.provider_name(),
        )
    )]
    pub async fn evaluate_with_cancel(
        &self,
        request: &EvaluationRequest,
        cancel: &CancelSignal,
    ) -> Result<EvaluationResult, EvaluationFailed> {
        if !request.exercise_type.is_automatable() {
            tracing::info!("no automated grading for this exercise type, returning placeholder");
            return Ok(placeholder_result(request.exercise_type));
        }
        let schema = if request.exercise_type.is_production() {
            ResultSchema::WrittenProduction
        } else {
            ResultSchema::Comprehension
        };

        request.check_contract().map_err(|reason| {
            tracing::warn!("rejected request: {reason}");
            EvaluationFailed::new(Stage::Dispatching, EvaluationError::InvalidRequest(reason))
        })?;

        tracing::debug!(max_score = request.max_score(), "calling backend");
        let raw = match schema {
            ResultSchema::WrittenProduction => self.adapter.evaluate_writing(request, cancel).await,
            _ => self.adapter.evaluate_comprehension(request, cancel).await,
        }
        .map_err(|e| fail(Stage::Calling, e))?;

        let value = normalize(&raw)?;

        tracing::debug!("validating against {} schema", schema.name());
        let defined_max = request.defined_max_score();
        let result = match schema {
            ResultSchema::WrittenProduction => validate::validate_written(value, defined_max),
            _ => validate::validate_comprehension(value, defined_max),
        }
        .map_err(|e| fail(Stage::Validating, e))?;

        tracing::info!(
            score = result.score,
            max_score = result.max_score,
            "evaluation succeeded"
        );
        Ok(result)
    }

    /// Translate text through the backend. The reply is not validated.
    pub async fn translate(&self, request: &TranslationRequest) -> Result<String, EvaluationFailed> {
        self.translate_with_cancel(request, &CancelSignal::never())
            .await
    }

    /// Translate text, aborting the backend call if `cancel` fires.
    #[instrument(skip_all, fields(provider = %self.adapter.provider_name()))]
    pub async fn translate_with_cancel(
        &self,
        request: &TranslationRequest,
        cancel: &CancelSignal,
    ) -> Result<String, EvaluationFailed> {
        self.adapter
            .translate(request, cancel)
            .await
            .map_err(|e| fail(Stage::Calling, e))
    }

    /// Ask the backend for personalized study recommendations.
    pub async fn recommend(
        &self,
        user_stats: &Value,
        progress_data: &Value,
    ) -> Result<Vec<Recommendation>, EvaluationFailed> {
        self.recommend_with_cancel(user_stats, progress_data, &CancelSignal::never())
            .await
    }

    /// Generate recommendations, aborting the backend call if `cancel` fires.
    #[instrument(skip_all, fields(provider = %self.adapter.provider_name()))]
    pub async fn recommend_with_cancel(
        &self,
        user_stats: &Value,
        progress_data: &Value,
        cancel: &CancelSignal,
    ) -> Result<Vec<Recommendation>, EvaluationFailed> {
        let raw = self
            .adapter
            .generate_recommendations(user_stats, progress_data, cancel)
            .await
            .map_err(|e| fail(Stage::Calling, e))?;
        let value = normalize(&raw)?;
        validate::validate_recommendations(value).map_err(|e| fail(Stage::Validating, e))
    }
}

fn fail(stage: Stage, source: impl Into<EvaluationError>) -> EvaluationFailed {
    let failure = EvaluationFailed::new(stage, source);
    tracing::warn!("{failure}");
    failure
}

/// Sanitize then parse a raw reply.
fn normalize(raw: &str) -> Result<Value, EvaluationFailed> {
    tracing::debug!("sanitizing {} chars", raw.len());
    let sanitized = sanitize_response(raw);
    if sanitized.trim().is_empty() {
        return Err(fail(
            Stage::Sanitizing,
            EvaluationError::NoStructuredResultFound {
                preview: raw.chars().take(200).collect(),
            },
        ));
    }
    tracing::debug!("parsing");
    parse_structured(&sanitized).map_err(|e| fail(Stage::Parsing, e))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The fixed result for exercise types the backends cannot grade.
pub fn placeholder_result(exercise_type: ExerciseType) -> EvaluationResult {
    let mut result = EvaluationResult {
        score: PLACEHOLDER_SCORE,
        max_score: DEFAULT_MAX_SCORE,
        feedback: "Votre présentation orale a été enregistrée.".into(),
        feedback_localized: "Вашу усну презентацію зафіксовано.".into(),
        corrections: Vec::new(),
        strengths: strings(&["Bon usage du temps de préparation"]),
        strengths_localized: strings(&["Хороше використання часу підготовки"]),
        weaknesses: strings(&["Nécessite une pratique avec un partenaire"]),
        weaknesses_localized: strings(&["Потребує практики з партнером"]),
        recommendations: strings(&["Pratiquez à voix haute"]),
        recommendations_localized: strings(&["Практикуйте вголос"]),
        detailed_results: None,
    };

    if exercise_type == ExerciseType::ComprehensionOrale {
        result.feedback = "Vos réponses de compréhension orale ont été enregistrées.".into();
        result.feedback_localized = "Ваші відповіді з аудіювання зафіксовано.".into();
        result.strengths = strings(&["Écoute attentive du document"]);
        result.strengths_localized = strings(&["Уважне прослуховування документа"]);
        result.weaknesses = strings(&["Nécessite une correction détaillée par un examinateur"]);
        result.weaknesses_localized = strings(&["Потребує детальної перевірки екзаменатором"]);
        result.recommendations = strings(&["Réécoutez le document en prenant des notes"]);
        result.recommendations_localized =
            strings(&["Прослухайте документ ще раз, роблячи нотатки"]);
        result.detailed_results = Some(Vec::new());
    }

    result
}
