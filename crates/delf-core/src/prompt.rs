//! Prompt templates shared by every backend.

use serde_json::Value;

use crate::model::EvaluationRequest;

/// Appended to every prompt that expects JSON back. Backends do not always
/// honour it; the sanitizer and parser still run on every reply.
pub const JSON_ONLY_INSTRUCTION: &str =
    "IMPORTANT: Return ONLY valid JSON, no markdown formatting, no backticks, no text before or after the JSON.";

/// Human-readable name for a language code used in prompts.
pub fn language_name(code: &str) -> &str {
    match code {
        "fr" => "French",
        "uk" => "Ukrainian",
        "en" => "English",
        other => other,
    }
}

pub fn translation_prompt(text: &str, source: &str, target: &str, context: Option<&str>) -> String {
    let source = language_name(source);
    let target = language_name(target);
    let context = context
        .map(|c| format!(" Context: {c}"))
        .unwrap_or_default();
    format!(
        "Translate the following {source} text to {target}.{context}\n\n\
         Text to translate:\n{text}\n\n\
         Provide only the {target} translation without any explanations."
    )
}

pub fn written_production_prompt(request: &EvaluationRequest) -> String {
    let max_score = request.max_score();
    let criteria = request.effective_criteria();
    let criteria_line = if criteria.is_empty() {
        String::new()
    } else {
        format!(
            "Evaluation criteria: {}\n",
            serde_json::to_string(criteria).unwrap_or_default()
        )
    };

    format!(
        "You are a French language examiner for the DELF B2 exam. Evaluate the following written production.\n\n\
         Exercise type: {exercise_type}\n\
         {criteria_line}\
         Maximum score: {max_score}\n\n\
         Student's answer:\n{answer}\n\n\
         Provide a detailed evaluation in JSON format with:\n\
         1. score (a number from 0 to {max_score})\n\
         2. feedback in French\n\
         3. feedback_uk in Ukrainian\n\
         4. corrections array with: {{type, original, correction, explanation, explanation_uk, severity}} \
         where type is one of grammar, vocabulary, structure, content, spelling and severity is one of minor, moderate, major\n\
         5. strengths array (in French)\n\
         6. strengths_uk array (in Ukrainian)\n\
         7. weaknesses array (in French)\n\
         8. weaknesses_uk array (in Ukrainian)\n\
         9. recommendations array (in French)\n\
         10. recommendations_uk array (in Ukrainian)\n\
         11. max_score ({max_score})\n\n\
         Focus on: grammar, vocabulary richness, text structure, coherence, and task completion.\n\
         Provide constructive and encouraging feedback.\n\n\
         {JSON_ONLY_INSTRUCTION}",
        exercise_type = request.exercise_type,
        answer = request.answer_text(),
    )
}

pub fn comprehension_prompt(request: &EvaluationRequest) -> String {
    let max_score = request.max_score();
    let content = request
        .exercise_content
        .as_ref()
        .and_then(|c| serde_json::to_string(c).ok())
        .unwrap_or_else(|| "null".to_string());
    let answer_key = request.answer_key().unwrap_or(Value::Null);

    format!(
        "You are a French language examiner for the DELF B2 exam. Evaluate the following comprehension exercise answers.\n\n\
         Exercise content: {content}\n\
         Student's answers: {answers}\n\
         Correct answers: {answer_key}\n\
         Maximum score: {max_score}\n\n\
         Provide a detailed evaluation in JSON format with:\n\
         1. score (total points earned, from 0 to {max_score})\n\
         2. max_score ({max_score})\n\
         3. feedback in French\n\
         4. feedback_uk in Ukrainian\n\
         5. detailed_results array with one object per question: \
         {{question_id, correct, user_answer, correct_answer, points_earned, points_possible, explanation, explanation_uk}}\n\
         6. strengths array (in French)\n\
         7. strengths_uk array (in Ukrainian)\n\
         8. weaknesses array (in French)\n\
         9. weaknesses_uk array (in Ukrainian)\n\
         10. recommendations array (in French)\n\
         11. recommendations_uk array (in Ukrainian)\n\n\
         Be precise and constructive in your feedback.\n\n\
         {JSON_ONLY_INSTRUCTION}",
        answers = request.user_answer,
    )
}

pub fn recommendations_prompt(user_stats: &Value, progress_data: &Value) -> String {
    format!(
        "Based on the following user statistics and progress data for a DELF B2 student, generate personalized recommendations.\n\n\
         User Statistics:\n{user_stats}\n\n\
         Progress Data:\n{progress_data}\n\n\
         Provide recommendations in JSON format with:\n\
         1. recommendations array containing objects with:\n\
         \x20  - skill (comprehension_ecrite, production_ecrite, comprehension_orale, production_orale)\n\
         \x20  - priority (high, medium, low)\n\
         \x20  - message (in French)\n\
         \x20  - message_uk (in Ukrainian)\n\
         \x20  - specific_exercise_type (optional)\n\n\
         Focus on areas that need improvement while being encouraging.\n\n\
         {JSON_ONLY_INSTRUCTION}"
    )
}
