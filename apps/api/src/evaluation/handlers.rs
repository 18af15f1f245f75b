use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::evaluation::{evaluate_answer, EvaluationResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub questions: Vec<String>,
    pub candidate_answers: Vec<String>,
    pub reference_answers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub average_score: f64,
    pub results: Vec<EvaluationResult>,
}

/// POST /evaluate
/// Scores each candidate answer against its reference answer and returns
/// per-item scores plus the average.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    if req.questions.is_empty() {
        return Err(AppError::Validation("questions must not be empty".into()));
    }
    if req.candidate_answers.len() != req.questions.len()
        || req.reference_answers.len() != req.questions.len()
    {
        return Err(AppError::Validation(
            "questions, candidate_answers, and reference_answers must have equal lengths".into(),
        ));
    }

    let mut results = Vec::with_capacity(req.questions.len());
    for ((question, candidate), reference) in req
        .questions
        .iter()
        .zip(&req.candidate_answers)
        .zip(&req.reference_answers)
    {
        let score = evaluate_answer(state.embedder.as_ref(), question, candidate, reference)
            .map_err(AppError::Internal)?;
        results.push(EvaluationResult {
            question: question.clone(),
            candidate_answer: candidate.clone(),
            reference_answer: reference.clone(),
            score,
        });
    }

    let average = results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;
    let average_score = (average * 1000.0).round() / 1000.0;

    Ok(Json(EvaluateResponse {
        average_score,
        results,
    }))
}
