use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::generator::{generate_for_skills, SkillQuestions, DEFAULT_QUESTION_COUNT};
use crate::skills::{compute_skill_plan, SkillPlan};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    pub candidate_skills: Vec<String>,
    pub job_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionSets {
    pub gaps: SkillQuestions,
    pub overlap: SkillQuestions,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub plan: SkillPlan,
    pub questions: QuestionSets,
}

/// POST /generate
/// Compares candidate and job skills, then generates interview questions
/// for both the gap and overlap skill sets.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<SkillRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    info!("Generating interview questions");
    let plan = compute_skill_plan(&req.candidate_skills, &req.job_skills);

    let gaps = generate_for_skills(
        &state.llm,
        &state.retriever,
        &plan.gaps,
        DEFAULT_QUESTION_COUNT,
    )
    .await?;
    let overlap = generate_for_skills(
        &state.llm,
        &state.retriever,
        &plan.overlap,
        DEFAULT_QUESTION_COUNT,
    )
    .await?;

    Ok(Json(GenerateResponse {
        plan,
        questions: QuestionSets { gaps, overlap },
    }))
}
