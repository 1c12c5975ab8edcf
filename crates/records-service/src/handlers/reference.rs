//! 基础数据 API 处理器

use axum::{Json, extract::State};

use crate::{
    error::Result,
    models::{ExamType, Subject},
    state::AppState,
};

/// GET /api/subjects
pub async fn list_subjects(State(state): State<AppState>) -> Result<Json<Vec<Subject>>> {
    Ok(Json(state.service.list_subjects().await?))
}

/// GET /api/exam-types
pub async fn list_exam_types(State(state): State<AppState>) -> Result<Json<Vec<ExamType>>> {
    Ok(Json(state.service.list_exam_types().await?))
}
