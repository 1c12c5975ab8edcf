//! 学籍查询 API 处理器

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{
    dto::{ClassQueryParams, StudentSearchParams},
    error::Result,
    models::StudentWithClass,
    state::AppState,
};

/// 列出全部学生
///
/// GET /api/students
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<StudentWithClass>>> {
    let students = state.service.list_students().await?;
    Ok(Json(students))
}

/// 按学号查询学生
///
/// GET /api/students/search?student_number=
pub async fn get_student_by_number(
    State(state): State<AppState>,
    params: std::result::Result<Query<StudentSearchParams>, QueryRejection>,
) -> Result<Json<StudentWithClass>> {
    let Query(params) = params?;
    let student_number = params.student_number()?;

    let student = state.service.get_student_by_number(&student_number).await?;
    Ok(Json(student))
}

/// 按班级列出学生
///
/// GET /api/students/class?class_id=
pub async fn list_students_by_class(
    State(state): State<AppState>,
    params: std::result::Result<Query<ClassQueryParams>, QueryRejection>,
) -> Result<Json<Vec<StudentWithClass>>> {
    let Query(params) = params?;
    let class_id = params.class_id()?;

    let students = state.service.list_students_by_class(class_id).await?;
    Ok(Json(students))
}
