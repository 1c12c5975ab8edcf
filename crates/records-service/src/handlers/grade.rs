//! 成绩记录 API 处理器
//!
//! 更新、删除通过查询参数 `record_id` 定位记录。

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde_json::{Value, json};
use validator::Validate;

use crate::{
    dto::{CreateGradeRecordRequest, GradeRecordQuery, RecordIdParams, UpdateGradeRecordRequest},
    error::Result,
    models::{GradeRecord, GradeRecordWithDetails},
    state::AppState,
};

type QueryResult<T> = std::result::Result<Query<T>, QueryRejection>;
type JsonResult<T> = std::result::Result<Json<T>, JsonRejection>;

fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

/// 按条件查询成绩记录
///
/// GET /api/grades?student_number=&subject_id=&semester=
pub async fn list_grade_records(
    State(state): State<AppState>,
    query: QueryResult<GradeRecordQuery>,
) -> Result<Json<Vec<GradeRecordWithDetails>>> {
    let Query(query) = query?;
    let filter = query.into_filter()?;

    let records = state.service.list_grade_records(&filter).await?;
    Ok(Json(records))
}

/// 创建成绩记录
///
/// POST /api/grades
pub async fn create_grade_record(
    State(state): State<AppState>,
    body: JsonResult<CreateGradeRecordRequest>,
) -> Result<(StatusCode, Json<GradeRecord>)> {
    let Json(req) = body?;
    req.validate()?;

    let record = state.service.create_grade_record(req.into()).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// 更新成绩记录
///
/// PUT /api/grades?record_id=
pub async fn update_grade_record(
    State(state): State<AppState>,
    params: QueryResult<RecordIdParams>,
    body: JsonResult<UpdateGradeRecordRequest>,
) -> Result<Json<Value>> {
    let Query(params) = params?;
    let record_id = params.record_id()?;
    let Json(req) = body?;
    req.validate()?;

    state.service.update_grade_record(record_id, req.into()).await?;
    Ok(success())
}

/// 删除成绩记录
///
/// DELETE /api/grades?record_id=
pub async fn delete_grade_record(
    State(state): State<AppState>,
    params: QueryResult<RecordIdParams>,
) -> Result<Json<Value>> {
    let Query(params) = params?;
    let record_id = params.record_id()?;

    state.service.delete_grade_record(record_id).await?;
    Ok(success())
}
