//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::get,
};
use campus_shared::observability::middleware as obs_middleware;

use crate::{handlers, state::AppState};

/// 学籍查询路由
fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(handlers::student::list_students))
        .route(
            "/students/search",
            get(handlers::student::get_student_by_number),
        )
        .route(
            "/students/class",
            get(handlers::student::list_students_by_class),
        )
}

/// 成绩记录与基础数据路由
///
/// 增删改查共用 `/grades`，按方法区分。
fn grade_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/grades",
            get(handlers::grade::list_grade_records)
                .post(handlers::grade::create_grade_record)
                .put(handlers::grade::update_grade_record)
                .delete(handlers::grade::delete_grade_record),
        )
        .route("/subjects", get(handlers::reference::list_subjects))
        .route("/exam-types", get(handlers::reference::list_exam_types))
}

/// 构建完整的 API 路由
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(student_routes()).merge(grade_routes())
}

/// 构建应用路由：业务 API、探针与可观测性中间件
///
/// CORS 等部署相关的层由调用方追加。
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use campus_shared::database::{Database, Stores};
    use http_body_util::BodyExt;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    /// 连接池延迟连接，只要请求在校验阶段被拒绝就不会触达数据库
    fn lazy_state() -> AppState {
        let student = PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost:1/student_info_db")
            .unwrap();
        let grade = PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost:1/grade_db")
            .unwrap();

        AppState::new(Stores {
            student: Database::from_pool(Stores::STUDENT, student),
            grade: Database::from_pool(Stores::GRADE, grade),
        })
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app(lazy_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_api_routes_build() {
        let _api = api_routes();
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_student_search_requires_number() {
        let (status, body) = send(get_request("/api/students/search")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("student_number"));
    }

    #[tokio::test]
    async fn test_class_id_must_be_integer() {
        let (status, body) = send(get_request("/api/students/class?class_id=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, _) = send(get_request("/api/students/class")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_subject_filter_rejected() {
        let (status, body) = send(get_request("/api/grades?subject_id=math")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("subject_id"));
    }

    #[tokio::test]
    async fn test_create_with_missing_fields_rejected() {
        let (status, body) = send(json_request(
            "POST",
            "/api/grades",
            serde_json::json!({ "student_number": "S001" }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_with_empty_semester_rejected_before_store() {
        let (status, _) = send(json_request(
            "POST",
            "/api/grades",
            serde_json::json!({
                "student_number": "S001",
                "subject_id": 1,
                "exam_type_id": 1,
                "score": 88.5,
                "semester": ""
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_delete_require_record_id() {
        let (status, body) = send(json_request(
            "PUT",
            "/api/grades",
            serde_json::json!({ "score": 90.0 }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("record_id"));

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/grades?record_id=x")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_request_id_propagated() {
        let request = Request::builder()
            .uri("/health")
            .header("x-request-id", "req-123")
            .body(Body::empty())
            .unwrap();
        let response = app(lazy_state()).oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-123");
    }
}
