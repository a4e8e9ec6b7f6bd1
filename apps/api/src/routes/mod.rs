pub mod health;

use axum::{
    extract::FromRequest,
    routing::{get, patch, post},
    Router,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::{admin, auth, candidates, hr, jobs, screening, uploads};

/// `axum::Json` whose rejections render as [`AppError`] (400 with our error body).
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Parses a path id, mapping malformed input to a 400 with `message`.
pub fn parse_uuid(raw: &str, message: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::Validation(message.to_string()))
}

pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/admin/signup", post(auth::handlers::admin_signup))
        .route("/admin/signin", post(auth::handlers::admin_signin))
        .route(
            "/admin/forgot-password",
            post(auth::handlers::admin_forgot_password),
        )
        .route(
            "/admin/reset-password/:token",
            post(auth::handlers::admin_reset_password),
        )
        .route("/admin/profile", get(auth::handlers::admin_profile))
        .route("/admin/logout", post(auth::handlers::admin_logout))
        .route("/hr/signin", post(auth::handlers::hr_signin))
        .route("/hr/profile", get(auth::handlers::hr_profile))
        .route(
            "/hr/change-password",
            post(auth::handlers::hr_change_password),
        )
        .route(
            "/hr/logout",
            get(auth::handlers::hr_logout).post(auth::handlers::hr_logout),
        );

    let admin_routes = Router::new()
        .route(
            "/company",
            get(admin::handlers::get_company).post(admin::handlers::add_company),
        )
        .route(
            "/hr",
            get(admin::handlers::list_hrs).post(admin::handlers::add_hr),
        )
        .route("/job-postings", get(admin::handlers::job_postings));

    let job_routes = Router::new()
        .route(
            "/",
            get(jobs::handlers::list_jobs).post(jobs::handlers::create_job),
        )
        .route("/:id", get(jobs::handlers::get_job))
        .route("/:id/status", patch(jobs::handlers::update_job_status));

    let hr_routes = Router::new()
        .route("/all-jobs", get(hr::handlers::all_jobs))
        .route("/confirm/:id", post(hr::handlers::confirm_decision))
        .route("/override/reject/:id", post(hr::handlers::override_to_reject))
        .route(
            "/override/shortlist/:id",
            post(hr::handlers::override_to_shortlist),
        )
        .route("/stats", get(hr::handlers::stats))
        .route(
            "/jobs/status-distribution",
            get(hr::handlers::job_status_distribution),
        )
        .route(
            "/candidates/status-distribution",
            get(hr::handlers::candidate_status_distribution),
        )
        .route(
            "/send-email/acceptance/:id",
            post(hr::handlers::send_ai_acceptance),
        )
        .route(
            "/send-email/reject/:id",
            post(hr::handlers::send_ai_rejection),
        );

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/admin", admin_routes)
        .nest("/api/v1/job", job_routes)
        .nest("/api/v1/hr", hr_routes)
        .route(
            "/api/v1/candidate/apply/:jobId",
            post(candidates::handlers::apply),
        )
        .route("/api/v1/uploads/sign", post(uploads::handlers::sign_upload))
        .route(
            "/api/v1/screening/results/:id",
            post(screening::handlers::record_result),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::session::SessionStore;
    use crate::auth::token::TokenKeys;
    use crate::config::Config;
    use crate::mail::LogMailer;

    /// State whose backing services are never contacted by the requests below.
    fn offline_state() -> AppState {
        let config = Config::for_tests();
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        let redis = redis::Client::open(config.redis_url.clone()).unwrap();
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.s3_region.clone()))
            .credentials_provider(Credentials::new(
                &config.aws_access_key_id,
                &config.aws_secret_access_key,
                None,
                None,
                "tests",
            ))
            .build();
        AppState {
            db,
            sessions: SessionStore::new(redis),
            tokens: TokenKeys::new(&config.jwt_secret, config.jwt_ttl_hours),
            s3: aws_sdk_s3::Client::from_conf(s3_config),
            mailer: Arc::new(LogMailer),
            screening: None,
            config,
        }
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let app = build_router(offline_state());
        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_profile_requires_token() {
        let app = build_router(offline_state());
        let response = app
            .oneshot(
                Request::get("/api/v1/auth/admin/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "No token, authorization denied");
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected_before_storage() {
        let app = build_router(offline_state());
        let response = app
            .oneshot(
                Request::get("/api/v1/hr/stats")
                    .header("cookie", "token=not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_token_cannot_reach_hr_routes() {
        let state = offline_state();
        let (token, _) = state
            .tokens
            .issue_session(1, crate::auth::token::Role::Admin)
            .unwrap();
        let response = build_router(state)
            .oneshot(
                Request::get("/api/v1/hr/all-jobs")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signup_password_mismatch() {
        let app = build_router(offline_state());
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/auth/admin/signup",
                json!({
                    "username": "meera",
                    "email": "meera@acme.io",
                    "password": "longenough",
                    "cPassword": "different1"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Passwords do not match");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = build_router(offline_state());
        let request = Request::post("/api/v1/auth/hr/signin")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_apply_rejects_bad_job_id() {
        let app = build_router(offline_state());
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/candidate/apply/not-a-uuid",
                json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Invalid job ID format");
    }

    #[tokio::test]
    async fn test_get_job_rejects_bad_id() {
        let app = build_router(offline_state());
        let response = app
            .oneshot(Request::get("/api/v1/job/123").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_type_not_allowed() {
        let app = build_router(offline_state());
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/uploads/sign",
                json!({ "fileType": "application/x-sh" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "File type not allowed");
    }

    #[tokio::test]
    async fn test_upload_is_signed() {
        let app = build_router(offline_state());
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/uploads/sign",
                json!({ "fileType": "application/pdf", "folder": "resumes" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let key = body["key"].as_str().unwrap();
        assert!(key.starts_with("resumes/"));
        let url = reqwest::Url::parse(body["url"].as_str().unwrap()).unwrap();
        let query: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert!(query.contains_key("X-Amz-Signature"));
        // The client only learns the content type, so nothing else may be signed.
        assert_eq!(
            query.get("X-Amz-SignedHeaders").map(String::as_str),
            Some("content-type;host")
        );
        assert_eq!(
            body["publicUrl"],
            format!("https://hiring-uploads.s3.ap-south-1.amazonaws.com/{key}")
        );
    }

    #[tokio::test]
    async fn test_screening_callback_needs_key() {
        let app = build_router(offline_state());
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/screening/results/2b1f3c4e-0000-4000-8000-000000000000",
                json!({ "status": "shortlisted" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_parse_uuid() {
        assert!(parse_uuid(" 2b1f3c4e-0000-4000-8000-000000000000 ", "bad").is_ok());
        match parse_uuid("42", "Invalid job ID format") {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid job ID format"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
