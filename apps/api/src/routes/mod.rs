pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::state::AppState;
use crate::workflow::handlers as workflow;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth API
        .route("/api/v1/auth/signup", post(auth::handle_signup))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        .route(
            "/api/v1/auth/me",
            get(auth::handle_me).patch(auth::handle_update_me),
        )
        // Workflow API
        .route("/api/v1/workflow", post(workflow::handle_create_workflow))
        .route("/api/v1/workflow/:id", get(workflow::handle_get_workflow))
        .route(
            "/api/v1/workflow/:id/resume",
            post(workflow::handle_upload_resume),
        )
        .route("/api/v1/workflow/:id/job", post(workflow::handle_update_job))
        .route(
            "/api/v1/workflow/:id/job/upload",
            post(workflow::handle_upload_job_description),
        )
        .route("/api/v1/workflow/:id/optimize", post(workflow::handle_optimize))
        .route("/api/v1/workflow/:id/reset", post(workflow::handle_reset))
        .route(
            "/api/v1/workflow/:id/parameters",
            patch(workflow::handle_update_parameters),
        )
        .route(
            "/api/v1/workflow/:id/template",
            put(workflow::handle_select_template),
        )
        .route("/api/v1/workflow/:id/preview", get(workflow::handle_preview))
        .route("/api/v1/workflow/:id/export", get(workflow::handle_export))
        // Template catalog
        .route("/api/v1/templates", get(workflow::handle_list_templates))
        .with_state(state)
}
