use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::engine::{EngineError, SuggestionEngine};
use crate::models::{
    ErrorResponse, GenerateSuggestionsRequest, GenerateSuggestionsResponse, HealthResponse,
    IntroStatus, ListIntroductionsQuery, ListIntroductionsResponse, PeriodKey, PeriodStatsQuery,
    TransitionResponse, UpdateMessageRequest,
};
use crate::services::IntroLedger;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SuggestionEngine>,
    pub ledger: Arc<IntroLedger>,
    pub admin_token: String,
}

/// Configure all suggestion-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/suggestions/generate", web::post().to(generate_suggestions))
        .route("/introductions", web::get().to(list_introductions))
        .route("/introductions/stats", web::get().to(period_stats))
        .route("/introductions/{id}/approve", web::post().to(approve_introduction))
        .route("/introductions/{id}/decline", web::post().to(decline_introduction))
        .route("/introductions/{id}/reset", web::post().to(reset_introduction))
        .route("/introductions/{id}/message", web::put().to(update_message));
}

/// Check the admin bearer token before anything else runs.
///
/// Authorization failures must be rejected before any directory or ledger
/// read happens.
fn authorize(req: &HttpRequest, state: &AppState) -> Result<(), EngineError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    match header.and_then(|v| v.strip_prefix("Bearer ")) {
        Some(token) if !state.admin_token.is_empty() && token == state.admin_token => Ok(()),
        _ => Err(EngineError::Unauthorized),
    }
}

fn engine_error_response(err: &EngineError) -> HttpResponse {
    let (status, error) = match err {
        EngineError::Unauthorized => (actix_web::http::StatusCode::UNAUTHORIZED, "unauthorized"),
        EngineError::NotFound(_) => (actix_web::http::StatusCode::NOT_FOUND, "not_found"),
        EngineError::InvalidTransition { .. } => {
            (actix_web::http::StatusCode::CONFLICT, "invalid_transition")
        }
        EngineError::DirectoryUnavailable(_) => {
            (actix_web::http::StatusCode::BAD_GATEWAY, "directory_unavailable")
        }
        EngineError::LedgerWriteFailed(_) | EngineError::Ledger(_) => (
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            "ledger_error",
        ),
    };

    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_request".to_string(),
        message,
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let ledger_healthy = state.ledger.health_check().await.unwrap_or(false);

    let status = if ledger_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Generate the suggestion batch for a period
///
/// POST /api/v1/suggestions/generate
///
/// Request body:
/// ```json
/// {
///   "period": "2026-08",
///   "matchedBy": "admin-user-id"
/// }
/// ```
async fn generate_suggestions(
    state: web::Data<AppState>,
    req: web::Json<GenerateSuggestionsRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(e) = authorize(&http_req, &state) {
        return engine_error_response(&e);
    }

    let period = match &req.period {
        Some(raw) => match PeriodKey::parse(raw) {
            Some(period) => period,
            None => return bad_request(format!("Invalid period key: {}", raw)),
        },
        None => PeriodKey::current(),
    };

    tracing::info!("Suggestion generation requested for period {}", period);

    match state
        .engine
        .generate_suggestions(period, req.matched_by.as_deref())
        .await
    {
        Ok(summary) => HttpResponse::Ok().json(GenerateSuggestionsResponse {
            created_count: summary.created_count,
            period: summary.period.to_string(),
        }),
        Err(e) => {
            tracing::error!("Suggestion generation failed: {}", e);
            engine_error_response(&e)
        }
    }
}

/// List introductions for admin review
///
/// GET /api/v1/introductions?period=2026-08&status=suggested
async fn list_introductions(
    state: web::Data<AppState>,
    query: web::Query<ListIntroductionsQuery>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(e) = authorize(&http_req, &state) {
        return engine_error_response(&e);
    }

    let period = match &query.period {
        Some(raw) => match PeriodKey::parse(raw) {
            Some(period) => Some(period),
            None => return bad_request(format!("Invalid period key: {}", raw)),
        },
        None => None,
    };

    let status = match &query.status {
        Some(raw) => match IntroStatus::parse(raw) {
            Some(status) => Some(status),
            None => return bad_request(format!("Invalid status: {}", raw)),
        },
        None => None,
    };

    match state.engine.list(period.as_ref(), status).await {
        Ok(introductions) => {
            let count = introductions.len();
            HttpResponse::Ok().json(ListIntroductionsResponse {
                introductions,
                count,
            })
        }
        Err(e) => {
            tracing::error!("Failed to list introductions: {}", e);
            engine_error_response(&e)
        }
    }
}

/// Status counts for one period
///
/// GET /api/v1/introductions/stats?period=2026-08
async fn period_stats(
    state: web::Data<AppState>,
    query: web::Query<PeriodStatsQuery>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(e) = authorize(&http_req, &state) {
        return engine_error_response(&e);
    }

    let period = match &query.period {
        Some(raw) => match PeriodKey::parse(raw) {
            Some(period) => period,
            None => return bad_request(format!("Invalid period key: {}", raw)),
        },
        None => PeriodKey::current(),
    };

    match state.engine.period_stats(&period).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            tracing::error!("Failed to compute stats for {}: {}", period, e);
            engine_error_response(&e)
        }
    }
}

async fn approve_introduction(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(e) = authorize(&http_req, &state) {
        return engine_error_response(&e);
    }

    let id = path.into_inner();
    match state.engine.approve(id).await {
        Ok(()) => HttpResponse::Ok().json(TransitionResponse {
            success: true,
            status: IntroStatus::Approved.to_string(),
        }),
        Err(e) => {
            tracing::warn!("Approve failed for {}: {}", id, e);
            engine_error_response(&e)
        }
    }
}

async fn decline_introduction(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(e) = authorize(&http_req, &state) {
        return engine_error_response(&e);
    }

    let id = path.into_inner();
    match state.engine.decline(id).await {
        Ok(()) => HttpResponse::Ok().json(TransitionResponse {
            success: true,
            status: IntroStatus::Declined.to_string(),
        }),
        Err(e) => {
            tracing::warn!("Decline failed for {}: {}", id, e);
            engine_error_response(&e)
        }
    }
}

async fn reset_introduction(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(e) = authorize(&http_req, &state) {
        return engine_error_response(&e);
    }

    let id = path.into_inner();
    match state.engine.reset(id).await {
        Ok(()) => HttpResponse::Ok().json(TransitionResponse {
            success: true,
            status: IntroStatus::Suggested.to_string(),
        }),
        Err(e) => {
            tracing::warn!("Reset failed for {}: {}", id, e);
            engine_error_response(&e)
        }
    }
}

/// Overwrite the editable introduction message
///
/// PUT /api/v1/introductions/{id}/message
async fn update_message(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateMessageRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(e) = authorize(&http_req, &state) {
        return engine_error_response(&e);
    }

    if let Err(errors) = req.validate() {
        return bad_request(errors.to_string());
    }

    let id = path.into_inner();
    match state.engine.update_message(id, &req.message).await {
        Ok(()) => HttpResponse::Ok().json(TransitionResponse {
            success: true,
            status: "updated".to_string(),
        }),
        Err(e) => {
            tracing::warn!("Message update failed for {}: {}", id, e);
            engine_error_response(&e)
        }
    }
}
