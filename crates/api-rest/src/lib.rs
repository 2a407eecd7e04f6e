//! # API REST
//!
//! REST interface to the prescreening engine and report archive.
//!
//! Handles:
//! - HTTP endpoints with axum under the versioned `/api/v1` base path
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON envelopes, CORS)
//!
//! Every route answers with the uniform envelopes defined in [`dto`];
//! domain work is delegated to `prescreen-core` and `prescreen-reports`.

#![warn(rust_2018_idioms)]

pub mod dto;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use chrono::NaiveDate;
use serde_json::json;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use prescreen_core::{InputError, PrescreeningEngine};
use prescreen_reports::{ConversationEntry, ReportAssembler, ReportStore, SearchFilter, StoreError};
use prescreen_types::ReportId;

/// Version string reported by the health endpoint.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default REST bind address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default storage root for stored reports.
pub const DEFAULT_STORAGE_DIR: &str = "medical_reports";

/// Default page size for report listings.
const DEFAULT_PAGE_LIMIT: usize = 50;

/// Largest accepted page size for report listings.
const MAX_PAGE_LIMIT: usize = 1000;

/// Largest accepted patient age.
const MAX_PATIENT_AGE: u16 = 150;

/// Server configuration resolved once at startup
///
/// # Environment Variables
/// - `PRESCREEN_REST_ADDR`: server address (default: "0.0.0.0:3000")
/// - `PRESCREEN_DATA_DIR`: report storage root (default: "medical_reports")
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub rest_addr: String,
    pub storage_dir: PathBuf,
}

impl ApiConfig {
    /// Reads the configuration from the environment, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let rest_addr =
            std::env::var("PRESCREEN_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
        let storage_dir =
            std::env::var("PRESCREEN_DATA_DIR").unwrap_or_else(|_| DEFAULT_STORAGE_DIR.into());

        Self {
            rest_addr,
            storage_dir: PathBuf::from(storage_dir),
        }
    }
}

/// Application state for the REST API server
///
/// Contains shared state that needs to be accessible to all request handlers,
/// including the report store. The store performs no locking of its own, so
/// it sits behind a mutex to serialise index writes.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<ApiConfig>,
    pub store: Arc<Mutex<ReportStore>>,
}

impl AppState {
    /// Builds the server state, opening (creating if necessary) the report
    /// store at the configured storage root.
    ///
    /// # Errors
    /// Returns `StoreError` if the storage root is unusable.
    pub fn new(cfg: ApiConfig) -> Result<Self, StoreError> {
        let store = ReportStore::open(&cfg.storage_dir)?;
        Ok(Self {
            cfg: Arc::new(cfg),
            store: Arc::new(Mutex::new(store)),
        })
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        statistics,
        list_reports,
        create_report,
        get_report,
        delete_report,
        search_reports,
        patient_reports,
    ),
    components(schemas(
        dto::ApiSuccess,
        dto::ApiError,
        dto::CreateReportReq,
        dto::HealthData,
        dto::StatisticsData,
        dto::ReportSummary,
        dto::ReportListData,
        dto::CreatedReportData,
        dto::StoredReportData,
        dto::SearchResultsData,
    ))
)]
pub struct ApiDoc;

/// Builds the application router with Swagger UI and permissive CORS.
///
/// All prescreening routes live under `/api/v1`; the OpenAPI document is
/// served at `/api-docs/openapi.json` with the UI under `/swagger-ui`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/statistics", get(statistics))
        .route("/api/v1/reports", get(list_reports))
        .route("/api/v1/reports", post(create_report))
        .route("/api/v1/reports/patient/:patient_id", get(patient_reports))
        .route("/api/v1/reports/:id", get(get_report))
        .route("/api/v1/reports/:id", delete(delete_report))
        .route("/api/v1/search", get(search_reports))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Error half of every handler's return type.
type HandlerError = (StatusCode, Json<dto::ApiError>);

#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service health summary", body = dto::ApiSuccess)
    )
)]
/// Health check endpoint for the REST API
///
/// Reports service liveness together with storage reachability, the number
/// of stored reports and the archive size. Used for monitoring and load
/// balancer health checks; storage trouble degrades the payload rather than
/// failing the request.
///
/// # Returns
/// * `Json<dto::ApiSuccess>` - Health summary with api version and storage state
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<dto::ApiSuccess> {
    let stats = match state.store.lock() {
        Ok(store) => match store.stats() {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::error!("Health stats error: {:?}", e);
                None
            }
        },
        Err(e) => {
            tracing::error!("Report store lock poisoned: {:?}", e);
            None
        }
    };

    let data = match stats {
        Some(stats) => dto::HealthData {
            status: "ok".into(),
            storage: "ok".into(),
            api_version: API_VERSION.into(),
            total_reports: stats.total_reports,
            storage_size_mb: stats.total_size_mb,
        },
        None => dto::HealthData {
            status: "degraded".into(),
            storage: "unavailable".into(),
            api_version: API_VERSION.into(),
            total_reports: 0,
            storage_size_mb: 0.0,
        },
    };

    Json(dto::ApiSuccess::new(
        "Prescreening REST API is alive",
        json!(data),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/statistics",
    responses(
        (status = 200, description = "Storage statistics", body = dto::ApiSuccess),
        (status = 500, description = "Internal server error", body = dto::ApiError)
    )
)]
/// Storage statistics for the report archive
///
/// # Returns
/// * `Ok(Json<dto::ApiSuccess>)` - Totals, size on disk and per-year breakdown
/// * `Err((StatusCode, Json<dto::ApiError>))` - Internal server error if the index cannot be read
#[axum::debug_handler]
async fn statistics(State(state): State<AppState>) -> Result<Json<dto::ApiSuccess>, HandlerError> {
    let store = lock_store(&state)?;
    match store.stats() {
        Ok(stats) => Ok(Json(dto::ApiSuccess::new(
            "Storage statistics retrieved",
            json!(dto::StatisticsData::from(stats)),
        ))),
        Err(e) => Err(storage_failure("Storage statistics", e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reports",
    params(dto::ListParams),
    responses(
        (status = 200, description = "One page of stored reports, newest first", body = dto::ApiSuccess),
        (status = 400, description = "Invalid pagination parameters", body = dto::ApiError),
        (status = 500, description = "Internal server error", body = dto::ApiError)
    )
)]
/// List stored reports, newest first
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - `limit` is outside 1..=1000.
#[axum::debug_handler]
async fn list_reports(
    State(state): State<AppState>,
    Query(params): Query<dto::ListParams>,
) -> Result<Json<dto::ApiSuccess>, HandlerError> {
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "invalid_request",
            format!("limit must be between 1 and {MAX_PAGE_LIMIT}"),
        ));
    }
    let offset = params.offset.unwrap_or(0);

    let store = lock_store(&state)?;
    match store.list(limit, offset) {
        Ok(page) => Ok(Json(dto::ApiSuccess::new(
            "Reports retrieved",
            json!(dto::ReportListData::from(page)),
        ))),
        Err(e) => Err(storage_failure("List reports", e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reports",
    request_body = dto::CreateReportReq,
    responses(
        (status = 201, description = "Report created", body = dto::ApiSuccess),
        (status = 400, description = "Invalid request body", body = dto::ApiError),
        (status = 500, description = "Internal server error", body = dto::ApiError)
    )
)]
/// Run the prescreening engine over submitted symptoms and persist the report
///
/// Classifies urgency and medical domains for the symptom text, assembles
/// the full report document and writes it to the archive.
///
/// # Returns
/// * `Ok((StatusCode, Json<dto::ApiSuccess>))` - 201 with the stored report summary
/// * `Err((StatusCode, Json<dto::ApiError>))` - Validation or storage failure
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - `symptoms` is empty or whitespace-only, or
/// - `patient_age` is outside 0..=150.
#[axum::debug_handler]
async fn create_report(
    State(state): State<AppState>,
    Json(req): Json<dto::CreateReportReq>,
) -> Result<(StatusCode, Json<dto::ApiSuccess>), HandlerError> {
    if req.symptoms.trim().is_empty() {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "invalid_request",
            "symptoms must not be empty",
        ));
    }
    if let Some(age) = req.patient_age {
        if age > MAX_PATIENT_AGE {
            return Err(reject(
                StatusCode::BAD_REQUEST,
                "invalid_request",
                format!("patient_age must be between 0 and {MAX_PATIENT_AGE}"),
            ));
        }
    }

    let patient = req.patient_context();

    let engine = PrescreeningEngine::new();
    let assessment = match engine.analyze_query(&req.symptoms, patient.as_ref(), None) {
        Ok(assessment) => assessment,
        Err(InputError::EmptyText) => {
            return Err(reject(
                StatusCode::BAD_REQUEST,
                "invalid_request",
                "symptoms must not be empty",
            ));
        }
    };

    let history = [ConversationEntry {
        query: req.symptoms.clone(),
        urgency_level: Some(assessment.urgency_level),
        recommendations: assessment.recommendations.clone(),
    }];

    let assembler = ReportAssembler::new();
    let report = assembler.assemble(patient.as_ref(), &history, &req.symptoms);
    let payload = assembler.payload(&report, &history, &req.symptoms);

    let store = lock_store(&state)?;
    match store.save(payload, patient.as_ref()) {
        Ok(entry) => Ok((
            StatusCode::CREATED,
            Json(dto::ApiSuccess::new(
                "Report created",
                json!(dto::CreatedReportData {
                    report: dto::ReportSummary::from(entry),
                    urgency_level: assessment.urgency_level.to_string(),
                }),
            )),
        )),
        Err(e) => Err(storage_failure("Save report", e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}",
    responses(
        (status = 200, description = "Full stored report", body = dto::ApiSuccess),
        (status = 400, description = "Malformed report id", body = dto::ApiError),
        (status = 404, description = "Report not found", body = dto::ApiError),
        (status = 500, description = "Internal server error", body = dto::ApiError)
    )
)]
/// Fetch one stored report by identifier
#[axum::debug_handler]
async fn get_report(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<dto::ApiSuccess>, HandlerError> {
    let id = match ReportId::parse(&id) {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Invalid report id: {:?}", e);
            return Err(reject(
                StatusCode::BAD_REQUEST,
                "invalid_request",
                "Invalid report id",
            ));
        }
    };

    let store = lock_store(&state)?;
    match store.load(&id) {
        Ok(Some(report)) => Ok(Json(dto::ApiSuccess::new(
            "Report retrieved",
            json!(dto::StoredReportData { report }),
        ))),
        Ok(None) => Err(reject(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("No report with id {id}"),
        )),
        Err(e) => Err(storage_failure("Load report", e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/reports/{id}",
    responses(
        (status = 200, description = "Report deleted", body = dto::ApiSuccess),
        (status = 400, description = "Malformed report id", body = dto::ApiError),
        (status = 404, description = "Report not found", body = dto::ApiError),
        (status = 500, description = "Internal server error", body = dto::ApiError)
    )
)]
/// Delete one stored report and its index entry
#[axum::debug_handler]
async fn delete_report(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<dto::ApiSuccess>, HandlerError> {
    let id = match ReportId::parse(&id) {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Invalid report id: {:?}", e);
            return Err(reject(
                StatusCode::BAD_REQUEST,
                "invalid_request",
                "Invalid report id",
            ));
        }
    };

    let store = lock_store(&state)?;
    match store.delete(&id) {
        Ok(true) => Ok(Json(dto::ApiSuccess::new(
            "Report deleted",
            json!({ "id": id }),
        ))),
        Ok(false) => Err(reject(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("No report with id {id}"),
        )),
        Err(e) => Err(storage_failure("Delete report", e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/search",
    params(dto::SearchParams),
    responses(
        (status = 200, description = "Reports matching the criteria, newest first", body = dto::ApiSuccess),
        (status = 400, description = "Invalid date parameter", body = dto::ApiError),
        (status = 500, description = "Internal server error", body = dto::ApiError)
    )
)]
/// Search the report index
///
/// All criteria are optional and combine conjunctively. Dates take the form
/// `YYYY-MM-DD` and bound the report creation date inclusively.
#[axum::debug_handler]
async fn search_reports(
    State(state): State<AppState>,
    Query(params): Query<dto::SearchParams>,
) -> Result<Json<dto::ApiSuccess>, HandlerError> {
    let date_from = parse_search_date(params.start_date.as_deref(), "start_date")?;
    let date_to = parse_search_date(params.end_date.as_deref(), "end_date")?;

    let filter = SearchFilter {
        patient_name: params.patient_name,
        patient_id: params.patient_id,
        icd10_code: params.icd10_code,
        date_from,
        date_to,
        keyword: params.keyword,
        limit: params.limit,
    };

    let store = lock_store(&state)?;
    match store.search(&filter) {
        Ok(entries) => {
            let reports: Vec<dto::ReportSummary> =
                entries.into_iter().map(dto::ReportSummary::from).collect();
            Ok(Json(dto::ApiSuccess::new(
                "Search completed",
                json!(dto::SearchResultsData {
                    returned: reports.len(),
                    reports,
                }),
            )))
        }
        Err(e) => Err(storage_failure("Search reports", e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/patient/{patient_id}",
    responses(
        (status = 200, description = "All reports for the patient, newest first", body = dto::ApiSuccess),
        (status = 500, description = "Internal server error", body = dto::ApiError)
    )
)]
/// List every stored report for one patient identifier
#[axum::debug_handler]
async fn patient_reports(
    State(state): State<AppState>,
    AxumPath(patient_id): AxumPath<String>,
) -> Result<Json<dto::ApiSuccess>, HandlerError> {
    // usize::MAX lifts the default search cap; a patient's history is
    // returned whole.
    let filter = SearchFilter {
        patient_id: Some(patient_id),
        limit: Some(usize::MAX),
        ..Default::default()
    };

    let store = lock_store(&state)?;
    match store.search(&filter) {
        Ok(entries) => {
            let reports: Vec<dto::ReportSummary> =
                entries.into_iter().map(dto::ReportSummary::from).collect();
            Ok(Json(dto::ApiSuccess::new(
                "Patient reports retrieved",
                json!(dto::SearchResultsData {
                    returned: reports.len(),
                    reports,
                }),
            )))
        }
        Err(e) => Err(storage_failure("Patient reports", e)),
    }
}

// Helper functions

fn reject(status: StatusCode, error: &str, message: impl Into<String>) -> HandlerError {
    (status, Json(dto::ApiError::new(status.as_u16(), error, message)))
}

fn lock_store(state: &AppState) -> Result<MutexGuard<'_, ReportStore>, HandlerError> {
    state.store.lock().map_err(|e| {
        tracing::error!("Report store lock poisoned: {:?}", e);
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Internal error",
        )
    })
}

fn storage_failure(context: &str, e: StoreError) -> HandlerError {
    tracing::error!("{} error: {:?}", context, e);
    reject(
        StatusCode::INTERNAL_SERVER_ERROR,
        "storage_error",
        "Internal error",
    )
}

fn parse_search_date(value: Option<&str>, name: &str) -> Result<Option<NaiveDate>, HandlerError> {
    match value {
        None => Ok(None),
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Ok(Some(date)),
            Err(e) => {
                tracing::error!("Invalid {} value: {:?}", name, e);
                Err(reject(
                    StatusCode::BAD_REQUEST,
                    "invalid_request",
                    format!("{name} must be a YYYY-MM-DD date"),
                ))
            }
        },
    }
}
