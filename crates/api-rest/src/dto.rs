//! Wire types for the prescreening REST API.
//!
//! Every endpoint answers with one of two envelopes: [`ApiSuccess`] carrying
//! the endpoint payload under `data`, or [`ApiError`] carrying a
//! machine-readable error code. The payload structs mirror the storage-layer
//! types so the domain crates stay free of OpenAPI concerns.

use std::collections::BTreeMap;

use chrono::Utc;
use prescreen_core::PatientContext;
use prescreen_reports::{IndexEntry, ReportPage, StorageStats, StoredReport};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Uniform success envelope returned by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiSuccess {
    /// Always `true` on this envelope
    pub success: bool,
    /// Human-readable outcome description
    pub message: String,
    /// RFC 3339 timestamp of the response
    pub timestamp: String,
    /// Endpoint-specific payload
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}

impl ApiSuccess {
    /// Wraps an endpoint payload in the success envelope, stamped with the
    /// current time.
    pub fn new(message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
            data,
        }
    }
}

/// Uniform error envelope returned by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// RFC 3339 timestamp of the response
    pub timestamp: String,
    /// HTTP status code, duplicated into the body
    pub status_code: u16,
}

impl ApiError {
    /// Builds the error envelope, stamped with the current time.
    pub fn new(status_code: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
            status_code,
        }
    }
}

/// Request body for `POST /api/v1/reports`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateReportReq {
    /// Free-text symptom description (required, must not be empty)
    pub symptoms: String,
    /// Patient identifier used for indexing and later lookup
    #[serde(default)]
    pub patient_id: Option<String>,
    /// Patient display name
    #[serde(default)]
    pub patient_name: Option<String>,
    /// Patient age in years (0..=150)
    #[serde(default)]
    pub patient_age: Option<u16>,
    /// Patient sex or gender as free text
    #[serde(default)]
    pub patient_gender: Option<String>,
}

impl CreateReportReq {
    /// Builds the patient context for the engine and the archive, or `None`
    /// when no patient field was supplied.
    pub fn patient_context(&self) -> Option<PatientContext> {
        let context = PatientContext {
            patient_id: self.patient_id.clone(),
            name: self.patient_name.clone(),
            age: self.patient_age,
            sex: self.patient_gender.clone(),
            medical_history: None,
            medications: None,
        };
        (!context.is_empty()).then_some(context)
    }
}

/// Query parameters for `GET /api/v1/reports`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListParams {
    /// Page size, 1..=1000 (default 50)
    pub limit: Option<usize>,
    /// Number of newest entries to skip (default 0)
    pub offset: Option<usize>,
}

/// Query parameters for `GET /api/v1/search`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Partial, case-insensitive match on the patient name
    pub patient_name: Option<String>,
    /// Exact match on the patient identifier
    pub patient_id: Option<String>,
    /// Case-insensitive keyword match against report summaries
    pub keyword: Option<String>,
    /// ICD-10 code membership test
    pub icd10_code: Option<String>,
    /// Inclusive lower bound on the creation date (`YYYY-MM-DD`)
    pub start_date: Option<String>,
    /// Inclusive upper bound on the creation date (`YYYY-MM-DD`)
    pub end_date: Option<String>,
    /// Maximum number of results (default 50)
    pub limit: Option<usize>,
}

/// Compact report descriptor returned by the listing and search endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportSummary {
    pub id: String,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    pub filename: String,
    pub patient_name: String,
    pub patient_id: String,
    pub has_icd10: bool,
    pub icd10_codes: Vec<String>,
    pub summary: String,
}

impl From<IndexEntry> for ReportSummary {
    fn from(entry: IndexEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            created_at: entry.created_at.to_rfc3339(),
            filename: entry.filename,
            patient_name: entry.patient_name,
            patient_id: entry.patient_id,
            has_icd10: entry.has_icd10,
            icd10_codes: entry.icd10_codes,
            summary: entry.summary,
        }
    }
}

/// Payload of `GET /api/v1/health`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthData {
    /// Overall service status: `ok` or `degraded`
    pub status: String,
    /// Storage reachability: `ok` or `unavailable`
    pub storage: String,
    pub api_version: String,
    pub total_reports: usize,
    pub storage_size_mb: f64,
}

/// Payload of `GET /api/v1/statistics`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatisticsData {
    pub total_reports: usize,
    pub total_size_bytes: u64,
    pub total_size_mb: f64,
    pub storage_directory: String,
    /// Number of stored reports per calendar year
    pub reports_by_year: BTreeMap<String, usize>,
    /// RFC 3339 timestamp the index was first created
    pub index_created: String,
    /// RFC 3339 timestamp of the last index write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl From<StorageStats> for StatisticsData {
    fn from(stats: StorageStats) -> Self {
        Self {
            total_reports: stats.total_reports,
            total_size_bytes: stats.total_size_bytes,
            total_size_mb: stats.total_size_mb,
            storage_directory: stats.storage_directory,
            reports_by_year: stats.reports_by_year,
            index_created: stats.index_created.to_rfc3339(),
            last_updated: stats.last_updated.map(|at| at.to_rfc3339()),
        }
    }
}

/// Payload of `GET /api/v1/reports`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportListData {
    pub reports: Vec<ReportSummary>,
    pub limit: usize,
    pub offset: usize,
    /// Number of entries in this page
    pub returned: usize,
    /// Total number of stored reports
    pub total: usize,
    pub has_more: bool,
}

impl From<ReportPage> for ReportListData {
    fn from(page: ReportPage) -> Self {
        let reports: Vec<ReportSummary> =
            page.reports.into_iter().map(ReportSummary::from).collect();
        Self {
            returned: reports.len(),
            reports,
            limit: page.limit,
            offset: page.offset,
            total: page.total,
            has_more: page.has_more,
        }
    }
}

/// Payload of `POST /api/v1/reports`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedReportData {
    /// Index entry of the newly stored report
    pub report: ReportSummary,
    /// Urgency classification of the submitted symptoms
    pub urgency_level: String,
}

/// Payload of `GET /api/v1/reports/{id}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoredReportData {
    /// Full stored report document
    #[schema(value_type = Object)]
    pub report: StoredReport,
}

/// Payload of `GET /api/v1/search` and `GET /api/v1/reports/patient/{patient_id}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResultsData {
    pub reports: Vec<ReportSummary>,
    /// Number of matching entries returned
    pub returned: usize,
}
