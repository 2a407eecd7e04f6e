//! JSON file-backed report storage with a searchable index.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use prescreen_core::{Icd10Report, PatientContext};
use prescreen_types::ReportId;
use serde::{Deserialize, Serialize};

use crate::{truncated, StoreError, StoreResult};

/// Filename of the index kept at the storage root.
const INDEX_FILE_NAME: &str = "reports_index.json";

/// Default cap on search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// The report content persisted alongside identification metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    /// Short free-text summary used for indexing and keyword search
    pub summary: String,

    /// Code suggestions generated for the accumulated symptom text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icd10_analysis: Option<Icd10Report>,

    /// Number of conversation interactions behind this report
    pub conversation_count: usize,

    /// Accumulated symptom text the analysis was run over
    pub symptoms_text: String,

    /// Deduplicated recommendations given during the conversation
    pub recommendations: Vec<String>,

    /// Rendered plain-text report
    pub generated_report: String,
}

/// Fixed provenance block written into every stored report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMetadata {
    pub version: String,
    pub created_by: String,
    pub file_type: String,
}

impl Default for StoredMetadata {
    fn default() -> Self {
        Self {
            version: "1.0".to_owned(),
            created_by: "Medical Prescreening Assistant".to_owned(),
            file_type: "medical_report".to_owned(),
        }
    }
}

/// One report as persisted on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReport {
    pub id: ReportId,
    pub created_at: DateTime<Utc>,

    /// Display timestamp in `YYYY-MM-DD HH:MM:SS` form
    pub timestamp: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_info: Option<PatientContext>,
    pub report_data: ReportPayload,
    pub metadata: StoredMetadata,
}

/// One row of the searchable index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: ReportId,
    pub created_at: DateTime<Utc>,
    pub filename: String,

    /// Path of the report file relative to the storage root
    pub relative_path: String,
    pub patient_name: String,
    pub patient_id: String,
    pub has_icd10: bool,
    pub icd10_codes: Vec<String>,
    pub summary: String,
}

/// The full index document at the storage root.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReportIndex {
    created_at: DateTime<Utc>,
    total_reports: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_updated: Option<DateTime<Utc>>,
    reports: Vec<IndexEntry>,
}

impl ReportIndex {
    fn empty() -> Self {
        Self {
            created_at: Utc::now(),
            total_reports: 0,
            last_updated: None,
            reports: Vec::new(),
        }
    }
}

/// One page of index entries, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPage {
    pub reports: Vec<IndexEntry>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Search criteria over the index. Unset fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Partial, case-insensitive match on the indexed patient name
    pub patient_name: Option<String>,

    /// Exact match on the indexed patient identifier
    pub patient_id: Option<String>,

    /// Membership test against the indexed ICD-10 codes
    pub icd10_code: Option<String>,

    /// Inclusive lower bound on the report's creation date
    pub date_from: Option<NaiveDate>,

    /// Inclusive upper bound on the report's creation date
    pub date_to: Option<NaiveDate>,

    /// Case-insensitive keyword match against the indexed summary
    pub keyword: Option<String>,

    /// Result cap, [`DEFAULT_SEARCH_LIMIT`] when unset
    pub limit: Option<usize>,
}

impl SearchFilter {
    fn matches(&self, entry: &IndexEntry) -> bool {
        if let Some(name) = self.patient_name.as_deref() {
            if !entry
                .patient_name
                .to_lowercase()
                .contains(&name.to_lowercase())
            {
                return false;
            }
        }
        if let Some(id) = self.patient_id.as_deref() {
            if entry.patient_id != id {
                return false;
            }
        }
        if let Some(code) = self.icd10_code.as_deref() {
            if !entry.icd10_codes.iter().any(|c| c == code) {
                return false;
            }
        }
        let entry_date = entry.created_at.date_naive();
        if let Some(from) = self.date_from {
            if entry_date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if entry_date > to {
                return false;
            }
        }
        if let Some(keyword) = self.keyword.as_deref() {
            if !entry
                .summary
                .to_lowercase()
                .contains(&keyword.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// Storage statistics across the whole store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageStats {
    pub total_reports: usize,
    pub total_size_bytes: u64,
    pub total_size_mb: f64,
    pub storage_directory: String,
    pub reports_by_year: BTreeMap<String, usize>,
    pub index_created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Directory-rooted store for assembled prescreening reports.
///
/// Reports are written as individual JSON files grouped by calendar year,
/// with a single `reports_index.json` at the root carrying the searchable
/// metadata. The store performs no locking of its own; concurrent writers
/// must be serialised by the caller.
#[derive(Debug)]
pub struct ReportStore {
    root: PathBuf,
    index_path: PathBuf,
}

impl ReportStore {
    /// Opens (creating if necessary) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - `root` exists but is not a directory
    /// - the directory or the initial index cannot be created (I/O)
    pub fn open(root: &Path) -> StoreResult<Self> {
        if root.exists() && !root.is_dir() {
            return Err(StoreError::InvalidRoot(format!(
                "Path is not a directory: {}",
                root.display()
            )));
        }

        fs::create_dir_all(root).map_err(|e| {
            StoreError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create storage root {}: {}", root.display(), e),
            ))
        })?;

        let root = root.canonicalize().map_err(|e| {
            StoreError::InvalidRoot(format!(
                "Cannot canonicalize path {}: {}",
                root.display(),
                e
            ))
        })?;

        let store = Self {
            index_path: root.join(INDEX_FILE_NAME),
            root,
        };

        if !store.index_path.exists() {
            store.save_index(&ReportIndex::empty())?;
            tracing::info!(index = %store.index_path.display(), "created new reports index");
        }

        Ok(store)
    }

    /// Persists one report and appends it to the index.
    ///
    /// Returns the index entry written for the report; its `id` is the
    /// handle for later loads and deletes.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on I/O failure or if the index cannot be
    /// rewritten.
    pub fn save(
        &self,
        payload: ReportPayload,
        patient: Option<&PatientContext>,
    ) -> StoreResult<IndexEntry> {
        let mut index = self.load_index()?;

        let mut id = ReportId::generate();
        while index.reports.iter().any(|entry| entry.id == id) {
            id = ReportId::generate();
        }

        let created_at = Utc::now();
        let filename = format!("report_{}_{}.json", created_at.format("%Y%m%d_%H%M%S"), id);
        let year = created_at.format("%Y").to_string();
        let relative_path = format!("{year}/{filename}");

        let year_dir = self.root.join(&year);
        fs::create_dir_all(&year_dir).map_err(|e| {
            StoreError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create year directory {}: {}",
                    year_dir.display(),
                    e
                ),
            ))
        })?;

        let entry = IndexEntry {
            id: id.clone(),
            created_at,
            filename,
            relative_path: relative_path.clone(),
            patient_name: patient
                .and_then(|p| p.name.clone())
                .unwrap_or_else(|| "Unknown".to_owned()),
            patient_id: patient
                .and_then(|p| p.patient_id.clone())
                .unwrap_or_else(|| "N/A".to_owned()),
            has_icd10: payload
                .icd10_analysis
                .as_ref()
                .is_some_and(|analysis| analysis.has_suggestions),
            icd10_codes: indexed_codes(&payload),
            summary: truncated(&payload.summary, 100),
        };

        let stored = StoredReport {
            id,
            created_at,
            timestamp: created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            patient_info: patient.cloned(),
            report_data: payload,
            metadata: StoredMetadata::default(),
        };

        let file_path = self.root.join(&relative_path);
        let body = serde_json::to_string_pretty(&stored)?;
        fs::write(&file_path, body).map_err(|e| {
            StoreError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write report to {}: {}", file_path.display(), e),
            ))
        })?;

        index.reports.push(entry.clone());
        index.total_reports += 1;
        index.last_updated = Some(created_at);
        self.save_index(&index)?;

        tracing::info!(id = %entry.id, path = %file_path.display(), "report saved");
        Ok(entry)
    }

    /// Loads one report by id. Returns `Ok(None)` when the id is not in the
    /// index or its file has gone missing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on I/O failure or malformed JSON.
    pub fn load(&self, id: &ReportId) -> StoreResult<Option<StoredReport>> {
        let index = self.load_index()?;

        let entry = match index.reports.iter().find(|entry| &entry.id == id) {
            Some(entry) => entry,
            None => {
                tracing::warn!(%id, "report not found in index");
                return Ok(None);
            }
        };

        let path = self.root.join(&entry.relative_path);
        if !path.exists() {
            tracing::warn!(%id, path = %path.display(), "indexed report file is missing");
            return Ok(None);
        }

        let body = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&body)?))
    }

    /// Lists index entries newest first, with pagination.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the index cannot be read.
    pub fn list(&self, limit: usize, offset: usize) -> StoreResult<ReportPage> {
        let mut index = self.load_index()?;
        index
            .reports
            .sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = index.reports.len();
        let reports: Vec<IndexEntry> = index.reports.into_iter().skip(offset).take(limit).collect();

        Ok(ReportPage {
            reports,
            total,
            limit,
            offset,
            has_more: offset + limit < total,
        })
    }

    /// Searches the index, newest first, capped at the filter's limit.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the index cannot be read.
    pub fn search(&self, filter: &SearchFilter) -> StoreResult<Vec<IndexEntry>> {
        let index = self.load_index()?;

        let mut hits: Vec<IndexEntry> = index
            .reports
            .into_iter()
            .filter(|entry| filter.matches(entry))
            .collect();

        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        hits.truncate(filter.limit.unwrap_or(DEFAULT_SEARCH_LIMIT));
        Ok(hits)
    }

    /// Deletes one report and its index entry. Returns `false` when the id
    /// is unknown.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on I/O failure or if the index cannot be
    /// rewritten.
    pub fn delete(&self, id: &ReportId) -> StoreResult<bool> {
        let mut index = self.load_index()?;

        let position = match index.reports.iter().position(|entry| &entry.id == id) {
            Some(position) => position,
            None => {
                tracing::warn!(%id, "report not found for deletion");
                return Ok(false);
            }
        };

        let entry = index.reports.remove(position);
        let path = self.root.join(&entry.relative_path);
        if path.exists() {
            fs::remove_file(&path)?;
        }

        index.total_reports = index.total_reports.saturating_sub(1);
        index.last_updated = Some(Utc::now());
        self.save_index(&index)?;

        tracing::info!(%id, "report deleted");
        Ok(true)
    }

    /// Computes storage statistics across the whole store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the index cannot be read.
    pub fn stats(&self) -> StoreResult<StorageStats> {
        let index = self.load_index()?;

        let mut total_size_bytes = 0;
        let mut reports_by_year: BTreeMap<String, usize> = BTreeMap::new();
        for entry in &index.reports {
            let path = self.root.join(&entry.relative_path);
            if let Ok(metadata) = fs::metadata(&path) {
                total_size_bytes += metadata.len();
            }
            let year = entry.created_at.format("%Y").to_string();
            *reports_by_year.entry(year).or_insert(0) += 1;
        }

        let total_size_mb =
            (total_size_bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0;

        Ok(StorageStats {
            total_reports: index.total_reports,
            total_size_bytes,
            total_size_mb,
            storage_directory: self.root.display().to_string(),
            reports_by_year,
            index_created: index.created_at,
            last_updated: index.last_updated,
        })
    }

    /// Returns the canonicalised storage root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_index(&self) -> StoreResult<ReportIndex> {
        let body = fs::read_to_string(&self.index_path).map_err(|e| {
            StoreError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to read index {}: {}",
                    self.index_path.display(),
                    e
                ),
            ))
        })?;
        Ok(serde_json::from_str(&body)?)
    }

    fn save_index(&self, index: &ReportIndex) -> StoreResult<()> {
        let body = serde_json::to_string_pretty(index)?;
        fs::write(&self.index_path, body).map_err(|e| {
            StoreError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to write index {}: {}",
                    self.index_path.display(),
                    e
                ),
            ))
        })?;
        Ok(())
    }
}

/// Distinct ICD-10 codes carried by a payload, first-seen order preserved.
fn indexed_codes(payload: &ReportPayload) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    if let Some(analysis) = payload.icd10_analysis.as_ref() {
        for suggestion in &analysis.suggestions {
            if !codes.iter().any(|code| code == &suggestion.code) {
                codes.push(suggestion.code.clone());
            }
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;
    use prescreen_core::generate_icd10_report;
    use tempfile::TempDir;

    fn sample_payload(summary: &str, symptoms: &str) -> ReportPayload {
        let icd10_analysis = if symptoms.is_empty() {
            None
        } else {
            Some(generate_icd10_report(symptoms, None).expect("analysis for sample payload"))
        };
        ReportPayload {
            summary: summary.to_owned(),
            icd10_analysis,
            conversation_count: 1,
            symptoms_text: symptoms.to_owned(),
            recommendations: vec!["Monitor symptoms".to_owned()],
            generated_report: "rendered report body".to_owned(),
        }
    }

    fn sample_patient(name: &str, id: &str) -> PatientContext {
        PatientContext {
            patient_id: Some(id.to_owned()),
            name: Some(name.to_owned()),
            age: Some(35),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_creates_root_and_index() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("reports");

        let store = ReportStore::open(&root).unwrap();

        assert!(root.is_dir());
        assert!(root.join(INDEX_FILE_NAME).is_file());
        let stats = store.stats().unwrap();
        assert_eq!(stats.total_reports, 0);
    }

    #[test]
    fn test_open_rejects_file_as_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("not_a_dir");
        fs::write(&root, "plain file").unwrap();

        let result = ReportStore::open(&root);
        assert!(matches!(result, Err(StoreError::InvalidRoot(_))));
    }

    #[test]
    fn test_open_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("reports");

        let store = ReportStore::open(&root).unwrap();
        store
            .save(sample_payload("first", "cough"), None)
            .unwrap();

        // Reopening must not reset the index
        let reopened = ReportStore::open(&root).unwrap();
        assert_eq!(reopened.stats().unwrap().total_reports, 1);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::open(temp.path()).unwrap();
        let patient = sample_patient("John Doe", "P001");

        let entry = store
            .save(sample_payload("persistent cough and fever", "cough and fever"), Some(&patient))
            .unwrap();

        assert_eq!(entry.id.as_ref().len(), ReportId::LEN);
        assert!(entry.filename.starts_with("report_"));
        assert!(entry.filename.ends_with(&format!("{}.json", entry.id)));
        assert!(store.root().join(&entry.relative_path).is_file());

        let loaded = store.load(&entry.id).unwrap().expect("report exists");
        assert_eq!(loaded.id, entry.id);
        assert_eq!(loaded.report_data.symptoms_text, "cough and fever");
        assert_eq!(
            loaded.patient_info.as_ref().and_then(|p| p.name.as_deref()),
            Some("John Doe")
        );
        assert_eq!(loaded.metadata.file_type, "medical_report");
    }

    #[test]
    fn test_save_files_are_grouped_by_year() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::open(temp.path()).unwrap();

        let entry = store.save(sample_payload("summary", ""), None).unwrap();

        let year = entry.created_at.format("%Y").to_string();
        assert!(entry.relative_path.starts_with(&format!("{year}/")));
        assert!(store.root().join(&year).is_dir());
    }

    #[test]
    fn test_index_entry_defaults_without_patient() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::open(temp.path()).unwrap();

        let entry = store.save(sample_payload("summary", ""), None).unwrap();

        assert_eq!(entry.patient_name, "Unknown");
        assert_eq!(entry.patient_id, "N/A");
        assert!(!entry.has_icd10);
        assert!(entry.icd10_codes.is_empty());
    }

    #[test]
    fn test_index_entry_carries_codes_and_truncated_summary() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::open(temp.path()).unwrap();

        let long_summary = "s".repeat(140);
        let entry = store
            .save(sample_payload(&long_summary, "cough and fever"), None)
            .unwrap();

        assert!(entry.has_icd10);
        assert!(entry.icd10_codes.iter().any(|code| code == "R05"));
        assert_eq!(entry.summary, format!("{}...", "s".repeat(100)));
    }

    #[test]
    fn test_load_unknown_id_returns_none() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::open(temp.path()).unwrap();

        let id = ReportId::generate();
        assert!(store.load(&id).unwrap().is_none());
    }

    #[test]
    fn test_list_is_newest_first_with_pagination() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::open(temp.path()).unwrap();

        let first = store.save(sample_payload("first", ""), None).unwrap();
        let second = store.save(sample_payload("second", ""), None).unwrap();
        let third = store.save(sample_payload("third", ""), None).unwrap();

        let page = store.list(2, 0).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.reports.len(), 2);
        assert_eq!(page.reports[0].id, third.id);
        assert_eq!(page.reports[1].id, second.id);
        assert!(page.has_more);

        let rest = store.list(2, 2).unwrap();
        assert_eq!(rest.reports.len(), 1);
        assert_eq!(rest.reports[0].id, first.id);
        assert!(!rest.has_more);
    }

    #[test]
    fn test_search_by_patient_name_is_partial_and_case_insensitive() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::open(temp.path()).unwrap();

        store
            .save(sample_payload("a", ""), Some(&sample_patient("Jane Smith", "P010")))
            .unwrap();
        store
            .save(sample_payload("b", ""), Some(&sample_patient("John Doe", "P011")))
            .unwrap();

        let hits = store
            .search(&SearchFilter {
                patient_name: Some("smith".to_owned()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].patient_name, "Jane Smith");
    }

    #[test]
    fn test_search_by_patient_id_is_exact() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::open(temp.path()).unwrap();

        store
            .save(sample_payload("a", ""), Some(&sample_patient("Jane Smith", "P010")))
            .unwrap();
        store
            .save(sample_payload("b", ""), Some(&sample_patient("John Doe", "P0101")))
            .unwrap();

        let hits = store
            .search(&SearchFilter {
                patient_id: Some("P010".to_owned()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].patient_id, "P010");
    }

    #[test]
    fn test_search_by_icd10_code_and_keyword() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::open(temp.path()).unwrap();

        store
            .save(sample_payload("respiratory complaint", "cough and fever"), None)
            .unwrap();
        store
            .save(sample_payload("skin complaint", ""), None)
            .unwrap();

        let by_code = store
            .search(&SearchFilter {
                icd10_code: Some("R05".to_owned()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_code.len(), 1);

        let by_keyword = store
            .search(&SearchFilter {
                keyword: Some("RESPIRATORY".to_owned()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_keyword.len(), 1);
        assert!(by_keyword[0].summary.contains("respiratory"));
    }

    #[test]
    fn test_search_date_window() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::open(temp.path()).unwrap();
        store.save(sample_payload("today", ""), None).unwrap();

        let today = Utc::now().date_naive();
        let tomorrow = today.succ_opt().unwrap();

        let inside = store
            .search(&SearchFilter {
                date_from: Some(today),
                date_to: Some(today),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(inside.len(), 1);

        let outside = store
            .search(&SearchFilter {
                date_from: Some(tomorrow),
                ..Default::default()
            })
            .unwrap();
        assert!(outside.is_empty());
    }

    #[test]
    fn test_search_respects_limit() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::open(temp.path()).unwrap();

        for n in 0..4 {
            store
                .save(sample_payload(&format!("report {n}"), ""), None)
                .unwrap();
        }

        let hits = store
            .search(&SearchFilter {
                keyword: Some("report".to_owned()),
                limit: Some(2),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_delete_removes_file_and_entry() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::open(temp.path()).unwrap();

        let entry = store.save(sample_payload("doomed", ""), None).unwrap();
        let path = store.root().join(&entry.relative_path);
        assert!(path.is_file());

        assert!(store.delete(&entry.id).unwrap());
        assert!(!path.exists());
        assert!(store.load(&entry.id).unwrap().is_none());
        assert_eq!(store.stats().unwrap().total_reports, 0);

        // Second delete of the same id reports not-found
        assert!(!store.delete(&entry.id).unwrap());
    }

    #[test]
    fn test_stats_totals_and_year_breakdown() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::open(temp.path()).unwrap();

        store.save(sample_payload("one", "cough"), None).unwrap();
        store.save(sample_payload("two", ""), None).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total_reports, 2);
        assert!(stats.total_size_bytes > 0);
        assert!(stats.total_size_mb >= 0.0);
        assert!(stats.last_updated.is_some());

        let this_year = Utc::now().format("%Y").to_string();
        assert_eq!(stats.reports_by_year.get(&this_year), Some(&2));
    }
}
