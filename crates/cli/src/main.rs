//! Command line interface for the medical prescreening assistant.
//!
//! Running `prescreen` without a subcommand starts an interactive chat
//! session: patient details are collected, each message is triaged and the
//! consultation ends with an ICD-10 summary and a saved report. The
//! subcommands expose the same operations one-shot for scripting.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use prescreen_core::{
    CarePathway, Icd10Report, PatientContext, PrescreeningEngine, TriageAssessment, UrgencyLevel,
};
use prescreen_model::Assistant;
use prescreen_reports::{
    ConversationEntry, IndexEntry, ReportAssembler, ReportPage, ReportStore, SearchFilter,
    StorageStats,
};
use prescreen_types::ReportId;

#[derive(Parser)]
#[command(name = "prescreen")]
#[command(about = "Medical prescreening assistant CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive prescreening chat session (the default)
    Chat,
    /// Triage a single symptom description and print the assessment
    Analyze {
        /// Symptom description to analyse
        query: String,
        /// Patient age in years
        #[arg(long)]
        age: Option<u16>,
        /// Patient sex
        #[arg(long)]
        sex: Option<String>,
        /// Known medical conditions
        #[arg(long)]
        history: Option<String>,
        /// Current medications
        #[arg(long)]
        medications: Option<String>,
    },
    /// Map a symptom description to ICD-10 code suggestions
    Icd10 {
        /// Symptom description to map
        text: String,
    },
    /// List stored reports, newest first
    Reports {
        /// Maximum number of reports to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Number of reports to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// Print a stored report
    Show {
        /// Report id
        id: String,
    },
    /// Search stored reports
    Search(SearchArgs),
    /// Delete a stored report
    Delete {
        /// Report id
        id: String,
    },
    /// Show storage statistics
    Stats,
}

#[derive(Args)]
struct SearchArgs {
    /// Partial patient name, case insensitive
    #[arg(long)]
    patient_name: Option<String>,
    /// Exact patient identifier
    #[arg(long)]
    patient_id: Option<String>,
    /// Keyword to look for in report summaries
    #[arg(long)]
    keyword: Option<String>,
    /// ICD-10 code prefix, e.g. R07
    #[arg(long)]
    icd10_code: Option<String>,
    /// Earliest creation date (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<String>,
    /// Latest creation date (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<String>,
    /// Maximum number of matches to return
    #[arg(long)]
    limit: Option<usize>,
}

/// Runtime configuration shared by every subcommand.
///
/// # Environment Variables
///
/// - `PRESCREEN_DATA_DIR`: report storage root (default: `medical_reports`)
/// - `PRESCREEN_MODEL_URL`: language model base URL (default: `http://localhost:11434`)
/// - `PRESCREEN_MODEL`: model name override (default: first available preferred model)
struct CliConfig {
    storage_dir: PathBuf,
    model_url: String,
    model_override: Option<String>,
}

impl CliConfig {
    fn from_env() -> Self {
        let storage_dir =
            std::env::var("PRESCREEN_DATA_DIR").unwrap_or_else(|_| "medical_reports".into());
        let model_url = std::env::var("PRESCREEN_MODEL_URL")
            .unwrap_or_else(|_| "http://localhost:11434".into());
        let model_override = std::env::var("PRESCREEN_MODEL").ok();

        Self {
            storage_dir: PathBuf::from(storage_dir),
            model_url,
            model_override,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = CliConfig::from_env();

    match cli.command {
        Some(Commands::Chat) | None => run_chat(&cfg)?,
        Some(Commands::Analyze {
            query,
            age,
            sex,
            history,
            medications,
        }) => {
            let patient = flag_patient_context(age, sex, history, medications);
            let engine = PrescreeningEngine::new();
            match engine.analyze_query(&query, patient.as_ref(), None) {
                Ok(assessment) => print_assessment(&assessment),
                Err(e) => eprintln!("Error analysing query: {}", e),
            }
        }
        Some(Commands::Icd10 { text }) => match prescreen_core::generate_icd10_report(&text, None)
        {
            Ok(report) => print_icd10_report(&report),
            Err(e) => eprintln!("Error generating ICD-10 report: {}", e),
        },
        Some(Commands::Reports { limit, offset }) => {
            if let Some(store) = open_store(&cfg) {
                match store.list(limit, offset) {
                    Ok(page) => print_report_page(&page),
                    Err(e) => eprintln!("Error listing reports: {}", e),
                }
            }
        }
        Some(Commands::Show { id }) => match ReportId::parse(&id) {
            Ok(id) => {
                if let Some(store) = open_store(&cfg) {
                    match store.load(&id) {
                        Ok(Some(report)) => {
                            println!("{}", report.report_data.generated_report);
                            println!("Report id: {} (created {})", report.id, report.timestamp);
                        }
                        Ok(None) => println!("No report with id {}", id),
                        Err(e) => eprintln!("Error loading report: {}", e),
                    }
                }
            }
            Err(e) => eprintln!("Error: {}", e),
        },
        Some(Commands::Search(args)) => run_search(&cfg, args),
        Some(Commands::Delete { id }) => match ReportId::parse(&id) {
            Ok(id) => {
                if let Some(store) = open_store(&cfg) {
                    match store.delete(&id) {
                        Ok(true) => println!("Deleted report {}", id),
                        Ok(false) => println!("No report with id {}", id),
                        Err(e) => eprintln!("Error deleting report: {}", e),
                    }
                }
            }
            Err(e) => eprintln!("Error: {}", e),
        },
        Some(Commands::Stats) => {
            if let Some(store) = open_store(&cfg) {
                match store.stats() {
                    Ok(stats) => print_stats(&stats),
                    Err(e) => eprintln!("Error reading storage statistics: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// Runs the interactive chat session.
///
/// Mirrors a consultation: collect patient context, triage each message as
/// it arrives, and close the session with an ICD-10 summary plus a saved
/// report covering everything discussed.
fn run_chat(cfg: &CliConfig) -> io::Result<()> {
    let rule = "=".repeat(60);
    println!("{rule}");
    println!("Medical Prescreening Assistant");
    println!("{rule}");
    println!();
    println!("I can help with a preliminary medical assessment.");
    println!("Important: this is NOT a substitute for professional medical advice.");
    println!("For medical emergencies, call emergency services immediately.");
    println!();

    let mut input = io::stdin().lock();

    let patient = collect_patient_context(&mut input)?;

    let assistant = Assistant::connect(&cfg.model_url, cfg.model_override.as_deref());
    if assistant.is_scripted() {
        println!("Local model unavailable; continuing with scripted responses.");
    } else {
        println!("Using model '{}'.", assistant.model());
    }
    println!();

    let engine = PrescreeningEngine::new();
    let assembler = ReportAssembler::new();
    let mut history: Vec<ConversationEntry> = Vec::new();
    let mut symptoms_text = String::new();

    println!("Ready to help. Describe your symptoms or ask a medical question.");
    println!("Type 'help' for commands, 'quit' to end the session.");
    println!();

    loop {
        let Some(line) = read_input(&mut input, "You")? else {
            break;
        };
        if line.is_empty() {
            continue;
        }

        match line.to_lowercase().as_str() {
            "quit" | "exit" | "bye" => break,
            "help" => {
                print_help();
                continue;
            }
            "summary" => {
                print_summary(&history);
                continue;
            }
            "emergency" => {
                print_emergency_info();
                continue;
            }
            "icd10" => {
                icd10_for_symptoms(&symptoms_text, patient.as_ref());
                continue;
            }
            "report" => {
                generate_and_save_report(
                    cfg,
                    &assembler,
                    patient.as_ref(),
                    &history,
                    &symptoms_text,
                );
                continue;
            }
            _ => {}
        }

        if !symptoms_text.is_empty() {
            symptoms_text.push(' ');
        }
        symptoms_text.push_str(&line);

        process_query(&engine, &assistant, patient.as_ref(), &line, &mut history);
    }

    print_goodbye();

    if !symptoms_text.trim().is_empty() {
        icd10_for_symptoms(&symptoms_text, patient.as_ref());
        generate_and_save_report(cfg, &assembler, patient.as_ref(), &history, &symptoms_text);
    }

    Ok(())
}

/// Asks for age, sex, conditions and medications, then lets the user
/// confirm the collected summary. Every question can be skipped.
fn collect_patient_context(input: &mut impl BufRead) -> io::Result<Option<PatientContext>> {
    println!("Patient information collection");
    println!("(These details sharpen the assessment; press Enter to skip any of them.)");
    println!();

    let mut context = PatientContext::default();

    let Some(age_raw) = read_input(input, "What is your age?")? else {
        return Ok(None);
    };
    if let Ok(age) = age_raw.parse::<u16>() {
        context.age = Some(age);
    }

    let Some(sex) = read_input(input, "Sex (male/female/other)")? else {
        return Ok(none_if_empty(context));
    };
    if !sex.is_empty() {
        context.sex = Some(sex.to_lowercase());
    }

    if confirm(input, "Do you have any known medical conditions?")? {
        if let Some(conditions) = read_input(input, "Please briefly describe them")? {
            if !conditions.is_empty() {
                context.medical_history = Some(conditions);
            }
        }
    }

    if confirm(input, "Are you currently taking any medications?")? {
        if let Some(medications) = read_input(input, "Please list them")? {
            if !medications.is_empty() {
                context.medications = Some(medications);
            }
        }
    }

    if let Some(line) = context.summary_line() {
        println!();
        println!("Patient information summary: {line}");
        if !confirm(input, "Is this information correct?")? {
            println!("Patient information cleared. Continuing without context.");
            context = PatientContext::default();
        }
    }

    println!();
    Ok(none_if_empty(context))
}

/// Triages one message: model response first when available, then the
/// rule-based assessment, then the entry is appended to the history.
fn process_query(
    engine: &PrescreeningEngine,
    assistant: &Assistant,
    patient: Option<&PatientContext>,
    query: &str,
    history: &mut Vec<ConversationEntry>,
) {
    println!();
    println!("Analysing your symptoms...");
    println!();

    let model_response = match assistant.ask(query, patient) {
        Ok(text) => Some(text),
        Err(e) => {
            eprintln!("Model error: {}", e);
            None
        }
    };

    if let Some(text) = model_response.as_deref() {
        println!("Assessment:");
        println!("{}", text.trim());
        println!();
    }

    let assessment = match engine.analyze_query(query, patient, model_response.as_deref()) {
        Ok(assessment) => assessment,
        Err(e) => {
            eprintln!("Error analysing query: {}", e);
            return;
        }
    };

    println!("Urgency level: {}", urgency_label(assessment.urgency_level));

    if !assessment.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for (i, recommendation) in assessment.recommendations.iter().enumerate() {
            println!("  {}. {}", i + 1, recommendation);
        }
    }

    if !assessment.follow_up_questions.is_empty() {
        println!();
        println!("Follow-up questions:");
        for question in &assessment.follow_up_questions {
            println!("  - {}", question);
        }
    }

    if assessment.urgency_level == UrgencyLevel::Immediate {
        print_emergency_banner();
    }

    history.push(ConversationEntry {
        query: query.to_owned(),
        urgency_level: Some(assessment.urgency_level),
        recommendations: assessment.recommendations,
    });

    println!();
    println!("{}", "-".repeat(60));
    println!();
}

fn run_search(cfg: &CliConfig, args: SearchArgs) {
    let date_from = match parse_date_arg(args.start_date.as_deref(), "--start-date") {
        Ok(date) => date,
        Err(message) => {
            eprintln!("{}", message);
            return;
        }
    };
    let date_to = match parse_date_arg(args.end_date.as_deref(), "--end-date") {
        Ok(date) => date,
        Err(message) => {
            eprintln!("{}", message);
            return;
        }
    };

    let Some(store) = open_store(cfg) else {
        return;
    };

    let filter = SearchFilter {
        patient_name: args.patient_name,
        patient_id: args.patient_id,
        icd10_code: args.icd10_code,
        date_from,
        date_to,
        keyword: args.keyword,
        limit: args.limit,
    };

    match store.search(&filter) {
        Ok(entries) => {
            if entries.is_empty() {
                println!("No matching reports found.");
            } else {
                for entry in &entries {
                    print_index_entry(entry);
                }
                println!("{} matching reports", entries.len());
            }
        }
        Err(e) => eprintln!("Error searching reports: {}", e),
    }
}

/// Maps the collected symptoms to ICD-10 suggestions and prints them.
fn icd10_for_symptoms(symptoms_text: &str, patient: Option<&PatientContext>) {
    if symptoms_text.trim().is_empty() {
        println!("No symptoms collected yet for ICD-10 mapping.");
        println!();
        return;
    }

    println!("Generating ICD-10 code report...");
    println!();
    match prescreen_core::generate_icd10_report(symptoms_text, patient) {
        Ok(report) => print_icd10_report(&report),
        Err(e) => eprintln!("Error generating ICD-10 report: {}", e),
    }
}

/// Assembles the consultation into a report, prints it and saves it.
fn generate_and_save_report(
    cfg: &CliConfig,
    assembler: &ReportAssembler,
    patient: Option<&PatientContext>,
    history: &[ConversationEntry],
    symptoms_text: &str,
) {
    if history.is_empty() && symptoms_text.trim().is_empty() {
        println!("No consultation data available for report generation.");
        println!();
        return;
    }

    println!("Generating medical report...");
    println!();
    let report = assembler.assemble(patient, history, symptoms_text);
    println!("{}", report.to_text());

    let Some(store) = open_store(cfg) else {
        return;
    };
    match store.save(assembler.payload(&report, history, symptoms_text), patient) {
        Ok(entry) => {
            println!("Report saved with id {} ({})", entry.id, entry.relative_path);
            println!("This report can be shared with healthcare providers.");
            println!();
        }
        Err(e) => eprintln!("Error saving report: {}", e),
    }
}

// Helper functions

/// Prints `prompt`, reads one line and returns it trimmed. `None` means
/// end of input.
fn read_input(input: &mut impl BufRead, prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

fn confirm(input: &mut impl BufRead, prompt: &str) -> io::Result<bool> {
    let answer = read_input(input, &format!("{prompt} (y/n)"))?;
    Ok(matches!(
        answer.as_deref().map(str::to_lowercase).as_deref(),
        Some("y") | Some("yes")
    ))
}

fn open_store(cfg: &CliConfig) -> Option<ReportStore> {
    match ReportStore::open(&cfg.storage_dir) {
        Ok(store) => Some(store),
        Err(e) => {
            eprintln!("Error opening report store: {}", e);
            None
        }
    }
}

fn none_if_empty(context: PatientContext) -> Option<PatientContext> {
    (!context.is_empty()).then_some(context)
}

fn flag_patient_context(
    age: Option<u16>,
    sex: Option<String>,
    history: Option<String>,
    medications: Option<String>,
) -> Option<PatientContext> {
    none_if_empty(PatientContext {
        patient_id: None,
        name: None,
        age,
        sex,
        medical_history: history,
        medications,
    })
}

fn urgency_label(level: UrgencyLevel) -> &'static str {
    match level {
        UrgencyLevel::Low => "Low",
        UrgencyLevel::Moderate => "Moderate",
        UrgencyLevel::Urgent => "Urgent",
        UrgencyLevel::Immediate => "Immediate",
    }
}

fn care_pathway_line(pathway: &CarePathway) -> String {
    let mut routes: Vec<&str> = Vec::new();
    if pathway.emergency_care {
        routes.push("emergency care");
    }
    if pathway.urgent_care {
        routes.push("urgent care");
    }
    if pathway.primary_care {
        routes.push("primary care");
    }
    if pathway.specialist_referral {
        routes.push("specialist referral");
    }

    if routes.is_empty() {
        return "none".to_owned();
    }
    routes.join(", ")
}

fn parse_date_arg(value: Option<&str>, flag: &str) -> Result<Option<NaiveDate>, String> {
    match value {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| format!("Error: {flag} must be a YYYY-MM-DD date, got '{raw}'")),
    }
}

/// First three supporting symptoms, with a count for the rest.
fn supporting_line(symptoms: &[String]) -> String {
    let mut line = symptoms
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if symptoms.len() > 3 {
        line.push_str(&format!(" (+{} more)", symptoms.len() - 3));
    }
    line
}

fn preview(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_owned();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{cut}...")
}

fn print_assessment(assessment: &TriageAssessment) {
    println!("Urgency level: {}", urgency_label(assessment.urgency_level));

    let domains: Vec<&str> = assessment
        .medical_domains
        .iter()
        .map(|domain| domain.as_str())
        .collect();
    println!("Medical domains: {}", domains.join(", "));
    println!(
        "Care pathway: {}",
        care_pathway_line(&assessment.care_pathway)
    );

    if !assessment.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for (i, recommendation) in assessment.recommendations.iter().enumerate() {
            println!("  {}. {}", i + 1, recommendation);
        }
    }

    if !assessment.risk_factors.is_empty() {
        println!();
        println!("Risk factors:");
        for factor in &assessment.risk_factors {
            println!("  - {}", factor);
        }
    }

    if !assessment.follow_up_questions.is_empty() {
        println!();
        println!("Follow-up questions:");
        for question in &assessment.follow_up_questions {
            println!("  - {}", question);
        }
    }

    if !assessment.next_steps.is_empty() {
        println!();
        println!("Next steps:");
        for step in &assessment.next_steps {
            println!("  - {}", step);
        }
    }

    if let Some(suggestions) = &assessment.icd10_suggestions {
        println!();
        println!("ICD-10 suggestions:");
        for suggestion in suggestions {
            println!(
                "  {} - {} ({}, {}%)",
                suggestion.code,
                suggestion.description,
                suggestion.tier.label(),
                suggestion.percentage()
            );
        }
    }

    if assessment.urgency_level == UrgencyLevel::Immediate {
        print_emergency_banner();
    }
}

fn print_icd10_report(report: &Icd10Report) {
    if !report.has_suggestions {
        println!("No ICD-10 codes could be mapped from the symptoms.");
        println!();
        return;
    }

    println!(
        "ICD-10 code suggestions ({} identified):",
        report.total_codes
    );
    println!();
    for (i, suggestion) in report.suggestions.iter().enumerate() {
        println!("Suggestion {}:", i + 1);
        println!("  Code: {}", suggestion.code);
        println!("  Description: {}", suggestion.description);
        println!(
            "  Confidence: {} ({}%)",
            suggestion.tier.label(),
            suggestion.percentage()
        );
        println!(
            "  Based on: {}",
            supporting_line(&suggestion.supporting_symptoms)
        );
        println!();
    }
    println!("{}", report.disclaimer);
    println!();
}

fn print_report_page(page: &ReportPage) {
    if page.reports.is_empty() {
        println!("No reports found.");
        return;
    }

    for entry in &page.reports {
        print_index_entry(entry);
    }
    println!("Showing {} of {} reports", page.reports.len(), page.total);
    if page.has_more {
        println!(
            "More reports available; rerun with --offset {}",
            page.offset + page.limit
        );
    }
}

fn print_index_entry(entry: &IndexEntry) {
    println!(
        "ID: {}, Created: {}, Patient: {}, Summary: {}",
        entry.id,
        entry.created_at.format("%Y-%m-%d %H:%M"),
        entry.patient_name,
        entry.summary
    );
}

fn print_stats(stats: &StorageStats) {
    println!("Total reports: {}", stats.total_reports);
    println!(
        "Storage size: {:.2} MB ({} bytes)",
        stats.total_size_mb, stats.total_size_bytes
    );
    println!("Storage directory: {}", stats.storage_directory);
    if !stats.reports_by_year.is_empty() {
        println!("Reports by year:");
        for (year, count) in &stats.reports_by_year {
            println!("  {}: {}", year, count);
        }
    }
    println!(
        "Index created: {}",
        stats.index_created.format("%Y-%m-%d %H:%M:%S")
    );
    if let Some(updated) = stats.last_updated {
        println!("Last updated: {}", updated.format("%Y-%m-%d %H:%M:%S"));
    }
}

fn print_summary(history: &[ConversationEntry]) {
    if history.is_empty() {
        println!("No conversation history yet.");
        println!();
        return;
    }

    println!("Conversation summary:");
    println!();
    for (i, entry) in history.iter().enumerate() {
        println!("Query {}: {}", i + 1, preview(&entry.query, 100));
        if let Some(level) = entry.urgency_level {
            println!("  Urgency: {}", urgency_label(level));
        }
        for recommendation in entry.recommendations.iter().take(2) {
            println!("  - {}", recommendation);
        }
        println!();
    }
}

fn print_help() {
    println!();
    println!("Available commands:");
    println!("  help       Show this help message");
    println!("  summary    Show the conversation summary");
    println!("  icd10      Generate ICD-10 code suggestions for collected symptoms");
    println!("  report     Assemble and save the medical report");
    println!("  emergency  Show emergency contact information");
    println!("  quit       End the session ('exit' and 'bye' work too)");
    println!();
    println!("Tips for better results:");
    println!("  - Be specific about symptoms (location, severity, duration)");
    println!("  - Mention what makes symptoms better or worse");
    println!("  - Include relevant medical history");
    println!();
}

fn print_emergency_info() {
    println!();
    println!("MEDICAL EMERGENCY CONTACTS");
    println!();
    println!("Emergency services: 911 (US) / 999 (UK) / 112 (EU)");
    println!("Poison control: 1-800-222-1222 (US)");
    println!("Crisis support: text HOME to 741741 (US)");
    println!();
    println!("Seek immediate help for:");
    println!("  - Chest pain or difficulty breathing");
    println!("  - Severe bleeding or trauma");
    println!("  - Loss of consciousness");
    println!("  - Signs of stroke (face drooping, arm weakness, slurred speech)");
    println!("  - Severe allergic reactions");
    println!("  - Thoughts of self-harm");
    println!();
}

fn print_emergency_banner() {
    println!();
    println!("HIGH URGENCY: consider seeking immediate medical attention.");
    println!("If this is a medical emergency, call emergency services now.");
}

fn print_goodbye() {
    println!();
    println!("Thank you for using the medical prescreening assistant.");
    println!();
    println!("Remember:");
    println!("  - This was preliminary guidance, not a medical diagnosis");
    println!("  - Consult healthcare professionals for proper medical care");
    println!("  - Seek immediate help for medical emergencies");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_no_subcommand_defaults_to_chat() {
        let cli = Cli::try_parse_from(["prescreen"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_analyze_accepts_patient_flags() {
        let cli = Cli::try_parse_from([
            "prescreen",
            "analyze",
            "chest pain",
            "--age",
            "45",
            "--sex",
            "female",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Analyze {
                query, age, sex, ..
            }) => {
                assert_eq!(query, "chest pain");
                assert_eq!(age, Some(45));
                assert_eq!(sex.as_deref(), Some("female"));
            }
            _ => panic!("expected the analyze subcommand"),
        }
    }

    #[test]
    fn test_search_flags_parse() {
        let cli = Cli::try_parse_from([
            "prescreen",
            "search",
            "--patient-id",
            "P1",
            "--start-date",
            "2026-01-01",
            "--limit",
            "5",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Search(args)) => {
                assert_eq!(args.patient_id.as_deref(), Some("P1"));
                assert_eq!(args.start_date.as_deref(), Some("2026-01-01"));
                assert_eq!(args.limit, Some(5));
            }
            _ => panic!("expected the search subcommand"),
        }
    }

    #[test]
    fn test_parse_date_arg_accepts_iso_dates() {
        let parsed = parse_date_arg(Some("2026-03-15"), "--start-date")
            .unwrap()
            .unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());

        assert_eq!(parse_date_arg(None, "--start-date").unwrap(), None);
        assert!(parse_date_arg(Some("15/03/2026"), "--start-date").is_err());
    }

    #[test]
    fn test_preview_truncates_long_text() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn test_supporting_line_caps_at_three_symptoms() {
        let symptoms = vec![
            "headache".to_owned(),
            "nausea".to_owned(),
            "dizziness".to_owned(),
            "fatigue".to_owned(),
            "fever".to_owned(),
        ];
        assert_eq!(
            supporting_line(&symptoms),
            "headache, nausea, dizziness (+2 more)"
        );
        assert_eq!(supporting_line(&symptoms[..2]), "headache, nausea");
    }

    #[test]
    fn test_care_pathway_line_lists_active_routes() {
        let pathway = CarePathway {
            primary_care: true,
            urgent_care: false,
            emergency_care: false,
            specialist_referral: true,
        };
        assert_eq!(
            care_pathway_line(&pathway),
            "primary care, specialist referral"
        );
    }

    #[test]
    fn test_collect_patient_context_reads_answers() {
        let mut input = Cursor::new("34\nfemale\ny\nasthma\nn\ny\n");
        let context = collect_patient_context(&mut input).unwrap().unwrap();

        assert_eq!(context.age, Some(34));
        assert_eq!(context.sex.as_deref(), Some("female"));
        assert_eq!(context.medical_history.as_deref(), Some("asthma"));
        assert_eq!(context.medications, None);
    }

    #[test]
    fn test_collect_patient_context_cleared_when_not_confirmed() {
        let mut input = Cursor::new("34\n\nn\nn\nn\n");
        let context = collect_patient_context(&mut input).unwrap();
        assert!(context.is_none());
    }

    #[test]
    fn test_collect_patient_context_skips_invalid_age() {
        let mut input = Cursor::new("prefer not to say\n\nn\nn\n");
        let context = collect_patient_context(&mut input).unwrap();
        assert!(context.is_none());
    }
}
