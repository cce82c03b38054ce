use crate::error::{ExamError, Result};
use crate::grader::GradeReport;
use crate::logger;
use crate::models::SetupSettings;
use std::fs;
use std::path::{Path, PathBuf};

pub const RESULTS_FILE: &str = "results.json";
pub const CONFIG_FILE: &str = "config.json";
pub const QUESTIONS_FILE: &str = "questions.json";

pub fn results_json(report: Option<&GradeReport>) -> Result<String> {
    let report = report.ok_or(ExamError::NoResults)?;
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes `results.json`. Nothing is written when no exam has been graded.
pub fn export_results(report: Option<&GradeReport>, dir: &Path) -> Result<PathBuf> {
    let json = results_json(report)?;
    write_artifact(dir, RESULTS_FILE, &json)
}

pub fn export_config(settings: &SetupSettings, dir: &Path) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(settings)?;
    write_artifact(dir, CONFIG_FILE, &json)
}

/// Writes a decoded bank as `questions.json`, falling back to
/// `questions-1.json`, `questions-2.json`, ... so no existing file is replaced.
pub fn write_question_bank(text: &str, dir: &Path) -> Result<PathBuf> {
    let name = free_name(dir, QUESTIONS_FILE);
    write_artifact(dir, &name, text)
}

fn free_name(dir: &Path, name: &str) -> String {
    if !dir.join(name).exists() {
        return name.to_string();
    }
    let stem = name.trim_end_matches(".json");
    let mut n = 1;
    loop {
        let candidate = format!("{}-{}.json", stem, n);
        if !dir.join(&candidate).exists() {
            return candidate;
        }
        n += 1;
    }
}

fn write_artifact(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, contents)?;
    logger::log(&format!("Wrote {}", path.display()));
    Ok(path)
}
