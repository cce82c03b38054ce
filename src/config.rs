use std::path::PathBuf;

pub const QUESTIONS_DIR_VAR: &str = "EXAM_SIM_QUESTIONS_DIR";
pub const EXPORT_DIR_VAR: &str = "EXAM_SIM_EXPORT_DIR";
pub const LOG_FILE_VAR: &str = "EXAM_SIM_LOG";

const DEFAULT_QUESTIONS_DIR: &str = "questions";
const DEFAULT_EXPORT_DIR: &str = ".";
const DEFAULT_LOG_FILE: &str = "exam_debug.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Scanned for `*.json` question banks.
    pub questions_dir: PathBuf,
    /// Where `results.json`, `config.json` and decoded banks are written.
    pub export_dir: PathBuf,
    pub log_file: PathBuf,
    /// Bank passed on the command line, pre-selected on the setup screen.
    pub initial_bank: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            questions_dir: PathBuf::from(DEFAULT_QUESTIONS_DIR),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            initial_bank: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_sources(|key| std::env::var(key).ok(), std::env::args().skip(1))
    }

    pub fn from_sources<F, I>(var: F, mut args: I) -> Self
    where
        F: Fn(&str) -> Option<String>,
        I: Iterator<Item = String>,
    {
        let path_var = |key: &str, default: &str| {
            var(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            questions_dir: path_var(QUESTIONS_DIR_VAR, DEFAULT_QUESTIONS_DIR),
            export_dir: path_var(EXPORT_DIR_VAR, DEFAULT_EXPORT_DIR),
            log_file: path_var(LOG_FILE_VAR, DEFAULT_LOG_FILE),
            initial_bank: args.next().map(PathBuf::from),
        }
    }
}
