use serde::Deserialize;

use super::repo_types::LogItem;

/// Body of `POST /analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub message: Option<String>,
    pub logs: Vec<LogItem>,
}

pub fn saved_message(count: u64) -> String {
    format!("Successfully saved {} logs to the database!", count)
}
