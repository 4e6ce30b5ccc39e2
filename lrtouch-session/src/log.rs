use std::borrow::Cow;
use std::fs;
use std::path::Path;

use lrtouch_core::LogEntry;
use thiserror::Error;

const CSV_HEADER: [&str; 8] = [
    "timestamp",
    "trialIndex",
    "target",
    "left",
    "right",
    "response",
    "correct",
    "rtMs",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode export as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only record of every response in the current run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionLog {
    entries: Vec<LogEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owned snapshot of the log, safe to take mid-session
    pub fn export_records(&self) -> Vec<LogEntry> {
        self.entries.clone()
    }

    /// Header plus one row per entry, rows separated by `\n`
    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.entries.len() + 1);
        lines.push(CSV_HEADER.join(","));
        for entry in &self.entries {
            let index = entry.trial_index.to_string();
            let correct = entry.correct.to_string();
            let rt = entry.reaction_time_ms.to_string();
            let fields = [
                entry.timestamp.as_str(),
                index.as_str(),
                entry.target.as_str(),
                entry.left.as_str(),
                entry.right.as_str(),
                entry.response.as_str(),
                correct.as_str(),
                rt.as_str(),
            ];
            let row: Vec<Cow<'_, str>> = fields.iter().map(|f| escape_csv(f)).collect();
            lines.push(row.join(","));
        }
        lines.join("\n")
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), ExportError> {
        fs::write(path, self.to_csv())?;
        Ok(())
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ExportError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Quote a field holding a delimiter, quote or line break; embedded quotes are doubled.
pub fn escape_csv(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// e.g. `lr_touch_session_1714555800000.csv`
pub fn export_file_name(unix_millis: i64, extension: &str) -> String {
    format!("lr_touch_session_{unix_millis}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lrtouch_core::Response;

    fn entry(target: &str, correct: bool) -> LogEntry {
        LogEntry {
            timestamp: "2024-05-01T09:30:00.125Z".into(),
            trial_index: 3,
            target: target.into(),
            left: target.into(),
            right: "dog".into(),
            response: Response::Left,
            correct,
            reaction_time_ms: 812,
        }
    }

    #[test]
    fn empty_log_is_header_only() {
        assert_eq!(
            SessionLog::new().to_csv(),
            "timestamp,trialIndex,target,left,right,response,correct,rtMs"
        );
    }

    #[test]
    fn rows_follow_fixed_column_order() {
        let mut log = SessionLog::new();
        log.push(entry("cat", true));
        let csv = log.to_csv();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "2024-05-01T09:30:00.125Z,3,cat,cat,dog,left,true,812");
    }

    #[test]
    fn delimiters_are_quoted() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("two\nlines"), "\"two\nlines\"");

        let mut log = SessionLog::new();
        log.push(entry("ice cream, vanilla", false));
        let csv = log.to_csv();
        assert!(csv.contains(",\"ice cream, vanilla\",\"ice cream, vanilla\",dog,left,false,812"));
    }

    #[test]
    fn snapshot_is_stable_and_clear_empties() {
        let mut log = SessionLog::new();
        log.push(entry("cat", true));
        log.push(entry("cow", false));
        assert_eq!(log.export_records(), log.export_records());
        assert_eq!(log.len(), 2);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn json_uses_record_field_names() {
        let mut log = SessionLog::new();
        log.push(entry("cat", true));
        let json = log.to_json().unwrap();
        assert!(json.contains("\"trialIndex\": 3"));
        assert!(json.contains("\"rtMs\": 812"));
    }

    #[test]
    fn file_name_carries_timestamp() {
        assert_eq!(export_file_name(1714555800000, "csv"), "lr_touch_session_1714555800000.csv");
    }
}
