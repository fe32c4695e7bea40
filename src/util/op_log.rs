use crate::script::Step;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

pub fn log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("circq").join("ops.log"))
}

/// One log line: `<timestamp> [OK|ERR] #<index> <op> -> <outcome> (len <n>)`.
pub fn format_line(timestamp: &str, step: &Step) -> String {
    let tag = if step.outcome.is_error() { "ERR" } else { "OK" };
    format!(
        "{} [{}] #{} {} -> {} (len {})",
        timestamp, tag, step.index, step.op, step.outcome.describe(), step.len
    )
}

/// Append replayed steps to the persistent log file.
pub fn append(steps: &[Step]) {
    if steps.is_empty() { return; }
    let path = match log_path() {
        Some(p) => p,
        None    => return,
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&path) {
        for step in steps {
            let _ = writeln!(file, "{}", format_line(&now, step));
        }
    }
}

/// Last `n` lines of the log, oldest first.
pub fn load_recent(n: usize) -> Vec<String> {
    let text = match log_path().and_then(|p| fs::read_to_string(p).ok()) {
        Some(t) => t,
        None    => return Vec::new(),
    };
    last_lines(&text, n)
}

fn last_lines(text: &str, n: usize) -> Vec<String> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let skip = lines.len().saturating_sub(n);
    lines[skip..].iter().map(|l| l.to_string()).collect()
}
