use std::path::PathBuf;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::aggregate::{self, TrendPoint};
use crate::models::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Upload,
    Probe,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Upload, Self::Probe]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Upload => write!(f, "Upload"),
            Self::Probe => write!(f, "Probe"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

/// A network request the user has triggered but the event loop has not yet
/// handed to a worker thread.
#[derive(Debug, Clone)]
pub(crate) enum Request {
    Analyze(PathBuf),
    ProbeTransaction,
    RecentAnomalies,
}

impl Request {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Analyze(_) => "Uploading CSV for analysis",
            Self::ProbeTransaction => "Sending test transaction",
            Self::RecentAnomalies => "Fetching recent anomalies",
        }
    }
}

/// The completed result of a worker-thread request, posted back to the
/// event loop over a channel.
#[derive(Debug)]
pub(crate) enum Outcome {
    Analysis(anyhow::Result<AnalysisResult>),
    Probe(anyhow::Result<Value>),
}

/// What the probe screen currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ProbeDisplay {
    Response(String),
    Failure(String),
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) service_url: String,

    // Analysis result and its derived views. The derived views are pure
    // functions of `result` and are recomputed whenever it is replaced.
    pub(crate) result: Option<AnalysisResult>,
    pub(crate) trend: Vec<TrendPoint>,
    pub(crate) category_totals: Vec<(String, Decimal)>,
    pub(crate) table_scroll: usize,

    // Upload screen
    pub(crate) selected_file: Option<PathBuf>,
    pub(crate) file_browser_path: PathBuf,
    pub(crate) file_browser_entries: Vec<PathBuf>,
    pub(crate) file_browser_index: usize,
    pub(crate) file_browser_scroll: usize,
    pub(crate) file_browser_show_hidden: bool,

    // Probe screen
    pub(crate) probe: Option<ProbeDisplay>,
    pub(crate) probe_scroll: usize,

    // Request plumbing. `queued` is picked up by the event loop, which
    // spawns the worker and marks the request in flight. While `in_flight`
    // is set, new triggers are rejected with a status message.
    queued: Option<Request>,
    pub(crate) in_flight: Option<&'static str>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(service_url: String) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            service_url,

            result: None,
            trend: Vec::new(),
            category_totals: Vec::new(),
            table_scroll: 0,

            selected_file: None,
            file_browser_path: directories::UserDirs::new()
                .map(|d| d.home_dir().to_path_buf())
                .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"))),
            file_browser_entries: Vec::new(),
            file_browser_index: 0,
            file_browser_scroll: 0,
            file_browser_show_hidden: false,

            probe: None,
            probe_scroll: 0,

            queued: None,
            in_flight: None,

            visible_rows: 20,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    // ── Request triggers ─────────────────────────────────────

    /// Queue the CSV upload, or surface a validation error without touching
    /// the network when no file is selected.
    pub(crate) fn request_upload(&mut self) {
        if self.reject_if_busy() {
            return;
        }
        match self.selected_file.clone() {
            Some(path) => self.queue(Request::Analyze(path)),
            None => self.set_status("No CSV file selected — pick one in the Upload screen"),
        }
    }

    pub(crate) fn request_probe_transaction(&mut self) {
        if self.reject_if_busy() {
            return;
        }
        self.queue(Request::ProbeTransaction);
    }

    pub(crate) fn request_recent_anomalies(&mut self) {
        if self.reject_if_busy() {
            return;
        }
        self.queue(Request::RecentAnomalies);
    }

    fn queue(&mut self, request: Request) {
        self.set_status(format!("{}…", request.label()));
        self.queued = Some(request);
    }

    fn reject_if_busy(&mut self) -> bool {
        if let Some(label) = self.in_flight {
            self.set_status(format!("{label}… still waiting on the service"));
            true
        } else {
            false
        }
    }

    /// Hand the queued request to the event loop and mark it in flight.
    pub(crate) fn take_queued(&mut self) -> Option<Request> {
        let request = self.queued.take()?;
        self.in_flight = Some(request.label());
        Some(request)
    }

    // ── Outcome application ──────────────────────────────────

    pub(crate) fn apply_outcome(&mut self, outcome: Outcome) {
        self.in_flight = None;
        match outcome {
            Outcome::Analysis(Ok(result)) => {
                self.trend = aggregate::trend_points(&result.anomalies);
                self.category_totals = aggregate::category_totals(&result.anomalies);
                self.table_scroll = 0;
                self.set_status(format!(
                    "Analyzed {} transactions — {} anomalies found",
                    result.total, result.anomalies_found
                ));
                self.result = Some(result);
                self.screen = Screen::Dashboard;
            }
            Outcome::Analysis(Err(e)) => {
                // Previous result (if any) stays on screen untouched.
                self.set_status(format!("Upload failed: {e:#}"));
            }
            Outcome::Probe(Ok(value)) => {
                let pretty = serde_json::to_string_pretty(&value)
                    .unwrap_or_else(|_| value.to_string());
                self.probe = Some(ProbeDisplay::Response(pretty));
                self.probe_scroll = 0;
            }
            Outcome::Probe(Err(e)) => {
                let payload = serde_json::json!({ "error": format!("{e:#}") });
                let pretty = serde_json::to_string_pretty(&payload)
                    .unwrap_or_else(|_| payload.to_string());
                self.probe = Some(ProbeDisplay::Failure(pretty));
                self.probe_scroll = 0;
            }
        }
    }

    // ── File browser ─────────────────────────────────────────

    pub(crate) fn refresh_file_browser(&mut self) {
        let mut entries: Vec<PathBuf> = Vec::new();

        // Parent directory first, as the ".." entry
        if let Some(parent) = self.file_browser_path.parent() {
            entries.push(parent.to_path_buf());
        }

        if let Ok(read_dir) = std::fs::read_dir(&self.file_browser_path) {
            let mut dirs: Vec<PathBuf> = Vec::new();
            let mut files: Vec<PathBuf> = Vec::new();
            for entry in read_dir.flatten() {
                let path = entry.path();
                let hidden = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with('.'));
                if hidden && !self.file_browser_show_hidden {
                    continue;
                }
                if path.is_dir() {
                    dirs.push(path);
                } else if path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "csv" | "tsv"))
                {
                    files.push(path);
                }
            }
            dirs.sort();
            files.sort();
            entries.extend(dirs);
            entries.extend(files);
        }

        self.file_browser_entries = entries;
        self.file_browser_index = 0;
        self.file_browser_scroll = 0;
    }

    /// Enter on a browser row: descend into a directory, or mark a file as
    /// the upload candidate.
    pub(crate) fn select_browser_entry(&mut self) {
        let Some(path) = self
            .file_browser_entries
            .get(self.file_browser_index)
            .cloned()
        else {
            return;
        };
        if path.is_dir() {
            self.file_browser_path = path;
            self.refresh_file_browser();
        } else {
            self.set_status(format!("Selected {}", path.display()));
            self.selected_file = Some(path);
        }
    }

    pub(crate) fn clear_result(&mut self) {
        self.result = None;
        self.trend.clear();
        self.category_totals.clear();
        self.table_scroll = 0;
        self.probe = None;
        self.probe_scroll = 0;
        self.set_status("Cleared analysis results");
    }
}
