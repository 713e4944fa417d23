//! Markup-backed view model
//!
//! Holds the state a page would hold (form fields, visible panels, the
//! rendered record cards and the log panel) and renders HTML fragments for
//! the record list and the log. Used by the binary and as the test double.

use super::{ActivityLog, LogEntry, LogLevel, LoginForm, OperationKind, RecordForm, Ui};
use crate::database::Record;
use std::collections::HashMap;

const PHONE_GLYPH: &str = "\u{1F4DE}";
const NOTE_GLYPH: &str = "\u{1F4DD}";

/// In-memory view for the login form, operation panels, records and log
#[derive(Debug, Default)]
pub struct MarkupUi {
    login: LoginForm,
    forms: HashMap<OperationKind, RecordForm>,
    visible_panel: Option<OperationKind>,
    main_area_visible: bool,
    records_html: String,
    render_count: usize,
    log: Vec<LogEntry>,
}

impl MarkupUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type values into the login form
    pub fn set_login_form(&mut self, form: LoginForm) {
        self.login = form;
    }

    /// Type values into an operation form
    pub fn set_record_form(&mut self, kind: OperationKind, form: RecordForm) {
        self.forms.insert(kind, form);
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    pub fn visible_panel(&self) -> Option<OperationKind> {
        self.visible_panel
    }

    pub fn is_main_area_visible(&self) -> bool {
        self.main_area_visible
    }

    pub fn is_login_visible(&self) -> bool {
        !self.main_area_visible
    }

    pub fn records_html(&self) -> &str {
        &self.records_html
    }

    /// How many times the record list has been re-rendered
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn last_log(&self) -> Option<&LogEntry> {
        self.log.last()
    }

    pub fn error_count(&self) -> usize {
        self.log.iter().filter(|e| e.is_error()).count()
    }

    pub fn log_html(&self) -> String {
        render_log(&self.log)
    }
}

impl ActivityLog for MarkupUi {
    fn append_log(&mut self, message: &str, level: LogLevel) {
        self.log.push(LogEntry::new(message, level));
    }
}

impl Ui for MarkupUi {
    fn read_login_form(&self) -> LoginForm {
        self.login.clone()
    }

    fn fill_login_form(&mut self, form: LoginForm) {
        self.login = form;
    }

    fn read_record_form(&self, kind: OperationKind) -> RecordForm {
        self.forms.get(&kind).cloned().unwrap_or_default()
    }

    fn clear_record_form(&mut self, kind: OperationKind) {
        self.forms.remove(&kind);
    }

    fn show_operation_panel(&mut self, kind: Option<OperationKind>) {
        self.visible_panel = kind.filter(|k| k.has_panel());
    }

    fn render_records(&mut self, records: &[Record]) {
        self.records_html = render_records(records);
        self.render_count += 1;
    }

    fn toggle_auth_area(&mut self, is_connected: bool) {
        self.main_area_visible = is_connected;
        if !is_connected {
            self.visible_panel = None;
        }
    }
}

/// One card per record, in the order given
pub fn render_records(records: &[Record]) -> String {
    if records.is_empty() {
        return "<p class=\"empty\">No records</p>".to_string();
    }

    records.iter().map(render_card).collect()
}

fn render_card(record: &Record) -> String {
    let mut html = String::from("<div class=\"record-card\">");
    html.push_str(&format!("<h3>{}</h3>", escape(&record.full_name)));
    html.push_str(&format!("<p>{} {}</p>", PHONE_GLYPH, escape(&record.phone)));
    if let Some(note) = &record.note {
        html.push_str(&format!("<p>{} {}</p>", NOTE_GLYPH, escape(note)));
    }
    html.push_str("</div>");
    html
}

pub fn render_log(entries: &[LogEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let class = match entry.level {
                LogLevel::Info => "log-entry",
                LogLevel::Error => "log-entry error",
            };
            format!("<div class=\"{}\">{}</div>", class, escape(&entry.to_string()))
        })
        .collect()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
