//! App controller
//!
//! Turns UI events into connection calls and keeps the view in step with
//! the record store. Every failure is caught here and reported as a single
//! error entry in the log panel; nothing escapes to the caller.
//!
//! Handlers take `&mut self`, so operations against the store never overlap.
//! Share a controller between tasks through `tokio::sync::Mutex`.

use crate::database::{Connection, ConnectionConfig, Latency};
use crate::error::{AppError, Result};
use crate::services::SavedConfigService;
use crate::storage::KeyValueStore;
use crate::ui::{LogLevel, LoginForm, OperationKind, RecordForm, Ui};

/// Trigger points the controller responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    ConnectSubmit,
    Logout,
    OperationSelected(OperationKind),
    OperationSubmitted(OperationKind),
}

/// Result of handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// An error entry was appended to the log
    Failed,
    /// Ignored without touching the store, e.g. no active connection
    Skipped,
}

pub struct AppController<U, S> {
    ui: U,
    connection: Connection,
    saved_config: SavedConfigService<S>,
}

impl<U: Ui, S: KeyValueStore> AppController<U, S> {
    pub fn new(ui: U, store: S, latency: Latency) -> Self {
        Self {
            ui,
            connection: Connection::new(latency),
            saved_config: SavedConfigService::new(store),
        }
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn saved_config(&self) -> &SavedConfigService<S> {
        &self.saved_config
    }

    /// Restore the remembered config into the login form and show it
    pub async fn start(&mut self) -> Outcome {
        tracing::info!("Starting controller");

        let outcome = match self.saved_config.load().await {
            Ok(Some(config)) => {
                tracing::info!("Restoring saved connection config");
                self.ui.fill_login_form(LoginForm::restored(&config));
                Outcome::Completed
            }
            Ok(None) => {
                self.ui
                    .fill_login_form(LoginForm::restored(&ConnectionConfig::default()));
                Outcome::Completed
            }
            Err(e) => self.report("Could not read saved settings", &e),
        };

        self.ui.show_operation_panel(None);
        self.ui.toggle_auth_area(false);
        outcome
    }

    /// Dispatch a UI event to its handler
    pub async fn handle(&mut self, event: UiEvent) -> Outcome {
        tracing::debug!("Handling {:?}", event);

        match event {
            UiEvent::ConnectSubmit => self.on_connect_submit().await,
            UiEvent::Logout => self.on_logout().await,
            UiEvent::OperationSelected(kind) => self.on_operation_selected(kind).await,
            UiEvent::OperationSubmitted(kind) => self.on_operation_submit(kind).await,
        }
    }

    pub async fn on_connect_submit(&mut self) -> Outcome {
        let config = match self.ui.read_login_form().to_config() {
            Ok(config) => config,
            Err(e) => return self.report("Connection failed", &e),
        };

        if let Err(e) = self.connection.connect(config.clone(), &mut self.ui).await {
            let outcome = self.report("Connection failed", &e);
            self.ui.toggle_auth_area(self.connection.is_connected());
            return outcome;
        }

        self.ui.toggle_auth_area(true);

        if let Err(e) = self.refresh_records().await {
            self.report("Could not load records", &e);
        }

        let remembered = if config.remember_me {
            self.saved_config.save(&config).await
        } else {
            self.saved_config.clear().await
        };
        if let Err(e) = remembered {
            self.report("Could not save connection settings", &e);
        }

        Outcome::Completed
    }

    pub async fn on_logout(&mut self) -> Outcome {
        self.connection.disconnect(&mut self.ui);
        self.ui.show_operation_panel(None);
        self.ui.render_records(&[]);
        self.ui.toggle_auth_area(false);

        match self.saved_config.clear().await {
            Ok(()) => Outcome::Completed,
            Err(e) => self.report("Could not clear saved settings", &e),
        }
    }

    /// Show the matching panel; ShowAll loads and renders straight away
    pub async fn on_operation_selected(&mut self, kind: OperationKind) -> Outcome {
        self.ui.show_operation_panel(Some(kind));

        if kind.has_panel() {
            return Outcome::Completed;
        }
        if !self.connection.is_connected() {
            return Outcome::Skipped;
        }

        match self.refresh_records().await {
            Ok(count) => {
                self.ui
                    .append_log(&format!("Loaded {} record(s)", count), LogLevel::Info);
                Outcome::Completed
            }
            Err(e) => self.report("Could not load records", &e),
        }
    }

    /// Read the operation form, run it, then re-render on success
    pub async fn on_operation_submit(&mut self, kind: OperationKind) -> Outcome {
        if !self.connection.is_connected() {
            tracing::debug!("Ignoring {} submit without an active connection", kind);
            return Outcome::Skipped;
        }
        if !kind.has_panel() {
            return self.on_operation_selected(kind).await;
        }

        let form = self.ui.read_record_form(kind);
        let message = match self.apply(kind, &form).await {
            Ok(message) => message,
            Err(e) => return self.report(&format!("{} failed", kind), &e),
        };

        self.ui.append_log(&message, LogLevel::Info);
        self.ui.clear_record_form(kind);

        match self.refresh_records().await {
            Ok(_) => Outcome::Completed,
            Err(e) => self.report("Could not load records", &e),
        }
    }

    async fn apply(&mut self, kind: OperationKind, form: &RecordForm) -> Result<String> {
        match kind {
            OperationKind::Insert => {
                let record = self.connection.insert(form.to_record()?).await?;
                Ok(format!("Inserted {} ({})", record.full_name, record.phone))
            }
            OperationKind::Edit => {
                let phone = form.key()?;
                let patch = form.to_patch()?;
                let record = self.connection.update(&phone, patch).await?;
                Ok(format!("Updated {} ({})", record.full_name, record.phone))
            }
            OperationKind::Delete => {
                let phone = form.key()?;
                match self.connection.delete(&phone).await? {
                    0 => Err(AppError::NothingDeleted(phone)),
                    removed => Ok(format!("Deleted {} record(s) for {}", removed, phone)),
                }
            }
            OperationKind::ShowAll => Err(AppError::Validation(
                "showAll has no form to submit".to_string(),
            )),
        }
    }

    async fn refresh_records(&mut self) -> Result<usize> {
        let records = self.connection.list_all().await?;
        self.ui.render_records(&records);
        Ok(records.len())
    }

    fn report(&mut self, context: &str, error: &AppError) -> Outcome {
        tracing::warn!("{}: {}", context, error);
        self.ui
            .append_log(&format!("{}: {}", context, error), LogLevel::Error);
        Outcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{ConnectionStatus, Record};
    use crate::storage::MemoryStore;
    use crate::ui::MarkupUi;

    fn login(remember_me: bool) -> LoginForm {
        LoginForm {
            host: "localhost".to_string(),
            port: "5432".to_string(),
            user: "demo".to_string(),
            password: "pw".to_string(),
            database: "contacts".to_string(),
            remember_me,
        }
    }

    fn new_controller() -> AppController<MarkupUi, MemoryStore> {
        AppController::new(MarkupUi::new(), MemoryStore::new(), Latency::none())
    }

    async fn connected_controller() -> AppController<MarkupUi, MemoryStore> {
        let mut controller = new_controller();
        controller.start().await;
        controller.ui_mut().set_login_form(login(false));
        assert_eq!(controller.on_connect_submit().await, Outcome::Completed);
        controller
    }

    async fn submit(
        controller: &mut AppController<MarkupUi, MemoryStore>,
        kind: OperationKind,
        form: RecordForm,
    ) -> Outcome {
        controller.ui_mut().set_record_form(kind, form);
        controller.handle(UiEvent::OperationSubmitted(kind)).await
    }

    async fn records(controller: &mut AppController<MarkupUi, MemoryStore>) -> Vec<Record> {
        controller.connection.list_all().await.unwrap()
    }

    #[tokio::test]
    async fn test_connect_shows_main_area_and_renders() {
        let controller = connected_controller().await;

        assert!(controller.ui().is_main_area_visible());
        assert_eq!(controller.ui().render_count(), 1);
        assert_eq!(controller.connection().status(), ConnectionStatus::Connected);
    }

    #[tokio::test]
    async fn test_insert_logs_and_rerenders() {
        let mut controller = connected_controller().await;

        let outcome = submit(
            &mut controller,
            OperationKind::Insert,
            RecordForm::new("A", "1", ""),
        )
        .await;

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(controller.ui().render_count(), 2);
        assert!(controller.ui().records_html().contains("<h3>A</h3>"));
        assert_eq!(controller.ui().last_log().unwrap().message, "Inserted A (1)");
        assert_eq!(
            controller.ui().read_record_form(OperationKind::Insert),
            RecordForm::default()
        );
    }

    #[tokio::test]
    async fn test_failed_operation_logs_once_and_skips_render() {
        let mut controller = connected_controller().await;
        submit(&mut controller, OperationKind::Insert, RecordForm::new("A", "1", "")).await;
        let renders = controller.ui().render_count();
        let errors = controller.ui().error_count();

        let outcome = submit(
            &mut controller,
            OperationKind::Insert,
            RecordForm::new("B", "1", ""),
        )
        .await;

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(controller.ui().render_count(), renders);
        assert_eq!(controller.ui().error_count(), errors + 1);
        assert_eq!(records(&mut controller).await, vec![Record::new("A", "1")]);
    }

    #[tokio::test]
    async fn test_edit_missing_phone_fails() {
        let mut controller = connected_controller().await;

        let outcome = submit(
            &mut controller,
            OperationKind::Edit,
            RecordForm::new("Z", "9", ""),
        )
        .await;

        assert_eq!(outcome, Outcome::Failed);
        assert!(controller
            .ui()
            .last_log()
            .unwrap()
            .message
            .starts_with("edit failed: Record not found"));
    }

    #[tokio::test]
    async fn test_delete_missing_is_reported_as_failure() {
        let mut controller = connected_controller().await;
        submit(&mut controller, OperationKind::Insert, RecordForm::new("A", "1", "")).await;

        let outcome = submit(
            &mut controller,
            OperationKind::Delete,
            RecordForm::phone_only("missing"),
        )
        .await;

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(
            controller.ui().last_log().unwrap().message,
            "delete failed: No record with phone missing, 0 removed"
        );
        assert_eq!(records(&mut controller).await, vec![Record::new("A", "1")]);
    }

    #[tokio::test]
    async fn test_submit_without_connection_is_skipped_silently() {
        let mut controller = new_controller();
        controller.start().await;
        let log_len = controller.ui().log().len();

        let outcome = submit(
            &mut controller,
            OperationKind::Insert,
            RecordForm::new("A", "1", ""),
        )
        .await;

        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(controller.ui().log().len(), log_len);
        assert_eq!(controller.ui().render_count(), 0);
    }

    #[tokio::test]
    async fn test_selecting_panel_shows_it() {
        let mut controller = connected_controller().await;

        let outcome = controller
            .handle(UiEvent::OperationSelected(OperationKind::Delete))
            .await;

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(controller.ui().visible_panel(), Some(OperationKind::Delete));
    }

    #[tokio::test]
    async fn test_show_all_renders_immediately() {
        let mut controller = connected_controller().await;
        controller
            .handle(UiEvent::OperationSelected(OperationKind::Insert))
            .await;
        let renders = controller.ui().render_count();

        let outcome = controller
            .handle(UiEvent::OperationSelected(OperationKind::ShowAll))
            .await;

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(controller.ui().visible_panel(), None);
        assert_eq!(controller.ui().render_count(), renders + 1);
        assert_eq!(controller.ui().last_log().unwrap().message, "Loaded 0 record(s)");
    }

    #[tokio::test]
    async fn test_connect_failure_stays_on_login() {
        let mut controller = new_controller();
        controller.start().await;
        controller.ui_mut().set_login_form(LoginForm {
            host: String::new(),
            ..login(true)
        });

        let outcome = controller.handle(UiEvent::ConnectSubmit).await;

        assert_eq!(outcome, Outcome::Failed);
        assert!(controller.ui().is_login_visible());
        assert!(controller.ui().last_log().unwrap().is_error());
        assert_eq!(controller.saved_config().load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_connect_twice_keeps_main_area() {
        let mut controller = connected_controller().await;

        let outcome = controller.handle(UiEvent::ConnectSubmit).await;

        assert_eq!(outcome, Outcome::Failed);
        assert!(controller.ui().is_main_area_visible());
    }

    #[tokio::test]
    async fn test_logout_clears_view_and_connection() {
        let mut controller = connected_controller().await;
        submit(&mut controller, OperationKind::Insert, RecordForm::new("A", "1", "")).await;
        controller
            .handle(UiEvent::OperationSelected(OperationKind::Edit))
            .await;

        let outcome = controller.handle(UiEvent::Logout).await;

        assert_eq!(outcome, Outcome::Completed);
        assert!(controller.ui().is_login_visible());
        assert_eq!(controller.ui().visible_panel(), None);
        assert!(!controller.ui().records_html().contains("record-card"));
        assert_eq!(controller.connection().status(), ConnectionStatus::Disconnected);
    }
}
