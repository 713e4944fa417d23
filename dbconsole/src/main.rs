// dbconsole - simulated database console
// Entry point: plays a short session against the controller and prints the view markup

use dbconsole::app;
use dbconsole::controller::UiEvent;
use dbconsole::database::Latency;
use dbconsole::ui::{OperationKind, RecordForm};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dbconsole=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting dbconsole");

    let data_dir = app::data_dir()?;
    let mut controller = app::setup(&data_dir, Latency::default())?;
    controller.start().await;

    // The login form arrives pre-filled when a previous run remembered it
    let mut login = controller.ui().login_form().clone();
    if login.user.is_empty() {
        login.user = "demo".to_string();
    }
    if login.database.is_empty() {
        login.database = "contacts".to_string();
    }
    login.password = "demo".to_string();
    login.remember_me = true;
    controller.ui_mut().set_login_form(login);
    controller.handle(UiEvent::ConnectSubmit).await;

    if let Some(config) = controller.connection().config() {
        tracing::info!(
            "Session open on {}:{}/{}",
            config.host,
            config.port,
            config.database
        );
    }

    // Operations are named the way the selector buttons name them
    let session = [
        ("insert", RecordForm::new("Ada Lovelace", "555-0101", "")),
        ("insert", RecordForm::new("Alan Turing", "555-0102", "Bletchley")),
        ("edit", RecordForm::new("", "555-0101", "Analytical Engine")),
        ("delete", RecordForm::phone_only("555-0199")),
    ];

    for (name, form) in session {
        let kind: OperationKind = name.parse()?;
        controller.handle(UiEvent::OperationSelected(kind)).await;
        controller.ui_mut().set_record_form(kind, form);
        controller.handle(UiEvent::OperationSubmitted(kind)).await;
    }

    controller
        .handle(UiEvent::OperationSelected(OperationKind::ShowAll))
        .await;

    println!("{}", controller.ui().records_html());
    println!("{}", controller.ui().log_html());

    Ok(())
}
