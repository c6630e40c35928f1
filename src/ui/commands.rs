use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit PulseTUI", cmd_quit, r);
    register_command!("quit", "Quit PulseTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("u", "Go to Upload", cmd_upload_screen, r);
    register_command!("upload", "Go to Upload", cmd_upload_screen, r);
    register_command!("p", "Go to Probe", cmd_probe_screen, r);
    register_command!("probe", "Go to Probe", cmd_probe_screen, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "analyze",
        "Upload the selected CSV for analysis",
        cmd_analyze,
        r
    );
    register_command!(
        "test",
        "Send a synthetic test transaction to the service",
        cmd_test_transaction,
        r
    );
    register_command!(
        "recent",
        "Fetch the service's recently recorded anomalies",
        cmd_recent,
        r
    );
    register_command!("url", "Show the analysis service URL", cmd_url, r);
    register_command!("clear", "Clear the current analysis result", cmd_clear, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(());
    }
    let (name, args) = match input.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (input, ""),
    };

    match COMMANDS.get(name) {
        Some(cmd) => (cmd.run)(args, app),
        None => {
            app.set_status(format!("Unknown command: :{name} (try :help)"));
            Ok(())
        }
    }
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_upload_screen(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Upload;
    app.refresh_file_browser();
    Ok(())
}

fn cmd_probe_screen(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Probe;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_analyze(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.request_upload();
    Ok(())
}

fn cmd_test_transaction(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Probe;
    app.request_probe_transaction();
    Ok(())
}

fn cmd_recent(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Probe;
    app.request_recent_anomalies();
    Ok(())
}

fn cmd_url(_args: &str, app: &mut App) -> anyhow::Result<()> {
    let url = app.service_url.clone();
    app.set_status(format!("Analysis service: {url}"));
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.clear_result();
    Ok(())
}
