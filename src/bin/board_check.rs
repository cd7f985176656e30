use taskflow::api::auth::{AuthApi, LoginPayload};
use taskflow::api::projects::ProjectsApi;
use taskflow::api::tasks::TasksApi;
use taskflow::api::ApiClient;
use taskflow::config::ClientConfig;
use taskflow::core::task::TaskFilters;
use taskflow::session::SessionStore;
use taskflow::state::board::BoardState;
use taskflow::state::dashboard;

#[tokio::main]
async fn main() {
    // Logging goes to the systemd user journal
    // (`journalctl --user -t taskflow-board-check -f`). Wrapper filters:
    // taskflow crate at info/debug (per TASKFLOW_DEBUG), everything else at warn.
    {
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                let target = metadata.target();
                if target.starts_with("taskflow") || target.starts_with("board_check") {
                    let max = if taskflow::debug_logging() {
                        log::LevelFilter::Debug
                    } else {
                        log::LevelFilter::Info
                    };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        let journal = systemd_journal_logger::JournalLog::new()
            .unwrap()
            .with_syslog_identifier("taskflow-board-check".to_string());

        let debug = std::env::var("TASKFLOW_DEBUG")
            .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
        taskflow::set_debug_logging(debug);

        log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })).unwrap();
        // Global max must be Debug so taskflow debug logs can pass through when toggled
        log::set_max_level(log::LevelFilter::Debug);
    }

    let config = ClientConfig::from_env();
    let session = SessionStore::load(config.session_path());

    println!("=== TaskFlow Board Check ===\n");
    println!("Backend: {}", config.base_url);

    let client = match ApiClient::new(&config, session.clone()) {
        Ok(c) => c,
        Err(e) => {
            println!("Client error: {}", e);
            std::process::exit(1);
        }
    };
    let auth = AuthApi::new(client.clone());

    // Fresh credentials from the environment win over a stored session.
    let email = std::env::var("TASKFLOW_EMAIL").ok().filter(|s| !s.is_empty());
    let password = std::env::var("TASKFLOW_PASSWORD")
        .ok()
        .filter(|s| !s.is_empty());
    match (email, password) {
        (Some(email), Some(password)) => {
            println!("Logging in as {}", email);
            match auth.login(&LoginPayload { email, password }).await {
                Ok(outcome) if outcome.token.is_some() => {}
                Ok(_) => {
                    println!("  Login answered without a token");
                    std::process::exit(1);
                }
                Err(e) => {
                    println!("  Login failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        _ => {
            if !session.is_authenticated() {
                println!("No stored session; set TASKFLOW_EMAIL and TASKFLOW_PASSWORD to log in.");
                std::process::exit(1);
            }
            println!("Using stored session from {}", config.session_path().display());
        }
    }

    // Round-trip the profile so a revoked token is caught before the report.
    session.refresh_user(&auth).await;
    if session.take_login_required() || !session.is_authenticated() {
        println!("Stored session was rejected; log in again.");
        std::process::exit(1);
    }
    let user = session.user();
    match user {
        Some(ref u) => println!("Signed in as {}\n", u.name),
        None => println!("Signed in (profile endpoint returned no account details)\n"),
    }

    let projects_api = ProjectsApi::new(client.clone());
    let tasks_api = TasksApi::new(client.clone());

    match projects_api.list(None).await {
        Ok(projects) => {
            println!("--- Projects: {} ---", projects.len());
            for project in &projects {
                println!(
                    "  [{}] {} ({}%)",
                    project.status.label(),
                    project.name,
                    project.progress.unwrap_or(0)
                );
            }
        }
        Err(e) => {
            println!("Error listing projects: {}", e);
            std::process::exit(1);
        }
    }

    let tasks = match tasks_api.list(&TaskFilters::default()).await {
        Ok(tasks) => tasks,
        Err(e) => {
            println!("Error listing tasks: {}", e);
            std::process::exit(1);
        }
    };

    let mut board = BoardState::default();
    board.set_tasks(tasks);

    let today = chrono::Local::now().date_naive();
    println!(
        "\n--- Tasks: {} open, {} overdue ---",
        dashboard::open_count(board.tasks()),
        dashboard::overdue_count(board.tasks(), today)
    );

    for (status, count) in board.counts() {
        println!("\n  {} ({}):", status.label(), count);
        for task in board.bucket(status) {
            let draggable = if board.can_drag(user.as_ref(), task.id) {
                "draggable"
            } else {
                "locked"
            };
            let assignee = task.assignee_name.as_deref().unwrap_or("unassigned");
            println!(
                "    [{}] {} — {} ({})",
                task.priority.label(),
                task.title,
                assignee,
                draggable
            );
        }
    }

    println!("\n=== Done ===");
}
