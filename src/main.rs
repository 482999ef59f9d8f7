use std::process::ExitCode;

use chrono::Local;
use clap::{
    Parser,
    Subcommand,
};
use spacestats::{
    api::ApiClient,
    capture::{
        self,
        CredentialStore,
    },
    core::StatsError,
    gui,
    session::DashboardSession,
    settings::SettingsData,
    summary,
};
use tokio::runtime::Runtime;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "spacestats", version, about = "Dashboard and capture client for memorized terms")]
struct Cli {
    /// Base url of the stats server (get_tasks / get_activity)
    #[arg(long, env = "SPACESTATS_STATS_URL", global = true)]
    stats_url: Option<String>,

    /// Base url of the api server (authorize / add_term)
    #[arg(long, env = "SPACESTATS_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the dashboard window (default).
    Dashboard {
        #[arg(long, env = "SPACESTATS_CHAT_ID")]
        chat_id: Option<String>,
    },
    /// Fetch a chat's terms and activity once and print them.
    Summary {
        #[arg(long, env = "SPACESTATS_CHAT_ID")]
        chat_id: Option<String>,
        /// Keep rows where any field contains this text
        #[arg(long)]
        search: Option<String>,
        /// Column key to sort by; repeat to toggle direction (e.g. --sort sdate --sort sdate)
        #[arg(long)]
        sort: Vec<String>,
        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Exchange an API key for credentials and store them.
    Login { api_key: String },
    /// Forget the stored credentials.
    Logout,
    /// Add a term through the api server.
    Capture { term: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), StatsError> {
    let command = cli.command.unwrap_or(Command::Dashboard { chat_id: None });
    let chat_override = match &command {
        Command::Dashboard { chat_id } | Command::Summary { chat_id, .. } => chat_id.clone(),
        _ => None,
    };
    let settings = SettingsData::load().with_overrides(cli.stats_url, cli.api_url, chat_override);

    match command {
        Command::Dashboard { .. } => gui::run_dashboard(settings),
        Command::Summary { search, sort, json, .. } => {
            run_summary(&settings, search, &sort, json)
        }
        Command::Login { api_key } => {
            let api = ApiClient::from_settings(&settings)?;
            let mut store = CredentialStore::open_default_or_logged_out();
            let credentials = runtime()?
                .block_on(capture::login(&api, &mut store, &api_key))
                .map_err(|e| StatsError::Custom(e.to_string()))?;
            println!(
                "Logged in (chat {}), credentials saved to {}",
                credentials.chat_id,
                store.path().display()
            );
            Ok(())
        }
        Command::Logout => {
            let mut store = CredentialStore::open_default_or_logged_out();
            capture::logout(&mut store)?;
            println!("Logged out");
            Ok(())
        }
        Command::Capture { term } => {
            let api = ApiClient::from_settings(&settings)?;
            let store = CredentialStore::open_default_or_logged_out();
            runtime()?
                .block_on(capture::capture(&api, &store, &term))
                .map_err(|e| StatsError::Custom(e.to_string()))
        }
    }
}

fn runtime() -> Result<Runtime, StatsError> {
    Runtime::new().map_err(|e| StatsError::Runtime(e.to_string()))
}

fn run_summary(
    settings: &SettingsData,
    search: Option<String>,
    sort: &[String],
    json: bool,
) -> Result<(), StatsError> {
    let chat_id = settings
        .chat_id
        .clone()
        .ok_or_else(|| StatsError::Custom("No chat id given (use --chat-id)".to_string()))?;
    let api = ApiClient::from_settings(settings)?;

    let mut session = DashboardSession::mount(chat_id.as_str());
    let (tasks, activity) = runtime()?.block_on(async {
        tokio::join!(api.get_tasks(&chat_id), api.get_activity(&chat_id))
    });
    session.apply_tasks(tasks.map_err(|e| e.to_string()));
    session.apply_activity(activity.map_err(|e| e.to_string()));

    if let Some(query) = search {
        session.grid.set_filter(query);
    }
    for key in sort {
        session.grid.toggle_sort_key(key);
    }

    let view = session.grid.derive();

    if json {
        let payload = serde_json::json!({
            "tasks": view,
            "charts": session.charts(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print!("{}", summary::render_grid(&view, &Local::now()));
        if let Some(charts) = session.charts() {
            println!();
            print!("{}", summary::render_totals(charts));
        }
    }

    for message in [
        summary::describe_failure("Terms", session.tasks_state()),
        summary::describe_failure("Activity", session.activity_state()),
    ]
    .into_iter()
    .flatten()
    {
        eprintln!("{message}");
    }

    Ok(())
}
