use std::net::SocketAddr;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use usradm::api::{HttpUserApi, UserApi};
use usradm::config::{self, PAGE_SIZE};
use usradm::models::{AppState, Filter, PageRequest, Role, RoleFilter, StatusFilter, UserRow};
use usradm::render::Pagination;
use usradm::routes::build_router;
use usradm::utils::{format_balance, format_date_time};

fn build_state_from_env(env_file: Option<&str>) -> AppState {
    config::load_env_file(env_file);

    let client = match reqwest::Client::builder()
        .user_agent(format!("usradm/{}", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", yansi::Paint::red("Failed to create HTTP client"), e);
            process::exit(1);
        }
    };
    let api = HttpUserApi::new(client, config::get_api_base_url(), config::get_api_token());
    AppState::new(api)
}

async fn start_server(mut state: AppState, host: &str, port: u16, stylesheet: Option<String>) {
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                eprintln!("{} {}: {}", yansi::Paint::red("Failed to read custom stylesheet at"), path, e);
                process::exit(1);
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };
    let backend = state.api_base_url.clone();
    let app = build_router(state);
    tracing::info!(%addr, %backend, "Starting user admin panel");
    println!("{} {}", yansi::Paint::new("Panel running on").green(), yansi::Paint::new(format!("http://{}/users", addr)).cyan());
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!("{}: {}\n{}", yansi::Paint::new(format!("Failed to bind to {}", addr)).red(), e, yansi::Paint::new("Please stop any process using this port, or start the server with a different --port value.").yellow());
            process::exit(1);
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn dash(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

fn status_label(row: &UserRow) -> &'static str {
    if row.is_active() { "Active" } else { "Disabled" }
}

fn print_users(rows: &[UserRow]) {
    if rows.is_empty() {
        println!("(no data)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["ID", "Username", "Phone", "Email", "Balance", "Status", "Role", "Created"]);
    for row in rows {
        table.add_row(vec![
            row.id.to_string(),
            row.username.clone(),
            dash(&row.phone),
            dash(&row.email),
            format_balance(row.balance),
            status_label(row).to_string(),
            Role::from_code(row.role).label().to_string(),
            format_date_time(row.create_time.as_deref()),
        ]);
    }
    println!("\n{table}");
}

fn print_user_detail(row: &UserRow) {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["ID".to_string(), row.id.to_string()]);
    table.add_row(vec!["Username".to_string(), row.username.clone()]);
    table.add_row(vec!["Phone".to_string(), dash(&row.phone)]);
    table.add_row(vec!["Email".to_string(), dash(&row.email)]);
    table.add_row(vec!["Balance".to_string(), format_balance(row.balance)]);
    table.add_row(vec!["Status".to_string(), status_label(row).to_string()]);
    table.add_row(vec!["Role".to_string(), Role::from_code(row.role).label().to_string()]);
    table.add_row(vec!["Created".to_string(), format_date_time(row.create_time.as_deref())]);
    println!("\n{table}\n");
}

fn print_pagination(p: &Pagination, shown: usize) {
    if !p.is_visible() {
        println!("\n{}", yansi::Paint::new(format!("Showing {} of {} users", shown, p.total)).dim());
        return;
    }
    let window = p
        .window()
        .map(|n| if n == p.current_page { format!("[{}]", n) } else { n.to_string() })
        .collect::<Vec<_>>()
        .join(" ");
    println!("\n{}", yansi::Paint::new(format!(
        "Page {} of {} | Showing {} of {} total users | {}",
        p.current_page, p.total_pages, shown, p.total, window
    )).cyan());
    if !p.prev_disabled() {
        println!(
            "{} {}",
            yansi::Paint::new("←").bold(),
            yansi::Paint::new(format!("Previous page: usradm users list --page {}", p.current_page - 1)).dim()
        );
    }
    if !p.next_disabled() {
        println!(
            "{} {}",
            yansi::Paint::new("→").bold(),
            yansi::Paint::new(format!("Next page: usradm users list --page {}", p.current_page + 1)).dim()
        );
    }
}

fn fail(context: &str, e: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", yansi::Paint::new(context).red(), e);
    process::exit(1);
}

#[derive(Parser)]
#[command(
    name = "usradm",
    author,
    version,
    about = "User administration panel",
    long_about = r#"usradm: browse user accounts and manage their roles.

Serves a web panel backed by the user API, and exposes the same list/role operations on the command line. Configure the backend with API_BASE_URL (and optionally API_TOKEN) in the environment or an --env-file.

Examples:
  1) Run the panel:
      usradm serve --host 127.0.0.1 --port 5000
  2) List users:
      usradm users list --status active --page 2
  3) Promote a user:
      usradm users set-role 42 admin
"#,
    after_help = "Use `usradm <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web panel
    Serve {
        /// Host to bind to (defaults to PANEL_HOST or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (defaults to PANEL_PORT or 5000)
        #[arg(long)]
        port: Option<u16>,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Validate configuration and backend connectivity
    #[command(about = "Validate configuration and ensure API connectivity.", long_about = "Validate the environment used by the panel and ping the user backend by requesting the user count.")]
    CheckConfig { env_file: Option<String> },
    /// Browse and manage users through the backend
    Users {
        #[command(subcommand)]
        sub: UserCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    #[command(about = "List users", long_about = "List one page of users matching the optional filters, followed by the pagination summary.")]
    List {
        /// Username to search for
        #[arg(long, default_value = "")]
        username: String,
        /// Only accounts with this status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Only accounts with this role
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
        /// Page number (1-indexed)
        #[arg(long, short = 'p', default_value_t = 1)]
        page: u32,
    },
    #[command(about = "Show one user", long_about = "Show the account returned by the backend for a user ID.")]
    Show { user_id: i64 },
    #[command(about = "Change a user's role", long_about = "Set the role of a user to `admin` or `normal`.")]
    SetRole {
        user_id: i64,
        #[arg(value_enum)]
        role: RoleArg,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StatusArg {
    Active,
    Disabled,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => StatusFilter::Active,
            StatusArg::Disabled => StatusFilter::Disabled,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RoleArg {
    Admin,
    Normal,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Admin => Role::Admin,
            RoleArg::Normal => Role::Normal,
        }
    }
}

impl From<RoleArg> for RoleFilter {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Admin => RoleFilter::Admin,
            RoleArg::Normal => RoleFilter::Normal,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        usradm::api::set_silent(true);
    }

    let command = match cli.command {
        Some(c) => c,
        None => Commands::Serve {
            host: None,
            port: None,
            env_file: None,
            stylesheet: None,
        },
    };

    match command {
        Commands::Serve {
            host,
            port,
            env_file,
            stylesheet,
        } => {
            let state = build_state_from_env(env_file.as_deref());
            let host = host.unwrap_or_else(config::get_panel_host);
            let port = match port {
                Some(p) => p,
                None => config::get_panel_port().unwrap_or_else(|e| fail("Invalid configuration", e)),
            };
            start_server(state, &host, port, stylesheet).await;
        }
        Commands::CheckConfig { env_file } => {
            let state = build_state_from_env(env_file.as_deref());
            if let Err(e) = config::get_panel_port() {
                fail("Invalid configuration", e);
            }
            println!("{} {}", yansi::Paint::new("Backend:").bold(), state.api_base_url);
            match state.api.count_users(&Filter::default()).await {
                Ok(total) => {
                    println!("{}", yansi::Paint::new(format!("Configuration looks valid ({} users)", total)).green());
                }
                Err(e) => fail("Configuration appears invalid", e),
            }
        }
        Commands::Users { sub } => {
            let state = build_state_from_env(None);
            match sub {
                UserCommands::List { username, status, role, page } => {
                    let filter = Filter::new(
                        username.trim(),
                        status.map(StatusFilter::from).unwrap_or_default(),
                        role.map(RoleFilter::from).unwrap_or_default(),
                    );
                    let request = PageRequest::new(page);
                    let rows = state
                        .api
                        .list_users(&filter, request)
                        .await
                        .unwrap_or_else(|e| fail("Failed to load user list", e));
                    print_users(&rows);
                    let total = state
                        .api
                        .count_users(&filter)
                        .await
                        .unwrap_or_else(|e| fail("Failed to load user count", e));
                    print_pagination(&Pagination::new(total, request.page, PAGE_SIZE), rows.len());
                    println!();
                }
                UserCommands::Show { user_id } => {
                    let row = state
                        .api
                        .get_user(user_id)
                        .await
                        .unwrap_or_else(|e| fail("Failed to load user", e));
                    print_user_detail(&row);
                }
                UserCommands::SetRole { user_id, role } => {
                    let role = Role::from(role);
                    match state.api.update_user_role(user_id, role).await {
                        Ok(()) => println!(
                            "{} {} {}",
                            yansi::Paint::new("User").green(),
                            user_id,
                            yansi::Paint::new(format!("is now {}", role.label())).green()
                        ),
                        Err(e) => fail("Failed to update role", e),
                    }
                }
            }
        }
    }
}
