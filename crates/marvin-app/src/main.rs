mod cli;
mod demos;

use tracing_subscriber::EnvFilter;

/// Load environment variables from a .env file (KEY=VALUE lines).
fn load_dotenv() {
    // Try common locations for .env relative to the workspace
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        // Workspace root — two levels up from crates/marvin-app/
        manifest_dir.join("..").join("..").join(".env"),
        // Current directory
        std::path::PathBuf::from(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

fn init_logging(directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "marvin=info".parse().unwrap()),
            ),
        )
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env file before anything else
    load_dotenv();

    let args = cli::parse();

    // Load config (before logging so the filter can come from it)
    let config = match args.config {
        Some(ref path) => marvin_config::toml_loader::load_from_path(std::path::Path::new(path)),
        None => marvin_config::load_config(),
    }
    .unwrap_or_else(|e| {
        eprintln!("config load failed, using defaults: {e}");
        marvin_config::MarvinConfig::default()
    });

    let directive = args
        .log_level
        .as_deref()
        .unwrap_or(&config.logging.filter);
    init_logging(directive);

    tracing::info!("marvin v{} starting", env!("CARGO_PKG_VERSION"));

    let resume = args.session.as_deref();
    let result = match &args.command {
        cli::Command::Chat { message, stream } => {
            demos::chat(&config, resume, message, *stream).await
        }
        cli::Command::Weather { question } => demos::weather(&config, resume, question).await,
        cli::Command::Database { question } => demos::database(&config, resume, question).await,
        cli::Command::Analyze { question } => demos::analyze(&config, resume, question).await,
        cli::Command::History { session_id } => demos::history(&config, session_id),
        cli::Command::Sessions => demos::sessions(&config),
    };

    // Errors are handled once, here: log and exit non-zero. No retries.
    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
