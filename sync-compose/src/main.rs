//! sync-compose - Compose a social media post from the command line
//!
//! Drives one composition through the Social Sync composer and prints the
//! finished publish request on stdout.

use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use libsocialsync::compose::panel::SidePanelTab;
use libsocialsync::compose::search::SearchStatus;
use libsocialsync::error::PublishError;
use libsocialsync::logging::LoggingConfig;
use libsocialsync::search::unsplash::UnsplashSearch;
use libsocialsync::{
    AccountId, AccountRegistry, Composer, ComposerConfig, Config, ContentType, PublishRequest,
    Publisher, Result, SocialSyncError, StaticAccounts,
};

#[derive(Parser, Debug)]
#[command(name = "sync-compose")]
#[command(version)]
#[command(about = "Compose a social media post from the command line")]
#[command(long_about = "\
sync-compose - Compose a social media post from the command line

DESCRIPTION:
    sync-compose builds one post: text, an optional image from the image
    search provider, an optional schedule and the destination accounts.
    The finished publish request is printed on stdout.

USAGE EXAMPLES:
    # Publish now to one account
    sync-compose \"Hello world\" -a ig-1

    # Attach the second result for 'sunset' and schedule it
    sync-compose \"Golden hour\" --image sunset --pick 2 \\
        --date 2030-03-15 --time 14:05 -a ig-1 -a li-1

    # Reel audience, JSON output
    echo \"Behind the scenes\" | sync-compose --reel -a ig-1 --format json

    # Show a side panel instead of submitting
    sync-compose \"Draft\" --panel tools

CONFIGURATION:
    Configuration file: ~/.config/socialsync/config.toml

    Override with environment variables:
        SOCIALSYNC_CONFIG        - Path to config file
        SOCIALSYNC_UNSPLASH_KEY  - Image search access key
        SOCIALSYNC_LOG_FORMAT    - Log format (text, json, pretty)
        SOCIALSYNC_LOG_LEVEL     - Log level when not verbose

EXIT CODES:
    0 - Success
    1 - Publish failed
    2 - Configuration error
    3 - Invalid input (bad schedule, no accounts selected, etc.)
")]
struct Cli {
    /// Post text (reads from stdin if not provided)
    text: Option<String>,

    /// Search for images and attach one (skipped with a warning if the search fails)
    #[arg(long, value_name = "QUERY")]
    image: Option<String>,

    /// Attach the Nth search result instead of the first (1-based)
    #[arg(long, value_name = "N", requires = "image")]
    pick: Option<usize>,

    /// Schedule date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,

    /// Schedule time (HH:MM, 24-hour)
    #[arg(long)]
    time: Option<String>,

    /// Compose a reel instead of a post
    #[arg(long)]
    reel: bool,

    /// Toggle a destination account (repeatable)
    #[arg(short, long = "account", value_name = "ID")]
    accounts: Vec<String>,

    /// List candidate accounts and exit
    #[arg(long)]
    list_accounts: bool,

    /// Print a side panel (preview, schedule, tools, ai-assistant) instead of submitting
    #[arg(long, value_name = "TAB")]
    panel: Option<String>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Path to an alternate config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = SocialSyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(SocialSyncError::InvalidInput(format!(
                "Invalid format '{}'. Must be 'text' or 'json'",
                s
            ))),
        }
    }
}

/// Prints each request on stdout
struct StdoutPublisher {
    format: OutputFormat,
}

impl Publisher for StdoutPublisher {
    fn publish(&self, request: &PublishRequest) -> std::result::Result<(), PublishError> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(request)
                    .map_err(|e| PublishError::Rejected(e.to_string()))?;
                println!("{}", json);
            }
            OutputFormat::Text => print_request_text(request),
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    LoggingConfig::from_env("warn", cli.verbose).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse()?;

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let registry = Arc::new(StaticAccounts::new(config.accounts.clone()));

    if cli.list_accounts {
        output_accounts(registry.as_ref(), format);
        return Ok(());
    }

    let mut composer = Composer::new(registry.clone(), ComposerConfig::from_config(&config));

    composer.set_text(get_text(cli.text)?);

    if cli.reel {
        composer.set_content_type(ContentType::Reel);
    }

    if let Some(query) = &cli.image {
        attach_image(&mut composer, &config, query, cli.pick.unwrap_or(1)).await?;
    }

    if cli.date.is_some() || cli.time.is_some() {
        let date = cli.date.as_deref().unwrap_or_default();
        let time = cli.time.as_deref().unwrap_or_default();
        composer.open_schedule_dialog();
        composer.confirm_schedule(date, time)?;
    }

    let content_type = composer.content_type();
    for id in cli.accounts {
        let id = AccountId::new(id);
        if registry.find(&id).is_none() {
            tracing::warn!(account = %id, "account is not in the registry");
        }
        composer.toggle_account(content_type, id);
    }

    if let Some(tab) = &cli.panel {
        let tab: SidePanelTab = tab.parse().map_err(SocialSyncError::InvalidInput)?;
        composer.set_active_tab(tab);
        output_panel(&composer, format)?;
        return Ok(());
    }

    composer.submit(&StdoutPublisher { format })?;
    Ok(())
}

/// Take text from the argument, or from stdin when it is piped
fn get_text(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if atty::is(atty::Stream::Stdin) {
        return Ok(String::new());
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| SocialSyncError::InvalidInput(format!("Failed to read stdin: {}", e)))?;
    Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
}

/// Search for `query` and attach the `pick`th result (1-based)
///
/// A failed or empty search never blocks the post: it is logged and the
/// post goes out without an image. Only an out-of-range `pick` is an error.
async fn attach_image(
    composer: &mut Composer,
    config: &Config,
    query: &str,
    pick: usize,
) -> Result<()> {
    if pick == 0 {
        return Err(SocialSyncError::InvalidInput(
            "--pick is 1-based and must be at least 1".to_string(),
        ));
    }

    let provider = match UnsplashSearch::from_config(&config.search) {
        Ok(provider) => provider,
        Err(error) => {
            tracing::warn!(%error, "image search unavailable, posting without an image");
            return Ok(());
        }
    };

    composer.open_image_search();
    composer.set_search_query(query);

    match composer.search_images(&provider).await {
        SearchStatus::Results(count) => {
            if pick > count {
                return Err(SocialSyncError::InvalidInput(format!(
                    "--pick {} is out of range (search returned {} image{})",
                    pick,
                    count,
                    if count == 1 { "" } else { "s" }
                )));
            }
            let id = composer
                .search_session()
                .and_then(|session| session.results().get(pick - 1))
                .map(|image| image.id.clone())
                .unwrap_or_default();
            composer.select_search_result(&id);
        }
        SearchStatus::NoResults => {
            tracing::warn!(query, "no images found, posting without an image");
            composer.close_image_search();
        }
        SearchStatus::Idle | SearchStatus::Searching => {
            tracing::warn!("image query is empty, posting without an image");
            composer.close_image_search();
        }
    }
    Ok(())
}

fn output_accounts(registry: &dyn AccountRegistry, format: OutputFormat) {
    let accounts = registry.accounts();
    match format {
        OutputFormat::Json => {
            let json: Vec<serde_json::Value> = accounts
                .iter()
                .map(|a| {
                    serde_json::json!({
                        "id": a.id,
                        "platform": a.platform,
                        "display_name": a.display_name,
                    })
                })
                .collect();
            println!("{}", serde_json::Value::Array(json));
        }
        OutputFormat::Text => {
            for account in accounts {
                println!("{} | {} | {}", account.id, account.platform, account.display_name);
            }
        }
    }
}

fn output_panel(composer: &Composer, format: OutputFormat) -> Result<()> {
    let view = composer.panel_view();
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&view).map_err(|e| {
                SocialSyncError::InvalidInput(format!("Failed to encode panel: {}", e))
            })?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", view.render()),
    }
    Ok(())
}

fn print_request_text(request: &PublishRequest) {
    println!("id: {}", request.id);
    match &request.schedule {
        Some(schedule) => println!("mode: scheduled ({})", schedule.summary()),
        None => println!("mode: now"),
    }
    println!("type: {}", request.content_type);
    let accounts: Vec<&str> = request.account_ids.iter().map(AccountId::as_str).collect();
    println!("accounts: {}", accounts.join(", "));
    if !request.images.is_empty() {
        let images: Vec<&str> = request.images.iter().map(|i| i.id.as_str()).collect();
        println!("images: {}", images.join(", "));
    }
    println!("text: {}", request.text);
}
