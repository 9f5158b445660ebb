//! Novarch Admin CLI
//!
//! Command-line interface for the Novarchism content backend:
//! - Sign in / sign out
//! - List, create, edit, and delete entries
//! - Browse the public published entries

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use novarch_admin::{
    config, render, AdminClient, ApiError, Config, Entry, EntryCategory, EntryForm, Session,
    TokenStore,
};

#[derive(Parser)]
#[command(name = "novarch-admin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Admin client for the Novarchism content backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend origin (overrides config and NOVARCH_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json, html)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and load the entry list
    Login {
        /// Account email
        email: String,
        /// Password (prompted on stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and remove the stored token
    Logout,

    /// Show session state and backend health
    Status,

    /// List all entries
    List,

    /// Create a new entry
    New {
        #[command(flatten)]
        fields: EntryFields,
    },

    /// Edit an existing entry, prefilled from the current list
    Edit {
        /// Entry id, as shown in the list
        id: Uuid,
        #[command(flatten)]
        fields: EntryFields,
    },

    /// Delete an entry
    Delete {
        /// Entry id, as shown in the list
        id: Uuid,
    },

    /// List published entries (no sign-in required)
    Published {
        /// Filter by category
        #[arg(long)]
        category: Option<EntryCategory>,
    },

    /// Fetch a published entry by slug (no sign-in required)
    View {
        /// Entry slug
        slug: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Entry editor fields. All optional: anything left out keeps the form's
/// current value (blank for `new`, the fetched entry's value for `edit`).
/// Validation is the backend's job; whatever is submitted gets sent.
#[derive(Args)]
pub struct EntryFields {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub subtitle: Option<String>,

    #[arg(long)]
    pub slug: Option<String>,

    /// doctrine, creed, ritual, prayer, event, testimony, or other
    #[arg(long)]
    pub category: Option<EntryCategory>,

    #[arg(long)]
    pub summary: Option<String>,

    /// Inline HTML body
    #[arg(long)]
    pub content_html: Option<String>,

    /// Read the HTML body from a file instead
    #[arg(long, conflicts_with = "content_html")]
    pub content_file: Option<PathBuf>,

    #[arg(long)]
    pub content_markdown: Option<String>,

    /// Mark the entry as published
    #[arg(long)]
    pub publish: bool,

    /// Mark the entry as unpublished
    #[arg(long, conflicts_with = "publish")]
    pub unpublish: bool,

    /// Publication timestamp, YYYY-MM-DDTHH:MM (UTC)
    #[arg(long)]
    pub published_at: Option<String>,
}

impl EntryFields {
    fn apply(self, form: &mut EntryForm) -> anyhow::Result<()> {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(subtitle) = self.subtitle {
            form.subtitle = subtitle;
        }
        if let Some(slug) = self.slug {
            form.slug = slug;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(summary) = self.summary {
            form.summary = summary;
        }
        if let Some(html) = self.content_html {
            form.content_html = html;
        } else if let Some(path) = self.content_file {
            form.content_html = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        }
        if let Some(markdown) = self.content_markdown {
            form.content_markdown = markdown;
        }
        if self.publish {
            form.is_published = true;
        }
        if self.unpublish {
            form.is_published = false;
        }
        if let Some(published_at) = self.published_at {
            form.published_at = published_at;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_default();
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config);

    let token_path = match config.auth.token_file.clone() {
        Some(path) => path,
        None => TokenStore::default_path()?,
    };
    let mut session = Session::load(TokenStore::new(token_path));
    let client = AdminClient::new(&config.api);

    match cli.command {
        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_password()?,
            };

            match client.login(&email, &password).await {
                Ok(token) => {
                    session.sign_in(token)?;
                    println!("Signed in as {email}.");
                    println!();
                    // Mirror the dashboard: show the entry list right away.
                    show_entries(&client, &session, &cli.format).await;
                }
                Err(e) => fail(&e),
            }
        }

        Commands::Logout => {
            session.sign_out()?;
            println!("Signed out.");
        }

        Commands::Status => {
            println!("novarch-admin v{}", env!("CARGO_PKG_VERSION"));
            println!();
            match session.token() {
                Some(_) => println!("Session: signed in"),
                None => println!("Session: signed out"),
            }

            match client.health().await {
                Ok(()) => println!("Backend: ok ({})", config.api.base_url),
                Err(e) => {
                    eprintln!("Backend: unreachable at {}", config.api.base_url);
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::List => {
            if !session.is_signed_in() {
                fail(&ApiError::NotSignedIn);
            }
            match fetch_entries(&client, &session).await {
                Ok(entries) => print_entries(&entries, &cli.format),
                Err(e) => fail(&e),
            }
        }

        Commands::New { fields } => {
            let mut form = EntryForm::default();
            fields.apply(&mut form)?;

            match client.submit(session.token(), &form).await {
                Ok(entry) => {
                    println!("Saved. ({})", entry.id);
                    println!();
                    show_entries(&client, &session, &cli.format).await;
                }
                Err(e) => fail(&e),
            }
        }

        Commands::Edit { id, fields } => {
            let Some(token) = session.token() else {
                fail(&ApiError::NotSignedIn)
            };

            // Prefill from the entry as it appears in the freshly fetched
            // list, then apply whatever fields were given.
            let entries = match client.list_entries(token).await {
                Ok(entries) => entries,
                Err(e) => fail(&e),
            };
            let Some(entry) = entries.iter().find(|e| e.id == id) else {
                fail(&ApiError::NotFound)
            };

            let mut form = EntryForm::default();
            form.populate(entry);
            println!("{}", form.status);
            fields.apply(&mut form)?;

            match client.submit(session.token(), &form).await {
                Ok(_) => {
                    println!("Saved.");
                    println!();
                    show_entries(&client, &session, &cli.format).await;
                }
                Err(e) => fail(&e),
            }
        }

        Commands::Delete { id } => {
            let Some(token) = session.token() else {
                fail(&ApiError::NotSignedIn)
            };
            match client.delete_entry(token, id).await {
                Ok(()) => println!("Deleted {id}."),
                Err(e) => fail(&e),
            }
        }

        Commands::Published { category } => {
            match client.published_entries(category).await {
                Ok(entries) => print_entries(&entries, &cli.format),
                Err(e) => fail(&e),
            }
        }

        Commands::View { slug } => match client.entry_by_slug(&slug).await {
            Ok(entry) => print_entry(&entry, &cli.format),
            Err(e) => fail(&e),
        },

        Commands::Config { output } => {
            let config = config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Initialize logging from config; RUST_LOG takes precedence over the
/// configured level.
fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| format!("novarch_admin={}", config.logging.level)),
    );

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Print a user-facing error and exit. No failure is retried.
fn fail(error: &ApiError) -> ! {
    eprintln!("{error}");
    std::process::exit(1);
}

fn prompt_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn fetch_entries(client: &AdminClient, session: &Session) -> Result<Vec<Entry>, ApiError> {
    let token = session.token().ok_or(ApiError::NotSignedIn)?;
    client.list_entries(token).await
}

/// Load and print the entry list; list failures are reported in place of
/// the list without failing the surrounding command.
async fn show_entries(client: &AdminClient, session: &Session, format: &str) {
    match fetch_entries(client, session).await {
        Ok(entries) => print_entries(&entries, format),
        Err(e) => eprintln!("{e}"),
    }
}

fn print_entries(entries: &[Entry], format: &str) {
    match format {
        "json" => match serde_json::to_string_pretty(entries) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to encode entries: {e}"),
        },
        "html" => print!("{}", render::render_html(&render::to_rows(entries))),
        _ => print!("{}", render::render_table(&render::to_rows(entries))),
    }
}

fn print_entry(entry: &Entry, format: &str) {
    if format == "json" {
        match serde_json::to_string_pretty(entry) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to encode entry: {e}"),
        }
        return;
    }

    println!("{}", entry.title);
    if let Some(subtitle) = &entry.subtitle {
        println!("{subtitle}");
    }
    println!();
    println!("Slug:      {}", entry.slug);
    println!("Category:  {}", entry.category);
    if let Some(published_at) = entry.published_at {
        println!("Published: {}", published_at.format("%Y-%m-%d %H:%M"));
    }
    if let Some(summary) = &entry.summary {
        println!();
        println!("{summary}");
    }
    println!();
    println!("{}", entry.content_html);
}
