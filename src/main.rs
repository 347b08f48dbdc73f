//! BetterReads CLI
//!
//! Terminal front end for the BetterReads book tracker:
//! - Show who is signed in, sign in and out
//! - List, show, add and delete books
//! - Generate a config file

use anyhow::Context;
use betterreads::config::generate_default_config;
use betterreads::*;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "betterreads")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Keep track of the books you have read")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/betterreads/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overriding the config file
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the signed-in user
    Whoami,

    /// Sign in through the backend
    Login,

    /// End the current session
    Logout,

    /// List your books
    List,

    /// Show a single book
    Show {
        /// Book id
        id: String,
    },

    /// Add a book
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        author: String,
        /// Rating from 0 to 5
        #[arg(short, long, default_value = "0")]
        rating: u8,
        #[arg(short, long)]
        comment: Option<String>,
    },

    /// Delete a book
    Delete {
        /// Book id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Prints where to go instead of opening a browser
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect(&self, url: &str) {
        println!("Open this URL in your browser to sign in:");
        println!("  {}", url);
        println!();
        println!("Then copy the session cookie into BETTERREADS_SESSION_COOKIE");
        println!("or `session_cookie` in the [backend] section of your config.");
    }

    fn reload(&self) {
        println!("Signed out.");
    }
}

/// Asks on stdin, defaulting to "no"
struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(url) = &cli.backend_url {
        config.backend.base_url = Some(url.clone());
    }

    init_logging(&config.logging);

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Wrote default config to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let base_url = config.backend.resolved_base_url()?;
    tracing::info!(
        environment = ?config.backend.environment,
        base_url = %base_url,
        "BetterReads v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut transport = HttpTransport::new(&base_url)?;
    if let Some(cookie) = &config.backend.session_cookie {
        transport = transport.with_session_cookie(cookie);
    }
    let transport: Arc<dyn Transport> = Arc::new(transport);
    let navigator: Arc<dyn Navigator> = Arc::new(TerminalNavigator);
    let json = cli.format == "json";

    match cli.command {
        Commands::Whoami => {
            let session = SessionStore::connect(transport, navigator).await;
            match session.current() {
                SessionState::Authenticated(user) if json => {
                    println!("{}", serde_json::to_string_pretty(&user)?);
                }
                SessionState::Authenticated(user) => {
                    println!("{} <{}>", user.name, user.email);
                    if !user.picture.is_empty() {
                        println!("Avatar: {}", user.picture);
                    }
                }
                _ => {
                    println!("Not signed in.");
                    println!("Run `betterreads login` to sign in.");
                }
            }
        }

        Commands::Login => {
            SessionStore::new(transport, navigator).login();
        }

        Commands::Logout => {
            SessionStore::new(transport, navigator).logout().await;
        }

        Commands::List => {
            let mut view = BookListView::new(BookRepository::new(transport), Arc::new(AssumeYes));
            view.load().await.context("Failed to load books")?;
            print_books(&view, json)?;
        }

        Commands::Show { id } => {
            let book = BookRepository::new(transport)
                .get(&id)
                .await
                .with_context(|| format!("Failed to fetch book {}", id))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&book)?);
            } else {
                print_card(&BookCard::from_book(&book));
            }
        }

        Commands::Add {
            title,
            author,
            rating,
            comment,
        } => {
            let mut view = BookListView::new(BookRepository::new(transport), Arc::new(AssumeYes));
            view.open_add_book();
            *view.form_mut().draft_mut() = BookDraft {
                title,
                author,
                rating,
                comment,
            };

            let book = view
                .submit_add_book()
                .await
                .context("Failed to add book")?;
            if !json {
                println!("Added \"{}\" ({})", book.title, book.id);
                println!();
            }
            print_books(&view, json)?;
        }

        Commands::Delete { id, yes } => {
            let confirm: Arc<dyn Confirm> = if yes {
                Arc::new(AssumeYes)
            } else {
                Arc::new(PromptConfirm)
            };
            let mut view = BookListView::new(BookRepository::new(transport), confirm);

            match view
                .delete_book(&id)
                .await
                .with_context(|| format!("Failed to delete book {}", id))?
            {
                DeleteOutcome::Deleted => {
                    if !json {
                        println!("Deleted {}", id);
                        println!();
                    }
                    print_books(&view, json)?;
                }
                DeleteOutcome::Cancelled => println!("Cancelled."),
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("betterreads={}", logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_books(view: &BookListView, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view.books())?);
        return Ok(());
    }

    if let ViewStatus::Failed(message) = view.status() {
        eprintln!("Could not refresh the list: {}", message);
        return Ok(());
    }

    let cards = view.cards();
    if cards.is_empty() {
        println!("No books yet.");
        println!();
        println!("Add your first one with:");
        println!("  betterreads add --title \"Dune\" --author \"Frank Herbert\" --rating 5");
        return Ok(());
    }

    println!("My Books");
    println!("{}", "-".repeat(40));
    for card in cards {
        print_card(&card);
        println!();
    }
    Ok(())
}

fn print_card(card: &BookCard) {
    println!("{}", card.title);
    println!("  {}", card.byline);
    println!("  {}", card.star_line());
    if let Some(comment) = &card.comment {
        println!("  \"{}\"", comment);
    }
    println!("  id: {}", card.id);
}
