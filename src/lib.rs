//! # BetterReads
//!
//! Client for the BetterReads book tracker: a session store, a book
//! repository, and the view controllers that drive the "My Books" page.
//!
//! ## Modules
//!
//! - [`transport`]: HTTP transport with cookie-based credentials
//! - [`session`]: Observable "who is signed in" state
//! - [`books`]: CRUD façade over the remote book collection
//! - [`views`]: Book list and add-book form controllers
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use betterreads::*;
//! use std::sync::Arc;
//!
//! struct AlwaysYes;
//!
//! impl Confirm for AlwaysYes {
//!     fn confirm(&self, _message: &str) -> bool {
//!         true
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = Arc::new(HttpTransport::new("http://localhost:8080")?);
//!     let mut view = BookListView::new(BookRepository::new(transport), Arc::new(AlwaysYes));
//!
//!     view.load().await?;
//!     for card in view.cards() {
//!         println!("{} {} {}", card.title, card.byline, card.star_line());
//!     }
//!
//!     view.open_add_book();
//!     view.form_mut().set_title("Dune");
//!     view.form_mut().set_author("Herbert");
//!     view.form_mut().set_rating(5);
//!     view.submit_add_book().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod books;
pub mod config;
pub mod error;
pub mod models;
pub mod navigation;
pub mod session;
pub mod transport;
pub mod views;

// Re-export top-level types for convenience
pub use books::BookRepository;
pub use config::{BackendConfig, Config, ConfigError, Environment, LoggingConfig};
pub use error::{ClientError, ClientResult};
pub use models::{Book, BookDraft, User, MAX_RATING};
pub use navigation::Navigator;
pub use session::{SessionState, SessionStore};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
pub use views::{
    AddBookForm, BookCard, BookListView, Confirm, DeleteOutcome, FormState, ViewError, ViewResult,
    ViewStatus,
};
