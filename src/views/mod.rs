//! View Controllers
//!
//! Front-end independent controllers for the book list and the add-book
//! form. They turn user actions into repository calls and keep the state a
//! front end renders.
//!
//! ## Flow
//!
//! 1. [`BookListView::load`] fetches the full list
//! 2. The add-book form opens, collects a draft and submits it
//! 3. After any successful create or delete the list is fetched again

mod add_book;
mod book_list;

pub use add_book::{AddBookForm, FormState};
pub use book_list::{BookCard, BookListView, DeleteOutcome, ViewStatus};

use thiserror::Error;

use crate::error::ClientError;

/// Prompt shown before a book is deleted
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this book?";

/// Asks the user to confirm a destructive action
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Errors raised by view controllers
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Add-book form is not open")]
    FormClosed,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Result type for view actions
pub type ViewResult<T> = Result<T, ViewError>;
