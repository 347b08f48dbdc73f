//! Add-book form
//!
//! Two states only: closed and open. Opening shows an empty draft;
//! cancelling or a successful submit closes the form and resets the draft.
//! A failed submit keeps the form open with the draft intact and an error
//! message the front end can show.

use crate::books::BookRepository;
use crate::models::{Book, BookDraft};

use super::{ViewError, ViewResult};

/// Visibility of the add-book form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Closed,
    Open,
}

/// Draft-holding form controller
#[derive(Debug, Default)]
pub struct AddBookForm {
    state: FormState,
    draft: BookDraft,
    error: Option<String>,
}

impl AddBookForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == FormState::Open
    }

    pub fn open(&mut self) {
        self.state = FormState::Open;
        self.error = None;
    }

    /// Close without submitting
    pub fn cancel(&mut self) {
        self.close();
    }

    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    /// Field binding for front ends that edit the draft in place
    pub fn draft_mut(&mut self) -> &mut BookDraft {
        &mut self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.draft.author = author.into();
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.draft.rating = rating;
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.draft.comment = Some(comment.into());
    }

    /// Message from the last failed submit
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Send the draft to the backend
    ///
    /// On success the form closes and resets; the caller refreshes the list.
    pub async fn submit(&mut self, books: &BookRepository) -> ViewResult<Book> {
        if !self.is_open() {
            return Err(ViewError::FormClosed);
        }
        self.error = None;

        match books.create(&self.draft).await {
            Ok(book) => {
                self.close();
                Ok(book)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create book");
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    fn close(&mut self) {
        self.state = FormState::Closed;
        self.draft = BookDraft::default();
        self.error = None;
    }
}
