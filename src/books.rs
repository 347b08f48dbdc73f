//! Book Repository
//!
//! Thin CRUD façade over `/api/books`. There is no local cache: every call
//! is exactly one request, and every failure is returned to the caller as-is.

use std::sync::Arc;

use crate::error::{ClientError, ClientResult};
use crate::models::{Book, BookDraft};
use crate::transport::{ApiRequest, Transport};

const BOOKS_PATH: &str = "/api/books";

/// Remote book collection for the current session
#[derive(Clone)]
pub struct BookRepository {
    transport: Arc<dyn Transport>,
}

impl BookRepository {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch every book, in the order the backend returns them
    pub async fn list(&self) -> ClientResult<Vec<Book>> {
        let response = self
            .transport
            .send(ApiRequest::get(BOOKS_PATH))
            .await?
            .error_for_status(BOOKS_PATH)?;
        let books: Vec<Book> = response.json()?;
        tracing::debug!(count = books.len(), "Fetched book list");
        Ok(books)
    }

    /// Fetch a single book
    pub async fn get(&self, id: &str) -> ClientResult<Book> {
        let path = book_path(id);
        let response = self
            .transport
            .send(ApiRequest::get(&path))
            .await?
            .error_for_status(&path)?;
        response.json()
    }

    /// Create a book and return it with its backend-assigned id
    ///
    /// Drafts that fail [`BookDraft::validate`] are rejected without a request.
    pub async fn create(&self, draft: &BookDraft) -> ClientResult<Book> {
        draft.validate()?;

        let body = serde_json::to_value(draft)?;
        let response = self
            .transport
            .send(ApiRequest::post(BOOKS_PATH, body))
            .await?
            .error_for_status(BOOKS_PATH)?;
        let book: Book = response.json()?;

        if book.id.trim().is_empty() {
            return Err(ClientError::InvalidResponse(
                "created book has no identifier".to_string(),
            ));
        }

        tracing::info!(book_id = %book.id, title = %book.title, "Book created");
        Ok(book)
    }

    /// Delete a book
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let path = book_path(id);
        self.transport
            .send(ApiRequest::delete(&path))
            .await?
            .error_for_status(&path)?;
        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }
}

fn book_path(id: &str) -> String {
    format!("{}/{}", BOOKS_PATH, urlencoding::encode(id))
}
