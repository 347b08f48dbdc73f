//! Book list view
//!
//! Holds the last full snapshot of the collection. Mutations never patch
//! the snapshot; they re-fetch it.

use std::sync::Arc;

use crate::books::BookRepository;
use crate::models::{Book, MAX_RATING};

use super::{AddBookForm, Confirm, ViewResult, DELETE_PROMPT};

/// Load state of the list, shown alongside the cards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewStatus {
    /// Nothing fetched yet
    #[default]
    Idle,
    Ready,
    Failed(String),
}

/// What happened to a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation; nothing was sent
    Cancelled,
}

/// Render-ready summary of one book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub id: String,
    pub title: String,
    pub byline: String,
    /// One slot per possible rating point, filled up to the book's rating
    pub stars: [bool; MAX_RATING as usize],
    pub comment: Option<String>,
}

impl BookCard {
    pub fn from_book(book: &Book) -> Self {
        let mut stars = [false; MAX_RATING as usize];
        for (i, slot) in stars.iter_mut().enumerate() {
            *slot = i < book.rating as usize;
        }
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            byline: format!("by {}", book.author),
            stars,
            comment: book.comment().map(str::to_string),
        }
    }

    pub fn filled_stars(&self) -> usize {
        self.stars.iter().filter(|s| **s).count()
    }

    /// Stars as text, e.g. `★★★☆☆`
    pub fn star_line(&self) -> String {
        self.stars
            .iter()
            .map(|filled| if *filled { '★' } else { '☆' })
            .collect()
    }
}

/// Controller for the "My Books" page
pub struct BookListView {
    books: BookRepository,
    confirm: Arc<dyn Confirm>,
    items: Vec<Book>,
    status: ViewStatus,
    form: AddBookForm,
}

impl BookListView {
    pub fn new(books: BookRepository, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            books,
            confirm,
            items: Vec::new(),
            status: ViewStatus::Idle,
            form: AddBookForm::new(),
        }
    }

    /// Initial fetch of the list
    pub async fn load(&mut self) -> ViewResult<()> {
        self.refresh().await
    }

    /// Replace the snapshot with a fresh copy from the backend
    pub async fn refresh(&mut self) -> ViewResult<()> {
        match self.books.list().await {
            Ok(books) => {
                self.items = books;
                self.status = ViewStatus::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load books");
                self.status = ViewStatus::Failed(e.to_string());
                Err(e.into())
            }
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.items
    }

    pub fn cards(&self) -> Vec<BookCard> {
        self.items.iter().map(BookCard::from_book).collect()
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn form(&self) -> &AddBookForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut AddBookForm {
        &mut self.form
    }

    pub fn open_add_book(&mut self) {
        self.form.open();
    }

    /// Submit the add-book form, then re-fetch the list
    ///
    /// A failed re-fetch after a successful create still returns the new
    /// book; the failure shows up in [`BookListView::status`].
    pub async fn submit_add_book(&mut self) -> ViewResult<Book> {
        let book = self.form.submit(&self.books).await?;
        if self.refresh().await.is_err() {
            tracing::warn!(book_id = %book.id, "Book created but list refresh failed");
        }
        Ok(book)
    }

    /// Delete a book after the user confirms, then re-fetch the list
    ///
    /// As with [`BookListView::submit_add_book`], a failed re-fetch after a
    /// successful delete still reports `Deleted` and shows up in `status()`.
    pub async fn delete_book(&mut self, id: &str) -> ViewResult<DeleteOutcome> {
        if !self.confirm.confirm(DELETE_PROMPT) {
            tracing::debug!(book_id = %id, "Delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(e) = self.books.delete(id).await {
            tracing::error!(book_id = %id, error = %e, "Failed to delete book");
            self.status = ViewStatus::Failed(e.to_string());
            return Err(e.into());
        }

        if self.refresh().await.is_err() {
            tracing::warn!(book_id = %id, "Book deleted but list refresh failed");
        }
        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::transport::fake::{dune, FakeBackend, Failure};
    use crate::views::testing::FixedConfirm;
    use crate::views::ViewError;
    use reqwest::Method;

    fn view_with(backend: FakeBackend, confirm: FixedConfirm) -> (Arc<FakeBackend>, BookListView) {
        let backend = Arc::new(backend);
        let view = BookListView::new(BookRepository::new(backend.clone()), Arc::new(confirm));
        (backend, view)
    }

    #[tokio::test]
    async fn test_single_book_renders_one_card() {
        let (_backend, mut view) = view_with(FakeBackend::new().with_book(dune()), FixedConfirm::yes());
        view.load().await.unwrap();

        let cards = view.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Dune");
        assert_eq!(cards[0].byline, "by Herbert");
        assert_eq!(cards[0].filled_stars(), 5);
        assert_eq!(cards[0].star_line(), "★★★★★");
        assert!(cards[0].comment.is_none());
        assert_eq!(view.status(), &ViewStatus::Ready);
    }

    #[test]
    fn test_card_partial_rating_and_comment() {
        let mut book = dune();
        book.rating = 2;
        book.comment = Some("slow start".to_string());
        let card = BookCard::from_book(&book);
        assert_eq!(card.stars, [true, true, false, false, false]);
        assert_eq!(card.star_line(), "★★☆☆☆");
        assert_eq!(card.comment.as_deref(), Some("slow start"));

        book.rating = 0;
        book.comment = Some(String::new());
        let card = BookCard::from_book(&book);
        assert_eq!(card.filled_stars(), 0);
        assert!(card.comment.is_none());

        book.comment = Some(" ".to_string());
        assert_eq!(BookCard::from_book(&book).comment.as_deref(), Some(" "));
    }

    #[tokio::test]
    async fn test_submit_creates_then_refreshes_once() {
        let (backend, mut view) = view_with(FakeBackend::new(), FixedConfirm::yes());
        view.open_add_book();
        {
            let form = view.form_mut();
            form.set_title("Foo");
            form.set_author("Bar");
            form.set_rating(3);
            form.set_comment("");
        }

        let book = view.submit_add_book().await.unwrap();
        assert_eq!(backend.calls(), vec!["POST /api/books", "GET /api/books"]);
        assert!(!view.form().is_open());
        assert_eq!(view.books(), &[book]);
    }

    #[tokio::test]
    async fn test_failed_submit_skips_refresh() {
        let (backend, mut view) = view_with(FakeBackend::new(), FixedConfirm::yes());
        backend.fail_next(Method::POST, "/api/books", Failure::Unavailable);
        view.open_add_book();
        view.form_mut().set_title("Foo");
        view.form_mut().set_author("Bar");

        let err = view.submit_add_book().await.unwrap_err();
        assert!(matches!(err, ViewError::Client(ClientError::Unavailable)));
        assert!(view.form().is_open());
        assert_eq!(backend.calls(), vec!["POST /api/books"]);
    }

    #[tokio::test]
    async fn test_double_submit_issues_two_creates() {
        let (backend, mut view) = view_with(FakeBackend::new(), FixedConfirm::yes());
        for _ in 0..2 {
            view.open_add_book();
            view.form_mut().set_title("Foo");
            view.form_mut().set_author("Bar");
            view.submit_add_book().await.unwrap();
        }

        let creates = backend
            .calls()
            .iter()
            .filter(|c| c.as_str() == "POST /api/books")
            .count();
        assert_eq!(creates, 2);
        assert_eq!(view.books().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_without_confirmation_sends_nothing() {
        let confirm = FixedConfirm::no();
        let backend = Arc::new(FakeBackend::new().with_book(dune()));
        let confirm = Arc::new(confirm);
        let mut view = BookListView::new(BookRepository::new(backend.clone()), confirm.clone());

        let outcome = view.delete_book("1").await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert!(backend.calls().is_empty());
        assert_eq!(*confirm.prompts.lock().unwrap(), vec![DELETE_PROMPT.to_string()]);
        assert_eq!(backend.books().len(), 1);
    }

    #[tokio::test]
    async fn test_confirmed_delete_refreshes_snapshot() {
        let (backend, mut view) = view_with(FakeBackend::new().with_book(dune()), FixedConfirm::yes());
        view.load().await.unwrap();
        assert_eq!(view.books().len(), 1);

        let outcome = view.delete_book("1").await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(view.books().is_empty());
        assert_eq!(
            backend.calls(),
            vec!["GET /api/books", "DELETE /api/books/1", "GET /api/books"]
        );
    }

    #[tokio::test]
    async fn test_delete_succeeds_when_refresh_fails() {
        let (backend, mut view) = view_with(FakeBackend::new().with_book(dune()), FixedConfirm::yes());
        backend.fail_next(Method::GET, "/api/books", Failure::Status(500));

        let outcome = view.delete_book("1").await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(matches!(view.status(), ViewStatus::Failed(msg) if msg.contains("500")));
        assert!(backend.books().is_empty());
        assert_eq!(backend.calls(), vec!["DELETE /api/books/1", "GET /api/books"]);
    }

    #[tokio::test]
    async fn test_failed_delete_is_visible() {
        let (backend, mut view) = view_with(FakeBackend::new(), FixedConfirm::yes());
        let err = view.delete_book("missing").await.unwrap_err();
        assert!(matches!(err, ViewError::Client(ClientError::NotFound(_))));
        assert!(matches!(view.status(), ViewStatus::Failed(_)));
        assert_eq!(backend.calls(), vec!["DELETE /api/books/missing"]);
    }

    #[tokio::test]
    async fn test_load_failure_sets_status() {
        let (backend, mut view) = view_with(FakeBackend::new().with_book(dune()), FixedConfirm::yes());
        backend.fail_next(Method::GET, "/api/books", Failure::Status(500));

        assert!(view.load().await.is_err());
        assert!(matches!(view.status(), ViewStatus::Failed(msg) if msg.contains("500")));
        assert!(view.books().is_empty());

        view.refresh().await.unwrap();
        assert_eq!(view.status(), &ViewStatus::Ready);
        assert_eq!(view.books().len(), 1);
    }
}
