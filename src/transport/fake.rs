//! In-memory backend for tests
//!
//! Behaves like the real API for the routes the client uses and records
//! every request so tests can assert on call counts and order.

use async_trait::async_trait;
use reqwest::Method;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{ApiRequest, ApiResponse, Transport};
use crate::error::{ClientError, ClientResult};
use crate::models::{Book, BookDraft, User};

pub(crate) const FAKE_BASE: &str = "http://backend.test";

#[derive(Default)]
struct State {
    user: Option<User>,
    books: Vec<Book>,
    next_id: u32,
    requests: Vec<ApiRequest>,
    /// Queued failures, matched by method and path on the next request
    failures: VecDeque<(Method, String, Failure)>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Failure {
    Status(u16),
    Unavailable,
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: User) -> Self {
        self.state.lock().unwrap().user = Some(user);
        self
    }

    pub fn with_book(self, book: Book) -> Self {
        self.state.lock().unwrap().books.push(book);
        self
    }

    /// Fail the next request matching `method` and `path`
    pub fn fail_next(&self, method: Method, path: &str, failure: Failure) {
        self.state
            .lock()
            .unwrap()
            .failures
            .push_back((method, path.to_string(), failure));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests as `"METHOD path"` strings
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub fn books(&self) -> Vec<Book> {
        self.state.lock().unwrap().books.clone()
    }

    fn handle(state: &mut State, request: &ApiRequest) -> ClientResult<ApiResponse> {
        let position = state
            .failures
            .iter()
            .position(|(m, p, _)| *m == request.method && *p == request.path);
        if let Some(idx) = position {
            if let Some((_, _, failure)) = state.failures.remove(idx) {
                return match failure {
                    Failure::Status(status) => Ok(ApiResponse::new(
                        status,
                        r#"{"error":"injected failure"}"#,
                    )),
                    Failure::Unavailable => Err(ClientError::Unavailable),
                };
            }
        }

        let path = request.path.as_str();
        let method = &request.method;

        if path == "/api/user/me" && *method == Method::GET {
            return Ok(match &state.user {
                Some(user) => ApiResponse::new(200, serde_json::to_string(user)?),
                None => ApiResponse::new(401, r#"{"error":"User not authenticated"}"#),
            });
        }

        if path == "/auth/logout" && *method == Method::POST {
            state.user = None;
            return Ok(ApiResponse::new(204, ""));
        }

        if path == "/api/books" && *method == Method::GET {
            return Ok(ApiResponse::new(200, serde_json::to_string(&state.books)?));
        }

        if path == "/api/books" && *method == Method::POST {
            let body = request.body.clone().unwrap_or_default();
            let draft: BookDraft = serde_json::from_value(body)?;
            state.next_id += 1;
            let book = Book {
                id: format!("book-{}", state.next_id),
                title: draft.title,
                author: draft.author,
                rating: draft.rating,
                comment: draft.comment,
            };
            state.books.push(book.clone());
            return Ok(ApiResponse::new(200, serde_json::to_string(&book)?));
        }

        if let Some(id) = path.strip_prefix("/api/books/") {
            let id = urlencoding::decode(id)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| id.to_string());
            let Some(idx) = state.books.iter().position(|b| b.id == id) else {
                return Ok(ApiResponse::new(
                    404,
                    format!(r#"{{"error":"Book with id {} not found"}}"#, id),
                ));
            };
            if *method == Method::GET {
                return Ok(ApiResponse::new(
                    200,
                    serde_json::to_string(&state.books[idx])?,
                ));
            }
            if *method == Method::DELETE {
                state.books.remove(idx);
                return Ok(ApiResponse::new(204, ""));
            }
            return Ok(ApiResponse::new(405, ""));
        }

        Ok(ApiResponse::new(404, r#"{"error":"no route"}"#))
    }
}

#[async_trait]
impl Transport for FakeBackend {
    fn url(&self, path: &str) -> String {
        format!("{}/{}", FAKE_BASE, path.trim_start_matches('/'))
    }

    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        Self::handle(&mut state, &request)
    }
}

pub(crate) fn sample_user() -> User {
    User {
        id: "user-1".to_string(),
        email: "reader@example.com".to_string(),
        name: "Avid Reader".to_string(),
        picture: "https://example.com/avatar.png".to_string(),
    }
}

pub(crate) fn dune() -> Book {
    Book {
        id: "1".to_string(),
        title: "Dune".to_string(),
        author: "Herbert".to_string(),
        rating: 5,
        comment: None,
    }
}
