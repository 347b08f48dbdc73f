//! Domain Types
//!
//! Shapes exchanged with the backend. Unknown fields in responses
//! (owner ids, timestamps) are ignored.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Highest rating a book can carry
pub const MAX_RATING: u8 = 5;

/// The signed-in user as reported by `/api/user/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Display name
    pub name: String,
    /// Avatar URL
    #[serde(default)]
    pub picture: String,
}

/// A book stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Book {
    /// Comment text, treating an empty string as absent
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.is_empty())
    }

    /// The fields a user supplied, without the backend identifier
    pub fn to_draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            rating: self.rating,
            comment: self.comment.clone(),
        }
    }
}

/// A book that has not been created yet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>, rating: u8) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            rating,
            comment: None,
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Check the draft against the rules the backend enforces
    pub fn validate(&self) -> ClientResult<()> {
        if self.title.trim().is_empty() {
            return Err(ClientError::InvalidDraft("title is required".to_string()));
        }
        if self.author.trim().is_empty() {
            return Err(ClientError::InvalidDraft("author is required".to_string()));
        }
        if self.rating > MAX_RATING {
            return Err(ClientError::InvalidDraft(format!(
                "rating must be between 0 and {}",
                MAX_RATING
            )));
        }
        Ok(())
    }
}
