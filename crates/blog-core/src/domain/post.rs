use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;
use crate::error::DomainError;

/// Generated post identifier.
pub type PostId = i64;

/// Post entity - a blog entry owned by exactly one user.
///
/// `owner_id` never changes after creation and `updated_at >= created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub owner_id: UserId,
    pub title: String,
    pub content: String,
    pub category: String,
    /// Tag names, sorted by name.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The caller-supplied part of a post, used for both create and update.
///
/// Repositories only accept a draft, so a post row can never be written
/// from a request that was missing one of these fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    /// Requested tag names. May be empty and may contain duplicates.
    pub tags: Vec<String>,
}

impl PostDraft {
    /// Build a draft from optional request fields.
    ///
    /// Every field must be present. An empty `tags` list is accepted.
    pub fn parse(
        title: Option<String>,
        content: Option<String>,
        category: Option<String>,
        tags: Option<Vec<String>>,
    ) -> Result<Self, DomainError> {
        let mut missing = Vec::new();
        if title.is_none() {
            missing.push("title");
        }
        if content.is_none() {
            missing.push("content");
        }
        if category.is_none() {
            missing.push("category");
        }
        if tags.is_none() {
            missing.push("tags");
        }

        match (title, content, category, tags) {
            (Some(title), Some(content), Some(category), Some(tags)) => Ok(Self {
                title,
                content,
                category,
                tags,
            }),
            _ => Err(DomainError::Validation(format!(
                "Title, content, category, and tags are required (missing: {})",
                missing.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_parse_accepts_all_fields() {
        let draft = PostDraft::parse(
            some("Hi"),
            some("World"),
            some("tech"),
            Some(vec!["a".to_string(), "b".to_string()]),
        )
        .unwrap();

        assert_eq!(draft.title, "Hi");
        assert_eq!(draft.category, "tech");
        assert_eq!(draft.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_accepts_empty_tag_list() {
        let draft = PostDraft::parse(some("Hi"), some("World"), some("tech"), Some(vec![]));
        assert!(draft.unwrap().tags.is_empty());
    }

    #[test]
    fn test_parse_accepts_empty_strings() {
        let draft = PostDraft::parse(some(""), some(""), some(""), Some(vec![]));
        assert!(draft.is_ok());
    }

    #[test]
    fn test_parse_rejects_missing_tags() {
        let err = PostDraft::parse(some("Hi"), some("World"), some("tech"), None).unwrap_err();

        match err {
            DomainError::Validation(msg) => assert!(msg.contains("missing: tags")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_lists_every_missing_field() {
        let err = PostDraft::parse(None, some("World"), None, None).unwrap_err();

        match err {
            DomainError::Validation(msg) => {
                assert!(msg.contains("missing: title, category, tags"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
