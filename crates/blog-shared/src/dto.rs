//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub created_at: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Body of `POST /posts` and `PUT /posts/{id}`.
///
/// Every field is optional at the wire level so a missing key reaches
/// validation and produces a 400 naming it, instead of a generic JSON error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// A post as returned by every post endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    /// RFC 3339, UTC.
    pub created_at: String,
    /// RFC 3339, UTC.
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_response_uses_camel_case_timestamps() {
        let response = PostResponse {
            id: 1,
            title: "Hi".to_string(),
            content: "World".to_string(),
            category: "tech".to_string(),
            tags: vec!["a".to_string()],
            created_at: "2024-06-01T00:00:00+00:00".to_string(),
            updated_at: "2024-06-01T00:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["createdAt"], "2024-06-01T00:00:00+00:00");
        assert_eq!(json["updatedAt"], "2024-06-01T00:00:00+00:00");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_post_request_missing_keys_deserialize_as_none() {
        let request: PostRequest =
            serde_json::from_str(r#"{"title": "Hi", "tags": []}"#).unwrap();

        assert_eq!(request.title.as_deref(), Some("Hi"));
        assert!(request.content.is_none());
        assert_eq!(request.tags, Some(vec![]));
    }
}
