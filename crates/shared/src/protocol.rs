use serde::{Deserialize, Serialize};

/// Body of `POST /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Query of `GET /posts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPostsQuery {
    #[serde(rename = "_limit")]
    pub limit: usize,
}

impl ListPostsQuery {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Post, PostId};

    #[test]
    fn submission_serializes_all_three_fields() {
        let body = serde_json::to_value(ContactSubmission {
            name: "Alice".into(),
            email: "a@b.com".into(),
            message: "Hello there!".into(),
        })
        .expect("serialize");
        assert_eq!(
            body,
            serde_json::json!({
                "name": "Alice",
                "email": "a@b.com",
                "message": "Hello there!"
            })
        );
    }

    #[test]
    fn list_query_uses_underscore_limit_key() {
        let value = serde_json::to_value(ListPostsQuery::new(5)).expect("serialize");
        assert_eq!(value, serde_json::json!({ "_limit": 5 }));
    }

    #[test]
    fn post_ignores_unknown_fields() {
        let post: Post = serde_json::from_str(
            r#"{"userId": 1, "id": 3, "title": "t", "body": "b"}"#,
        )
        .expect("decode");
        assert_eq!(post.id, PostId(3));
        assert_eq!(post.title, "t");
    }
}
