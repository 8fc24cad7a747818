use chrono::{DateTime, Utc};

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Like {
    pub(crate) user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) author_name: String,
    pub(crate) author_avatar: String,
    pub(crate) text: String,
    pub(crate) created_at: DateTime<Utc>,
}

/// A post with its embedded likes and comments, both newest first.
///
/// Author name and avatar are a snapshot taken when the post was created.
#[derive(Debug, Clone)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) author_name: String,
    pub(crate) author_avatar: String,
    pub(crate) text: String,
    pub(crate) likes: Vec<Like>,
    pub(crate) comments: Vec<Comment>,
    pub(crate) created_at: DateTime<Utc>,
}

impl Post {
    pub(crate) fn is_liked_by(&self, user_id: i64) -> bool {
        self.likes.iter().any(|like| like.user_id == user_id)
    }

    pub(crate) fn comment(&self, comment_id: i64) -> Option<&Comment> {
        self.comments.iter().find(|comment| comment.id == comment_id)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CreatePostRequest {
    pub(crate) text: String,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            text: normalize_text(&self.text)?,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CreateCommentRequest {
    pub(crate) text: String,
}

impl CreateCommentRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            text: normalize_text(&self.text)?,
        })
    }
}

fn normalize_text(text: &str) -> Result<String, DomainError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::Validation {
            field: "text",
            message: "Text is required",
        });
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Comment, CreateCommentRequest, CreatePostRequest, DomainError, Like, Post};

    #[test]
    fn create_post_request_rejects_blank_text() {
        let req = CreatePostRequest {
            text: "   ".to_string(),
        };
        let err = req.validate().expect_err("text must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "text", .. }));
    }

    #[test]
    fn create_comment_request_trims_text() {
        let req = CreateCommentRequest {
            text: "  nice  ".to_string(),
        };
        assert_eq!(req.validate().expect("must validate").text, "nice");
    }

    #[test]
    fn post_lookup_helpers() {
        let post = Post {
            id: 1,
            user_id: 10,
            author_name: "A".to_string(),
            author_avatar: String::new(),
            text: "hello".to_string(),
            likes: vec![Like { user_id: 11 }],
            comments: vec![Comment {
                id: 5,
                user_id: 11,
                author_name: "B".to_string(),
                author_avatar: String::new(),
                text: "hi".to_string(),
                created_at: Utc::now(),
            }],
            created_at: Utc::now(),
        };

        assert!(post.is_liked_by(11));
        assert!(!post.is_liked_by(10));
        assert!(post.comment(5).is_some());
        assert!(post.comment(6).is_none());
    }
}
