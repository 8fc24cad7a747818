//! Document store kept in process memory.
//!
//! Every repository call takes the single write lock for its whole
//! read-modify-write, so embedded-array updates never interleave.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::post::Post;
use crate::domain::profile::{Education, Experience, ProfileFields};
use crate::domain::user::User;

mod post_repository;
mod profile_repository;
mod user_repository;

#[derive(Debug, Clone)]
struct UserRecord {
    user: User,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct ProfileRecord {
    id: i64,
    fields: ProfileFields,
    experience: Vec<Experience>,
    education: Vec<Education>,
}

#[derive(Debug, Default)]
struct Collections {
    next_id: i64,
    users: BTreeMap<i64, UserRecord>,
    // keyed by owning user id
    profiles: BTreeMap<i64, ProfileRecord>,
    posts: BTreeMap<i64, Post>,
}

impl Collections {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

fn now() -> DateTime<Utc> {
    Utc::now()
}
