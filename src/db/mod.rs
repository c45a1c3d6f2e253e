// In-memory user and session store, lost on restart

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;

use crate::names;

pub mod models;
pub use models::*;

mod scores;
mod session;
mod user;

struct Session {
    username: String,
    issued_at: Instant,
}

impl Session {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.issued_at.elapsed() >= ttl
    }
}

#[derive(Default)]
struct Store {
    users: HashMap<String, UserRecord>,
    /// session token -> session
    sessions: HashMap<String, Session>,
}

// Main store handle, cheap to clone
#[derive(Clone)]
pub struct Db {
    store: Arc<RwLock<Store>>,
    session_ttl: Duration,
}

impl Default for Db {
    fn default() -> Self {
        Self::new()
    }
}

impl Db {
    pub fn new() -> Self {
        Self::with_session_ttl(Duration::from_secs(names::SESSION_TTL_SECS))
    }

    pub fn with_session_ttl(session_ttl: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
            session_ttl,
        }
    }
}
