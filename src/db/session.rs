use std::time::Instant;

use color_eyre::Result;
use ulid::Ulid;

use super::models::{AuthUser, SessionLookup};
use super::{Db, Session};

impl Db {
    /// Start a session, dropping any that have expired.
    pub async fn create_user_session(&self, username: &str) -> Result<String> {
        let session = Ulid::new().to_string();
        let ttl = self.session_ttl;

        let mut store = self.store.write().await;
        store.sessions.retain(|_, s| !s.is_expired(ttl));
        store.sessions.insert(
            session.clone(),
            Session {
                username: username.to_string(),
                issued_at: Instant::now(),
            },
        );

        tracing::info!("new user session created for username={username}");
        Ok(session)
    }

    pub async fn lookup_session(&self, session_id: &str) -> Result<SessionLookup> {
        {
            let store = self.store.read().await;
            match store.sessions.get(session_id) {
                None => return Ok(SessionLookup::Invalid),
                Some(session) if !session.is_expired(self.session_ttl) => {
                    return Ok(if store.users.contains_key(&session.username) {
                        SessionLookup::Active(AuthUser {
                            username: session.username.clone(),
                        })
                    } else {
                        SessionLookup::UserMissing
                    });
                }
                Some(_) => {}
            }
        }

        self.store.write().await.sessions.remove(session_id);
        tracing::debug!("expired session removed");
        Ok(SessionLookup::Invalid)
    }

    pub async fn delete_user_session(&self, session_id: &str) -> Result<()> {
        self.store.write().await.sessions.remove(session_id);
        Ok(())
    }
}
