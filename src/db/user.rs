use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use color_eyre::Result;

use super::models::UserRecord;
use super::Db;

impl Db {
    /// Returns `false` without touching the store when the username is taken.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<bool> {
        let password_hash = hash_password(password).await?;

        let mut store = self.store.write().await;
        if store.users.contains_key(username) {
            return Ok(false);
        }
        store.users.insert(
            username.to_string(),
            UserRecord {
                password_hash,
                scores: Vec::new(),
            },
        );

        tracing::info!("new user created: username={username}");
        Ok(true)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        Ok(self.store.read().await.users.contains_key(username))
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        let stored_hash = match self.stored_password_hash(username).await {
            Some(hash) => hash,
            None => return Ok(false),
        };
        verify_password(password, &stored_hash).await
    }

    pub async fn stored_password_hash(&self, username: &str) -> Option<String> {
        self.store
            .read()
            .await
            .users
            .get(username)
            .map(|u| u.password_hash.clone())
    }

    /// Append a quiz result to the user's history. `false` if the user is unknown.
    pub async fn record_score(&self, username: &str, score: u32) -> Result<bool> {
        let mut store = self.store.write().await;
        match store.users.get_mut(username) {
            Some(user) => {
                user.scores.push(score);
                tracing::info!("score recorded: username={username}, score={score}");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn user_scores(&self, username: &str) -> Option<Vec<u32>> {
        self.store
            .read()
            .await
            .users
            .get(username)
            .map(|u| u.scores.clone())
    }
}

async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| color_eyre::eyre::eyre!("failed to hash password: {e}"))
    })
    .await?
}

async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    let verified = tokio::task::spawn_blocking(move || {
        let parsed_hash = match PasswordHash::new(&hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    })
    .await?;
    Ok(verified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_username_is_not_created_twice() {
        let db = Db::new();
        assert!(db.create_user("ada", "first").await.unwrap());
        let hash_before = db.stored_password_hash("ada").await;

        assert!(!db.create_user("ada", "second").await.unwrap());
        assert_eq!(db.stored_password_hash("ada").await, hash_before);
        assert!(db.verify_user_password("ada", "first").await.unwrap());
        assert!(!db.verify_user_password("ada", "second").await.unwrap());
    }

    #[tokio::test]
    async fn stored_hash_is_salted_not_plaintext() {
        let db = Db::new();
        db.create_user("ada", "hunter2").await.unwrap();
        db.create_user("bob", "hunter2").await.unwrap();

        let ada = db.stored_password_hash("ada").await.unwrap();
        let bob = db.stored_password_hash("bob").await.unwrap();
        assert_ne!(ada, "hunter2");
        assert!(!ada.contains("hunter2"));
        assert_ne!(ada, bob);
    }

    #[tokio::test]
    async fn unknown_user_fails_verification() {
        let db = Db::new();
        assert!(!db.verify_user_password("ghost", "x").await.unwrap());
        assert!(!db.username_exists("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn scores_only_grow() {
        let db = Db::new();
        db.create_user("ada", "pw").await.unwrap();
        assert!(db.record_score("ada", 7).await.unwrap());
        assert!(db.record_score("ada", 3).await.unwrap());
        assert_eq!(db.user_scores("ada").await, Some(vec![7, 3]));

        assert!(!db.record_score("ghost", 10).await.unwrap());
        assert_eq!(db.user_scores("ghost").await, None);
    }
}
