use color_eyre::Result;

use crate::db::Db;

// ---------------------------------------------------------------------------
// AuthRepository trait (the store abstraction the service depends on)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait AuthRepository: Send + Sync {
    fn username_exists(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    /// Returns `false` if the username was taken in the meantime.
    fn create_user(
        &self,
        username: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn verify_user_password(
        &self,
        username: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn create_user_session(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    fn delete_user_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

impl AuthRepository for Db {
    async fn username_exists(&self, username: &str) -> Result<bool> {
        Db::username_exists(self, username).await
    }

    async fn create_user(&self, username: &str, password: &str) -> Result<bool> {
        Db::create_user(self, username, password).await
    }

    async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        Db::verify_user_password(self, username, password).await
    }

    async fn create_user_session(&self, username: &str) -> Result<String> {
        Db::create_user_session(self, username).await
    }

    async fn delete_user_session(&self, session_id: &str) -> Result<()> {
        Db::delete_user_session(self, session_id).await
    }
}

// ---------------------------------------------------------------------------
// Outcome enums
// ---------------------------------------------------------------------------

pub enum RegisterOutcome {
    /// User created and session started. Contains the session token.
    LoggedIn(String),
    /// Username or password was empty.
    EmptyFields,
    /// Username already registered; nothing was stored.
    UsernameTaken,
}

pub enum LoginOutcome {
    /// Login succeeded. Contains the session token.
    Success(String),
    /// Password was incorrect (or username not found).
    InvalidCredentials,
}

// ---------------------------------------------------------------------------
// AuthService
// ---------------------------------------------------------------------------

pub struct AuthService<R: AuthRepository = Db> {
    repo: R,
}

impl<R: AuthRepository + Clone> Clone for AuthService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Usernames are trimmed here exactly as in `register`.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let username = username.trim();
        let verified = self.repo.verify_user_password(username, password).await?;

        if !verified {
            tracing::info!("failed login for username={username}");
            return Ok(LoginOutcome::InvalidCredentials);
        }

        let session_token = self.repo.create_user_session(username).await?;

        Ok(LoginOutcome::Success(session_token))
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<RegisterOutcome> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Ok(RegisterOutcome::EmptyFields);
        }

        // Cheap check first so a taken name never pays for hashing
        if self.repo.username_exists(username).await? {
            return Ok(RegisterOutcome::UsernameTaken);
        }

        if !self.repo.create_user(username, password).await? {
            return Ok(RegisterOutcome::UsernameTaken);
        }

        let session_token = self.repo.create_user_session(username).await?;
        Ok(RegisterOutcome::LoggedIn(session_token))
    }

    pub async fn logout(&self, session_id: &str) -> Result<()> {
        self.repo.delete_user_session(session_id).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service(mock_repo: MockAuthRepository) -> AuthService<MockAuthRepository> {
        AuthService::new(mock_repo)
    }

    // ----- login tests -----

    #[tokio::test]
    async fn login_success_returns_session_token() {
        let mut mock = MockAuthRepository::new();
        mock.expect_verify_user_password()
            .returning(|_, _| Box::pin(async { Ok(true) }));
        mock.expect_create_user_session()
            .withf(|username| username == "ada")
            .returning(|_| Box::pin(async { Ok("session-token-123".to_string()) }));

        let svc = service(mock);
        let outcome = svc.login("ada", "password").await.unwrap();

        assert!(matches!(outcome, LoginOutcome::Success(ref t) if t == "session-token-123"));
    }

    #[tokio::test]
    async fn login_wrong_password_returns_invalid_credentials() {
        let mut mock = MockAuthRepository::new();
        mock.expect_verify_user_password()
            .returning(|_, _| Box::pin(async { Ok(false) }));
        mock.expect_create_user_session().never();

        let svc = service(mock);
        let outcome = svc.login("ada", "wrong").await.unwrap();

        assert!(matches!(outcome, LoginOutcome::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_trims_username_like_register() {
        let mut mock = MockAuthRepository::new();
        mock.expect_verify_user_password()
            .withf(|username, _| username == "ada")
            .returning(|_, _| Box::pin(async { Ok(true) }));
        mock.expect_create_user_session()
            .withf(|username| username == "ada")
            .returning(|_| Box::pin(async { Ok("session-token-456".to_string()) }));

        let svc = service(mock);
        let outcome = svc.login("  ada ", "password").await.unwrap();

        assert!(matches!(outcome, LoginOutcome::Success(ref t) if t == "session-token-456"));
    }

    // ----- register tests -----

    #[tokio::test]
    async fn register_empty_fields_returns_empty_fields() {
        let svc = service(MockAuthRepository::new());
        let outcome = svc.register("", "pass").await.unwrap();
        assert!(matches!(outcome, RegisterOutcome::EmptyFields));

        let svc = service(MockAuthRepository::new());
        let outcome = svc.register("ada", "").await.unwrap();
        assert!(matches!(outcome, RegisterOutcome::EmptyFields));

        let svc = service(MockAuthRepository::new());
        let outcome = svc.register("   ", "pass").await.unwrap();
        assert!(matches!(outcome, RegisterOutcome::EmptyFields));
    }

    #[tokio::test]
    async fn register_taken_username_does_not_create() {
        let mut mock = MockAuthRepository::new();
        mock.expect_username_exists()
            .returning(|_| Box::pin(async { Ok(true) }));
        mock.expect_create_user().never();
        mock.expect_create_user_session().never();

        let svc = service(mock);
        let outcome = svc.register("ada", "password").await.unwrap();

        assert!(matches!(outcome, RegisterOutcome::UsernameTaken));
    }

    #[tokio::test]
    async fn register_lost_race_returns_taken() {
        let mut mock = MockAuthRepository::new();
        mock.expect_username_exists()
            .returning(|_| Box::pin(async { Ok(false) }));
        mock.expect_create_user()
            .returning(|_, _| Box::pin(async { Ok(false) }));
        mock.expect_create_user_session().never();

        let svc = service(mock);
        let outcome = svc.register("ada", "password").await.unwrap();

        assert!(matches!(outcome, RegisterOutcome::UsernameTaken));
    }

    #[tokio::test]
    async fn register_new_user_returns_logged_in() {
        let mut mock = MockAuthRepository::new();
        mock.expect_username_exists()
            .returning(|_| Box::pin(async { Ok(false) }));
        mock.expect_create_user()
            .withf(|username, password| username == "ada" && password == "password")
            .returning(|_, _| Box::pin(async { Ok(true) }));
        mock.expect_create_user_session()
            .returning(|_| Box::pin(async { Ok("session-abc".to_string()) }));

        let svc = service(mock);
        let outcome = svc.register(" ada ", "password").await.unwrap();

        assert!(matches!(outcome, RegisterOutcome::LoggedIn(ref t) if t == "session-abc"));
    }

    // ----- logout tests -----

    #[tokio::test]
    async fn logout_deletes_session() {
        let mut mock = MockAuthRepository::new();
        mock.expect_delete_user_session()
            .withf(|id| id == "session-123")
            .returning(|_| Box::pin(async { Ok(()) }));

        let svc = service(mock);
        svc.logout("session-123").await.unwrap();
    }

    // ----- against the real store -----

    #[tokio::test]
    async fn register_then_login_against_store() {
        let svc = AuthService::new(Db::new());

        let outcome = svc.register("ada", "lovelace").await.unwrap();
        assert!(matches!(outcome, RegisterOutcome::LoggedIn(_)));

        let outcome = svc.register("ada", "other").await.unwrap();
        assert!(matches!(outcome, RegisterOutcome::UsernameTaken));

        let outcome = svc.login("ada", "other").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::InvalidCredentials));

        let outcome = svc.login("ada", "lovelace").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::Success(_)));
    }

    #[tokio::test]
    async fn padded_username_logs_in_as_registered() {
        let svc = AuthService::new(Db::new());

        let outcome = svc.register(" ada ", "pw").await.unwrap();
        assert!(matches!(outcome, RegisterOutcome::LoggedIn(_)));

        let outcome = svc.login(" ada ", "pw").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::Success(_)));
        let outcome = svc.login("ada", "pw").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::Success(_)));
    }
}
