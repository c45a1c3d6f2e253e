// Store model structs

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
}

pub struct UserRecord {
    /// argon2 PHC string, salt included
    pub password_hash: String,
    pub scores: Vec<u32>,
}

/// A user's complete score history, oldest first.
#[derive(Clone, Debug)]
pub struct ScoreHistory {
    pub username: String,
    pub scores: Vec<u32>,
}

/// What a session token resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionLookup {
    Active(AuthUser),
    /// The session is live but its user record is gone.
    UserMissing,
    /// Unknown or expired token.
    Invalid,
}
