pub const HOME_URL: &str = "/";
pub const LOGIN_URL: &str = "/login";
pub const REGISTER_URL: &str = "/register";
pub const LOGOUT_URL: &str = "/logout";
pub const RESULTS_URL: &str = "/results";
pub const LEADERBOARD_URL: &str = "/leaderboard";

pub const USER_SESSION_COOKIE_NAME: &str = "user_session";
/// Lifetime of a session, both the cookie's Max-Age and the server-side entry.
pub const SESSION_TTL_SECS: u64 = 3600;

pub fn quiz_page_url(category_idx: usize) -> String {
    format!("/quiz/{category_idx}")
}

// Login page notices, passed as `?notice=`
pub const NOTICE_USER_MISSING: &str = "user-missing";

pub fn login_notice_url(notice: &str) -> String {
    format!("{LOGIN_URL}?notice={notice}")
}

// Quiz assembly
pub const MAX_QUIZ_QUESTIONS: usize = 10;
pub const LOCAL_QUESTIONS_PER_QUIZ: usize = 2;

pub const LEADERBOARD_SIZE: usize = 5;

// Results form fields
pub const CATEGORY_FIELD: &str = "category";
pub const QUESTION_IDS_FIELD: &str = "question_ids";
pub const ANSWER_FIELD_PREFIX: &str = "question_";

pub fn answer_field(question_ref: &str) -> String {
    format!("{ANSWER_FIELD_PREFIX}{question_ref}")
}
