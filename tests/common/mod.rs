#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    response::IntoResponse,
    Router,
};
use axum_extra::extract::{cookie::Cookie, SignedCookieJar};
use http_body_util::BodyExt;
use tower::ServiceExt;
use triviaboard::{
    bank::QuestionBank,
    clients::{trivia::TriviaClient, unsplash::UnsplashClient},
    db::Db,
    names, router,
    services::{auth::AuthService, quiz::QuizService},
    session_key, AppState,
};

/// A fully answered Music quiz from the test bank, both answers correct.
pub const MUSIC_RESULTS_FORM: &str = "category=Music\
    &question_ids=local%3Am1&question_local%3Am1=David+Bowie\
    &question_ids=local%3Am2&question_local%3Am2=4";

const SESSION_SECRET: &str = "integration-test-session-secret-0123456789";

/// Nothing listens here, so every upstream call fails fast.
const DEAD_UPSTREAM: &str = "http://127.0.0.1:1";

const BANK: &str = r#"{
    "quizzes": {
        "Music": [
            {"id": "m1", "question": "Who sang Heroes?", "correctAnswer": "David Bowie",
             "incorrectAnswers": ["Prince", "Sting", "Cher"]},
            {"id": "m2", "question": "How many strings on a violin?", "correctAnswer": "4",
             "incorrectAnswers": ["5", "6", "3"]}
        ]
    }
}"#;

/// The router plus a handle on its store.
pub fn create_test_app() -> (Router, Db) {
    let timeout = Duration::from_secs(2);
    let trivia = TriviaClient::new(DEAD_UPSTREAM.to_string(), "test".to_string(), timeout)
        .expect("trivia client");
    let images = UnsplashClient::new(DEAD_UPSTREAM.to_string(), "test".to_string(), timeout)
        .expect("image client");
    let bank = QuestionBank::from_json(BANK).expect("test bank");

    let db = Db::new();
    let state = AppState {
        db: db.clone(),
        auth: AuthService::new(db.clone()),
        quiz: QuizService::new(bank, trivia, images),
        key: session_key(SESSION_SECRET).expect("session key"),
        secure_cookies: false,
    };
    (router(state), db)
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::empty()).expect("request build should succeed")
}

/// A form post as htmx sends it from a boosted page.
pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("HX-Request", "true");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::from(body.to_string()))
        .expect("request build should succeed")
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(req)
        .await
        .expect("router should respond")
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}

/// `name=value` of the session cookie the response sets, if any.
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    let prefix = format!("{}=", names::USER_SESSION_COOKIE_NAME);
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&prefix) && pair.len() > prefix.len())
        .map(str::to_string)
}

pub fn location(resp: &Response<Body>) -> Option<&str> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Register a user and return their session cookie.
pub async fn register(app: &Router, username: &str, password: &str) -> String {
    let resp = send(
        app,
        post_form(
            names::REGISTER_URL,
            &format!("username={username}&password={password}"),
            None,
        ),
    )
    .await;
    session_cookie(&resp).expect("registration should set a session cookie")
}

/// A correctly signed session cookie for an arbitrary session id.
pub fn signed_session_cookie(session_id: &str) -> String {
    let key = session_key(SESSION_SECRET).expect("session key");
    let jar = SignedCookieJar::new(key).add(Cookie::new(
        names::USER_SESSION_COOKIE_NAME,
        session_id.to_string(),
    ));
    session_cookie(&jar.into_response()).expect("jar should set the cookie")
}
