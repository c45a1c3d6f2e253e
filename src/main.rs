use std::{path::PathBuf, time::Duration};

use clap::Parser;
use triviaboard::{
    bank::QuestionBank,
    clients::{trivia::TriviaClient, unsplash::UnsplashClient},
    db::Db,
    services::{auth::AuthService, quiz::QuizService},
    AppState,
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// API key sent to the trivia question API.
    #[clap(env)]
    trivia_api_key: String,

    /// Client id for the image search API.
    #[clap(env)]
    image_api_key: String,

    /// Secret the session cookie signing key is derived from (at least 32 bytes).
    #[clap(env)]
    session_secret: String,

    /// Path to the local question bank.
    #[arg(long, env, default_value = "quizzes.json")]
    question_bank: PathBuf,

    /// Base URL of the trivia question API.
    #[arg(long, env, default_value = "https://the-trivia-api.com")]
    trivia_api_url: String,

    /// Base URL of the image search API.
    #[arg(long, env, default_value = "https://api.unsplash.com")]
    image_api_url: String,

    /// Timeout for every outbound request, in seconds.
    #[arg(long, env, default_value_t = 10)]
    upstream_timeout_secs: u64,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:5000")]
    address: String,

    /// Mark session cookies `Secure` (serve over HTTPS).
    #[arg(long, env, default_value_t = false)]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,tower_http=info,triviaboard=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let bank = QuestionBank::load(&args.question_bank)?;
    let timeout = Duration::from_secs(args.upstream_timeout_secs);
    let trivia = TriviaClient::new(args.trivia_api_url, args.trivia_api_key, timeout)?;
    let images = UnsplashClient::new(args.image_api_url, args.image_api_key, timeout)?;

    let db = Db::new();
    let state = AppState {
        db: db.clone(),
        auth: AuthService::new(db),
        quiz: QuizService::new(bank, trivia, images),
        key: triviaboard::session_key(&args.session_secret)?,
        secure_cookies: args.secure_cookies,
    };

    let address = args.address.parse::<std::net::SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("listening on {address}");
    axum::serve(listener, triviaboard::router(state)).await?;

    Ok(())
}
