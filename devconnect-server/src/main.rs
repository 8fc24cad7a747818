use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use sqlx::PgPool;
use tracing::{info, warn};

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use application::post_service::PostService;
use application::profile_service::ProfileService;
use data::post_repository::PostRepository;
use data::profile_repository::ProfileRepository;
use data::repositories::memory::MemoryStore;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::profile_repository::PostgresProfileRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use data::user_repository::UserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::github::{GithubClient, HttpGithubClient};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

struct Repositories {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileRepository>,
    posts: Arc<dyn PostRepository>,
    pool: Option<PgPool>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let repos = open_repositories(&settings).await?;

    let jwt = Arc::new(JwtService::new(
        &settings.jwt_secret,
        settings.jwt_ttl_seconds,
    ));
    let github: Arc<dyn GithubClient> = Arc::new(HttpGithubClient::new(
        settings.github_api_url.clone(),
        settings.github_token.clone(),
        Duration::from_secs(settings.github_timeout_secs),
    )?);

    let auth_service = Arc::new(AuthService::new(repos.users.clone(), jwt.clone()));
    let profile_service = Arc::new(ProfileService::new(
        repos.profiles.clone(),
        repos.posts.clone(),
        repos.users.clone(),
        github,
    ));
    let post_service = Arc::new(PostService::new(repos.posts.clone(), repos.users.clone()));

    let state = AppState::new(auth_service, profile_service, post_service, jwt);

    let result = server::run_http(&settings, state).await;

    if let Some(pool) = repos.pool {
        pool.close().await;
        info!("database pool closed");
    }

    result
}

async fn open_repositories(settings: &Settings) -> Result<Repositories> {
    match &settings.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            run_migrations(&pool).await?;

            Ok(Repositories {
                users: Arc::new(PostgresUserRepository::new(pool.clone())),
                profiles: Arc::new(PostgresProfileRepository::new(pool.clone())),
                posts: Arc::new(PostgresPostRepository::new(pool.clone())),
                pool: Some(pool),
            })
        }
        None => {
            warn!("DATABASE_URL is not set, data is kept in memory only");
            let store = MemoryStore::new();

            Ok(Repositories {
                users: Arc::new(store.clone()),
                profiles: Arc::new(store.clone()),
                posts: Arc::new(store),
                pool: None,
            })
        }
    }
}
