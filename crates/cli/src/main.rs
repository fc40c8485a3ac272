//! Follow the tasks of one project from the command line.
//!
//! | Env Var              | Required | Meaning                           |
//! |----------------------|----------|-----------------------------------|
//! | `TASKHUB_PROJECT_ID` | yes      | project whose tasks are followed  |
//! | `TASKHUB_USER_ID`    | no       | signed-in user id                 |
//! | `TASKHUB_TOKEN`      | no       | bearer token for that user        |
//!
//! Plus everything [`SyncConfig::from_env`] reads.

use anyhow::Context;
use taskhub_core::auth::AuthContext;
use taskhub_core::resource::Resource;
use taskhub_core::types::DbId;
use taskhub_db::LocalStore;
use taskhub_remote::ApiClient;
use taskhub_sync::{Repositories, SyncConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskhub=info,taskhub_sync=debug,taskhub_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SyncConfig::from_env()?;

    let store = LocalStore::connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to open cache at {}", config.database_url))?;
    taskhub_db::health_check(store.pool())
        .await
        .context("Cache health check failed")?;
    tracing::info!(database_url = %config.database_url, "Local cache ready");

    let auth = session_from_env()?;
    let client = ApiClient::new(&config.api_base_url, config.request_timeout(), auth.clone())
        .context("Failed to build API client")?;
    let repos = Repositories::new(store, client, auth);

    let project_id = parse_id("TASKHUB_PROJECT_ID")?.context("TASKHUB_PROJECT_ID must be set")?;
    tracing::info!(api = %config.api_base_url, project_id, "Following project tasks");

    let mut tasks = repos.tasks.get_tasks_by_project_id(project_id);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping");
                break;
            }
            next = tasks.next() => match next {
                Some(Resource::Loading) => tracing::info!("Loading tasks"),
                Some(Resource::Success(rows)) => {
                    tracing::info!(count = rows.len(), "Tasks updated");
                    for task in rows {
                        tracing::info!(id = task.id, status = ?task.status, title = %task.title, "task");
                    }
                }
                Some(Resource::Error(message)) => tracing::warn!(%message, "No tasks"),
                None => break,
            },
        }
    }

    tasks.cancel();
    Ok(())
}

/// Build the session from `TASKHUB_USER_ID` and `TASKHUB_TOKEN`.
fn session_from_env() -> anyhow::Result<AuthContext> {
    let auth = AuthContext::new();
    if let Some(user_id) = parse_id("TASKHUB_USER_ID")? {
        let token = std::env::var("TASKHUB_TOKEN").unwrap_or_default();
        auth.set_session(user_id, token);
    }
    Ok(auth)
}

fn parse_id(name: &str) -> anyhow::Result<Option<DbId>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a valid id, got {value:?}")),
        Err(_) => Ok(None),
    }
}
