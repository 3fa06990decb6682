//! Storefront Orders
//!
//! ```text
//! storefront_orders [--env dev] [--port 8080]
//! storefront_orders [--env dev] --issue-token <id> <email> <role> <name>
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};

use storefront_orders::auth::{TokenService, TokenUser};
use storefront_orders::config::{AppConfig, StorageBackend};
use storefront_orders::db::Database;
use storefront_orders::gateway::{self, state::AppState};
use storefront_orders::orders::{
    MemoryOrderRepository, OrderRepository, OrderService, PgOrderRepository,
};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

/// `--issue-token <id> <email> <role> <name>`
fn get_issue_token_args() -> anyhow::Result<Option<TokenUser>> {
    let args: Vec<String> = std::env::args().collect();
    let Some(pos) = args.iter().position(|a| a == "--issue-token") else {
        return Ok(None);
    };
    let rest = &args[pos + 1..];
    if rest.len() < 4 {
        bail!("usage: --issue-token <id> <email> <role> <name>");
    }
    let id = rest[0]
        .parse()
        .with_context(|| format!("user id must be an integer, got {:?}", rest[0]))?;
    Ok(Some(TokenUser {
        id,
        email: rest[1].clone(),
        role: rest[2].clone(),
        name: rest[3].clone(),
    }))
}

async fn build_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn OrderRepository>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            let repo = MemoryOrderRepository::new();
            repo.seed_demo();
            tracing::warn!(
                orders = repo.len(),
                "Using in-memory order storage seeded with demo data"
            );
            Ok(Arc::new(repo))
        }
        StorageBackend::Postgres => {
            let url = config
                .storage
                .postgres_url
                .as_deref()
                .context("storage.postgres_url missing")?;
            let db = Database::connect(
                url,
                config.storage.max_connections,
                config.storage.acquire_timeout_ms,
            )
            .await
            .context("Failed to connect to PostgreSQL")?;
            db.health_check()
                .await
                .context("PostgreSQL health check failed")?;
            Ok(Arc::new(PgOrderRepository::new(db.pool().clone())))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut app_config = AppConfig::load(&env)?;
    if let Some(port) = get_port_override() {
        app_config.gateway.port = port;
    }

    let tokens = Arc::new(TokenService::new(&app_config.auth.jwt_secret));

    // Local testing helper: print a token and exit before logging starts
    if let Some(user) = get_issue_token_args()? {
        let token = tokens.issue(&user)?;
        println!("{token}");
        return Ok(());
    }

    let _log_guard = storefront_orders::logging::init_logging(&app_config);
    tracing::info!(
        env = %env,
        build = env!("GIT_HASH"),
        backend = ?app_config.storage.backend,
        policy = ?app_config.orders.transition_policy,
        "Starting Storefront Orders"
    );

    let repo = build_repository(&app_config).await?;
    let orders = Arc::new(OrderService::new(
        repo,
        app_config.orders.transition_policy,
        Duration::from_millis(app_config.orders.storage_timeout_ms),
    ));

    let state = Arc::new(AppState::new(orders, tokens));
    gateway::run_server(&app_config.gateway.host, app_config.gateway.port, state).await
}
