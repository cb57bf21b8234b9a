use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use botify_agent::{AgentRuntime, GroqClient};
use botify_catalog::CatalogClient;
use botify_core::config::{AppConfig, ConfigError, LoadOptions};
use botify_db::repositories::SqlConversationRepository;
use botify_db::{connect, migrations, DbPool};
use botify_whatsapp::MessageSender;

use crate::webhook::WebhookState;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub runtime: Arc<AgentRuntime<GroqClient, CatalogClient>>,
    pub sender: MessageSender,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool =
        connect(&config.database).await.map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let repository = Arc::new(SqlConversationRepository::new(db_pool.clone()));
    let runtime = Arc::new(AgentRuntime::new(
        GroqClient::new(&config.llm),
        CatalogClient::new(&config.shopify),
        repository,
    ));
    let sender = MessageSender::new(&config.whatsapp);

    Ok(Application { config, db_pool, runtime, sender })
}

impl Application {
    pub fn webhook_state(&self) -> WebhookState {
        WebhookState {
            runtime: self.runtime.clone(),
            sender: self.sender.clone(),
            verify_token: self.config.whatsapp.verify_token.clone(),
        }
    }
}
