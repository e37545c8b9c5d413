//! Lead Qualifier server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use lead_qualifier::adapters::ai::{GeminiConfig, GeminiProvider};
use lead_qualifier::adapters::content::{InMemoryContentStore, PostgresContentStore};
use lead_qualifier::adapters::delivery::{EmailLeadDelivery, LeadMailerConfig};
use lead_qualifier::adapters::email::{LoggingEmailSender, ResendConfig, ResendEmailSender};
use lead_qualifier::adapters::http::{webhook_router, WebhookAppState};
use lead_qualifier::adapters::knowledge::{ContentFirstResponder, KnowledgePrompt};
use lead_qualifier::application::{HandleTurnHandler, LeadDispatcher};
use lead_qualifier::config::{AppConfig, DatabaseConfig};
use lead_qualifier::domain::catalog::ServiceCatalog;
use lead_qualifier::domain::dialogue::{FlowEngine, FlowSettings, HelplineCard, IntentRouter};
use lead_qualifier::ports::{AIProvider, ContentStore, EmailSender};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!("Starting Lead Qualifier v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = ?config.server.environment,
        webhook_path = %config.server.webhook_path,
        strict_email = config.features.strict_email_validation,
        "Configuration loaded"
    );

    let catalog = ServiceCatalog::global();

    let ai: Option<Arc<dyn AIProvider>> = match config.ai.api_key() {
        Some(key) => {
            let provider = GeminiProvider::new(
                GeminiConfig::new(key)
                    .with_model(config.ai.model.clone())
                    .with_base_url(config.ai.base_url.clone())
                    .with_timeout(config.ai.timeout()),
            )?;
            tracing::info!(model = %config.ai.model, "Gemini knowledge answers enabled");
            Some(Arc::new(provider) as Arc<dyn AIProvider>)
        }
        None => {
            tracing::warn!("No Gemini API key configured, knowledge answers disabled");
            None
        }
    };

    let content: Arc<dyn ContentStore> = match &config.database {
        Some(database) => Arc::new(init_content_store(database)?),
        None => {
            tracing::info!("No database configured, using empty in-memory content store");
            Arc::new(InMemoryContentStore::new())
        }
    };

    let sender: Arc<dyn EmailSender> = match &config.email {
        Some(email) => {
            let resend = ResendEmailSender::new(
                ResendConfig::new(email.resend_api_key.clone(), email.from_header())
                    .with_base_url(email.base_url.clone()),
            )?;
            tracing::info!(staff = %email.staff_email, "Lead emails enabled");
            Arc::new(resend)
        }
        None => {
            tracing::warn!("No email configured, completed leads will only be logged");
            Arc::new(LoggingEmailSender)
        }
    };
    let staff_address = config
        .email
        .as_ref()
        .map(|e| e.staff_email.clone())
        .unwrap_or_default();
    let delivery = EmailLeadDelivery::new(
        sender,
        LeadMailerConfig {
            staff_address,
            company_name: config.company.name.clone(),
            helpline_number: config.company.helpline_number.clone(),
        },
    );

    let knowledge = ContentFirstResponder::new(
        content,
        ai,
        KnowledgePrompt::from_catalog(
            config.company.name.clone(),
            config.company.description.clone(),
            catalog,
        ),
        config.ai.timeout(),
    );

    let settings = FlowSettings {
        email_policy: config.features.email_policy(),
        helpline: HelplineCard::new(
            config.company.helpline_number.clone(),
            config.company.whatsapp_link.clone(),
        ),
        ..FlowSettings::default()
    };
    let turn_handler = HandleTurnHandler::new(
        IntentRouter::new(FlowEngine::new(catalog, settings)),
        Arc::new(knowledge),
        LeadDispatcher::new(Arc::new(delivery)),
    );

    let app = webhook_router(
        WebhookAppState::new(Arc::new(turn_handler), config.features.verbose_errors),
        &config.server.webhook_path,
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Lazily connected, so a database outage degrades lookups instead of
/// blocking startup.
fn init_content_store(database: &DatabaseConfig) -> Result<PostgresContentStore, sqlx::Error> {
    let pool = database.pool_options().connect_lazy(&database.url)?;
    tracing::info!(
        max_connections = database.max_connections,
        "Site content lookup backed by PostgreSQL"
    );
    Ok(PostgresContentStore::new(pool))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

/// `RUST_LOG` wins over `server.log_level`; JSON output in production.
fn init_tracing(config: &AppConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.log_level.clone().into());

    let fmt_layer = if config.is_production() {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
