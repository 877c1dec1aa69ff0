use std::sync::Arc;
use std::time::Duration;

use http::{HeaderValue, Method};
use secrecy::ExposeSecret;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use neuroform::adapters::ai::{OpenAIConfig, OpenAIProvider};
use neuroform::adapters::auth::JwtSessionValidator;
use neuroform::adapters::http::{api_router, ApiDependencies};
use neuroform::adapters::llm::{
    LlmDataAssistant, LlmFollowUpGenerator, LlmFormGenerator, LlmInsightGenerator,
};
use neuroform::adapters::memory::{InMemoryFlowSessionStore, InMemoryStore};
use neuroform::adapters::postgres::{
    run_migrations, PostgresFormRepository, PostgresInsightRepository, PostgresResponseRepository,
};
use neuroform::config::{AppConfig, ServerConfig};
use neuroform::ports::{AIProvider, FlowSessionStore, FormRepository, InsightRepository, ResponseRepository};

type Stores = (
    Arc<dyn FormRepository>,
    Arc<dyn ResponseRepository>,
    Arc<dyn InsightRepository>,
);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let (forms, responses, insights) = build_stores(&config).await?;

    let ai_config = OpenAIConfig::new(config.ai.api_key.expose_secret().clone())
        .with_name(config.ai.provider_name())
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_defaults(config.ai.temperature, config.ai.max_tokens)
        .with_timeout(config.ai.timeout())
        .with_max_retries(config.ai.max_retries);
    let ai: Arc<dyn AIProvider> = Arc::new(OpenAIProvider::new(ai_config)?);

    let flow_sessions: Arc<dyn FlowSessionStore> = Arc::new(InMemoryFlowSessionStore::new());
    spawn_session_eviction(
        flow_sessions.clone(),
        config.flow.session_ttl_secs,
        config.flow.eviction_interval(),
    );

    let deps = ApiDependencies {
        forms,
        responses,
        insights,
        flow_sessions,
        session_validator: Arc::new(JwtSessionValidator::new(
            &config.auth.jwt_secret,
            config.auth.issuer.as_deref(),
        )),
        form_generator: Arc::new(LlmFormGenerator::new(ai.clone())),
        follow_up_generator: Arc::new(LlmFollowUpGenerator::new(ai.clone())),
        insight_generator: Arc::new(LlmInsightGenerator::new(ai.clone())),
        data_assistant: Arc::new(LlmDataAssistant::new(ai)),
        follow_up_timeout: config.flow.follow_up_timeout(),
        visibility: config.flow.visibility_policy(),
    };

    let app = api_router(deps)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        model = %config.ai.model,
        "NeuroForm v{} listening",
        env!("CARGO_PKG_VERSION")
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

async fn build_stores(config: &AppConfig) -> Result<Stores, Box<dyn std::error::Error>> {
    match &config.database {
        Some(database) => {
            let pool = database.pool_options().connect(&database.url).await?;
            if database.run_migrations {
                run_migrations(&pool).await?;
                tracing::info!("database migrations applied");
            }
            let forms: Arc<dyn FormRepository> =
                Arc::new(PostgresFormRepository::new(pool.clone()));
            let responses: Arc<dyn ResponseRepository> =
                Arc::new(PostgresResponseRepository::new(pool.clone()));
            let insights: Arc<dyn InsightRepository> =
                Arc::new(PostgresInsightRepository::new(pool));
            Ok((forms, responses, insights))
        }
        None => {
            tracing::warn!("no database configured, data will not survive a restart");
            let store = Arc::new(InMemoryStore::new());
            let forms: Arc<dyn FormRepository> = store.clone();
            let responses: Arc<dyn ResponseRepository> = store.clone();
            let insights: Arc<dyn InsightRepository> = store;
            Ok((forms, responses, insights))
        }
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins_list();
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

fn spawn_session_eviction(sessions: Arc<dyn FlowSessionStore>, ttl_secs: u64, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let evicted = sessions.evict_idle(ttl_secs).await;
            if evicted > 0 {
                tracing::debug!(evicted, "evicted idle flow sessions");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
