use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use texttovideo_backend::controllers::conversion::ConversionController;
use texttovideo_backend::domain::conversion::ConversionService;
use texttovideo_backend::infrastructure::config::{Config, LogFormat, TtsProvider};
use texttovideo_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use texttovideo_backend::infrastructure::encoders::{FfmpegConfig, FfmpegVideoEncoder, VideoEncoder};
use texttovideo_backend::infrastructure::http::start_http_server;
use texttovideo_backend::infrastructure::repositories::{
    GoogleTtsRepository, OpenAiTtsRepository, PgConversionRepository, PollyTtsRepository,
    TtsRepository,
};
use texttovideo_backend::infrastructure::storage::ArtifactStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting TextToVideo Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    // Prepare artifact storage
    let store = Arc::new(ArtifactStore::new(config.storage_dir.clone()));
    store.ensure_directories().await?;
    tracing::info!(storage_dir = %store.base_dir().display(), "Artifact storage ready");

    let tts_repo = build_tts_repository(&config).await?;

    let encoder: Arc<dyn VideoEncoder> = Arc::new(FfmpegVideoEncoder::new(FfmpegConfig {
        ffmpeg_path: config.ffmpeg_path.clone(),
        log_level: config.ffmpeg_log_level.clone(),
    }));

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool)
    tracing::info!("Instantiating repositories...");
    let conversion_repo = Arc::new(PgConversionRepository::new(pool.clone()));

    // 2. Instantiate services (inject repositories and backends)
    tracing::info!("Instantiating services...");
    let conversion_service = Arc::new(ConversionService::new(
        conversion_repo,
        tts_repo,
        encoder,
        store,
        config.font_dir.clone(),
        config.conversion_timeout(),
    ));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let conversion_controller = Arc::new(ConversionController::new(conversion_service));

    // Start HTTP server with all routes
    start_http_server(pool, config, conversion_controller).await?;

    Ok(())
}

async fn build_tts_repository(
    config: &Config,
) -> Result<Arc<dyn TtsRepository>, Box<dyn std::error::Error>> {
    let repo: Arc<dyn TtsRepository> = match config.tts_provider {
        TtsProvider::Google => {
            tracing::info!("Using Google Translate TTS backend");
            Arc::new(GoogleTtsRepository::new(reqwest::Client::builder().build()?))
        }
        TtsProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
            let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
            if !has_access_key || !has_secret_key {
                tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
            }

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");

            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
            Arc::new(PollyTtsRepository::new(polly_client))
        }
        TtsProvider::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or("OPENAI_API_KEY is required when TTS_PROVIDER=openai")?;
            tracing::info!(model = %config.openai_tts_model, "Using OpenAI TTS backend");

            let client = async_openai::Client::with_config(
                async_openai::config::OpenAIConfig::new().with_api_key(api_key),
            );
            Arc::new(OpenAiTtsRepository::new(
                Arc::new(client),
                config.openai_tts_model.clone(),
                config.openai_tts_voice.clone(),
            ))
        }
    };

    Ok(repo)
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "texttovideo_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "texttovideo_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
