use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Artifacts
    pub storage_dir: PathBuf,
    pub font_dir: PathBuf,
    // Speech synthesis
    pub tts_provider: TtsProvider,
    pub aws_region: String,
    pub openai_api_key: Option<String>,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
    // Video encoding
    pub ffmpeg_path: PathBuf,
    pub ffmpeg_log_level: String,
    /// Zero disables the per-job timeout.
    pub conversion_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    Google,
    Polly,
    OpenAi,
}

impl TtsProvider {
    fn parse(value: &str) -> Result<Self, String> {
        match value.to_lowercase().as_str() {
            "google" => Ok(TtsProvider::Google),
            "polly" => Ok(TtsProvider::Polly),
            "openai" => Ok(TtsProvider::OpenAi),
            other => Err(format!("unknown TTS_PROVIDER: {}", other)),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let tts_provider =
            TtsProvider::parse(&env::var("TTS_PROVIDER").unwrap_or_else(|_| "google".to_string()))?;
        let openai_api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());

        if tts_provider == TtsProvider::OpenAi && openai_api_key.is_none() {
            return Err("OPENAI_API_KEY is required when TTS_PROVIDER=openai".into());
        }

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            storage_dir: env::var("STORAGE_DIR")
                .unwrap_or_else(|_| "storage".to_string())
                .into(),
            font_dir: env::var("FONT_DIR")
                .unwrap_or_else(|_| "assets/fonts".to_string())
                .into(),
            tts_provider,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            openai_api_key,
            openai_tts_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            openai_tts_voice: env::var("OPENAI_TTS_VOICE").unwrap_or_default(),
            ffmpeg_path: env::var("FFMPEG_PATH")
                .unwrap_or_else(|_| "ffmpeg".to_string())
                .into(),
            ffmpeg_log_level: env::var("FFMPEG_LOG_LEVEL").unwrap_or_else(|_| "error".to_string()),
            conversion_timeout_secs: env::var("CONVERSION_TIMEOUT_SECS")
                .unwrap_or_else(|_| "1800".to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn conversion_timeout(&self) -> Option<std::time::Duration> {
        (self.conversion_timeout_secs > 0)
            .then(|| std::time::Duration::from_secs(self.conversion_timeout_secs))
    }
}
