use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub redis: RedisConfig,
    pub training: TrainingConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub api_url: String,     // base URL including the /api prefix
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub sentinel_enabled: bool,
    pub sentinel_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrainingConfig {
    pub completion_ratio: f64,      // share of the duration that counts as watched
    pub seek_tolerance_secs: f64,
    pub poll_interval_secs: u64,
    pub pass_mark: usize,           // correct answers needed out of the bank
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            completion_ratio: 0.95,
            seek_tolerance_secs: 5.0,
            poll_interval_secs: 1,
            pass_mark: 16,
        }
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                static_dir: "static".to_string(),
            },
            backend: BackendConfig {
                api_url: "http://127.0.0.1:5001/api".to_string(),
                timeout_secs: 5,
            },
            redis: RedisConfig {
                url: "redis://127.0.0.1:6379".to_string(),
                sentinel_enabled: false,
                sentinel_url: None,
            },
            training: TrainingConfig::default(),
            cors: CorsConfig {
                allowed_origin: "*".to_string(),
            },
        }
    }
}
