use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// Check `.env` against the variables listed in `Config::from_env`.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but cannot be parsed.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar { name: String, value: String },

    /// A configured URL is not a valid absolute URL.
    #[error("Invalid URL for {name}: {source}")]
    InvalidUrl {
        name: String,
        #[source]
        source: url::ParseError,
    },

    /// The per-IP rate limiter rejected its settings.
    #[error("Invalid rate limiter configuration")]
    RateLimit,
}
