use qc_engine::{EligibilityDelays, MAX_DELAY_MINUTES, ScoringConfig};
use serde::Deserialize;
use thiserror::Error;

/// Deployment environment
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration from the environment: {0}")]
    Env(#[from] envy::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Service configuration, read from environment variables (a `.env` file is loaded first).
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    pub database_url: String,
    pub jwt_secret: String,
    /// Key material for the private cookie jar, at least 64 bytes
    pub cookie_secret: String,
    #[serde(default)]
    pub env: Environment,
    /// Comma separated list of origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    #[serde(default = "default_base_score")]
    pub base_score: i64,
    #[serde(default = "default_multiple_correct_multiplier")]
    pub multiple_correct_multiplier: i64,
    #[serde(default = "default_easy_delay_minutes")]
    pub easy_delay_minutes: i64,
    #[serde(default = "default_medium_delay_minutes")]
    pub medium_delay_minutes: i64,
    #[serde(default = "default_hard_delay_minutes")]
    pub hard_delay_minutes: i64,

    /// Maximum number of flashcards a free account may own
    #[serde(default = "default_free_flashcard_limit")]
    pub free_flashcard_limit: i64,
}

fn default_allowed_origins() -> String {
    "http://localhost:8080".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_db_max_connections() -> u32 {
    10
}

const fn default_base_score() -> i64 {
    1
}

const fn default_multiple_correct_multiplier() -> i64 {
    2
}

const fn default_easy_delay_minutes() -> i64 {
    30
}

const fn default_medium_delay_minutes() -> i64 {
    10_080
}

const fn default_hard_delay_minutes() -> i64 {
    40_320
}

const fn default_free_flashcard_limit() -> i64 {
    100
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Self = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Build from explicit key/value pairs, using the same names as the environment.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::from_iter(pairs)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < 32 {
            return Err(ConfigError::Invalid(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }
        if self.cookie_secret.len() < 64 {
            return Err(ConfigError::Invalid(
                "COOKIE_SECRET must be at least 64 bytes long".to_string(),
            ));
        }
        if self.base_score < 0 || self.multiple_correct_multiplier < 1 {
            return Err(ConfigError::Invalid(
                "BASE_SCORE must be non-negative and MULTIPLE_CORRECT_MULTIPLIER at least 1"
                    .to_string(),
            ));
        }
        let scoring = self.scoring();
        if scoring.max_points().is_none() {
            return Err(ConfigError::Invalid(
                "BASE_SCORE x 8 x MULTIPLE_CORRECT_MULTIPLIER must fit in a 64-bit integer"
                    .to_string(),
            ));
        }
        if [
            self.easy_delay_minutes,
            self.medium_delay_minutes,
            self.hard_delay_minutes,
        ]
        .iter()
        .any(|minutes| *minutes < 0)
        {
            return Err(ConfigError::Invalid(
                "eligibility delays cannot be negative".to_string(),
            ));
        }
        if scoring.delays.longest() > MAX_DELAY_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "eligibility delays cannot exceed {MAX_DELAY_MINUTES} minutes"
            )));
        }
        Ok(())
    }

    /// Scoring constants handed to the engine.
    pub const fn scoring(&self) -> ScoringConfig {
        ScoringConfig {
            base_score: self.base_score,
            multiple_correct_multiplier: self.multiple_correct_multiplier,
            delays: EligibilityDelays {
                easy_minutes: self.easy_delay_minutes,
                medium_minutes: self.medium_delay_minutes,
                hard_minutes: self.hard_delay_minutes,
            },
        }
    }

    pub fn parsed_allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }
}
