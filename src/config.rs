use std::str::FromStr;

use chrono::Duration;

#[derive(Clone)]
pub struct Config {
    pub bind_addr: String,
    pub api_token: String,
    pub admin: AdminConfig,
    pub guard: GuardConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardConfig {
    pub max_attempts: usize,
    pub attempt_window: Duration,
    pub block_duration: Duration,
}

impl Default for GuardConfig {
    fn default() -> Self {
        GuardConfig {
            max_attempts: 5,
            attempt_window: Duration::minutes(15),
            block_duration: Duration::hours(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub iqr_multiplier: f64,
    pub max_lag: usize,
    pub seasonality_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            iqr_multiplier: 1.5,
            max_lag: 5,
            seasonality_threshold: 0.5,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key).ok_or_else(|| anyhow::anyhow!("{} environment variable is required", key))
        };

        let guard_defaults = GuardConfig::default();
        let analysis_defaults = AnalysisConfig::default();

        let max_attempts: usize =
            parse_or(&lookup, "COGITARA_MAX_FAILED_ATTEMPTS", guard_defaults.max_attempts)?;
        if max_attempts == 0 {
            anyhow::bail!("COGITARA_MAX_FAILED_ATTEMPTS must be at least 1");
        }
        let window_minutes: i64 = parse_or(
            &lookup,
            "COGITARA_ATTEMPT_WINDOW_MINUTES",
            guard_defaults.attempt_window.num_minutes(),
        )?;
        let block_minutes: i64 = parse_or(
            &lookup,
            "COGITARA_BLOCK_DURATION_MINUTES",
            guard_defaults.block_duration.num_minutes(),
        )?;
        let iqr_multiplier: f64 = parse_or(
            &lookup,
            "COGITARA_OUTLIER_IQR_MULTIPLIER",
            analysis_defaults.iqr_multiplier,
        )?;
        if !(iqr_multiplier.is_finite() && iqr_multiplier >= 0.0) {
            anyhow::bail!("COGITARA_OUTLIER_IQR_MULTIPLIER must be a non-negative number");
        }

        Ok(Config {
            bind_addr: {
                let port = lookup("COGITARA_PORT").unwrap_or_else(|| "8080".to_string());
                lookup("COGITARA_BIND_ADDR").unwrap_or_else(|| format!("0.0.0.0:{}", port))
            },
            api_token: require("COGITARA_API_TOKEN")?,
            admin: AdminConfig {
                username: require("COGITARA_ADMIN_ID")?,
                password: require("COGITARA_ADMIN_PASSWORD")?,
            },
            guard: GuardConfig {
                max_attempts,
                attempt_window: minutes("COGITARA_ATTEMPT_WINDOW_MINUTES", window_minutes)?,
                block_duration: minutes("COGITARA_BLOCK_DURATION_MINUTES", block_minutes)?,
            },
            analysis: AnalysisConfig {
                iqr_multiplier,
                max_lag: parse_or(&lookup, "COGITARA_AUTOCORR_MAX_LAG", analysis_defaults.max_lag)?,
                seasonality_threshold: parse_or(
                    &lookup,
                    "COGITARA_SEASONALITY_THRESHOLD",
                    analysis_defaults.seasonality_threshold,
                )?,
            },
        })
    }
}

fn minutes(key: &str, value: i64) -> anyhow::Result<Duration> {
    if value < 0 {
        anyhow::bail!("{} must not be negative", key);
    }
    Duration::try_minutes(value).ok_or_else(|| anyhow::anyhow!("{} is out of range", key))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: '{}' ({})", key, raw, e)),
        None => Ok(default),
    }
}
