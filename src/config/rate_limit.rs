use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Token bucket: one token every `per_second` seconds, up to `burst_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    pub per_second: u64,
    pub burst_size: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateLimitParseError {
    #[error("empty value")]
    Empty,
    #[error("'{0}' is not of the form per:burst")]
    Shape(String),
    #[error("'{0}' is not a positive integer")]
    Number(String),
    #[error("unknown route group '{0}', expected read or write")]
    Group(String),
}

impl FromStr for RateLimitRule {
    type Err = RateLimitParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (per, burst) = raw
            .trim()
            .split_once(':')
            .ok_or_else(|| RateLimitParseError::Shape(raw.trim().to_string()))?;
        Ok(Self {
            per_second: positive(per)?,
            burst_size: positive(burst)?,
        })
    }
}

fn positive<N: FromStr + Default + PartialEq>(raw: &str) -> Result<N, RateLimitParseError> {
    let raw = raw.trim();
    raw.parse::<N>()
        .ok()
        .filter(|n| *n != N::default())
        .ok_or_else(|| RateLimitParseError::Number(raw.to_string()))
}

/// Changelist and detail reads get a larger budget than writes.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub read: RateLimitRule,
    pub write: RateLimitRule,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            read: RateLimitRule {
                per_second: 30,
                burst_size: 60,
            },
            write: RateLimitRule {
                per_second: 10,
                burst_size: 20,
            },
        }
    }
}

impl RateLimitConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// `RATE_LIMIT_ENABLED` toggles limiting; `RATE_LIMIT_CONFIG` is either
    /// one rule for both groups (`10:20`) or `read=30:60,write=10:20`.
    /// Bad values are logged and the defaults kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var("RATE_LIMIT_ENABLED") {
            match crate::admin::list::parse_bool(&raw) {
                Some(enabled) => config.enabled = enabled,
                None => tracing::warn!("Ignoring RATE_LIMIT_ENABLED='{}'", raw),
            }
        }

        if let Ok(raw) = env::var("RATE_LIMIT_CONFIG") {
            if let Err(e) = config.apply(&raw) {
                tracing::warn!("Ignoring RATE_LIMIT_CONFIG='{}': {}", raw, e);
            }
        }

        config
    }

    /// Applies all rules in `raw` or none of them.
    fn apply(&mut self, raw: &str) -> Result<(), RateLimitParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(RateLimitParseError::Empty);
        }

        if !raw.contains('=') {
            let rule: RateLimitRule = raw.parse()?;
            self.read = rule;
            self.write = rule;
            return Ok(());
        }

        let mut next = *self;
        for item in raw.split(',').map(str::trim).filter(|i| !i.is_empty()) {
            let (group, rule) = item
                .split_once('=')
                .ok_or_else(|| RateLimitParseError::Shape(item.to_string()))?;
            let rule: RateLimitRule = rule.parse()?;
            match group.trim().to_ascii_lowercase().as_str() {
                "read" | "get" => next.read = rule,
                "write" => next.write = rule,
                other => return Err(RateLimitParseError::Group(other.to_string())),
            }
        }
        *self = next;
        Ok(())
    }
}
