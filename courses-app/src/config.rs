use engine::app::{AppError, AppResult};
use error_stack::ResultExt;
use std::str::FromStr;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DB_NAME_VAR: &str = "COURSES_DB_NAME";
pub const PORT_VAR: &str = "PORT";
pub const METRICS_VAR: &str = "COURSES_METRICS";

pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017/courses";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    /// Falls back to the database named in `database_url`.
    pub db_name: Option<String>,
    pub port: u16,
    pub metrics_enabled: bool,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from whatever `lookup` returns for each variable. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            database_url: lookup(DATABASE_URL_VAR)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            db_name: lookup(DB_NAME_VAR),
            port: parse_or(lookup(PORT_VAR), PORT_VAR, DEFAULT_PORT)?,
            metrics_enabled: parse_or(lookup(METRICS_VAR), METRICS_VAR, true)?,
        })
    }
}

fn parse_or<T>(value: Option<String>, var: &'static str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .change_context(AppError)
            .attach_with(|| format!("{var} has an invalid value: '{value}'")),
    }
}
