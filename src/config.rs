use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AppError;

pub const DEFAULT_DESCRIPTOR: &str = "temp/file.txt";
pub const DEFAULT_BIND: &str = "0.0.0.0:2003";
pub const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub descriptor_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub workers: usize,
    pub seed: Option<u64>, // None = seed from the clock
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let descriptor_path = PathBuf::from(env_or(&lookup, "GROUPMAP_DESCRIPTOR", DEFAULT_DESCRIPTOR));
        let bind_addr: SocketAddr = match env_parse(&lookup, "GROUPMAP_BIND")? {
            Some(addr) => addr,
            None => parse_value("GROUPMAP_BIND", DEFAULT_BIND)?,
        };
        let workers: usize = env_parse(&lookup, "GROUPMAP_WORKERS")?.unwrap_or(DEFAULT_WORKERS);
        let seed: Option<u64> = env_parse(&lookup, "GROUPMAP_SEED")?;

        if workers == 0 {
            return Err(AppError::Config("GROUPMAP_WORKERS must be at least 1".to_string()));
        }

        Ok(Self {
            descriptor_path,
            bind_addr,
            workers,
            seed,
        })
    }
}

fn lookup_non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup_non_empty(lookup, key).unwrap_or_else(|| default.to_string())
}

fn env_parse<F, T>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup_non_empty(lookup, key)
        .map(|value| parse_value(key, &value))
        .transpose()
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|err| AppError::Config(format!("Invalid {key}={value:?}: {err}")))
}
