use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context};
use axum::http::HeaderValue;

use crate::store::RetryPolicy;

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// Origin of the frontend allowed by CORS.
    pub app_url: HeaderValue,
    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 4000)),
            app_url: HeaderValue::from_static("http://localhost:3000"),
            retry: RetryPolicy::default(),
        }
    }
}

impl Config {
    /// Read the configuration from the environment. Unset variables take
    /// their default, set but malformed ones are an error.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let data_dir = lookup("DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let bind_addr = parse_var(&lookup, "BIND_ADDR")?.unwrap_or(defaults.bind_addr);
        let app_url = match lookup("APP_URL") {
            Some(url) => HeaderValue::from_str(&url)
                .map_err(|_| anyhow!("APP_URL is not a valid origin: {url}"))?,
            None => defaults.app_url,
        };

        let attempts = parse_var(&lookup, "STORE_RETRY_ATTEMPTS")?
            .unwrap_or(defaults.retry.attempts);
        let delay = parse_var(&lookup, "STORE_RETRY_DELAY_MS")?
            .map_or(defaults.retry.initial_delay, Duration::from_millis);

        Ok(Self {
            data_dir,
            bind_addr,
            app_url,
            retry: RetryPolicy::new(attempts, delay),
        })
    }
}

fn parse_var<T>(lookup: impl Fn(&str) -> Option<String>, var: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(var)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .with_context(|| format!("{var} has an invalid value: {value}"))
        })
        .transpose()
}
