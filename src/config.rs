use std::env;

use crate::error::{Error, Result};

pub const DEFAULT_BUSTIME_API_BASE: &str = "http://realtime.portauthority.org/bustime/api/v2/";
pub const DEFAULT_DISTANCE_API_BASE: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";
/// Points per distance matrix request. Much more than this and the URL gets
/// long enough for the service to reject it.
pub const DEFAULT_DISTANCE_WINDOW_SIZE: usize = 45;

#[derive(Debug, Clone)]
pub struct Config {
    pub bustime_api_base: String,
    pub bustime_api_key: String,
    pub distance_api_base: String,
    pub distance_api_key: String,
    pub distance_window_size: usize,
}

impl Config {
    /// Read config from the environment, after loading `.env` if there is one
    pub fn from_env() -> Result<Config> {
        dotenvy::from_filename(".env").ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| Error::Config(format!("{} is not set", name)))
        };

        let distance_window_size = match lookup("DISTANCE_WINDOW_SIZE") {
            Some(size) => size
                .parse()
                .map_err(|e| Error::Config(format!("DISTANCE_WINDOW_SIZE: {}", e)))?,
            None => DEFAULT_DISTANCE_WINDOW_SIZE,
        };
        if distance_window_size == 0 {
            return Err(Error::Config("DISTANCE_WINDOW_SIZE must be at least 1".to_string()));
        }

        Ok(Config {
            bustime_api_base: lookup("BUSTIME_API_BASE")
                .unwrap_or(DEFAULT_BUSTIME_API_BASE.to_string()),
            bustime_api_key: required("BUSTIME_API_KEY")?,
            distance_api_base: lookup("DISTANCE_API_BASE")
                .unwrap_or(DEFAULT_DISTANCE_API_BASE.to_string()),
            distance_api_key: required("DISTANCE_API_KEY")?,
            distance_window_size,
        })
    }
}
