use std::env;
use anyhow::{Context, Result};

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/myfirstdatabase";
pub const DEFAULT_DATABASE: &str = "myfirstdatabase";
pub const DEFAULT_COLLECTION: &str = "items";

#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_uri: String,
    /// Overrides the database named in the connection string
    pub mongodb_database: Option<String>,
    pub mongodb_collection: String,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mongodb_uri = lookup("MONGODB_URI")
            .unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string());
        if mongodb_uri.trim().is_empty() {
            anyhow::bail!("MONGODB_URI must not be empty");
        }

        let mongodb_database = lookup("MONGODB_DATABASE").filter(|db| !db.is_empty());

        let mongodb_collection = lookup("MONGODB_COLLECTION")
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            mongodb_uri,
            mongodb_database,
            mongodb_collection,
            service_port,
            service_host,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  MongoDB URI: {}", redact_credentials(&self.mongodb_uri));
        tracing::info!("  MongoDB database: {}",
            self.mongodb_database.as_deref().unwrap_or("(from connection string)"));
        tracing::info!("  MongoDB collection: {}", self.mongodb_collection);
        tracing::info!("  Service listening on: {}", self.bind_address());
    }
}

/// Hide the `user:password@` part of a connection string
fn redact_credentials(uri: &str) -> String {
    let Some((scheme, rest)) = uri.split_once("://") else {
        return uri.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}://***@{}", scheme, &rest[at + 1..]),
        None => uri.to_string(),
    }
}
