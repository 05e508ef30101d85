//! Configuration for Alumnet
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;
use uuid::Uuid;

/// Alumnet - AlumniConnect directory API
#[derive(Parser, Debug, Clone)]
#[command(name = "alumnet")]
#[command(about = "Alumni/student directory backend")]
pub struct Args {
    /// Unique node identifier for this instance
    #[arg(long, env = "NODE_ID", default_value_t = Uuid::new_v4())]
    pub node_id: Uuid,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8000")]
    pub listen: SocketAddr,

    /// MongoDB connection URI
    #[arg(long, env = "DATABASE_URL", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "DATABASE_NAME", default_value = "alumniconnect")]
    pub mongodb_db: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Whether the DATABASE_URL environment variable was explicitly set.
    /// Reported by the /test diagnostics endpoint.
    pub fn database_url_set() -> bool {
        std::env::var("DATABASE_URL").is_ok()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.mongodb_db.is_empty() {
            return Err("DATABASE_NAME must not be empty".to_string());
        }
        if self.mongodb_uri.is_empty() {
            return Err("DATABASE_URL must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_empty_db_name() {
        let args = Args {
            node_id: Uuid::new_v4(),
            listen: "0.0.0.0:8000".parse().unwrap(),
            mongodb_uri: "mongodb://localhost:27017".into(),
            mongodb_db: String::new(),
            log_level: "info".into(),
        };
        assert!(args.validate().is_err());
    }
}
