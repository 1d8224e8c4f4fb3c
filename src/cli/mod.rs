// CLI module for plantdoc
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;

/// plantdoc - Plant disease diagnosis API backed by Gemini vision models
#[derive(Parser, Debug, Default)]
#[command(name = "plantdoc", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.plantdoc/config.toml)
    #[arg(long, env = "PLANTDOC_CONFIG")]
    pub config: Option<String>,

    /// Address to bind, overrides `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides `server.port`
    #[arg(long)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_loaded_values() {
        let args = Args::parse_from(["plantdoc", "--host", "127.0.0.1", "--port", "9000"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = AppConfig::default();
        Args::default().apply(&mut config);
        assert_eq!(config.server.port, 8000);
    }
}
