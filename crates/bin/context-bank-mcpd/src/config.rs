use clap::{Parser, builder::BoolishValueParser};
use reqwest::Url;
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;

const DEFAULT_ONYX_API_BASE: &str = "http://localhost:3000";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Parser, Debug)]
#[command(name = "context-bank-mcpd", version, about = "Context Bank MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "ONYX_API_BASE", default_value = DEFAULT_ONYX_API_BASE)]
    onyx_api_base: String,

    #[arg(long, env = "ONYX_API_KEY", hide_env_values = true)]
    onyx_api_key: Option<String>,

    #[arg(long, env = "LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    #[arg(
        long = "stdio",
        env = "CONTEXT_BANK_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(long, env = "CONTEXT_BANK_MCP_HTTP_ADDR")]
    mcp_http_addr: Option<SocketAddr>,

    #[arg(
        long,
        env = "CONTEXT_BANK_MCP_STATEFUL",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    mcp_stateful: bool,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
pub struct ContextBankConfig {
    pub onyx_api_base: String,
    pub onyx_api_key: Option<String>,
    pub log_level: String,
    pub enable_stdio: bool,
    pub mcp_http_addr: Option<SocketAddr>,
    pub mcp_stateful: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl ContextBankConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for ContextBankConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let onyx_api_base = args.onyx_api_base.trim().trim_end_matches('/').to_string();
        if onyx_api_base.is_empty() {
            return Err(ConfigError::MissingSetting("ONYX_API_BASE"));
        }
        let valid_base = Url::parse(&onyx_api_base)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host());
        if !valid_base {
            return Err(ConfigError::InvalidSetting {
                name: "ONYX_API_BASE",
                value: args.onyx_api_base,
            });
        }

        let onyx_api_key = args.onyx_api_key.filter(|value| !value.trim().is_empty());

        let log_level = args.log_level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&log_level.as_str()) {
            return Err(ConfigError::InvalidSetting {
                name: "LOG_LEVEL",
                value: args.log_level,
            });
        }

        if !args.enable_stdio && args.mcp_http_addr.is_none() {
            return Err(ConfigError::MissingSetting("CONTEXT_BANK_MCP_HTTP_ADDR"));
        }

        Ok(Self {
            onyx_api_base,
            onyx_api_key,
            log_level,
            enable_stdio: args.enable_stdio,
            mcp_http_addr: args.mcp_http_addr,
            mcp_stateful: args.mcp_stateful,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            onyx_api_base: DEFAULT_ONYX_API_BASE.to_string(),
            onyx_api_key: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            enable_stdio: true,
            mcp_http_addr: None,
            mcp_stateful: true,
        }
    }

    #[test]
    fn defaults_parse() {
        let config = ContextBankConfig::try_from(base_args()).expect("config should parse");

        assert_eq!(config.onyx_api_base, "http://localhost:3000");
        assert!(config.onyx_api_key.is_none());
        assert_eq!(config.log_level, "info");
        assert!(config.enable_stdio);
        assert!(config.mcp_http_addr.is_none());
    }

    #[test]
    fn trims_base_url_and_blank_api_key() {
        let mut args = base_args();
        args.onyx_api_base = " https://onyx.example.com/ ".to_string();
        args.onyx_api_key = Some("   ".to_string());
        args.log_level = "DEBUG".to_string();

        let config = ContextBankConfig::try_from(args).expect("config should parse");

        assert_eq!(config.onyx_api_base, "https://onyx.example.com");
        assert!(config.onyx_api_key.is_none());
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn rejects_empty_or_invalid_base_url() {
        let mut args = base_args();
        args.onyx_api_base = String::new();
        assert!(matches!(
            ContextBankConfig::try_from(args),
            Err(ConfigError::MissingSetting("ONYX_API_BASE"))
        ));

        let mut args = base_args();
        args.onyx_api_base = "ftp://onyx".to_string();
        assert!(matches!(
            ContextBankConfig::try_from(args),
            Err(ConfigError::InvalidSetting { name: "ONYX_API_BASE", .. })
        ));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut args = base_args();
        args.log_level = "verbose".to_string();
        assert!(matches!(
            ContextBankConfig::try_from(args),
            Err(ConfigError::InvalidSetting { name: "LOG_LEVEL", .. })
        ));
    }

    #[test]
    fn requires_some_transport() {
        let mut args = base_args();
        args.enable_stdio = false;
        assert!(matches!(
            ContextBankConfig::try_from(args),
            Err(ConfigError::MissingSetting("CONTEXT_BANK_MCP_HTTP_ADDR"))
        ));

        let mut args = base_args();
        args.enable_stdio = false;
        args.mcp_http_addr = Some("127.0.0.1:4020".parse().expect("valid MCP addr"));
        let config = ContextBankConfig::try_from(args).expect("config should parse");
        assert!(!config.enable_stdio);
    }
}
