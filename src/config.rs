use clap::Parser;

use crate::rate_limit::{ConfigError, RateLimitConfig};

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "devfolio-gate")]
#[command(about = "Rate-limited admin login service for the portfolio site")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Rate limit max requests per window
    #[arg(long, env = "RATE_LIMIT_TOKENS", default_value_t = 5)]
    pub rate_limit: u32,

    // Rate limit window in milliseconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_MS", default_value_t = 60_000)]
    pub rate_window_ms: u64,

    // How often stale rate records are swept, in seconds
    #[arg(
        long,
        env = "RATE_LIMIT_SWEEP_SECS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub sweep_interval: u64,

    // Admin login email
    #[arg(long, env = "ADMIN_EMAIL", default_value = "")]
    pub admin_email: String,

    // Argon2 PHC string for the admin password (see --hash-password)
    #[arg(long, env = "ADMIN_PASSWORD_HASH", default_value = "", hide_env_values = true)]
    pub admin_password_hash: String,

    // Print the Argon2 hash for a plaintext password and exit
    #[arg(long, value_name = "PASSWORD")]
    pub hash_password: Option<String>,
}

impl Args {
    pub fn rate_limit_config(&self) -> Result<RateLimitConfig, ConfigError> {
        RateLimitConfig::new(self.rate_limit, self.rate_window_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_login_quota() {
        let args = Args::try_parse_from(["devfolio-gate"]).unwrap();
        let config = args.rate_limit_config().unwrap();
        assert_eq!(config.tokens(), 5);
        assert_eq!(config.interval_ms(), 60_000);
        assert_eq!(args.sweep_interval, 60);
    }

    #[test]
    fn zero_window_fails_fast() {
        let args = Args::try_parse_from(["devfolio-gate", "--rate-window-ms", "0"]).unwrap();
        assert_eq!(args.rate_limit_config(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn zero_sweep_interval_fails_fast() {
        assert!(Args::try_parse_from(["devfolio-gate", "--sweep-interval", "0"]).is_err());
        let args = Args::try_parse_from(["devfolio-gate", "--sweep-interval", "1"]).unwrap();
        assert_eq!(args.sweep_interval, 1);
    }

    #[test]
    fn negative_tokens_do_not_parse() {
        assert!(Args::try_parse_from(["devfolio-gate", "--rate-limit", "-1"]).is_err());
    }
}
