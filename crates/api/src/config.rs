use estate_events::EmailConfig;

use crate::auth::jwt::JwtConfig;

/// Credentials for the admin account created at startup when absent.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL connection string. `None` runs on in-memory stores.
    pub database_url: Option<String>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Address of the public intake form, used by the share panel.
    pub public_form_url: String,
    /// Whether `POST /auth/signup` is open (default: `true`).
    pub allow_signup: bool,
    pub admin: Option<AdminBootstrap>,
    /// Where the intake flow posts new-lead notifications.
    pub notify_function_url: Option<String>,
    /// Admin mailbox for new-lead emails.
    pub notify_recipient: Option<String>,
    pub smtp: Option<EmailConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATABASE_URL`         | unset (in-memory stores)   |
    /// | `PUBLIC_FORM_URL`      | `http://localhost:5173`    |
    /// | `ALLOW_SIGNUP`         | `true`                     |
    /// | `ADMIN_EMAIL`          | unset                      |
    /// | `ADMIN_PASSWORD`       | unset                      |
    /// | `NOTIFY_FUNCTION_URL`  | unset                      |
    /// | `NOTIFY_RECIPIENT`     | unset                      |
    ///
    /// SMTP settings are read by [`EmailConfig::from_env`], JWT settings by
    /// [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let allow_signup = parse_flag(
            &std::env::var("ALLOW_SIGNUP").unwrap_or_else(|_| "true".into()),
        )
        .expect("ALLOW_SIGNUP must be true or false");

        let admin = match (non_empty_var("ADMIN_EMAIL"), non_empty_var("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminBootstrap { email, password }),
            (None, None) => None,
            _ => panic!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url: non_empty_var("DATABASE_URL"),
            jwt: JwtConfig::from_env(),
            public_form_url: std::env::var("PUBLIC_FORM_URL")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
            allow_signup,
            admin,
            notify_function_url: non_empty_var("NOTIFY_FUNCTION_URL"),
            notify_recipient: non_empty_var("NOTIFY_RECIPIENT"),
            smtp: EmailConfig::from_env(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn flags() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
