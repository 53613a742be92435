use anyhow::{Context, Result};
use std::{env, str::FromStr};

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub image_host: ImageHostConfig,
    pub mail: MailConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: env::var("DATABASE_HOST")?,
            port: parse_var("DATABASE_PORT")?,
            username: env::var("DATABASE_USERNAME")?,
            password: env::var("DATABASE_PASSWORD")?,
            database: env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: env::var("REDIS_HOST")?,
            port: parse_var("REDIS_PORT")?,
        };
        let auth = AuthConfig {
            ttl: parse_var("AUTH_TOKEN_TTL")?,
            verification_ttl: parse_var_or("VERIFICATION_TOKEN_TTL", 60 * 60 * 24)?,
            password_reset_ttl: parse_var_or("PASSWORD_RESET_TOKEN_TTL", 60 * 30)?,
        };
        let image_host = ImageHostConfig {
            endpoint: env::var("IMAGE_HOST_ENDPOINT")
                .unwrap_or_else(|_| "https://api.imgbb.com/1/upload".into()),
            api_key: env::var("IMAGE_HOST_API_KEY")?,
        };
        let mail = MailConfig {
            gmail_access_token: env::var("GMAIL_ACCESS_TOKEN").ok(),
            sender: env::var("MAIL_SENDER").unwrap_or_else(|_| "no-reply@club.local".into()),
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
        };
        let server = ServerConfig {
            port: parse_var_or("PORT", 8080)?,
        };
        Ok(Self {
            database,
            redis,
            auth,
            image_host,
            mail,
            server,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

// TTL はすべて秒
pub struct AuthConfig {
    pub ttl: u64,
    pub verification_ttl: u64,
    pub password_reset_ttl: u64,
}

pub struct ImageHostConfig {
    pub endpoint: String,
    pub api_key: String,
}

pub struct MailConfig {
    pub gmail_access_token: Option<String>,
    pub sender: String,
    pub app_base_url: String,
}

pub struct ServerConfig {
    pub port: u16,
}

fn parse_var<T>(key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(key)
        .with_context(|| format!("{key} is not set"))?
        .parse()
        .with_context(|| format!("{key} has an invalid value"))
}

fn parse_var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(v) => v
            .parse()
            .with_context(|| format!("{key} has an invalid value")),
        Err(_) => Ok(default),
    }
}
