use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_days: i64,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    /// Base URL of the external upload service the admin client posts files to.
    pub image_service_url: String,
    /// Phone number the storefront hands checkout summaries off to.
    pub contact_phone: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_ttl_days = env::var("JWT_TTL_DAYS")
            .ok()
            .and_then(|d| d.parse::<i64>().ok())
            .filter(|d| *d > 0)
            .unwrap_or(7);
        let image_service_url = env::var("IMAGE_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:3001".to_string());
        let contact_phone = env::var("CONTACT_PHONE").unwrap_or_else(|_| "+1234567890".to_string());

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            jwt_ttl_days,
            admin_username: non_empty_var("ADMIN_USERNAME"),
            admin_password: non_empty_var("ADMIN_PASSWORD"),
            image_service_url,
            contact_phone,
        })
    }

    /// Seed credentials, present only when both halves are configured.
    pub fn admin_seed(&self) -> Option<(&str, &str)> {
        match (&self.admin_username, &self.admin_password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
