use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub guard: GuardConfig,
    pub cookies: CookieConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Paths the route guard treats specially
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    pub login_path: String,
    /// Reachable without a session (login, onboarding, email verification)
    pub public_paths: Vec<String>,
    /// Never guarded at all (API, health, static assets)
    pub bypass_paths: Vec<String>,
    pub dashboard_segment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConfig {
    pub secure: bool,
    pub http_only: bool,
    pub same_site: String,
    pub max_age_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: "/auth/login".to_string(),
            public_paths: vec![
                "/auth/login".to_string(),
                "/auth/onboarding".to_string(),
                "/auth/verify-email".to_string(),
            ],
            bypass_paths: vec![
                "/api".to_string(),
                "/health".to_string(),
                "/static".to_string(),
                "/favicon.ico".to_string(),
            ],
            dashboard_segment: "dashboard".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("HARBOR_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("HARBOR_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|v| v.parse().ok())
        {
            self.server.port = port;
        }

        // Guard overrides
        if let Ok(v) = env::var("GUARD_LOGIN_PATH") {
            self.guard.login_path = v;
        }
        if let Ok(v) = env::var("GUARD_PUBLIC_PATHS") {
            self.guard.public_paths = split_list(&v);
        }
        if let Ok(v) = env::var("GUARD_BYPASS_PATHS") {
            self.guard.bypass_paths = split_list(&v);
        }
        if let Ok(v) = env::var("GUARD_DASHBOARD_SEGMENT") {
            self.guard.dashboard_segment = v;
        }

        // Cookie overrides
        if let Ok(v) = env::var("COOKIE_SECURE") {
            self.cookies.secure = v.parse().unwrap_or(self.cookies.secure);
        }
        if let Ok(v) = env::var("COOKIE_HTTP_ONLY") {
            self.cookies.http_only = v.parse().unwrap_or(self.cookies.http_only);
        }
        if let Ok(v) = env::var("COOKIE_SAME_SITE") {
            self.cookies.same_site = v;
        }
        if let Ok(v) = env::var("COOKIE_MAX_AGE_SECS") {
            self.cookies.max_age_secs = v.parse().unwrap_or(self.cookies.max_age_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = split_list(&v);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            guard: GuardConfig::default(),
            cookies: CookieConfig {
                secure: false,
                // The client reads these cookies to render role menus
                http_only: false,
                same_site: "Lax".to_string(),
                max_age_secs: 60 * 60 * 24 * 7, // 1 week
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            guard: GuardConfig::default(),
            cookies: CookieConfig {
                secure: true,
                http_only: false,
                same_site: "Lax".to_string(),
                max_age_secs: 60 * 60 * 24,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            guard: GuardConfig::default(),
            cookies: CookieConfig {
                secure: true,
                http_only: false,
                same_site: "Strict".to_string(),
                max_age_secs: 60 * 60 * 4,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
