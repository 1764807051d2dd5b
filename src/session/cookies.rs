use axum::http::{header::SET_COOKIE, HeaderName};

use crate::config::CookieConfig;

use super::keys;

pub type SetCookie = (HeaderName, String);

/// `Set-Cookie` header storing one session attribute
pub fn set_cookie(name: &str, value: &str, config: &CookieConfig) -> SetCookie {
    (SET_COOKIE, render(name, value, Some(config.max_age_secs), config))
}

/// `Set-Cookie` header that deletes a session attribute
pub fn expire_cookie(name: &str, config: &CookieConfig) -> SetCookie {
    (SET_COOKIE, render(name, "", Some(0), config))
}

/// Expire every cookie the session is made of
pub fn clear_session(config: &CookieConfig) -> Vec<SetCookie> {
    keys::ALL.iter().map(|name| expire_cookie(name, config)).collect()
}

/// Strip what a cookie value cannot carry: whitespace, separators, non-ASCII
pub fn cookie_safe(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, ';' | ',' | '"' | '\\'))
        .collect()
}

fn render(name: &str, value: &str, max_age: Option<u64>, config: &CookieConfig) -> String {
    let value = cookie_safe(value);

    let mut cookie = format!("{}={}; Path=/; SameSite={}", name, value, config.same_site);
    if let Some(max_age) = max_age {
        cookie.push_str(&format!("; Max-Age={}", max_age));
    }
    if config.secure {
        cookie.push_str("; Secure");
    }
    if config.http_only {
        cookie.push_str("; HttpOnly");
    }
    cookie
}

/// Roles cookie, `|` separated so the value stays a valid cookie octet run
pub fn roles_cookie(roles: &[String], config: &CookieConfig) -> SetCookie {
    let joined = roles
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .collect::<Vec<_>>()
        .join("|");
    set_cookie(keys::ROLES, &joined, config)
}
