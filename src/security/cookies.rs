// ABOUTME: Cookie parsing and Set-Cookie construction for auth and CSRF cookies
// ABOUTME: Auth cookie is HttpOnly with SameSite chosen by the secure-cookie setting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use crate::config::environment::SecurityConfig;
use crate::constants::http::{AUTH_COOKIE_NAME, CSRF_COOKIE_NAME};
use crate::errors::AppError;
use axum::http::{header, HeaderMap, HeaderValue};

/// `SameSite` attribute values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    /// Sent on top-level navigations and same-site requests
    Lax,
    /// Sent on all requests; requires `Secure`
    None,
}

impl SameSite {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

/// Builder for a single `Set-Cookie` value
#[derive(Debug, Clone)]
pub struct CookieBuilder {
    name: String,
    value: String,
    path: String,
    domain: Option<String>,
    max_age_secs: Option<i64>,
    http_only: bool,
    secure: bool,
    same_site: SameSite,
}

impl CookieBuilder {
    /// Start a cookie with `Path=/` and `SameSite=Lax`
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: "/".to_owned(),
            domain: None,
            max_age_secs: None,
            http_only: false,
            secure: false,
            same_site: SameSite::Lax,
        }
    }

    /// Set `Domain`
    #[must_use]
    pub fn domain(mut self, domain: Option<&str>) -> Self {
        self.domain = domain.map(str::to_owned);
        self
    }

    /// Set `Max-Age` in seconds
    #[must_use]
    pub const fn max_age(mut self, seconds: i64) -> Self {
        self.max_age_secs = Some(seconds);
        self
    }

    /// Set `HttpOnly`
    #[must_use]
    pub const fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Set `Secure`
    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set `SameSite`
    #[must_use]
    pub const fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Render the `Set-Cookie` header value
    #[must_use]
    pub fn build(&self) -> String {
        let mut cookie = format!("{}={}; Path={}", self.name, self.value, self.path);
        if let Some(domain) = &self.domain {
            cookie.push_str("; Domain=");
            cookie.push_str(domain);
        }
        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={max_age}"));
        }
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str("; SameSite=");
        cookie.push_str(self.same_site.as_str());
        cookie
    }

    /// Render as a header value
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie contains bytes not allowed in headers
    pub fn to_header_value(&self) -> Result<HeaderValue, AppError> {
        HeaderValue::from_str(&self.build())
            .map_err(|e| AppError::internal(format!("Invalid Set-Cookie value: {e}")))
    }
}

/// Read a cookie from the `Cookie` request header(s)
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn auth_cookie(value: &str, max_age_secs: i64, config: &SecurityConfig) -> CookieBuilder {
    // Cross-site frontends need SameSite=None, which browsers only honor with Secure
    let same_site = if config.cookie_secure {
        SameSite::None
    } else {
        SameSite::Lax
    };

    CookieBuilder::new(AUTH_COOKIE_NAME, value)
        .domain(config.cookie_domain.as_deref())
        .max_age(max_age_secs)
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(same_site)
}

/// Append a `Set-Cookie` carrying the access token
///
/// # Errors
///
/// Returns an error if the token cannot be encoded as a header value
pub fn set_auth_cookie(
    headers: &mut HeaderMap,
    token: &str,
    max_age_hours: i64,
    config: &SecurityConfig,
) -> Result<(), AppError> {
    let cookie = auth_cookie(token, max_age_hours * 3600, config).to_header_value()?;
    headers.append(header::SET_COOKIE, cookie);
    Ok(())
}

/// Append a `Set-Cookie` that expires the auth cookie immediately
///
/// # Errors
///
/// Returns an error if the header value cannot be built
pub fn clear_auth_cookie(headers: &mut HeaderMap, config: &SecurityConfig) -> Result<(), AppError> {
    let cookie = auth_cookie("", 0, config).to_header_value()?;
    headers.append(header::SET_COOKIE, cookie);
    Ok(())
}

/// Append a `Set-Cookie` carrying the CSRF token
///
/// # Errors
///
/// Returns an error if the token cannot be encoded as a header value
pub fn set_csrf_cookie(
    headers: &mut HeaderMap,
    token: &str,
    max_age_secs: i64,
    config: &SecurityConfig,
) -> Result<(), AppError> {
    let cookie = CookieBuilder::new(CSRF_COOKIE_NAME, token)
        .domain(config.cookie_domain.as_deref())
        .max_age(max_age_secs)
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .to_header_value()?;
    headers.append(header::SET_COOKIE, cookie);
    Ok(())
}
