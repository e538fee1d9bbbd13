use auth::TokenPolicy;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;
use time::Duration;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Attributes for the two session cookies.
///
/// Both are HTTP-only, same-site `Lax` and scoped to `/`. `secure` is turned
/// on in production.
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    pub secure: bool,
    pub domain: Option<String>,
    pub access_max_age: Duration,
    pub refresh_max_age: Duration,
}

impl CookiePolicy {
    /// Cookie lifetimes follow the token lifetimes.
    pub fn new(secure: bool, domain: Option<String>, tokens: &TokenPolicy) -> Self {
        Self {
            secure,
            domain,
            access_max_age: Duration::seconds(tokens.access_ttl.num_seconds()),
            refresh_max_age: Duration::seconds(tokens.refresh_ttl.num_seconds()),
        }
    }

    pub fn set_access_token(&self, jar: CookieJar, token: &str) -> CookieJar {
        jar.add(self.cookie(ACCESS_TOKEN_COOKIE, token.to_string(), self.access_max_age))
    }

    pub fn set_refresh_token(&self, jar: CookieJar, token: &str) -> CookieJar {
        jar.add(self.cookie(REFRESH_TOKEN_COOKIE, token.to_string(), self.refresh_max_age))
    }

    /// Expire both cookies, whether or not the request carried them.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.removal(ACCESS_TOKEN_COOKIE))
            .add(self.removal(REFRESH_TOKEN_COOKIE))
    }

    fn cookie(&self, name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
        let mut builder = Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(max_age);
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        builder.build()
    }

    fn removal(&self, name: &'static str) -> Cookie<'static> {
        let mut cookie = self.cookie(name, String::new(), Duration::ZERO);
        cookie.make_removal();
        cookie
    }
}
