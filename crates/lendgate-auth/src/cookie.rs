//! Session cookie attributes and `Set-Cookie` rendering.
//!
//! The cookie is always `Secure` and `HttpOnly`: the token must never
//! travel over an insecure channel and must never be readable from
//! client-side scripting. The HTTP layer emits this verbatim on a 2xx
//! login response and emits nothing at all on any denial.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    Lax,
    Strict,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
            SameSite::None => "None",
        }
    }
}

/// The session artifact handed to the HTTP boundary on a successful
/// login.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    /// Raw opaque session token.
    pub value: String,
    pub max_age_secs: u64,
    pub same_site: SameSite,
    pub secure: bool,
    pub http_only: bool,
}

impl SessionCookie {
    pub fn new(name: &str, value: &str, max_age_secs: u64, same_site: SameSite) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            max_age_secs,
            same_site,
            secure: true,
            http_only: true,
        }
    }

    /// Render the `Set-Cookie` header value.
    pub fn to_set_cookie(&self) -> String {
        let mut header = format!(
            "{}={}; Max-Age={}; Path=/; SameSite={}",
            self.name,
            self.value,
            self.max_age_secs,
            self.same_site.as_str(),
        );
        if self.secure {
            header.push_str("; Secure");
        }
        if self.http_only {
            header.push_str("; HttpOnly");
        }
        header
    }
}
