use axum_extra::extract::cookie::{Cookie, SameSite};

/// HTTP-only cookie carrying the access token. Production deployments serve
/// the front end from another site, so the cookie must be cross-site and secure.
pub fn token_cookie(name: &str, token: String, production: bool) -> Cookie<'static> {
    let (same_site, secure) = if production {
        (SameSite::None, true)
    } else {
        (SameSite::Strict, false)
    };

    Cookie::build((name.to_string(), token))
        .http_only(true)
        .secure(secure)
        .same_site(same_site)
        .path("/")
        .build()
}

/// Expired, empty counterpart of [`token_cookie`]
pub fn removal_cookie(name: &str, production: bool) -> Cookie<'static> {
    let mut cookie = token_cookie(name, String::new(), production);
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_cookie_is_strict_and_insecure() {
        let cookie = token_cookie("token", "abc".into(), false);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_ne!(cookie.secure(), Some(true));
    }

    #[test]
    fn production_cookie_is_cross_site_and_secure() {
        let cookie = token_cookie("token", "abc".into(), true);
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let cookie = removal_cookie("token", true);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age().map(|d| d.whole_seconds()), Some(0));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        let header = cookie.to_string();
        assert!(header.contains("Max-Age=0"), "{}", header);
        assert!(header.contains("HttpOnly"), "{}", header);
    }
}
