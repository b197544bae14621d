//! Turns an `Action` into an HTTP response.
//!
//! Every response leaving the gate must carry the refreshed session cookies,
//! including redirects: a redirect that drops a freshly rotated token logs
//! the user out as a side effect. Forced logout is the one place cookies are
//! deliberately expired instead of propagated.

use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use cookie::Cookie;

use crate::gate::decision::Action;
use crate::gate::routes::RouteTable;

/// Query parameter explaining a forced logout on the sign-in page.
pub const LOGOUT_REASON_PARAM: &str = "reason";

/// Build the response for an action, or `None` when the request should
/// continue to its handler (the caller appends the refreshed cookies onto the
/// pass-through response itself).
pub fn respond(
    action: &Action,
    table: &RouteTable,
    refreshed: &[Cookie<'static>],
    auth_cookie_names: &[String],
) -> Option<Response> {
    match action {
        Action::Allow => None,
        Action::Redirect { destination, query } => {
            let location = match query {
                Some((name, value)) => append_query(destination, name, value),
                None => destination.clone(),
            };
            let mut response = Redirect::temporary(&location).into_response();
            append_set_cookies(response.headers_mut(), refreshed, &[]);
            Some(response)
        }
        Action::ForceLogout { reason } => {
            tracing::warn!(reason, "terminating session");
            let location = append_query(&table.sign_in_path, LOGOUT_REASON_PARAM, reason);
            let mut response = Redirect::temporary(&location).into_response();
            for name in auth_cookie_names {
                append_set_cookie(response.headers_mut(), &removal_cookie(name));
            }
            // Refreshed cookies still ride along, minus the ones just
            // expired, so the expiry is not overwritten.
            append_set_cookies(response.headers_mut(), refreshed, auth_cookie_names);
            Some(response)
        }
    }
}

/// Append each cookie as a `Set-Cookie` header, skipping names listed in
/// `except`. Attributes (path, expiry, flags) survive verbatim because the
/// cookie renders itself.
pub fn append_set_cookies(headers: &mut HeaderMap, cookies: &[Cookie<'static>], except: &[String]) {
    for cookie in cookies {
        if except.iter().any(|name| name == cookie.name()) {
            continue;
        }
        append_set_cookie(headers, cookie);
    }
}

fn append_set_cookie(headers: &mut HeaderMap, cookie: &Cookie<'_>) {
    match HeaderValue::from_str(&cookie.to_string()) {
        Ok(value) => {
            headers.append(SET_COOKIE, value);
        }
        Err(error) => {
            tracing::warn!(name = cookie.name(), error = %error, "unencodable cookie dropped");
        }
    }
}

/// An expired replacement for an auth cookie: empty value, root path, expiry
/// in the past.
fn removal_cookie(name: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_string(), "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

fn append_query(destination: &str, name: &str, value: &str) -> String {
    let separator = if destination.contains('?') { '&' } else { '?' };
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(name, value)
        .finish();
    format!("{destination}{separator}{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;
    use axum::http::StatusCode;

    fn set_cookie_values(response: &Response) -> Vec<String> {
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    fn location(response: &Response) -> &str {
        response.headers().get(LOCATION).unwrap().to_str().unwrap()
    }

    #[test]
    fn allow_is_a_pass_through_sentinel() {
        let table = RouteTable::default();
        assert!(respond(&Action::Allow, &table, &[], &[]).is_none());
    }

    #[test]
    fn redirect_keeps_refreshed_cookies_and_encodes_the_query() {
        let table = RouteTable::default();
        let refreshed = vec![Cookie::new("portal_session", "tok-123")];
        let action = Action::Redirect {
            destination: "/sign-in".to_string(),
            query: Some(("redirectTo", "/admin/applicants".to_string())),
        };

        let response = respond(&action, &table, &refreshed, &[]).unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/sign-in?redirectTo=%2Fadmin%2Fapplicants");

        let cookies = set_cookie_values(&response);
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].starts_with("portal_session=tok-123"));
    }

    #[test]
    fn redirect_without_query_uses_the_destination_verbatim() {
        let table = RouteTable::default();
        let action = Action::Redirect {
            destination: "/welcome-and-verify".to_string(),
            query: None,
        };
        let response = respond(&action, &table, &[], &[]).unwrap();
        assert_eq!(location(&response), "/welcome-and-verify");
    }

    #[test]
    fn forced_logout_expires_auth_cookies_and_keeps_the_rest() {
        let table = RouteTable::default();
        let auth_names = vec!["portal_session".to_string()];
        // The provider refreshed the session this very request; the expiry
        // must still win.
        let refreshed = vec![
            Cookie::new("portal_session", "fresh-token"),
            Cookie::new("locale", "en"),
        ];
        let action = Action::ForceLogout {
            reason: "missing_role",
        };

        let response = respond(&action, &table, &refreshed, &auth_names).unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/sign-in?reason=missing_role");

        let cookies = set_cookie_values(&response);
        let session: Vec<&String> = cookies
            .iter()
            .filter(|c| c.starts_with("portal_session="))
            .collect();
        assert_eq!(session.len(), 1, "expiry must not be overwritten: {cookies:?}");
        assert!(session[0].starts_with("portal_session=;"));
        assert!(session[0].contains("Max-Age=0"));
        assert!(session[0].contains("Path=/"));

        assert!(cookies.iter().any(|c| c.starts_with("locale=en")));
    }

    #[test]
    fn copy_skips_excepted_names_only() {
        let mut headers = HeaderMap::new();
        let cookies = vec![
            Cookie::new("keep-me", "1"),
            Cookie::new("drop-me", "2"),
        ];
        append_set_cookies(&mut headers, &cookies, &["drop-me".to_string()]);

        let values: Vec<_> = headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(values, vec!["keep-me=1"]);
    }

    #[test]
    fn cookie_attributes_survive_the_copy() {
        let mut cookie = Cookie::new("portal_session", "tok");
        cookie.set_path("/");
        cookie.set_http_only(true);

        let mut headers = HeaderMap::new();
        append_set_cookies(&mut headers, &[cookie], &[]);

        let value = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(value.contains("Path=/"));
        assert!(value.contains("HttpOnly"));
    }

    #[test]
    fn query_append_handles_existing_query_strings() {
        assert_eq!(
            append_query("/sign-in", "reason", "invalid_role"),
            "/sign-in?reason=invalid_role"
        );
        assert_eq!(
            append_query("/sign-in?foo=1", "reason", "invalid_role"),
            "/sign-in?foo=1&reason=invalid_role"
        );
    }
}
