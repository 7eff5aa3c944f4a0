//! Authenticated request construction.
//!
//! Building a request is pure: [`build`] turns a verb, a path and a
//! parameter bag into a [`RequestDescriptor`] without touching the network.
//! Sending is a separate step in the HTTP layer.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::query::Params;
use crate::{Error, Result};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A fully resolved request, ready to hand to the transport.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP verb
    pub method: Method,
    /// Absolute URL including any query string
    pub url: Url,
    /// Authorization, Accept and (for bodies) Content-Type headers
    pub headers: HeaderMap,
    /// Form-encoded body for POST/PUT
    pub body: Option<String>,
}

impl RequestDescriptor {
    /// Look up a header value as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub(crate) fn into_request(self, http: &reqwest::Client) -> reqwest::RequestBuilder {
        let builder = http
            .request(self.method, self.url)
            .headers(self.headers);
        match self.body {
            Some(body) => builder.body(body),
            None => builder,
        }
    }
}

/// Join a base URL and a resource path with exactly one `/` between them.
fn join(base_url: &str, path: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(Url::parse(&joined)?)
}

/// Build an authenticated request.
///
/// GET and DELETE carry `params` in the query string (omitted entirely when
/// it encodes empty); POST and PUT carry it as a form body. The token is not
/// validated: an empty token still produces `Authorization: Bearer `, and
/// the API is left to reject it.
pub(crate) fn build(
    method: Method,
    base_url: &str,
    path: &str,
    params: Params,
    token: &SecretString,
) -> Result<RequestDescriptor> {
    let mut url = join(base_url, path)?;

    let mut headers = HeaderMap::new();
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
        .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let encoded = params.encode();
    let body = if method == Method::POST || method == Method::PUT {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        Some(encoded)
    } else {
        if !encoded.is_empty() {
            url.set_query(Some(&encoded));
        }
        None
    };

    Ok(RequestDescriptor {
        method,
        url,
        headers,
        body,
    })
}
