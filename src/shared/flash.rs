//! One-shot status messages that survive a single redirect.
//!
//! A write handler answers with [`redirect_with_flash`], which stores the
//! message in the `flash` cookie. The next list page extracts it with the
//! [`Flash`] extractor, renders it and expires the cookie through
//! [`Flash::respond`]. The cookie value is percent-encoded by the jar.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use crate::shared::constants::FLASH_COOKIE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashMessage {
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Flash message pending for this request, if any
#[derive(Debug, Clone, Default)]
pub struct Flash {
    message: Option<FlashMessage>,
    jar: CookieJar,
}

impl Flash {
    pub fn message(&self) -> Option<&FlashMessage> {
        self.message.as_ref()
    }

    /// Serve a rendered page, expiring the flash cookie when one was shown
    pub fn respond(self, html: String) -> Response {
        if self.message.is_some() {
            let jar = self.jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
            (jar, Html(html)).into_response()
        } else {
            Html(html).into_response()
        }
    }
}

impl From<CookieJar> for Flash {
    fn from(jar: CookieJar) -> Self {
        let message = jar
            .get(FLASH_COOKIE)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
            .map(FlashMessage::success);
        Self { message, jar }
    }
}

impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CookieJar::from_headers(&parts.headers).into())
    }
}

/// `303 See Other` to `to`, carrying `flash` to the next page
pub fn redirect_with_flash(to: &str, flash: FlashMessage) -> Response {
    let cookie = Cookie::build((FLASH_COOKIE, flash.message))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (CookieJar::new().add(cookie), Redirect::to(to)).into_response()
}
