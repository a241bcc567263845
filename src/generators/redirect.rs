//! `/redirect-to?url=`: 302 to the given location.

use axum::{
    extract::RawQuery,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use url::Url;

use crate::error::DumpError;
use crate::generators::query_value;

// Relative references are resolved against this only to check their syntax.
const REFERENCE_BASE: &str = "http://localhost/";

/// Syntax check only; the target is never contacted.
pub fn validate_target(target: &str) -> Result<(), DumpError> {
    if target.is_empty() {
        return Err(DumpError::BadUrl);
    }
    match Url::parse(target) {
        Ok(_) => Ok(()),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(REFERENCE_BASE)
            .and_then(|base| base.join(target))
            .map(|_| ())
            .map_err(|_| DumpError::BadUrl),
        Err(_) => Err(DumpError::BadUrl),
    }
}

pub async fn redirect_to(RawQuery(query): RawQuery) -> Result<Response, DumpError> {
    let target = query_value(query.as_deref(), "url").ok_or(DumpError::BadUrl)?;
    validate_target(&target)?;
    let location = HeaderValue::from_str(&target).map_err(|_| DumpError::BadUrl)?;

    tracing::debug!(location = %target, "Redirecting");
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_and_relative_targets() {
        assert!(validate_target("http://example.com/").is_ok());
        assert!(validate_target("https://example.com/a?b=c#d").is_ok());
        assert!(validate_target("/get").is_ok());
        assert!(validate_target("status/418").is_ok());
    }

    #[test]
    fn rejects_empty_and_malformed_targets() {
        assert!(matches!(validate_target(""), Err(DumpError::BadUrl)));
        assert!(matches!(validate_target("http://[::1"), Err(DumpError::BadUrl)));
        assert!(matches!(validate_target("http://exa mple.com/"), Err(DumpError::BadUrl)));
    }
}
