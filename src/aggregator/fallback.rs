//! Branch outcome handling shared by every composer.

use std::fmt::Display;

use html_escape::decode_html_entities;

use crate::app::Result;
use crate::domain::{PostBody, Resolved};
use crate::fetcher::Fetched;

/// Turn one branch fetch into a [`Resolved`] value. Not-found and errors
/// both yield the fallback; neither is propagated.
pub(crate) fn resolve<T>(
    branch: &str,
    owner: impl Display,
    result: Result<Fetched<T>>,
    fallback: impl FnOnce() -> T,
) -> Resolved<T> {
    match result {
        Ok(Fetched::Found(value)) => Resolved::Fetched(value),
        Ok(Fetched::NotFound) => {
            tracing::warn!("No {} for {}, using placeholder", branch, owner);
            Resolved::Fallback(fallback())
        }
        Err(e) => {
            tracing::warn!("Failed to fetch {} for {}: {}", branch, owner, e);
            Resolved::Fallback(fallback())
        }
    }
}

/// Decode HTML entities the API leaves in post text.
pub(crate) fn normalize_body(mut body: PostBody) -> PostBody {
    body.content = decode_html_entities(&body.content).to_string();
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FeedloomError;
    use crate::domain::User;

    #[test]
    fn test_found_is_fetched() {
        let resolved = resolve("author", 1, Ok(Fetched::Found(User::unknown(1))), || User::failed(1));
        assert!(!resolved.is_fallback());
    }

    #[test]
    fn test_not_found_and_error_fall_back() {
        let resolved = resolve("author", 2, Ok(Fetched::NotFound), || User::unknown(2));
        assert!(resolved.is_fallback());
        assert_eq!(resolved.id, 2);

        let resolved = resolve("author", 3, Err(FeedloomError::Other("timeout".into())), || User::unknown(3));
        assert!(resolved.is_fallback());
        assert_eq!(resolved.name, "unknown user");
    }

    #[test]
    fn test_normalize_body_decodes_entities() {
        let body = normalize_body(PostBody::new(1, "Fish &amp; chips &lt;3"));
        assert_eq!(body.content, "Fish & chips <3");
    }
}
