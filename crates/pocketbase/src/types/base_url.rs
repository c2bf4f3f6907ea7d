//! Server base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, ValidationError};

/// A validated PocketBase server URL.
///
/// This type ensures the URL is absolute, uses `http` or `https`, has a host,
/// and is normalized for API endpoint construction. A path prefix is kept, so
/// servers mounted under a sub-path work.
///
/// # Example
///
/// ```
/// use pocketbase::BaseUrl;
///
/// let base = BaseUrl::new("http://127.0.0.1:8090/").unwrap();
/// assert_eq!(
///     base.endpoint(&["collections", "posts", "records"]).unwrap().as_str(),
///     "http://127.0.0.1:8090/api/collections/posts/records"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Create a new base URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the URL is not usable as an API root.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| ValidationError::BaseUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        url.set_query(None);
        url.set_fragment(None);

        // Normalize: remove trailing slash
        let trimmed = url.path().trim_end_matches('/').to_string();
        url.set_path(&trimmed);

        Ok(Self(url))
    }

    /// Returns the URL of an API endpoint, `{base}/api/{segments...}`.
    ///
    /// Each segment is percent-encoded on its own, so record ids and
    /// collection names can never alter the path structure.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.0.clone();
        url.path_segments_mut()
            .map_err(|()| ValidationError::BaseUrl {
                value: self.0.to_string(),
                reason: "cannot be a base URL".to_string(),
            })?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        // Must be absolute
        if url.cannot_be_a_base() {
            return Err(ValidationError::BaseUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "https" && scheme != "http" {
            return Err(ValidationError::BaseUrl {
                value: original.to_string(),
                reason: format!("unsupported scheme '{scheme}', expected http or https"),
            }
            .into());
        }

        // Must have a host
        if url.host_str().is_none_or(str::is_empty) {
            return Err(ValidationError::BaseUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let base = BaseUrl::new("https://pb.example.com").unwrap();
        assert_eq!(base.host(), Some("pb.example.com"));
    }

    #[test]
    fn plain_http_is_allowed() {
        let base = BaseUrl::new("http://10.0.0.5:8090").unwrap();
        assert_eq!(base.host(), Some("10.0.0.5"));
    }

    #[test]
    fn endpoint_construction() {
        let base = BaseUrl::new("https://pb.example.com").unwrap();
        assert_eq!(
            base.endpoint(&["health"]).unwrap().as_str(),
            "https://pb.example.com/api/health"
        );
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let base = BaseUrl::new("https://pb.example.com/").unwrap();
        assert_eq!(
            base.endpoint(&["collections", "users", "auth-refresh"])
                .unwrap()
                .as_str(),
            "https://pb.example.com/api/collections/users/auth-refresh"
        );
    }

    #[test]
    fn path_prefix_is_kept() {
        let base = BaseUrl::new("https://example.com/pb/").unwrap();
        assert_eq!(
            base.endpoint(&["health"]).unwrap().as_str(),
            "https://example.com/pb/api/health"
        );
    }

    #[test]
    fn segments_are_escaped() {
        let base = BaseUrl::new("https://pb.example.com").unwrap();
        assert_eq!(
            base.endpoint(&["collections", "posts", "records", "a/b c"])
                .unwrap()
                .as_str(),
            "https://pb.example.com/api/collections/posts/records/a%2Fb%20c"
        );
    }

    #[test]
    fn parses_from_str() {
        let base: BaseUrl = "http://127.0.0.1:8090/".parse().unwrap();
        assert_eq!(base, BaseUrl::new("http://127.0.0.1:8090").unwrap());
        assert!("not a url".parse::<BaseUrl>().is_err());
    }

    #[test]
    fn serde_validates_on_the_way_in() {
        let base = BaseUrl::new("https://pb.example.com/app/").unwrap();
        let json = serde_json::to_string(&base).unwrap();
        let back: BaseUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(back, base);

        assert!(serde_json::from_str::<BaseUrl>(r#""ftp://pb.example.com""#).is_err());
    }

    #[test]
    fn invalid_scheme() {
        assert!(BaseUrl::new("ftp://pb.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(BaseUrl::new("/api/health").is_err());
    }
}
