//! URL-segment API versioning for the product resource.
//!
//! Products are served under `/api/v{version}/products`; both supported
//! versions currently share one implementation. Requests without a version
//! segment are treated as [`ApiVersion::V1`].

use axum::http::HeaderValue;

/// Response header listing every supported version.
pub const SUPPORTED_VERSIONS_HEADER: &str = "api-supported-versions";

/// A supported API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    #[default]
    V1,
    V2,
}

impl ApiVersion {
    pub const ALL: [ApiVersion; 2] = [ApiVersion::V1, ApiVersion::V2];

    /// Canonical `major.minor` form, e.g. `1.0`.
    pub fn as_str(self) -> &'static str {
        match self {
            ApiVersion::V1 => "1.0",
            ApiVersion::V2 => "2.0",
        }
    }

    /// URL segments that select this version (`v1` and `v1.0` are equivalent).
    pub fn path_segments(self) -> [&'static str; 2] {
        match self {
            ApiVersion::V1 => ["v1", "v1.0"],
            ApiVersion::V2 => ["v2", "v2.0"],
        }
    }

    /// Value for the [`SUPPORTED_VERSIONS_HEADER`] response header.
    pub fn supported_header_value() -> HeaderValue {
        let joined = Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        HeaderValue::from_str(&joined).unwrap_or_else(|_| HeaderValue::from_static("1.0"))
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
