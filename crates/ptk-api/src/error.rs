use thiserror::Error;

/// Errors returned by the directory API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status that carried no usable error payload.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The backend reported no match for the requested entity.
    #[error("{what} not found")]
    NotFound { what: String },

    /// 401/403 — the bearer token is missing, expired, or insufficient.
    #[error("not authorized: {message}")]
    Unauthorized { message: String },

    /// The backend returned an error payload `{"message": ...}`.
    #[error("API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A search was attempted with neither a name nor an address term.
    #[error("search requires a business name or an address")]
    EmptyQuery,

    /// The configured base URL is not parseable.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
