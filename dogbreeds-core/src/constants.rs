//! Protocol constants for the dog.ceo breed catalog.

/// Default base URL of the dog.ceo REST API.
pub const DEFAULT_DOG_API_BASE_URL: &str = "https://dog.ceo/api";

/// Default request timeout for catalog calls, in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Value of the `status` field on a successful catalog response.
pub const SUCCESS_STATUS: &str = "success";

/// Environment variable overriding the catalog base URL.
pub const ENV_BASE_URL: &str = "DOG_API_BASE_URL";

/// Environment variable overriding the request timeout.
pub const ENV_TIMEOUT_SECONDS: &str = "DOG_API_TIMEOUT_SECONDS";
