/// Constants module to avoid magic values in the codebase

// Network Configuration
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

// Persisted session record keys (file names inside the state directory)
pub const TOKEN_KEY: &str = "token";
pub const IDENTITY_KEY: &str = "identity.json";
