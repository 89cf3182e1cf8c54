//! API constants
//!
//! Routes are versioned under `/api/v0`.

/// Versioned route prefix, e.g. `/api/v0`
pub const API_PREFIX: &str = "/api/v0";

/// Route of the generated OpenAPI document
pub const OPENAPI_PATH: &str = "/api/openapi.json";
