//! API constants

/// Versioned prefix for JSON endpoints
pub const API_PREFIX: &str = "/api/v0";

/// Route prefix under which locally stored media is served
pub const MEDIA_ROUTE_PREFIX: &str = "/media";

/// Multipart framing allowance on top of the configured file size limit
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
