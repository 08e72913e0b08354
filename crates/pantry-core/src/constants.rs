// ABOUTME: Application-wide constants for the Smart Pantry API
// ABOUTME: Groups service names, token lifetimes, cookie names, and validation limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

/// Service identity used in logs and health responses
pub mod service_names {
    /// Name of the HTTP server service
    pub const SMART_PANTRY_SERVER: &str = "smart-pantry-server";
}

/// Token and session lifetimes
pub mod auth {
    /// Access token lifetime in hours
    pub const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 12;
    /// Refresh token lifetime in days
    pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;
    /// Lifetime of the `token` cookie set on login, in hours
    pub const AUTH_COOKIE_MAX_AGE_HOURS: i64 = 24;
    /// bcrypt work factor for password hashing
    pub const DEFAULT_BCRYPT_COST: u32 = 10;
    /// Lowest bcrypt cost the hasher accepts
    pub const MIN_BCRYPT_COST: u32 = 4;
    /// Highest bcrypt cost the hasher accepts
    pub const MAX_BCRYPT_COST: u32 = 31;
    /// Minimum JWT secret length accepted in production
    pub const MIN_JWT_SECRET_BYTES: usize = 32;
    /// Token type reported to clients
    pub const BEARER_TOKEN_TYPE: &str = "Bearer";
}

/// Cookie and header names
pub mod http {
    /// Cookie carrying the access token for browser clients
    pub const AUTH_COOKIE_NAME: &str = "token";
    /// Cookie carrying the CSRF token (double-submit)
    pub const CSRF_COOKIE_NAME: &str = "_csrf";
    /// Header carrying the CSRF token
    pub const CSRF_HEADER_NAME: &str = "x-csrf-token";
    /// Request correlation header
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}

/// CSRF token parameters
pub mod csrf {
    /// Token length in bytes (32 bytes = 256 bits)
    pub const TOKEN_LENGTH: usize = 32;
    /// Token lifetime in seconds (30 minutes)
    pub const TOKEN_EXPIRY_SECS: i64 = 30 * 60;
    /// Interval between sweeps of expired tokens, in seconds
    pub const CLEANUP_INTERVAL_SECS: u64 = 5 * 60;
    /// Most live tokens held at once; the oldest are evicted past this
    pub const MAX_TOKENS: usize = 10_000;
}

/// Input validation limits
pub mod limits {
    /// Minimum password length
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// bcrypt silently truncates input beyond 72 bytes
    pub const MAX_PASSWORD_BYTES: usize = 72;
    /// Maximum email length (RFC 5321)
    pub const MAX_EMAIL_LENGTH: usize = 254;
    /// Maximum food item title length
    pub const MAX_TITLE_LENGTH: usize = 255;
}

/// Recipe suggestion parameters
pub mod recipes {
    /// Items expiring within this many days are prioritized in the prompt
    pub const EXPIRING_WITHIN_DAYS: i64 = 7;
    /// Reply used when the language model call fails
    pub const GENERATION_FAILED_MESSAGE: &str =
        "An error occurred while generating a recipe. Please try again later.";
    /// Reply used when the language model returns no text
    pub const EMPTY_RESPONSE_MESSAGE: &str =
        "Could not generate a recipe. Try different ingredients.";
    /// Error raised when the user has no food items
    pub const NO_ITEMS_MESSAGE: &str = "no food items registered; add items first";
}

/// User-facing error messages shared across layers
pub mod error_messages {
    /// Login failure (same text for unknown email and wrong password)
    pub const INVALID_CREDENTIALS: &str = "invalid email or password";
    /// Signup with an email that is already registered
    pub const EMAIL_EXISTS: &str = "email already exists";
    /// Path parameter that is not a valid numeric id
    pub const INVALID_ID_FORMAT: &str = "invalid ID format";
    /// Email missing from request
    pub const EMAIL_REQUIRED: &str = "email is required";
    /// Password missing from request
    pub const PASSWORD_REQUIRED: &str = "password is required";
    /// Email not well-formed
    pub const INVALID_EMAIL_FORMAT: &str = "invalid email format";
    /// Password shorter than the minimum
    pub const PASSWORD_TOO_SHORT: &str = "password must be at least 8 characters";
    /// Password longer than bcrypt accepts
    pub const PASSWORD_TOO_LONG: &str = "password must be at most 72 bytes";
    /// Food item title missing
    pub const TITLE_REQUIRED: &str = "title is required";
    /// Food item title too long
    pub const TITLE_TOO_LONG: &str = "title must be at most 255 characters";
    /// Negative quantity
    pub const QUANTITY_NEGATIVE: &str = "quantity must not be negative";
}
