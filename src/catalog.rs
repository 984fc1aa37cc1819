//! Fixed template tables the synthesizer draws from.

use crate::record::Level;

pub const SERVICES: [&str; 8] = [
    "web-api",
    "auth-service",
    "db-service",
    "payment-service",
    "inventory-service",
    "notification-service",
    "search-service",
    "analytics-service",
];

/// Hosts serving each entry of [`SERVICES`].
pub const HOSTS: [(&str, &[&str]); 8] = [
    ("web-api", &["api-server-01", "api-server-02", "api-server-03"]),
    ("auth-service", &["auth-server-01", "auth-server-02"]),
    ("db-service", &["db-server-01"]),
    ("payment-service", &["payment-server-01", "payment-server-02"]),
    ("inventory-service", &["inventory-server-01", "inventory-server-02"]),
    ("notification-service", &["notif-server-01"]),
    ("search-service", &["search-server-01", "search-server-02"]),
    ("analytics-service", &["analytics-server-01"]),
];

pub const LEVEL_WEIGHTS: [(Level, f64); 3] = [
    (Level::Info, 0.70),
    (Level::Warn, 0.20),
    (Level::Error, 0.10),
];

pub const INFO_MESSAGES: [&str; 15] = [
    "Request processed successfully",
    "User authentication successful",
    "GET /api/v1/products",
    "POST /api/v1/orders",
    "PUT /api/v1/cart",
    "DELETE /api/v1/cart/items",
    "GET /api/v1/users/profile",
    "Search query executed",
    "Payment processed",
    "Email notification sent",
    "SMS notification sent",
    "Daily report generated",
    "Cache refreshed successfully",
    "Session created",
    "File uploaded successfully",
];

pub const WARN_MESSAGES: [&str; 8] = [
    "Query execution took longer than expected",
    "Low stock alert for product SKU-12345",
    "Multiple failed login attempts detected",
    "Connection pool nearly exhausted",
    "Payment declined",
    "Rate limit approaching threshold",
    "Memory usage above 80%",
    "Disk space running low",
];

/// `(message, error type)` pairs; the two always travel together.
pub const ERROR_MESSAGES: [(&str, &str); 8] = [
    ("Database connection timeout", "ConnectionTimeout"),
    ("Payment gateway timeout", "GatewayTimeout"),
    ("Deadlock detected in transaction", "DeadlockDetected"),
    ("Failed to update inventory count", "ConcurrencyException"),
    ("Internal server error", "NullPointerException"),
    ("Service unavailable", "ServiceUnavailable"),
    ("Authentication failed", "AuthenticationError"),
    ("Invalid input data", "ValidationError"),
];

pub const INFO_STATUS_CODES: [u16; 3] = [200, 201, 204];
pub const WARN_STATUS_CODES: [u16; 2] = [200, 402];
pub const ERROR_STATUS_CODES: [u16; 4] = [500, 503, 504, 409];

/// Only this service ever carries `ip_address`.
pub const IP_SERVICE: &str = "web-api";
/// Only this service ever carries `amount`.
pub const PAYMENT_SERVICE: &str = "payment-service";

/// Host list for `service`, or an empty slice for unknown services.
pub fn hosts_for(service: &str) -> &'static [&'static str] {
    HOSTS
        .iter()
        .find(|(name, _)| *name == service)
        .map(|(_, hosts)| *hosts)
        .unwrap_or(&[])
}

pub fn status_codes_for(level: Level) -> &'static [u16] {
    match level {
        Level::Info => &INFO_STATUS_CODES,
        Level::Warn => &WARN_STATUS_CODES,
        Level::Error => &ERROR_STATUS_CODES,
    }
}
