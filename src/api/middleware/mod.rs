//! HTTP middleware.

mod audit;

pub use audit::audit_middleware;
