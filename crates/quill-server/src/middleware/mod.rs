//! HTTP middleware.

pub(crate) mod auth;
pub(crate) mod security;
