//! Authentication primitives.
//!
//! Tokens are issued by the external identity service; this server only
//! validates them. See [`jwt`].

pub mod jwt;
