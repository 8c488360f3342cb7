//! Seams between the core and its transports.

mod authenticator;

pub use authenticator::Authenticator;
