//! Authentication adapters implementing the `SessionValidator` port.
//!
//! - `jwt` - HS256 tokens signed with the configured shared secret
//! - `mock` - literal token table for tests

mod jwt;
mod mock;

pub use jwt::{JwtSessionValidator, OwnerClaims};
pub use mock::MockSessionValidator;
