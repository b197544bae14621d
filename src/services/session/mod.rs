pub mod factory;
pub mod jwt;
pub mod provider;

pub use factory::build_session_provider;
pub use jwt::{JwtSessionProvider, SessionClaims};
pub use provider::{SessionError, SessionIdentity, SessionProvider, SessionSnapshot};
