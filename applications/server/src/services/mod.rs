/// Server services
pub mod registration;
pub mod session;

pub use session::{SessionClaims, SessionService};
