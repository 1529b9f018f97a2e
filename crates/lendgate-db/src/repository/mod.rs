//! SurrealDB repository implementations.

mod allowlist;
mod session;
mod user;

pub use allowlist::SurrealAllowlistRepository;
pub use session::SurrealSessionRepository;
pub use user::SurrealUserRepository;
