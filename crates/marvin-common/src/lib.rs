pub mod errors;
pub mod id;

pub use errors::{ConfigError, MarvinError};
pub use id::{new_call_id, new_id, SessionId};

pub type Result<T> = std::result::Result<T, MarvinError>;
