//! Domain model (request descriptions, target config, tokens, ids).

pub mod errors;
pub mod ids;
pub mod request;
pub mod target;
pub mod token;

pub use self::errors::{ConfigError, RegistryError};
pub use self::ids::RunId;
pub use self::request::{GraphQlBody, HttpMethod, RequestBody, RequestSpec};
pub use self::target::TargetConfig;
pub use self::token::CookieToken;
