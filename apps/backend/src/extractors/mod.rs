pub mod auth_token;
pub mod caller;
pub mod validated_json;

pub use auth_token::BearerToken;
pub use caller::Caller;
pub use validated_json::ValidatedJson;
