pub mod jwt;
pub mod password;
pub mod roles;
pub mod validator;

pub use jwt::{mint_access_token, verify_access_token, Claims};
pub use roles::{ensure_owner_or_admin, validate_role, AllowSet, Role};
pub use validator::validate_password;
