pub mod bearer;
pub mod login;
pub mod role_gate;
