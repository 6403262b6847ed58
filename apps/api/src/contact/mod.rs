pub mod email;
pub mod handlers;
