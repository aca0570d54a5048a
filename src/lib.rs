pub mod config;
pub mod domains;
pub mod error;
pub mod interfaces;
pub mod logging;
pub mod prompts;
pub mod providers;
pub mod render;
pub mod server;
pub mod services;

pub type Result<T> = std::result::Result<T, error::CodeTutorError>;

/// Revision the binary was built from, or `dev` outside a git checkout.
pub const BUILD_REVISION: &str = env!("CODE_TUTOR_GIT_SHA");
