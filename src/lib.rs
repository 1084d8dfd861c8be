pub mod canned;
pub mod client;
pub mod config;
pub mod daemon;
pub mod domains;
pub mod employees;
pub mod error;
pub mod interfaces;
pub mod logging;
pub mod providers;
pub mod runtime_paths;
pub mod services;

pub type Result<T> = std::result::Result<T, error::NovaBotError>;

/// Build identifier reported by `/health` and `--version`.
pub const BUILD_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("NOVA_GIT_SHA"));
