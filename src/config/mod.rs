#[cfg(feature = "cli")]
pub mod cli;
pub mod registry;
pub mod service_config;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use registry::RegistrySettings;
pub use service_config::ServiceConfig;
pub use toml_config::TomlConfig;
