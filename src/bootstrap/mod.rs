pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{default_config_path, load_config, load_config_or_empty};
pub use run::run;
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{log_directory, wire, wire_with, AppHandles, RuntimeSettings};
