mod load;
mod types;

pub use load::{apply_env_overrides, get_zhaires_data_dir, load_default, load_from_path};
pub use types::{AiresConfig, AppConfig, LoaderConfig, LoggingConfig};
