use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub aires: AiresConfig,

    #[serde(default)]
    pub loader: LoaderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "zhaires_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// How the external simulator is located and driven.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiresConfig {
    /// Explicit path to the Aires binary. When unset, `Aires` is searched on PATH.
    #[serde(default)]
    pub program: Option<String>,

    /// Explicit path to AiresExport. When unset, `AiresExport` is searched on PATH.
    #[serde(default)]
    pub export_program: Option<String>,

    /// Environment variable holding the run root.
    #[serde(default = "default_run_dir_env")]
    pub run_dir_env: String,

    /// Bytes of stdout/stderr kept from the child for diagnostics.
    #[serde(default = "default_capture_bytes")]
    pub capture_bytes: usize,

    /// Log every directive as it is appended.
    #[serde(default)]
    pub echo: bool,

    /// Forward child output to the parent's stdout/stderr while running.
    #[serde(default)]
    pub passthrough: bool,
}

fn default_run_dir_env() -> String {
    "AIRES_RUN_DIR".to_string()
}

fn default_capture_bytes() -> usize {
    64 * 1024
}

impl Default for AiresConfig {
    fn default() -> Self {
        Self {
            program: None,
            export_program: None,
            run_dir_env: default_run_dir_env(),
            capture_bytes: default_capture_bytes(),
            echo: false,
            passthrough: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Read and write `waveforms.bin` next to the run output.
    #[serde(default = "default_cache")]
    pub cache: bool,
}

fn default_cache() -> bool {
    true
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            cache: default_cache(),
        }
    }
}
