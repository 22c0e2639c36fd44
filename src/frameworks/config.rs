use clap::Parser;
use serde::Deserialize;
use std::{
    env, io,
    path::{Path, PathBuf},
};

// Runtime/server settings. Loaded once at startup and passed into the server;
// nothing here is read from ambient globals afterwards.

pub const CONFIG_PATH_VAR: &str = "SESSION_SERVER_CONFIG";
pub const HOST_VAR: &str = "SESSION_SERVER_HOST";
pub const PORT_VAR: &str = "PORT";
pub const STATIC_DIR_VAR: &str = "SESSION_SERVER_STATIC_DIR";
pub const SESSIONS_DIR_VAR: &str = "SESSION_SERVER_DATA_DIR";
pub const LOGS_DIR_VAR: &str = "SESSION_SERVER_LOGS_DIR";
pub const MAX_BODY_BYTES_VAR: &str = "SESSION_SERVER_MAX_BODY_BYTES";

const DEFAULT_PORT: u16 = 8000;
// Room meshes from dense scans run to several megabytes.
const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub sessions_dir: PathBuf,
    // Daily JSON-lines files of AR client diagnostics.
    pub logs_dir: PathBuf,
    pub max_body_bytes: usize,
}

// Command-line flags. Each one, when given, wins over the config file and the
// environment.
#[derive(Clone, Debug, Default, Parser)]
#[command(name = "session_server", version, about = "AR scan session server")]
pub struct CliArgs {
    /// Address to bind (overrides SESSION_SERVER_HOST)
    #[arg(long)]
    pub host: Option<String>,
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,
    /// TOML settings file (overrides SESSION_SERVER_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from("public"),
            sessions_dir: PathBuf::from("data").join("sessions"),
            logs_dir: PathBuf::from("data").join("logs"),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    // Layered settings: defaults, then the TOML file (`--config` or
    // `SESSION_SERVER_CONFIG`), then env vars, then command-line flags.
    pub fn load(args: &CliArgs) -> io::Result<Self> {
        let config_path = args
            .config
            .clone()
            .or_else(|| env::var_os(CONFIG_PATH_VAR).map(PathBuf::from));

        let mut config = match config_path {
            Some(path) => Self::from_toml_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok());
        config.apply_cli(args);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn from_toml_file(path: &Path) -> io::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("failed to read config {}: {e}", path.display()),
            )
        })?;

        Self::from_toml_str(&contents).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid config {}: {e}", path.display()),
            )
        })
    }

    // Overlay values from a variable lookup. Unparseable numbers keep the
    // current value.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_VAR) {
            self.host = host;
        }
        if let Some(port) = parse_var(&lookup, PORT_VAR) {
            self.port = port;
        }
        if let Some(dir) = lookup(STATIC_DIR_VAR) {
            self.static_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(SESSIONS_DIR_VAR) {
            self.sessions_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(LOGS_DIR_VAR) {
            self.logs_dir = PathBuf::from(dir);
        }
        if let Some(limit) = parse_var(&lookup, MAX_BODY_BYTES_VAR) {
            self.max_body_bytes = limit;
        }
    }

    pub fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(host) = &args.host {
            self.host = host.clone();
        }
        if let Some(port) = args.port {
            self.port = port;
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}
