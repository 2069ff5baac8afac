use crate::error::Result;
use crate::format::ts::DEFAULT_BUFFER_PACKETS;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable overriding the read buffer size, in packets.
pub const ENV_BUFFER_PACKETS: &str = "TSFRAME_BUFFER_PACKETS";

const CONFIG_PATHS: [&str; 2] = ["./config.toml", "./tsframe_config.toml"];

lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::new());
}

/// Process-wide defaults for newly built packet sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Read buffer capacity, expressed in transport stream packets.
    pub buffer_packets: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_packets: DEFAULT_BUFFER_PACKETS,
        }
    }
}

impl Config {
    // Bad values are ignored here; use `load` to see them.
    fn new() -> Self {
        let mut config = Config::default();
        for value in read_sources(env::var(ENV_BUFFER_PACKETS).ok(), &CONFIG_PATHS) {
            if let Ok(Some(packets)) = value {
                config.buffer_packets = packets;
            }
        }
        config
    }

    /// Loads the configuration, failing on the first unparsable value.
    ///
    /// The environment is read first, then the config files in order, so a
    /// file value wins over the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(env::var(ENV_BUFFER_PACKETS).ok(), &CONFIG_PATHS)
    }

    fn load_from<P: AsRef<Path>>(env_value: Option<String>, paths: &[P]) -> Result<Self> {
        let mut config = Config::default();
        for value in read_sources(env_value, paths) {
            if let Some(packets) = value? {
                config.buffer_packets = packets;
            }
        }
        Ok(config)
    }

    /// Re-reads environment and config files into the global configuration.
    pub fn reload() {
        let new_config = Config::new();
        *CONFIG.write() = new_config;
    }
}

/// Values from each source in precedence order, lowest first.
fn read_sources<P: AsRef<Path>>(
    env_value: Option<String>,
    paths: &[P],
) -> Vec<Result<Option<usize>>> {
    let mut values = vec![env_value.map(|v| parse_value(&v)).transpose()];
    values.extend(paths.iter().map(|path| buffer_packets_from_file(path.as_ref())));
    values
}

fn parse_value(value: &str) -> Result<usize> {
    Ok(value.trim().trim_matches('"').trim_matches('\'').parse()?)
}

fn buffer_packets_from_file(path: &Path) -> Result<Option<usize>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Ok(None),
    };
    parse_buffer_packets(&content)
}

/// Extracts `buffer_packets = N` from config file content.
fn parse_buffer_packets(content: &str) -> Result<Option<usize>> {
    let value = content
        .lines()
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim() == "buffer_packets")
        .map(|(_, value)| value.trim());

    match value {
        Some(value) if !value.is_empty() => Ok(Some(parse_value(value)?)),
        _ => Ok(None),
    }
}

/// Returns the configured read buffer capacity in packets.
pub fn buffer_packets() -> usize {
    CONFIG.read().buffer_packets
}

/// Creates a default config template file if it doesn't exist
pub fn create_default_config_template<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
    if !path.as_ref().exists() {
        let template = r#"# tsframe configuration
# Read buffer capacity, in 188-byte transport stream packets
buffer_packets = 1000
"#;
        fs::write(path, template)?;
    }
    Ok(())
}
