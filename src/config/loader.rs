use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::core::Mh2Config;
use crate::errors::{Error, Result, ResultExt};

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "mh2graph.toml";

/// Read the raw contents of a config file
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse config from a TOML string
pub fn parse_config(contents: &str) -> Result<Mh2Config> {
    toml::from_str::<Mh2Config>(contents)
        .map_err(|e| Error::Configuration(format!("failed to parse config: {}", e)))
}

/// Load an explicitly requested config file; any failure is an error
pub fn load_config_from_path(path: &Path) -> Result<Mh2Config> {
    let contents = read_config_file(path).map_err(|e| {
        Error::Configuration(format!("cannot read {}: {}", path.display(), e))
    })?;
    let config = parse_config(&contents).context(path.display().to_string())?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try the default config file in `dir`; a missing file is not an error and
/// a broken one falls back to defaults with a warning
pub fn load_default_config(dir: &Path) -> Mh2Config {
    let path = dir.join(DEFAULT_CONFIG_FILE);

    let contents = match read_config_file(&path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to read config file {}: {}", path.display(), e);
            }
            return Mh2Config::default();
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("{} in {}. Using defaults.", e, path.display());
            Mh2Config::default()
        }
    }
}

/// Explicit path wins; otherwise look in the current directory
pub fn load_config(explicit: Option<&PathBuf>) -> Result<Mh2Config> {
    match explicit {
        Some(path) => load_config_from_path(path),
        None => {
            let current = match std::env::current_dir() {
                Ok(dir) => dir,
                Err(e) => {
                    warn!("Failed to get current directory: {}. Using default config.", e);
                    return Ok(Mh2Config::default());
                }
            };
            Ok(load_default_config(&current))
        }
    }
}
