use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("malformed config file {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Raised when random placement cannot find a free spot within the retry cap.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error("could not place obstacle {index} after {attempts} attempts")]
    Obstacle { index: usize, attempts: u32 },
    #[error("could not place an item after {attempts} attempts")]
    Item { attempts: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
