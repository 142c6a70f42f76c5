//! Startup configuration: a board-file path plus an optional bound port.
//!
//! Hand-parsed rather than pulled in through a CLI-parsing crate — the
//! surface here is one positional argument and one optional flag, about the
//! same size as the teacher's own fixed `GameConfig.json` filename.

use std::fmt;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug)]
pub struct Config {
    pub board_path: PathBuf,
    pub port: u16,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingBoardPath,
    BadPort(String),
    UnknownFlag(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingBoardPath => {
                write!(f, "usage: memory-server <board-file> [--port <port>]")
            }
            ConfigError::BadPort(value) => write!(f, "not a valid port: {value:?}"),
            ConfigError::UnknownFlag(flag) => write!(f, "unknown flag: {flag}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, ConfigError> {
        args.next(); // argv[0]

        let mut board_path = None;
        let mut port = DEFAULT_PORT;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--port" => {
                    let value = args.next().ok_or_else(|| ConfigError::BadPort(String::new()))?;
                    port = value.parse().map_err(|_| ConfigError::BadPort(value))?;
                }
                flag if flag.starts_with("--") => return Err(ConfigError::UnknownFlag(flag.to_string())),
                positional if board_path.is_none() => board_path = Some(PathBuf::from(positional)),
                other => return Err(ConfigError::UnknownFlag(other.to_string())),
            }
        }

        Ok(Config {
            board_path: board_path.ok_or(ConfigError::MissingBoardPath)?,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &[&str]) -> impl Iterator<Item = String> {
        std::iter::once("memory-server".to_string()).chain(s.iter().map(|s| s.to_string()))
    }

    #[test]
    fn default_port_when_unspecified() {
        let config = Config::parse(args(&["board.txt"])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.board_path, PathBuf::from("board.txt"));
    }

    #[test]
    fn explicit_port_overrides_default() {
        let config = Config::parse(args(&["board.txt", "--port", "9090"])).unwrap();
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn missing_board_path_is_an_error() {
        assert!(matches!(Config::parse(args(&[])), Err(ConfigError::MissingBoardPath)));
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(matches!(
            Config::parse(args(&["board.txt", "--port", "nope"])),
            Err(ConfigError::BadPort(_))
        ));
    }
}
