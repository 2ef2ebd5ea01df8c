//! Server configuration from environment and command line

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const USAGE: &str = "duel-server

USAGE:
  duel-server [--bind HOST:PORT] [--pokedex PATH] [--roster-dir DIR]

ENV:
  DUEL_BIND        default 0.0.0.0:8080
  DUEL_POKEDEX     default pokedex.json
  DUEL_ROSTER_DIR  default .
";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid bind address: {0}")]
    InvalidBind(String),

    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("help requested")]
    HelpRequested,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub bind: SocketAddr,
    pub pokedex: PathBuf,
    pub roster_dir: PathBuf,
}

impl Config {
    /// Read `DUEL_*` variables, then let command-line flags override them
    pub fn from_env_and_args() -> Result<Self, ConfigError> {
        Self::parse(|key| std::env::var(key).ok(), std::env::args().skip(1))
    }

    pub fn parse(
        env: impl Fn(&str) -> Option<String>,
        args: impl IntoIterator<Item = String>,
    ) -> Result<Self, ConfigError> {
        let mut bind =
            parse_bind(&env("DUEL_BIND").unwrap_or_else(|| "0.0.0.0:8080".to_string()))?;
        let mut pokedex =
            PathBuf::from(env("DUEL_POKEDEX").unwrap_or_else(|| "pokedex.json".to_string()));
        let mut roster_dir =
            PathBuf::from(env("DUEL_ROSTER_DIR").unwrap_or_else(|| ".".to_string()));

        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--bind" => bind = parse_bind(&flag_value(&mut it, &arg)?)?,
                "--pokedex" => pokedex = PathBuf::from(flag_value(&mut it, &arg)?),
                "--roster-dir" => roster_dir = PathBuf::from(flag_value(&mut it, &arg)?),
                "-h" | "--help" => return Err(ConfigError::HelpRequested),
                _ => return Err(ConfigError::UnknownArgument(arg.clone())),
            }
        }

        Ok(Config {
            bind,
            pokedex,
            roster_dir,
        })
    }
}

fn flag_value(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, ConfigError> {
    it.next()
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}

fn parse_bind(s: &str) -> Result<SocketAddr, ConfigError> {
    s.parse().map_err(|_| ConfigError::InvalidBind(s.to_string()))
}
