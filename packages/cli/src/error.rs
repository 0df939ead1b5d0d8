use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read stdin: {0}")]
    ReadStdin(#[source] io::Error),

    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),

    #[error(transparent)]
    Config(#[from] ledgerwire_codec::ConfigError),

    #[error("invalid input: {0}")]
    Wire(#[from] ledgerwire_wire::Error),

    #[error(transparent)]
    Registry(#[from] ledgerwire_codec::RegistryError),

    #[error(transparent)]
    Protocol(#[from] ledgerwire_protocol::Error),
}
