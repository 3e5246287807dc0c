use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

#[derive(Parser)]
#[command(author, about, version)]
pub struct CliArgs {
    /// Path to the configuration file. Defaults are used if omitted.
    #[clap(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,
    /// Address to listen on. Overrides the configuration file.
    #[clap(long, env = "SOCKET_ADDRESS")]
    pub socket_address: Option<SocketAddr>,
    /// Path to the JSON file holding the books. Overrides the configuration file.
    #[clap(long, env = "DATA_FILE")]
    pub data_file: Option<PathBuf>,
}
