use anyhow::Context;
use book_shelf::{
    cli_args::CliArgs,
    server::{Server, ServerConfig},
};
use clap::Parser;

fn init_tracing() -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt::Subscriber::builder()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .finish(),
    )
    .context("Failed to set global tracing subscriber")?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "server=trace,book_shelf=trace,tower_http=trace");
    }

    init_tracing()?;

    tracing::info!("Starting ...");

    let args = CliArgs::parse();

    let mut server_config = match &args.config_file {
        Some(config_file) => ServerConfig::from_config_file(config_file).await?,
        None => ServerConfig::default(),
    };

    if let Some(socket_address) = args.socket_address {
        server_config.socket_address = socket_address;
    }

    if let Some(data_file) = args.data_file {
        server_config.data_file = data_file;
    }

    let server = Server::new(server_config);

    server.run().await?;

    Ok(())
}
