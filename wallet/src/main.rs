use anyhow::Context;
use clap::Parser;
use did_wallet::cli::{self, Cli};
use did_wallet::config::WalletConfig;

fn main() -> anyhow::Result<()> {
    // Initialize logger (set RUST_LOG=debug for verbose output, RUST_LOG=info for normal)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    // --root-path wins over DID_WALLET_ROOT
    let mut config = WalletConfig::from_env();
    if let Some(root_path) = args.root_path {
        config = config.with_root_path(root_path);
    }

    log::debug!("Using wallet root {}", config.root_path.display());
    cli::run(args.command, &config).context("did-wallet command failed")?;
    Ok(())
}
