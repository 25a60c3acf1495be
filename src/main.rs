// ABOUTME: CLI entrypoint for blogsync command
// ABOUTME: Handles logging setup, error exit codes, and the sync run

use blogsync::{
    api::ApiClient,
    auth::resolve_credentials,
    cli::Cli,
    storage::{EntryStore, Paths},
    sync::sync_blog,
    Result,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("blogsync: [E{}] {}", e.exit_code(), e);
        std::process::exit(e.exit_code());
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "blogsync=debug" } else { "blogsync=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let credentials = resolve_credentials(cli.account_id, cli.api_key)?;
    let mut client = ApiClient::new(credentials, Some(cli.api_base))?;

    if cli.no_throttle {
        client = client.disable_throttle();
    } else if let Some((min, max)) = cli.throttle_ms {
        client = client.with_throttle(min, max);
    }

    let paths = Paths::new(cli.out_dir);
    let store = EntryStore::new(paths.entries_dir);
    let start_url = client.entries_url(&cli.blog_id);

    sync_blog(&client, &start_url, &store, cli.all)?;
    Ok(())
}
