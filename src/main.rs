use std::path::PathBuf;

use clap::Parser;

use code_tutor::config::Config;
use code_tutor::error::Result;
use code_tutor::server;

#[derive(Parser, Debug)]
#[command(name = "code-tutor")]
#[command(about = "AI Code Tutor web app")]
#[command(version)]
struct Cli {
    /// JSON config file; the environment still overrides it.
    #[arg(long, env = "CODE_TUTOR_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "CODE_TUTOR_HOST")]
    host: Option<String>,

    #[arg(long, env = "CODE_TUTOR_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    code_tutor::logging::init_tracing("code_tutor");
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?.with_server_overrides(cli.host, cli.port);
    if let Err(err) = config.validate() {
        tracing::error!("Refusing to start: {err}");
        return Err(err);
    }

    server::run(&config).await
}
