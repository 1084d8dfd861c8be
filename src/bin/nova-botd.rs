use clap::Parser;
use nova_bot::config::Config;
use nova_bot::daemon;
use nova_bot::error::Result;

#[derive(Parser, Debug)]
#[command(name = "nova-botd")]
#[command(about = "Nova chat daemon")]
#[command(version = nova_bot::BUILD_VERSION)]
struct Cli {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 4002)]
    port: u16,

    /// SQLite file for chat turns. Overrides the config file and `NOVA_DB_PATH`.
    #[arg(long)]
    db: Option<String>,

    #[arg(long, env = "NOVA_CONFIG", default_value_t = nova_bot::runtime_paths::default_config_path())]
    config: String,

    /// Keep chat turns in memory instead of the SQLite file.
    #[arg(long, default_value_t = false)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    nova_bot::logging::init_tracing("nova_botd");
    let cli = Cli::parse();
    let mut config =
        Config::load_or_default(&cli.config, &nova_bot::runtime_paths::default_db_path())?
            .resolve_env();
    if let Some(db) = cli.db {
        config = config.with_sqlite_path(db);
    }

    daemon::run(&cli.host, cli.port, &config, cli.ephemeral).await
}
