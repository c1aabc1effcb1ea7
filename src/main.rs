use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use log::info;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use mouseclick::command::{self, ClickArgs};
use mouseclick::config::Config;
use mouseclick::injector::PlatformInjector;
use mouseclick::server;

#[derive(Parser)]
#[command(name = "mouseclick")]
#[command(about = "Simulate mouse clicks from the command line or a local web GUI")]
#[command(after_help = "\
Examples:
  # Click at current cursor position
  mouseclick

  # Double click at specific coordinates
  mouseclick --x 500 --y 300 --clicks 2

  # Right click after a 3 second delay
  mouseclick --button right --delay 3

  # Show current cursor position
  mouseclick --show-position

  # Start the web GUI on http://localhost:8765/gui.html
  mouseclick serve --base-dir assets")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    click: ClickArgs,

    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the local HTTP control server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory holding gui.html and the optional bin/mouseclick
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },
    /// Write a configuration file with the default settings
    Template {
        #[arg(short, long, default_value = "mouseclick.yaml")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.command.is_some() && cli.click.is_set() {
        Cli::command()
            .error(
                ErrorKind::ArgumentConflict,
                "click options cannot be combined with a subcommand",
            )
            .exit();
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            base_dir,
        }) => {
            let mut server_config = config.server;
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }
            if base_dir.is_some() {
                server_config.base_dir = base_dir;
            }
            info!("Starting control server on port {}", server_config.port);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            // the child runs in base_dir, so hand it an absolute path
            let config_file = cli.config.as_deref().map(std::fs::canonicalize).transpose()?;
            runtime.block_on(server::serve(server_config, config_file))?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Template { output }) => {
            Config::create_template(&output)?;
            info!("Template config created at {:?}", output);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let code = command::run(
                &cli.click,
                &config.simulation,
                PlatformInjector::new,
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            )?;
            Ok(ExitCode::from(code))
        }
    }
}
