use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use kqueuey::config::{encode, ConfigError, ConfigLoader, LoadedConfig, SourceLocator};

#[derive(Parser)]
#[command(name = "kqueuey-config")]
#[command(about = "Inspect and validate kqueuey configuration files", long_about = None)]
struct Cli {
    /// Configuration file or directory (overrides KQUEUEY_CONFIG_PATH).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print which configuration file would be used
    Locate,
    /// Run the full validation pipeline
    Check,
    /// Print the normalized configuration
    Show {
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let loader = ConfigLoader::new(SourceLocator::from_env(cli.config));

    match run(&loader, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(loader: &ConfigLoader, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Locate => match loader.locator().locate() {
            Ok(path) => println!("{}", path.display()),
            Err(ConfigError::NotFound { searched }) => {
                eprintln!("No configuration file found. Searched:");
                for path in &searched {
                    eprintln!("  {}", path.display());
                }
                return Err(ConfigError::NotFound { searched }.into());
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Check => {
            let LoadedConfig { source, config } = loader.load()?;
            println!("{}: ok", source.display());
            println!("  cluster_id:       {}", config.cluster.cluster_id);
            println!("  nodes:            {}", config.cluster.nodes.len());
            for node in &config.cluster.nodes {
                println!("    - {} {} {}", node.id, node.bind_addr, node.storage_dir);
            }
            println!("  num_compactors:   {}", config.storage.num_compactors);
            println!("  compression_type: {}", config.storage.compression_type);
            println!("  sync_writes:      {}", config.storage.sync_writes);
        }
        Commands::Show { format } => {
            let loaded = loader.load()?;
            match format {
                OutputFormat::Yaml => print!("{}", encode(&loaded.config)?),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&loaded.config)?)
                }
            }
        }
    }

    Ok(())
}
