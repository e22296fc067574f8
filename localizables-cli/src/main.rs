use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use localizables_cli::{
    Config, FileOptions, FolderOptions, logging::init_tracing, output::Output, run_file_command,
    run_folder_command,
};

const DEFAULT_BASE_LANGUAGE: &str = "en";
const DEFAULT_EXTENSION: &str = "strings";

#[derive(Parser, Debug)]
#[command(author, version, about = "A utility for performing updates on localizable files.", long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file (defaults to ./localizables.toml if present)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Update the contents of a file.
    File {
        /// Path to the localizable file to be updated
        destination: String,

        /// Path to the localizable file containing the updates
        update: String,

        /// Merge and report without writing the destination
        #[arg(long, overrides_with = "no_dry_run")]
        dry_run: bool,

        /// Write files even when the configuration enables dry-run
        #[arg(long, overrides_with = "dry_run")]
        no_dry_run: bool,

        /// Write a JSON report of the merge to this path
        #[arg(long)]
        report_json: Option<String>,
    },

    /// Search and update the contents of a folder.
    Folder {
        /// Path to the folder containing the files to be updated
        destination: String,

        /// Path to the folder containing the files to use as updates
        update: String,

        /// Language used for Base.lproj bundles
        #[arg(short, long)]
        base_language: Option<String>,

        /// Extension of the resource files
        #[arg(long)]
        extension: Option<String>,

        /// Maximum number of files updated at once (0 = unbounded)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Merge and report without writing any file
        #[arg(long, overrides_with = "no_dry_run")]
        dry_run: bool,

        /// Write files even when the configuration enables dry-run
        #[arg(long, overrides_with = "dry_run")]
        no_dry_run: bool,

        /// Write a JSON report of every merge to this path
        #[arg(long)]
        report_json: Option<String>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Command-line flags win over the configuration file.
fn resolve_dry_run(dry_run: bool, no_dry_run: bool, configured: bool) -> bool {
    if dry_run {
        true
    } else if no_dry_run {
        false
    } else {
        configured
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    let output = Output::new();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            output.error(&e);
            std::process::exit(1);
        }
    };

    let result = match args.commands {
        Commands::File {
            destination,
            update,
            dry_run,
            no_dry_run,
            report_json,
        } => run_file_command(
            FileOptions {
                destination,
                update,
                dry_run: resolve_dry_run(dry_run, no_dry_run, config.dry_run),
                report_json,
            },
            &output,
        ),
        Commands::Folder {
            destination,
            update,
            base_language,
            extension,
            jobs,
            dry_run,
            no_dry_run,
            report_json,
        } => run_folder_command(
            FolderOptions {
                destination,
                update,
                base_language: base_language
                    .or(config.base_language)
                    .unwrap_or_else(|| DEFAULT_BASE_LANGUAGE.to_string()),
                extension: extension
                    .or(config.extension)
                    .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
                jobs: jobs.or(config.jobs),
                dry_run: resolve_dry_run(dry_run, no_dry_run, config.dry_run),
                report_json,
            },
            &output,
        ),
        Commands::Completions { shell } => {
            let mut command = Args::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        output.error(&e);
        std::process::exit(1);
    }
}
