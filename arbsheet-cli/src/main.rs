use clap::{Parser, Subcommand};

use arbsheet_cli::export::{ExportOptions, run_export_command};
use arbsheet_cli::import::{ImportOptions, run_import_command};
use arbsheet_cli::status::{StatusOptions, run_status_command};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Export ARB resource files into a timestamped CSV sheet.
    Export {
        /// Directory holding the ARB resource files
        #[arg(long, default_value = "lib/core/i18n/l10n")]
        arb_dir: String,

        /// Resource file name prefix (files are named <prefix>_<locale>.arb)
        #[arg(long, default_value = "app")]
        prefix: String,

        /// Reference locale whose keys define the sheet rows
        #[arg(short, long, default_value = "zh")]
        reference: String,

        /// Directory the sheet is written into
        #[arg(short, long, default_value = "translations")]
        output_dir: String,
    },

    /// Import a reviewed CSV sheet back into the ARB resource files.
    Import {
        /// Directory holding the ARB resource files
        #[arg(long, default_value = "lib/core/i18n/l10n")]
        arb_dir: String,

        /// Resource file name prefix (files are named <prefix>_<locale>.arb)
        #[arg(long, default_value = "app")]
        prefix: String,

        /// The sheet to import; when omitted, a lone sheet in the table
        /// directory is used directly and several are listed for
        /// interactive selection
        #[arg(short, long)]
        table: Option<String>,

        /// Directory searched for sheets when --table is omitted
        #[arg(long, default_value = "translations")]
        table_dir: String,

        /// Skip the timestamped backup normally written before overwriting
        #[arg(long)]
        no_backup: bool,

        /// Write a machine-readable import report to this path
        #[arg(long)]
        report_json: Option<String>,
    },

    /// Show per-locale translation coverage against the reference locale.
    Status {
        /// Directory holding the ARB resource files
        #[arg(long, default_value = "lib/core/i18n/l10n")]
        arb_dir: String,

        /// Resource file name prefix (files are named <prefix>_<locale>.arb)
        #[arg(long, default_value = "app")]
        prefix: String,

        /// Reference locale the other locales are measured against
        #[arg(short, long, default_value = "zh")]
        reference: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let args = Args::parse();

    let result = match args.commands {
        Commands::Export {
            arb_dir,
            prefix,
            reference,
            output_dir,
        } => run_export_command(ExportOptions {
            arb_dir,
            prefix,
            reference,
            output_dir,
        }),
        Commands::Import {
            arb_dir,
            prefix,
            table,
            table_dir,
            no_backup,
            report_json,
        } => run_import_command(ImportOptions {
            arb_dir,
            prefix,
            table,
            table_dir,
            no_backup,
            report_json,
        }),
        Commands::Status {
            arb_dir,
            prefix,
            reference,
            json,
        } => run_status_command(StatusOptions {
            arb_dir,
            prefix,
            reference,
            json,
        }),
    };

    if let Err(message) = result {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}
