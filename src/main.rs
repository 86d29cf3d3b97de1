use clap::{Parser, Subcommand};
use rulesheet_forge::cli;
use rulesheet_forge::error::ForgeResult;
use rulesheet_forge::types::Placement;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rulesheet")]
#[command(about = "Duplicate Rules-Header rows as GF/INSERT variants in .xlsx workbooks")]
#[command(long_about = "Rulesheet - Rules-Header variant expander

Every row of the 'Rules-Header' sheet is kept and a copy is appended with:
  Ruleset ShortName = (blank)
  Variant Type      = GF
  Action            = INSERT
Columns that do not exist are left alone. All other sheets are copied unchanged.

COMMANDS:
  expand  - Expand one or more workbooks into an output directory
  plan    - Show the resulting sheet order and row counts, write nothing

PLACEMENT:
  anchored  Rules-Header stays next to PCRF / Rules-Alias, filename kept (default)
  leading   Rules-Header becomes the first sheet, file renamed to <name>_GIFT.xlsx

EXAMPLES:
  rulesheet expand rules.xlsx                      # writes expanded/rules.xlsx
  rulesheet expand *.xlsx --placement leading -o out
  rulesheet plan rules.xlsx

For the upload form and HTTP API, run 'rulesheet-server'.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Expand the Rules-Header sheet of each workbook.

Files are processed one after another. A file that cannot be expanded
(missing Rules-Header sheet, not an .xlsx, unreadable) is reported and
skipped; the remaining files are still processed. The command exits with
an error if any file failed.

An output that would overwrite its own input file is refused.")]
    /// Expand Rules-Header in one or more .xlsx workbooks
    Expand {
        /// Workbooks to expand (.xlsx)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for the expanded workbooks
        #[arg(short, long, default_value = "expanded")]
        output_dir: PathBuf,

        /// Where the expanded sheet goes: anchored or leading
        #[arg(short, long, default_value = "anchored")]
        placement: Placement,

        /// Preview results without writing files
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the output sheet order for a workbook without writing anything
    Plan {
        /// Workbook to inspect (.xlsx)
        file: PathBuf,

        /// Where the expanded sheet goes: anchored or leading
        #[arg(short, long, default_value = "anchored")]
        placement: Placement,
    },
}

fn main() -> ForgeResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Expand {
            files,
            output_dir,
            placement,
            dry_run,
            verbose,
        } => cli::expand(files, output_dir, placement, dry_run, verbose),

        Commands::Plan { file, placement } => cli::plan(file, placement),
    }
}
