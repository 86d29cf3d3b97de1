use crate::batch::{process_batch, Upload};
use crate::core::{RuleVariantExpander, TARGET_SHEET};
use crate::error::{ForgeError, ForgeResult};
use crate::excel::import_file;
use crate::logging;
use crate::types::Placement;
use colored::Colorize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name shown for a file and used as its upload filename
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// True when `target` already exists and is the same file as `source`
fn is_same_file(source: &Path, target: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(target)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn print_failure(name: &str, error: &ForgeError) {
    println!("   {} {}", "❌".red(), name.bright_blue().bold());
    println!("      {}", error.to_string().red());
}

/// Execute the expand command
///
/// Every file is processed even when an earlier one fails; the command
/// fails at the end if any file did.
pub fn expand(
    files: Vec<PathBuf>,
    output_dir: PathBuf,
    placement: Placement,
    dry_run: bool,
    verbose: bool,
) -> ForgeResult<()> {
    if verbose {
        logging::init("rulesheet_forge=debug");
    }

    println!("{}", "🔥 Rulesheet - Expanding Rules-Header".bold().green());
    println!("   Files:     {}", files.len());
    println!("   Placement: {}", placement.to_string().bright_yellow());
    if dry_run {
        println!(
            "{}",
            "\n📋 DRY RUN MODE - No files will be written".yellow()
        );
    } else {
        println!("   Output:    {}", output_dir.display());
    }
    println!();

    let total = files.len();
    let mut failures = 0usize;
    let mut uploads = Vec::with_capacity(total);
    let mut sources = Vec::with_capacity(total);

    for path in files {
        let name = display_name(&path);
        match fs::read(&path) {
            Ok(bytes) => {
                uploads.push(Upload::new(name, bytes));
                sources.push(path);
            }
            Err(e) => {
                failures += 1;
                print_failure(&name, &ForgeError::Io(e));
            }
        }
    }

    if !dry_run && !uploads.is_empty() {
        fs::create_dir_all(&output_dir)?;
    }

    // Output path -> input that claimed it in this run
    let mut claimed: HashMap<PathBuf, String> = HashMap::new();

    for (source, outcome) in sources.iter().zip(process_batch(uploads, placement)) {
        let file = match outcome.result {
            Ok(file) => file,
            Err(e) => {
                failures += 1;
                print_failure(&outcome.source, &e);
                continue;
            }
        };

        let target = output_dir.join(&file.filename);
        if let Some(first) = claimed.get(&target) {
            failures += 1;
            print_failure(
                &outcome.source,
                &ForgeError::Validation(format!(
                    "{} would overwrite output of {}",
                    target.display(),
                    first
                )),
            );
            continue;
        }
        claimed.insert(target.clone(), source.display().to_string());

        if !dry_run {
            if is_same_file(source, &target) {
                failures += 1;
                print_failure(
                    &outcome.source,
                    &ForgeError::Validation(format!(
                        "Refusing to overwrite input file {}",
                        target.display()
                    )),
                );
                continue;
            }
            if let Err(e) = fs::write(&target, &file.bytes) {
                failures += 1;
                print_failure(&outcome.source, &ForgeError::Io(e));
                continue;
            }
        }

        println!("   {} {}", "✅".green(), outcome.source.bright_blue().bold());
        println!(
            "      Rules-Header: {} → {} rows",
            file.report.original_rows, file.report.expanded_rows
        );
        if verbose {
            println!(
                "      Rewritten columns: {}",
                if file.report.columns_rewritten.is_empty() {
                    "(none)".to_string()
                } else {
                    file.report.columns_rewritten.join(", ")
                }
            );
            println!("      Sheet order: {}", file.report.sheet_order.join(" | "));
        }
        if dry_run {
            println!("      Would write: {}", target.display());
        } else {
            println!("      Wrote: {}", target.display());
        }
    }

    println!();
    if failures == 0 {
        println!(
            "{}",
            format!("✅ {} of {} files expanded", total, total).bold().green()
        );
        Ok(())
    } else {
        println!(
            "{}",
            format!("❌ {} of {} files failed", failures, total)
                .bold()
                .red()
        );
        Err(ForgeError::Validation(format!(
            "{} of {} files failed",
            failures, total
        )))
    }
}

/// Execute the plan command - show the output layout without writing
pub fn plan(file: PathBuf, placement: Placement) -> ForgeResult<()> {
    println!("{}", "🔍 Rulesheet - Expansion Plan".bold().green());
    println!("   File:      {}", file.display());
    println!("   Placement: {}\n", placement.to_string().bright_yellow());

    let workbook = import_file(&file)?;
    let expander = RuleVariantExpander::new(placement);
    let name = display_name(&file);
    let expansion = expander.expand(&name, &workbook)?;

    println!("{}", "📋 Output sheets:".bold().cyan());
    for (idx, sheet) in expansion.workbook.sheets.iter().enumerate() {
        let marker = if sheet.name == TARGET_SHEET {
            format!(
                "{} → {} rows (expanded)",
                expansion.report.original_rows, expansion.report.expanded_rows
            )
            .green()
            .to_string()
        } else {
            format!("{} rows", sheet.row_count())
        };
        println!("   {:>2}. {}  {}", idx + 1, sheet.name.bright_blue(), marker);
    }

    println!();
    println!(
        "   Output filename: {}",
        expander.output_filename(&name).bold()
    );
    if expansion.report.columns_rewritten.is_empty() {
        println!(
            "{}",
            "⚠️  None of the variant columns exist; duplicated rows are unchanged copies".yellow()
        );
    } else {
        println!(
            "   Rewritten columns: {}",
            expansion.report.columns_rewritten.join(", ")
        );
    }

    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
