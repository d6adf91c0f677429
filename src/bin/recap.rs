use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "recap", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Delete source-format images and renumber the rest to 1..N per folder.
    Renumber(RenumberArgs),
    /// Validate a gallery catalog (and optionally a config).
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct RenumberArgs {
    /// Root folder; every immediate subfolder is processed.
    #[arg(long)]
    root: PathBuf,

    /// Process `root` itself instead of its subfolders.
    #[arg(long, default_value_t = false)]
    single: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Catalog JSON.
    #[arg(long)]
    catalog: PathBuf,

    /// Folder that item sources are relative to; enables the missing-file check.
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Gallery config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Renumber(args) => cmd_renumber(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn cmd_renumber(args: RenumberArgs) -> anyhow::Result<()> {
    let opts = recap::RenumberOptions::default();
    let reports = if args.single {
        vec![recap::renumber_folder(&args.root, &opts)?]
    } else {
        recap::renumber_tree(&args.root, &opts)?
    };

    let mut failed = 0usize;
    for report in &reports {
        failed += report.failures.len();
        println!(
            "{}: {} renamed, {} deleted, {} failed",
            report.dir.display(),
            report.renamed.len(),
            report.deleted.len(),
            report.failures.len()
        );
    }
    eprintln!("processed {} folder(s), {failed} failure(s)", reports.len());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let catalog = recap::Catalog::from_path(&args.catalog)?;
    if let Some(path) = &args.config {
        recap::GalleryConfig::from_path(path)?;
    }

    if let Some(root) = &args.assets_root {
        let missing = missing_sources(&catalog, root);
        for (item, path) in &missing {
            eprintln!("missing media for '{item}': {}", path.display());
        }
        if !missing.is_empty() {
            anyhow::bail!("{} media file(s) missing", missing.len());
        }
    }

    let items = catalog.items().count();
    println!(
        "catalog ok: {} phase(s), {items} item(s)",
        catalog.phases.len()
    );
    Ok(())
}

fn missing_sources(catalog: &recap::Catalog, root: &Path) -> Vec<(recap::ItemId, PathBuf)> {
    catalog
        .items()
        .filter_map(|(_, item)| {
            let path = root.join(item.source.trim_start_matches('/'));
            (!path.is_file()).then(|| (item.id.clone(), path))
        })
        .collect()
}
