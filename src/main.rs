mod cli;
mod error;
mod maf;
mod merge;
mod model;
mod output;
mod pipeline;
mod store;
mod validate;

use crate::error::Result;
use clap::Parser;
use miette::IntoDiagnostic;
use std::path::PathBuf;

/// Merge simulated genotype corpora and recompute their MAF statistics.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// IDs of the corpora to merge.
    #[arg(long, num_args = 2.., required = true, value_name = "CORPUS_ID")]
    corpus_ids: Vec<u32>,

    /// ID of the merged corpus.
    #[arg(long, value_name = "CORPUS_ID")]
    corpus_id: u32,

    /// HAPMAP3 population codes of the corpora to merge.
    #[arg(long, num_args = 2.., required = true, value_name = "POP")]
    pops: Vec<String>,

    /// Axis along which the corpora are merged: SNPS appends markers,
    /// INDS appends individuals.
    #[arg(long, value_parser = ["SNPS", "INDS"])]
    append: String,

    /// Compress the generated output files with bzip2.
    #[arg(long)]
    compress: bool,

    /// Directory the corpora are read from and written to.
    #[arg(
        long,
        value_hint = clap::ValueHint::DirPath,
        default_value = "./corpora"
    )]
    corpora_dir: PathBuf,
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    let spec = cli::build_merge_spec(&args)?;
    cli::run(&spec)
}

fn main() -> miette::Result<()> {
    try_main().into_diagnostic()
}
