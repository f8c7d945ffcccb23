use std::path::PathBuf;

use crate::Args;
use crate::error::{MergeError, Result};
use crate::model::{MergeAxis, POP_CODES};
use crate::pipeline::CorpusMerge;
use crate::store::{self, CorpusStore};

/// A validated merge request: paired (id, pop) inputs in merge order plus
/// the target corpus id and axis.
#[derive(Debug, Clone)]
pub struct MergeSpec {
    pub inputs: Vec<(u32, String)>,
    pub target_id: u32,
    pub axis: MergeAxis,
    pub compress: bool,
    pub corpora_dir: PathBuf,
}

impl MergeSpec {
    pub fn print_inputs(&self) {
        println!("Merging corpora:");
        for (id, pop) in &self.inputs {
            println!("  {}", self.corpora_dir.join(format!("{id}_{pop}")).display());
        }
        println!();
    }
}

pub fn build_merge_spec(args: &Args) -> Result<MergeSpec> {
    if args.pops.len() != args.corpus_ids.len() {
        return Err(MergeError::PopsCountMismatch {
            n_pops: args.pops.len(),
            n_ids: args.corpus_ids.len(),
        });
    }
    if args.corpus_ids.len() < 2 {
        return Err(MergeError::CorpusCount {
            n_corpora: args.corpus_ids.len(),
        });
    }
    for pop in &args.pops {
        if !POP_CODES.contains(&pop.as_str()) {
            return Err(MergeError::UnknownPop { pop: pop.clone() });
        }
    }
    let axis = match args.append.as_str() {
        "SNPS" => MergeAxis::Snps,
        "INDS" => MergeAxis::Inds,
        other => {
            return Err(MergeError::UnknownAxis {
                axis: other.to_string(),
            });
        }
    };

    let inputs = args
        .corpus_ids
        .iter()
        .copied()
        .zip(args.pops.iter().cloned())
        .collect();
    Ok(MergeSpec {
        inputs,
        target_id: args.corpus_id,
        axis,
        compress: args.compress,
        corpora_dir: args.corpora_dir.clone(),
    })
}

pub fn run(spec: &MergeSpec) -> Result<()> {
    spec.print_inputs();

    let store = CorpusStore::new(&spec.corpora_dir);
    let mut job = CorpusMerge::new(
        store,
        spec.inputs.clone(),
        spec.target_id,
        spec.axis,
        spec.compress,
    );
    job.merge_corpora()?;
    job.compute_mafs()?;
    job.dump_corpus()?;

    let suffix = store::suffix(spec.compress);
    let prefix = spec
        .corpora_dir
        .join(format!("{}_{}", spec.target_id, job.pop()));
    let prefix = prefix.display();
    println!();
    println!("Finished merging genotype corpora.");
    println!("Number of SNPs:          {}", job.num_snps());
    println!("Genotype data:           {prefix}_genotype.{suffix}");
    println!("SNPs:                    {prefix}_snps.{suffix}");
    println!("MAFs:                    {prefix}_mafs.{suffix}");
    println!("Cumulative MAF distr.:   {prefix}_cum_mafs.{suffix}");
    println!("Cumulative MAF plot:     {prefix}_cum_mafs.svg");
    Ok(())
}
