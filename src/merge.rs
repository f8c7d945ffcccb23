use ndarray::{Axis, concatenate};

use crate::error::Result;
use crate::model::{Corpus, MergeAxis};

/// Concatenate validated corpora along `axis`, in list order. SNPS stacks
/// marker rows and marker records; INDS stacks individual columns and keeps
/// the shared marker list of the first corpus. Nothing is reordered or
/// deduplicated.
pub fn merge(corpora: &[Corpus], axis: MergeAxis, id: u32, pop: String) -> Result<Corpus> {
    let views: Vec<_> = corpora.iter().map(|c| c.genotypes.view()).collect();
    let (genotypes, markers) = match axis {
        MergeAxis::Snps => {
            let genotypes = concatenate(Axis(0), &views)?;
            let markers = corpora
                .iter()
                .flat_map(|c| c.markers.iter().cloned())
                .collect();
            (genotypes, markers)
        }
        MergeAxis::Inds => {
            let genotypes = concatenate(Axis(1), &views)?;
            (genotypes, corpora[0].markers.clone())
        }
    };
    Corpus::new(id, pop, genotypes, markers)
}
