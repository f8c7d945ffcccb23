use ndarray::Array2;

use crate::error::{MergeError, Result};

/// HAPMAP3 population codes accepted for source corpora, plus MIX for
/// corpora that were themselves produced by a heterogeneous merge.
pub const POP_CODES: &[&str] = &[
    "ASW", "CEU", "CEU+TSI", "CHD", "GIH", "JPT+CHB", "LWK", "MEX", "MKK", "TSI", "MIX",
];

pub const MIXED_POP: &str = "MIX";

/// Dimension along which corpora are concatenated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAxis {
    /// Append markers; all corpora must share the same individual count.
    Snps,
    /// Append individuals; all corpora must share the same marker list.
    Inds,
}

/// Metadata for one genotype-matrix row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerInfo {
    pub rsid: String,
    pub chromosome: u32,
    pub position: u64,
    pub major_allele: String,
    pub minor_allele: String,
}

/// A self-contained genotype dataset: dosage matrix indexed
/// [marker, individual] with entries in {0, 1, 2}, plus one marker record
/// per row. Identified by (id, pop) on disk.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub id: u32,
    pub pop: String,
    pub genotypes: Array2<u8>,
    pub markers: Vec<MarkerInfo>,
}

impl Corpus {
    pub fn new(
        id: u32,
        pop: String,
        genotypes: Array2<u8>,
        markers: Vec<MarkerInfo>,
    ) -> Result<Self> {
        if genotypes.nrows() == 0 || genotypes.ncols() == 0 {
            return Err(MergeError::EmptyCorpus { id, pop });
        }
        if markers.len() != genotypes.nrows() {
            return Err(MergeError::MarkerListLength {
                n_markers: markers.len(),
                n_rows: genotypes.nrows(),
            });
        }
        Ok(Self {
            id,
            pop,
            genotypes,
            markers,
        })
    }

    pub fn n_markers(&self) -> usize {
        self.genotypes.nrows()
    }

    pub fn n_individuals(&self) -> usize {
        self.genotypes.ncols()
    }
}

/// Population label of a merged corpus: the common code if all inputs share
/// one, MIX otherwise. A lone MIX input stays MIX.
pub fn derive_pop_label(pops: &[String]) -> String {
    match pops.split_first() {
        Some((first, rest)) if rest.iter().all(|p| p == first) => first.clone(),
        _ => MIXED_POP.to_string(),
    }
}
