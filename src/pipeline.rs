use crate::error::{MergeError, Result};
use crate::maf;
use crate::merge;
use crate::model::{Corpus, MergeAxis, derive_pop_label};
use crate::output;
use crate::store::{CUM_MAFS, CorpusStore};
use crate::validate;

/// One merge operation, run strictly as load -> validate -> merge ->
/// statistics -> persist. Nothing is written to disk before `dump_corpus`,
/// so any load or compatibility failure leaves the corpora directory
/// untouched.
pub struct CorpusMerge {
    store: CorpusStore,
    inputs: Vec<(u32, String)>,
    target_id: u32,
    axis: MergeAxis,
    compress: bool,
    pop: String,
    merged: Option<Corpus>,
    mafs: Vec<f64>,
    cumulative: Vec<(f64, u64)>,
}

impl CorpusMerge {
    pub fn new(
        store: CorpusStore,
        inputs: Vec<(u32, String)>,
        target_id: u32,
        axis: MergeAxis,
        compress: bool,
    ) -> Self {
        let pops: Vec<String> = inputs.iter().map(|(_, pop)| pop.clone()).collect();
        let pop = derive_pop_label(&pops);
        Self {
            store,
            inputs,
            target_id,
            axis,
            compress,
            pop,
            merged: None,
            mafs: Vec::new(),
            cumulative: Vec::new(),
        }
    }

    /// Load all source corpora, check their compatibility along the chosen
    /// axis and concatenate them.
    pub fn merge_corpora(&mut self) -> Result<()> {
        let mut corpora = Vec::with_capacity(self.inputs.len());
        for (id, pop) in &self.inputs {
            corpora.push(self.store.load(*id, pop)?);
        }
        validate::validate(&corpora, self.axis)?;
        let merged = merge::merge(&corpora, self.axis, self.target_id, self.pop.clone())?;
        self.merged = Some(merged);
        Ok(())
    }

    /// Recompute MAFs and the cumulative distribution from the merged
    /// matrix, re-orienting rows to the minor allele where needed.
    pub fn compute_mafs(&mut self) -> Result<()> {
        let corpus = self.merged.as_mut().ok_or(MergeError::MergeNotRun)?;
        self.mafs = maf::compute_mafs(corpus);
        self.cumulative = maf::build_cumulative(&self.mafs);
        Ok(())
    }

    /// Persist the four corpus artifacts and hand the cumulative series to
    /// the plot renderer.
    pub fn dump_corpus(&self) -> Result<()> {
        let corpus = self.merged.as_ref().ok_or(MergeError::MergeNotRun)?;
        self.store
            .save(corpus, &self.mafs, &self.cumulative, self.compress, true)?;
        let plot_path = self
            .store
            .artifact_path(self.target_id, &self.pop, CUM_MAFS, "svg");
        output::plot_cumulative_mafs(&self.cumulative, &plot_path)
    }

    /// Marker count of the merged corpus, for the caller's summary.
    pub fn num_snps(&self) -> usize {
        self.merged.as_ref().map(Corpus::n_markers).unwrap_or(0)
    }

    /// Population label of the merged corpus.
    pub fn pop(&self) -> &str {
        &self.pop
    }
}
