use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;

use crate::model::Corpus;

/// Recompute per-marker minor-allele frequencies from the dosage matrix.
///
/// Source corpora may encode dosage relative to an arbitrary reference
/// allele, so any row whose raw allele frequency exceeds 0.5 is flipped in
/// place (dosage 2 - d) and its major/minor labels are swapped. After this
/// pass dosage always counts the minor allele and every MAF is in [0, 0.5].
pub fn compute_mafs(corpus: &mut Corpus) -> Vec<f64> {
    let n_individuals = corpus.n_individuals();
    let pb = ProgressBar::new(corpus.n_markers() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:30} {pos}/{len} markers").unwrap(),
    );

    let mut mafs = Vec::with_capacity(corpus.n_markers());
    for (row_idx, mut row) in corpus.genotypes.rows_mut().into_iter().enumerate() {
        let total: u64 = row.iter().map(|&d| u64::from(d)).sum();
        let mut freq = total as f64 / (2 * n_individuals) as f64;
        if freq > 0.5 {
            row.mapv_inplace(|d| 2 - d);
            let marker = &mut corpus.markers[row_idx];
            std::mem::swap(&mut marker.major_allele, &mut marker.minor_allele);
            freq = 1.0 - freq;
        }
        mafs.push(freq);
        pb.inc(1);
    }
    pb.abandon();
    mafs
}

/// Cumulative MAF distribution: for each distinct MAF value in ascending
/// order, the number of markers whose MAF does not exceed it. The final
/// count equals the total marker count.
pub fn build_cumulative(mafs: &[f64]) -> Vec<(f64, u64)> {
    let mut sorted = mafs.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut cumulative = Vec::new();
    let mut count = 0u64;
    for (value, group) in &sorted.into_iter().chunk_by(|&v| v) {
        count += group.count() as u64;
        cumulative.push((value, count));
    }
    cumulative
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MarkerInfo;
    use ndarray::array;

    fn marker(rsid: &str) -> MarkerInfo {
        MarkerInfo {
            rsid: rsid.to_string(),
            chromosome: 1,
            position: 100,
            major_allele: "A".to_string(),
            minor_allele: "C".to_string(),
        }
    }

    #[test]
    fn monomorphic_rows_have_zero_maf() {
        let mut corpus = Corpus::new(
            1,
            "CEU".to_string(),
            array![[0u8, 0, 0, 0], [2, 2, 2, 2]],
            vec![marker("rs1"), marker("rs2")],
        )
        .unwrap();
        let mafs = compute_mafs(&mut corpus);
        assert_eq!(mafs, [0.0, 0.0]);
    }

    #[test]
    fn balanced_row_has_maximum_maf() {
        let mut corpus = Corpus::new(
            1,
            "CEU".to_string(),
            array![[0u8, 1, 2, 1]],
            vec![marker("rs1")],
        )
        .unwrap();
        let mafs = compute_mafs(&mut corpus);
        assert_eq!(mafs, [0.5]);
        // Exactly 0.5 is not flipped
        assert_eq!(corpus.genotypes, array![[0u8, 1, 2, 1]]);
        assert_eq!(corpus.markers[0].major_allele, "A");
    }

    #[test]
    fn major_oriented_rows_are_flipped_and_relabeled() {
        let mut corpus = Corpus::new(
            1,
            "CEU".to_string(),
            array![[2u8, 2, 2, 1]],
            vec![marker("rs1")],
        )
        .unwrap();
        let mafs = compute_mafs(&mut corpus);
        assert_eq!(mafs, [0.125]);
        assert_eq!(corpus.genotypes, array![[0u8, 0, 0, 1]]);
        assert_eq!(corpus.markers[0].major_allele, "C");
        assert_eq!(corpus.markers[0].minor_allele, "A");
    }

    #[test]
    fn cumulative_counts_are_monotonic_and_total() {
        let cumulative = build_cumulative(&[0.1, 0.05, 0.1, 0.3]);
        assert_eq!(cumulative, [(0.05, 1), (0.1, 3), (0.3, 4)]);
    }

    #[test]
    fn cumulative_of_identical_values_is_one_entry() {
        let cumulative = build_cumulative(&[0.25, 0.25, 0.25]);
        assert_eq!(cumulative, [(0.25, 3)]);
    }
}
