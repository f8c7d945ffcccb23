use crate::error::{MergeError, Result};
use crate::model::{Corpus, MergeAxis};

/// Check that the corpora can be concatenated along `axis`. The first corpus
/// is the reference; the first corpus that disagrees with it is reported.
pub fn validate(corpora: &[Corpus], axis: MergeAxis) -> Result<()> {
    if corpora.len() < 2 {
        return Err(MergeError::CorpusCount {
            n_corpora: corpora.len(),
        });
    }
    let first = &corpora[0];

    match axis {
        MergeAxis::Snps => {
            for corpus in &corpora[1..] {
                if corpus.n_individuals() != first.n_individuals() {
                    return Err(MergeError::IndividualCountMismatch {
                        id: corpus.id,
                        pop: corpus.pop.clone(),
                        n_individuals: corpus.n_individuals(),
                        expected: first.n_individuals(),
                    });
                }
            }
        }
        MergeAxis::Inds => {
            for corpus in &corpora[1..] {
                if corpus.n_markers() != first.n_markers() {
                    return Err(MergeError::MarkerCountMismatch {
                        id: corpus.id,
                        pop: corpus.pop.clone(),
                        n_markers: corpus.n_markers(),
                        expected: first.n_markers(),
                    });
                }
                for (row, (marker, expected)) in
                    corpus.markers.iter().zip(&first.markers).enumerate()
                {
                    if marker != expected {
                        return Err(MergeError::MarkerIdentityMismatch {
                            id: corpus.id,
                            pop: corpus.pop.clone(),
                            row,
                            rsid: marker.rsid.clone(),
                            expected_rsid: expected.rsid.clone(),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}
