use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("--pops got {n_pops} values but --corpus-ids got {n_ids}")]
    PopsCountMismatch { n_pops: usize, n_ids: usize },

    #[error("unknown population code {pop:?}")]
    UnknownPop { pop: String },

    #[error("unknown append axis {axis:?} (expected \"SNPS\" or \"INDS\")")]
    UnknownAxis { axis: String },

    #[error("need at least 2 corpora to merge (got {n_corpora})")]
    CorpusCount { n_corpora: usize },

    #[error("corpus {id}_{pop} not found (looked for {path})")]
    CorpusNotFound {
        id: u32,
        pop: String,
        path: std::path::PathBuf,
    },

    #[error(
        "corpus {id}_{pop} has {n_individuals} individuals but the first corpus has {expected}"
    )]
    IndividualCountMismatch {
        id: u32,
        pop: String,
        n_individuals: usize,
        expected: usize,
    },

    #[error("corpus {id}_{pop} has {n_markers} markers but the first corpus has {expected}")]
    MarkerCountMismatch {
        id: u32,
        pop: String,
        n_markers: usize,
        expected: usize,
    },

    #[error(
        "corpus {id}_{pop} disagrees with the first corpus at marker row {row} ({rsid} vs {expected_rsid})"
    )]
    MarkerIdentityMismatch {
        id: u32,
        pop: String,
        row: usize,
        rsid: String,
        expected_rsid: String,
    },

    #[error("genotype matrix of corpus {id}_{pop} has no markers or no individuals")]
    EmptyCorpus { id: u32, pop: String },

    #[error("row {row} of the genotype matrix has {len} entries (expected {expected})")]
    RaggedMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("dosage {value} at row {row}, column {col} is outside {{0, 1, 2}}")]
    DosageRange { row: usize, col: usize, value: u64 },

    #[error("snps list has {n_markers} records but the genotype matrix has {n_rows} rows")]
    MarkerListLength { n_markers: usize, n_rows: usize },

    #[error("mafs list has {n_mafs} values but the genotype matrix has {n_rows} rows")]
    MafListLength { n_mafs: usize, n_rows: usize },

    #[error("MAF {value} at index {index} is outside [0, 0.5]")]
    MafRange { index: usize, value: f64 },

    #[error("expected {expected} fields (got {n_fields}) in snp record {index}")]
    SnpRecordFields {
        index: usize,
        n_fields: usize,
        expected: usize,
    },

    #[error("could not parse field {field:?} of snp record {index}")]
    SnpRecordField { index: usize, field: &'static str },

    #[error("corpora have not been merged yet")]
    MergeNotRun,

    #[error("invalid genotype matrix shape")]
    Shape(#[from] ndarray::ShapeError),

    #[error("could not read {path}")]
    Read {
        #[source]
        source: std::io::Error,
        path: std::path::PathBuf,
    },

    #[error("could not write to {path}")]
    Write {
        #[source]
        source: std::io::Error,
        path: std::path::PathBuf,
    },

    #[error("could not parse JSON in {path}")]
    JsonRead {
        #[source]
        source: serde_json::Error,
        path: std::path::PathBuf,
    },

    #[error("could not encode JSON for {path}")]
    JsonWrite {
        #[source]
        source: serde_json::Error,
        path: std::path::PathBuf,
    },

    #[error("refusing to overwrite {path}")]
    TargetExists { path: std::path::PathBuf },

    #[error("could not plot cumulative MAF distribution")]
    Plot {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, MergeError>;
