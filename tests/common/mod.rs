use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

pub struct Workspace {
    pub corpora_dir: PathBuf,
}

pub fn create_workspace(label: &str) -> io::Result<Workspace> {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let corpora_dir = std::env::temp_dir().join("corpusmerge-tests").join(format!(
        "{}-{}-{}",
        std::process::id(),
        id,
        label
    ));
    fs::create_dir_all(&corpora_dir)?;
    Ok(Workspace { corpora_dir })
}

pub type MarkerFixture = (&'static str, u32, u64, &'static str, &'static str);

pub fn write_corpus(
    dir: &Path,
    id: u32,
    pop: &str,
    genotypes: &[&[u8]],
    markers: &[MarkerFixture],
) -> io::Result<()> {
    let rows: Vec<Vec<u8>> = genotypes.iter().map(|row| row.to_vec()).collect();
    fs::write(
        dir.join(format!("{id}_{pop}_genotype.json")),
        serde_json::to_string(&rows).expect("could not encode genotype fixture"),
    )?;

    let records: Vec<serde_json::Value> = markers
        .iter()
        .map(|(rsid, chromosome, position, major, minor)| {
            serde_json::json!([rsid, chromosome, position, major, minor])
        })
        .collect();
    fs::write(
        dir.join(format!("{id}_{pop}_snps.json")),
        serde_json::to_string(&records).expect("could not encode snps fixture"),
    )?;

    // Stale statistics are fine: loading only checks consistency, the merge
    // recomputes MAFs from the dosage matrix
    let mafs = vec![0.25; genotypes.len()];
    fs::write(
        dir.join(format!("{id}_{pop}_mafs.json")),
        serde_json::to_string(&mafs).expect("could not encode mafs fixture"),
    )?;
    Ok(())
}

pub const MARKERS_A: &[MarkerFixture] = &[
    ("rs1", 1, 100, "A", "C"),
    ("rs2", 1, 200, "G", "T"),
    ("rs3", 2, 50, "T", "G"),
];

pub const MARKERS_B: &[MarkerFixture] = &[("rs10", 3, 10, "A", "G"), ("rs11", 3, 20, "C", "T")];

/// Corpus 101 (CEU): 3 markers x 4 individuals. Row 2 is dosage-coded
/// against the wrong allele (all 2s) and must be re-oriented on merge.
pub fn write_corpus_a(dir: &Path) -> io::Result<()> {
    write_corpus(
        dir,
        101,
        "CEU",
        &[&[0, 1, 2, 1], &[0, 0, 1, 0], &[2, 2, 2, 2]],
        MARKERS_A,
    )
}

/// Corpus 102 (TSI): 2 markers x 4 individuals, disjoint marker ids.
pub fn write_corpus_b(dir: &Path) -> io::Result<()> {
    write_corpus(dir, 102, "TSI", &[&[1, 1, 1, 1], &[0, 1, 0, 0]], MARKERS_B)
}

/// Corpus 103 (CEU): the same marker list as corpus 101, 2 individuals.
pub fn write_corpus_c(dir: &Path) -> io::Result<()> {
    write_corpus(dir, 103, "CEU", &[&[1, 1], &[2, 2], &[0, 0]], MARKERS_A)
}
