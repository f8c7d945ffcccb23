use bzip2::Compression;
use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use ndarray::Array2;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{MergeError, Result};
use crate::model::{Corpus, MarkerInfo};

pub const PLAIN_SUFFIX: &str = "json";
pub const COMPRESSED_SUFFIX: &str = "json.bz2";

pub const GENOTYPE: &str = "genotype";
pub const SNPS: &str = "snps";
pub const MAFS: &str = "mafs";
pub const CUM_MAFS: &str = "cum_mafs";

pub fn suffix(compress: bool) -> &'static str {
    if compress {
        COMPRESSED_SUFFIX
    } else {
        PLAIN_SUFFIX
    }
}

const SNP_RECORD_FIELDS: usize = 5;

/// Loads and saves corpus artifacts under a base directory, using the
/// `<id>_<pop>_<artifact>.<suffix>` naming scheme.
pub struct CorpusStore {
    base_dir: PathBuf,
}

impl CorpusStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        self.base_dir.as_path()
    }

    pub fn artifact_path(&self, id: u32, pop: &str, artifact: &str, suffix: &str) -> PathBuf {
        self.base_dir.join(format!("{id}_{pop}_{artifact}.{suffix}"))
    }

    /// A corpus may be stored plain or compressed; the plain file wins when
    /// both exist.
    fn existing_artifact(&self, id: u32, pop: &str, artifact: &str) -> Result<PathBuf> {
        let plain = self.artifact_path(id, pop, artifact, PLAIN_SUFFIX);
        if plain.exists() {
            return Ok(plain);
        }
        let compressed = self.artifact_path(id, pop, artifact, COMPRESSED_SUFFIX);
        if compressed.exists() {
            return Ok(compressed);
        }
        Err(MergeError::CorpusNotFound {
            id,
            pop: pop.to_string(),
            path: plain,
        })
    }

    /// Load corpus (id, pop). All three source artifacts must be present
    /// and well-formed; the MAF list is only checked for consistency here,
    /// since statistics are recomputed from scratch after a merge.
    pub fn load(&self, id: u32, pop: &str) -> Result<Corpus> {
        let genotype_path = self.existing_artifact(id, pop, GENOTYPE)?;
        let snps_path = self.existing_artifact(id, pop, SNPS)?;
        let mafs_path = self.existing_artifact(id, pop, MAFS)?;

        let rows: Vec<Vec<u64>> = serde_json::from_value(read_value(&genotype_path)?)
            .map_err(|e| MergeError::JsonRead {
                source: e,
                path: genotype_path.clone(),
            })?;
        let genotypes = matrix_from_rows(rows, id, pop)?;

        let markers = markers_from_value(read_value(&snps_path)?)?;

        let mafs: Vec<f64> =
            serde_json::from_value(read_value(&mafs_path)?).map_err(|e| MergeError::JsonRead {
                source: e,
                path: mafs_path.clone(),
            })?;
        check_mafs(&mafs, genotypes.nrows())?;

        Corpus::new(id, pop.to_string(), genotypes, markers)
    }

    /// Write all four artifacts of a merged corpus. Each file is written to
    /// a `.tmp` sibling and renamed into place, so a single artifact is
    /// all-or-nothing; there is no cross-file atomicity.
    pub fn save(
        &self,
        corpus: &Corpus,
        mafs: &[f64],
        cumulative: &[(f64, u64)],
        compress: bool,
        overwrite: bool,
    ) -> Result<()> {
        fs::create_dir_all(&self.base_dir).map_err(|e| MergeError::Write {
            source: e,
            path: self.base_dir.clone(),
        })?;
        let suffix = suffix(compress);

        let genotype_rows: Vec<Vec<u8>> = corpus
            .genotypes
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect();
        let artifacts = [
            (GENOTYPE, Value::from(genotype_rows)),
            (SNPS, markers_to_value(&corpus.markers)),
            (MAFS, Value::from(mafs.to_vec())),
            (CUM_MAFS, cumulative_to_value(cumulative)),
        ];
        for (artifact, value) in &artifacts {
            let path = self.artifact_path(corpus.id, &corpus.pop, artifact, suffix);
            write_artifact(&path, value, compress, overwrite)?;
        }
        Ok(())
    }
}

fn cumulative_to_value(cumulative: &[(f64, u64)]) -> Value {
    Value::Array(
        cumulative
            .iter()
            .map(|&(maf, count)| serde_json::json!([maf, count]))
            .collect(),
    )
}

fn read_value(path: &Path) -> Result<Value> {
    let file = File::open(path).map_err(|e| MergeError::Read {
        source: e,
        path: path.to_path_buf(),
    })?;
    let reader = BufReader::new(file);
    let parsed = if path.extension().is_some_and(|ext| ext == "bz2") {
        serde_json::from_reader(BzDecoder::new(reader))
    } else {
        serde_json::from_reader(reader)
    };
    parsed.map_err(|e| MergeError::JsonRead {
        source: e,
        path: path.to_path_buf(),
    })
}

fn write_artifact(path: &Path, value: &Value, compress: bool, overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        return Err(MergeError::TargetExists {
            path: path.to_path_buf(),
        });
    }
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!("{file_name}.tmp"));

    let write_err = |e: std::io::Error| MergeError::Write {
        source: e,
        path: path.to_path_buf(),
    };
    let json_err = |e: serde_json::Error| MergeError::JsonWrite {
        source: e,
        path: path.to_path_buf(),
    };

    let file = File::create(&tmp).map_err(write_err)?;
    if compress {
        let mut encoder = BzEncoder::new(BufWriter::new(file), Compression::best());
        serde_json::to_writer(&mut encoder, value).map_err(json_err)?;
        let mut writer = encoder.finish().map_err(write_err)?;
        writer.flush().map_err(write_err)?;
    } else {
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, value).map_err(json_err)?;
        writer.flush().map_err(write_err)?;
    }
    fs::rename(&tmp, path).map_err(write_err)
}

fn check_mafs(mafs: &[f64], n_rows: usize) -> Result<()> {
    if mafs.len() != n_rows {
        return Err(MergeError::MafListLength {
            n_mafs: mafs.len(),
            n_rows,
        });
    }
    for (index, &value) in mafs.iter().enumerate() {
        if !(0.0..=0.5).contains(&value) {
            return Err(MergeError::MafRange { index, value });
        }
    }
    Ok(())
}

fn matrix_from_rows(rows: Vec<Vec<u64>>, id: u32, pop: &str) -> Result<Array2<u8>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map(Vec::len).unwrap_or(0);
    if n_rows == 0 || n_cols == 0 {
        return Err(MergeError::EmptyCorpus {
            id,
            pop: pop.to_string(),
        });
    }

    let mut flat = Vec::with_capacity(n_rows * n_cols);
    for (row_idx, row) in rows.into_iter().enumerate() {
        if row.len() != n_cols {
            return Err(MergeError::RaggedMatrix {
                row: row_idx,
                len: row.len(),
                expected: n_cols,
            });
        }
        for (col_idx, dosage) in row.into_iter().enumerate() {
            if dosage > 2 {
                return Err(MergeError::DosageRange {
                    row: row_idx,
                    col: col_idx,
                    value: dosage,
                });
            }
            flat.push(dosage as u8);
        }
    }
    Ok(Array2::from_shape_vec((n_rows, n_cols), flat)?)
}

fn markers_to_value(markers: &[MarkerInfo]) -> Value {
    Value::Array(
        markers
            .iter()
            .map(|m| {
                serde_json::json!([
                    m.rsid,
                    m.chromosome,
                    m.position,
                    m.major_allele,
                    m.minor_allele
                ])
            })
            .collect(),
    )
}

fn markers_from_value(value: Value) -> Result<Vec<MarkerInfo>> {
    let records = match value {
        Value::Array(records) => records,
        _ => {
            return Err(MergeError::SnpRecordField {
                index: 0,
                field: "record list",
            });
        }
    };

    let mut markers = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let fields = match record {
            Value::Array(fields) => fields,
            _ => {
                return Err(MergeError::SnpRecordField {
                    index,
                    field: "record",
                });
            }
        };
        if fields.len() != SNP_RECORD_FIELDS {
            return Err(MergeError::SnpRecordFields {
                index,
                n_fields: fields.len(),
                expected: SNP_RECORD_FIELDS,
            });
        }

        let field_err = |field: &'static str| MergeError::SnpRecordField { index, field };
        let rsid = fields[0].as_str().ok_or(field_err("rsid"))?.to_string();
        let chromosome = fields[1].as_u64().ok_or(field_err("chromosome"))?;
        if chromosome == 0 || chromosome > u64::from(u32::MAX) {
            return Err(field_err("chromosome"));
        }
        let position = fields[2].as_u64().ok_or(field_err("position"))?;
        let major_allele = fields[3]
            .as_str()
            .ok_or(field_err("major_allele"))?
            .to_string();
        let minor_allele = fields[4]
            .as_str()
            .ok_or(field_err("minor_allele"))?
            .to_string();

        markers.push(MarkerInfo {
            rsid,
            chromosome: chromosome as u32,
            position,
            major_allele,
            minor_allele,
        });
    }
    Ok(markers)
}
