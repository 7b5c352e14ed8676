use std::fs::{self, File};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use polars::datatypes::TimeUnit;
use polars::prelude::*;

use crate::error::{Result, SinteseError};
use crate::input::RunMetadata;
use crate::schema::{files, metadata};

/// True when the name contains `.parquet` anywhere, e.g. `a.parquet.bak`.
pub fn is_synthesis_file(name: &str) -> bool {
    name.contains(files::PARQUET_MARKER)
}

/// Names of the synthesis files in `dir`, in filesystem listing order.
pub fn list_synthesis_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // Non UTF-8 names cannot carry the marker in a form we can key on.
        if let Some(name) = entry.file_name().to_str() {
            if is_synthesis_file(name) {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}

/// Expressions for the three metadata columns.
///
/// `with_columns` replaces same-named columns, so stamping a table twice
/// leaves exactly one copy of each.
fn metadata_columns(meta: &RunMetadata) -> [Expr; 3] {
    [
        lit(meta.period.timestamp_nanos())
            .cast(DataType::Datetime(
                TimeUnit::Nanoseconds,
                Some(TimeZone::UTC),
            ))
            .alias(metadata::COMPETENCIA),
        lit(meta.scenario.as_str()).alias(metadata::CENARIO_ESTUDO),
        lit(meta.version)
            .cast(DataType::Int64)
            .alias(metadata::REVISAO),
    ]
}

/// Append the metadata columns to an in-memory table.
pub fn stamp_frame(df: DataFrame, meta: &RunMetadata) -> Result<DataFrame> {
    let df = df.lazy().with_columns(metadata_columns(meta)).collect()?;
    Ok(df)
}

/// Load one parquet file, stamp it, and overwrite it in place with snappy compression.
pub fn enrich_file(path: &Path, meta: &RunMetadata) -> Result<()> {
    // Read from a private copy so the same path can be truncated for writing.
    let bytes = fs::read(path)?;
    let df = ParquetReader::new(Cursor::new(bytes)).finish()?;

    let mut df = stamp_frame(df, meta)?;

    let file = File::create(path)?;
    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Snappy)
        .finish(&mut df)?;
    Ok(())
}

/// Enrich every synthesis file in `dir`, stopping at the first failure.
///
/// Files rewritten before a failing one stay rewritten. Returns the
/// processed names in listing order.
pub fn enrich_all(dir: &Path, meta: &RunMetadata) -> Result<Vec<PathBuf>> {
    tracing::info!("Starting local update of synthesis files");
    tracing::info!("Competencia: {}", meta.period.start().format("%Y-%m-%dT%H:%M:%S"));
    tracing::info!("Cenario: {}", meta.scenario);
    tracing::info!("Revisao: {}", meta.version);

    let mut done = Vec::new();
    for name in list_synthesis_files(dir)? {
        let path = dir.join(&name);
        enrich_file(&path, meta).map_err(|e| SinteseError::Enrich {
            file: name.clone(),
            source: Box::new(e),
        })?;
        tracing::debug!(file = %name, "enriched");
        done.push(path);
    }
    Ok(done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::ReferencePeriod;
    use crate::scenario::ScenarioCode;

    fn meta() -> RunMetadata {
        RunMetadata {
            period: ReferencePeriod::parse("03/2024").unwrap(),
            scenario: ScenarioCode::Pmo,
            version: 2,
        }
    }

    #[test]
    fn marker_matches_anywhere_in_name() {
        assert!(is_synthesis_file("report.parquet"));
        assert!(is_synthesis_file("a.parquet.bak"));
        assert!(is_synthesis_file("my.parquet2file"));
        assert!(!is_synthesis_file("report.csv"));
        assert!(!is_synthesis_file("parquet"));
    }

    #[test]
    fn stamp_frame_adds_typed_columns() {
        let df = df!("valor" => [1.5f64, 2.5, 3.5]).unwrap();
        let out = stamp_frame(df, &meta()).unwrap();

        assert_eq!(
            out.get_column_names_str(),
            vec!["valor", "competencia", "cenario_estudo", "revisao"]
        );
        assert_eq!(
            out.column(metadata::COMPETENCIA).unwrap().dtype(),
            &DataType::Datetime(TimeUnit::Nanoseconds, Some(TimeZone::UTC))
        );
        assert_eq!(
            out.column(metadata::CENARIO_ESTUDO).unwrap().dtype(),
            &DataType::String
        );
        assert_eq!(
            out.column(metadata::REVISAO).unwrap().dtype(),
            &DataType::Int64
        );
        assert_eq!(out.height(), 3);
    }

    #[test]
    fn stamping_twice_keeps_three_columns() {
        let df = df!("valor" => [1i32, 2]).unwrap();
        let once = stamp_frame(df, &meta()).unwrap();
        let twice = stamp_frame(once.clone(), &meta()).unwrap();
        assert_eq!(once.width(), twice.width());
        assert!(once.equals(&twice));
    }

    #[test]
    fn listing_skips_non_synthesis_files() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["a.parquet", "b.csv", "c.parquet.bak"] {
            fs::write(tmp.path().join(name), b"").unwrap();
        }
        let mut names = list_synthesis_files(tmp.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["a.parquet", "c.parquet.bak"]);
    }
}
