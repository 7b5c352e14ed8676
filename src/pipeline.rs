use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::enrich::enrich_all;
use crate::error::Result;
use crate::guard::check_synthesis_dir;
use crate::input::{InputCollector, PresetInputs, RunMetadata};
use crate::keys::run_segment;
use crate::upload::{upload_all, ObjectSink};

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub metadata: RunMetadata,
    pub segment: String,
    pub enriched: Vec<PathBuf>,
    pub uploaded_keys: Vec<String>,
}

/// Directory guard, metadata prompts, enrichment, upload, in that order.
///
/// Every stage returns on its first error; the caller decides how to exit.
pub struct Pipeline<'a, S> {
    config: &'a Config,
    base_dir: PathBuf,
    sink: S,
}

impl<'a, S: ObjectSink> Pipeline<'a, S> {
    /// `base_dir` is where `config.synthesis_dir` is looked up, normally the
    /// working directory.
    pub fn new(config: &'a Config, base_dir: impl AsRef<Path>, sink: S) -> Self {
        Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
            sink,
        }
    }

    pub fn run<R: BufRead, W: Write>(
        &self,
        collector: &mut InputCollector<R, W>,
        presets: &PresetInputs,
    ) -> Result<RunSummary> {
        let dir = check_synthesis_dir(&self.base_dir, &self.config.synthesis_dir)?;

        let metadata = collector.collect(presets)?;

        let enriched = enrich_all(&dir, &metadata)?;

        let segment = run_segment(&metadata);
        let uploaded_keys = upload_all(
            &self.sink,
            &dir,
            &self.config.bucket_name,
            &self.config.bucket_prefix,
            &segment,
        )?;

        Ok(RunSummary {
            metadata,
            segment,
            enriched,
            uploaded_keys,
        })
    }
}
