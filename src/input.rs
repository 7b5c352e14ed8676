use std::io::{BufRead, Write};

use crate::error::{Result, SinteseError};
use crate::period::ReferencePeriod;
use crate::scenario::{ScenarioCode, ScenarioMode};

/// The three operator-supplied values stamped on every synthesis file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    pub period: ReferencePeriod,
    pub scenario: ScenarioCode,
    pub version: i64,
}

/// Values already supplied on the command line. Missing ones are prompted for.
#[derive(Debug, Clone, Default)]
pub struct PresetInputs {
    pub period: Option<String>,
    pub scenario: Option<String>,
    pub version: Option<String>,
}

/// Parse a revision number: a base-10 integer that must not be negative.
pub fn parse_version(text: &str) -> Result<i64> {
    match text.parse::<i64>() {
        Ok(v) if v >= 0 => Ok(v),
        _ => Err(SinteseError::InvalidVersion(text.to_string())),
    }
}

/// Sequential, blocking prompts for the run metadata.
///
/// The first invalid value aborts collection; there is no retry loop.
pub struct InputCollector<R, W> {
    reader: R,
    writer: W,
    mode: ScenarioMode,
}

impl<R: BufRead, W: Write> InputCollector<R, W> {
    pub fn new(reader: R, writer: W, mode: ScenarioMode) -> Self {
        Self {
            reader,
            writer,
            mode,
        }
    }

    pub fn collect(&mut self, presets: &PresetInputs) -> Result<RunMetadata> {
        let period = self.reference_period(presets.period.as_deref())?;
        let scenario = self.scenario(presets.scenario.as_deref())?;
        let version = self.version(presets.version.as_deref())?;
        Ok(RunMetadata {
            period,
            scenario,
            version,
        })
    }

    pub fn reference_period(&mut self, preset: Option<&str>) -> Result<ReferencePeriod> {
        let text = self.answer(preset, "Insira a competencia do estudo (MM/AAAA): ")?;
        ReferencePeriod::parse(&text)
    }

    pub fn scenario(&mut self, preset: Option<&str>) -> Result<ScenarioCode> {
        let question = format!(
            "Insira o cenario do estudo ({}): ",
            self.mode.prompt_hint()
        );
        let text = self.answer(preset, &question)?;
        self.mode.decode(&text)
    }

    pub fn version(&mut self, preset: Option<&str>) -> Result<i64> {
        let text = self.answer(preset, "Insira a revisao do estudo (numero inteiro >= 0): ")?;
        parse_version(&text)
    }

    fn answer(&mut self, preset: Option<&str>, question: &str) -> Result<String> {
        if let Some(value) = preset {
            return Ok(value.to_string());
        }
        self.writer.write_all(question.as_bytes())?;
        self.writer.flush()?;

        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        // Only the line terminator is removed; surrounding spaces are part of the answer.
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(trimmed.to_string())
    }
}
