//! Stamps DECOMP synthesis tables with run metadata and ships them to the data lake.

pub mod config;
pub mod enrich;
pub mod error;
pub mod guard;
pub mod input;
pub mod keys;
pub mod period;
pub mod pipeline;
pub mod scenario;
pub mod schema;
pub mod upload;

pub use config::{Config, Overrides};
pub use error::{Result, SinteseError};
pub use input::{InputCollector, PresetInputs, RunMetadata};
pub use period::ReferencePeriod;
pub use pipeline::{Pipeline, RunSummary};
pub use scenario::{ScenarioCode, ScenarioMode};
pub use upload::{ObjectSink, S3Sink};
