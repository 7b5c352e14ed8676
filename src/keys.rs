use crate::input::RunMetadata;

/// `YYYY_MM_<SCENARIO>_rv<version>`, grouping every file of one run.
pub fn run_segment(meta: &RunMetadata) -> String {
    format!(
        "{}_{}_rv{}",
        meta.period.key_segment(),
        meta.scenario.as_str(),
        meta.version
    )
}

/// `<prefix>/<segment>/<filename>`. Trailing slashes on the prefix are dropped;
/// an empty prefix yields `<segment>/<filename>`.
pub fn object_key(prefix: &str, segment: &str, filename: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        format!("{segment}/{filename}")
    } else {
        format!("{prefix}/{segment}/{filename}")
    }
}
