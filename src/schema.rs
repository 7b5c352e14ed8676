/// Column-name constants for the metadata stamped on every synthesis table.
/// Single source of truth for the enricher and its tests.

// ── Metadata columns ────────────────────────────────────────────────────────
pub mod metadata {
    pub const COMPETENCIA: &str = "competencia";
    pub const CENARIO_ESTUDO: &str = "cenario_estudo";
    pub const REVISAO: &str = "revisao";

    pub const ALL: [&str; 3] = [COMPETENCIA, CENARIO_ESTUDO, REVISAO];
}

// ── Synthesis files ─────────────────────────────────────────────────────────
pub mod files {
    /// Matched anywhere in the file name, not only as a suffix.
    pub const PARQUET_MARKER: &str = ".parquet";
}
