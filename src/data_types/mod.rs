/// Generic set algebra over identity keys, producing the only-first, only-second, and shared partitions
pub mod identity_comparison;
/// Pairs of shared records whose rank scores changed
pub mod score_difference;
/// Contains the annotated variant record with rank scores
pub mod scored_record;
/// Run-level counts that get logged and saved
pub mod summary;
