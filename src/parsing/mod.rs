/*!
# Parsing module
Contains the logic for parsing scored VCF files into records.
*/
/// Parser for scored VCFs that captures the rank score and sub-scores of each record
pub mod scored_vcf;
/// Helper for opening plain or gzipped text inputs
pub mod text_io;
