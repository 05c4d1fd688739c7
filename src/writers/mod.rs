/*!
# Writers module
Contains the logic for rendering the comparison reports, both the bounded console previews and the full exports.
*/
/// Lists the variants that are only present in one of the runs
pub mod presence;
/// Renders score differences as tab-separated tables
pub mod score_table;
