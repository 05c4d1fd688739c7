
use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Opens a text file for line reading, transparently decompressing `.gz` (gzip or BGZF) files.
/// # Arguments
/// * `filename` - path to the file to open
/// # Errors
/// * if the file does not exist or cannot be opened
pub fn open_text_file(filename: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    let file = File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;

    let reader: Box<dyn BufRead> = if filename.extension().unwrap_or_default() == "gz" {
        // BGZF is a series of gzip members, so we need the multi-member decoder
        Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_plain_and_gzip_match() {
        let plain: Vec<String> = open_text_file(&PathBuf::from("test_data/scored_snv/run1.vcf")).unwrap()
            .lines()
            .collect::<std::io::Result<_>>().unwrap();
        let gzipped: Vec<String> = open_text_file(&PathBuf::from("test_data/scored_snv/run1.vcf.gz")).unwrap()
            .lines()
            .collect::<std::io::Result<_>>().unwrap();
        assert!(!plain.is_empty());
        assert_eq!(plain, gzipped);
    }

    #[test]
    fn test_missing_file() {
        let result = open_text_file(&PathBuf::from("test_data/does_not_exist.vcf"));
        assert!(result.is_err());
    }
}
