use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VarrankError;

/// Closed, 1-based genomic interval on a single chromosome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenomicInterval {
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
}

impl GenomicInterval {
    pub fn new(chromosome: impl Into<String>, start: u64, end: u64) -> Self {
        Self { chromosome: chromosome.into(), start, end }
    }

    pub fn contains(&self, chromosome: &str, position: u64) -> bool {
        normalise_chromosome(chromosome) == normalise_chromosome(&self.chromosome)
            && (self.start..=self.end).contains(&position)
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

fn normalise_chromosome(chromosome: &str) -> &str {
    chromosome.strip_prefix("chr").unwrap_or(chromosome)
}

impl fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.start, self.end)
    }
}

/// Parses `chr10:123256000-123256999` (the `chr` prefix is optional).
impl FromStr for GenomicInterval {
    type Err = VarrankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VarrankError::Config(format!("invalid genomic interval '{s}'"));
        let (chromosome, range) = s.trim().split_once(':').ok_or_else(invalid)?;
        let (start, end) = range.split_once('-').ok_or_else(invalid)?;
        let start: u64 = start.replace(',', "").parse().map_err(|_| invalid())?;
        let end: u64 = end.replace(',', "").parse().map_err(|_| invalid())?;
        if chromosome.is_empty() || start == 0 || end < start {
            return Err(invalid());
        }
        Ok(Self::new(chromosome, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval() {
        let interval: GenomicInterval = "chr10:123,256,000-123,256,999".parse().unwrap();
        assert_eq!(interval, GenomicInterval::new("chr10", 123_256_000, 123_256_999));
        assert_eq!(interval.len(), 1000);
    }

    #[test]
    fn test_parse_rejects_reversed_range() {
        assert!("10:500-100".parse::<GenomicInterval>().is_err());
        assert!("10-500".parse::<GenomicInterval>().is_err());
    }

    #[test]
    fn test_contains_ignores_chr_prefix() {
        let interval = GenomicInterval::new("chr10", 100, 200);
        assert!(interval.contains("10", 100));
        assert!(interval.contains("chr10", 200));
        assert!(!interval.contains("10", 201));
        assert!(!interval.contains("11", 150));
    }
}
