use anyhow::Context;
use rustc_hash::FxHashSet;
use std::path::Path;

// Column of the allow-list file that holds the IATA code
const IATA_COLUMN: usize = 2;

/// Set of IATA codes an airport or route must match to be kept.
#[derive(Debug, Clone, Default)]
pub struct IataCodes {
    codes: FxHashSet<String>,
}

impl IataCodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a header-less CSV file with the IATA code in the third column.
    /// Empty codes and short rows are ignored.
    pub fn from_csv(path: &Path) -> anyhow::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Could not open {}", path.display()))?;

        let mut codes = IataCodes::new();
        for result in reader.records() {
            let record = result.context("Failed to parse IATA code row")?;
            if let Some(code) = record.get(IATA_COLUMN) {
                codes.insert(code);
            }
        }
        Ok(codes)
    }

    pub fn insert(&mut self, code: &str) -> bool {
        let code = code.trim();
        if code.is_empty() {
            return false;
        }
        self.codes.insert(code.to_string())
    }

    pub fn contains(&self, code: &str) -> bool {
        !code.is_empty() && self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for IataCodes {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut codes = IataCodes::new();
        for code in iter {
            codes.insert(code);
        }
        codes
    }
}
