//! CSV output module.
//!
//! Writes a rate map as `symbol,rate` rows.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::rates::RateMap;

/// Save rates to a CSV file, sorted by symbol
pub fn save_rates_csv<P: AsRef<Path>>(output_file: P, rates: &RateMap) -> Result<()> {
    let path = output_file.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }

    let mut writer = csv::Writer::from_path(path).context("Failed to create CSV file")?;
    writer.write_record(["symbol", "rate"])?;

    let mut symbols: Vec<&String> = rates.keys().collect();
    symbols.sort();

    for symbol in symbols {
        let rate = rates[symbol].to_string();
        writer.write_record([symbol.as_str(), rate.as_str()])?;
    }

    writer.flush().context("Failed to write CSV file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_rates_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("rates.csv");

        let mut rates = RateMap::new();
        rates.insert("XAU".to_string(), 2000.0);
        rates.insert("COFFEE".to_string(), 0.25);
        rates.insert("ZERO".to_string(), f64::INFINITY);

        save_rates_csv(&path, &rates).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "symbol,rate\nCOFFEE,0.25\nXAU,2000\nZERO,inf\n");
    }

    #[test]
    fn test_save_empty_rates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        save_rates_csv(&path, &RateMap::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "symbol,rate\n");
    }
}
