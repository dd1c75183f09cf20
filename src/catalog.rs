//! # Star catalog ingestion
//!
//! Loads a delimited star catalog (HYG database layout) into an ordered, immutable
//! [`StarCatalog`]. Only the columns needed by the visibility pipeline are read:
//!
//! | column   | meaning                              |
//! |----------|--------------------------------------|
//! | `id`     | catalog identifier                   |
//! | `proper` | proper name, often empty             |
//! | `ra`     | right ascension, **hours**           |
//! | `dec`    | declination, **degrees**             |
//! | `mag`    | apparent visual magnitude            |
//! | `con`    | constellation abbreviation           |
//! | `ci`     | B−V color index, may be empty        |
//! | `spect`  | spectral class                       |
//!
//! Any other column is ignored.
//!
//! ## Filtering
//!
//! A row is skipped when its magnitude or position does not parse, or when it is fainter
//! than [`CatalogOptions::magnitude_limit`]. Skipped rows are never an error; they are
//! counted and logged. An empty or malformed color index becomes `NaN`, which the style
//! policy renders as neutral white.

use std::io::Read;

use camino::Utf8PathBuf;
use log::{debug, info};
use serde::Deserialize;

use crate::constants::{Degree, Hour, Magnitude, DEFAULT_MAGNITUDE_LIMIT};
use crate::starminal_errors::StarminalError;

const REQUIRED_COLUMNS: [&str; 8] = ["id", "proper", "ra", "dec", "mag", "con", "ci", "spect"];

/// Where to read the catalog from and how much of it to keep.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogOptions {
    pub path: Utf8PathBuf,
    /// Entries with a magnitude above this value are dropped.
    pub magnitude_limit: Magnitude,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        CatalogOptions {
            path: Utf8PathBuf::from("data/hyg_v42.csv"),
            magnitude_limit: DEFAULT_MAGNITUDE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: String,
    pub ra: Hour,
    pub dec: Degree,
    pub magnitude: Magnitude,
    pub name: String,
    pub constellation: String,
    /// B−V color index, `NaN` when the catalog has none
    pub color_index: f64,
    pub spectral_class: String,
}

/// Raw CSV row, every field kept as text so that one bad cell only drops its row.
#[derive(Debug, Deserialize)]
struct HygRow {
    id: String,
    proper: String,
    ra: String,
    dec: String,
    mag: String,
    con: String,
    ci: String,
    spect: String,
}

impl HygRow {
    fn into_entry(self, magnitude_limit: Magnitude) -> Option<CatalogEntry> {
        let magnitude: f64 = self.mag.trim().parse().ok()?;
        if magnitude.is_nan() || magnitude > magnitude_limit {
            return None;
        }
        let ra: f64 = self.ra.trim().parse().ok()?;
        let dec: f64 = self.dec.trim().parse().ok()?;
        let color_index = self.ci.trim().parse().unwrap_or(f64::NAN);

        Some(CatalogEntry {
            id: self.id,
            ra,
            dec,
            magnitude,
            name: self.proper,
            constellation: self.con,
            color_index,
            spectral_class: self.spect,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarCatalog {
    entries: Vec<CatalogEntry>,
}

impl StarCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        StarCatalog { entries }
    }

    /// Read a catalog from a CSV file on disk.
    ///
    /// Arguments
    /// ---------
    /// * `options`: the catalog path and the magnitude cutoff
    ///
    /// Return
    /// ------
    /// * the filtered catalog, or an error if the file cannot be opened, has no header,
    ///   or lacks one of the required columns
    pub fn from_csv_path(options: &CatalogOptions) -> Result<Self, StarminalError> {
        let catalog = StarCatalog::from_reader(
            std::fs::File::open(&options.path)?,
            options.magnitude_limit,
        )?;
        info!(
            "loaded {} stars from {} (magnitude <= {})",
            catalog.len(),
            options.path,
            options.magnitude_limit
        );
        Ok(catalog)
    }

    /// Read a catalog from any CSV source with a header row.
    pub fn from_reader<R: Read>(
        reader: R,
        magnitude_limit: Magnitude,
    ) -> Result<Self, StarminalError> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|col| !headers.iter().any(|h| h == **col))
        {
            return Err(StarminalError::CatalogColumnMissing(missing.to_string()));
        }

        let mut entries = Vec::new();
        let mut skipped = 0usize;
        for row in csv_reader.deserialize::<HygRow>() {
            match row.ok().and_then(|row| row.into_entry(magnitude_limit)) {
                Some(entry) => entries.push(entry),
                None => skipped += 1,
            }
        }
        debug!("catalog: kept {} rows, skipped {}", entries.len(), skipped);

        Ok(StarCatalog { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AsRef<[CatalogEntry]> for StarCatalog {
    fn as_ref(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod catalog_test {
    use super::*;

    const HEADER: &str = "id,hip,proper,ra,dec,dist,mag,absmag,spect,ci,con";

    fn read(body: &str, limit: f64) -> StarCatalog {
        let csv = format!("{HEADER}\n{body}");
        StarCatalog::from_reader(csv.as_bytes(), limit).unwrap()
    }

    #[test]
    fn test_read_rows() {
        let catalog = read(
            "0,,Sol,0.0,0.0,0.0,-26.7,4.85,G2V,0.656,\n\
             32263,32349,Sirius,6.752481,-16.716116,2.6371,-1.44,1.454,A0m...,0.009,CMa\n",
            15.0,
        );
        assert_eq!(catalog.len(), 2);
        let sirius = &catalog.entries()[1];
        assert_eq!(sirius.id, "32263");
        assert_eq!(sirius.name, "Sirius");
        assert_eq!(sirius.ra, 6.752481);
        assert_eq!(sirius.dec, -16.716116);
        assert_eq!(sirius.magnitude, -1.44);
        assert_eq!(sirius.color_index, 0.009);
        assert_eq!(sirius.constellation, "CMa");
        assert_eq!(sirius.spectral_class, "A0m...");
    }

    #[test]
    fn test_skip_malformed_rows() {
        let catalog = read(
            "1,1,,0.00091,1.089,219.7,,2.39,F5,0.482,Psc\n\
             2,2,,abc,-19.49,47.9,9.27,5.87,K3V,0.999,Cet\n\
             3,3,,0.00511,38.859,442.4,6.61,-1.62,B9,-0.019,And\n",
            15.0,
        );
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].id, "3");
    }

    #[test]
    fn test_magnitude_limit() {
        let body = "1,,,1.0,1.0,1.0,4.5,0,,0.1,\n\
                    2,,,2.0,2.0,2.0,6.5,0,,0.2,\n\
                    3,,,3.0,3.0,3.0,6.0,0,,0.3,\n";
        let catalog = read(body, 6.0);
        let ids: Vec<&str> = catalog.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        assert_eq!(read(body, 15.0).len(), 3);
    }

    #[test]
    fn test_missing_color_index() {
        let catalog = read("7,,,1.0,1.0,1.0,4.5,0,,,\n8,,,1.0,1.0,1.0,4.5,0,,n/a,\n", 15.0);
        assert!(catalog.entries()[0].color_index.is_nan());
        assert!(catalog.entries()[1].color_index.is_nan());
    }

    #[test]
    fn test_missing_column() {
        let csv = "id,proper,ra,dec,mag,con,spect\n1,,0,0,1,,\n";
        assert_eq!(
            StarCatalog::from_reader(csv.as_bytes(), 15.0),
            Err(StarminalError::CatalogColumnMissing("ci".into()))
        );
    }
}
