//! # Postal code geocoding
//!
//! Resolves a postal code into an [`ObserverLocation`] with the OpenStreetMap
//! [Nominatim](https://nominatim.org/release-docs/latest/api/Search/) search API.
//!
//! ```text
//! GET {endpoint}?postalcode=<code>&format=json&limit=1
//! User-Agent: starminal/<version>
//!
//! [{"lat": "12.97", "lon": "77.59", "display_name": "..., Bengaluru, Karnataka, India"}]
//! ```
//!
//! The country is taken as the last comma-separated segment of `display_name`.
//!
//! Requests are asynchronous ([`Geocoder::locate`]); callers outside a runtime use
//! [`Geocoder::locate_blocking`], which drives the request on a private single-thread
//! `tokio` runtime.

use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;
use reqwest::{header::USER_AGENT, Client};
use serde::Deserialize;

use crate::observer::ObserverLocation;
use crate::starminal_errors::StarminalError;

pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-]{1,11}$").unwrap());

/// Endpoint and identification used for geocoding requests.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderOptions {
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for GeocoderOptions {
    fn default() -> Self {
        GeocoderOptions {
            endpoint: NOMINATIM_SEARCH_URL.into(),
            user_agent: format!("starminal/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// One search hit; Nominatim returns coordinates as strings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NominatimResult {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

/// Trim a postal code and check that it looks like one.
pub fn normalize_postal_code(postal_code: &str) -> Result<&str, StarminalError> {
    let code = postal_code.trim();
    if POSTAL_CODE_RE.is_match(code) {
        Ok(code)
    } else {
        Err(StarminalError::InvalidPostalCode(postal_code.into()))
    }
}

/// Turn a Nominatim response into a location.
///
/// Arguments
/// ---------
/// * `results`: the decoded response body, best match first
/// * `postal_code`: the code searched for, used in error messages
///
/// Return
/// ------
/// * the first result as an [`ObserverLocation`]
/// * `LocationNotFound` if the response is empty, `InvalidCoordinate` if the first
///   result's coordinates do not parse or are out of range
pub fn location_from_results(
    results: &[NominatimResult],
    postal_code: &str,
) -> Result<ObserverLocation, StarminalError> {
    let Some(best) = results.first() else {
        return Err(StarminalError::LocationNotFound(postal_code.into()));
    };

    let latitude: f64 = best
        .lat
        .trim()
        .parse()
        .map_err(|_| StarminalError::InvalidCoordinate(format!("latitude {:?}", best.lat)))?;
    let longitude: f64 = best
        .lon
        .trim()
        .parse()
        .map_err(|_| StarminalError::InvalidCoordinate(format!("longitude {:?}", best.lon)))?;

    let country = best
        .display_name
        .rsplit(", ")
        .next()
        .unwrap_or_default()
        .to_string();

    ObserverLocation::new(latitude, longitude, country)
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    http_client: Client,
    options: GeocoderOptions,
}

impl Default for Geocoder {
    fn default() -> Self {
        Self::new(GeocoderOptions::default())
    }
}

impl Geocoder {
    pub fn new(options: GeocoderOptions) -> Self {
        Geocoder {
            http_client: Client::new(),
            options,
        }
    }

    pub fn options(&self) -> &GeocoderOptions {
        &self.options
    }

    /// Look up the location of a postal code.
    ///
    /// The code is validated first: malformed input never reaches the network.
    pub async fn locate(&self, postal_code: &str) -> Result<ObserverLocation, StarminalError> {
        let code = normalize_postal_code(postal_code)?;
        debug!("geocoding {:?} via {}", code, self.options.endpoint);

        let results: Vec<NominatimResult> = self
            .http_client
            .get(&self.options.endpoint)
            .query(&[("postalcode", code), ("format", "json"), ("limit", "1")])
            .header(USER_AGENT, self.options.user_agent.as_str())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let location = location_from_results(&results, code)?;
        info!(
            "postal code {:?} -> lat={:.4} lon={:.4} ({})",
            code, location.latitude, location.longitude, location.country
        );
        Ok(location)
    }

    /// Blocking variant of [`Geocoder::locate`], for threads without a runtime.
    pub fn locate_blocking(&self, postal_code: &str) -> Result<ObserverLocation, StarminalError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        rt.block_on(self.locate(postal_code))
    }
}

#[cfg(test)]
mod geocode_test {
    use super::*;

    fn result(lat: &str, lon: &str, display_name: &str) -> NominatimResult {
        NominatimResult {
            lat: lat.into(),
            lon: lon.into(),
            display_name: display_name.into(),
        }
    }

    #[test]
    fn test_normalize_postal_code() {
        assert_eq!(normalize_postal_code(" 560001 "), Ok("560001"));
        assert_eq!(normalize_postal_code("SW1A 1AA"), Ok("SW1A 1AA"));
        assert_eq!(normalize_postal_code("75001"), Ok("75001"));
        assert_eq!(normalize_postal_code("K1A-0B1"), Ok("K1A-0B1"));

        for bad in ["", "1", "   ", "560001&format=xml", "a/b", "12345678901234"] {
            assert_eq!(
                normalize_postal_code(bad),
                Err(StarminalError::InvalidPostalCode(bad.into())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_location_from_results() {
        let results = [
            result(
                "12.9791198",
                "77.5912997",
                "560001, Bengaluru, Karnataka, India",
            ),
            result("0", "0", "ignored"),
        ];
        let location = location_from_results(&results, "560001").unwrap();
        assert_eq!(location.latitude, 12.9791198);
        assert_eq!(location.longitude, 77.5912997);
        assert_eq!(location.country, "India");
    }

    #[test]
    fn test_country_without_separator() {
        let location = location_from_results(&[result("1", "2", "Nowhere")], "x").unwrap();
        assert_eq!(location.country, "Nowhere");

        let location = location_from_results(&[result("1", "2", "")], "x").unwrap();
        assert_eq!(location.country, "");
    }

    #[test]
    fn test_no_result() {
        assert_eq!(
            location_from_results(&[], "00000"),
            Err(StarminalError::LocationNotFound("00000".into()))
        );
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(matches!(
            location_from_results(&[result("north", "2", "")], "x"),
            Err(StarminalError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            location_from_results(&[result("1", "", "")], "x"),
            Err(StarminalError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            location_from_results(&[result("95.0", "2", "")], "x"),
            Err(StarminalError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_decode_response() {
        let body = r#"[{"place_id":1,"lat":"48.8630","lon":"2.3330","display_name":"75001, Paris, France","class":"place"}]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(body).unwrap();
        assert_eq!(results[0].lat, "48.8630");
        assert_eq!(
            location_from_results(&results, "75001").unwrap().country,
            "France"
        );

        let results: Vec<NominatimResult> = serde_json::from_str("[]").unwrap();
        assert!(location_from_results(&results, "75001").is_err());
    }

    #[test]
    fn test_invalid_code_skips_network() {
        let geocoder = Geocoder::new(GeocoderOptions {
            endpoint: "http://127.0.0.1:9/unreachable".into(),
            ..GeocoderOptions::default()
        });
        assert_eq!(
            geocoder.locate_blocking("??"),
            Err(StarminalError::InvalidPostalCode("??".into()))
        );
    }
}
