//! Response types for the station and postal code services.
//!
//! These mirror the JSON returned by the services. Only the fields the
//! resolver reads are required; the rest default when absent.

use serde::Deserialize;

use crate::domain::Candidate;

/// Top-level station search response: `{"response": {...}}`.
#[derive(Debug, Deserialize)]
pub struct StationsEnvelope {
    pub response: StationsResponse,
}

/// Body of a station search.
///
/// The service reports an unknown station as `{"error": "..."}` instead of
/// an empty `station` list.
#[derive(Debug, Default, Deserialize)]
pub struct StationsResponse {
    #[serde(default)]
    pub station: Vec<StationDto>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A single station as returned by the station search.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    pub name: String,
    pub prefecture: String,
    pub line: String,
    pub postal: String,
    /// Longitude
    #[serde(default)]
    pub x: Option<f64>,
    /// Latitude
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

impl From<StationDto> for Candidate {
    fn from(dto: StationDto) -> Self {
        Candidate::new(dto.name, dto.prefecture, dto.line, dto.postal)
    }
}

/// Postal code search response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub addresses: Vec<AddressDto>,
}

/// One address for a postal code, in three scripts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    #[serde(default)]
    pub prefecture_code: String,
    #[serde(default)]
    pub ja: AddressDetail,
    #[serde(default)]
    pub kana: AddressDetail,
    #[serde(default)]
    pub en: AddressDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddressDetail {
    pub prefecture: String,
    pub address1: String,
    pub address2: String,
    pub address3: String,
    pub address4: String,
}

impl AddressResponse {
    /// Japanese address of the first match: prefecture, city and town.
    ///
    /// Empty when the code has no addresses.
    pub fn formatted_japanese(&self) -> String {
        match self.addresses.first() {
            Some(address) => {
                let ja = &address.ja;
                format!("{}{}{}", ja.prefecture, ja.address1, ja.address2)
            }
            None => String::new(),
        }
    }
}
