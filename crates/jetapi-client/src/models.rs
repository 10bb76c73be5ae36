//! JetAPI response models.
//!
//! Field names keep the service's PascalCase wire spelling. The service
//! emits `null` for empty lists, which deserializes to an empty `Vec`.

use serde::{Deserialize, Deserializer, Serialize};

/// Body of a successful lookup.
///
/// Either half may be missing when the service could only scrape one source,
/// or when the query restricted it with `only_jp` / `only_fr`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ScrapeResult {
    /// JetPhotos imagery.
    #[serde(default)]
    pub jet_photos: Option<JetPhotosResult>,
    /// FlightRadar24 aircraft details and flight history.
    #[serde(default)]
    pub flight_radar: Option<FlightRadarResult>,
}

impl ScrapeResult {
    /// Registration as reported by JetPhotos.
    #[must_use]
    pub fn registration(&self) -> Option<&str> {
        self.jet_photos
            .as_ref()
            .map(|jp| jp.reg.as_str())
            .filter(|reg| !reg.is_empty())
    }

    /// Number of images returned.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.jet_photos.as_ref().map_or(0, |jp| jp.images.len())
    }

    /// Number of flights returned.
    #[must_use]
    pub fn flight_count(&self) -> usize {
        self.flight_radar.as_ref().map_or(0, |fr| fr.flights.len())
    }
}

/// JetPhotos half of a lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct JetPhotosResult {
    /// Registration, upper-cased by the service.
    #[serde(default)]
    pub reg: String,
    /// Photos, newest first.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<ImageAttributes>,
}

/// One JetPhotos photo.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageAttributes {
    /// Full-size image URL.
    pub image: String,
    /// Photo page URL.
    pub link: String,
    /// Thumbnail URL.
    pub thumbnail: String,
    /// Date the photo was taken.
    pub date_taken: String,
    /// Date the photo was uploaded.
    pub date_uploaded: String,
    /// Where the photo was taken.
    pub location: String,
    /// Photographer name.
    pub photographer: String,
    /// Aircraft type.
    pub aircraft: String,
    /// Manufacturer serial number.
    pub serial: String,
    /// Operating airline.
    pub airline: String,
}

/// FlightRadar24 half of a lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct FlightRadarResult {
    /// Aircraft type.
    #[serde(default)]
    pub aircraft: String,
    /// Airline or private owner.
    #[serde(default)]
    pub airline: String,
    /// Operator.
    #[serde(default)]
    pub operator: String,
    /// ICAO type code.
    #[serde(default)]
    pub type_code: String,
    /// Airline code.
    #[serde(default)]
    pub airline_code: String,
    /// Operator code.
    #[serde(default)]
    pub operator_code: String,
    /// Mode S transponder code.
    #[serde(default)]
    pub mode_s: String,
    /// Recent flights, newest first.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub flights: Vec<FlightAttributes>,
}

/// One FlightRadar24 flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct FlightAttributes {
    /// Flight date.
    pub date: String,
    /// Origin airport.
    pub from: String,
    /// Destination airport.
    pub to: String,
    /// Flight number.
    pub flight: String,
    /// Block time.
    pub flight_time: String,
    /// Scheduled departure.
    #[serde(rename = "STD")]
    pub std: String,
    /// Actual departure.
    #[serde(rename = "ATD")]
    pub atd: String,
    /// Scheduled arrival.
    #[serde(rename = "STA")]
    pub sta: String,
    /// Status line, e.g. "Landed 10:42".
    pub status: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
