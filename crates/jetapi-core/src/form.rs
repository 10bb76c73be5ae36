//! Query builder form handling.
//!
//! The UI layer owns the input fields. On every change it hands the raw field
//! text to [`FormState::on_input`] and applies the returned [`QueryView`]: the
//! URL to display and the canonical text for the two count fields.

use crate::query::{parse_count, QueryParameters, DEFAULT_FLIGHTS, DEFAULT_PHOTOS};
use serde::{Deserialize, Serialize};

/// Raw contents of the query builder inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    /// Registration text field.
    pub registration: String,
    /// Photos number field, as typed.
    pub photos: String,
    /// Flights number field, as typed.
    pub flights: String,
    /// "Only JetPhotos" checkbox.
    pub only_jp: bool,
    /// "Only FlightRadar24" checkbox.
    pub only_fr: bool,
}

impl FormState {
    /// Parse the fields into query parameters for `base_url`.
    #[must_use]
    pub fn to_parameters(&self, base_url: &str) -> QueryParameters {
        QueryParameters::new(base_url, self.registration.as_str())
            .with_photos(parse_count(&self.photos))
            .with_flights(parse_count(&self.flights))
            .with_only_jp(self.only_jp)
            .with_only_fr(self.only_fr)
    }

    /// Handle a change event.
    #[must_use]
    pub fn on_input(&self, base_url: &str) -> QueryView {
        QueryView::from_parameters(&self.to_parameters(base_url))
    }

    /// Returns the form with its count fields replaced by their canonical text.
    #[must_use]
    pub fn canonicalized(&self, view: &QueryView) -> Self {
        Self {
            photos: view.photos_field.clone(),
            flights: view.flights_field.clone(),
            ..self.clone()
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            registration: String::new(),
            photos: DEFAULT_PHOTOS.to_string(),
            flights: DEFAULT_FLIGHTS.to_string(),
            only_jp: false,
            only_fr: false,
        }
    }
}

/// What the UI layer should display after a change event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryView {
    /// Query URL to show and copy.
    pub query_url: String,
    /// Canonical photos field text.
    pub photos_field: String,
    /// Canonical flights field text.
    pub flights_field: String,
}

impl QueryView {
    /// Build the view for already-parsed parameters.
    #[must_use]
    pub fn from_parameters(params: &QueryParameters) -> Self {
        let canonical = params.clamped();
        Self {
            query_url: canonical.build(),
            photos_field: canonical.photo_count.to_string(),
            flights_field: canonical.flight_count.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::DEFAULT_BASE_URL;

    #[test]
    fn default_form_shows_base_url() {
        let view = FormState::default().on_input(DEFAULT_BASE_URL);
        assert_eq!(view.query_url, DEFAULT_BASE_URL);
        assert_eq!(view.photos_field, "3");
        assert_eq!(view.flights_field, "20");
    }

    #[test]
    fn out_of_range_fields_are_rewritten() {
        let form = FormState {
            registration: "G-ABCD".into(),
            photos: "25".into(),
            flights: "-5".into(),
            ..FormState::default()
        };
        let view = form.on_input(DEFAULT_BASE_URL);
        assert_eq!(view.photos_field, "20");
        assert_eq!(view.flights_field, "0");
        assert_eq!(
            view.query_url,
            format!("{DEFAULT_BASE_URL}G-ABCD&photos=20&flights=0")
        );
    }

    #[test]
    fn non_numeric_field_becomes_zero() {
        let form = FormState {
            registration: "N1".into(),
            photos: "lots".into(),
            ..FormState::default()
        };
        let view = form.on_input(DEFAULT_BASE_URL);
        assert_eq!(view.photos_field, "0");
        assert_eq!(view.query_url, format!("{DEFAULT_BASE_URL}N1&photos=0"));
    }

    #[test]
    fn displayed_fields_match_query() {
        let form = FormState {
            registration: "N1".into(),
            photos: " 7 ".into(),
            flights: "100".into(),
            only_jp: false,
            only_fr: true,
        };
        let view = form.on_input(DEFAULT_BASE_URL);
        let again = form.canonicalized(&view).on_input(DEFAULT_BASE_URL);
        assert_eq!(view, again);
        assert_eq!(view.query_url, format!("{DEFAULT_BASE_URL}N1&photos=7&only_fr=true"));
    }

    #[test]
    fn checkboxes_ignored_without_registration() {
        let form = FormState {
            only_jp: true,
            only_fr: true,
            photos: "9".into(),
            ..FormState::default()
        };
        let view = form.on_input("http://localhost:4000/api?reg=");
        assert_eq!(view.query_url, "http://localhost:4000/api?reg=");
        assert_eq!(view.photos_field, "9");
    }
}
