//! Query URL construction for the JetAPI lookup endpoint.
//!
//! A query is the API base URL followed by the aircraft registration and any
//! parameters that differ from their defaults. Counts are clamped into
//! `[MIN_COUNT, MAX_COUNT]` before they are compared or serialized, so the
//! value shown in a form field and the value sent to the service always agree.

/// Public JetAPI endpoint, ending in the `reg` parameter.
pub const DEFAULT_BASE_URL: &str = "http://www.jetapi.xyz/api?reg=";

/// Lower bound for photo and flight counts.
pub const MIN_COUNT: i64 = 0;

/// Upper bound for photo and flight counts.
pub const MAX_COUNT: i64 = 20;

/// Photo count the service uses when `photos` is omitted.
pub const DEFAULT_PHOTOS: i64 = 3;

/// Flight count the service uses when `flights` is omitted.
pub const DEFAULT_FLIGHTS: i64 = 20;

/// Constrain a count to `[MIN_COUNT, MAX_COUNT]`.
#[must_use]
pub const fn clamp(n: i64) -> i64 {
    if n < MIN_COUNT {
        MIN_COUNT
    } else if n > MAX_COUNT {
        MAX_COUNT
    } else {
        n
    }
}

/// Parse the text of a count field and clamp it.
///
/// Integers parse directly. Decimal text truncates toward zero, and values
/// too large for `i64` saturate. Anything that is not a number, including the
/// empty string, falls back to `MIN_COUNT`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_count(text: &str) -> i64 {
    let text = text.trim();
    let raw = text
        .parse::<i64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().map(|value| value as i64))
        .unwrap_or(MIN_COUNT);
    clamp(raw)
}

/// Returns true if the service would accept `registration`.
///
/// Registrations are non-empty and contain only ASCII letters, digits and `-`.
#[must_use]
pub fn is_valid_registration(registration: &str) -> bool {
    !registration.is_empty()
        && registration
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Ordered key/value pairs appended after the registration.
#[derive(Debug, Default, Clone)]
pub struct QueryPairs {
    pairs: Vec<(&'static str, String)>,
}

impl QueryPairs {
    /// Create a new, empty set of pairs.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a count when it differs from its default.
    pub fn push_if_changed(&mut self, key: &'static str, value: i64, default: i64) {
        if value != default {
            self.pairs.push((key, value.to_string()));
        }
    }

    /// Append `key=true` when the flag is set.
    pub fn push_flag(&mut self, key: &'static str, enabled: bool) {
        if enabled {
            self.pairs.push((key, "true".to_string()));
        }
    }

    /// Render as `&key=value` segments in insertion order.
    #[must_use]
    pub fn to_query_suffix(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("&{key}={value}"))
            .collect()
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Inputs for one query URL.
///
/// Rebuilt from the form on every change; nothing is kept between events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    /// API origin and path prefix, ending where the registration begins.
    pub base_url: String,
    /// Aircraft registration. Empty means there is no active query.
    pub registration: String,
    /// Number of JetPhotos images to request.
    pub photo_count: i64,
    /// Number of FlightRadar24 flights to request.
    pub flight_count: i64,
    /// Only scrape JetPhotos.
    pub only_jp: bool,
    /// Only scrape FlightRadar24.
    pub only_fr: bool,
}

impl QueryParameters {
    /// Create parameters with default counts and flags.
    #[must_use]
    pub fn new(base_url: impl Into<String>, registration: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            registration: registration.into(),
            ..Self::default()
        }
    }

    /// Set the photo count.
    #[must_use]
    pub const fn with_photos(mut self, count: i64) -> Self {
        self.photo_count = count;
        self
    }

    /// Set the flight count.
    #[must_use]
    pub const fn with_flights(mut self, count: i64) -> Self {
        self.flight_count = count;
        self
    }

    /// Restrict the lookup to JetPhotos.
    #[must_use]
    pub const fn with_only_jp(mut self, only_jp: bool) -> Self {
        self.only_jp = only_jp;
        self
    }

    /// Restrict the lookup to FlightRadar24.
    #[must_use]
    pub const fn with_only_fr(mut self, only_fr: bool) -> Self {
        self.only_fr = only_fr;
        self
    }

    /// Copy of these parameters with both counts clamped.
    ///
    /// These are the canonical values to write back into the form.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            photo_count: clamp(self.photo_count),
            flight_count: clamp(self.flight_count),
            ..self.clone()
        }
    }

    /// Returns true when a registration has been entered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.registration.is_empty()
    }

    /// Non-default parameters in their fixed order.
    #[must_use]
    pub fn to_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs.push_if_changed("photos", clamp(self.photo_count), DEFAULT_PHOTOS);
        pairs.push_if_changed("flights", clamp(self.flight_count), DEFAULT_FLIGHTS);
        pairs.push_flag("only_jp", self.only_jp);
        pairs.push_flag("only_fr", self.only_fr);
        pairs
    }

    /// Build the query URL. See [`build_query`].
    #[must_use]
    pub fn build(&self) -> String {
        build_query(self)
    }
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            registration: String::new(),
            photo_count: DEFAULT_PHOTOS,
            flight_count: DEFAULT_FLIGHTS,
            only_jp: false,
            only_fr: false,
        }
    }
}

/// Build the canonical query URL for `params`.
///
/// An empty registration yields exactly the base URL regardless of the other
/// fields. Otherwise the registration is appended verbatim, followed by
/// `photos`, `flights`, `only_jp` and `only_fr` when they differ from their
/// defaults.
#[must_use]
pub fn build_query(params: &QueryParameters) -> String {
    if !params.is_active() {
        return params.base_url.clone();
    }

    let mut query = format!("{}{}", params.base_url, params.registration);
    query.push_str(&params.to_pairs().to_query_suffix());
    query
}
