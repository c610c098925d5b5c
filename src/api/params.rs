use std::fmt;

/// Latitude/longitude pair used to pin a query to a location.
///
/// Only ever sent as a request parameter; responses never carry coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Wire form of the `latlong` parameter: `"<lat>,<lon>"` with 8 decimal
    /// places, fixed point, `.` as the decimal separator regardless of locale.
    pub fn to_query_value(&self) -> String {
        format!("{:.8},{:.8}", self.latitude, self.longitude)
    }
}

/// The desired content formats for individual result pods. The server default
/// is basic text and image formats ("plaintext,image").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFormat {
    Plaintext,
    Image,
    Imagemap,
    Minput,
    Moutput,
    Cell,
    Mathml,
    Sound,
    Wav,
}

impl ResultFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plaintext => "plaintext",
            Self::Image => "image",
            Self::Imagemap => "imagemap",
            Self::Minput => "minput",
            Self::Moutput => "moutput",
            Self::Cell => "cell",
            Self::Mathml => "mathml",
            Self::Sound => "sound",
            Self::Wav => "wav",
        }
    }
}

impl fmt::Display for ResultFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// System of units for measurements and quantities. By default the server
/// picks one from the caller's location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation layout for Simple API images: pods with horizontal dividers
/// (the server default) or separate sections with label bar headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Divider,
    Labelbar,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Divider => "divider",
            Self::Labelbar => "labelbar",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode the `async` family of timeout flags.
///
/// A missing value omits the parameter. A positive value is sent as its
/// decimal string. Zero or negative values are sent as the literal `false`,
/// which the server reads as "disable async behavior"; encoding `0` as `"0"`
/// would instead request a zero-second budget.
pub fn encode_timeout_flag(timeout: Option<f32>) -> Option<String> {
    timeout.map(|seconds| {
        if seconds > 0.0 {
            seconds.to_string()
        } else {
            "false".to_string()
        }
    })
}

/// Encode a repeatable parameter as a single comma-joined value.
///
/// Empty lists omit the parameter. Elements are lower-cased, kept in
/// insertion order and never deduplicated; the server honors repeats.
pub fn encode_list<T: ToString>(values: &[T]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    Some(
        values
            .iter()
            .map(|value| value.to_string().to_lowercase())
            .collect::<Vec<_>>()
            .join(","),
    )
}
