use crate::error::{MaptyError, Result};
use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Latitude / longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and within ±90° latitude, ±180° longitude.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Running => "🏃‍♂️",
            Self::Cycling => "🚴‍♀️",
        }
    }

    /// CSS-style class used by the map surface for this kind's popups.
    pub fn popup_class(self) -> String {
        format!("{}-popup", self.as_str())
    }

    fn title(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = MaptyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            other => Err(MaptyError::Validation(format!(
                "unknown workout type {other:?}"
            ))),
        }
    }
}

/// Kind-specific stored fields. The variant is the kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    Running { cadence_spm: f64 },
    Cycling { elevation_gain_m: f64 },
}

impl WorkoutDetails {
    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running { .. } => WorkoutKind::Running,
            Self::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Builds the details of `kind` from its single extra value.
    pub const fn from_extra(kind: WorkoutKind, extra: f64) -> Self {
        match kind {
            WorkoutKind::Running => Self::Running { cadence_spm: extra },
            WorkoutKind::Cycling => Self::Cycling {
                elevation_gain_m: extra,
            },
        }
    }

    pub const fn extra(&self) -> f64 {
        match *self {
            Self::Running { cadence_spm } => cadence_spm,
            Self::Cycling { elevation_gain_m } => elevation_gain_m,
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Self::Running { cadence_spm } if !(cadence_spm.is_finite() && cadence_spm > 0.0) => {
                Err(MaptyError::Validation(format!(
                    "cadence must be a positive number, got {cadence_spm}"
                )))
            }
            Self::Cycling { elevation_gain_m }
                if !(elevation_gain_m.is_finite() && elevation_gain_m >= 0.0) =>
            {
                Err(MaptyError::Validation(format!(
                    "elevation gain must be a non-negative number, got {elevation_gain_m}"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Per-kind performance figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// min/km
    Pace(f64),
    /// km/h
    Speed(f64),
}

impl Metric {
    pub const fn value(self) -> f64 {
        match self {
            Self::Pace(v) | Self::Speed(v) => v,
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Pace(_) => "min/km",
            Self::Speed(_) => "km/h",
        }
    }

    /// Pure function of the stored fields.
    pub fn compute(distance_km: f64, duration_min: f64, details: &WorkoutDetails) -> Self {
        match details {
            WorkoutDetails::Running { .. } => Self::Pace(duration_min / distance_km),
            WorkoutDetails::Cycling { .. } => Self::Speed(distance_km / (duration_min / 60.0)),
        }
    }
}

/// `"<Kind> on <Month> <day>"`, independent of locale.
///
/// Month and day are read in `created_at`'s own time zone, so pass the
/// user's local time to get the calendar date they saw.
pub fn describe<Tz: TimeZone>(kind: WorkoutKind, created_at: &DateTime<Tz>) -> String {
    let month = MONTHS[created_at.month0() as usize];
    format!("{} on {month} {}", kind.title(), created_at.day())
}

/// One logged activity.
///
/// `description` and the derived metric are computed once when the record
/// is built and cached; only `interaction_count` changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: String,
    created_at: DateTime<Utc>,
    coords: Coordinates,
    distance_km: f64,
    duration_min: f64,
    details: WorkoutDetails,
    description: String,
    metric: Metric,
    interaction_count: u32,
}

impl Workout {
    pub fn create(
        kind: WorkoutKind,
        coords: Coordinates,
        distance_km: f64,
        duration_min: f64,
        extra: f64,
    ) -> Result<Self> {
        Self::create_at(kind, coords, distance_km, duration_min, extra, Local::now())
    }

    /// The description uses the calendar date of `created_at` in its own
    /// zone; the stored timestamp is UTC.
    pub fn create_at<Tz: TimeZone>(
        kind: WorkoutKind,
        coords: Coordinates,
        distance_km: f64,
        duration_min: f64,
        extra: f64,
        created_at: DateTime<Tz>,
    ) -> Result<Self> {
        let details = WorkoutDetails::from_extra(kind, extra);
        let description = describe(kind, &created_at);
        Self::restore(
            Uuid::new_v4().to_string(),
            created_at.with_timezone(&Utc),
            coords,
            distance_km,
            duration_min,
            details,
            Some(description),
            0,
        )
    }

    /// Rebuilds a record from stored fields. The metric is always
    /// recomputed; the description is re-derived, in local time, only when
    /// absent.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        id: String,
        created_at: DateTime<Utc>,
        coords: Coordinates,
        distance_km: f64,
        duration_min: f64,
        details: WorkoutDetails,
        description: Option<String>,
        interaction_count: u32,
    ) -> Result<Self> {
        if !coords.is_valid() {
            return Err(MaptyError::Validation(format!(
                "coordinates must be finite and in range, got {}, {}",
                coords.lat, coords.lng
            )));
        }
        if !(distance_km.is_finite() && distance_km > 0.0) {
            return Err(MaptyError::Validation(format!(
                "distance must be a positive number, got {distance_km}"
            )));
        }
        if !(duration_min.is_finite() && duration_min > 0.0) {
            return Err(MaptyError::Validation(format!(
                "duration must be a positive number, got {duration_min}"
            )));
        }
        details.validate()?;

        let description = description
            .unwrap_or_else(|| describe(details.kind(), &created_at.with_timezone(&Local)));
        let metric = Metric::compute(distance_km, duration_min, &details);

        Ok(Self {
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
            details,
            description,
            metric,
            interaction_count,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn coords(&self) -> Coordinates {
        self.coords
    }

    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub const fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub const fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    pub const fn details(&self) -> WorkoutDetails {
        self.details
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn derived_metric(&self) -> Metric {
        self.metric
    }

    pub const fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    pub const fn record_interaction(&mut self) -> u32 {
        self.interaction_count = self.interaction_count.saturating_add(1);
        self.interaction_count
    }
}
