//! JSON snapshot of the workout collection.
//!
//! Layout, one object per workout:
//!
//! ```json
//! {"id": "...", "date": "2024-04-14T09:30:00Z", "coords": [30.0, -12.0],
//!  "distance": 5.2, "duration": 24.0, "clicks": 0, "type": "running",
//!  "description": "Running on April 14", "cadence": 178.0}
//! ```
//!
//! Cycling records carry `elevationGain` instead of `cadence`. Pace and speed
//! are never written; older snapshots that contain them are accepted and the
//! values ignored.

use crate::error::{MaptyError, Result};
use crate::types::{Coordinates, Workout, WorkoutDetails, WorkoutKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWorkout {
    id: String,
    date: DateTime<Utc>,
    coords: [f64; 2],
    distance: f64,
    duration: f64,
    #[serde(default)]
    clicks: u32,
    #[serde(rename = "type")]
    kind: WorkoutKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    elevation_gain: Option<f64>,
}

impl From<&Workout> for StoredWorkout {
    fn from(w: &Workout) -> Self {
        let (cadence, elevation_gain) = match w.details() {
            WorkoutDetails::Running { cadence_spm } => (Some(cadence_spm), None),
            WorkoutDetails::Cycling { elevation_gain_m } => (None, Some(elevation_gain_m)),
        };
        let c = w.coords();

        Self {
            id: w.id().to_string(),
            date: w.created_at(),
            coords: [c.lat, c.lng],
            distance: w.distance_km(),
            duration: w.duration_min(),
            clicks: w.interaction_count(),
            kind: w.kind(),
            description: Some(w.description().to_string()),
            cadence,
            elevation_gain,
        }
    }
}

impl TryFrom<StoredWorkout> for Workout {
    type Error = MaptyError;

    fn try_from(s: StoredWorkout) -> Result<Self> {
        let details = match s.kind {
            WorkoutKind::Running => WorkoutDetails::Running {
                cadence_spm: s.cadence.ok_or_else(|| missing(&s.id, "cadence"))?,
            },
            WorkoutKind::Cycling => WorkoutDetails::Cycling {
                elevation_gain_m: s
                    .elevation_gain
                    .ok_or_else(|| missing(&s.id, "elevationGain"))?,
            },
        };
        let id = s.id.clone();

        Self::restore(
            s.id,
            s.date,
            Coordinates::new(s.coords[0], s.coords[1]),
            s.distance,
            s.duration,
            details,
            s.description,
            s.clicks,
        )
        .map_err(|e| MaptyError::CorruptData(format!("workout {id}: {e}")))
    }
}

fn missing(id: &str, field: &str) -> MaptyError {
    MaptyError::CorruptData(format!("workout {id}: missing field `{field}`"))
}

pub fn encode<'a>(workouts: impl IntoIterator<Item = &'a Workout>) -> Result<String> {
    let stored: Vec<StoredWorkout> = workouts.into_iter().map(StoredWorkout::from).collect();
    Ok(serde_json::to_string(&stored)?)
}

/// `None` means nothing was ever saved and yields an empty collection.
pub fn decode(snapshot: Option<&str>) -> Result<Vec<Workout>> {
    let Some(text) = snapshot else {
        return Ok(Vec::new());
    };

    let stored: Vec<StoredWorkout> =
        serde_json::from_str(text).map_err(|e| MaptyError::CorruptData(e.to_string()))?;

    stored.into_iter().map(Workout::try_from).collect()
}
