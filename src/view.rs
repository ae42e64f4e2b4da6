//! Collaborators the coordinator talks to, and the view models it hands them.

use crate::types::{Coordinates, Workout, WorkoutDetails, WorkoutKind};

/// Opaque reference to a marker placed on a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewOptions {
    pub animate: bool,
    /// Pan duration in seconds.
    pub pan_duration_s: f64,
}

impl ViewOptions {
    pub const fn animated(pan_duration_s: f64) -> Self {
        Self {
            animate: true,
            pan_duration_s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupStyle {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

impl PopupStyle {
    /// Popups stay open so every workout keeps its label on the map.
    pub fn for_kind(kind: WorkoutKind) -> Self {
        Self {
            max_width: 150,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
            class_name: kind.popup_class(),
        }
    }
}

pub trait MapSurface {
    fn set_view(&mut self, center: Coordinates, zoom: u8, options: ViewOptions);
    fn add_marker(&mut self, at: Coordinates) -> MarkerHandle;
    fn bind_popup(&mut self, marker: MarkerHandle, content: &str, style: &PopupStyle);
    fn clear_markers(&mut self);
}

/// Raw, unvalidated form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawForm {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

pub trait InputSource {
    fn read(&self) -> RawForm;
    /// Show the form with the distance field focused.
    fn open(&mut self);
    /// Clear every field and hide the form.
    fn close(&mut self);
    /// Show the extra field belonging to `kind` and hide the other one.
    fn show_extra_field(&mut self, kind: WorkoutKind);
}

pub trait ListView {
    fn render_row(&mut self, row: &WorkoutRow);
    fn clear(&mut self);
}

pub trait Notifier {
    fn alert(&mut self, message: &str);
}

pub trait PositionSource {
    fn is_supported(&self) -> bool {
        true
    }

    /// Starts a single position lookup. The host reports the outcome through
    /// `App::on_position`.
    fn request(&mut self);
}

/// One list entry, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutRow {
    pub id: String,
    pub kind: WorkoutKind,
    pub title: String,
    pub details: Vec<RowDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDetail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl RowDetail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

impl From<&Workout> for WorkoutRow {
    fn from(w: &Workout) -> Self {
        let metric = w.derived_metric();
        let (extra_icon, extra_unit) = match w.details() {
            WorkoutDetails::Running { .. } => ("🦶🏼", "spm"),
            WorkoutDetails::Cycling { .. } => ("⛰", "m"),
        };

        Self {
            id: w.id().to_string(),
            kind: w.kind(),
            title: w.description().to_string(),
            details: vec![
                RowDetail::new(w.kind().icon(), w.distance_km().to_string(), "km"),
                RowDetail::new("⏱", w.duration_min().to_string(), "min"),
                RowDetail::new("⚡️", format!("{:.1}", metric.value()), metric.unit()),
                RowDetail::new(extra_icon, w.details().extra().to_string(), extra_unit),
            ],
        }
    }
}

/// Text shown in a workout's map popup.
pub fn popup_content(w: &Workout) -> String {
    format!("{} {}", w.kind().icon(), w.description())
}
