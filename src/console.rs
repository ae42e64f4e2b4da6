//! Terminal stand-ins for the map, form, list and position collaborators.

use crate::dlog;
use crate::types::{Coordinates, WorkoutKind};
use crate::view::{
    InputSource, ListView, MapSurface, MarkerHandle, Notifier, PopupStyle, PositionSource,
    RawForm, ViewOptions, WorkoutRow,
};

/// Logs what a real map would draw.
#[derive(Debug, Default)]
pub struct ConsoleMap {
    markers: usize,
}

impl MapSurface for ConsoleMap {
    fn set_view(&mut self, center: Coordinates, zoom: u8, options: ViewOptions) {
        tracing::info!(
            center = %center,
            zoom,
            animate = options.animate,
            "map view"
        );
    }

    fn add_marker(&mut self, at: Coordinates) -> MarkerHandle {
        self.markers += 1;
        dlog!("marker_added at={at} n={}", self.markers);
        MarkerHandle(self.markers - 1)
    }

    fn bind_popup(&mut self, marker: MarkerHandle, content: &str, style: &PopupStyle) {
        tracing::info!(marker = marker.0, class = %style.class_name, "popup: {content}");
    }

    fn clear_markers(&mut self) {
        self.markers = 0;
    }
}

/// Prints one tab-separated line per workout.
#[derive(Debug, Default)]
pub struct ConsoleList {
    pub details: bool,
}

impl ListView for ConsoleList {
    fn render_row(&mut self, row: &WorkoutRow) {
        if !self.details {
            println!("{}\t{}", row.id, row.title);
            return;
        }

        let cols: Vec<String> = row
            .details
            .iter()
            .map(|d| format!("{} {} {}", d.icon, d.value, d.unit))
            .collect();
        println!("{}\t{}\t{}", row.id, row.title, cols.join("\t"));
    }

    fn clear(&mut self) {}
}

/// A form pre-filled from command-line arguments.
#[derive(Debug, Default)]
pub struct ConsoleForm {
    fields: RawForm,
}

impl ConsoleForm {
    pub const fn new(fields: RawForm) -> Self {
        Self { fields }
    }
}

impl InputSource for ConsoleForm {
    fn read(&self) -> RawForm {
        self.fields.clone()
    }

    fn open(&mut self) {}

    fn close(&mut self) {
        self.fields = RawForm::default();
    }

    fn show_extra_field(&mut self, kind: WorkoutKind) {
        dlog!("form_extra_field kind={kind}");
    }
}

#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Position known up front (from `--position`). `None` behaves like a
/// device without geolocation.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Option<Coordinates>);

impl PositionSource for FixedPosition {
    fn is_supported(&self) -> bool {
        self.0.is_some()
    }

    fn request(&mut self) {
        dlog!("position_requested fixed={:?}", self.0);
    }
}
