use crate::codec;
use crate::database::SnapshotSlot;
use crate::dlog;
use crate::error::{MaptyError, Result};
use crate::store::WorkoutStore;
use crate::types::{Coordinates, Workout, WorkoutKind};
use crate::view::{
    InputSource, ListView, MapSurface, Notifier, PopupStyle, PositionSource, RawForm, ViewOptions,
    WorkoutRow, popup_content,
};
use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_ZOOM: u8 = 13;
pub const DEFAULT_SLOT_KEY: &str = "workouts";

const INVALID_INPUT_MSG: &str = "All form inputs must be positive numbers";
const NO_POSITION_MSG: &str = "Could not get your position";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub zoom_level: u8,
    /// How long to wait for the position source before giving up.
    pub position_timeout: Duration,
    pub slot_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            zoom_level: DEFAULT_ZOOM,
            position_timeout: Duration::seconds(10),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    AwaitingPosition { since: DateTime<Utc> },
    /// The position lookup failed; the map never becomes available.
    PositionUnavailable,
    MapReady,
    FormOpen { pending: Coordinates },
}

/// The external collaborators of one session.
pub struct Ui {
    pub map: Box<dyn MapSurface>,
    pub form: Box<dyn InputSource>,
    pub list: Box<dyn ListView>,
    pub notifier: Box<dyn Notifier>,
    pub position: Box<dyn PositionSource>,
}

/// Session state: owns the workout store and keeps the map, the list and the
/// persisted snapshot in step with it.
pub struct App<S: SnapshotSlot> {
    config: AppConfig,
    slot: S,
    ui: Ui,
    store: WorkoutStore,
    phase: Phase,
}

impl<S: SnapshotSlot> App<S> {
    /// Restores history, renders the list and asks for a position.
    pub fn start(config: AppConfig, slot: S, ui: Ui, now: DateTime<Utc>) -> Result<Self> {
        let mut app = Self {
            config,
            slot,
            ui,
            store: WorkoutStore::new(),
            phase: Phase::AwaitingPosition { since: now },
        };
        app.boot(now)?;
        Ok(app)
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub const fn slot(&self) -> &S {
        &self.slot
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    pub const fn map_ready(&self) -> bool {
        matches!(self.phase, Phase::MapReady | Phase::FormOpen { .. })
    }

    /// Delivers the outcome of the position request.
    ///
    /// Outcomes arriving after the timeout fired, or when no request is
    /// pending, are dropped.
    pub fn on_position(&mut self, outcome: Result<Coordinates>, now: DateTime<Utc>) -> Result<()> {
        let Phase::AwaitingPosition { since } = self.phase else {
            dlog!("position_ignored phase={:?}", self.phase);
            return Ok(());
        };
        if now - since > self.config.position_timeout {
            return Err(self.fail_position("timed out waiting for position".to_string()));
        }

        match outcome {
            Ok(coords) => {
                self.load_map(coords);
                Ok(())
            }
            Err(e) => Err(self.fail_position(e.to_string())),
        }
    }

    /// Enforces the position timeout.
    pub fn on_tick(&mut self, now: DateTime<Utc>) -> Result<()> {
        if let Phase::AwaitingPosition { since } = self.phase
            && now - since > self.config.position_timeout
        {
            let secs = self.config.position_timeout.num_seconds();
            return Err(self.fail_position(format!("no position after {secs}s")));
        }
        Ok(())
    }

    pub fn on_map_click(&mut self, at: Coordinates) {
        if !self.map_ready() {
            dlog!("map_click_ignored phase={:?}", self.phase);
            return;
        }
        self.phase = Phase::FormOpen { pending: at };
        self.ui.form.open();
    }

    pub fn on_kind_changed(&mut self, kind: WorkoutKind) {
        self.ui.form.show_extra_field(kind);
    }

    /// Validates the form and turns it into a workout at the clicked spot.
    ///
    /// Returns the new workout's id. On invalid input the user is alerted and
    /// the form stays open. If the snapshot cannot be saved the workout is
    /// dropped again, nothing is rendered and the form stays open.
    pub fn on_submit(&mut self) -> Result<String> {
        let Phase::FormOpen { pending } = self.phase else {
            return Err(MaptyError::Validation(
                "no location selected on the map".to_string(),
            ));
        };

        let raw = self.ui.form.read();
        let workout = match build_workout(&raw, pending) {
            Ok(w) => w,
            Err(e) => {
                tracing::warn!(err = %e, "rejected workout form");
                self.ui.notifier.alert(INVALID_INPUT_MSG);
                return Err(e);
            }
        };

        let id = workout.id().to_string();
        self.store.append(workout)?;
        if let Err(e) = self.persist() {
            tracing::warn!(err = %e, id = %id, "could not save workout; discarding it");
            self.store.remove(&id)?;
            return Err(e);
        }

        let w = self.store.find_by_id(&id)?;
        render_marker(self.ui.map.as_mut(), w);
        self.ui.list.render_row(&WorkoutRow::from(w));
        tracing::info!(id = %id, kind = %w.kind(), description = %w.description(), "workout added");

        self.ui.form.close();
        self.phase = Phase::MapReady;
        Ok(id)
    }

    /// Centers the map on the selected workout and counts the interaction.
    pub fn on_list_click(&mut self, id: &str) -> Result<u32> {
        let coords = self.store.find_by_id(id)?.coords();
        if self.map_ready() {
            self.ui
                .map
                .set_view(coords, self.config.zoom_level, ViewOptions::animated(1.0));
        }
        let clicks = self.store.record_interaction(id)?;
        dlog!("workout_selected id={id} clicks={clicks}");
        self.persist()?;
        Ok(clicks)
    }

    /// Forgets every workout, in memory and on disk, and starts over.
    pub fn reset(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.store.clear();
        self.slot.delete(&self.config.slot_key)?;
        self.ui.list.clear();
        self.ui.map.clear_markers();
        self.ui.form.close();
        tracing::info!("workout history reset");

        self.boot(now)
    }

    fn boot(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.load_history()?;
        self.request_position(now);
        Ok(())
    }

    fn load_history(&mut self) -> Result<()> {
        let snapshot = self.slot.load(&self.config.slot_key)?;
        let workouts = match codec::decode(snapshot.as_deref()) {
            Ok(w) => w,
            Err(MaptyError::CorruptData(reason)) => {
                tracing::warn!(reason = %reason, "ignoring unreadable workout history");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = self.store.replace_all(workouts) {
            tracing::warn!(err = %e, "ignoring inconsistent workout history");
            self.store.clear();
        }
        tracing::info!(workouts = self.store.len(), "history loaded");

        for w in self.store.all() {
            self.ui.list.render_row(&WorkoutRow::from(w));
        }
        Ok(())
    }

    fn request_position(&mut self, now: DateTime<Utc>) {
        self.phase = Phase::AwaitingPosition { since: now };
        if self.ui.position.is_supported() {
            self.ui.position.request();
        } else {
            // Nothing will ever call back. No alert: the user never asked
            // for a position, the list still works.
            tracing::info!("no position source; map disabled");
            self.phase = Phase::PositionUnavailable;
        }
    }

    fn load_map(&mut self, center: Coordinates) {
        self.ui
            .map
            .set_view(center, self.config.zoom_level, ViewOptions::default());
        self.phase = Phase::MapReady;
        tracing::info!(center = %center, "map ready");

        for w in self.store.all() {
            render_marker(self.ui.map.as_mut(), w);
        }
    }

    fn fail_position(&mut self, reason: String) -> MaptyError {
        tracing::warn!(reason = %reason, "position unavailable");
        self.phase = Phase::PositionUnavailable;
        self.ui.notifier.alert(NO_POSITION_MSG);
        MaptyError::PositionUnavailable(reason)
    }

    fn persist(&mut self) -> Result<()> {
        let text = codec::encode(self.store.all())?;
        self.slot.save(&self.config.slot_key, &text)
    }
}

fn render_marker(map: &mut dyn MapSurface, w: &Workout) {
    let marker = map.add_marker(w.coords());
    map.bind_popup(marker, &popup_content(w), &PopupStyle::for_kind(w.kind()));
}

/// Empty fields read as 0 and garbage as NaN; both are then rejected.
fn parse_field(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    s.parse().unwrap_or(f64::NAN)
}

fn build_workout(raw: &RawForm, at: Coordinates) -> Result<Workout> {
    let kind: WorkoutKind = raw.kind.parse()?;
    let distance = parse_field(&raw.distance);
    let duration = parse_field(&raw.duration);
    let extra = parse_field(match kind {
        WorkoutKind::Running => &raw.cadence,
        WorkoutKind::Cycling => &raw.elevation,
    });

    let all_finite = [distance, duration, extra].iter().all(|v| v.is_finite());
    let all_positive = distance > 0.0
        && duration > 0.0
        && match kind {
            WorkoutKind::Running => extra > 0.0,
            WorkoutKind::Cycling => extra >= 0.0,
        };
    if !(all_finite && all_positive) {
        return Err(MaptyError::Validation(format!(
            "distance={:?} duration={:?} extra={:?}",
            raw.distance,
            raw.duration,
            match kind {
                WorkoutKind::Running => &raw.cadence,
                WorkoutKind::Cycling => &raw.elevation,
            }
        )));
    }

    Workout::create(kind, at, distance, duration, extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::SqliteSlots;
    use crate::types::{Metric, describe};
    use crate::view::MarkerHandle;
    use chrono::{Datelike, Local};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        views: Vec<(Coordinates, u8, ViewOptions)>,
        markers: Vec<Coordinates>,
        popups: Vec<(MarkerHandle, String, PopupStyle)>,
        markers_cleared: usize,
        rows: Vec<WorkoutRow>,
        list_cleared: usize,
        alerts: Vec<String>,
        form: RawForm,
        form_open: bool,
        extra_field: Option<WorkoutKind>,
        position_requests: usize,
        unsupported: bool,
    }

    #[derive(Clone, Default)]
    struct Fake(Rc<RefCell<Log>>);

    impl MapSurface for Fake {
        fn set_view(&mut self, center: Coordinates, zoom: u8, options: ViewOptions) {
            self.0.borrow_mut().views.push((center, zoom, options));
        }
        fn add_marker(&mut self, at: Coordinates) -> MarkerHandle {
            let mut log = self.0.borrow_mut();
            log.markers.push(at);
            MarkerHandle(log.markers.len() - 1)
        }
        fn bind_popup(&mut self, marker: MarkerHandle, content: &str, style: &PopupStyle) {
            self.0
                .borrow_mut()
                .popups
                .push((marker, content.to_string(), style.clone()));
        }
        fn clear_markers(&mut self) {
            let mut log = self.0.borrow_mut();
            log.markers.clear();
            log.popups.clear();
            log.markers_cleared += 1;
        }
    }

    impl InputSource for Fake {
        fn read(&self) -> RawForm {
            self.0.borrow().form.clone()
        }
        fn open(&mut self) {
            self.0.borrow_mut().form_open = true;
        }
        fn close(&mut self) {
            let mut log = self.0.borrow_mut();
            log.form = RawForm::default();
            log.form_open = false;
        }
        fn show_extra_field(&mut self, kind: WorkoutKind) {
            self.0.borrow_mut().extra_field = Some(kind);
        }
    }

    impl ListView for Fake {
        fn render_row(&mut self, row: &WorkoutRow) {
            self.0.borrow_mut().rows.push(row.clone());
        }
        fn clear(&mut self) {
            let mut log = self.0.borrow_mut();
            log.rows.clear();
            log.list_cleared += 1;
        }
    }

    impl Notifier for Fake {
        fn alert(&mut self, message: &str) {
            self.0.borrow_mut().alerts.push(message.to_string());
        }
    }

    impl PositionSource for Fake {
        fn is_supported(&self) -> bool {
            !self.0.borrow().unsupported
        }
        fn request(&mut self) {
            self.0.borrow_mut().position_requests += 1;
        }
    }

    fn ui(fake: &Fake) -> Ui {
        Ui {
            map: Box::new(fake.clone()),
            form: Box::new(fake.clone()),
            list: Box::new(fake.clone()),
            notifier: Box::new(fake.clone()),
            position: Box::new(fake.clone()),
        }
    }

    fn start_with(slot: SqliteSlots) -> (App<SqliteSlots>, Fake, DateTime<Utc>) {
        let fake = Fake::default();
        let now = Utc::now();
        let app = App::start(AppConfig::default(), slot, ui(&fake), now).unwrap();
        (app, fake, now)
    }

    fn ready_app() -> (App<SqliteSlots>, Fake) {
        let (mut app, fake, now) = start_with(SqliteSlots::open_in_memory().unwrap());
        app.on_position(Ok(Coordinates::new(30.0, -12.0)), now)
            .unwrap();
        (app, fake)
    }

    fn fill(fake: &Fake, kind: &str, distance: &str, duration: &str, cadence: &str, elevation: &str) {
        fake.0.borrow_mut().form = RawForm {
            kind: kind.to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: cadence.to_string(),
            elevation: elevation.to_string(),
        };
    }

    fn saved(app: &App<SqliteSlots>) -> Vec<Workout> {
        let text = app.slot().load(DEFAULT_SLOT_KEY).unwrap();
        codec::decode(text.as_deref()).unwrap()
    }

    #[test]
    fn running_end_to_end() {
        let (mut app, fake) = ready_app();
        app.on_map_click(Coordinates::new(30.0, -12.0));
        assert!(fake.0.borrow().form_open);

        fill(&fake, "running", "5.2", "24", "178", "");
        let id = app.on_submit().unwrap();

        let w = app.store().find_by_id(&id).unwrap();
        let today = w.created_at().with_timezone(&Local);
        assert_eq!(
            w.description(),
            format!("Running on {} {}", today.format("%B"), today.day())
        );
        let Metric::Pace(pace) = w.derived_metric() else {
            panic!("expected pace");
        };
        assert!((pace - 4.615).abs() < 1e-3);

        assert_eq!(app.phase(), Phase::MapReady);
        let log = fake.0.borrow();
        assert!(!log.form_open);
        assert_eq!(log.markers, vec![Coordinates::new(30.0, -12.0)]);
        assert_eq!(log.popups[0].2.class_name, "running-popup");
        assert_eq!(log.rows.len(), 1);
        assert_eq!(log.rows[0].id, id);
        drop(log);

        assert_eq!(saved(&app), vec![w.clone()]);
    }

    #[test]
    fn cycling_end_to_end() {
        let (mut app, fake) = ready_app();
        app.on_kind_changed(WorkoutKind::Cycling);
        assert_eq!(fake.0.borrow().extra_field, Some(WorkoutKind::Cycling));

        app.on_map_click(Coordinates::new(30.0, -12.0));
        fill(&fake, "cycling", "27", "95", "", "523");
        let id = app.on_submit().unwrap();

        let w = app.store().find_by_id(&id).unwrap();
        let today = w.created_at().with_timezone(&Local);
        assert_eq!(w.description(), describe(WorkoutKind::Cycling, &today));
        let Metric::Speed(speed) = w.derived_metric() else {
            panic!("expected speed");
        };
        assert!((speed - 17.05).abs() < 1e-2);
    }

    #[test]
    fn invalid_form_keeps_form_open() {
        let (mut app, fake) = ready_app();
        let at = Coordinates::new(1.0, 2.0);
        app.on_map_click(at);

        let bad = [
            ("running", "0", "24", "178", ""),
            ("running", "5", "-5", "178", ""),
            ("running", "5", "24", "NaN", ""),
            ("running", "5", "24", "abc", ""),
            ("running", "", "24", "178", ""),
            ("cycling", "5", "24", "", "-3"),
            ("cycling", "inf", "24", "", "10"),
            ("walking", "5", "24", "178", ""),
        ];
        for (i, (kind, distance, duration, cadence, elevation)) in bad.into_iter().enumerate() {
            fill(&fake, kind, distance, duration, cadence, elevation);
            let err = app.on_submit().unwrap_err();
            assert!(matches!(err, MaptyError::Validation(_)), "{kind} {distance}: {err}");
            assert_eq!(fake.0.borrow().alerts.len(), i + 1);
        }

        assert_eq!(app.phase(), Phase::FormOpen { pending: at });
        assert!(app.store().is_empty());
        assert!(app.slot().load(DEFAULT_SLOT_KEY).unwrap().is_none());
        assert_eq!(fake.0.borrow().alerts[0], INVALID_INPUT_MSG);
    }

    #[test]
    fn submit_without_map_click_is_rejected() {
        let (mut app, fake) = ready_app();
        fill(&fake, "running", "5.2", "24", "178", "");
        assert!(matches!(
            app.on_submit().unwrap_err(),
            MaptyError::Validation(_)
        ));
        assert!(app.store().is_empty());
    }

    #[test]
    fn restored_history_lists_first_and_marks_after_map_ready() {
        let mut slot = SqliteSlots::open_in_memory().unwrap();
        let at = Coordinates::new(30.0, -12.0);
        let history = vec![
            Workout::create(WorkoutKind::Running, at, 5.2, 24.0, 178.0).unwrap(),
            Workout::create(WorkoutKind::Cycling, at, 27.0, 95.0, 523.0).unwrap(),
        ];
        slot.save(DEFAULT_SLOT_KEY, &codec::encode(&history).unwrap())
            .unwrap();

        let (mut app, fake, now) = start_with(slot);
        {
            let log = fake.0.borrow();
            assert_eq!(log.rows.len(), 2);
            assert!(log.markers.is_empty());
            assert_eq!(log.position_requests, 1);
        }
        assert!(matches!(app.phase(), Phase::AwaitingPosition { .. }));

        app.on_position(Ok(Coordinates::new(48.0, 2.0)), now).unwrap();
        let log = fake.0.borrow();
        assert_eq!(
            log.views,
            vec![(Coordinates::new(48.0, 2.0), DEFAULT_ZOOM, ViewOptions::default())]
        );
        assert_eq!(log.markers.len(), 2);
        assert_eq!(log.popups[1].1, "🚴‍♀️ ".to_string() + history[1].description());
        assert_eq!(app.store().all().cloned().collect::<Vec<_>>(), history);
    }

    #[test]
    fn selecting_a_restored_workout_counts_and_persists() {
        let mut slot = SqliteSlots::open_in_memory().unwrap();
        let w = Workout::create(WorkoutKind::Running, Coordinates::new(3.0, 4.0), 5.0, 25.0, 170.0)
            .unwrap();
        slot.save(DEFAULT_SLOT_KEY, &codec::encode([&w]).unwrap())
            .unwrap();
        let (mut app, fake, now) = start_with(slot);
        app.on_position(Ok(Coordinates::new(0.0, 0.0)), now).unwrap();

        assert_eq!(app.on_list_click(w.id()).unwrap(), 1);
        assert_eq!(app.on_list_click(w.id()).unwrap(), 2);

        let last_view = *fake.0.borrow().views.last().unwrap();
        assert_eq!(
            last_view,
            (Coordinates::new(3.0, 4.0), DEFAULT_ZOOM, ViewOptions::animated(1.0))
        );
        assert_eq!(saved(&app)[0].interaction_count(), 2);
        assert!(matches!(
            app.on_list_click("missing").unwrap_err(),
            MaptyError::NotFound(_)
        ));
    }

    #[test]
    fn position_error_leaves_list_usable() {
        let (mut app, fake, now) = start_with(SqliteSlots::open_in_memory().unwrap());
        let err = app
            .on_position(
                Err(MaptyError::PositionUnavailable("denied".to_string())),
                now,
            )
            .unwrap_err();
        assert!(matches!(err, MaptyError::PositionUnavailable(_)));
        assert_eq!(app.phase(), Phase::PositionUnavailable);
        assert_eq!(fake.0.borrow().alerts, vec![NO_POSITION_MSG.to_string()]);

        app.on_map_click(Coordinates::new(1.0, 1.0));
        assert!(!fake.0.borrow().form_open);
        assert!(fake.0.borrow().views.is_empty());
    }

    #[test]
    fn position_times_out_and_late_answer_is_ignored() {
        let (mut app, fake, now) = start_with(SqliteSlots::open_in_memory().unwrap());

        app.on_tick(now + Duration::seconds(5)).unwrap();
        assert!(matches!(app.phase(), Phase::AwaitingPosition { .. }));

        let err = app.on_tick(now + Duration::seconds(11)).unwrap_err();
        assert!(matches!(err, MaptyError::PositionUnavailable(_)));
        assert_eq!(app.phase(), Phase::PositionUnavailable);

        app.on_position(Ok(Coordinates::new(1.0, 1.0)), now + Duration::seconds(12))
            .unwrap();
        assert_eq!(app.phase(), Phase::PositionUnavailable);
        assert!(fake.0.borrow().views.is_empty());
    }

    #[test]
    fn unsupported_position_source_is_silent() {
        let fake = Fake::default();
        fake.0.borrow_mut().unsupported = true;
        let app = App::start(
            AppConfig::default(),
            SqliteSlots::open_in_memory().unwrap(),
            ui(&fake),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(app.phase(), Phase::PositionUnavailable);
        let log = fake.0.borrow();
        assert_eq!(log.position_requests, 0);
        assert!(log.alerts.is_empty());
    }

    #[test]
    fn corrupt_history_starts_empty() {
        let mut slot = SqliteSlots::open_in_memory().unwrap();
        slot.save(DEFAULT_SLOT_KEY, "{not json").unwrap();

        let (app, fake, _) = start_with(slot);
        assert!(app.store().is_empty());
        assert!(fake.0.borrow().rows.is_empty());
    }

    #[test]
    fn duplicate_ids_in_history_start_empty() {
        let w = Workout::create(
            WorkoutKind::Running,
            Coordinates::new(30.0, -12.0),
            5.2,
            24.0,
            178.0,
        )
        .unwrap();
        let mut slot = SqliteSlots::open_in_memory().unwrap();
        slot.save(DEFAULT_SLOT_KEY, &codec::encode([&w, &w]).unwrap())
            .unwrap();

        let (mut app, fake, now) = start_with(slot);
        assert!(app.store().is_empty());
        assert!(fake.0.borrow().rows.is_empty());

        app.on_position(Ok(Coordinates::new(30.0, -12.0)), now)
            .unwrap();
        assert!(fake.0.borrow().markers.is_empty());
    }

    struct FullDisk;

    impl SnapshotSlot for FullDisk {
        fn load(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }
        fn save(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(MaptyError::Io(std::io::Error::other("disk full")))
        }
        fn delete(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_save_discards_the_new_workout() {
        let fake = Fake::default();
        let now = Utc::now();
        let mut app = App::start(AppConfig::default(), FullDisk, ui(&fake), now).unwrap();
        app.on_position(Ok(Coordinates::new(30.0, -12.0)), now)
            .unwrap();
        let at = Coordinates::new(30.1, -12.1);
        app.on_map_click(at);
        fill(&fake, "running", "5.2", "24", "178", "");

        let err = app.on_submit().unwrap_err();
        assert!(matches!(err, MaptyError::Io(_)));
        assert!(app.store().is_empty());
        assert_eq!(app.phase(), Phase::FormOpen { pending: at });
        let log = fake.0.borrow();
        assert!(log.markers.is_empty());
        assert!(log.rows.is_empty());
        assert!(log.form_open);
    }

    #[test]
    fn reset_clears_memory_and_slot() {
        let (mut app, fake) = ready_app();
        app.on_map_click(Coordinates::new(30.0, -12.0));
        fill(&fake, "running", "5.2", "24", "178", "");
        app.on_submit().unwrap();
        assert_eq!(saved(&app).len(), 1);

        app.reset(Utc::now()).unwrap();

        assert!(app.store().is_empty());
        assert!(app.slot().load(DEFAULT_SLOT_KEY).unwrap().is_none());
        assert!(matches!(app.phase(), Phase::AwaitingPosition { .. }));
        let log = fake.0.borrow();
        assert_eq!(log.list_cleared, 1);
        assert_eq!(log.markers_cleared, 1);
        assert!(log.rows.is_empty());
        assert_eq!(log.position_requests, 2);
    }

    #[test]
    fn parse_field_follows_form_rules() {
        assert_eq!(parse_field(" 5.2 "), 5.2);
        assert_eq!(parse_field(""), 0.0);
        assert!(parse_field("five").is_nan());
    }
}
