#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use mapty::app::{App, AppConfig, DEFAULT_SLOT_KEY, Ui};
use mapty::console::{ConsoleForm, ConsoleList, ConsoleMap, ConsoleNotifier, FixedPosition};
use mapty::database::SqliteSlots;
use mapty::types::{Coordinates, WorkoutKind};
use mapty::view::RawForm;
use mapty::{cli, utils};

#[macro_use]
extern crate mapty;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let db_path = cli.db.clone().unwrap_or_else(utils::default_db_path);
    let slots = SqliteSlots::open(&db_path)
        .with_context(|| format!("Opening workout database: {}", db_path.display()))?;

    let config = AppConfig {
        zoom_level: cli.zoom,
        position_timeout: Duration::seconds(i64::from(cli.position_timeout)),
        slot_key: DEFAULT_SLOT_KEY.to_string(),
    };

    let mut form = RawForm::default();
    let mut position = cli.position;
    if let Some(cli::Cmd::Add {
        kind,
        at,
        distance,
        duration,
        cadence,
        elevation,
    }) = &cli.cmd
    {
        form = RawForm {
            kind: kind.clone(),
            distance: distance.clone(),
            duration: duration.clone(),
            cadence: cadence.clone(),
            elevation: elevation.clone(),
        };
        // Adding needs a map to click on; center it on the workout if no
        // position was given.
        position = position.or(Some(*at));
    }

    let ui = Ui {
        map: Box::new(ConsoleMap::default()),
        form: Box::new(ConsoleForm::new(form)),
        list: Box::new(ConsoleList {
            details: cli.details,
        }),
        notifier: Box::new(ConsoleNotifier),
        position: Box::new(FixedPosition(position)),
    };

    let now = Utc::now();
    dlog!("mode={:?} db={}", cli.cmd, db_path.display());
    let mut app = App::start(config, slots, ui, now).context("Loading workouts")?;
    if let Some(at) = position {
        resolve_position(&mut app, at)?;
    }

    match cli.cmd {
        None | Some(cli::Cmd::List) => {
            if app.store().is_empty() {
                tracing::info!("no workouts saved yet");
            }
        }
        Some(cli::Cmd::Add { kind, at, .. }) => {
            app.on_map_click(at);
            if let Ok(kind) = kind.parse::<WorkoutKind>() {
                app.on_kind_changed(kind);
            }
            let id = app.on_submit().context("Adding workout")?;
            println!("{id}");
        }
        Some(cli::Cmd::Select { id }) => {
            let clicks = app
                .on_list_click(&id)
                .with_context(|| format!("Selecting workout {id}"))?;
            println!("{id}\t{clicks}");
        }
        Some(cli::Cmd::Reset) => {
            app.reset(Utc::now()).context("Resetting workouts")?;
        }
    }

    Ok(())
}

fn resolve_position(app: &mut App<SqliteSlots>, at: Coordinates) -> Result<()> {
    let now = Utc::now();
    app.on_tick(now).context("Waiting for position")?;
    app.on_position(Ok(at), now)
        .context("Resolving position")?;
    Ok(())
}
