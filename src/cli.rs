use crate::app::DEFAULT_ZOOM;
use crate::types::Coordinates;
use crate::utils::parse_coordinates;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mapty",
    about = "Log running and cycling workouts on a map and keep them between sessions"
)]
pub struct Cli {
    /// SQLite file holding the saved workouts.
    ///
    /// Default: $XDG_DATA_HOME/mapty/mapty.sqlite3 (or ~/.local/share/...)
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Current position. Without it the map never loads and only the list works.
    #[arg(long, value_name = "LAT,LNG", value_parser = parse_coordinates, global = true)]
    pub position: Option<Coordinates>,

    /// Map zoom level used when centering.
    #[arg(long, default_value_t = DEFAULT_ZOOM, global = true)]
    pub zoom: u8,

    /// Seconds to wait for a position before giving up.
    #[arg(long, default_value_t = 10, global = true)]
    pub position_timeout: u32,

    /// Print every metric of each listed workout.
    #[arg(long, global = true)]
    pub details: bool,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// List saved workouts (the default).
    List,

    /// Drop a new workout on the map.
    Add {
        /// `running` or `cycling`.
        #[arg(long = "type", value_name = "TYPE")]
        kind: String,

        /// Where the workout happened.
        #[arg(long, value_name = "LAT,LNG", value_parser = parse_coordinates)]
        at: Coordinates,

        /// Distance in km.
        #[arg(long, allow_hyphen_values = true)]
        distance: String,

        /// Duration in minutes.
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        /// Steps per minute (running).
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        cadence: String,

        /// Elevation gain in meters (cycling).
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        elevation: String,
    },

    /// Select a workout: center the map on it and count the interaction.
    Select { id: String },

    /// Delete every saved workout.
    Reset,
}
