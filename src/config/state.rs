// src/config/state.rs
use std::path::PathBuf;

use super::consts::*;
use super::options::{ExportFormat, InputSource, OutputPaths, PipelineOptions};
use crate::board::SortKey;
use crate::chart::{GameWindow, Metric};

/// What the central panel shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    /// One bar per game of the selected player
    #[default]
    Games,
    /// One bar per series of the selected player
    Series,
    /// All players in one table
    Board,
}

impl View {
    pub const ALL: [View; 3] = [View::Games, View::Series, View::Board];

    pub fn label(self) -> &'static str {
        match self {
            View::Games => "Games",
            View::Series => "Series",
            View::Board => "All players",
        }
    }
}

#[derive(Clone, Debug)]
pub struct GuiState {
    pub view: View,
    /// Selected player (file stem in the players dir)
    pub selected_player: Option<String>,

    /// Raw text of the minimum-kills box; parsed on every change
    pub min_kills_text: String,
    pub metric: Metric,
    pub window: GameWindow,

    /// League/team narrowing for the player list ("" = any)
    pub league_filter: String,
    pub team_filter: String,

    /// Board: one year or career (None)
    pub board_year: Option<i32>,
    pub board_sort: SortKey,
    pub board_desc: bool,

    pub window_w: u32,
    pub window_h: u32,
    pub show_table: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            view: View::Games,
            selected_player: None,
            min_kills_text: s!(),
            metric: Metric::Kills,
            window: GameWindow::All,
            league_filter: s!(),
            team_filter: s!(),
            board_year: None,
            board_sort: SortKey::WinRate,
            board_desc: true,
            window_w: 1200,
            window_h: 800,
            show_table: true,
        }
    }
}

/// Where the dashboard reads from, and what "Run ETL" feeds in.
#[derive(Clone, Debug)]
pub struct DataPaths {
    /// Raw input (file or pattern), as typed
    pub input: String,
    pub players_dir: PathBuf,
    pub table_file: PathBuf,
    pub format: ExportFormat,
}

impl Default for DataPaths {
    fn default() -> Self {
        let format = ExportFormat::Csv;
        let dir = PathBuf::from(DEFAULT_OUT_DIR);
        Self {
            input: s!(DEFAULT_INPUT_PATTERN),
            players_dir: dir.join(DEFAULT_PLAYERS_SUBDIR),
            table_file: dir.join(join!(DEFAULT_TABLE_FILE, ".", format.ext())),
            format,
        }
    }
}

impl DataPaths {
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            input: InputSource::parse(&self.input),
            output: OutputPaths {
                table_file: self.table_file.clone(),
                players_dir: self.players_dir.clone(),
            },
            format: self.format,
            ..PipelineOptions::default()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub paths: DataPaths,
    pub gui: GuiState,
}
