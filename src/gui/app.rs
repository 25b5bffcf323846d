// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, Mutex},
};

use eframe::egui;

use crate::{
    board::Board,
    chart::ChartSpec,
    config::state::{AppState, View},
    pipeline, query, series,
    record::MatchRecord,
    stats::{self, PlayerSummary},
    store::{self, LeagueIndex, PlayerStore},
};

use super::components::{board_table, chart_view, controls, data_table, player_panel};
use super::progress::GuiProgress;

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "LoL Player Kills",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    pub store: PlayerStore,
    /// File stems in the players dir
    pub players: Vec<String>,
    pub index: LeagueIndex,
    /// Every player's rows; loaded when the board is first shown
    pub board: Option<Board>,

    // current selection
    pub rows: Vec<MatchRecord>,
    pub chart: ChartSpec,
    pub summary: Option<PlayerSummary>,

    pub status: Arc<Mutex<String>>,
    pub running: bool,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let store = PlayerStore::new(state.paths.players_dir.clone(), state.paths.format);
        let mut app = Self {
            state,
            store,
            players: Vec::new(),
            index: LeagueIndex::default(),
            board: None,
            rows: Vec::new(),
            chart: ChartSpec::empty(s!(), Default::default(), None),
            summary: None,
            status: Arc::new(Mutex::new(s!("Idle"))),
            running: false,
        };
        app.reload();
        app
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Re-read the players dir and the full table.
    pub fn reload(&mut self) {
        self.store = PlayerStore::new(self.state.paths.players_dir.clone(), self.state.paths.format);

        self.players = match self.store.list_players() {
            Ok(v) => v,
            Err(e) => {
                loge!("Store: {e}");
                Vec::new()
            }
        };

        self.index = if self.state.paths.table_file.is_file() {
            match store::load_table(&self.state.paths.table_file) {
                Ok(rows) => LeagueIndex::from_records(&rows),
                Err(e) => {
                    loge!("Store: {e}");
                    LeagueIndex::default()
                }
            }
        } else {
            LeagueIndex::default()
        };

        self.board = None;

        logf!("Init: players={} leagues={}", self.players.len(), self.index.leagues().count());
        self.status(if self.players.is_empty() {
            format!("No player files in {}", self.store.dir().display())
        } else {
            format!("{} player(s)", self.players.len())
        });

        // Drop a selection whose file went away
        if let Some(sel) = &self.state.gui.selected_player {
            if !self.players.contains(sel) {
                self.state.gui.selected_player = None;
            }
        }
        self.load_selected();
    }

    pub fn select(&mut self, player: Option<String>) {
        if self.state.gui.selected_player == player { return; }
        logf!("UI: Selected {:?}", player);
        self.state.gui.selected_player = player;
        self.load_selected();
    }

    /// Rows + summary for the selection, then the chart.
    fn load_selected(&mut self) {
        self.rows.clear();
        self.summary = None;
        if let Some(p) = self.state.gui.selected_player.clone() {
            match self.store.load_player(&p) {
                Ok(rows) => {
                    self.summary = stats::summarize(&p, &rows);
                    self.rows = rows;
                }
                Err(e) => loge!("Store: {e}"),
            }
        }
        self.refresh_chart();
    }

    /// Rebuild the chart from the current controls over the loaded rows.
    pub fn refresh_chart(&mut self) {
        let g = &self.state.gui;
        if self.rows.is_empty() {
            // Nothing loaded: ask the store, which explains why (no selection, bad file)
            self.chart = query::chart_for(
                &self.store,
                g.selected_player.as_deref(),
                &g.min_kills_text,
                g.metric,
                g.window,
            );
            return;
        }
        self.chart = match g.view {
            View::Series => series::series_chart(&self.rows, g.metric, g.window),
            View::Games | View::Board => {
                query::chart_from_rows(&self.rows, &g.min_kills_text, g.metric, g.window)
            }
        };
    }

    /// Load every player file once; `reload` drops it again.
    pub fn ensure_board(&mut self) {
        if self.board.is_some() { return; }
        self.board = Some(match Board::load(&self.store) {
            Ok(b) => b,
            Err(e) => {
                loge!("Board: {e}");
                Board::default()
            }
        });
    }

    /// Board row clicked: select that player and go back to their games.
    pub fn open_player(&mut self, stem: String) {
        self.state.gui.view = View::Games;
        if self.state.gui.selected_player.as_deref() == Some(stem.as_str()) {
            self.refresh_chart();
        } else {
            self.select(Some(stem));
        }
    }

    pub fn run_etl(&mut self) {
        let opts = self.state.paths.pipeline_options();
        logf!("ETL: Begin input={}", opts.input.describe());
        self.running = true;

        let mut prog = GuiProgress::new(self.status.clone());
        let res = pipeline::run(&opts, Some(&mut prog));
        self.running = false;

        match res {
            Ok(sum) => {
                self.reload();
                self.status(format!(
                    "ETL: {} row(s) → {} player file(s), {} dropped",
                    sum.report.output_rows,
                    sum.player_files.len(),
                    sum.report.dropped_total()
                ));
            }
            Err(e) => self.status(format!("Error: {e}")),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            controls::draw(ui, self);
        });

        egui::SidePanel::left("players")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                player_panel::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| match self.state.gui.view {
            View::Board => board_table::draw(ui, self),
            View::Games | View::Series => {
                chart_view::draw(ui, self);

                if self.state.gui.show_table {
                    ui.separator();
                    data_table::draw(ui, self);
                }
            }
        });
    }
}
