// src/gui/components/mod.rs
pub mod board_table;
pub mod chart_view;
pub mod controls;
pub mod data_table;
pub mod player_panel;
