// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::progress::Progress;

pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    stages: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, stages: 0 }
    }
    fn set_status(&self, msg: impl Into<String>) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }
}

impl Progress for GuiProgress {
    fn stage(&mut self, name: &str) {
        self.stages += 1;
        self.set_status(format!("ETL: {name} ({}/3)", self.stages));
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn finish(&mut self) {
        if self.stages == 0 {
            self.set_status(s!("ETL: nothing ran"));
        }
    }
}
