use std::collections::VecDeque;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::Config;
use crate::logbook::Logbook;
use crate::system::collector::Collector;
use crate::system::cpu::CpuReading;
use crate::system::process::census_summary;
use crate::system::snapshot::SystemSnapshot;
use crate::ui::theme::Theme;

/// Sparkline window: at a 2s refresh this is four minutes of history.
const CPU_HISTORY_CAPACITY: usize = 120;

pub struct App {
    pub running: bool,
    pub paused: bool,
    pub snapshot: SystemSnapshot,
    /// Usage readings scaled by 100 for the sparkline (10000 = all busy).
    pub cpu_history: VecDeque<u64>,
    pub status_message: Option<(String, Instant)>,
    pub theme: Theme,
    pub top_n: usize,
    pub refresh_rate_ms: u64,
    collector: Collector,
    logbook: Logbook,
}

impl App {
    pub fn new(config: &Config, logbook: Logbook) -> Self {
        Self::with_collector(Collector::new(), config, logbook)
    }

    /// Entry point for tests running against a fixture procfs root.
    pub fn with_collector(collector: Collector, config: &Config, logbook: Logbook) -> Self {
        let mut app = Self {
            running: true,
            paused: false,
            snapshot: SystemSnapshot::default(),
            cpu_history: VecDeque::with_capacity(CPU_HISTORY_CAPACITY),
            status_message: None,
            theme: Theme::from_config(&config.watch.theme),
            top_n: config.general.top_processes,
            refresh_rate_ms: config.watch.refresh_rate_ms,
            collector,
            logbook,
        };
        app.refresh_data();
        app
    }

    pub fn refresh_data(&mut self) {
        match self.collector.refresh(self.top_n) {
            Ok(snapshot) => {
                if let CpuReading::Usage(pct) = snapshot.cpu {
                    if self.cpu_history.len() == CPU_HISTORY_CAPACITY {
                        self.cpu_history.pop_front();
                    }
                    self.cpu_history.push_back((pct * 100.0) as u64);
                }
                self.logbook.record(&snapshot.cpu.summary());
                self.logbook.record(&snapshot.memory.summary());
                self.logbook.record(&census_summary(&snapshot.top_processes));
                self.snapshot = snapshot;
                self.status_message = None;
            }
            Err(err) => {
                // Keep showing the last good snapshot.
                self.status_message = Some((format!("sample failed: {err}"), Instant::now()));
            }
        }
    }

    pub fn on_tick(&mut self) {
        if !self.paused {
            self.refresh_data();
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('p') => Action::TogglePause,
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.logbook.record("continuous monitoring stopped");
                self.running = false;
            }
            Action::Refresh => self.refresh_data(),
            Action::TogglePause => self.paused = !self.paused,
            Action::None => {}
        }
    }

    pub fn log(&mut self, message: &str) {
        self.logbook.record(message);
    }
}
