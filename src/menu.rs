//! The interactive numbered menu, the default mode when no flags are given.

use std::io::{self, Write};

use color_eyre::Result;

use crate::logbook::Logbook;
use crate::report;
use crate::system::collector::Collector;
use crate::system::process::census_summary;

/// What the menu loop decided the program should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Switch to the live dashboard.
    Watch,
    /// Quit.
    Exit,
}

/// Run the menu until the user picks continuous monitoring or exit.
/// Blocks on stdin between selections.
pub fn run(collector: &mut Collector, top: usize, logbook: &mut Logbook) -> Result<MenuOutcome> {
    let stdin = io::stdin();
    loop {
        print!(
            "\n=== sysmon ===\n\
             1. CPU usage\n\
             2. Memory usage\n\
             3. Top processes\n\
             4. Continuous monitoring\n\
             5. Exit\n\
             Enter your choice: "
        );
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            // stdin closed; same as picking exit.
            return Ok(MenuOutcome::Exit);
        }

        match line.trim() {
            "1" => show_cpu(collector, logbook),
            "2" => show_memory(collector, logbook),
            "3" => show_processes(collector, top, logbook),
            "4" => return Ok(MenuOutcome::Watch),
            "5" | "q" => {
                logbook.record("user exited from menu");
                return Ok(MenuOutcome::Exit);
            }
            other => println!("Invalid choice `{other}`. Please select 1-5."),
        }
    }
}

// A failed sample prints a diagnostic and returns to the menu; one bad
// read never takes the session down.

fn show_cpu(collector: &mut Collector, logbook: &mut Logbook) {
    match collector.sample_cpu() {
        Ok(reading) => {
            print!("{}", report::cpu_section(reading));
            logbook.record(&reading.summary());
        }
        Err(err) => eprintln!("CPU sampling failed: {err}"),
    }
}

fn show_memory(collector: &Collector, logbook: &mut Logbook) {
    match collector.sample_memory() {
        Ok(sample) => {
            print!("{}", report::memory_section(&sample));
            logbook.record(&sample.summary());
        }
        Err(err) => eprintln!("memory sampling failed: {err}"),
    }
}

fn show_processes(collector: &Collector, top: usize, logbook: &mut Logbook) {
    match collector.sample_processes(top) {
        Ok(ranked) => {
            print!("{}", report::process_section(&ranked));
            logbook.record(&census_summary(&ranked));
        }
        Err(err) => eprintln!("process census failed: {err}"),
    }
}
