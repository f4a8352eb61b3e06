use crate::chronometer::Chronometer;
use std::fmt::Display;

/// Prints one line per event to stdout, stamped with the time elapsed since the logger was created.
#[derive(Clone, Copy, Default)]
pub struct Logger {
    chronometer: Chronometer,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            chronometer: Chronometer::new(),
        }
    }

    pub fn format(&self, value: impl Display) -> String {
        format!("{} ({} elapsed)", value, self.chronometer.elapsed())
    }

    pub fn log(&self, value: impl Display) {
        println!("{}", self.format(value));
    }
}
