// Global verbosity level for console output control
use std::sync::atomic::{AtomicU8, Ordering};

static VERBOSITY_LEVEL: AtomicU8 = AtomicU8::new(1);

pub fn set_verbosity_level(level: u8) {
    VERBOSITY_LEVEL.store(level, Ordering::Relaxed);
}

pub fn verbosity_level() -> u8 {
    VERBOSITY_LEVEL.load(Ordering::Relaxed)
}

/// Normal operational output (level 1+)
#[macro_export]
macro_rules! v_info {
    ($($arg:tt)*) => {
        if $crate::verbosity::verbosity_level() >= 1 {
            println!($($arg)*);
        }
    };
}

/// Detailed output for debugging (level 2+)
#[macro_export]
macro_rules! v_debug {
    ($($arg:tt)*) => {
        if $crate::verbosity::verbosity_level() >= 2 {
            println!($($arg)*);
        }
    };
}

/// Errors are always shown regardless of verbosity
#[macro_export]
macro_rules! v_error {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}
