// Unit tests for logger module initialization logic
// Tests focus on thread-safety and level mapping

use crate::logger::{initialize, level_from_verbosity};

use log::LevelFilter;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't
/// panic or fail.
///
/// **WHY THIS MATTERS**: Initialization can be reached from multiple code
/// paths (startup, tests). If it panics or errors on the second call, it
/// would crash the process during startup.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are
/// removed, causing fern to panic when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    let log_dir = tempfile::tempdir().unwrap();
    let log_file = log_dir.path().join("moor-cli.log");

    // WHEN: Calling initialize twice
    let result1 = initialize(LevelFilter::Info, Some(&log_file));
    let result2 = initialize(LevelFilter::Info, Some(&log_file));

    // THEN: Both should return Ok (second one warns but doesn't error)
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
}

#[test]
fn given_verbosity_counts_when_mapped_then_levels_escalate() {
    assert_eq!(level_from_verbosity(0), LevelFilter::Warn);
    assert_eq!(level_from_verbosity(1), LevelFilter::Info);
    assert_eq!(level_from_verbosity(2), LevelFilter::Debug);
    assert_eq!(level_from_verbosity(3), LevelFilter::Trace);
    assert_eq!(level_from_verbosity(9), LevelFilter::Trace);
}
