use super::*;
use log::{Level, Metadata, Record};
use serial_test::serial;

#[test]
#[serial]
fn level_from_env_parses_cases() {
    let cases: &[(Option<&str>, Level)] = &[
        (None, Level::Warn),
        (Some("debug"), Level::Debug),
        (Some("INFO"), Level::Info),
        (Some("warn"), Level::Warn),
        (Some("ERROR"), Level::Error),
        (Some("trace"), Level::Trace),
        (Some("garbage"), Level::Warn),
        (Some("off"), Level::Warn),
    ];

    for (value, expected) in cases {
        match value {
            Some(v) => unsafe { std::env::set_var(PROGRAM_LOG_LEVEL, v) },
            None => unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) },
        }

        let lvl = level_from_env();
        assert_eq!(
            lvl, *expected,
            "env {:?} should yield level {:?}, got {:?}",
            value, expected, lvl
        );
    }

    unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) };
}

#[test]
fn enabled_respects_level_threshold() {
    let levels = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    for logger_level in levels {
        let logger = Logger {
            level: logger_level,
        };

        for record_level in levels {
            let meta = Metadata::builder()
                .level(record_level)
                .target("folio_fs::search")
                .build();

            assert_eq!(
                logger.enabled(&meta),
                record_level <= logger_level,
                "logger level {:?}, record level {:?}",
                logger_level,
                record_level
            );
        }
    }
}

#[test]
fn format_includes_level_target_and_message() {
    let logger = Logger { level: Level::Info };
    let args = format_args!("visited {} dirs", 3);
    let record = Record::builder()
        .level(Level::Info)
        .target("folio_fs::search")
        .args(args)
        .build();

    let line = logger.format(&record);
    assert!(line.contains("INFO"), "{line}");
    assert!(line.contains("[folio_fs::search]"), "{line}");
    assert!(line.ends_with("visited 3 dirs"), "{line}");
}
