//! Integration tests for the resolution table resolver.
//!
//! Every table entry is asserted literally, then the fallback path and its
//! diagnostics are checked.

use rstest::rstest;
use std::io;
use std::sync::{Arc, Mutex};
use std::thread;
use tracing_subscriber::fmt::MakeWriter;

use video_resolution_selector::table::{resolve_with_source, ResolutionSource};
use video_resolution_selector::{
    lookup, resolve, AspectRatio, Mode, Quality, Resolution, SelectorError, DEFAULT_RESOLUTION,
};

// ==================== Table Entries ====================

#[rstest]
#[case("I2V720p", "Horizontal", "HQ", (1280, 720))]
#[case("I2V720p", "Horizontal", "MQ", (832, 480))]
#[case("I2V720p", "Horizontal", "LQ", (704, 544))]
#[case("I2V720p", "Vertical", "HQ", (720, 1280))]
#[case("I2V720p", "Vertical", "MQ", (480, 832))]
#[case("I2V720p", "Vertical", "LQ", (544, 704))]
#[case("I2V720p", "Squarish", "HQ", (624, 624))]
#[case("I2V720p", "Squarish", "MQ", (624, 624))]
#[case("I2V720p", "Squarish", "LQ", (624, 624))]
#[case("I2V480p", "Horizontal", "HQ", (832, 480))]
#[case("I2V480p", "Horizontal", "MQ", (704, 544))]
#[case("I2V480p", "Horizontal", "LQ", (704, 544))]
#[case("I2V480p", "Vertical", "HQ", (480, 832))]
#[case("I2V480p", "Vertical", "MQ", (544, 704))]
#[case("I2V480p", "Vertical", "LQ", (544, 704))]
#[case("I2V480p", "Squarish", "HQ", (624, 624))]
#[case("I2V480p", "Squarish", "MQ", (624, 624))]
#[case("I2V480p", "Squarish", "LQ", (624, 624))]
#[case("T2V14B", "Horizontal", "HQ", (1280, 720))]
#[case("T2V14B", "Horizontal", "MQ", (1088, 832))]
#[case("T2V14B", "Horizontal", "LQ", (832, 480))]
#[case("T2V14B", "Vertical", "HQ", (720, 1280))]
#[case("T2V14B", "Vertical", "MQ", (832, 1088))]
#[case("T2V14B", "Vertical", "LQ", (480, 832))]
#[case("T2V14B", "Squarish", "HQ", (960, 960))]
#[case("T2V14B", "Squarish", "MQ", (624, 624))]
#[case("T2V14B", "Squarish", "LQ", (544, 704))]
#[case("T2V1.3B", "Horizontal", "HQ", (832, 480))]
#[case("T2V1.3B", "Horizontal", "MQ", (704, 544))]
#[case("T2V1.3B", "Horizontal", "LQ", (704, 544))]
#[case("T2V1.3B", "Vertical", "HQ", (480, 832))]
#[case("T2V1.3B", "Vertical", "MQ", (544, 704))]
#[case("T2V1.3B", "Vertical", "LQ", (544, 704))]
#[case("T2V1.3B", "Squarish", "HQ", (624, 624))]
#[case("T2V1.3B", "Squarish", "MQ", (624, 624))]
#[case("T2V1.3B", "Squarish", "LQ", (624, 624))]
fn test_every_table_entry(
    #[case] mode: &str,
    #[case] aspect_ratio: &str,
    #[case] quality: &str,
    #[case] expected: (u32, u32),
) {
    let (resolution, source) = resolve_with_source(mode, aspect_ratio, quality);
    assert_eq!(<(u32, u32)>::from(resolution), expected);
    assert_eq!(source, ResolutionSource::Table);

    let typed = lookup(
        mode.parse::<Mode>().unwrap(),
        aspect_ratio.parse::<AspectRatio>().unwrap(),
        quality.parse::<Quality>().unwrap(),
    )
    .unwrap();
    assert_eq!(typed, resolution);
}

// ==================== Fallback ====================

#[rstest]
#[case("bogus", "Horizontal", "HQ")]
#[case("I2V480p", "NotAnAspectRatio", "HQ")]
#[case("T2V14B", "Vertical", "UHQ")]
#[case("", "", "")]
#[case("i2v720p", "horizontal", "hq")]
fn test_out_of_enumeration_falls_back(
    #[case] mode: &str,
    #[case] aspect_ratio: &str,
    #[case] quality: &str,
) {
    let (resolution, source) = resolve_with_source(mode, aspect_ratio, quality);
    assert_eq!(resolution, Resolution::new(832, 480));
    assert_eq!(source, ResolutionSource::Fallback);
    assert_eq!(resolve(mode, aspect_ratio, quality), resolution);
}

#[test]
fn test_default_resolution_constant() {
    assert_eq!(DEFAULT_RESOLUTION, Resolution::new(832, 480));
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, logs.contents())
}

#[test]
fn test_fallback_emits_two_diagnostics() {
    let (resolution, logs) = with_captured_logs(|| resolve("I2V480p", "NotAnAspectRatio", "HQ"));
    assert_eq!(resolution, Resolution::new(832, 480));

    let combination = "mode=I2V480p, aspect_ratio=NotAnAspectRatio, quality=HQ";
    let warning = format!("Invalid combination of {combination}");
    assert!(logs.contains(&warning));
    assert!(logs.contains("Falling back to default resolution 832x480"));
    assert_eq!(logs.matches("WARN").count(), 2);
}

#[test]
fn test_table_hit_is_silent_at_warn() {
    let (resolution, logs) = with_captured_logs(|| resolve("I2V720p", "Horizontal", "HQ"));
    assert_eq!(resolution, Resolution::new(1280, 720));
    assert!(logs.is_empty());
}

// ==================== Typed Lookup ====================

#[test]
fn test_lookup_covers_all_enumerations() {
    let mut count = 0;
    for mode in Mode::ALL {
        for aspect_ratio in AspectRatio::ALL {
            for quality in Quality::ALL {
                lookup(mode, aspect_ratio, quality).unwrap();
                count += 1;
            }
        }
    }
    assert_eq!(count, 36);
}

#[test]
fn test_unknown_option_error() {
    let err = "Diagonal".parse::<AspectRatio>().unwrap_err();
    assert!(matches!(
        err,
        SelectorError::UnknownOption {
            field: "aspect_ratio",
            ..
        }
    ));
}

// ==================== Purity ====================

#[test]
fn test_repeated_calls_are_identical() {
    let first = resolve("T2V14B", "Squarish", "LQ");
    for _ in 0..100 {
        assert_eq!(resolve("T2V14B", "Squarish", "LQ"), first);
    }
    assert_eq!(first, Resolution::new(544, 704));
}

#[test]
fn test_concurrent_callers() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let mode = Mode::ALL[i % Mode::ALL.len()];
                let quality = Quality::ALL[i % Quality::ALL.len()];
                (0..50)
                    .map(|_| resolve(mode.as_str(), "Vertical", quality.as_str()))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let results = handle.join().unwrap();
        let mode = Mode::ALL[i % Mode::ALL.len()];
        let quality = Quality::ALL[i % Quality::ALL.len()];
        let expected = lookup(mode, AspectRatio::Vertical, quality).unwrap();
        assert!(results.iter().all(|r| *r == expected));
    }
}
