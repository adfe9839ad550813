//! Orchestration tests
//!
//! Drives [`Splitter`] with an in-memory backend that returns canned
//! durations and records extraction requests, so no media files or
//! external processes are involved.

use assert_matches::assert_matches;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use vidsplit::split::{
    FailurePolicy, SplitEvent, SplitOptions, Splitter, RUN_ID_MAX, RUN_ID_MIN,
};
use vidsplit_av::{Error, MediaBackend, Result};

// ===== Fake backend =====

#[derive(Debug, Clone, PartialEq)]
struct Extraction {
    input: PathBuf,
    start: f64,
    duration: f64,
    output: PathBuf,
}

enum ProbeAnswer {
    Seconds(f64),
    Empty(&'static str),
    Garbage(&'static str),
}

struct FakeBackend {
    probe: ProbeAnswer,
    fail_numbers: Vec<u32>,
    probes: RefCell<Vec<PathBuf>>,
    extractions: RefCell<Vec<Extraction>>,
}

impl FakeBackend {
    fn with_duration(seconds: f64) -> Self {
        Self::with_answer(ProbeAnswer::Seconds(seconds))
    }

    fn with_answer(probe: ProbeAnswer) -> Self {
        Self {
            probe,
            fail_numbers: Vec::new(),
            probes: RefCell::new(Vec::new()),
            extractions: RefCell::new(Vec::new()),
        }
    }

    fn failing(mut self, numbers: &[u32]) -> Self {
        self.fail_numbers = numbers.to_vec();
        self
    }

    fn extractions(&self) -> Vec<Extraction> {
        self.extractions.borrow().clone()
    }
}

impl MediaBackend for FakeBackend {
    fn probe_duration(&self, path: &Path) -> Result<f64> {
        self.probes.borrow_mut().push(path.to_path_buf());
        match self.probe {
            ProbeAnswer::Seconds(s) => Ok(s),
            ProbeAnswer::Empty(stderr) => Err(Error::invalid_media(path, stderr)),
            ProbeAnswer::Garbage(text) => {
                Err(Error::format("ffprobe", text, "invalid float literal"))
            }
        }
    }

    fn extract_segment(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        output: &Path,
    ) -> Result<()> {
        let number = self.extractions.borrow().len() as u32 + 1;
        self.extractions.borrow_mut().push(Extraction {
            input: input.to_path_buf(),
            start,
            duration,
            output: output.to_path_buf(),
        });
        if self.fail_numbers.contains(&number) {
            return Err(Error::tool_failed("ffmpeg", "exited with status 1: Conversion failed!"));
        }
        Ok(())
    }
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(2024)
}

fn input_in(dir: &Path) -> PathBuf {
    dir.join("lecture.mp4")
}

// ===== Planning through the splitter =====

#[test]
fn three_segments_of_ten_minute_input() {
    let dir = tempdir().unwrap();
    let input = input_in(dir.path());
    let backend = FakeBackend::with_duration(600.0);
    let splitter = Splitter::new(&backend, SplitOptions::new(3));

    let report = splitter.run_with_rng(&input, &mut rng(), |_| {}).unwrap();

    let calls = backend.extractions();
    assert_eq!(calls.len(), 3);
    let starts: Vec<f64> = calls.iter().map(|c| c.start).collect();
    assert_eq!(starts, vec![0.0, 200.0, 400.0]);
    assert!(calls.iter().all(|c| c.duration == 200.0));
    assert!(calls.iter().all(|c| c.input == input));

    for (i, call) in calls.iter().enumerate() {
        let expected = dir
            .path()
            .join(format!("lecture_{}_{}.mp4", report.run_id, i + 1));
        assert_eq!(call.output, expected);
    }

    assert!(report.is_success());
    assert_eq!(report.segment_count, 3);
    assert_eq!(report.segment_duration, 200.0);
    assert!((RUN_ID_MIN..=RUN_ID_MAX).contains(&report.run_id));
}

#[test]
fn single_segment_covers_full_duration() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with_duration(95.25);
    let splitter = Splitter::new(&backend, SplitOptions::new(1));

    splitter
        .run_with_rng(&input_in(dir.path()), &mut rng(), |_| {})
        .unwrap();

    let calls = backend.extractions();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].start, 0.0);
    assert_eq!(calls[0].duration, 95.25);
}

#[test]
fn outputs_unique_and_share_run_id() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with_duration(3600.0);
    let splitter = Splitter::new(&backend, SplitOptions::new(25));

    let report = splitter
        .run_with_rng(&input_in(dir.path()), &mut rng(), |_| {})
        .unwrap();

    let outputs: HashSet<PathBuf> = backend.extractions().into_iter().map(|c| c.output).collect();
    assert_eq!(outputs.len(), 25);
    let marker = format!("_{}_", report.run_id);
    assert!(outputs
        .iter()
        .all(|p| p.file_name().unwrap().to_string_lossy().contains(&marker)));
}

#[test]
fn progress_reported_before_each_extraction() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with_duration(30.0);
    let splitter = Splitter::new(&backend, SplitOptions::new(3));

    let mut log = Vec::new();
    splitter
        .run_with_rng(&input_in(dir.path()), &mut rng(), |event| match event {
            SplitEvent::Planned { plan, .. } => {
                log.push(format!("planned {}", plan.segment_count()))
            }
            SplitEvent::SegmentStarted { job, total } => {
                // Nothing has been extracted for this job yet
                assert_eq!(backend.extractions().len() as u32, job.index);
                log.push(format!("start {}/{}", job.number(), total));
            }
            SplitEvent::SegmentFailed { job, .. } => log.push(format!("failed {}", job.number())),
        })
        .unwrap();

    assert_eq!(log, vec!["planned 3", "start 1/3", "start 2/3", "start 3/3"]);
}

// ===== Validation and probe failures =====

#[test]
fn zero_segments_rejected_before_probing() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with_duration(600.0);
    let splitter = Splitter::new(&backend, SplitOptions::new(0));

    let err = splitter
        .run_with_rng(&input_in(dir.path()), &mut rng(), |_| {})
        .unwrap_err();

    assert_matches!(err, Error::InvalidInput(_));
    assert!(backend.probes.borrow().is_empty());
    assert!(backend.extractions().is_empty());
}

#[test]
fn empty_probe_output_aborts_before_extraction() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with_answer(ProbeAnswer::Empty("moov atom not found"));
    let splitter = Splitter::new(&backend, SplitOptions::new(2));

    let err = splitter
        .run_with_rng(&input_in(dir.path()), &mut rng(), |_| {})
        .unwrap_err();

    assert_matches!(
        err,
        Error::InvalidMedia { diagnostics, .. } if diagnostics == "moov atom not found"
    );
    assert!(backend.extractions().is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn non_numeric_probe_output_aborts_with_format_error() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with_answer(ProbeAnswer::Garbage("N/A"));
    let splitter = Splitter::new(&backend, SplitOptions::new(2));

    let err = splitter
        .run_with_rng(&input_in(dir.path()), &mut rng(), |_| {})
        .unwrap_err();

    assert_matches!(err, Error::Format { .. });
    assert!(backend.extractions().is_empty());
}

#[test]
fn naming_pattern_without_index_rejected_before_probing() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with_duration(10.0);
    let options = SplitOptions {
        naming: "{filestem}_{run_id}{ext}".to_string(),
        ..SplitOptions::new(2)
    };
    let splitter = Splitter::new(&backend, options);

    let err = splitter
        .run_with_rng(&input_in(dir.path()), &mut rng(), |_| {})
        .unwrap_err();
    assert!(err.is_validation());
    assert!(backend.probes.borrow().is_empty());
}

// ===== Extraction failures =====

#[test]
fn continue_policy_attempts_every_segment_and_reports_failures() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with_duration(40.0).failing(&[2]);
    let splitter = Splitter::new(&backend, SplitOptions::new(4));

    let mut failed = Vec::new();
    let report = splitter
        .run_with_rng(&input_in(dir.path()), &mut rng(), |event| {
            if let SplitEvent::SegmentFailed { job, .. } = event {
                failed.push(job.number());
            }
        })
        .unwrap();

    assert_eq!(backend.extractions().len(), 4);
    assert_eq!(failed, vec![2]);
    assert!(!report.is_success());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].number, 2);
    assert!(report.failures[0].message.contains("Conversion failed"));
    let ok: Vec<u32> = report.succeeded().map(|j| j.number()).collect();
    assert_eq!(ok, vec![1, 3, 4]);
}

#[test]
fn abort_policy_stops_at_first_failure() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with_duration(40.0).failing(&[2]);
    let options = SplitOptions {
        on_failure: FailurePolicy::Abort,
        ..SplitOptions::new(4)
    };
    let splitter = Splitter::new(&backend, options);

    let err = splitter
        .run_with_rng(&input_in(dir.path()), &mut rng(), |_| {})
        .unwrap_err();

    assert_matches!(err, Error::SegmentFailed { number: 2, .. });
    assert_eq!(backend.extractions().len(), 2);
}

// ===== Dry run and run ids =====

#[test]
fn dry_run_plans_without_extracting() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with_duration(90.0);
    let options = SplitOptions {
        dry_run: true,
        ..SplitOptions::new(3)
    };
    let splitter = Splitter::new(&backend, options);

    let report = splitter
        .run_with_rng(&input_in(dir.path()), &mut rng(), |_| {})
        .unwrap();

    assert!(backend.extractions().is_empty());
    assert!(report.dry_run);
    assert_eq!(report.segments.len(), 3);
    assert_eq!(report.segments[1].start_time, 30.0);
}

#[test]
fn run_id_avoids_existing_outputs() {
    let dir = tempdir().unwrap();
    let input = input_in(dir.path());

    // Find the id the seeded rng draws first and occupy its first name
    let backend = FakeBackend::with_duration(20.0);
    let dry = SplitOptions {
        dry_run: true,
        ..SplitOptions::new(2)
    };
    let first = Splitter::new(&backend, dry)
        .run_with_rng(&input, &mut rng(), |_| {})
        .unwrap()
        .run_id;
    std::fs::write(dir.path().join(format!("lecture_{first}_1.mp4")), b"old").unwrap();

    let report = Splitter::new(&backend, SplitOptions::new(2))
        .run_with_rng(&input, &mut rng(), |_| {})
        .unwrap();

    assert_ne!(report.run_id, first);
}

#[test]
fn report_serializes_to_json() {
    let dir = tempdir().unwrap();
    let backend = FakeBackend::with_duration(10.0);
    let splitter = Splitter::new(&backend, SplitOptions::new(2));

    let report = splitter
        .run_with_rng(&input_in(dir.path()), &mut rng(), |_| {})
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["segment_count"], 2);
    assert_eq!(json["segments"][1]["start_time"], 5.0);
    assert!(json["failures"].as_array().unwrap().is_empty());
}
