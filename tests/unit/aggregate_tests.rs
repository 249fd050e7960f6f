//! Unit tests for duration aggregation

#[cfg(test)]
mod tests {
    use crate::fixtures::ScriptedProbe;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use vidlen::{MeasureEvent, MeasureOptions, aggregate};

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("/media").join(n)).collect()
    }

    #[test]
    fn test_sums_successful_probes() {
        let probe = ScriptedProbe::new(&[("a.mp4", 60.0), ("b.mkv", 5.0), ("c.avi", 3600.0)]);
        let files = paths(&["a.mp4", "b.mkv", "c.avi"]);

        let summary = aggregate(&files, &probe, &MeasureOptions::default()).unwrap();

        assert!((summary.total_seconds - 3665.0).abs() < f64::EPSILON);
        assert_eq!(summary.formatted_time, "01:01:05");
        assert_eq!(summary.skipped_files, 0);
        assert_eq!(summary.total_files, 3);
        assert_eq!(probe.calls(), files);
    }

    #[test]
    fn test_failing_file_is_skipped_not_added() {
        let probe = ScriptedProbe::new(&[("a.mp4", 60.0), ("b.mkv", 5.0)]);

        let baseline = aggregate(&paths(&["a.mp4", "b.mkv"]), &probe, &MeasureOptions::default())
            .unwrap();
        let with_broken = aggregate(
            &paths(&["a.mp4", "broken.wmv", "b.mkv"]),
            &probe,
            &MeasureOptions::default(),
        )
        .unwrap();

        assert!((with_broken.total_seconds - baseline.total_seconds).abs() < f64::EPSILON);
        assert_eq!(with_broken.skipped_files, baseline.skipped_files + 1);
        assert_eq!(with_broken.total_files, 3);
        assert_eq!(with_broken.skipped.len(), 1);
        assert!(with_broken.skipped[0].path.ends_with("broken.wmv"));
        assert_eq!(with_broken.skipped[0].reason, "no duration metadata");
    }

    #[test]
    fn test_negative_duration_counts_as_skipped() {
        let source = ScriptedProbe::new(&[("a.mp4", 60.0), ("odd.mp4", -5.0)]);

        let baseline = aggregate(&paths(&["a.mp4"]), &source, &MeasureOptions::default()).unwrap();
        let summary = aggregate(&paths(&["a.mp4", "odd.mp4"]), &source, &MeasureOptions::default())
            .unwrap();

        assert!((summary.total_seconds - baseline.total_seconds).abs() < f64::EPSILON);
        assert_eq!(summary.formatted_time, "00:01:00");
        assert_eq!(summary.skipped_files, baseline.skipped_files + 1);
        assert_eq!(summary.total_files, 2);
        assert!(summary.skipped[0].path.ends_with("odd.mp4"));
        assert_eq!(summary.skipped[0].reason, "invalid duration value '-5'");
    }

    #[test]
    fn test_nan_duration_counts_as_skipped() {
        let source = ScriptedProbe::new(&[("a.mp4", 60.0), ("odd.mkv", f64::NAN)]);

        let baseline = aggregate(&paths(&["a.mp4"]), &source, &MeasureOptions::default()).unwrap();
        let summary = aggregate(&paths(&["odd.mkv", "a.mp4"]), &source, &MeasureOptions::default())
            .unwrap();

        assert!(summary.total_seconds.is_finite());
        assert!((summary.total_seconds - baseline.total_seconds).abs() < f64::EPSILON);
        assert_eq!(summary.formatted_time, "00:01:00");
        assert_eq!(summary.skipped_files, baseline.skipped_files + 1);
        assert_eq!(summary.skipped[0].reason, "invalid duration value 'NaN'");
    }

    #[test]
    fn test_infinite_duration_counts_as_skipped_in_parallel() {
        let source = ScriptedProbe::new(&[("a.mp4", 30.0), ("b.mp4", f64::INFINITY)]);
        let opts = MeasureOptions {
            jobs: 2,
            ..MeasureOptions::default()
        };

        let summary = aggregate(&paths(&["a.mp4", "b.mp4"]), &source, &opts).unwrap();

        assert!((summary.total_seconds - 30.0).abs() < f64::EPSILON);
        assert_eq!(summary.skipped_files, 1);
        assert_eq!(summary.skipped[0].reason, "invalid duration value 'inf'");
    }

    #[test]
    fn test_all_failures_still_produce_summary() {
        let probe = ScriptedProbe::default();
        let files = paths(&["x.mp4", "y.mp4"]);

        let summary = aggregate(&files, &probe, &MeasureOptions::default()).unwrap();

        assert_eq!(summary.total_seconds, 0.0);
        assert_eq!(summary.formatted_time, "00:00:00");
        assert_eq!(summary.skipped_files, 2);
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.measured_files(), 0);
        assert_eq!(probe.calls().len(), 2, "every file is probed");
    }

    #[test]
    fn test_empty_file_list() {
        let probe = ScriptedProbe::default();
        let summary = aggregate(&[], &probe, &MeasureOptions::default()).unwrap();

        assert_eq!(summary.total_seconds, 0.0);
        assert_eq!(summary.formatted_time, "00:00:00");
        assert_eq!(summary.skipped_files, 0);
        assert_eq!(summary.total_files, 0);
        assert!(probe.calls().is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let table: Vec<(String, f64)> = (0..40u32).map(|i| (format!("f{i}.mp4"), f64::from(i) * 1.5)).collect();
        let refs: Vec<(&str, f64)> = table.iter().map(|(n, s)| (n.as_str(), *s)).collect();
        let probe = ScriptedProbe::new(&refs);

        let mut names: Vec<String> = table.iter().map(|(n, _)| n.clone()).collect();
        names.push("missing1.mp4".to_string());
        names.insert(7, "missing2.mp4".to_string());
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let files = paths(&name_refs);

        let sequential = aggregate(&files, &probe, &MeasureOptions::default()).unwrap();
        let parallel = aggregate(
            &files,
            &probe,
            &MeasureOptions {
                jobs: 4,
                ..MeasureOptions::default()
            },
        )
        .unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(parallel.skipped_files, 2);
        assert_eq!(parallel.total_files, 42);
        assert!(parallel.skipped[0].path.ends_with("missing2.mp4"));
        assert!(parallel.skipped[1].path.ends_with("missing1.mp4"));
    }

    #[test]
    fn test_events_report_progress_and_failures() {
        let probe = ScriptedProbe::new(&[("a.mp4", 1.0)]);
        let files = paths(&["a.mp4", "bad.mp4"]);
        let log = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&log);
        let opts = MeasureOptions::default().on_event(move |event| {
            let line = match event {
                MeasureEvent::Reading { index, total, .. } => format!("read {index}/{total}"),
                MeasureEvent::Skipped { path, error } => {
                    format!("skip {} ({error})", path.file_name().unwrap().to_string_lossy())
                }
                other => format!("{other:?}"),
            };
            sink.lock().unwrap().push(line);
        });

        aggregate(&files, &probe, &opts).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "read 1/2".to_string(),
                "read 2/2".to_string(),
                "skip bad.mp4 (no duration metadata)".to_string(),
            ]
        );
    }
}
