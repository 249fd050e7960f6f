//! Integration test for fatal error handling

use crate::fixtures::ScriptedProbe;
use tempfile::NamedTempFile;
use vidlen::{Error, MeasureOptions, measure_directory};

#[test]
fn test_invalid_path_error() {
    let probe = ScriptedProbe::default();
    let result = measure_directory(
        "/definitely/does/not/exist/xyz123",
        &MeasureOptions::default(),
        &probe,
    );

    match result {
        Err(Error::InvalidTarget(msg)) => assert!(msg.contains("does not exist")),
        other => panic!("expected invalid target, got {other:?}"),
    }
    assert!(probe.calls().is_empty());
}

#[test]
fn test_file_instead_of_directory() {
    let temp_file = NamedTempFile::new().unwrap();
    let probe = ScriptedProbe::default();
    let scanned = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));

    let flag = std::sync::Arc::clone(&scanned);
    let opts = MeasureOptions::default().on_event(move |_| {
        flag.store(true, std::sync::atomic::Ordering::SeqCst);
    });

    let result = measure_directory(temp_file.path(), &opts, &probe);

    let err = result.unwrap_err();
    assert!(matches!(err, Error::InvalidTarget(_)));
    assert!(err.to_string().contains("not a directory"));
    assert!(probe.calls().is_empty(), "no file may be probed");
    assert!(
        !scanned.load(std::sync::atomic::Ordering::SeqCst),
        "traversal must not start"
    );
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_aborts() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempfile::TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("ok.mp4"), b"").unwrap();
    let locked = root.join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("hidden.mp4"), b"").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can list the directory regardless of its mode
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let probe = ScriptedProbe::new(&[("ok.mp4", 10.0)]);
    let result = measure_directory(root, &MeasureOptions::default(), &probe);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    match result {
        Err(Error::Filesystem { path, .. }) => assert!(path.ends_with("locked")),
        other => panic!("expected filesystem error, got {other:?}"),
    }
    assert!(probe.calls().is_empty(), "no partial run after a traversal failure");
}

#[test]
fn test_error_display() {
    let err = Error::InvalidTarget("Path is not a directory: /tmp/x".to_string());
    assert_eq!(err.to_string(), "Invalid target: Path is not a directory: /tmp/x");

    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err = Error::Filesystem {
        path: "/srv/media".into(),
        source: io,
    };
    assert_eq!(err.to_string(), "Filesystem error at /srv/media: denied");
}
