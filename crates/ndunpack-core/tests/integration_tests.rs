//! Integration tests for ndunpack-core.
//!
//! These exercise the unpack lifecycle against a real filesystem, with
//! counting strategies standing in for extraction where the call pattern is
//! what matters.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use ndunpack_core::ArtifactDownload;
use ndunpack_core::COMPLETION_MARKER;
use ndunpack_core::Coordinates;
use ndunpack_core::ErrorKind;
use ndunpack_core::ExtractConfig;
use ndunpack_core::ExtractResult;
use ndunpack_core::ExtractionError;
use ndunpack_core::ExtractionStrategy;
use ndunpack_core::ResolvedArtifact;
use ndunpack_core::StrategyRegistry;
use ndunpack_core::UnpackError;
use ndunpack_core::UnpackOutcome;
use ndunpack_core::Unpacker;
use ndunpack_core::is_unpacked;
use ndunpack_core::marker_path;
use ndunpack_core::observer::FnObserver;
use std::cell::Cell;
use std::fs;
use std::io;
use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use tempfile::TempDir;

const MOCK_TYPE: &str = "mock-type";

/// Records every call and optionally fails it.
#[derive(Default)]
struct CountingStrategy {
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
    fail: bool,
}

impl CountingStrategy {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

struct Shared(Arc<CountingStrategy>);

impl ExtractionStrategy for Shared {
    fn extract(&self, source: &Path, destination: &Path) -> ExtractResult<()> {
        self.0
            .calls
            .lock()
            .unwrap()
            .push((source.to_path_buf(), destination.to_path_buf()));
        if self.0.fail {
            return Err(ExtractionError::Io(io::Error::other("disk full")));
        }
        fs::write(destination.join("payload.txt"), "extracted")?;
        Ok(())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn setup(strategy: CountingStrategy) -> (TempDir, Arc<CountingStrategy>, StrategyRegistry) {
    let temp = TempDir::new().unwrap();
    let strategy = Arc::new(strategy);
    let mut registry = StrategyRegistry::new();
    registry.register(MOCK_TYPE, Shared(Arc::clone(&strategy)));
    (temp, strategy, registry)
}

fn marker_count(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter(|entry| entry.as_ref().unwrap().file_name() == COMPLETION_MARKER)
        .count()
}

#[test]
fn test_marker_present_never_calls_strategy() {
    let (temp, strategy, registry) = setup(CountingStrategy::default());
    let dir = temp.path().join("natives");
    fs::create_dir(&dir).unwrap();
    fs::write(marker_path(&dir), b"").unwrap();

    let outcome = Unpacker::new(&registry)
        .unpack(&dir, temp.path().join("missing-source"), MOCK_TYPE)
        .unwrap();

    assert_eq!(outcome, UnpackOutcome::AlreadyUnpacked);
    assert_eq!(strategy.count(), 0);
}

#[test]
fn test_unknown_type_leaves_directory_absent() {
    let (temp, strategy, registry) = setup(CountingStrategy::default());
    let dir = temp.path().join("a/b/c");

    let err = Unpacker::new(&registry)
        .unpack(&dir, "artifact.bin", "nope")
        .unwrap_err();

    assert!(matches!(err, UnpackError::UnknownArtifactType { ref type_key } if type_key == "nope"));
    assert!(err.is_configuration_error());
    assert!(!temp.path().join("a").exists());
    assert_eq!(strategy.count(), 0);
}

#[test]
fn test_first_call_postconditions() {
    let (temp, strategy, registry) = setup(CountingStrategy::default());
    let dir = temp.path().join("fresh/natives");
    let source = temp.path().join("libfoo.mock");

    let outcome = Unpacker::new(&registry)
        .unpack(&dir, &source, MOCK_TYPE)
        .unwrap();

    assert!(matches!(outcome, UnpackOutcome::Unpacked { .. }));
    assert!(dir.is_dir());
    assert_eq!(marker_count(&dir), 1);
    assert_eq!(fs::metadata(marker_path(&dir)).unwrap().len(), 0);
    let calls = strategy.calls.lock().unwrap();
    assert_eq!(calls.as_slice(), &[(source, dir.clone())]);
}

#[test]
fn test_strategy_failure_leaves_no_marker() {
    let (temp, strategy, registry) = setup(CountingStrategy::failing());
    let dir = temp.path().join("natives");
    let source = temp.path().join("libfoo.mock");

    let err = Unpacker::new(&registry)
        .unpack(&dir, &source, MOCK_TYPE)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnpackFailed);
    assert!(dir.is_dir());
    assert!(!is_unpacked(&dir));
    assert_eq!(strategy.count(), 1);

    let message = err.to_string();
    assert!(message.contains("libfoo.mock"), "{message}");
    assert!(message.contains("disk full"), "{message}");
}

#[test]
fn test_failed_attempt_is_retried() {
    let temp = TempDir::new().unwrap();
    let failing = Arc::new(CountingStrategy::failing());
    let working = Arc::new(CountingStrategy::default());
    let dir = temp.path().join("natives");

    let mut registry = StrategyRegistry::new();
    registry.register(MOCK_TYPE, Shared(Arc::clone(&failing)));
    assert!(Unpacker::new(&registry).unpack(&dir, "a", MOCK_TYPE).is_err());

    registry.register(MOCK_TYPE, Shared(Arc::clone(&working)));
    Unpacker::new(&registry).unpack(&dir, "a", MOCK_TYPE).unwrap();

    assert_eq!(failing.count(), 1);
    assert_eq!(working.count(), 1);
    assert!(is_unpacked(&dir));
}

#[test]
fn test_two_calls_one_invocation() {
    let (temp, strategy, registry) = setup(CountingStrategy::default());
    let dir = temp.path().join("natives");
    let unpacker = Unpacker::new(&registry);

    let first = unpacker.unpack(&dir, "a.mock", MOCK_TYPE).unwrap();
    let second = unpacker.unpack(&dir, "a.mock", MOCK_TYPE).unwrap();

    assert!(!first.was_skipped());
    assert!(second.was_skipped());
    assert_eq!(strategy.count(), 1);
}

#[test]
fn test_scenario_target_is_regular_file() {
    let (temp, strategy, registry) = setup(CountingStrategy::default());
    let occupied = temp.path().join("natives");
    fs::write(&occupied, "not a directory").unwrap();

    let err = Unpacker::new(&registry)
        .unpack(&occupied, "a.mock", MOCK_TYPE)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidTarget);
    assert_eq!(err.path(), Some(occupied.as_path()));
    assert_eq!(strategy.count(), 0);
}

#[test]
fn test_scenario_directory_cannot_be_created() {
    let (temp, strategy, registry) = setup(CountingStrategy::default());
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "file").unwrap();
    let dir = blocker.join("natives");

    let err = Unpacker::new(&registry)
        .unpack(&dir, "a.mock", MOCK_TYPE)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DirectoryCreationFailed);
    assert_eq!(err.path(), Some(dir.as_path()));
    assert_eq!(strategy.count(), 0);
}

#[test]
#[cfg(unix)]
fn test_scenario_read_only_parent() {
    use std::os::unix::fs::PermissionsExt;

    let (temp, strategy, registry) = setup(CountingStrategy::default());
    let parent = temp.path().join("locked");
    fs::create_dir(&parent).unwrap();
    fs::set_permissions(&parent, fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users ignore the permission bits; nothing to test then.
    let check = parent.join("check");
    if fs::create_dir(&check).is_ok() {
        fs::remove_dir(&check).unwrap();
        fs::set_permissions(&parent, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let dir = parent.join("natives");
    let result = Unpacker::new(&registry).unpack(&dir, "a.mock", MOCK_TYPE);
    fs::set_permissions(&parent, fs::Permissions::from_mode(0o755)).unwrap();

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DirectoryCreationFailed);
    assert!(err.to_string().contains("could not create directory"));
    assert_eq!(strategy.count(), 0);
}

/// Extracts, then leaves the destination read-only.
#[cfg(unix)]
struct LockingStrategy(Arc<Mutex<usize>>);

#[cfg(unix)]
impl ExtractionStrategy for LockingStrategy {
    fn extract(&self, _source: &Path, destination: &Path) -> ExtractResult<()> {
        use std::os::unix::fs::PermissionsExt;

        *self.0.lock().unwrap() += 1;
        fs::write(destination.join("payload.txt"), "extracted")?;
        fs::set_permissions(destination, fs::Permissions::from_mode(0o555))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "locking"
    }
}

#[test]
#[cfg(unix)]
fn test_marker_write_failure_is_unpack_failed() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let scratch = temp.path().join("scratch");
    fs::create_dir(&scratch).unwrap();
    fs::set_permissions(&scratch, fs::Permissions::from_mode(0o555)).unwrap();
    let writable = fs::write(scratch.join("check"), b"").is_ok();
    fs::set_permissions(&scratch, fs::Permissions::from_mode(0o755)).unwrap();
    // Privileged users ignore the permission bits; nothing to test then.
    if writable {
        return;
    }

    let calls = Arc::new(Mutex::new(0));
    let mut registry = StrategyRegistry::new();
    registry.register(MOCK_TYPE, LockingStrategy(Arc::clone(&calls)));

    let dir = temp.path().join("natives");
    let result = Unpacker::new(&registry).unpack(&dir, "a.mock", MOCK_TYPE);
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnpackFailed);
    assert!(err.to_string().contains(COMPLETION_MARKER));
    assert_eq!(*calls.lock().unwrap(), 1);
    assert!(!is_unpacked(&dir));

    // Without a marker the next call extracts again.
    let (_other, retry, retry_registry) = setup(CountingStrategy::default());
    let outcome = Unpacker::new(&retry_registry)
        .unpack(&dir, "a.mock", MOCK_TYPE)
        .unwrap();
    assert!(matches!(outcome, UnpackOutcome::Unpacked { .. }));
    assert_eq!(retry.count(), 1);
    assert!(is_unpacked(&dir));
}

#[test]
fn test_scenario_fresh_directory() {
    let (temp, strategy, registry) = setup(CountingStrategy::default());
    let dir = temp.path().join("natives");
    assert!(!dir.exists());

    let outcome = Unpacker::new(&registry)
        .unpack(&dir, "a.mock", MOCK_TYPE)
        .unwrap();

    assert!(matches!(outcome, UnpackOutcome::Unpacked { .. }));
    assert!(is_unpacked(&dir));
    assert_eq!(fs::read_to_string(dir.join("payload.txt")).unwrap(), "extracted");
    assert_eq!(strategy.count(), 1);
}

#[test]
fn test_scenario_already_unpacked_fires_hook() {
    let (temp, strategy, registry) = setup(CountingStrategy::default());
    fs::write(marker_path(temp.path()), b"").unwrap();

    let skipped = Cell::new(0);
    let started = Cell::new(0);
    let observer = FnObserver::new(
        |_dir| skipped.set(skipped.get() + 1),
        |_artifact, _dir| started.set(started.get() + 1),
    );

    let outcome = Unpacker::new(&registry)
        .with_observer(&observer)
        .unpack(temp.path(), "a.mock", MOCK_TYPE)
        .unwrap();

    assert_eq!(outcome, UnpackOutcome::AlreadyUnpacked);
    assert_eq!(skipped.get(), 1);
    assert_eq!(started.get(), 0);
    assert_eq!(strategy.count(), 0);
}

#[test]
fn test_marker_removal_forces_reextraction() {
    let (temp, strategy, registry) = setup(CountingStrategy::default());
    let unpacker = Unpacker::new(&registry);

    unpacker.unpack(temp.path(), "a.mock", MOCK_TYPE).unwrap();
    fs::remove_file(marker_path(temp.path())).unwrap();
    unpacker.unpack(temp.path(), "a.mock", MOCK_TYPE).unwrap();

    assert_eq!(strategy.count(), 2);
}

#[test]
fn test_download_without_artifact_reference() {
    let (temp, strategy, registry) = setup(CountingStrategy::default());
    let download = ArtifactDownload::new(None, temp.path().join("pending.zip"));

    let err = Unpacker::new(&registry)
        .unpack_download(temp.path().join("out"), &download)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArtifactReference);
    assert!(err.to_string().contains("has no valid artifact reference"));
    assert_eq!(strategy.count(), 0);
}

#[test]
fn test_resolved_artifact_call_shape() {
    let (temp, strategy, registry) = setup(CountingStrategy::default());
    let artifact = ResolvedArtifact::new(temp.path().join("libfoo.mock"), MOCK_TYPE)
        .with_coordinates(Coordinates::new("org.example", "libfoo", "1.0", "mock"));

    Unpacker::new(&registry)
        .unpack_artifact(temp.path().join("out"), &artifact)
        .unwrap();

    assert_eq!(strategy.count(), 1);
}

fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[test]
fn test_builtin_zip_end_to_end() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("libfoo-1.0-natives-linux.jar");
    fs::write(
        &archive,
        zip_bytes(&[("linux/x86_64/libfoo.so", &b"ELF"[..]), ("META-INF/MANIFEST.MF", &b""[..])]),
    )
    .unwrap();
    let dir = temp.path().join("natives");
    let registry = StrategyRegistry::builtin(&ExtractConfig::default());

    Unpacker::new(&registry).unpack(&dir, &archive, "jar").unwrap();

    assert_eq!(fs::read(dir.join("linux/x86_64/libfoo.so")).unwrap(), b"ELF");
    assert!(is_unpacked(&dir));
}

#[test]
fn test_builtin_tar_gz_end_to_end() {
    let temp = TempDir::new().unwrap();
    let mut builder = tar::Builder::new(Vec::new());
    let mut header = tar::Header::new_gnu();
    header.set_size(5);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, "include/foo.h", &b"int x"[..])
        .unwrap();
    let tar = builder.into_inner().unwrap();
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&tar).unwrap();
    let archive = temp.path().join("foo.tgz");
    fs::write(&archive, encoder.finish().unwrap()).unwrap();

    let dir = temp.path().join("headers");
    let registry = StrategyRegistry::builtin(&ExtractConfig::default());
    Unpacker::new(&registry).unpack(&dir, &archive, "tgz").unwrap();

    assert_eq!(fs::read_to_string(dir.join("include/foo.h")).unwrap(), "int x");
}

#[test]
fn test_corrupt_archive_is_unpack_failed() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("broken.zip");
    fs::write(&archive, b"PK not really").unwrap();
    let dir = temp.path().join("natives");
    let registry = StrategyRegistry::builtin(&ExtractConfig::default());

    let err = Unpacker::new(&registry)
        .unpack(&dir, &archive, "zip")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnpackFailed);
    assert!(err.extraction_error().is_some());
    assert!(!is_unpacked(&dir));
}

#[test]
fn test_archive_cannot_forge_marker() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("forge.zip");
    fs::write(&archive, zip_bytes(&[(COMPLETION_MARKER, &b""[..])])).unwrap();
    let dir = temp.path().join("natives");
    let registry = StrategyRegistry::builtin(&ExtractConfig::default());

    let err = Unpacker::new(&registry)
        .unpack(&dir, &archive, "zip")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnpackFailed);
    assert!(!is_unpacked(&dir));
}
