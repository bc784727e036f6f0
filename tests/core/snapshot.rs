use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};
use svc::core::dirfd::DirHandle;
use svc::core::service::ServiceStatus;
use svc::core::snapshot::build_snapshot;
use tempfile::tempdir;

fn write_service(root: &Path, name: &str, stat: &[u8], pid: &[u8], down: bool) {
    let supervise = root.join(name).join("supervise");
    fs::create_dir_all(&supervise).expect("mkdir supervise");
    fs::write(supervise.join("stat"), stat).expect("write stat");
    fs::write(supervise.join("pid"), pid).expect("write pid");
    if down {
        fs::write(root.join(name).join("down"), b"").expect("write down");
    }
}

fn status_of(stat: &[u8]) -> ServiceStatus {
    let tmp = tempdir().expect("tempdir");
    write_service(tmp.path(), "svc", stat, b"1", false);
    let root = DirHandle::open(tmp.path()).expect("open root");
    build_snapshot(&root, "svc").expect("snapshot").status()
}

#[test]
fn status_classification_by_prefix() {
    assert_eq!(status_of(b"run"), ServiceStatus::Running);
    assert_eq!(status_of(b"run\n"), ServiceStatus::Running);
    assert_eq!(status_of(b"down"), ServiceStatus::Stopped);
    assert_eq!(status_of(b"down\0\0"), ServiceStatus::Stopped);
    assert_eq!(status_of(b"finish"), ServiceStatus::Finishing);
    assert_eq!(status_of(b"finished"), ServiceStatus::Finishing);
    assert_eq!(status_of(b""), ServiceStatus::Unknown);
    assert_eq!(status_of(b"paused"), ServiceStatus::Unknown);
    assert_eq!(status_of(b"ru"), ServiceStatus::Unknown);
}

#[test]
fn pid_values() {
    let tmp = tempdir().expect("tempdir");
    write_service(tmp.path(), "numeric", b"run", b"12345", false);
    write_service(tmp.path(), "empty", b"run", b"", false);
    write_service(tmp.path(), "garbage", b"run", b"n/a", false);
    write_service(tmp.path(), "zero", b"down", b"0", false);
    let root = DirHandle::open(tmp.path()).expect("open root");

    assert_eq!(build_snapshot(&root, "numeric").expect("snapshot").pid(), 12345);
    assert_eq!(build_snapshot(&root, "empty").expect("snapshot").pid(), 0);
    assert_eq!(build_snapshot(&root, "garbage").expect("snapshot").pid(), 0);
    assert_eq!(build_snapshot(&root, "zero").expect("snapshot").pid(), 0);
}

#[test]
fn down_flag_is_independent_of_status() {
    let tmp = tempdir().expect("tempdir");
    write_service(tmp.path(), "running-down", b"run", b"10", true);
    write_service(tmp.path(), "stopped-up", b"down", b"", false);
    let root = DirHandle::open(tmp.path()).expect("open root");

    let a = build_snapshot(&root, "running-down").expect("snapshot");
    assert_eq!(a.status(), ServiceStatus::Running);
    assert!(a.is_down());

    let b = build_snapshot(&root, "stopped-up").expect("snapshot");
    assert_eq!(b.status(), ServiceStatus::Stopped);
    assert!(!b.is_down());
}

#[test]
fn down_inside_supervise_does_not_count() {
    let tmp = tempdir().expect("tempdir");
    write_service(tmp.path(), "svc", b"run", b"1", false);
    fs::write(tmp.path().join("svc/supervise/down"), b"").expect("write");
    let root = DirHandle::open(tmp.path()).expect("open root");
    assert!(!build_snapshot(&root, "svc").expect("snapshot").is_down());
}

#[test]
fn elapsed_tracks_stat_mtime() {
    let tmp = tempdir().expect("tempdir");
    write_service(tmp.path(), "svc", b"run", b"1", false);
    let past = SystemTime::now() - Duration::from_secs(3725);
    File::options()
        .write(true)
        .open(tmp.path().join("svc/supervise/stat"))
        .and_then(|f| f.set_modified(past))
        .expect("set mtime");

    let root = DirHandle::open(tmp.path()).expect("open root");
    let snap = build_snapshot(&root, "svc").expect("snapshot");
    let secs = snap.elapsed().as_secs();
    assert!((3725..3735).contains(&secs), "elapsed {secs}");
    assert!(snap.elapsed().to_string().starts_with("01:02:"));
}

#[test]
fn missing_service_directory_fails_with_name() {
    let tmp = tempdir().expect("tempdir");
    let root = DirHandle::open(tmp.path()).expect("open root");
    let err = build_snapshot(&root, "ghost").unwrap_err();
    assert!(err.chain().starts_with("failed to open ghost: open '"));
}

#[test]
fn missing_stat_file_fails_the_snapshot() {
    let tmp = tempdir().expect("tempdir");
    fs::create_dir_all(tmp.path().join("svc/supervise")).expect("mkdir");
    fs::write(tmp.path().join("svc/supervise/pid"), b"1").expect("write");
    let root = DirHandle::open(tmp.path()).expect("open root");

    let err = build_snapshot(&root, "svc").unwrap_err();
    assert!(err.chain().starts_with("failed to get status of svc"));
    assert_eq!(
        err.io_source().map(|e| e.kind()),
        Some(std::io::ErrorKind::NotFound)
    );
}

#[test]
fn symlinked_service_directories_are_followed() {
    let tmp = tempdir().expect("tempdir");
    let defs = tmp.path().join("sv");
    let running = tmp.path().join("service");
    fs::create_dir_all(&running).expect("mkdir");
    write_service(&defs, "sshd", b"run", b"77", false);
    std::os::unix::fs::symlink(defs.join("sshd"), running.join("sshd")).expect("symlink");

    let root = DirHandle::open(&running).expect("open root");
    let snap = build_snapshot(&root, "sshd").expect("snapshot");
    assert_eq!(snap.name(), "sshd");
    assert_eq!(snap.pid(), 77);
}
