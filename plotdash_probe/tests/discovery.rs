//! Filesystem-facing parts of job discovery.

use std::fs;

use plotdash_probe::discovery::tmp_usage;
use plotdash_probe::plotlog::read_log;
use plotdash_probe::{JobSource, Phase, ProbeError, ProcessProbe};

const PLOT_ID: &str = "3eb8a37981de1cc76187a36ed947ab4307943cf92967a7e166841186c7899e24";

#[test]
fn tmp_usage_counts_only_files_of_the_plot() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(format!("plot-k32-{PLOT_ID}.plot.table1.tmp")), vec![0u8; 1000]).unwrap();
    fs::write(dir.path().join(format!("plot-k32-{PLOT_ID}.plot.sort.tmp")), vec![0u8; 234]).unwrap();
    fs::write(dir.path().join("plot-k32-other.plot.table1.tmp"), vec![0u8; 5000]).unwrap();

    assert_eq!(tmp_usage(dir.path(), PLOT_ID), 1234);
    assert_eq!(tmp_usage(dir.path(), ""), 0);
    assert_eq!(tmp_usage(&dir.path().join("missing"), PLOT_ID), 0);
}

#[test]
fn reads_progress_from_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("job.log");
    fs::write(
        &log,
        format!(
            "ID: {PLOT_ID}\nPlot size is: 32\nStarting phase 1/4: Forward Propagation\nComputing table 1\nComputing table 2\n"
        ),
    )
    .unwrap();

    let info = read_log(&log).unwrap();
    assert_eq!(info.plot_id.as_deref(), Some(PLOT_ID));
    assert_eq!(info.phase, Phase::new(1, 2));
}

#[test]
fn unreadable_log_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_log(&dir.path().join("gone.log")).unwrap_err();
    assert!(matches!(err, ProbeError::LogRead { .. }), "{err}");
}

#[test]
fn missing_log_dir_fails_discovery() {
    let dir = tempfile::tempdir().unwrap();
    let mut probe = ProcessProbe::new();
    let err = probe
        .discover(&dir.path().join("no-such-dir"), &[])
        .unwrap_err();
    assert!(matches!(err, ProbeError::LogDir { .. }), "{err}");
}

#[test]
fn fresh_log_dir_has_no_jobs() {
    let dir = tempfile::tempdir().unwrap();
    let mut probe = ProcessProbe::new();
    let found = probe.discover(dir.path(), &[]).unwrap();
    assert!(found.jobs.is_empty());
}

#[cfg(target_os = "linux")]
mod live {
    use std::process::{Child, Command, Stdio};
    use std::thread::sleep;
    use std::time::{Duration, Instant};

    use super::*;

    // Stands in for `chia plots create`: logs into the given file and keeps a
    // few worker threads alive, like the real plotter.
    const FAKE_PLOTTER: &str = r#"
import os, threading, time
log = open(os.environ["PLOTDASH_TEST_LOG"], "a")
stop = threading.Event()
for _ in range(4):
    threading.Thread(target=stop.wait, daemon=True).start()
log.write("ID: 3eb8a37981de1cc76187a36ed947ab4307943cf92967a7e166841186c7899e24\n")
log.write("Starting phase 1/4: Forward Propagation\n")
log.flush()
time.sleep(60)
"#;

    struct KillOnDrop(Child);

    impl Drop for KillOnDrop {
        fn drop(&mut self) {
            let _ = self.0.kill();
            let _ = self.0.wait();
        }
    }

    #[test]
    fn multithreaded_plotter_is_one_job() {
        let root = tempfile::tempdir().unwrap();
        // fd targets are resolved paths
        let base = root.path().canonicalize().unwrap();
        let logs = base.join("logs");
        let tmp = base.join("tmp");
        fs::create_dir_all(&logs).unwrap();
        fs::create_dir_all(&tmp).unwrap();
        let script = base.join("chia");
        fs::write(&script, FAKE_PLOTTER).unwrap();
        let log = logs.join("job.log");

        let child = match Command::new("python3")
            .arg(&script)
            .args(["plots", "create", "-k", "32", "-t"])
            .arg(&tmp)
            .args(["-d", "/tmp"])
            .env("PLOTDASH_TEST_LOG", &log)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => KillOnDrop(child),
            Err(e) => {
                eprintln!("python3 unavailable, skipping: {e}");
                return;
            }
        };

        // the phase line is written once all worker threads are running
        let deadline = Instant::now() + Duration::from_secs(10);
        while !fs::read_to_string(&log).is_ok_and(|t| t.contains("Starting phase")) {
            assert!(Instant::now() < deadline, "fake plotter never started");
            sleep(Duration::from_millis(50));
        }

        let mut probe = ProcessProbe::new();
        let found = probe.discover(&logs, &[]).unwrap();
        let pids: Vec<u32> = found.jobs.iter().map(|j| j.pid).collect();
        assert_eq!(pids, vec![child.0.id()]);
        assert_eq!(found.jobs[0].phase, Phase::new(1, 0));
        assert_eq!(found.jobs[0].log_file.as_deref(), Some(log.as_path()));

        // a second pass through the cache must not pick the threads up either
        let again = probe.discover(&logs, &found.jobs).unwrap();
        assert_eq!(again.jobs.len(), 1);
    }
}
