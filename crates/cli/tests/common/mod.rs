//! Helpers for running the dirwatch binary in integration tests

use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// Command builder for the `dirwatch` binary
pub struct DirwatchCommand {
    working_dir: PathBuf,
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl DirwatchCommand {
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// Run to completion and capture output
    pub fn execute(&self) -> CommandResult {
        let start = Instant::now();
        let output = Command::new(env!("CARGO_BIN_EXE_dirwatch"))
            .args(&self.args)
            .current_dir(&self.working_dir)
            .env_remove("DIRWATCH_WATCH_DIRECTORY")
            .env_remove("DIRWATCH_POLL_INTERVAL_MS")
            .envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .output()
            .expect("failed to run dirwatch binary");

        CommandResult {
            output,
            duration: start.elapsed(),
        }
    }
}

pub struct CommandResult {
    pub output: Output,
    pub duration: Duration,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.output.status.success()
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }
}

/// Write a JSON config into `dir` and return its path
pub fn write_config(dir: &Path, value: serde_json::Value) -> PathBuf {
    let path = dir.join("config.json");
    std::fs::write(&path, serde_json::to_vec_pretty(&value).unwrap()).unwrap();
    path
}

/// A `dirwatch watch` process running in the background
///
/// Stdout is read line by line on a helper thread so tests can wait for
/// specific output while the process keeps running.
pub struct WatchProcess {
    child: Child,
    lines: mpsc::Receiver<String>,
    seen: Vec<String>,
}

impl WatchProcess {
    pub fn spawn(working_dir: &Path, config: &Path, interval_ms: u64) -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_dirwatch"))
            .args(["--config", config.to_str().unwrap()])
            .args(["--interval-ms", &interval_ms.to_string(), "watch"])
            .current_dir(working_dir)
            .env_remove("DIRWATCH_WATCH_DIRECTORY")
            .env_remove("DIRWATCH_POLL_INTERVAL_MS")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn dirwatch binary");

        let stdout = child.stdout.take().unwrap();
        let (tx, lines) = mpsc::channel();
        std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        Self {
            child,
            lines,
            seen: Vec::new(),
        }
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Wait for a stdout line matching `pred`, returning it
    pub fn wait_for_line(&mut self, timeout: Duration, pred: impl Fn(&str) -> bool) -> Option<String> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.checked_duration_since(Instant::now())?;
            let line = self.lines.recv_timeout(remaining).ok()?;
            self.seen.push(line.clone());
            if pred(&line) {
                return Some(line);
            }
        }
    }

    /// Next stdout line, if one arrives in time
    pub fn next_line(&mut self, timeout: Duration) -> Option<String> {
        self.wait_for_line(timeout, |_| true)
    }

    /// Wait for exit, killing the process if it outlives `timeout`
    pub fn wait(&mut self, timeout: Duration) -> Option<ExitStatus> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Some(status) = self.child.try_wait().unwrap() {
                return Some(status);
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        let _ = self.child.kill();
        let _ = self.child.wait();
        None
    }

    /// All stdout lines seen so far plus anything still buffered
    pub fn stdout_lines(&mut self) -> Vec<String> {
        while let Ok(line) = self.lines.recv_timeout(Duration::from_millis(200)) {
            self.seen.push(line);
        }
        self.seen.clone()
    }

    /// Stderr contents; only complete once the process has exited
    pub fn stderr(&mut self) -> String {
        let mut buf = String::new();
        if let Some(mut stderr) = self.child.stderr.take() {
            let _ = stderr.read_to_string(&mut buf);
        }
        buf
    }
}

impl Drop for WatchProcess {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
