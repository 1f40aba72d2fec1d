//! Timed execution of a build command.
//!
//! The child inherits stdin, stdout and stderr. While it runs, termination
//! conditions are watched and the child is killed when any of them holds:
//! - SIGINT (Ctrl+C) via the ctrlc handler
//! - SIGHUP (terminal hangup) via signal_hook
//! - Parent process death (reparented to init or a subreaper)

use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Exit code reported when the program could not be started.
pub const EXIT_NOT_STARTED: i32 = 127;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of one timed command run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Wall-clock time from spawn to exit
    pub duration: Duration,
    pub exit_code: i32,
    /// The run was cut short by a signal
    pub interrupted: bool,
}

impl RunOutcome {
    pub fn duration_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

/// Something that can run a command line and time it.
pub trait CommandRunner {
    /// Run `argv[0]` with the remaining arguments.
    ///
    /// A program that cannot be started is not an error: it yields
    /// [`EXIT_NOT_STARTED`].
    fn run(&self, argv: &[String]) -> Result<RunOutcome>;
}

/// Runs commands as child processes under a [`ProcessGuard`].
#[derive(Default)]
pub struct ProcessRunner {
    guard: ProcessGuard,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, argv: &[String]) -> Result<RunOutcome> {
        let Some((program, args)) = argv.split_first() else {
            return Ok(RunOutcome {
                duration: Duration::ZERO,
                exit_code: 1,
                interrupted: false,
            });
        };

        self.guard.register_signal_handlers();

        let start = Instant::now();
        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                warn!(program = %program, error = %e, "failed to start command");
                eprintln!("bmt: failed to start {}: {}", program, e);
                return Ok(RunOutcome {
                    duration: start.elapsed(),
                    exit_code: EXIT_NOT_STARTED,
                    interrupted: false,
                });
            }
        };
        debug!(program = %program, pid = child.id(), "spawned command");

        let status = self
            .guard
            .wait_or_kill(&mut child)
            .with_context(|| format!("Failed to wait for {}", program))?;
        let duration = start.elapsed();

        Ok(RunOutcome {
            duration,
            exit_code: exit_code(status),
            interrupted: self.guard.is_interrupted(),
        })
    }
}

/// Exit code of `status`; a death by signal maps to `128 + signal`.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Guards a child process against outliving an interrupted or orphaned parent.
///
/// Register signals before spawning, then use `wait_or_kill` instead of `.wait()`.
pub struct ProcessGuard {
    interrupted: Arc<AtomicBool>,
    #[cfg(unix)]
    initial_ppid: u32,
}

impl Default for ProcessGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessGuard {
    pub fn new() -> Self {
        Self {
            interrupted: Arc::new(AtomicBool::new(false)),
            #[cfg(unix)]
            initial_ppid: unsafe { libc::getppid() as u32 },
        }
    }

    /// Register SIGINT and SIGHUP handlers setting the shared interrupted flag.
    ///
    /// The SIGINT handler is process-wide: the first guard to register owns
    /// it, and later guards in the same process only observe SIGHUP.
    pub fn register_signal_handlers(&self) {
        let flag = self.interrupted.clone();
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })
        .ok();

        #[cfg(unix)]
        {
            let _ = signal_hook::flag::register(libc::SIGHUP, self.interrupted.clone());
        }
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Mark the guard as interrupted, as a signal would.
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    /// Wait for `child`, killing it once a termination condition holds.
    pub fn wait_or_kill(&self, child: &mut Child) -> std::io::Result<ExitStatus> {
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if self.should_terminate() {
                debug!(pid = child.id(), "terminating child");
                let _ = child.kill();
                return child.wait();
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    fn should_terminate(&self) -> bool {
        self.is_interrupted() || self.is_orphaned()
    }

    #[cfg(unix)]
    fn is_orphaned(&self) -> bool {
        let current_ppid = unsafe { libc::getppid() as u32 };
        current_ppid != self.initial_ppid
    }

    #[cfg(not(unix))]
    fn is_orphaned(&self) -> bool {
        false
    }
}
