//! External engine process client
//!
//! Owns one UCI engine subprocess for the lifetime of a session and performs
//! exactly one request/response exchange per engine turn.
//!
//! # Lifecycle
//!
//! ```text
//! Unstarted ──start──▶ Ready ──request_move──▶ AwaitingMove ──bestmove──▶ Ready
//!     │                  │                          │
//!     └──────────────────┴────── stop / error ──────┴──────────▶ Stopped
//! ```
//!
//! Every failure path stops the process before the error is returned, and
//! `Drop` stops it as well, so the subprocess never outlives the client.
//!
//! # Threading
//!
//! A reader thread forwards engine stdout lines into a channel so that waits
//! can be bounded with `recv_timeout`. Only this client writes to the engine's
//! stdin and only its reader consumes stdout.

use super::protocol::{self, EngineIdentity};
use super::provider::MoveProvider;
use super::resource::EngineConfig;
use crate::game::error::{EngineError, EngineResult};
use crate::game::rules::BoardState;
use crate::game::types::ChessMove;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, trace, warn};

/// Poll interval while waiting for the process to exit after `quit`
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Client state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    Unstarted,
    Ready,
    AwaitingMove,
    Stopped,
}

impl EngineState {
    pub fn name(self) -> &'static str {
        match self {
            EngineState::Unstarted => "unstarted",
            EngineState::Ready => "ready",
            EngineState::AwaitingMove => "awaiting move",
            EngineState::Stopped => "stopped",
        }
    }
}

/// Live subprocess plus its pipes
struct EngineProcess {
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
    reader: JoinHandle<()>,
}

impl EngineProcess {
    fn send(&mut self, line: &str) -> EngineResult<()> {
        debug!("[ENGINE] >> {}", line);
        writeln!(self.stdin, "{line}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Read lines until `accept` matches one, within `timeout`
    ///
    /// Lines that do not match are handed to `skipped`.
    fn wait_for(
        &self,
        timeout: Duration,
        mut accept: impl FnMut(&str) -> bool,
        mut skipped: impl FnMut(&str),
    ) -> EngineResult<String> {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            let received = match deadline {
                Some(deadline) => self
                    .lines
                    .recv_timeout(deadline.saturating_duration_since(Instant::now())),
                None => self
                    .lines
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(line) => {
                    trace!("[ENGINE] << {}", line);
                    if accept(&line) {
                        return Ok(line);
                    }
                    skipped(&line);
                }
                Err(RecvTimeoutError::Timeout) => {
                    return Err(EngineError::Timeout { waited: timeout });
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(EngineError::Io(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        "engine closed its output",
                    )));
                }
            }
        }
    }

    /// Ask the process to quit, kill it after `grace`, and reap it
    fn shutdown(self, grace: Duration) {
        let EngineProcess {
            mut child,
            mut stdin,
            lines,
            reader,
        } = self;

        debug!("[ENGINE] >> {}", protocol::QUIT);
        if let Err(e) = writeln!(stdin, "{}", protocol::QUIT).and_then(|_| stdin.flush()) {
            debug!("[ENGINE] Could not send quit: {}", e);
        }
        drop(stdin);

        let deadline = Instant::now().checked_add(grace);
        let exited = loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    debug!("[ENGINE] Process exited with {}", status);
                    break true;
                }
                Ok(None) if deadline.map_or(true, |d| Instant::now() < d) => {
                    thread::sleep(EXIT_POLL_INTERVAL)
                }
                Ok(None) => break false,
                Err(e) => {
                    warn!("[ENGINE] Failed to poll engine process: {}", e);
                    break false;
                }
            }
        };

        if !exited {
            warn!("[ENGINE] Engine ignored quit for {:?}, killing it", grace);
            if let Err(e) = child.kill() {
                warn!("[ENGINE] Kill failed: {}", e);
            }
            if let Err(e) = child.wait() {
                warn!("[ENGINE] Failed to reap engine process: {}", e);
            }
        }

        drop(lines);
        if !reader.is_finished() {
            debug!("[ENGINE] Reader thread still running, detaching it");
        } else if let Err(e) = reader.join() {
            debug!("[ENGINE] Reader thread panicked: {:?}", e);
        }
    }
}

/// Client for one external UCI engine process
pub struct EngineClient {
    config: EngineConfig,
    state: EngineState,
    process: Option<EngineProcess>,
    identity: EngineIdentity,
}

impl std::fmt::Debug for EngineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineClient")
            .field("path", &self.config.path)
            .field("state", &self.state)
            .field("pid", &self.pid())
            .field("identity", &self.identity)
            .finish()
    }
}

impl EngineClient {
    /// Client in the `Unstarted` state
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: EngineState::Unstarted,
            process: None,
            identity: EngineIdentity::default(),
        }
    }

    /// Create a client and start it
    pub fn launch(config: EngineConfig) -> EngineResult<Self> {
        let mut client = Self::new(config);
        client.start()?;
        Ok(client)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Name and author reported during the handshake
    pub fn identity(&self) -> &EngineIdentity {
        &self.identity
    }

    /// OS process id while the engine is running
    pub fn pid(&self) -> Option<u32> {
        self.process.as_ref().map(|process| process.child.id())
    }

    /// Spawn the engine and perform the UCI handshake
    ///
    /// # Errors
    /// [`EngineError::Launch`] if the executable cannot be spawned or the
    /// handshake does not complete in time. The process is stopped first.
    pub fn start(&mut self) -> EngineResult<()> {
        if self.state != EngineState::Unstarted {
            return Err(EngineError::NotReady {
                state: self.state.name(),
            });
        }

        let path = self.config.path.clone();
        info!("[ENGINE] Launching {:?}", path);

        let process = spawn_process(&self.config).map_err(|e| EngineError::Launch {
            path: path.clone(),
            message: e.to_string(),
        })?;
        self.process = Some(process);
        self.state = EngineState::Ready;

        if let Err(e) = self.handshake() {
            error!("[ENGINE] Handshake with {:?} failed: {}", path, e);
            self.stop();
            return Err(EngineError::Launch {
                path,
                message: format!("handshake failed: {e}"),
            });
        }

        info!(
            "[ENGINE] Ready: {} (pid {:?})",
            self.identity.name.as_deref().unwrap_or("unnamed engine"),
            self.pid()
        );
        Ok(())
    }

    fn handshake(&mut self) -> EngineResult<()> {
        let timeout = self.config.handshake_timeout;
        let identity = &mut self.identity;
        let process = self.process.as_mut().ok_or(EngineError::NotReady {
            state: EngineState::Unstarted.name(),
        })?;

        process.send(protocol::UCI)?;
        process.wait_for(
            timeout,
            |line| line.trim() == protocol::UCI_OK,
            |line| identity.absorb(line),
        )?;

        process.send(protocol::IS_READY)?;
        process.wait_for(timeout, |line| line.trim() == protocol::READY_OK, |_| {})?;

        process.send(protocol::NEW_GAME)?;
        process.send(protocol::IS_READY)?;
        process.wait_for(timeout, |line| line.trim() == protocol::READY_OK, |_| {})?;
        Ok(())
    }

    /// Ask the engine for its move in `board`, blocking up to `time_budget`
    /// plus the configured grace period
    ///
    /// # Errors
    /// Timeout, malformed response, illegal move or pipe failure. All of them
    /// stop the engine before returning.
    pub fn request_move(
        &mut self,
        board: &BoardState,
        time_budget: Duration,
    ) -> EngineResult<ChessMove> {
        if self.state != EngineState::Ready {
            return Err(EngineError::NotReady {
                state: self.state.name(),
            });
        }

        self.state = EngineState::AwaitingMove;
        match self.exchange(board, time_budget) {
            Ok(mv) => {
                self.state = EngineState::Ready;
                info!("[ENGINE] Best move {}", mv);
                Ok(mv)
            }
            Err(e) => {
                error!("[ENGINE] Move request failed: {}", e);
                self.stop();
                Err(e)
            }
        }
    }

    fn exchange(&mut self, board: &BoardState, time_budget: Duration) -> EngineResult<ChessMove> {
        let waited = time_budget.saturating_add(self.config.response_grace);
        let process = self.process.as_mut().ok_or(EngineError::NotReady {
            state: EngineState::Stopped.name(),
        })?;

        process.send(&protocol::position_command(board.history()))?;
        process.send(&protocol::go_command(time_budget))?;

        let started = Instant::now();
        let line = process.wait_for(waited, protocol::is_bestmove, |_| {})?;
        debug!("[ENGINE] Answered in {:?}", started.elapsed());

        let mv = protocol::parse_bestmove(&line)?;
        if !board.legal_moves().contains(&mv) {
            return Err(EngineError::IllegalMove { mv });
        }
        Ok(mv)
    }

    /// Terminate the engine process
    ///
    /// Sends `quit`, waits for the quit grace period, then kills. Calling it
    /// again (or on a client that never started) does nothing.
    pub fn stop(&mut self) {
        if self.state == EngineState::Stopped {
            return;
        }
        if let Some(process) = self.process.take() {
            info!("[ENGINE] Stopping engine (pid {})", process.child.id());
            process.shutdown(self.config.quit_grace);
        }
        self.state = EngineState::Stopped;
    }
}

impl MoveProvider for EngineClient {
    fn request_move(&mut self, board: &BoardState, time_budget: Duration) -> EngineResult<ChessMove> {
        EngineClient::request_move(self, board, time_budget)
    }

    fn stop(&mut self) {
        EngineClient::stop(self);
    }
}

impl Drop for EngineClient {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_process(config: &EngineConfig) -> std::io::Result<EngineProcess> {
    let mut child = Command::new(&config.path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    let pipes = child.stdin.take().zip(child.stdout.take());
    let Some((stdin, stdout)) = pipes else {
        let _ = child.kill();
        let _ = child.wait();
        return Err(std::io::Error::other("engine pipes unavailable"));
    };

    let (tx, lines) = crossbeam_channel::unbounded();
    let reader = thread::Builder::new()
        .name("engine-stdout".to_string())
        .spawn(move || pump_lines(stdout, tx));
    let reader = match reader {
        Ok(handle) => handle,
        Err(e) => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(e);
        }
    };

    Ok(EngineProcess {
        child,
        stdin,
        lines,
        reader,
    })
}

/// Forward stdout lines until EOF or until the client goes away
fn pump_lines(stdout: ChildStdout, tx: Sender<String>) {
    for line in BufReader::new(stdout).lines() {
        let Ok(line) = line else {
            break;
        };
        if tx.send(line).is_err() {
            break;
        }
    }
}
