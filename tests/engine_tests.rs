//! Engine Process Integration Tests
//!
//! Runs the client against small `sh` mock engines:
//! - Handshake and move exchange
//! - Timeouts and process teardown
//! - Malformed and illegal responses
//! - Launch failures surfacing before any input is read

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};
use xfchess_session::core::SessionSettings;
use xfchess_session::game::ai::{EngineClient, EngineConfig, EngineState};
use xfchess_session::game::error::{EngineError, EngineResult};
use xfchess_session::game::rules::BoardState;
use xfchess_session::game::types::ChessMove;
use xfchess_session::game::SessionError;
use xfchess_session::input::InputEvent;
use xfchess_session::launch_session;
use xfchess_session::ui::{BoardView, Frontend};

/// Handshake lines shared by every mock engine
const HANDSHAKE: &str = r#"
    uci) echo "id name MockEngine"; echo "id author Tests"; echo "uciok" ;;
    isready) echo "readyok" ;;
    ucinewgame) ;;"#;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "xfchess-session-engine-{}-{}",
        name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write an executable mock engine whose read loop handles `cases` after
/// the handshake, then runs `after_eof` once stdin closes
fn mock_engine(dir: &Path, cases: &str, after_eof: &str) -> PathBuf {
    let path = dir.join("engine.sh");
    let script = format!(
        "#!/bin/sh\nwhile IFS= read -r line; do\n  case \"$line\" in{HANDSHAKE}\n{cases}\n  esac\ndone\n{after_eof}\n"
    );
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn config(path: &Path) -> EngineConfig {
    EngineConfig {
        path: path.to_path_buf(),
        handshake_timeout: Duration::from_secs(5),
        response_grace: Duration::from_millis(300),
        quit_grace: Duration::from_millis(300),
    }
}

/// Launch, retrying while another test thread still holds the fresh script
/// open for writing (ETXTBSY)
fn launch(config: EngineConfig) -> EngineResult<EngineClient> {
    let mut attempts = 0;
    loop {
        match EngineClient::launch(config.clone()) {
            Err(EngineError::Launch { message, .. })
                if message.contains("busy") && attempts < 20 =>
            {
                attempts += 1;
                thread::sleep(Duration::from_millis(20));
            }
            other => return other,
        }
    }
}

fn process_alive(pid: u32) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("kill -0 {pid} 2>/dev/null"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn after_e2e4() -> BoardState {
    BoardState::replay([ChessMove::from_uci("e2e4").unwrap()]).unwrap()
}

// ============================================================================
// Exchange Tests
// ============================================================================

#[test]
fn test_handshake_and_best_move() {
    let dir = scratch_dir("exchange");
    let log = dir.join("received.log");
    let engine = mock_engine(
        &dir,
        &format!(
            r#"    position*) echo "$line" >> "{log}" ;;
    go*) echo "$line" >> "{log}"; echo "info depth 1 score cp 20"; echo "bestmove e7e5 ponder g1f3" ;;
    quit) exit 0 ;;"#,
            log = log.display()
        ),
        "",
    );

    let mut client = launch(config(&engine)).unwrap();
    assert_eq!(client.state(), EngineState::Ready);
    assert_eq!(client.identity().name.as_deref(), Some("MockEngine"));
    assert_eq!(client.identity().author.as_deref(), Some("Tests"));

    let mv = client
        .request_move(&after_e2e4(), Duration::from_millis(50))
        .unwrap();
    assert_eq!(mv.to_uci(), "e7e5");
    assert_eq!(client.state(), EngineState::Ready);

    let pid = client.pid().unwrap();
    client.stop();
    assert_eq!(client.state(), EngineState::Stopped);
    assert!(!process_alive(pid));

    let received = fs::read_to_string(&log).unwrap();
    assert_eq!(
        received.lines().collect::<Vec<_>>(),
        vec!["position startpos moves e2e4", "go movetime 50"]
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_unbounded_timeouts_do_not_overflow() {
    //! Deadlines past the end of the clock wait without a limit
    let dir = scratch_dir("unbounded");
    let engine = mock_engine(
        &dir,
        "    go*) echo \"bestmove e7e5\" ;;\n    quit) exit 0 ;;",
        "",
    );
    let unbounded = EngineConfig {
        handshake_timeout: Duration::MAX,
        response_grace: Duration::MAX,
        ..config(&engine)
    };

    let mut client = launch(unbounded).unwrap();
    let mv = client
        .request_move(&after_e2e4(), Duration::from_millis(50))
        .unwrap();
    assert_eq!(mv.to_uci(), "e7e5");
    client.stop();
    assert_eq!(client.state(), EngineState::Stopped);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_drop_terminates_engine() {
    let dir = scratch_dir("drop");
    let engine = mock_engine(&dir, "    quit) exit 0 ;;", "");

    let client = launch(config(&engine)).unwrap();
    let pid = client.pid().unwrap();
    drop(client);
    assert!(!process_alive(pid));
    let _ = fs::remove_dir_all(&dir);
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_silent_engine_times_out_and_is_terminated() {
    let dir = scratch_dir("timeout");
    let engine = mock_engine(&dir, "    go*) ;;\n    quit) exit 0 ;;", "");

    let mut client = launch(config(&engine)).unwrap();
    let pid = client.pid().unwrap();

    let started = Instant::now();
    let err = client
        .request_move(&after_e2e4(), Duration::from_millis(100))
        .unwrap_err();

    assert!(matches!(err, EngineError::Timeout { .. }), "got {err:?}");
    assert!(started.elapsed() >= Duration::from_millis(400));
    assert_eq!(client.state(), EngineState::Stopped);
    assert_eq!(client.pid(), None);
    assert!(!process_alive(pid));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_engine_ignoring_quit_is_killed() {
    let dir = scratch_dir("stubborn");
    let engine = mock_engine(
        &dir,
        "    go*) ;;\n    quit) ;;",
        "while :; do sleep 1; done",
    );

    let mut client = launch(config(&engine)).unwrap();
    let pid = client.pid().unwrap();

    let started = Instant::now();
    client.stop();
    assert!(started.elapsed() >= Duration::from_millis(300));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(!process_alive(pid));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_malformed_best_move_is_fatal() {
    let dir = scratch_dir("malformed");
    let engine = mock_engine(
        &dir,
        "    go*) echo \"bestmove (none)\" ;;\n    quit) exit 0 ;;",
        "",
    );

    let mut client = launch(config(&engine)).unwrap();
    let err = client
        .request_move(&after_e2e4(), Duration::from_millis(50))
        .unwrap_err();

    assert!(matches!(err, EngineError::ProtocolParse { .. }), "got {err:?}");
    assert_eq!(client.state(), EngineState::Stopped);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_illegal_best_move_is_fatal() {
    let dir = scratch_dir("illegal");
    let engine = mock_engine(
        &dir,
        "    go*) echo \"bestmove e2e4\" ;;\n    quit) exit 0 ;;",
        "",
    );

    let mut client = launch(config(&engine)).unwrap();
    let err = client
        .request_move(&after_e2e4(), Duration::from_millis(50))
        .unwrap_err();

    assert!(matches!(err, EngineError::IllegalMove { .. }), "got {err:?}");
    assert_eq!(client.state(), EngineState::Stopped);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_engine_crash_during_search() {
    let dir = scratch_dir("crash");
    let engine = mock_engine(&dir, "    go*) exit 3 ;;", "");

    let mut client = launch(config(&engine)).unwrap();
    let err = client
        .request_move(&after_e2e4(), Duration::from_millis(50))
        .unwrap_err();

    assert!(matches!(err, EngineError::Io(_)), "got {err:?}");
    assert_eq!(client.state(), EngineState::Stopped);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_handshake_timeout_is_launch_error() {
    let dir = scratch_dir("mute");
    let path = dir.join("engine.sh");
    fs::write(&path, "#!/bin/sh\nwhile IFS= read -r line; do :; done\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

    let mute = EngineConfig {
        handshake_timeout: Duration::from_millis(200),
        ..config(&path)
    };
    let err = launch(mute).unwrap_err();
    assert!(matches!(err, EngineError::Launch { .. }), "got {err:?}");
    let _ = fs::remove_dir_all(&dir);
}

// ============================================================================
// Session Launch Tests
// ============================================================================

/// Front-end that counts how often the session touched it
#[derive(Debug, Default)]
struct CountingFrontend {
    polls: usize,
    redraws: usize,
}

impl Frontend for CountingFrontend {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.polls += 1;
        vec![InputEvent::Quit]
    }

    fn redraw(&mut self, _view: &BoardView<'_>) {
        self.redraws += 1;
    }
}

#[test]
fn test_bad_engine_path_fails_before_input() {
    let settings = SessionSettings {
        engine_path: PathBuf::from("/nonexistent/brainstorm"),
        ..SessionSettings::default()
    };
    let mut frontend = CountingFrontend::default();

    let result = launch_session(&settings, &mut frontend);
    assert!(matches!(
        result,
        Err(SessionError::Engine(EngineError::Launch { .. }))
    ));
    assert_eq!(frontend.polls, 0);
    assert_eq!(frontend.redraws, 0);
}

#[test]
fn test_session_against_mock_engine_quits_cleanly() {
    let dir = scratch_dir("session");
    let engine = mock_engine(
        &dir,
        "    go*) echo \"bestmove e7e5\" ;;\n    quit) exit 0 ;;",
        "",
    );
    let settings = SessionSettings {
        engine_path: engine,
        seconds_per_move: 0.05,
        ..SessionSettings::default()
    };
    let mut frontend = CountingFrontend::default();

    let mut outcome = launch_session(&settings, &mut frontend);
    for _ in 0..20 {
        let busy = matches!(
            &outcome,
            Err(SessionError::Engine(EngineError::Launch { message, .. })) if message.contains("busy")
        );
        if !busy {
            break;
        }
        thread::sleep(Duration::from_millis(20));
        outcome = launch_session(&settings, &mut frontend);
    }

    assert_eq!(outcome.unwrap(), xfchess_session::SessionOutcome::Quit);
    assert_eq!(frontend.polls, 1);
    let _ = fs::remove_dir_all(&dir);
}
