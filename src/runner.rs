//! Headless line-driven runner.
//!
//! Reads one command per input line, applies it to a [`Session`] and writes
//! JSON lines back: an `ack` per command, every emitted event, and snapshots
//! on request.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::core::{GameSnapshot, PieceGenerator};
use crate::engine::{parse_grid, GridPolicy, Session};
use crate::types::{GameEvent, Intent, DEFAULT_TICK_MS};

/// Runner settings, read from `BRICKS_*` environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Fixed seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Elapsed time used by a bare `tick` command
    pub tick_ms: u32,
    /// JSON occupancy matrix injected before the first command
    pub grid_path: Option<PathBuf>,
    pub grid_policy: GridPolicy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_ms: DEFAULT_TICK_MS,
            grid_path: None,
            grid_policy: GridPolicy::Normalize,
        }
    }
}

impl RunnerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("BRICKS_SEED").and_then(|s| s.trim().parse().ok());
        let tick_ms = lookup("BRICKS_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.tick_ms);
        let grid_path = lookup("BRICKS_GRID_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });
        let grid_policy = lookup("BRICKS_GRID_POLICY")
            .and_then(|s| GridPolicy::from_str(&s))
            .unwrap_or(defaults.grid_policy);

        Self {
            seed,
            tick_ms,
            grid_path,
            grid_policy,
        }
    }

    fn generator(&self) -> PieceGenerator {
        match self.seed {
            Some(seed) => PieceGenerator::new(seed),
            None => PieceGenerator::from_entropy(),
        }
    }
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Start,
    Stop,
    /// Restart on an empty grid
    Reset,
    /// Restart on the inline JSON matrix
    Grid(String),
    /// Advance time; `None` uses the configured tick
    Tick(Option<u32>),
    Snapshot,
    Quit,
}

impl Command {
    /// Parse a line. Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "start" => Command::Start,
            "stop" => Command::Stop,
            "reset" => Command::Reset,
            "snapshot" | "snap" => Command::Snapshot,
            "quit" | "exit" => Command::Quit,
            "grid" => {
                if rest.is_empty() {
                    return Err(anyhow!("grid: missing matrix"));
                }
                Command::Grid(rest.to_string())
            }
            "tick" => {
                if rest.is_empty() {
                    Command::Tick(None)
                } else {
                    let ms = rest
                        .parse::<u32>()
                        .map_err(|_| anyhow!("tick: invalid milliseconds: {}", rest))?;
                    Command::Tick(Some(ms))
                }
            }
            other => match Intent::from_str(other) {
                Some(intent) => Command::Intent(intent),
                None => return Err(anyhow!("unknown command: {}", other)),
            },
        };
        Ok(Some(command))
    }

    fn name(&self) -> &'static str {
        match self {
            Command::Intent(intent) => intent.as_str(),
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Reset => "reset",
            Command::Grid(_) => "grid",
            Command::Tick(_) => "tick",
            Command::Snapshot => "snapshot",
            Command::Quit => "quit",
        }
    }
}

/// A line of runner output
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutputLine<'a> {
    Ack {
        command: &'static str,
        changed: bool,
    },
    Event(&'a GameEvent),
    Snapshot(&'a GameSnapshot),
    Error {
        code: &'static str,
        message: String,
    },
}

fn write_line<W: Write>(out: &mut W, line: &OutputLine<'_>) -> Result<()> {
    serde_json::to_writer(&mut *out, line)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Session plus output, driven one command at a time
pub struct Runner<W: Write> {
    config: RunnerConfig,
    session: Session<Vec<GameEvent>>,
    out: W,
}

impl<W: Write> Runner<W> {
    pub fn new(config: RunnerConfig, out: W) -> Self {
        let session = Session::with_generator(config.generator(), Vec::new());
        Self {
            config,
            session,
            out,
        }
    }

    /// Inject the configured grid file, if any
    pub fn load_initial_grid(&mut self) -> Result<()> {
        let Some(path) = self.config.grid_path.clone() else {
            return Ok(());
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read grid file {}", path.display()))?;
        let grid = parse_grid(&text, self.config.grid_policy)
            .with_context(|| format!("parse grid file {}", path.display()))?;
        self.session.reset(Some(grid));
        log::info!("injected grid from {}", path.display());
        self.flush_events()
    }

    pub fn session(&self) -> &Session<Vec<GameEvent>> {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Apply one command. Returns `false` when the runner should stop.
    pub fn execute(&mut self, command: Command) -> Result<bool> {
        let changed = match &command {
            Command::Intent(intent) => self.session.apply_intent(*intent),
            Command::Start => self.session.start(),
            Command::Stop => self.session.stop(),
            Command::Reset => self.session.reset(None),
            Command::Grid(json) => match parse_grid(json, self.config.grid_policy) {
                Ok(grid) => self.session.reset(Some(grid)),
                Err(err) => {
                    log::warn!("rejected grid: {}", err);
                    write_line(
                        &mut self.out,
                        &OutputLine::Error {
                            code: err.code(),
                            message: err.to_string(),
                        },
                    )?;
                    return Ok(true);
                }
            },
            Command::Tick(ms) => {
                let elapsed = ms.unwrap_or(self.config.tick_ms);
                self.session.tick(elapsed).is_some_and(|o| o.changed())
            }
            Command::Snapshot => {
                let snapshot = self.session.snapshot();
                write_line(&mut self.out, &OutputLine::Snapshot(&snapshot))?;
                return Ok(true);
            }
            Command::Quit => return Ok(false),
        };

        write_line(
            &mut self.out,
            &OutputLine::Ack {
                command: command.name(),
                changed,
            },
        )?;
        self.flush_events()?;
        Ok(true)
    }

    /// Parse and apply one raw input line
    pub fn execute_line(&mut self, line: &str) -> Result<bool> {
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Ok(true),
            Err(err) => {
                write_line(
                    &mut self.out,
                    &OutputLine::Error {
                        code: "invalid_command",
                        message: err.to_string(),
                    },
                )?;
                Ok(true)
            }
        }
    }

    fn flush_events(&mut self) -> Result<()> {
        for event in std::mem::take(self.session.sink_mut()) {
            write_line(&mut self.out, &OutputLine::Event(&event))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Run until `input` is exhausted or a `quit` command arrives
pub fn run<R: BufRead, W: Write>(config: RunnerConfig, input: R, out: W) -> Result<W> {
    let mut runner = Runner::new(config, out);
    runner.load_initial_grid()?;
    for line in input.lines() {
        let line = line.context("read command line")?;
        if !runner.execute_line(&line)? {
            break;
        }
    }
    Ok(runner.into_output())
}
