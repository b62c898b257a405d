//! A terminal front end: block-character bars on an indicatif spinner line, and line-based
//! commands read from stdin.

use std::io::BufRead;
use std::thread;

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use orstviz_steps::{Element, Highlight, Snapshot, VALUE_RANGE};
use tokio::sync::mpsc::UnboundedSender;

use crate::player::{Command, PlaybackState, Renderer, Status};

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub const HELP: &str = "start | p (pause) | r (resume) | s (stop) | g (new array) | \
                        + / - (speed) | speed <n> | size <n> | algo <name> | q (quit)";

/// Draws one bar per element, scaled over the value range and coloured by highlight.
pub fn bars(elements: &[Element]) -> String {
    let (low, high) = (*VALUE_RANGE.start(), *VALUE_RANGE.end());
    let span = (high - low + 1) as usize;
    elements
        .iter()
        .map(|element| {
            let offset = (element.value.clamp(low, high) - low) as usize;
            let block = BLOCKS[offset * BLOCKS.len() / span].to_string();
            paint(block, element.highlight).to_string()
        })
        .collect()
}

fn paint(text: String, highlight: Highlight) -> ColoredString {
    match highlight {
        Highlight::Default => text.blue(),
        Highlight::Comparing => text.yellow(),
        Highlight::Swapping => text.red(),
        Highlight::Pivot => text.purple(),
        Highlight::Sorted => text.green(),
    }
}

pub struct TerminalRenderer {
    bar: ProgressBar,
}

impl TerminalRenderer {
    pub fn new() -> anyhow::Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::with_template(
            "{prefix:.bold} {spinner:.green} [{elapsed_precise}] step {pos} {msg}",
        )?);
        Ok(Self { bar })
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        self.bar.set_message(bars(&snapshot.elements));
        self.bar.inc(1);
    }

    fn array(&mut self, elements: &[Element]) {
        self.bar.reset();
        self.bar.set_message(bars(elements));
    }

    fn status(&mut self, status: &Status) {
        let state = match status.state {
            PlaybackState::Running => status.state.to_string().green(),
            PlaybackState::Paused => status.state.to_string().yellow(),
            PlaybackState::Idle | PlaybackState::Completed => status.state.to_string().normal(),
        };
        self.bar.set_prefix(format!(
            "{} {} @ {} [{state}]",
            status.algorithm.display_name(),
            status.algorithm.complexity(),
            status.speed
        ));
        self.bar.tick();
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        self.bar.abandon();
    }
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
}

pub fn parse_line(line: &str) -> anyhow::Result<Input> {
    let mut words = line.split_whitespace();
    let command = match (words.next(), words.next()) {
        (None, _) | (Some("start"), None) => Command::Start,
        (Some("p" | "pause"), None) => Command::Pause,
        (Some("r" | "resume"), None) => Command::Resume,
        (Some("s" | "stop"), None) => Command::Stop,
        (Some("g" | "generate"), None) => Command::Generate,
        (Some("+"), None) => Command::Faster,
        (Some("-"), None) => Command::Slower,
        (Some("q" | "quit"), None) => return Ok(Input::Quit),
        (Some("speed"), Some(n)) => Command::SetSpeed(n.parse()?),
        (Some("size"), Some(n)) => Command::SetSize(n.parse()?),
        (Some("algo" | "algorithm"), Some(name)) => Command::SetAlgorithm(name.parse()?),
        _ => anyhow::bail!("unrecognised command `{}`, try: {HELP}", line.trim()),
    };
    Ok(Input::Command(command))
}

/// Reads commands from stdin on a dedicated thread until `q` or end of input.
pub fn spawn_stdin_reader(commands: UnboundedSender<Command>) -> thread::JoinHandle<()> {
    thread::spawn(move || forward_lines(std::io::stdin().lock(), commands))
}

/// Parses `input` line by line into `commands`.
///
/// `q` is forwarded as [`Command::Quit`] and ends reading. Either way `commands` is dropped on
/// return, which tells the drive loop no more input is coming.
pub fn forward_lines<B: BufRead>(input: B, commands: UnboundedSender<Command>) {
    for line in input.lines() {
        let Ok(line) = line else { break };
        match parse_line(&line) {
            Ok(Input::Command(command)) => {
                if commands.send(command).is_err() {
                    return;
                }
            }
            Ok(Input::Quit) => {
                let _ = commands.send(Command::Quit);
                return;
            }
            Err(err) => eprintln!("{}", err.to_string().red()),
        }
    }
}
