use orstviz_player::{PlaybackState, Renderer, Status};
use orstviz_steps::{Element, Snapshot};
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Render(Snapshot),
    Array(Vec<Element>),
    Status(Status),
}

/// A renderer that remembers everything it was told, and when.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<(Instant, Event)>,
}

impl Recorder {
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.events
            .iter()
            .filter_map(|(_, event)| match event {
                Event::Render(snapshot) => Some(snapshot.clone()),
                _ => None,
            })
            .collect()
    }

    /// When each snapshot was delivered.
    pub fn render_times(&self) -> Vec<Instant> {
        self.events
            .iter()
            .filter(|(_, event)| matches!(event, Event::Render(_)))
            .map(|(at, _)| *at)
            .collect()
    }

    pub fn states(&self) -> Vec<PlaybackState> {
        self.events
            .iter()
            .filter_map(|(_, event)| match event {
                Event::Status(status) => Some(status.state),
                _ => None,
            })
            .collect()
    }

    /// Snapshots rendered after the most recent status reporting `state`.
    pub fn renders_since(&self, state: PlaybackState) -> usize {
        let from = self
            .events
            .iter()
            .rposition(|(_, event)| matches!(event, Event::Status(s) if s.state == state))
            .map_or(0, |i| i + 1);
        self.events[from..]
            .iter()
            .filter(|(_, event)| matches!(event, Event::Render(_)))
            .count()
    }
}

impl Renderer for Recorder {
    fn render(&mut self, snapshot: &Snapshot) {
        self.events
            .push((Instant::now(), Event::Render(snapshot.clone())));
    }

    fn array(&mut self, elements: &[Element]) {
        self.events
            .push((Instant::now(), Event::Array(elements.to_vec())));
    }

    fn status(&mut self, status: &Status) {
        self.events.push((Instant::now(), Event::Status(*status)));
    }
}
