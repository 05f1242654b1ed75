use crate::platform::{CursorSourceImpl, Position};
use std::collections::VecDeque;

/// Replays a scripted sequence of poll results. An exhausted script behaves like a failing query.
#[derive(Debug, Default)]
pub struct MockCursorSource {
    pub script: VecDeque<Option<Position>>,
    pub polls: usize,
    pub releases: usize,
}

impl MockCursorSource {
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = Option<Position>>,
    {
        Self {
            script: script.into_iter().collect(),
            ..Default::default()
        }
    }
}

impl CursorSourceImpl for MockCursorSource {
    fn poll(&mut self) -> Option<Position> {
        self.polls += 1;
        self.script.pop_front().flatten()
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}
