use super::catalog::Track;
use std::collections::VecDeque;

/// Pending tracks for a guild, played strictly first in, first out.
///
/// There is no capacity limit and duplicates are allowed.
#[derive(Debug, Default, Clone)]
pub struct PlaybackQueue {
    tracks: VecDeque<Track>,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track to the tail of the queue
    pub fn enqueue(&mut self, track: Track) {
        self.tracks.push_back(track);
    }

    /// Add several tracks to the tail, keeping their relative order
    pub fn enqueue_all(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.extend(tracks);
    }

    /// Remove and return the head of the queue
    pub fn dequeue(&mut self) -> Option<Track> {
        self.tracks.pop_front()
    }

    /// Put a track back at the head, ahead of everything pending
    pub fn requeue_front(&mut self, track: Track) {
        self.tracks.push_front(track);
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Snapshot of the pending tracks in play order
    pub fn peek_all(&self) -> Vec<Track> {
        self.tracks.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
