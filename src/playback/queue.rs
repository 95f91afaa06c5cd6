use std::collections::VecDeque;

use crate::turtle::command::AnimationCommand;

/// FIFO of commands waiting to be played.
///
/// Append-only at the tail, consumed from the head by a single player. Growth is unbounded,
/// mirroring the unbounded output of the issuing script.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<AnimationCommand>,
    enqueued_total: u64,
    dequeued_total: u64,
}

impl CommandQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command at the tail.
    pub fn enqueue(&mut self, cmd: AnimationCommand) {
        tracing::trace!(kind = cmd.kind(), pending = self.pending.len(), "enqueue");
        self.pending.push_back(cmd);
        self.enqueued_total += 1;
    }

    /// Take the oldest pending command.
    pub fn pop_front(&mut self) -> Option<AnimationCommand> {
        let cmd = self.pending.pop_front()?;
        self.dequeued_total += 1;
        Some(cmd)
    }

    /// Drop every pending command, returning how many were discarded.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Number of pending commands.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Return `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending commands, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &AnimationCommand> {
        self.pending.iter()
    }

    /// Commands ever appended.
    pub fn enqueued_total(&self) -> u64 {
        self.enqueued_total
    }

    /// Commands ever taken by the player.
    pub fn dequeued_total(&self) -> u64 {
        self.dequeued_total
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/queue.rs"]
mod tests;
