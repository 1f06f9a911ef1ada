use std::collections::VecDeque;

/// FIFO of tasks that run after the current turn.
///
/// Tasks cannot be cancelled once queued. The host drains the queue at the
/// end of every turn, before it accepts the next input event; the task itself
/// must tolerate whatever it refers to having disappeared in the meantime.
#[derive(Debug)]
pub struct TurnQueue<T> {
    pending: VecDeque<T>,
}

impl<T> TurnQueue<T> {
    pub fn new() -> Self {
        Self { pending: VecDeque::new() }
    }

    /// Queue `task` for the end of the current turn.
    #[inline]
    pub fn defer(&mut self, task: T) {
        self.pending.push_back(task);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every task queued so far, oldest first.
    ///
    /// Tasks deferred while the returned batch runs land in the next batch.
    pub fn take_batch(&mut self) -> Vec<T> {
        self.pending.drain(..).collect()
    }
}

impl<T> Default for TurnQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
