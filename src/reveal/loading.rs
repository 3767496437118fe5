// loading.rs - Loading status message cycle
//
// Message k is due at k * interval from stage start. The cycle and the
// stage timer are independent: whichever ends first, the stage timer
// always wins the last word.

use crate::config::Millis;

#[derive(Clone, Debug)]
pub struct MessageCycle {
    messages: Vec<String>,
    interval: Millis,
    index: usize,
}

impl MessageCycle {
    pub fn new(messages: Vec<String>, interval: Millis) -> Self {
        Self { messages, interval, index: 0 }
    }

    /// Offset from stage start at which message `k` is shown.
    pub fn offset(&self, k: usize) -> Millis {
        k as Millis * self.interval
    }

    pub fn interval(&self) -> Millis {
        self.interval
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.messages.len()
    }

    /// Current message, advancing the cursor.
    pub fn advance(&mut self) -> Option<&str> {
        let msg = self.messages.get(self.index)?;
        self.index += 1;
        Some(msg.as_str())
    }

    /// How many messages can be shown before a stage of `duration` ends.
    pub fn visible_within(&self, duration: Millis) -> usize {
        (0..self.messages.len())
            .take_while(|&k| self.offset(k) < duration)
            .count()
    }
}
