// typewriter.rs - Character-at-a-time text reveal
//
// Shared by the prompt stage and the content stage. Character i lands at
// start + (i + 1) * interval; the reveal is complete when the last one lands.

use crate::config::Millis;

#[derive(Clone, Debug)]
pub struct Typewriter {
    chars: Vec<char>,
    next: usize,
    interval: Millis,
}

impl Typewriter {
    pub fn new(text: &str, interval: Millis) -> Self {
        Self { chars: text.chars().collect(), next: 0, interval }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.chars.len()
    }

    pub fn interval(&self) -> Millis {
        self.interval
    }

    /// When the first character lands for a reveal starting at `start`.
    pub fn first_due(&self, start: Millis) -> Millis {
        start + self.interval
    }

    /// When the reveal starting at `start` completes.
    pub fn finish_at(&self, start: Millis) -> Millis {
        start + self.len() as Millis * self.interval
    }

    /// Take the next character, if any.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.next).copied()?;
        self.next += 1;
        Some(ch)
    }

    /// The whole text, typed or not.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_matches_interval() {
        let tw = Typewriter::new("AB", 30);
        assert_eq!(tw.first_due(500), 530);
        assert_eq!(tw.finish_at(500), 560);
        assert_eq!(Typewriter::new("", 30).finish_at(500), 500);
    }

    #[test]
    fn advance_yields_every_char_once() {
        let mut tw = Typewriter::new("héllo", 5);
        let mut out = String::new();
        while let Some(ch) = tw.advance() {
            out.push(ch);
        }
        assert_eq!(out, "héllo");
        assert!(tw.is_done());
        assert_eq!(tw.advance(), None);
        assert_eq!(tw.text(), "héllo");
    }
}
