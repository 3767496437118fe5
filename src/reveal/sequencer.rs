// sequencer.rs - Reveal state machine
//
//   Idle -> PromptTyping -> AwaitingTrigger -> Loading -> RevealingContent -> Done
//
// All delayed work goes through one Timeline. `advance(now)` fires whatever
// is due and reports when the sequence has just finished, at which point the
// host starts the particle background.

use super::content::{self, RevealStep};
use super::loading::MessageCycle;
use super::page::{class, Page, Regions};
use super::timeline::{Lane, Timeline};
use super::typewriter::Typewriter;
use crate::config::{Millis, RevealConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    PromptTyping,
    AwaitingTrigger,
    Loading,
    RevealingContent,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    PromptChar,
    PromptDone,
    ShowLoading,
    LoadingMessage,
    LoadingDone,
    ShowMain,
    ShowHeader,
    Reveal(usize),
    TypeChar(usize),
    RevealDone,
}

/// What an `advance` call observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Pending,
    /// The content stage completed during this call. Reported once.
    Finished,
    Idle,
}

/// A content element being re-typed.
struct TypingJob<N> {
    node: N,
    writer: Typewriter,
}

pub struct Sequencer<P: Page> {
    page: P,
    config: RevealConfig,
    regions: Regions<P::Node>,
    phase: Phase,
    timeline: Timeline<Action>,

    prompt: Typewriter,
    trigger_pending: bool,
    messages: MessageCycle,
    steps: Vec<RevealStep<P::Node>>,
    jobs: Vec<TypingJob<P::Node>>,
}

impl<P: Page> Sequencer<P> {
    pub fn new(page: P, config: RevealConfig) -> Self {
        let regions = Regions::locate(&page);
        let prompt = Typewriter::new(&config.prompt, config.prompt_typing_speed);
        let messages = MessageCycle::new(
            config.loading_messages.clone(),
            config.loading_message_interval,
        );

        Self {
            page,
            config,
            regions,
            phase: Phase::Idle,
            timeline: Timeline::new(),
            prompt,
            trigger_pending: false,
            messages,
            steps: Vec::new(),
            jobs: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn regions(&self) -> &Regions<P::Node> {
        &self.regions
    }

    /// Earliest pending deadline, for arming the host timer.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timeline.next_due()
    }

    /// Stage 1: type the prompt. Runs once; later calls are ignored.
    pub fn start(&mut self, now: Millis) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::PromptTyping;
        let start = now + self.config.prompt_lead_in;
        log::info!(
            "typing prompt ({} chars, done at {} ms)",
            self.prompt.len(),
            self.prompt.finish_at(start)
        );

        if let Some(target) = &self.regions.prompt_text {
            self.page.reset_caret(target);
        }

        if self.prompt.is_empty() {
            self.timeline.schedule(start, Lane::Prompt, Action::PromptDone);
        } else {
            self.timeline.schedule(self.prompt.first_due(start), Lane::Prompt, Action::PromptChar);
        }
    }

    /// The "generate" action. Returns whether it was accepted.
    ///
    /// Ignored once the prompt overlay is hidden or the sequence has moved
    /// past the prompt. A trigger during typing is held until the prompt
    /// has finished.
    pub fn trigger(&mut self, now: Millis) -> bool {
        if let Some(overlay) = &self.regions.prompt_overlay {
            if self.page.has_class(overlay, class::HIDDEN) {
                return false;
            }
        }

        match self.phase {
            Phase::AwaitingTrigger => {
                self.begin_loading(now);
                true
            }
            Phase::PromptTyping if !self.trigger_pending => {
                log::debug!("generate requested while typing, deferring");
                self.trigger_pending = true;
                self.disable_generate();
                true
            }
            _ => false,
        }
    }

    /// Jump to the finished page, dropping everything still scheduled.
    /// Returns false if the sequence had already finished.
    ///
    /// Whatever the sequence was in the middle of is settled: overlays are
    /// hidden, pending elements are shown and half-typed text is restored.
    pub fn skip(&mut self) -> bool {
        if self.phase == Phase::Done {
            return false;
        }
        log::info!("skipping intro from {:?}", self.phase);
        self.timeline = Timeline::new();
        self.trigger_pending = false;

        if let Some(overlay) = &self.regions.prompt_overlay {
            self.page.add_class(overlay, class::HIDDEN);
        }
        if let Some(overlay) = &self.regions.loading_overlay {
            self.page.add_class(overlay, class::HIDDEN);
        }
        if let Some(main) = &self.regions.main_content {
            self.page.add_class(main, class::VISIBLE);
        }
        if let Some(header) = &self.regions.response_header {
            self.page.add_class(header, class::VISIBLE);
        }

        for step in &self.steps {
            self.page.remove_class(&step.node, class::TYPEWRITER_HIDDEN);
            self.page.add_class(&step.node, class::TYPEWRITER_VISIBLE);
        }
        for TypingJob { node, writer } in self.jobs.drain(..) {
            if !writer.is_done() {
                self.page.set_text(&node, &writer.text());
                self.page.remove_class(&node, class::TYPING_CURSOR);
            }
        }

        self.phase = Phase::Done;
        true
    }

    /// Fire everything due at or before `now`.
    pub fn advance(&mut self, now: Millis) -> Progress {
        let mut finished = false;
        while let Some((due, action)) = self.timeline.pop_due(now) {
            if self.apply(due, action) {
                finished = true;
            }
        }

        if finished {
            Progress::Finished
        } else if self.timeline.is_empty() {
            Progress::Idle
        } else {
            Progress::Pending
        }
    }

    fn apply(&mut self, due: Millis, action: Action) -> bool {
        match action {
            Action::PromptChar => self.type_prompt_char(due),
            Action::PromptDone => self.prompt_done(due),
            Action::ShowLoading => {
                if let Some(overlay) = &self.regions.loading_overlay {
                    self.page.add_class(overlay, class::ACTIVE);
                }
            }
            Action::LoadingMessage => self.show_message(due),
            Action::LoadingDone => self.loading_done(due),
            Action::ShowMain => {
                if let Some(main) = &self.regions.main_content {
                    self.page.add_class(main, class::VISIBLE);
                }
                self.timeline.schedule(due + self.config.header_delay, Lane::Content, Action::ShowHeader);
            }
            Action::ShowHeader => {
                if let Some(header) = &self.regions.response_header {
                    self.page.add_class(header, class::VISIBLE);
                }
                self.begin_elements(due);
            }
            Action::Reveal(i) => self.reveal(due, i),
            Action::TypeChar(job) => self.type_content_char(due, job),
            Action::RevealDone => {
                self.phase = Phase::Done;
                log::info!("syllabus generation complete");
                return true;
            }
        }
        false
    }

    // --- Stage 1 ---------------------------------------------------------

    fn type_prompt_char(&mut self, due: Millis) {
        let Some(ch) = self.prompt.advance() else { return };
        if let Some(target) = &self.regions.prompt_text {
            self.page.insert_before_caret(target, ch);
        }

        if self.prompt.is_done() {
            self.prompt_done(due);
        } else {
            self.timeline.schedule(due + self.prompt.interval(), Lane::Prompt, Action::PromptChar);
        }
    }

    fn prompt_done(&mut self, due: Millis) {
        if self.phase != Phase::PromptTyping {
            return;
        }
        log::info!("prompt typed");
        self.phase = Phase::AwaitingTrigger;

        if self.trigger_pending {
            self.trigger_pending = false;
            self.begin_loading(due);
        }
    }

    // --- Stage 2 ---------------------------------------------------------

    fn disable_generate(&self) {
        if let Some(button) = &self.regions.generate_button {
            self.page.disable(button);
        }
    }

    fn begin_loading(&mut self, now: Millis) {
        log::info!("loading");
        self.phase = Phase::Loading;
        self.disable_generate();

        if let Some(overlay) = &self.regions.prompt_overlay {
            self.page.add_class(overlay, class::HIDDEN);
        }

        let cfg = &self.config;
        log::debug!(
            "{} status message(s) fit in {} ms",
            self.messages.visible_within(cfg.loading_duration),
            cfg.loading_duration
        );
        self.timeline.schedule(now + cfg.loading_overlay_delay, Lane::Loading, Action::ShowLoading);
        self.timeline.schedule(now + cfg.loading_duration, Lane::Loading, Action::LoadingDone);
        if !self.messages.is_exhausted() {
            self.timeline.schedule(now + self.messages.offset(0), Lane::LoadingMessages, Action::LoadingMessage);
        }
    }

    fn show_message(&mut self, due: Millis) {
        let Some(msg) = self.messages.advance() else { return };
        if let Some(status) = &self.regions.loading_status {
            self.page.set_text(status, msg);
        }

        if !self.messages.is_exhausted() {
            let next = due + self.messages.interval();
            self.timeline.schedule(next, Lane::LoadingMessages, Action::LoadingMessage);
        }
    }

    fn loading_done(&mut self, due: Millis) {
        let dropped = self.timeline.cancel(Lane::LoadingMessages);
        if dropped > 0 {
            log::debug!("loading finished with {dropped} status update(s) still pending");
        }

        // Stage 3
        log::info!("revealing content");
        self.phase = Phase::RevealingContent;
        if let Some(overlay) = &self.regions.loading_overlay {
            self.page.add_class(overlay, class::HIDDEN);
        }
        self.timeline.schedule(due + self.config.main_content_delay, Lane::Content, Action::ShowMain);
    }

    // --- Stage 4 ---------------------------------------------------------

    fn begin_elements(&mut self, start: Millis) {
        self.steps = content::plan(&self.page, self.config.element_delay_unit);
        log::debug!("revealing {} element(s)", self.steps.len());

        for step in &self.steps {
            self.page.add_class(&step.node, class::TYPEWRITER_HIDDEN);
        }
        for (i, step) in self.steps.iter().enumerate() {
            self.timeline.schedule(start + step.delay, Lane::Content, Action::Reveal(i));
        }

        let end = start + content::completion_offset(&self.steps, self.config.reveal_buffer);
        self.timeline.schedule(end, Lane::Content, Action::RevealDone);
    }

    fn reveal(&mut self, due: Millis, i: usize) {
        let Some(step) = self.steps.get(i) else { return };
        let node = step.node.clone();
        self.page.remove_class(&node, class::TYPEWRITER_HIDDEN);
        self.page.add_class(&node, class::TYPEWRITER_VISIBLE);

        // Elements with markup inside are shown as-is.
        if !step.typewriter || self.page.has_child_elements(&node) {
            return;
        }

        let text = self.page.text(&node);
        self.page.set_text(&node, "");
        let writer = Typewriter::new(&text, self.config.content_typing_speed);
        if writer.is_empty() {
            return;
        }

        self.page.add_class(&node, class::TYPING_CURSOR);
        let first = writer.first_due(due);
        self.jobs.push(TypingJob { node, writer });
        self.timeline.schedule(first, Lane::Typing, Action::TypeChar(self.jobs.len() - 1));
    }

    fn type_content_char(&mut self, due: Millis, job: usize) {
        let Some(TypingJob { node, writer }) = self.jobs.get_mut(job) else { return };
        let Some(ch) = writer.advance() else { return };
        self.page.append_text(node, ch);

        if writer.is_done() {
            self.page.remove_class(node, class::TYPING_CURSOR);
        } else {
            let next = due + writer.interval();
            self.timeline.schedule(next, Lane::Typing, Action::TypeChar(job));
        }
    }
}
