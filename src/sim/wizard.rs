/// Wizard controller: the single owner of all application state.
///
/// ## Transitions
///
/// `advance(target, message)` leaves the current screen immediately
/// (cancelling every timer that screen started), shows the loading
/// interstitial, and after `interstitial_ms` enters `target`. Only one
/// transition is ever pending: issuing another replaces it.
///
/// ## Timers
///
/// Screen timers are scoped to the visit (`Scope::Screen(epoch)`). The epoch
/// bumps on every entry, so a timer that somehow survives its screen is
/// recognised as stale and ignored.
///
/// ## Input
///
/// The frame loop translates terminal events into `UserInput` and calls
/// `handle`. Priority: quit > console toggle > open console > interstitial
/// (swallows input) > open dialog > the current screen.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::TimingConfig;
use crate::domain::anim::{Bouncer, InstallStep};
use crate::domain::console::{ConsoleOutcome, ConsoleSession};
use crate::domain::desktop::{DropOutcome, Rejection};
use crate::domain::geometry::Point;
use crate::domain::screen::{
    cascade_delay_ms, ScreenId, Trigger, CASCADE_ERRORS, CASCADE_HOLD_MS, LESSON_ALERT,
    LESSON_CHOICES,
};
use crate::sim::event::WizardEvent;
use crate::sim::scene::{Scene, MAX_ANSWER, MAX_NAME};
use crate::sim::timer::{Fired, Scheduler, Scope, TimerId};

pub const DEFAULT_LOADING: &str = "loading...";

/// Easter-egg sprite.
pub const EGG_SPRITE: &str = "[2026.exe]";

/// Key that reveals the easter egg.
pub const EGG_KEY: char = '*';

// ── State ──

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interstitial {
    pub target: ScreenId,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct WizardState {
    pub current: ScreenId,
    pub user_name: String,
    /// `Some` while the loading interstitial is showing.
    pub loading: Option<Interstitial>,
}

impl WizardState {
    fn new() -> Self {
        WizardState {
            current: ScreenId::Intro,
            user_name: String::new(),
            loading: None,
        }
    }
}

/// What happens when a dialog is acknowledged.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AfterDialog {
    Stay,
    AdvanceNext,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
    pub after: AfterDialog,
}

/// Terminal-independent input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UserInput {
    Char(char),
    Backspace,
    Delete,
    Enter,
    Esc,
    Tab,
    BackTab,
    ToggleConsole,
    /// Pointer positions are desktop-local cells.
    PointerDown(Point),
    PointerDrag(Point),
    PointerUp(Point),
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Timeout {
    Settle,
    /// The screen's own `Trigger::Timer` elapsed.
    AutoAdvance,
    RampTick,
    TypeTick,
    CascadeNext,
    CascadeDone,
    InstallTick,
    SweepTick,
    BlinkTick,
    BounceTick,
}

pub struct Wizard {
    state: WizardState,
    scene: Scene,
    timing: TimingConfig,
    timers: Scheduler<Timeout>,
    epoch: u64,
    dialog: Option<Dialog>,
    console: ConsoleSession,
    console_open: bool,
    egg: Option<Bouncer>,
    anim_tick: u32,
    viewport: (i32, i32),
    rng: StdRng,
    events: Vec<WizardEvent>,
    quit: bool,
}

impl Wizard {
    pub fn new(timing: TimingConfig) -> Self {
        Self::with_rng(timing, StdRng::from_entropy())
    }

    pub fn with_rng(timing: TimingConfig, rng: StdRng) -> Self {
        let mut w = Wizard {
            state: WizardState::new(),
            scene: Scene::Intro,
            timing,
            timers: Scheduler::new(),
            epoch: 0,
            dialog: None,
            console: ConsoleSession::new(),
            console_open: false,
            egg: None,
            anim_tick: 0,
            viewport: (80, 24),
            rng,
            events: Vec::new(),
            quit: false,
        };
        w.enter_screen(ScreenId::Intro);
        w
    }

    // ── Accessors ──

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current(&self) -> ScreenId {
        self.state.current
    }

    /// The current screen, or `None` while a transition is in flight.
    pub fn settled_screen(&self) -> Option<ScreenId> {
        match self.state.loading {
            Some(_) => None,
            None => Some(self.state.current),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading.is_some()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn console(&self) -> &ConsoleSession {
        &self.console
    }

    pub fn console_open(&self) -> bool {
        self.console_open
    }

    pub fn egg(&self) -> Option<&Bouncer> {
        self.egg.as_ref()
    }

    pub fn anim_tick(&self) -> u32 {
        self.anim_tick
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn drain_events(&mut self) -> Vec<WizardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Terminal size in cells; bounds the easter-egg icon.
    pub fn set_viewport(&mut self, w: i32, h: i32) {
        self.viewport = (w, h);
        if let Some(egg) = &mut self.egg {
            egg.set_area((w, h), (EGG_SPRITE.chars().count() as i32, 1));
        }
    }

    // ── Transitions ──

    /// Leave the current screen and, after the interstitial delay, enter
    /// `target`. Any target is accepted.
    pub fn advance(&mut self, target: ScreenId, message: Option<&str>) {
        self.exit_screen();
        if self.timers.cancel_scope(Scope::Transition) > 0 {
            debug!(to = target.tag(), "pending transition replaced");
        }

        let message = message
            .or_else(|| target.loading_message())
            .unwrap_or(DEFAULT_LOADING)
            .to_string();
        info!(from = self.state.current.tag(), to = target.tag(), %message, "transition issued");

        self.events.push(WizardEvent::TransitionStarted {
            from: self.state.current,
            to: target,
        });
        self.state.loading = Some(Interstitial { target, message });
        self.timers.after(Scope::Transition, self.timing.interstitial_ms, Timeout::Settle);
    }

    fn advance_next(&mut self) {
        if let Some(next) = self.state.current.next() {
            self.advance(next, None);
        }
    }

    fn exit_screen(&mut self) {
        let dropped = self.timers.cancel_scope(Scope::Screen(self.epoch));
        debug!(screen = self.state.current.tag(), timers = dropped, "screen exited");
        self.dialog = None;
    }

    fn settle(&mut self) {
        let Some(Interstitial { target, .. }) = self.state.loading.take() else {
            return;
        };
        self.state.current = target;
        self.enter_screen(target);
    }

    fn enter_screen(&mut self, screen: ScreenId) {
        self.epoch += 1;
        let scope = Scope::Screen(self.epoch);
        let dwell_ticks = (self.timing.install_dwell_ms / self.timing.ramp_ms) as u32;
        self.scene = Scene::build(screen, &self.state.user_name, dwell_ticks, &mut self.rng);

        let t = self.timing.clone();
        match &self.scene {
            Scene::Intro => {
                self.timers.every(scope, t.blink_ms, Timeout::BlinkTick);
            }
            Scene::Preparing { .. } => {
                self.timers.every(scope, t.ramp_ms, Timeout::RampTick);
            }
            Scene::Step { .. } => {
                self.timers.every(scope, t.typewriter_ms, Timeout::TypeTick);
            }
            Scene::Cascade { .. } => {
                self.timers.after(scope, cascade_delay_ms(0), Timeout::CascadeNext);
            }
            Scene::Installing(_) => {
                self.timers.every(scope, t.ramp_ms, Timeout::InstallTick);
            }
            Scene::Final { .. } => {
                self.timers.every(scope, t.typewriter_ms, Timeout::TypeTick);
                self.timers.every(scope, t.blink_ms, Timeout::BlinkTick);
            }
            Scene::UserId | Scene::Desktop { .. } | Scene::Transition | Scene::Intention { .. } => {}
        }

        if let Trigger::Timer(ms) = screen.trigger() {
            self.timers.after(scope, ms, Timeout::AutoAdvance);
        }
        if let Some((title, message)) = screen.entry_error() {
            self.open_dialog(title, message, AfterDialog::Stay);
        }

        info!(screen = screen.tag(), epoch = self.epoch, "screen entered");
        self.events.push(WizardEvent::ScreenEntered(screen));
    }

    /// Throw everything away and start over at the intro.
    pub fn reset(&mut self) {
        info!(from = self.state.current.tag(), "application reset");
        let timing = self.timing.clone();
        let rng = StdRng::from_rng(&mut self.rng).unwrap_or_else(|_| StdRng::from_entropy());
        let viewport = self.viewport;
        self.timers.clear();
        *self = Wizard::with_rng(timing, rng);
        self.viewport = viewport;
        self.events.push(WizardEvent::Reset);
    }

    // ── Time ──

    /// Advance the virtual clock by `elapsed_ms`, firing due timers in order.
    pub fn tick(&mut self, elapsed_ms: u64) {
        let until = self.timers.now() + elapsed_ms;
        while let Some(fired) = self.timers.pop_due(until) {
            self.on_timer(fired);
        }
        self.timers.settle(until);
    }

    fn on_timer(&mut self, fired: Fired<Timeout>) {
        if let Scope::Screen(epoch) = fired.scope {
            if epoch != self.epoch || self.state.loading.is_some() {
                debug!(payload = ?fired.payload, epoch, at = fired.at, "stale timer ignored");
                self.timers.cancel(fired.id);
                return;
            }
        }

        match fired.payload {
            Timeout::Settle => self.settle(),
            Timeout::AutoAdvance => self.advance_next(),
            Timeout::RampTick => {
                if let Scene::Preparing { ramp } = &mut self.scene {
                    if !ramp.tick() {
                        self.timers.cancel(fired.id);
                    }
                }
            }
            Timeout::TypeTick => {
                if let Some(tw) = self.scene.typewriter_mut() {
                    if !tw.tick() {
                        self.timers.cancel(fired.id);
                    }
                }
            }
            Timeout::CascadeNext => self.cascade_next(),
            Timeout::CascadeDone => self.advance_next(),
            Timeout::InstallTick => self.install_tick(fired.id),
            Timeout::SweepTick => self.sweep_tick(fired.id),
            Timeout::BlinkTick => self.anim_tick = self.anim_tick.wrapping_add(1),
            Timeout::BounceTick => {
                if let Some(egg) = &mut self.egg {
                    egg.step();
                }
            }
        }
    }

    fn cascade_next(&mut self) {
        let Scene::Cascade { index } = &mut self.scene else { return };
        *index += 1;
        let index = *index;
        let scope = Scope::Screen(self.epoch);
        if index < CASCADE_ERRORS.len() {
            self.events.push(WizardEvent::ErrorPopped(index));
            self.timers.after(scope, cascade_delay_ms(index), Timeout::CascadeNext);
        } else {
            self.timers.after(scope, CASCADE_HOLD_MS, Timeout::CascadeDone);
        }
    }

    fn install_tick(&mut self, id: TimerId) {
        let Scene::Installing(seq) = &mut self.scene else { return };
        match seq.tick() {
            InstallStep::ItemDone(i) => {
                debug!(item = seq.items()[i].name, "install item done");
                self.events.push(WizardEvent::InstallItemDone(i));
            }
            InstallStep::Finished => {
                self.timers.cancel(id);
                info!("install sequence finished");
                self.advance_next();
            }
            InstallStep::Ramping | InstallStep::Dwelling | InstallStep::Idle => {}
        }
    }

    fn sweep_tick(&mut self, id: TimerId) {
        let Scene::Desktop { desktop, sweeping } = &mut self.scene else { return };
        let outcome = desktop.sweep_one();
        if !desktop.should_sweep() {
            *sweeping = false;
            self.timers.cancel(id);
        }
        if let Some(outcome) = outcome {
            debug!("auto-sweep removed a file");
            self.on_drop(outcome);
        }
    }

    // ── Input ──

    pub fn handle(&mut self, input: UserInput) {
        match input {
            UserInput::Quit => {
                self.quit = true;
                return;
            }
            UserInput::ToggleConsole => {
                self.console_open = !self.console_open;
                self.events.push(WizardEvent::ConsoleToggled(self.console_open));
                return;
            }
            _ => {}
        }

        if self.console_open {
            self.console_input(input);
            return;
        }
        if self.state.loading.is_some() {
            return;
        }
        if self.dialog.is_some() {
            self.dialog_input(input);
            return;
        }
        if input == UserInput::Char(EGG_KEY) && !self.is_text_entry() {
            self.toggle_egg();
            return;
        }

        self.screen_input(input);
    }

    fn is_text_entry(&self) -> bool {
        matches!(self.scene, Scene::UserId | Scene::Intention { .. })
    }

    fn console_input(&mut self, input: UserInput) {
        match input {
            UserInput::Char(c) => self.console.input.push(c),
            UserInput::Backspace => {
                self.console.input.pop();
            }
            UserInput::Esc => {
                self.console_open = false;
                self.events.push(WizardEvent::ConsoleToggled(false));
            }
            UserInput::Enter => {
                let line = self.console.input.trim().to_string();
                debug!(command = %line, "console command");
                self.events.push(WizardEvent::ConsoleCommand);
                match self.console.submit() {
                    ConsoleOutcome::Answered | ConsoleOutcome::Cleared => {}
                    ConsoleOutcome::Reset => self.reset(),
                }
            }
            _ => {}
        }
    }

    fn dialog_input(&mut self, input: UserInput) {
        let ack = matches!(
            input,
            UserInput::Enter | UserInput::Esc | UserInput::Char(' ') | UserInput::PointerDown(_)
        );
        if !ack {
            return;
        }
        let Some(dialog) = self.dialog.take() else { return };
        self.events.push(WizardEvent::DialogDismissed);
        if dialog.after == AfterDialog::AdvanceNext {
            self.advance_next();
        }
    }

    fn open_dialog(&mut self, title: &str, message: &str, after: AfterDialog) {
        self.dialog = Some(Dialog {
            title: title.to_string(),
            message: message.to_string(),
            after,
        });
        self.events.push(WizardEvent::DialogOpened);
    }

    fn toggle_egg(&mut self) {
        if self.egg.take().is_some() {
            self.timers.cancel_scope(Scope::Overlay);
            self.events.push(WizardEvent::EggToggled(false));
            return;
        }
        let sprite = (EGG_SPRITE.chars().count() as i32, 1);
        self.egg = Some(Bouncer::new(0, 0, 2, 1, self.viewport, sprite));
        self.timers.every(Scope::Overlay, self.timing.bounce_ms, Timeout::BounceTick);
        info!("easter egg found");
        self.events.push(WizardEvent::EggToggled(true));
    }

    fn screen_input(&mut self, input: UserInput) {
        let confirm = matches!(input, UserInput::Enter | UserInput::PointerDown(_));
        let trigger = self.state.current.trigger();

        match &mut self.scene {
            Scene::Intro => {
                // Any key or click; drag and release are the tail of a click.
                if !matches!(input, UserInput::PointerDrag(_) | UserInput::PointerUp(_)) {
                    self.advance_next();
                }
            }
            Scene::Preparing { .. } | Scene::Cascade { .. } | Scene::Installing(_) => {}
            Scene::UserId => match input {
                UserInput::Char(c) if !c.is_control() => {
                    if self.state.user_name.chars().count() < MAX_NAME {
                        self.state.user_name.push(c);
                    }
                }
                UserInput::Backspace => {
                    self.state.user_name.pop();
                }
                UserInput::Enter if !self.state.user_name.trim().is_empty() => {
                    info!("user identified");
                    self.advance_next();
                }
                _ => {}
            },
            Scene::Step { body } => {
                if trigger == Trigger::Choice {
                    let choice = match input {
                        UserInput::Char(c @ '1'..='3') => Some(c as usize - '1' as usize),
                        UserInput::Enter => Some(0),
                        _ => None,
                    };
                    if let Some(i) = choice {
                        debug!(choice = LESSON_CHOICES[i], "lessons saved");
                        self.open_dialog("Save Lessons", LESSON_ALERT, AfterDialog::AdvanceNext);
                    }
                    return;
                }
                match input {
                    UserInput::Char(' ') => body.finish(),
                    _ if confirm => self.advance_next(),
                    _ => {}
                }
            }
            Scene::Desktop { .. } => self.desktop_input(input),
            Scene::Transition => {
                if confirm {
                    self.advance_next();
                }
            }
            Scene::Intention { answer } => match input {
                UserInput::Char(c) if !c.is_control() => {
                    if answer.chars().count() < MAX_ANSWER {
                        answer.push(c);
                    }
                }
                UserInput::Backspace => {
                    answer.pop();
                }
                // The answer is dropped with the scene; nothing keeps it.
                UserInput::Enter | UserInput::Esc => self.advance_next(),
                _ => {}
            },
            Scene::Final { consulted, .. } => match input {
                UserInput::Char('c') | UserInput::Char('C') => {
                    *consulted = true;
                    self.events.push(WizardEvent::FortuneConsulted);
                }
                UserInput::Char('q') | UserInput::Char('Q') | UserInput::Esc => self.quit = true,
                _ => {}
            },
        }
    }

    fn desktop_input(&mut self, input: UserInput) {
        let Scene::Desktop { desktop, .. } = &mut self.scene else { return };
        let outcome = match input {
            UserInput::PointerDown(p) => {
                desktop.pick_at(p);
                None
            }
            UserInput::PointerDrag(p) => {
                desktop.drag_to(p);
                None
            }
            UserInput::PointerUp(p) => Some(desktop.release(p)),
            UserInput::Tab => {
                desktop.select_next();
                None
            }
            UserInput::BackTab => {
                desktop.select_prev();
                None
            }
            UserInput::Delete | UserInput::Backspace => Some(desktop.trash_selected()),
            UserInput::Enter => {
                if desktop.completion_signalled() {
                    self.advance_next();
                }
                None
            }
            _ => None,
        };
        if let Some(outcome) = outcome {
            self.on_drop(outcome);
        }
    }

    fn on_drop(&mut self, outcome: DropOutcome) {
        match outcome {
            DropOutcome::Removed { id, completed } => {
                info!(%id, completed, "file trashed");
                self.events.push(WizardEvent::FileTrashed { id });
                if completed {
                    info!("desktop cleared");
                    self.events.push(WizardEvent::DesktopCleared);
                }
                self.maybe_start_sweep();
            }
            DropOutcome::Rejected(Rejection { title, message }) => {
                let label = title.trim_start_matches("Error deleting ").to_string();
                info!(%label, "protected file refused");
                self.events.push(WizardEvent::AccessDenied { label });
                self.open_dialog(&title, &message, AfterDialog::Stay);
            }
            DropOutcome::Missed | DropOutcome::Ignored => {}
        }
    }

    fn maybe_start_sweep(&mut self) {
        let Scene::Desktop { desktop, sweeping } = &mut self.scene else { return };
        if !*sweeping && desktop.should_sweep() {
            *sweeping = true;
            debug!(by_hand = desktop.user_removals(), "auto-sweep started");
            self.timers.every(Scope::Screen(self.epoch), self.timing.sweep_ms, Timeout::SweepTick);
        }
    }

    #[cfg(test)]
    fn pending_timers(&self) -> usize {
        self.timers.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::desktop::{Category, TRASH_ZONE};
    use crate::domain::fortune::FORTUNES;
    use crate::domain::screen::PREPARING_MS;
    use std::collections::HashSet;

    fn timing() -> TimingConfig {
        TimingConfig::default()
    }

    fn wizard() -> Wizard {
        Wizard::with_rng(timing(), StdRng::seed_from_u64(42))
    }

    /// Advance with `advance` and wait out the interstitial.
    fn jump(w: &mut Wizard, to: ScreenId) {
        w.advance(to, None);
        w.tick(timing().interstitial_ms);
        assert_eq!(w.settled_screen(), Some(to));
    }

    fn enter(w: &mut Wizard) {
        w.handle(UserInput::Enter);
        w.tick(timing().interstitial_ms);
    }

    fn type_str(w: &mut Wizard, s: &str) {
        for c in s.chars() {
            w.handle(UserInput::Char(c));
        }
    }

    // ── State machine ──

    #[test]
    fn starts_settled_on_intro() {
        let w = wizard();
        assert_eq!(w.settled_screen(), Some(ScreenId::Intro));
        assert!(!w.is_loading());
    }

    #[test]
    fn advance_settles_after_delay_without_intermediate_screen() {
        let mut w = wizard();
        jump(&mut w, ScreenId::Intention);

        w.advance(ScreenId::Final, Some("finalizing..."));
        assert!(w.is_loading());
        assert_eq!(w.state().loading.as_ref().map(|l| l.message.as_str()), Some("finalizing..."));

        let mut settled = Vec::new();
        for _ in 0..(timing().interstitial_ms / 100) {
            w.tick(100);
            if let Some(s) = w.settled_screen() {
                settled.push(s);
            }
        }
        assert_eq!(settled, vec![ScreenId::Final]);
        assert_eq!(w.current(), ScreenId::Final);
        assert!(w.state().loading.is_none());
    }

    #[test]
    fn not_settled_one_ms_early() {
        let mut w = wizard();
        w.advance(ScreenId::Transition, None);
        w.tick(timing().interstitial_ms - 1);
        assert_eq!(w.settled_screen(), None);
        assert_eq!(w.current(), ScreenId::Intro);
        w.tick(1);
        assert_eq!(w.settled_screen(), Some(ScreenId::Transition));
    }

    #[test]
    fn default_loading_message_per_target() {
        let mut w = wizard();
        w.advance(ScreenId::WizardB, None);
        assert_eq!(w.state().loading.as_ref().unwrap().message, DEFAULT_LOADING);
        w.advance(ScreenId::Installing, None);
        assert_eq!(
            w.state().loading.as_ref().unwrap().message,
            "preparing to install 2026.exe..."
        );
    }

    #[test]
    fn second_advance_replaces_pending() {
        let mut w = wizard();
        w.advance(ScreenId::WizardB, None);
        w.tick(1000);
        w.advance(ScreenId::WizardC, None);
        w.tick(1000);
        // The first settle would have been due now.
        assert_eq!(w.settled_screen(), None);
        w.tick(1000);
        assert_eq!(w.settled_screen(), Some(ScreenId::WizardC));
    }

    #[test]
    fn input_swallowed_during_interstitial() {
        let mut w = wizard();
        w.handle(UserInput::Enter);
        assert!(w.is_loading());
        w.handle(UserInput::Enter);
        w.tick(timing().interstitial_ms);
        assert_eq!(w.settled_screen(), Some(ScreenId::Preparing));
    }

    #[test]
    fn preparing_advances_by_itself() {
        let mut w = wizard();
        enter(&mut w);
        assert_eq!(w.current(), ScreenId::Preparing);
        w.tick(PREPARING_MS);
        assert!(w.is_loading());
        w.tick(timing().interstitial_ms);
        assert_eq!(w.settled_screen(), Some(ScreenId::UserId));
    }

    #[test]
    fn preparing_ramp_reaches_100_before_leaving() {
        let mut w = wizard();
        enter(&mut w);
        w.tick(PREPARING_MS - 1);
        match w.scene() {
            Scene::Preparing { ramp } => assert_eq!(ramp.value(), 100),
            _ => panic!("expected preparing scene"),
        }
    }

    #[test]
    fn leaving_a_screen_cancels_its_timers() {
        let mut w = wizard();
        jump(&mut w, ScreenId::Preparing);
        w.advance(ScreenId::Transition, None);
        // Only the settle is left.
        assert_eq!(w.pending_timers(), 1);
        w.tick(timing().interstitial_ms);
        // The auto-advance armed by Preparing must not drag us anywhere.
        w.tick(PREPARING_MS * 2);
        assert_eq!(w.settled_screen(), Some(ScreenId::Transition));
    }

    #[test]
    fn name_required_and_used() {
        let mut w = wizard();
        jump(&mut w, ScreenId::UserId);
        w.handle(UserInput::Enter);
        assert!(!w.is_loading(), "blank name must not advance");
        type_str(&mut w, "  ");
        w.handle(UserInput::Enter);
        assert!(!w.is_loading());
        type_str(&mut w, "sam");
        w.handle(UserInput::Backspace);
        type_str(&mut w, "m");
        enter(&mut w);
        assert_eq!(w.current(), ScreenId::WizardA);
        assert_eq!(w.state().user_name.trim(), "sam");
        match w.scene() {
            Scene::Step { body } => assert!(body.full().starts_with("hi sam.")),
            _ => panic!("expected step"),
        }
    }

    #[test]
    fn user_name_stays_out_of_the_log() {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Capture {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let capture = Capture::default();
        let sink = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || sink.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut w = wizard();
            jump(&mut w, ScreenId::UserId);
            type_str(&mut w, "Zelda42");
            enter(&mut w);
            assert_eq!(w.current(), ScreenId::WizardA);
        });

        let log = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(log.contains("user identified"));
        assert!(!log.contains("Zelda42"));
    }

    #[test]
    fn intro_advances_on_any_key_or_click() {
        let inputs = [
            UserInput::Char('x'),
            UserInput::Enter,
            UserInput::Esc,
            UserInput::Tab,
            UserInput::BackTab,
            UserInput::Backspace,
            UserInput::Delete,
            UserInput::PointerDown(Point::new(3, 3)),
        ];
        for input in inputs {
            let mut w = wizard();
            w.handle(input);
            assert!(w.is_loading(), "{:?} should leave intro", input);
        }

        let mut w = wizard();
        w.handle(UserInput::PointerDrag(Point::new(3, 3)));
        w.handle(UserInput::PointerUp(Point::new(3, 3)));
        assert!(!w.is_loading());
    }

    #[test]
    fn name_length_is_capped() {
        let mut w = wizard();
        jump(&mut w, ScreenId::UserId);
        type_str(&mut w, &"x".repeat(100));
        assert_eq!(w.state().user_name.len(), MAX_NAME);
    }

    #[test]
    fn full_walk_through_reaches_final() {
        let mut w = wizard();
        enter(&mut w); // intro -> preparing
        w.tick(PREPARING_MS + timing().interstitial_ms);
        assert_eq!(w.current(), ScreenId::UserId);
        type_str(&mut w, "sam");
        enter(&mut w);

        for expected in [
            ScreenId::WizardA,
            ScreenId::WizardB,
            ScreenId::WizardC,
        ] {
            assert_eq!(w.settled_screen(), Some(expected));
            enter(&mut w);
        }

        // WizardD opens with an error dialog: first Enter dismisses it.
        assert_eq!(w.settled_screen(), Some(ScreenId::WizardD));
        assert!(w.dialog().is_some());
        w.handle(UserInput::Enter);
        assert!(w.dialog().is_none());
        assert!(!w.is_loading());
        enter(&mut w);

        for expected in [
            ScreenId::WizardE,
            ScreenId::WizardF,
            ScreenId::WizardG,
            ScreenId::WizardH,
            ScreenId::WizardI,
            ScreenId::DesktopIntro,
        ] {
            assert_eq!(w.settled_screen(), Some(expected));
            enter(&mut w);
        }

        // Desktop: Enter does nothing until cleared.
        assert_eq!(w.settled_screen(), Some(ScreenId::Desktop));
        w.handle(UserInput::Enter);
        assert!(!w.is_loading());
        clear_desktop(&mut w);
        enter(&mut w);

        // Lessons prompt: choice -> alert -> dismiss advances.
        assert_eq!(w.settled_screen(), Some(ScreenId::WizardK));
        w.handle(UserInput::Char('3'));
        assert_eq!(w.dialog().map(|d| d.message.as_str()), Some(LESSON_ALERT));
        enter(&mut w);

        assert_eq!(w.settled_screen(), Some(ScreenId::WizardL));
        enter(&mut w);

        // Cascade runs by itself.
        assert_eq!(w.settled_screen(), Some(ScreenId::WizardM));
        w.tick(60_000);
        assert_eq!(w.settled_screen(), Some(ScreenId::Transition));
        enter(&mut w);

        // Install runs by itself.
        assert_eq!(w.settled_screen(), Some(ScreenId::Installing));
        w.tick(120_000);
        assert_eq!(w.settled_screen(), Some(ScreenId::Intention));

        type_str(&mut w, "joy");
        enter(&mut w);
        assert_eq!(w.settled_screen(), Some(ScreenId::Final));

        // Terminal: nothing moves on.
        w.handle(UserInput::Enter);
        w.tick(60_000);
        assert_eq!(w.settled_screen(), Some(ScreenId::Final));
    }

    fn clear_desktop(w: &mut Wizard) {
        let mut guard = 0;
        loop {
            let Scene::Desktop { desktop, .. } = w.scene() else { panic!("not on desktop") };
            if desktop.completion_signalled() {
                break;
            }
            let id = desktop
                .items()
                .iter()
                .find(|i| i.category == Category::Removable)
                .map(|i| i.id.clone())
                .unwrap();
            let pos = desktop.items().iter().find(|i| i.id == id).unwrap().position;
            w.handle(UserInput::PointerDown(pos));
            w.handle(UserInput::PointerDrag(TRASH_ZONE.center()));
            w.handle(UserInput::PointerUp(TRASH_ZONE.center()));
            guard += 1;
            assert!(guard < 20);
        }
    }

    // ── Desktop ──

    #[test]
    fn desktop_completion_signalled_once() {
        let mut w = wizard();
        jump(&mut w, ScreenId::Desktop);
        w.drain_events();
        clear_desktop(&mut w);
        // Extra interaction after completion.
        w.handle(UserInput::Tab);
        w.handle(UserInput::Delete);
        w.handle(UserInput::Enter); // dismiss rejection dialog
        let cleared = w
            .drain_events()
            .into_iter()
            .filter(|e| *e == WizardEvent::DesktopCleared)
            .count();
        assert_eq!(cleared, 1);
    }

    #[test]
    fn protected_drop_opens_dialog() {
        let mut w = wizard();
        jump(&mut w, ScreenId::Desktop);
        let Scene::Desktop { desktop, .. } = w.scene() else { panic!() };
        let hope = desktop.items().iter().find(|i| i.label == "hope.exe").unwrap().position;
        w.handle(UserInput::PointerDown(hope));
        w.handle(UserInput::PointerUp(TRASH_ZONE.center()));
        let d = w.dialog().expect("dialog");
        assert_eq!(d.title, "Error deleting hope.exe");
        assert_eq!(d.after, AfterDialog::Stay);
        w.handle(UserInput::PointerDown(Point::new(0, 0)));
        assert!(w.dialog().is_none());
        assert_eq!(w.settled_screen(), Some(ScreenId::Desktop));
    }

    #[test]
    fn auto_sweep_finishes_the_job() {
        let mut w = wizard();
        jump(&mut w, ScreenId::Desktop);
        w.handle(UserInput::Delete); // "1"
        w.handle(UserInput::Delete); // "2"
        let Scene::Desktop { desktop, sweeping } = w.scene() else { panic!() };
        assert!(*sweeping);
        assert_eq!(desktop.removable_left(), 5);

        w.tick(timing().sweep_ms * 5);
        let Scene::Desktop { desktop, sweeping } = w.scene() else { panic!() };
        assert_eq!(desktop.removable_left(), 0);
        assert!(desktop.completion_signalled());
        assert!(!*sweeping);
        assert_eq!(w.pending_timers(), 0);
    }

    #[test]
    fn sweep_stops_when_desktop_left() {
        let mut w = wizard();
        jump(&mut w, ScreenId::Desktop);
        w.handle(UserInput::Delete);
        w.handle(UserInput::Delete);
        w.advance(ScreenId::WizardK, None);
        assert_eq!(w.pending_timers(), 1);
    }

    // ── Console ──

    #[test]
    fn console_captures_keys_and_toggles() {
        let mut w = wizard();
        w.handle(UserInput::ToggleConsole);
        assert!(w.console_open());
        type_str(&mut w, "HELP ");
        w.handle(UserInput::Enter);
        // Intro must not have advanced.
        assert!(!w.is_loading());
        assert!(w.console().history().last().unwrap().starts_with("commands:"));
        w.handle(UserInput::ToggleConsole);
        assert!(!w.console_open());
    }

    #[test]
    fn console_reset_restarts_everything() {
        let mut w = wizard();
        jump(&mut w, ScreenId::UserId);
        type_str(&mut w, "sam");
        w.handle(UserInput::ToggleConsole);
        type_str(&mut w, "hope");
        w.handle(UserInput::Enter);
        type_str(&mut w, "reset");
        w.handle(UserInput::Enter);
        assert_eq!(w.settled_screen(), Some(ScreenId::Intro));
        assert!(w.state().user_name.is_empty());
        assert!(!w.console_open());
        assert_eq!(w.console().history().len(), 1);
        assert!(w.drain_events().contains(&WizardEvent::Reset));
    }

    #[test]
    fn reset_mid_transition_drops_pending_settle() {
        let mut w = wizard();
        w.advance(ScreenId::Final, None);
        w.reset();
        w.tick(timing().interstitial_ms * 2);
        assert_eq!(w.settled_screen(), Some(ScreenId::Intro));
    }

    #[test]
    fn console_clear_empties_history() {
        let mut w = wizard();
        w.handle(UserInput::ToggleConsole);
        type_str(&mut w, "clear");
        w.handle(UserInput::Enter);
        assert!(w.console().history().is_empty());
    }

    // ── Final / fortune ──

    fn final_fortune(w: &Wizard) -> &'static str {
        match w.scene() {
            Scene::Final { fortune, .. } => fortune.text(),
            _ => panic!("not on final"),
        }
    }

    #[test]
    fn fortune_stable_across_consults() {
        let mut w = wizard();
        jump(&mut w, ScreenId::Final);
        let first = final_fortune(&w);
        for _ in 0..20 {
            w.handle(UserInput::Char('c'));
            w.tick(500);
            assert_eq!(final_fortune(&w), first);
        }
        assert!(matches!(w.scene(), Scene::Final { consulted: true, .. }));
    }

    #[test]
    fn fortune_covers_the_set_across_entries() {
        let mut w = wizard();
        let mut seen = HashSet::new();
        for _ in 0..400 {
            jump(&mut w, ScreenId::Final);
            seen.insert(final_fortune(&w));
        }
        assert_eq!(seen.len(), FORTUNES.len());
    }

    #[test]
    fn final_quits_on_q() {
        let mut w = wizard();
        jump(&mut w, ScreenId::Final);
        w.handle(UserInput::Char('q'));
        assert!(w.should_quit());
    }

    // ── Typewriter / egg ──

    #[test]
    fn step_body_types_out_and_stops_ticking() {
        let mut w = wizard();
        jump(&mut w, ScreenId::WizardB);
        let len = match w.scene() {
            Scene::Step { body } => body.full().chars().count() as u64,
            _ => panic!(),
        };
        w.tick(timing().typewriter_ms);
        match w.scene() {
            Scene::Step { body } => assert_eq!(body.visible().chars().count(), 1),
            _ => panic!(),
        }
        w.tick(timing().typewriter_ms * (len + 5));
        match w.scene() {
            Scene::Step { body } => assert!(body.is_done()),
            _ => panic!(),
        }
        assert_eq!(w.pending_timers(), 0);
    }

    #[test]
    fn space_skips_typing() {
        let mut w = wizard();
        jump(&mut w, ScreenId::WizardC);
        w.handle(UserInput::Char(' '));
        match w.scene() {
            Scene::Step { body } => assert!(body.is_done()),
            _ => panic!(),
        }
        assert!(!w.is_loading());
    }

    #[test]
    fn egg_bounces_across_screens_and_toggles_off() {
        let mut w = wizard();
        w.set_viewport(40, 10);
        w.handle(UserInput::Char(EGG_KEY));
        assert!(w.egg().is_some());
        // Intro ignores the egg key as an advance.
        assert!(!w.is_loading());
        w.tick(timing().bounce_ms * 3);
        assert_eq!(w.egg().map(|e| (e.x, e.y)), Some((6, 3)));

        jump(&mut w, ScreenId::WizardA);
        assert!(w.egg().is_some(), "egg is an overlay, not screen-owned");

        w.handle(UserInput::Char(EGG_KEY));
        assert!(w.egg().is_none());
    }

    #[test]
    fn egg_key_is_text_on_name_entry() {
        let mut w = wizard();
        jump(&mut w, ScreenId::UserId);
        w.handle(UserInput::Char(EGG_KEY));
        assert!(w.egg().is_none());
        assert_eq!(w.state().user_name, "*");
    }

    #[test]
    fn stale_epoch_timer_is_ignored() {
        let mut w = wizard();
        jump(&mut w, ScreenId::WizardM);
        // Plant a timer for an old visit, as if cancellation had been missed.
        let stale = Scope::Screen(w.epoch - 1);
        w.timers.after(stale, 10, Timeout::CascadeDone);
        w.tick(10);
        assert_eq!(w.settled_screen(), Some(ScreenId::WizardM));
    }

    #[test]
    fn cascade_reveals_errors_in_order() {
        let mut w = wizard();
        jump(&mut w, ScreenId::WizardM);
        assert_eq!(w.scene().cascade_visible(), 1);
        w.tick(cascade_delay_ms(0));
        assert_eq!(w.scene().cascade_visible(), 2);
        w.tick(cascade_delay_ms(1));
        assert_eq!(w.scene().cascade_visible(), 3);
    }

    #[test]
    fn intention_skip_with_esc() {
        let mut w = wizard();
        jump(&mut w, ScreenId::Intention);
        type_str(&mut w, "peace");
        w.handle(UserInput::Esc);
        w.tick(timing().interstitial_ms);
        assert_eq!(w.settled_screen(), Some(ScreenId::Final));
    }
}
