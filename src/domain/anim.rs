/// Tick-driven animation state.
///
/// Nothing in here knows about wall time. Each helper advances by exactly one
/// step per `tick()`; the wizard's scheduler decides how often that happens
/// and cancels the ticking when the owning screen is left.

// ── Progress ramp ──

/// Percentage bar that climbs by `step` per tick and settles on `target`.
#[derive(Clone, Debug)]
pub struct ProgressRamp {
    value: u8,
    target: u8,
    step: u8,
}

impl ProgressRamp {
    /// `target` is clamped to 100, `step` to at least 1.
    pub fn new(target: u8, step: u8) -> Self {
        ProgressRamp {
            value: 0,
            target: target.min(100),
            step: step.max(1),
        }
    }

    /// Advance one step. Returns false once the target has been reached.
    pub fn tick(&mut self) -> bool {
        if self.value >= self.target {
            return false;
        }
        self.value = self.value.saturating_add(self.step).min(self.target);
        true
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_done(&self) -> bool {
        self.value >= self.target
    }
}

// ── Install sequence ──

#[derive(Clone, Debug)]
pub struct InstallItem {
    pub name: &'static str,
    pub target: u8,
    /// Shown as "∞" instead of a percentage once complete.
    pub infinite: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InstallStep {
    /// The current item's ramp moved.
    Ramping,
    /// Item `n` reached its target; dwell starts.
    ItemDone(usize),
    /// Waiting out the dwell before the next item starts.
    Dwelling,
    /// Last item finished. Reported exactly once.
    Finished,
    /// Already finished, nothing to do.
    Idle,
}

/// A queue of independent ramps run one after another.
///
/// Item `n + 1` does not start ramping until `dwell_ticks` ticks have passed
/// since item `n` settled.
#[derive(Clone, Debug)]
pub struct InstallSequence {
    items: Vec<InstallItem>,
    ramps: Vec<ProgressRamp>,
    current: usize,
    dwell_ticks: u32,
    dwell_left: u32,
    finished: bool,
}

impl InstallSequence {
    pub fn new(items: Vec<InstallItem>, step: u8, dwell_ticks: u32) -> Self {
        let ramps = items.iter().map(|it| ProgressRamp::new(it.target, step)).collect();
        InstallSequence {
            items,
            ramps,
            current: 0,
            dwell_ticks,
            dwell_left: 0,
            finished: false,
        }
    }

    pub fn tick(&mut self) -> InstallStep {
        if self.finished {
            return InstallStep::Idle;
        }
        if self.current >= self.items.len() {
            self.finished = true;
            return InstallStep::Finished;
        }

        if self.dwell_left > 0 {
            self.dwell_left -= 1;
            if self.dwell_left == 0 {
                return self.next_item();
            }
            return InstallStep::Dwelling;
        }

        let ramp = &mut self.ramps[self.current];
        ramp.tick();
        if !ramp.is_done() {
            return InstallStep::Ramping;
        }

        let done = self.current;
        if self.dwell_ticks == 0 {
            if self.next_item() == InstallStep::Finished {
                return InstallStep::Finished;
            }
        } else {
            self.dwell_left = self.dwell_ticks;
        }
        InstallStep::ItemDone(done)
    }

    fn next_item(&mut self) -> InstallStep {
        self.current += 1;
        if self.current >= self.items.len() {
            self.finished = true;
            InstallStep::Finished
        } else {
            InstallStep::Dwelling
        }
    }

    pub fn items(&self) -> &[InstallItem] {
        &self.items
    }

    pub fn ramp(&self, index: usize) -> Option<&ProgressRamp> {
        self.ramps.get(index)
    }

    /// Index of the item currently ramping or dwelling.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Items up to and including the current one are visible.
    pub fn is_visible(&self, index: usize) -> bool {
        index <= self.current
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// The `installing 2026.exe...` manifest.
pub fn install_manifest() -> Vec<InstallItem> {
    let item = |name, target, infinite| InstallItem { name, target, infinite };
    vec![
        item("hope.exe", 73, false),
        item("clarity.exe", 89, false),
        item("bravery.exe", 100, false),
        item("trust.exe", 100, false),
        item("play.exe", 100, false),
        item("levity.exe", 100, false),
        item("badassery.exe", 100, false),
        item("patience.exe", 31, false),
        item("faith.exe", 100, true),
    ]
}

// ── Typewriter ──

/// Reveals a string one character per tick.
#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    shown: usize,
    total: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let total = text.chars().count();
        Typewriter { text, shown: 0, total }
    }

    /// Append one character. Returns false when nothing was left to reveal.
    pub fn tick(&mut self) -> bool {
        if self.shown >= self.total {
            return false;
        }
        self.shown += 1;
        true
    }

    /// Skip straight to the full text.
    pub fn finish(&mut self) {
        self.shown = self.total;
    }

    pub fn visible(&self) -> &str {
        match self.shown.checked_sub(1) {
            Some(n) => reveal(&self.text).nth(n).unwrap_or(&self.text),
            None => "",
        }
    }

    pub fn full(&self) -> &str {
        &self.text
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.total
    }
}

/// Every successive prefix of `text`, one more character each, ending with
/// the full string.
pub fn reveal(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.char_indices().map(move |(i, c)| &text[..i + c.len_utf8()])
}

// ── Bounce ──

/// Decorative sprite bouncing inside a box. Elastic, no damping.
#[derive(Clone, Debug)]
pub struct Bouncer {
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
    max_x: i32,
    max_y: i32,
}

impl Bouncer {
    /// `area` is the box size, `sprite` the sprite size; the sprite's
    /// top-left corner stays within `0..=area - sprite`.
    pub fn new(x: i32, y: i32, vx: i32, vy: i32, area: (i32, i32), sprite: (i32, i32)) -> Self {
        let mut b = Bouncer { x, y, vx, vy, max_x: 0, max_y: 0 };
        b.set_area(area, sprite);
        b
    }

    pub fn set_area(&mut self, area: (i32, i32), sprite: (i32, i32)) {
        self.max_x = (area.0 - sprite.0).max(0);
        self.max_y = (area.1 - sprite.1).max(0);
        self.x = self.x.clamp(0, self.max_x);
        self.y = self.y.clamp(0, self.max_y);
    }

    pub fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x <= 0 {
            self.x = 0;
            self.vx = self.vx.abs();
        } else if self.x >= self.max_x {
            self.x = self.max_x;
            self.vx = -self.vx.abs();
        }

        if self.y <= 0 {
            self.y = 0;
            self.vy = self.vy.abs();
        } else if self.y >= self.max_y {
            self.y = self.max_y;
            self.vy = -self.vy.abs();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Ramp ──

    #[test]
    fn ramp_to_100_by_2_takes_50_ticks() {
        let mut r = ProgressRamp::new(100, 2);
        let mut increments = 0;
        while r.tick() {
            increments += 1;
            assert!(r.value() <= 100);
        }
        assert_eq!(increments, 50);
        assert_eq!(r.value(), 100);
        assert!(!r.tick());
        assert_eq!(r.value(), 100);
    }

    #[test]
    fn ramp_never_overshoots_uneven_target() {
        let mut r = ProgressRamp::new(31, 5);
        let mut last = 0;
        while r.tick() {
            assert!(r.value() > last, "must be strictly increasing");
            last = r.value();
        }
        assert_eq!(r.value(), 31);
    }

    #[test]
    fn ramp_target_clamped_to_100() {
        let mut r = ProgressRamp::new(250, 60);
        while r.tick() {}
        assert_eq!(r.value(), 100);
    }

    // ── Install sequence ──

    fn two_items() -> Vec<InstallItem> {
        vec![
            InstallItem { name: "a.exe", target: 4, infinite: false },
            InstallItem { name: "b.exe", target: 2, infinite: true },
        ]
    }

    #[test]
    fn next_item_waits_for_dwell() {
        let mut seq = InstallSequence::new(two_items(), 2, 3);
        assert_eq!(seq.tick(), InstallStep::Ramping);
        assert_eq!(seq.tick(), InstallStep::ItemDone(0));
        assert!(!seq.is_visible(1));

        // Dwell: b must not move yet.
        assert_eq!(seq.tick(), InstallStep::Dwelling);
        assert_eq!(seq.tick(), InstallStep::Dwelling);
        assert_eq!(seq.ramp(1).map(|r| r.value()), Some(0));

        // Dwell over: b becomes current but has not ticked.
        assert_eq!(seq.tick(), InstallStep::Dwelling);
        assert_eq!(seq.current(), 1);
        assert_eq!(seq.ramp(1).map(|r| r.value()), Some(0));

        assert_eq!(seq.tick(), InstallStep::ItemDone(1));
        assert_eq!(seq.tick(), InstallStep::Dwelling);
        assert_eq!(seq.tick(), InstallStep::Dwelling);
        assert_eq!(seq.tick(), InstallStep::Finished);
        assert_eq!(seq.tick(), InstallStep::Idle);
        assert!(seq.is_finished());
    }

    #[test]
    fn zero_dwell_finishes_on_last_item() {
        let mut seq = InstallSequence::new(two_items(), 10, 0);
        assert_eq!(seq.tick(), InstallStep::ItemDone(0));
        assert_eq!(seq.current(), 1);
        assert_eq!(seq.tick(), InstallStep::Finished);
        assert_eq!(seq.tick(), InstallStep::Idle);
    }

    #[test]
    fn manifest_stops_patience_at_31() {
        let mut seq = InstallSequence::new(install_manifest(), 5, 1);
        let mut guard = 0;
        while !seq.is_finished() {
            seq.tick();
            guard += 1;
            assert!(guard < 10_000);
        }
        let patience = seq.items().iter().position(|i| i.name == "patience.exe").unwrap();
        assert_eq!(seq.ramp(patience).unwrap().value(), 31);
    }

    // ── Typewriter ──

    #[test]
    fn typewriter_hi_two_ticks() {
        let mut tw = Typewriter::new("hi");
        assert_eq!(tw.visible(), "");
        let mut frames = Vec::new();
        for _ in 0..2 {
            tw.tick();
            frames.push(tw.visible().to_string());
        }
        assert_eq!(frames, vec!["h", "hi"]);
        assert!(!tw.tick());
        assert_eq!(tw.visible(), "hi");
        assert!(tw.is_done());
    }

    #[test]
    fn reveal_yields_prefixes() {
        let frames: Vec<&str> = reveal("hi").collect();
        assert_eq!(frames, vec!["h", "hi"]);
    }

    #[test]
    fn typewriter_handles_multibyte() {
        let mut tw = Typewriter::new("∞ok");
        tw.tick();
        assert_eq!(tw.visible(), "∞");
        tw.finish();
        assert_eq!(tw.visible(), "∞ok");
    }

    // ── Bounce ──

    #[test]
    fn bounce_flips_x_at_right_edge() {
        let mut b = Bouncer::new(8, 5, 1, 1, (20, 20), (10, 1));
        b.step();
        assert_eq!(b.x, 9);
        b.step();
        assert_eq!(b.x, 10);
        assert_eq!(b.vx, -1);
        b.step();
        assert_eq!(b.x, 9);
    }

    #[test]
    fn bounce_flips_y_at_top() {
        let mut b = Bouncer::new(5, 1, 0, -1, (20, 10), (3, 1));
        b.step();
        assert_eq!(b.y, 0);
        assert_eq!(b.vy, 1);
        b.step();
        assert_eq!(b.y, 1);
    }

    #[test]
    fn bounce_keeps_speed() {
        let mut b = Bouncer::new(0, 0, 2, 1, (7, 4), (1, 1));
        for _ in 0..100 {
            b.step();
            assert_eq!(b.vx.abs(), 2);
            assert_eq!(b.vy.abs(), 1);
            assert!((0..=6).contains(&b.x));
            assert!((0..=3).contains(&b.y));
        }
    }
}
