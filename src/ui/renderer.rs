/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// The renderer only reads the wizard. Overlays are drawn last, in order:
/// dialog, easter egg, console.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::anim::{InstallSequence, ProgressRamp, Typewriter};
use crate::domain::console::ConsoleSession;
use crate::domain::desktop::{Desktop, DESKTOP_H, DESKTOP_W};
use crate::domain::geometry::{Point, Rect};
use crate::domain::screen::{ScreenId, CASCADE_ERRORS, LESSON_CHOICES};
use crate::sim::scene::Scene;
use crate::sim::wizard::{Dialog, Wizard, EGG_SPRITE};

// ── Palette ──

const RED: Color = Color::Rgb { r: 255, g: 48, b: 48 };
const TEXT: Color = Color::Rgb { r: 230, g: 230, b: 230 };
const DIM: Color = Color::Rgb { r: 120, g: 120, b: 140 };
const PANEL: Color = Color::Rgb { r: 34, g: 34, b: 56 };
const SELECT: Color = Color::Rgb { r: 90, g: 40, b: 40 };
const EGG: Color = Color::Rgb { r: 255, g: 220, b: 50 };
const CONSOLE_BG: Color = Color::Rgb { r: 8, g: 8, b: 12 };
const CONSOLE_FG: Color = Color::Rgb { r: 80, g: 255, b: 80 };

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Scrolled under the preparing bar.
const TICKER: &str = "heartbreak waiting growing breaking learning loving losing finding planting seeds trusting timing crying laughing wanting hoping doubting believing ";

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for all "empty" terminal cells, so the
    /// inter-row gap on VTE terminals matches the cell colour.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell { ch: ' ', fg: TEXT, bg: Cell::BASE_BG };

    /// Sentinel used to invalidate the back buffer.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    /// Normalize bg: Color::Reset → BASE_BG.
    #[inline]
    fn norm_bg(bg: Color) -> Color {
        match bg {
            Color::Reset => Self::BASE_BG,
            other => other,
        }
    }

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg: Self::norm_bg(bg) }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    /// Out-of-bounds writes (including negative coordinates) are dropped.
    fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    fn put_str(&mut self, x: i32, y: i32, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, Cell::new(ch, fg, bg));
        }
    }

    fn put_centered(&mut self, y: i32, s: &str, fg: Color, bg: Color) {
        let x = (self.width as i32 - s.chars().count() as i32) / 2;
        self.put_str(x, y, s, fg, bg);
    }

    fn fill(&mut self, r: Rect, bg: Color) {
        for y in r.y..r.y + r.h {
            for x in r.x..r.x + r.w {
                self.set(x, y, Cell::new(' ', TEXT, bg));
            }
        }
    }

    /// Single-line box around `r` (the border sits on the rect's edge).
    fn frame(&mut self, r: Rect, fg: Color, bg: Color) {
        if r.w < 2 || r.h < 2 {
            return;
        }
        let (l, t, rt, b) = (r.x, r.y, r.right(), r.bottom());
        for x in l + 1..rt {
            self.set(x, t, Cell::new('─', fg, bg));
            self.set(x, b, Cell::new('─', fg, bg));
        }
        for y in t + 1..b {
            self.set(l, y, Cell::new('│', fg, bg));
            self.set(rt, y, Cell::new('│', fg, bg));
        }
        self.set(l, t, Cell::new('┌', fg, bg));
        self.set(rt, t, Cell::new('┐', fg, bg));
        self.set(l, b, Cell::new('└', fg, bg));
        self.set(rt, b, Cell::new('┘', fg, bg));
    }

    /// Window chrome: filled panel, border, red title bar with `title`.
    fn window(&mut self, r: Rect, title: &str) {
        self.fill(r, PANEL);
        self.frame(r, RED, PANEL);
        let bar = Rect::new(r.x + 1, r.y + 1, r.w - 2, 1);
        self.fill(bar, RED);
        self.put_str(bar.x + 1, bar.y, title, Color::White, RED);
        self.put_str(bar.right() - 2, bar.y, "x", Color::White, RED);
    }
}

// ── Layout helpers ──

/// Top-left terminal cell of the centred desktop.
pub fn desktop_origin(term_w: usize, term_h: usize) -> (i32, i32) {
    (
        ((term_w as i32 - DESKTOP_W) / 2).max(0),
        ((term_h as i32 - DESKTOP_H) / 2).max(0),
    )
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word.iter());
        line_len += word.len();
    }
    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// `[██████░░░░]`-style bar, `width` cells between the brackets.
pub fn bar(value: u8, width: usize) -> String {
    let filled = (value.min(100) as usize * width) / 100;
    let mut s = String::with_capacity(width + 2);
    s.push('[');
    s.extend(std::iter::repeat('█').take(filled));
    s.extend(std::iter::repeat('░').take(width - filled));
    s.push(']');
    s
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    /// Screen + loading flag of the previous frame; a change forces a clear.
    last_view: Option<(ScreenId, bool)>,
    /// Frames drawn; drives the spinner, caret and ticker.
    frame: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_view: None,
            frame: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.resize(tw, th);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    fn resize(&mut self, tw: u16, th: u16) {
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);
    }

    pub fn size(&self) -> (i32, i32) {
        (self.term_w as i32, self.term_h as i32)
    }

    /// Terminal cell → desktop-local cell.
    pub fn to_desktop(&self, col: u16, row: u16) -> Point {
        let (ox, oy) = desktop_origin(self.term_w, self.term_h);
        Point::new(col as i32 - ox, row as i32 - oy)
    }

    pub fn render(&mut self, w: &Wizard) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.resize(tw, th);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Detect screen change → clear for clean transition
        let view = (w.current(), w.is_loading());
        if self.last_view != Some(view) {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_view = Some(view);
        }

        self.frame = self.frame.wrapping_add(1);
        self.front.clear();

        match &w.state().loading {
            Some(loading) => self.compose_interstitial(&loading.message),
            None => self.compose_scene(w),
        }

        if let Some(dialog) = w.dialog() {
            self.compose_dialog(dialog);
        }
        if let Some(egg) = w.egg() {
            self.front.put_str(egg.x, egg.y, EGG_SPRITE, Color::Black, EGG);
        }
        if w.console_open() {
            self.compose_console(w.console());
        }

        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = TEXT;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Explicit base colours; ResetColor would fall back to the
        // terminal's own default.
        queue!(self.writer, SetForegroundColor(TEXT), SetBackgroundColor(Cell::BASE_BG))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn mid_row(&self, block_h: i32) -> i32 {
        ((self.term_h as i32 - block_h) / 2).max(0)
    }

    fn caret(&self) -> &'static str {
        if (self.frame / 30) % 2 == 0 { "_" } else { " " }
    }

    fn compose_scene(&mut self, w: &Wizard) {
        let screen = w.current();
        match w.scene() {
            Scene::Intro => self.compose_intro(w.anim_tick()),
            Scene::Preparing { ramp } => self.compose_preparing(ramp),
            Scene::UserId => self.compose_user_id(&w.state().user_name),
            Scene::Step { body } => self.compose_step(screen, body),
            Scene::Desktop { desktop, sweeping } => self.compose_desktop(desktop, *sweeping),
            Scene::Cascade { .. } => self.compose_cascade(w.scene().cascade_visible()),
            Scene::Transition => self.compose_transition(),
            Scene::Installing(seq) => self.compose_installing(seq),
            Scene::Intention { answer } => self.compose_intention(answer),
            Scene::Final { fortune, consulted, headline } => {
                let fortune = consulted.then(|| fortune.text());
                self.compose_final(headline, fortune, w.anim_tick());
            }
        }
    }

    fn compose_interstitial(&mut self, message: &str) {
        let y = self.mid_row(3);
        let spin = SPINNER[(self.frame / 6) as usize % SPINNER.len()];
        self.front.put_centered(y, message, TEXT, Color::Reset);
        self.front.put_centered(y + 2, &spin.to_string(), RED, Color::Reset);
    }

    fn compose_intro(&mut self, tick: u32) {
        let y = self.mid_row(7);
        self.front.put_centered(y, "U N I N S T A L L   2 0 2 5 . E X E", RED, Color::Reset);
        self.front.put_centered(y + 2, "are you ready to let go?", TEXT, Color::Reset);
        if tick % 2 == 0 {
            self.front.put_centered(y + 6, "press any key to begin", DIM, Color::Reset);
        }
    }

    fn compose_preparing(&mut self, ramp: &ProgressRamp) {
        let y = self.mid_row(6);
        self.front.put_centered(y, "preparing to uninstall 2025.exe...", TEXT, Color::Reset);

        let width = self.term_w.saturating_sub(8).min(60);
        let chars: Vec<char> = TICKER.chars().collect();
        let start = (self.frame / 4) as usize % chars.len();
        let ticker: String = chars.iter().cycle().skip(start).take(width).collect();
        self.front.put_centered(y + 2, &ticker, DIM, Color::Reset);

        let line = format!("{} {:>3}%", bar(ramp.value(), width.saturating_sub(7)), ramp.value());
        self.front.put_centered(y + 4, &line, RED, Color::Reset);
    }

    fn compose_user_id(&mut self, name: &str) {
        let y = self.mid_row(7);
        self.front.put_centered(y, "enter your name to continue:", TEXT, Color::Reset);
        let field = Rect::new((self.term_w as i32 - 30) / 2, y + 2, 30, 3);
        self.front.frame(field, RED, Color::Reset);
        let shown = format!("{}{}", name, self.caret());
        self.front.put_centered(y + 3, &shown, TEXT, Color::Reset);
        self.front.put_centered(y + 6, "[ continue ]  enter", DIM, Color::Reset);
    }

    fn compose_step(&mut self, screen: ScreenId, body: &Typewriter) {
        let Some(copy) = screen.step_copy() else { return };
        let win_w = (self.term_w as i32 - 4).clamp(20, 66);
        let text_w = (win_w - 6) as usize;
        let lines = wrap(body.visible(), text_w);
        let full_lines = wrap(body.full(), text_w).len() as i32;
        let win_h = 9 + full_lines;
        let r = Rect::new((self.term_w as i32 - win_w) / 2, self.mid_row(win_h), win_w, win_h);

        self.front.window(r, "Uninstall Wizard");
        self.front.put_str(r.x + 3, r.y + 3, copy.step, DIM, PANEL);
        self.front.put_str(r.x + 3, r.y + 4, copy.title, RED, PANEL);
        for (i, line) in lines.iter().enumerate() {
            self.front.put_str(r.x + 3, r.y + 6 + i as i32, line, TEXT, PANEL);
        }

        let button_y = r.bottom() - 1;
        if screen == ScreenId::WizardK {
            let choices: Vec<String> = LESSON_CHOICES
                .iter()
                .enumerate()
                .map(|(i, c)| format!("[{}] {}", i + 1, c))
                .collect();
            self.front.put_str(r.x + 3, button_y, &choices.join("  "), TEXT, PANEL);
        } else {
            let button = format!("[ {} ]", copy.button);
            let bx = r.right() - 2 - button.chars().count() as i32;
            self.front.put_str(bx, button_y, &button, Color::White, RED);
            if !body.is_done() {
                self.front.put_str(r.x + 3, button_y, "space: skip", DIM, PANEL);
            }
        }
    }

    fn compose_desktop(&mut self, desktop: &Desktop, sweeping: bool) {
        let (ox, oy) = desktop_origin(self.term_w, self.term_h);
        let area = Rect::new(ox - 1, oy - 1, DESKTOP_W + 2, DESKTOP_H + 2);
        self.front.fill(area, PANEL);
        self.front.frame(area, DIM, PANEL);
        self.front.put_str(area.x + 2, area.y, " desktop ", TEXT, PANEL);

        // Trash
        let t = desktop.target();
        let trash = Rect::new(ox + t.x, oy + t.y, t.w, t.h);
        self.front.frame(trash, RED, PANEL);
        self.front.put_str(trash.x + (t.w - 5) / 2, trash.y + t.h / 2, "TRASH", RED, PANEL);

        let selected = desktop.selected().map(|i| i.id.as_str());
        let dragging = desktop.dragging();
        for item in desktop.items() {
            let b = item.bounds();
            let (x, y) = (ox + b.x, oy + b.y);
            let bg = if Some(item.id.as_str()) == selected { SELECT } else { PANEL };
            let fg = if Some(item.id.as_str()) == dragging { RED } else { TEXT };
            self.front.put_str(x, y, "[==]", fg, bg);
            self.front.put_str(x, y + 1, &item.label, fg, bg);
        }

        let status = if desktop.completion_signalled() {
            "desktop cleaned. press enter to continue".to_string()
        } else if sweeping {
            format!("auto-cleaning... {} left", desktop.removable_left())
        } else {
            "drag files to the trash   tab: select   delete: trash".to_string()
        };
        self.front.put_centered(area.bottom() + 1, &status, DIM, Color::Reset);
    }

    fn compose_cascade(&mut self, visible: usize) {
        let win_w = (self.term_w as i32 - 12).clamp(20, 56);
        let base_x = (self.term_w as i32 - win_w) / 2 - 6;
        let base_y = self.mid_row(16);
        for (i, err) in CASCADE_ERRORS.iter().take(visible).enumerate() {
            let lines = wrap(err, (win_w - 6) as usize);
            let h = 6 + lines.len() as i32;
            let r = Rect::new(base_x + i as i32 * 3, base_y + i as i32 * 2, win_w, h);
            self.front.window(r, "Error");
            for (j, line) in lines.iter().enumerate() {
                self.front.put_str(r.x + 3, r.y + 3 + j as i32, line, TEXT, PANEL);
            }
            self.front.put_str(r.right() - 8, r.bottom() - 1, "[ ok ]", Color::White, RED);
        }
    }

    fn compose_transition(&mut self) {
        let y = self.mid_row(5);
        self.front.put_centered(y, "2025.exe successfully archived.", TEXT, Color::Reset);
        self.front.put_centered(y + 2, "preparing to install 2026.exe...", DIM, Color::Reset);
        self.front.put_centered(y + 4, "[ proceed ]  enter", Color::White, RED);
    }

    fn compose_installing(&mut self, seq: &InstallSequence) {
        let rows = seq.items().len() as i32;
        let y = self.mid_row(rows + 2);
        self.front.put_centered(y, "installing 2026.exe...", TEXT, Color::Reset);
        let x = (self.term_w as i32 - 50) / 2;
        for (i, item) in seq.items().iter().enumerate() {
            if !seq.is_visible(i) {
                continue;
            }
            let Some(ramp) = seq.ramp(i) else { continue };
            let amount = if item.infinite && ramp.is_done() {
                "  ∞".to_string()
            } else {
                format!("{:>3}%", ramp.value())
            };
            let line = format!("{:<14} {} {}", item.name, bar(ramp.value(), 28), amount);
            self.front.put_str(x, y + 2 + i as i32, &line, RED, Color::Reset);
        }

        let status = if seq.is_finished() {
            "done.".to_string()
        } else {
            format!("{}/{}", (seq.current() + 1).min(seq.items().len()), seq.items().len())
        };
        self.front.put_centered(y + 3 + rows, &status, DIM, Color::Reset);
    }

    fn compose_intention(&mut self, answer: &str) {
        let width = self.term_w.saturating_sub(8).clamp(10, 56);
        let typed = format!("{}{}", answer, self.caret());
        let lines = wrap(&typed, width - 4);
        let y = self.mid_row(8 + lines.len() as i32);
        self.front.put_centered(y, "what do you want to feel in 2026?", TEXT, Color::Reset);

        let field = Rect::new(
            (self.term_w as i32 - width as i32) / 2,
            y + 2,
            width as i32,
            lines.len().max(1) as i32 + 2,
        );
        self.front.frame(field, RED, Color::Reset);
        for (i, line) in lines.iter().enumerate() {
            self.front.put_str(field.x + 2, field.y + 1 + i as i32, line, TEXT, Color::Reset);
        }

        let below = field.bottom() + 2;
        self.front.put_centered(below, "your answer is saved in your heart, not our database :-)", DIM, Color::Reset);
        self.front.put_centered(below + 2, "enter: continue   esc: skip", DIM, Color::Reset);
    }

    fn compose_final(&mut self, headline: &Typewriter, fortune: Option<&str>, tick: u32) {
        let y = self.mid_row(10);
        self.front.put_centered(y, headline.visible(), RED, Color::Reset);
        self.front.put_centered(y + 2, "2026.exe is ready.", TEXT, Color::Reset);
        match fortune {
            Some(text) => {
                for (i, line) in wrap(text, 56).iter().enumerate() {
                    self.front.put_centered(y + 5 + i as i32, line, EGG, Color::Reset);
                }
            }
            None => self.front.put_centered(y + 5, "press c to consult the oracle", DIM, Color::Reset),
        }
        if tick % 2 == 0 {
            self.front.put_centered(y + 8, "ready to resume game? :-)", TEXT, Color::Reset);
        }
        self.front.put_centered(y + 10, "q: quit", DIM, Color::Reset);
    }

    // ── Overlays ──

    fn compose_dialog(&mut self, dialog: &Dialog) {
        let win_w = (self.term_w as i32 - 4).clamp(20, 50);
        let lines = wrap(&dialog.message, (win_w - 6) as usize);
        let h = 6 + lines.len() as i32;
        let r = Rect::new((self.term_w as i32 - win_w) / 2, self.mid_row(h), win_w, h);
        self.front.window(r, &dialog.title);
        for (i, line) in lines.iter().enumerate() {
            self.front.put_str(r.x + 3, r.y + 3 + i as i32, line, TEXT, PANEL);
        }
        self.front.put_str(r.right() - 8, r.bottom() - 1, "[ ok ]", Color::White, RED);
    }

    fn compose_console(&mut self, console: &ConsoleSession) {
        let h = (self.term_h as i32 / 2).clamp(4, 14);
        let r = Rect::new(0, self.term_h as i32 - h, self.term_w as i32, h);
        self.front.fill(r, CONSOLE_BG);

        let text_w = self.term_w.saturating_sub(2).max(1);
        let mut lines: Vec<String> = console
            .history()
            .iter()
            .flat_map(|l| wrap(l, text_w))
            .collect();
        lines.push(format!("> {}{}", console.input, self.caret()));

        let rows = h as usize;
        let skip = lines.len().saturating_sub(rows);
        for (i, line) in lines.iter().skip(skip).enumerate() {
            self.front.put_str(1, r.y + i as i32, line, CONSOLE_FG, CONSOLE_BG);
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
