/// Desktop cleanup minigame.
///
/// A fixed set of file icons sits on a small desktop. Removable files vanish
/// when released over the trash; protected files refuse with an in-fiction
/// error. The minigame reports completion exactly once, on the drop (or
/// sweep) that removes the last removable file.
///
/// All coordinates are desktop-local cells; see `geometry`.

use super::geometry::{Point, Rect};

/// Desktop size in terminal cells.
pub const DESKTOP_W: i32 = 76;
pub const DESKTOP_H: i32 = 20;

/// The trash, bottom right.
pub const TRASH_ZONE: Rect = Rect::new(62, 14, 12, 5);

/// Manual removals after which the remaining files get swept automatically.
pub const SWEEP_AFTER: usize = 2;

/// Rows occupied by an icon: glyph row + label row.
const ICON_H: i32 = 2;

const GENERIC_DENIAL: &str = "cannot delete file - access denied";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Category {
    Removable,
    Protected,
}

#[derive(Clone, Debug)]
pub struct DraggableItem {
    pub id: String,
    pub label: String,
    pub category: Category,
    pub position: Point,
}

impl DraggableItem {
    pub fn new(id: &str, label: &str, category: Category, x: i32, y: i32) -> Self {
        DraggableItem {
            id: id.to_string(),
            label: label.to_string(),
            category,
            position: Point::new(x, y),
        }
    }

    /// Hit box: as wide as the label (at least the glyph), two rows tall.
    pub fn bounds(&self) -> Rect {
        let w = (self.label.chars().count() as i32).max(4);
        Rect::new(self.position.x, self.position.y, w, ICON_H)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub title: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// Item left the desktop. `completed` is true only on the drop that
    /// satisfied the completion predicate for the first time.
    Removed { id: String, completed: bool },
    /// Protected item released over the trash.
    Rejected(Rejection),
    /// Released outside the trash.
    Missed,
    /// Unknown or already removed id.
    Ignored,
}

#[derive(Clone, Debug)]
struct Drag {
    id: String,
    grab_dx: i32,
    grab_dy: i32,
    origin: Point,
}

pub struct Desktop {
    items: Vec<DraggableItem>,
    target: Rect,
    user_removals: usize,
    completion_signalled: bool,
    drag: Option<Drag>,
    selected: usize,
}

/// Canned refusal for a protected file, keyed by label.
pub fn rejection_message(label: &str) -> &'static str {
    match label {
        "hope.exe" => "cannot delete hope.exe - file is protected by God's Not Finished.dll",
        "love.dll" => "cannot delete love.dll - this file is required by your operating system",
        "trust.sys" => "access denied - trust.sys is a critical system file",
        "patience.sys" => "cannot delete patience.sys - still processing future operations",
        "faith.exe" => "cannot remove faith.exe - needed for future operations",
        "bravery.exe" => "cannot delete bravery.exe - you're going to need this",
        _ => GENERIC_DENIAL,
    }
}

/// The files every session starts with.
pub fn seed_items() -> Vec<DraggableItem> {
    use Category::*;
    vec![
        DraggableItem::new("1", "cynicism.exe", Removable, 2, 1),
        DraggableItem::new("2", "bitterness.dll", Removable, 18, 3),
        DraggableItem::new("3", "self-doubt.txt", Removable, 6, 6),
        DraggableItem::new("4", "old-pain.zip", Removable, 2, 10),
        DraggableItem::new("5", "resentment.sys", Removable, 20, 9),
        DraggableItem::new("6", "fear.exe", Removable, 8, 14),
        DraggableItem::new("7", "cowardice.exe", Removable, 30, 5),
        DraggableItem::new("8", "hope.exe", Protected, 46, 1),
        DraggableItem::new("9", "love.dll", Protected, 56, 4),
        DraggableItem::new("10", "trust.sys", Protected, 44, 8),
        DraggableItem::new("11", "faith.exe", Protected, 62, 1),
        DraggableItem::new("12", "bravery.exe", Protected, 50, 12),
    ]
}

impl Desktop {
    pub fn new() -> Self {
        Self::with_items(seed_items(), TRASH_ZONE)
    }

    pub fn with_items(items: Vec<DraggableItem>, target: Rect) -> Self {
        Desktop {
            items,
            target,
            user_removals: 0,
            completion_signalled: false,
            drag: None,
            selected: 0,
        }
    }

    pub fn items(&self) -> &[DraggableItem] {
        &self.items
    }

    pub fn target(&self) -> Rect {
        self.target
    }

    pub fn removable_left(&self) -> usize {
        self.count(Category::Removable)
    }

    pub fn protected_left(&self) -> usize {
        self.count(Category::Protected)
    }

    fn count(&self, category: Category) -> usize {
        self.items.iter().filter(|i| i.category == category).count()
    }

    /// No removable files left and something worth keeping still there.
    pub fn is_complete(&self) -> bool {
        self.removable_left() == 0 && self.protected_left() > 0
    }

    pub fn completion_signalled(&self) -> bool {
        self.completion_signalled
    }

    pub fn user_removals(&self) -> usize {
        self.user_removals
    }

    // ── Drop ──

    /// Release `id` at `pointer`.
    pub fn drop_at(&mut self, id: &str, pointer: Point) -> DropOutcome {
        let Some(idx) = self.items.iter().position(|i| i.id == id) else {
            return DropOutcome::Ignored;
        };
        if !self.target.contains(pointer) {
            return DropOutcome::Missed;
        }

        match self.items[idx].category {
            Category::Removable => {
                self.user_removals += 1;
                self.remove(idx)
            }
            Category::Protected => {
                let label = &self.items[idx].label;
                DropOutcome::Rejected(Rejection {
                    title: format!("Error deleting {}", label),
                    message: rejection_message(label).to_string(),
                })
            }
        }
    }

    fn remove(&mut self, idx: usize) -> DropOutcome {
        let item = self.items.remove(idx);
        if self.drag.as_ref().is_some_and(|d| d.id == item.id) {
            self.drag = None;
        }
        if self.selected >= self.items.len() {
            self.selected = 0;
        }
        let completed = !self.completion_signalled && self.is_complete();
        if completed {
            self.completion_signalled = true;
        }
        DropOutcome::Removed { id: item.id, completed }
    }

    // ── Auto-sweep ──

    /// True once the user has removed enough files by hand and some are left.
    pub fn should_sweep(&self) -> bool {
        self.user_removals >= SWEEP_AFTER && self.removable_left() > 0
    }

    /// Remove the first remaining removable file, if any.
    pub fn sweep_one(&mut self) -> Option<DropOutcome> {
        let idx = self.items.iter().position(|i| i.category == Category::Removable)?;
        Some(self.remove(idx))
    }

    // ── Pointer drag ──

    /// Top-most item under `p` (later items are drawn on top).
    pub fn item_at(&self, p: Point) -> Option<&DraggableItem> {
        self.items.iter().rev().find(|i| i.bounds().contains(p))
    }

    /// Start dragging whatever is under `p`. Returns false on empty desktop.
    pub fn pick_at(&mut self, p: Point) -> bool {
        let Some(item) = self.item_at(p) else {
            return false;
        };
        self.drag = Some(Drag {
            id: item.id.clone(),
            grab_dx: p.x - item.position.x,
            grab_dy: p.y - item.position.y,
            origin: item.position,
        });
        true
    }

    pub fn drag_to(&mut self, p: Point) {
        if let Some(drag) = self.drag.clone() {
            self.move_dragged(&drag, p);
        }
    }

    /// End the drag at `p`. A rejected protected file snaps back to where
    /// the drag began; a missed drop stays where it was released.
    pub fn release(&mut self, p: Point) -> DropOutcome {
        let Some(drag) = self.drag.take() else {
            return DropOutcome::Ignored;
        };
        self.move_dragged(&drag, p);
        let outcome = self.drop_at(&drag.id, p);
        if let DropOutcome::Rejected(_) = outcome {
            if let Some(item) = self.items.iter_mut().find(|i| i.id == drag.id) {
                item.position = drag.origin;
            }
        }
        outcome
    }

    fn move_dragged(&mut self, drag: &Drag, p: Point) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == drag.id) {
            let w = item.bounds().w;
            item.position = Point::new(
                (p.x - drag.grab_dx).clamp(0, (DESKTOP_W - w).max(0)),
                (p.y - drag.grab_dy).clamp(0, DESKTOP_H - ICON_H),
            );
        }
    }

    pub fn dragging(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.id.as_str())
    }

    // ── Keyboard selection ──

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }

    pub fn selected(&self) -> Option<&DraggableItem> {
        self.items.get(self.selected)
    }

    /// Keyboard equivalent of dragging the selected file onto the trash.
    pub fn trash_selected(&mut self) -> DropOutcome {
        let Some(id) = self.selected().map(|i| i.id.clone()) else {
            return DropOutcome::Ignored;
        };
        self.drop_at(&id, self.target.center())
    }
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new()
    }
}
