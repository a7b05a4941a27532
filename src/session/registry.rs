use ratatui::layout::Rect;

use crate::ui::Action;

/// Maps screen regions to actions for the current frame.
///
/// Cleared and repopulated on every bind pass, so no matter how many times
/// the page is rebuilt there is exactly one live region per interactive
/// element.
#[derive(Default)]
pub struct HitRegistry {
    regions: Vec<(Rect, Action)>,
}

impl HitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn register(&mut self, rect: Rect, action: Action) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        self.regions.push((rect, action));
    }

    /// Topmost match wins: later registrations (overlays) are checked first.
    pub fn action_at(&self, x: u16, y: u16) -> Option<&Action> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| point_in_rect(x, y, *rect))
            .map(|(_, action)| action)
    }

    /// First registered region for an action. Test hook and focus helper.
    pub fn rect_of(&self, wanted: &Action) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(_, action)| action == wanted)
            .map(|(rect, _)| *rect)
    }

    pub fn count_of(&self, wanted: &Action) -> usize {
        self.regions
            .iter()
            .filter(|(_, action)| action == wanted)
            .count()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}
