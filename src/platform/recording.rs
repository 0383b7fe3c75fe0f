//! Recording platform
//!
//! Implements every port by appending to a shared call log. Clones share the
//! log, so a test keeps one handle while the game owns the others.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use super::{Audio, Celebration, ConfettiBurst, Control, Flash, MessageTone, Renderer, TextSlot};
use crate::sim::{DropId, FallingDrop};

/// One observed port call
#[derive(Debug, Clone, PartialEq)]
pub enum PortCall {
    CreateDrop(FallingDrop),
    RemoveDrop(DropId),
    ClearDrops,
    SetText(TextSlot, String),
    SetProgress(f64),
    SetMessage(String, MessageTone),
    SetControl(Control, bool),
    Flash(Option<Flash>),
    PlayMusic,
    StopMusic,
    PlayClick,
    SetMuted(bool),
    Celebrate,
}

#[derive(Debug, Default)]
struct Log {
    calls: Vec<PortCall>,
    on_screen: BTreeSet<DropId>,
}

/// Recording fake for all three ports
#[derive(Debug, Clone)]
pub struct Recorder {
    log: Rc<RefCell<Log>>,
    width: f64,
    celebration_available: bool,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(400.0)
    }
}

impl Recorder {
    pub fn new(container_width: f64) -> Self {
        Self {
            log: Rc::new(RefCell::new(Log::default())),
            width: container_width,
            celebration_available: true,
        }
    }

    /// Make [`Celebration::celebrate`] report the effect as missing
    pub fn without_celebration(mut self) -> Self {
        self.celebration_available = false;
        self
    }

    pub fn calls(&self) -> Vec<PortCall> {
        self.log.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.log.borrow_mut().calls.clear();
    }

    pub fn count(&self, pred: impl Fn(&PortCall) -> bool) -> usize {
        self.log.borrow().calls.iter().filter(|&c| pred(c)).count()
    }

    /// Drop ids currently rendered
    pub fn drops_on_screen(&self) -> Vec<DropId> {
        self.log.borrow().on_screen.iter().copied().collect()
    }

    /// Last text written to a HUD slot
    pub fn last_text(&self, slot: TextSlot) -> Option<String> {
        self.log.borrow().calls.iter().rev().find_map(|c| match c {
            PortCall::SetText(s, text) if *s == slot => Some(text.clone()),
            _ => None,
        })
    }

    pub fn last_message(&self) -> Option<(String, MessageTone)> {
        self.log.borrow().calls.iter().rev().find_map(|c| match c {
            PortCall::SetMessage(text, tone) => Some((text.clone(), *tone)),
            _ => None,
        })
    }

    pub fn last_progress(&self) -> Option<f64> {
        self.log.borrow().calls.iter().rev().find_map(|c| match c {
            PortCall::SetProgress(p) => Some(*p),
            _ => None,
        })
    }

    pub fn control_enabled(&self, control: Control) -> Option<bool> {
        self.log.borrow().calls.iter().rev().find_map(|c| match c {
            PortCall::SetControl(k, enabled) if *k == control => Some(*enabled),
            _ => None,
        })
    }

    fn push(&self, call: PortCall) {
        self.log.borrow_mut().calls.push(call);
    }
}

impl Renderer for Recorder {
    fn container_width(&self) -> f64 {
        self.width
    }

    fn create_drop(&mut self, drop: &FallingDrop) {
        self.log.borrow_mut().on_screen.insert(drop.id);
        self.push(PortCall::CreateDrop(drop.clone()));
    }

    fn remove_drop(&mut self, id: DropId) {
        self.log.borrow_mut().on_screen.remove(&id);
        self.push(PortCall::RemoveDrop(id));
    }

    fn clear_drops(&mut self) {
        self.log.borrow_mut().on_screen.clear();
        self.push(PortCall::ClearDrops);
    }

    fn set_text(&mut self, slot: TextSlot, text: &str) {
        self.push(PortCall::SetText(slot, text.to_string()));
    }

    fn set_progress(&mut self, percent: f64) {
        self.push(PortCall::SetProgress(percent));
    }

    fn set_message(&mut self, text: &str, tone: MessageTone) {
        self.push(PortCall::SetMessage(text.to_string(), tone));
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        self.push(PortCall::SetControl(control, enabled));
    }

    fn flash(&mut self, flash: Option<Flash>) {
        self.push(PortCall::Flash(flash));
    }
}

impl Audio for Recorder {
    fn play_music(&mut self) {
        self.push(PortCall::PlayMusic);
    }

    fn stop_music(&mut self) {
        self.push(PortCall::StopMusic);
    }

    fn play_click(&mut self) {
        self.push(PortCall::PlayClick);
    }

    fn set_muted(&mut self, muted: bool) {
        self.push(PortCall::SetMuted(muted));
    }
}

impl Celebration for Recorder {
    fn celebrate(&mut self, _burst: &ConfettiBurst) -> bool {
        if !self.celebration_available {
            return false;
        }
        self.push(PortCall::Celebrate);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::DropKind;

    #[test]
    fn test_clones_share_log() {
        let screen = Recorder::new(300.0);
        let mut port = screen.clone();
        port.set_text(TextSlot::Score, "3");
        port.set_control_enabled(Control::Start, false);
        assert_eq!(screen.last_text(TextSlot::Score).as_deref(), Some("3"));
        assert_eq!(screen.control_enabled(Control::Start), Some(false));
        assert_eq!(screen.control_enabled(Control::Reset), None);
    }

    #[test]
    fn test_tracks_drops_on_screen() {
        let screen = Recorder::default();
        let mut port = screen.clone();
        for id in 1..=3 {
            port.create_drop(&FallingDrop {
                id,
                kind: DropKind::Water,
                size: 30,
                left: 0.0,
                fall_duration: 4.0,
            });
        }
        port.remove_drop(2);
        assert_eq!(screen.drops_on_screen(), vec![1, 3]);
        port.clear_drops();
        assert!(screen.drops_on_screen().is_empty());
    }

    #[test]
    fn test_missing_celebration() {
        let mut port = Recorder::default().without_celebration();
        assert!(!port.celebrate(&ConfettiBurst::default()));
        assert_eq!(port.count(|c| *c == PortCall::Celebrate), 0);
    }
}
