//! Modifier key state carried by keyboard and mouse payloads.

use bitflags::bitflags;

use crate::keyboard::Key;

/// Snapshot of held modifier keys and toggled lock states.
///
/// Equality only looks at the held modifiers (`ctrl`, `alt`, `shift`,
/// `super_key`, `alt_graph`). Lock toggles are informative and two events
/// with different Caps Lock state still compare equal.
#[derive(Debug, Clone, Copy, Default, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Windows / Command / Meta.
    pub super_key: bool,
    /// AltGr (right Alt on layouts that use it as a level shift).
    pub alt_graph: bool,
    pub caps_lock: bool,
    pub num_lock: bool,
    pub scroll_lock: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        super_key: false,
        alt_graph: false,
        caps_lock: false,
        num_lock: false,
        scroll_lock: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    pub const SUPER: Self = Self {
        super_key: true,
        ..Self::NONE
    };

    /// Returns `true` when no modifier is held. Lock states are ignored.
    pub fn is_empty(&self) -> bool {
        !(self.ctrl || self.alt || self.shift || self.super_key || self.alt_graph)
    }

    /// The platform's shortcut modifier: Command on Apple targets, Control
    /// everywhere else.
    pub fn command(&self) -> bool {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            self.super_key
        } else {
            self.ctrl
        }
    }

    /// Fold a lock key transition into the state.
    ///
    /// Lock keys toggle on press. Held modifiers are left alone since one
    /// flag covers two physical keys; fold those through
    /// [`ModifierKeys::fold`].
    pub fn with_key(mut self, key: Key, pressed: bool) -> Self {
        match key {
            Key::CapsLock if pressed => self.caps_lock = !self.caps_lock,
            Key::NumLock if pressed => self.num_lock = !self.num_lock,
            Key::ScrollLock if pressed => self.scroll_lock = !self.scroll_lock,
            _ => {}
        }
        self
    }

    /// Whether text typed with this state should be treated as a shortcut
    /// rather than character input.
    pub fn suppresses_text(&self) -> bool {
        (self.ctrl && !self.alt_graph) || self.super_key
    }
}

bitflags! {
    /// Left and right modifier keys currently held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierKeys: u8 {
        const SHIFT_LEFT = 1 << 0;
        const SHIFT_RIGHT = 1 << 1;
        const CONTROL_LEFT = 1 << 2;
        const CONTROL_RIGHT = 1 << 3;
        const ALT_LEFT = 1 << 4;
        const ALT_RIGHT = 1 << 5;
        const SUPER_LEFT = 1 << 6;
        const SUPER_RIGHT = 1 << 7;

        const SHIFT = Self::SHIFT_LEFT.bits() | Self::SHIFT_RIGHT.bits();
        const CONTROL = Self::CONTROL_LEFT.bits() | Self::CONTROL_RIGHT.bits();
        const ALT = Self::ALT_LEFT.bits() | Self::ALT_RIGHT.bits();
        const SUPER = Self::SUPER_LEFT.bits() | Self::SUPER_RIGHT.bits();
    }
}

impl ModifierKeys {
    /// The flag for a modifier key. Side-less keys count as the left one.
    pub fn of(key: Key) -> Self {
        match key {
            Key::ShiftLeft | Key::Shift => Self::SHIFT_LEFT,
            Key::ShiftRight => Self::SHIFT_RIGHT,
            Key::ControlLeft | Key::Control => Self::CONTROL_LEFT,
            Key::ControlRight => Self::CONTROL_RIGHT,
            Key::AltLeft | Key::Alt => Self::ALT_LEFT,
            Key::AltRight => Self::ALT_RIGHT,
            Key::SuperLeft | Key::Super => Self::SUPER_LEFT,
            Key::SuperRight => Self::SUPER_RIGHT,
            _ => Self::empty(),
        }
    }

    /// Fold a key transition into the held set and `modifiers`.
    ///
    /// A modifier flag stays set while either side is held. Lock keys
    /// toggle on press; other keys leave both untouched.
    pub fn fold(&mut self, mut modifiers: Modifiers, key: Key, pressed: bool) -> Modifiers {
        let side = Self::of(key);
        if side.is_empty() {
            return modifiers.with_key(key, pressed);
        }
        self.set(side, pressed);
        if Self::SHIFT.intersects(side) {
            modifiers.shift = self.intersects(Self::SHIFT);
        } else if Self::CONTROL.intersects(side) {
            modifiers.ctrl = self.intersects(Self::CONTROL);
        } else if Self::ALT.intersects(side) {
            modifiers.alt = self.intersects(Self::ALT);
        } else {
            modifiers.super_key = self.intersects(Self::SUPER);
        }
        modifiers
    }
}

impl PartialEq for Modifiers {
    fn eq(&self, other: &Self) -> bool {
        self.ctrl == other.ctrl
            && self.alt == other.alt
            && self.shift == other.shift
            && self.super_key == other.super_key
            && self.alt_graph == other.alt_graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_locks() {
        let a = Modifiers {
            caps_lock: true,
            ..Modifiers::SHIFT
        };
        assert_eq!(a, Modifiers::SHIFT);
        assert_ne!(a, Modifiers::NONE);
    }

    #[test]
    fn fold_tracks_sided_modifiers() {
        let mut held = ModifierKeys::empty();
        let m = held.fold(Modifiers::NONE, Key::ShiftRight, true);
        assert!(m.shift);
        let m = held.fold(m, Key::ControlLeft, true);
        let m = held.fold(m, Key::ShiftRight, false);
        assert_eq!(m, Modifiers::CTRL);
        assert!(!m.is_empty());
        assert!(held.fold(m, Key::ControlLeft, false).is_empty());
        assert!(held.is_empty());
    }

    #[test]
    fn releasing_one_side_keeps_the_other() {
        let mut held = ModifierKeys::empty();
        let m = held.fold(Modifiers::NONE, Key::ShiftLeft, true);
        let m = held.fold(m, Key::ShiftRight, true);
        let m = held.fold(m, Key::ShiftLeft, false);
        assert!(m.shift);
        assert_eq!(held, ModifierKeys::SHIFT_RIGHT);
        let m = held.fold(m, Key::ShiftRight, false);
        assert!(!m.shift);
    }

    #[test]
    fn sideless_keys_count_as_left() {
        assert_eq!(ModifierKeys::of(Key::Alt), ModifierKeys::ALT_LEFT);
        assert_eq!(ModifierKeys::of(Key::SuperRight), ModifierKeys::SUPER_RIGHT);
        assert!(ModifierKeys::of(Key::A).is_empty());
    }

    #[test]
    fn locks_toggle_on_press_only() {
        let m = Modifiers::NONE.with_key(Key::CapsLock, true);
        assert!(m.caps_lock);
        let m = m.with_key(Key::CapsLock, false);
        assert!(m.caps_lock);
        assert!(!m.with_key(Key::CapsLock, true).caps_lock);
        assert!(m.is_empty());
    }

    #[test]
    fn ordinary_keys_do_not_change_state() {
        assert_eq!(Modifiers::ALT.with_key(Key::A, true), Modifiers::ALT);
        let mut held = ModifierKeys::ALT_LEFT;
        assert_eq!(held.fold(Modifiers::ALT, Key::A, true), Modifiers::ALT);
        assert_eq!(held, ModifierKeys::ALT_LEFT);
    }

    #[test]
    fn altgr_does_not_suppress_text() {
        let altgr = Modifiers {
            ctrl: true,
            alt: true,
            alt_graph: true,
            ..Modifiers::NONE
        };
        assert!(!altgr.suppresses_text());
        assert!(Modifiers::CTRL.suppresses_text());
        assert!(Modifiers::SUPER.suppresses_text());
        assert!(!Modifiers::SHIFT.suppresses_text());
    }
}
