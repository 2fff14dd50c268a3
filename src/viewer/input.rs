//! Input interpretation.
//!
//! Raw host events ([`InputEvent`]) are classified into a [`GestureKind`],
//! which keys a dispatch table of plain handler functions. Each handler
//! mutates the [`ViewerState`] it is given and returns the [`ViewerEvent`]s
//! the host should react to. Nothing here blocks or touches a rendering
//! surface.
//!
//! | Gesture | Effect |
//! |---|---|
//! | drag | pan, or orbit when Ctrl/Meta was held at press time |
//! | one-finger touch drag | pan |
//! | two-finger pinch | dolly along the view direction |
//! | wheel | dolly along the view direction |
//! | click | pick the nearest photo under the pointer |
//! | quick horizontal release | navigate (swipe) |
//! | arrow keys, nav buttons | navigate |

use super::gesture::{self, PressSample};
use super::navigation::NavDirection;
use super::state::{ViewerState, Viewport};
use glam::Vec2;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        meta: false,
    };

    /// Ctrl (or Cmd on macOS) switches a drag from pan to orbit.
    pub fn orbit(self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Control,
    Meta,
    Other,
}

/// A raw event from the host. Positions are in viewport pixels, origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        pos: Vec2,
        at: Duration,
        modifiers: Modifiers,
    },
    PointerMove {
        pos: Vec2,
    },
    PointerUp {
        pos: Vec2,
        at: Duration,
        modifiers: Modifiers,
    },
    Click {
        pos: Vec2,
    },
    Wheel {
        delta_y: f32,
    },
    /// All touches currently on the surface.
    TouchStart {
        touches: Vec<Vec2>,
        at: Duration,
    },
    TouchMove {
        touches: Vec<Vec2>,
    },
    /// Touches that just lifted.
    TouchEnd {
        changed: Vec<Vec2>,
        at: Duration,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
        modifiers: Modifiers,
    },
    /// On-screen previous/next button.
    Button(NavDirection),
    Resize {
        width: f32,
        height: f32,
    },
}

/// Dispatch key for [`InputDispatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Press,
    Drag,
    Release,
    Click,
    Wheel,
    TouchPress,
    PinchStart,
    TouchDrag,
    Pinch,
    TouchRelease,
    ArrowKey,
    ModifierKey,
    NavButton,
    Resize,
    /// Touch counts the viewer has no gesture for.
    Unhandled,
}

/// Cursor hint for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Move,
    Grab,
    Grabbing,
    Default,
}

impl Cursor {
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::Move => "move",
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
            Cursor::Default => "default",
        }
    }
}

/// What the host should react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerEvent {
    PhotoSelected(usize),
    Navigate(NavDirection),
    /// The active photo changed; emitted after a selection or navigation is applied.
    ActiveChanged(Option<usize>),
    CursorChanged(Cursor),
    CameraMoved,
}

pub type GestureHandler = fn(&mut ViewerState, &InputEvent) -> Vec<ViewerEvent>;

pub fn classify(event: &InputEvent) -> GestureKind {
    match event {
        InputEvent::PointerDown { .. } => GestureKind::Press,
        InputEvent::PointerMove { .. } => GestureKind::Drag,
        InputEvent::PointerUp { .. } => GestureKind::Release,
        InputEvent::Click { .. } => GestureKind::Click,
        InputEvent::Wheel { .. } => GestureKind::Wheel,
        InputEvent::TouchStart { touches, .. } => match touches.len() {
            1 => GestureKind::TouchPress,
            2 => GestureKind::PinchStart,
            _ => GestureKind::Unhandled,
        },
        InputEvent::TouchMove { touches } => match touches.len() {
            1 => GestureKind::TouchDrag,
            2 => GestureKind::Pinch,
            _ => GestureKind::Unhandled,
        },
        InputEvent::TouchEnd { .. } => GestureKind::TouchRelease,
        InputEvent::KeyDown {
            key: Key::ArrowLeft | Key::ArrowRight,
            ..
        } => GestureKind::ArrowKey,
        InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } => GestureKind::ModifierKey,
        InputEvent::Button(_) => GestureKind::NavButton,
        InputEvent::Resize { .. } => GestureKind::Resize,
    }
}

/// Table from gesture kind to handler.
pub struct InputDispatcher {
    handlers: HashMap<GestureKind, GestureHandler>,
}

impl Default for InputDispatcher {
    fn default() -> Self {
        let mut handlers: HashMap<GestureKind, GestureHandler> = HashMap::new();
        handlers.insert(GestureKind::Press, on_press);
        handlers.insert(GestureKind::Drag, on_drag);
        handlers.insert(GestureKind::Release, on_release);
        handlers.insert(GestureKind::Click, on_click);
        handlers.insert(GestureKind::Wheel, on_wheel);
        handlers.insert(GestureKind::TouchPress, on_touch_press);
        handlers.insert(GestureKind::PinchStart, on_pinch_start);
        handlers.insert(GestureKind::TouchDrag, on_touch_drag);
        handlers.insert(GestureKind::Pinch, on_pinch);
        handlers.insert(GestureKind::TouchRelease, on_touch_release);
        handlers.insert(GestureKind::ArrowKey, on_arrow_key);
        handlers.insert(GestureKind::ModifierKey, on_modifier_key);
        handlers.insert(GestureKind::NavButton, on_nav_button);
        handlers.insert(GestureKind::Resize, on_resize);
        Self { handlers }
    }
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace (or add) the handler for one gesture kind.
    pub fn set_handler(&mut self, kind: GestureKind, handler: GestureHandler) {
        self.handlers.insert(kind, handler);
    }

    /// Stop reacting to one gesture kind.
    pub fn remove_handler(&mut self, kind: GestureKind) {
        self.handlers.remove(&kind);
    }

    pub fn dispatch(&self, state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
        let kind = classify(event);
        match self.handlers.get(&kind) {
            Some(handler) => handler(state, event),
            None => Vec::new(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

fn on_press(state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
    let InputEvent::PointerDown { pos, at, modifiers } = *event else {
        return Vec::new();
    };
    state.dragging = true;
    state.orbit_mode = modifiers.orbit();
    state.last_pointer = Some(pos);
    state.swipe_start = Some(PressSample { pos, at });
    vec![ViewerEvent::CursorChanged(Cursor::Grabbing)]
}

fn on_drag(state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
    let InputEvent::PointerMove { pos } = *event else {
        return Vec::new();
    };
    if !state.dragging {
        return Vec::new();
    }
    let delta = pos - state.last_pointer.unwrap_or(pos);
    if state.orbit_mode {
        state.camera.orbit(delta.x, delta.y);
    } else {
        state.camera.pan(delta.x, delta.y);
    }
    state.last_pointer = Some(pos);
    vec![ViewerEvent::CameraMoved]
}

fn on_release(state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
    let InputEvent::PointerUp { pos, at, modifiers } = *event else {
        return Vec::new();
    };
    let mut events = swipe_events(state, pos, at);
    state.dragging = false;
    let cursor = if modifiers.orbit() {
        Cursor::Grab
    } else {
        Cursor::Move
    };
    events.push(ViewerEvent::CursorChanged(cursor));
    events
}

fn on_click(state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
    let InputEvent::Click { pos } = *event else {
        return Vec::new();
    };
    if state.dragging {
        return Vec::new();
    }
    let ndc = state.viewport.to_ndc(pos);
    let ray = state.camera.ray_from_ndc(ndc, state.viewport.aspect());
    state
        .scene
        .pick(&ray)
        .map(ViewerEvent::PhotoSelected)
        .into_iter()
        .collect()
}

fn on_wheel(state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
    let InputEvent::Wheel { delta_y } = *event else {
        return Vec::new();
    };
    state.camera.wheel(delta_y);
    vec![ViewerEvent::CameraMoved]
}

fn on_touch_press(state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
    let InputEvent::TouchStart { touches, at } = event else {
        return Vec::new();
    };
    let Some(&pos) = touches.first() else {
        return Vec::new();
    };
    state.dragging = true;
    state.orbit_mode = false;
    state.last_pointer = Some(pos);
    state.swipe_start = Some(PressSample { pos, at: *at });
    Vec::new()
}

fn on_pinch_start(state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
    let InputEvent::TouchStart { touches, .. } = event else {
        return Vec::new();
    };
    let [a, b] = touches.as_slice() else {
        return Vec::new();
    };
    state.dragging = false;
    state.swipe_start = None;
    state.pinch_distance = Some(gesture::touch_distance(*a, *b));
    Vec::new()
}

fn on_touch_drag(state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
    let InputEvent::TouchMove { touches } = event else {
        return Vec::new();
    };
    let Some(&pos) = touches.first() else {
        return Vec::new();
    };
    if !state.dragging {
        return Vec::new();
    }
    let delta = pos - state.last_pointer.unwrap_or(pos);
    state.camera.pan(delta.x, delta.y);
    state.last_pointer = Some(pos);
    vec![ViewerEvent::CameraMoved]
}

fn on_pinch(state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
    let InputEvent::TouchMove { touches } = event else {
        return Vec::new();
    };
    let [a, b] = touches.as_slice() else {
        return Vec::new();
    };
    let Some(previous) = state.pinch_distance else {
        return Vec::new();
    };
    let current = gesture::touch_distance(*a, *b);
    state.camera.pinch(previous, current);
    state.pinch_distance = Some(current);
    vec![ViewerEvent::CameraMoved]
}

fn on_touch_release(state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
    let InputEvent::TouchEnd { changed, at } = event else {
        return Vec::new();
    };
    let events = match changed.first() {
        Some(&pos) => swipe_events(state, pos, *at),
        None => Vec::new(),
    };
    state.dragging = false;
    state.pinch_distance = None;
    events
}

fn on_arrow_key(_state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
    match event {
        InputEvent::KeyDown {
            key: Key::ArrowRight,
            ..
        } => vec![ViewerEvent::Navigate(NavDirection::Next)],
        InputEvent::KeyDown {
            key: Key::ArrowLeft,
            ..
        } => vec![ViewerEvent::Navigate(NavDirection::Previous)],
        _ => Vec::new(),
    }
}

fn on_modifier_key(state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
    match *event {
        InputEvent::KeyDown { modifiers, .. } if modifiers.orbit() => {
            vec![ViewerEvent::CursorChanged(Cursor::Grab)]
        }
        InputEvent::KeyUp { modifiers, .. } if !modifiers.orbit() => {
            let cursor = if state.dragging {
                Cursor::Grabbing
            } else {
                Cursor::Move
            };
            vec![ViewerEvent::CursorChanged(cursor)]
        }
        _ => Vec::new(),
    }
}

fn on_nav_button(_state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
    match *event {
        InputEvent::Button(direction) => vec![ViewerEvent::Navigate(direction)],
        _ => Vec::new(),
    }
}

fn on_resize(state: &mut ViewerState, event: &InputEvent) -> Vec<ViewerEvent> {
    if let InputEvent::Resize { width, height } = *event {
        state.viewport = Viewport::new(width, height);
    }
    Vec::new()
}

/// Consume the pending swipe start and classify the release against it.
fn swipe_events(state: &mut ViewerState, pos: Vec2, at: Duration) -> Vec<ViewerEvent> {
    state
        .swipe_start
        .take()
        .and_then(|start| gesture::classify_swipe(start, pos, at))
        .map(ViewerEvent::Navigate)
        .into_iter()
        .collect()
}
