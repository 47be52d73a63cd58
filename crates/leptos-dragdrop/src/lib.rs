//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse, touch and keyboard events.
//! Uses movement threshold to distinguish click from drag, and reports the
//! drag lifecycle (start / over / end) with string ids so that both
//! draggable items and the containers holding them can be drop targets.
//!
//! Droppables carry their id in [`DROPPABLE_ATTR`] so touch drags can
//! resolve the element under the finger.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Identifier of a draggable item or a droppable container
pub type DragId = String;

/// Attribute holding a droppable's id
pub const DROPPABLE_ATTR: &str = "data-dnd-id";

/// Lifecycle callbacks
#[derive(Clone, Copy)]
pub struct DragHandlers {
    /// `active` crossed the movement threshold
    pub on_start: Callback<DragId>,
    /// `(active, over)`; `over` changed while dragging
    pub on_over: Callback<(DragId, Option<DragId>)>,
    /// `(active, over)` at release
    pub on_end: Callback<(Option<DragId>, Option<DragId>)>,
}

/// Arrow key direction while a drag is steered from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMove {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Lift,
    Move(KeyMove),
    Drop,
    Cancel,
}

/// `(active, over, direction)` to the next droppable, `None` to stay put
pub type KeyNavigator = Callback<(DragId, Option<DragId>, KeyMove), Option<DragId>>;

/// Map a `KeyboardEvent.key` to a drag command.
///
/// Space or Enter lifts an item and drops it again; arrows and Escape only
/// mean something while dragging.
pub fn key_command(key: &str, dragging: bool) -> Option<KeyCommand> {
    let command = match (key, dragging) {
        (" " | "Enter", false) => KeyCommand::Lift,
        (" " | "Enter", true) => KeyCommand::Drop,
        ("Escape", true) => KeyCommand::Cancel,
        ("ArrowUp", true) => KeyCommand::Move(KeyMove::Up),
        ("ArrowDown", true) => KeyCommand::Move(KeyMove::Down),
        ("ArrowLeft", true) => KeyCommand::Move(KeyMove::Left),
        ("ArrowRight", true) => KeyCommand::Move(KeyMove::Right),
        _ => return None,
    };
    Some(command)
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub active_id_read: ReadSignal<Option<DragId>>,
    pub active_id_write: WriteSignal<Option<DragId>>,
    /// Innermost droppable under the pointer
    pub over_id_read: ReadSignal<Option<DragId>>,
    pub over_id_write: WriteSignal<Option<DragId>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (pressed but not yet dragging)
    pub pending_id_read: ReadSignal<Option<DragId>>,
    pub pending_id_write: WriteSignal<Option<DragId>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// Whether the pointer moved far enough from `start` to begin a drag
pub fn exceeds_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    let dx = (now.0 - start.0).abs();
    let dy = (now.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

pub fn create_dnd_signals() -> DndSignals {
    let (active_id_read, active_id_write) = signal(None::<DragId>);
    let (over_id_read, over_id_write) = signal(None::<DragId>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<DragId>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        active_id_read,
        active_id_write,
        over_id_read,
        over_id_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.active_id_write.set(None);
    dnd.over_id_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Mark `item_id` as dragged and report it
fn begin_drag(dnd: &DndSignals, item_id: DragId, on_start: Callback<DragId>) {
    dnd.pending_id_write.set(None);
    dnd.active_id_write.set(Some(item_id.clone()));
    on_start.run(item_id);
}

/// Report a new drop target, once per change
fn retarget(
    dnd: &DndSignals,
    active: DragId,
    over: Option<DragId>,
    on_over: Callback<(DragId, Option<DragId>)>,
) {
    if dnd.over_id_read.get_untracked() == over {
        return;
    }
    dnd.over_id_write.set(over.clone());
    on_over.run((active, over));
}

/// Clear drag state, then report the drop
fn finish_drag(dnd: &DndSignals, over: Option<DragId>, on_end: Callback<(Option<DragId>, Option<DragId>)>) {
    let active_id = dnd.active_id_read.get_untracked();
    end_drag(dnd);
    // Only a real drag ends; a click fires naturally on the element
    if active_id.is_some() {
        on_end.run((active_id, over));
    }
}

/// Presses on form controls inside a draggable never start a drag
fn is_control(target: Option<web_sys::EventTarget>) -> bool {
    target.is_some_and(|t| {
        t.dyn_ref::<web_sys::HtmlInputElement>().is_some()
            || t.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
    })
}

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

/// Innermost droppable at a viewport position
fn droppable_at(x: i32, y: i32) -> Option<DragId> {
    let hit = document()?.element_from_point(x as f32, y as f32)?;
    let droppable = hit.closest(&format!("[{}]", DROPPABLE_ATTR)).ok()??;
    droppable.get_attribute(DROPPABLE_ATTR)
}

fn first_touch(ev: &web_sys::TouchEvent) -> Option<(i32, i32)> {
    let touch = ev.touches().get(0)?;
    Some((touch.client_x(), touch.client_y()))
}

// ========================
// Mouse
// ========================

/// Create mousedown handler for draggable items
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, item_id: DragId) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || is_control(ev.target()) {
            return;
        }
        dnd.pending_id_write.set(Some(item_id.clone()));
        dnd.start_x_write.set(ev.client_x());
        dnd.start_y_write.set(ev.client_y());
    }
}

/// Create mousemove handler for document - starts drag if moved enough
pub fn bind_global_mousemove(dnd: DndSignals, on_start: Callback<DragId>) {
    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        // Only a pending press that has not started dragging yet
        if dnd.active_id_read.get_untracked().is_some() {
            return;
        }
        let Some(pending) = dnd.pending_id_read.get_untracked() else {
            return;
        };
        let start = (dnd.start_x_read.get_untracked(), dnd.start_y_read.get_untracked());
        if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
            begin_drag(&dnd, pending, on_start);
        }
    });

    if let Some(doc) = document() {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Create mouseover handler for droppables (items and containers).
///
/// `mouseover` bubbles, so propagation is stopped at the innermost
/// droppable; moving from an item back onto its container's surface
/// re-targets the container.
pub fn make_on_mouseover(
    dnd: DndSignals,
    droppable_id: DragId,
    on_over: Callback<(DragId, Option<DragId>)>,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        let Some(active) = dnd.active_id_read.get_untracked() else {
            return;
        };
        ev.stop_propagation();
        retarget(&dnd, active, Some(droppable_id.clone()), on_over);
    }
}

/// Create mouseleave handler for the drop area as a whole
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.active_id_read.get_untracked().is_some() {
            dnd.over_id_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection
pub fn bind_global_mouseup(dnd: DndSignals, handlers: DragHandlers) {
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        finish_drag(&dnd, dnd.over_id_read.get_untracked(), handlers.on_end);
    });

    if let Some(doc) = document() {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd, handlers.on_start);
}

// ========================
// Touch
// ========================

/// Create touchstart handler for draggable items.
///
/// Draggables should set `touch-action: none` so the browser does not
/// turn the gesture into a scroll.
pub fn make_on_touchstart(dnd: DndSignals, item_id: DragId) -> impl Fn(web_sys::TouchEvent) + Clone + 'static {
    move |ev: web_sys::TouchEvent| {
        if is_control(ev.target()) || dnd.active_id_read.get_untracked().is_some() {
            return;
        }
        let Some((x, y)) = first_touch(&ev) else {
            return;
        };
        dnd.pending_id_write.set(Some(item_id.clone()));
        dnd.start_x_write.set(x);
        dnd.start_y_write.set(y);
    }
}

/// Bind document touch handlers: threshold start, hit-tested over, drop
pub fn bind_global_touch(dnd: DndSignals, handlers: DragHandlers) {
    let on_touchmove = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |ev: web_sys::TouchEvent| {
        let Some((x, y)) = first_touch(&ev) else {
            return;
        };
        match dnd.active_id_read.get_untracked() {
            Some(active) => retarget(&dnd, active, droppable_at(x, y), handlers.on_over),
            None => {
                let Some(pending) = dnd.pending_id_read.get_untracked() else {
                    return;
                };
                let start = (dnd.start_x_read.get_untracked(), dnd.start_y_read.get_untracked());
                if exceeds_threshold(start, (x, y)) {
                    begin_drag(&dnd, pending, handlers.on_start);
                }
            }
        }
    });

    let on_touchend = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |_ev: web_sys::TouchEvent| {
        finish_drag(&dnd, dnd.over_id_read.get_untracked(), handlers.on_end);
    });

    let on_touchcancel = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |_ev: web_sys::TouchEvent| {
        finish_drag(&dnd, None, handlers.on_end);
    });

    if let Some(doc) = document() {
        let _ = doc.add_event_listener_with_callback("touchmove", on_touchmove.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("touchend", on_touchend.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("touchcancel", on_touchcancel.as_ref().unchecked_ref());
    }
    on_touchmove.forget();
    on_touchend.forget();
    on_touchcancel.forget();
}

// ========================
// Keyboard
// ========================

/// Create keydown handler for focusable draggable items: Space/Enter lifts
pub fn make_on_keydown(
    dnd: DndSignals,
    item_id: DragId,
    on_start: Callback<DragId>,
) -> impl Fn(web_sys::KeyboardEvent) + Clone + 'static {
    move |ev: web_sys::KeyboardEvent| {
        if dnd.active_id_read.get_untracked().is_some() || is_control(ev.target()) {
            return;
        }
        if key_command(&ev.key(), false) != Some(KeyCommand::Lift) {
            return;
        }
        // The document handler must not read this press as the drop
        ev.prevent_default();
        ev.stop_propagation();
        begin_drag(&dnd, item_id.clone(), on_start);
    }
}

/// Bind document keydown handler steering an active drag.
///
/// Bound on the document because a lifted item may be re-rendered in
/// another container and lose focus.
pub fn bind_global_keydown(dnd: DndSignals, handlers: DragHandlers, navigate: KeyNavigator) {
    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        let Some(active) = dnd.active_id_read.get_untracked() else {
            return;
        };
        let Some(command) = key_command(&ev.key(), true) else {
            return;
        };
        ev.prevent_default();
        match command {
            KeyCommand::Move(dir) => {
                let over = dnd.over_id_read.get_untracked();
                if let Some(target) = navigate.run((active.clone(), over, dir)) {
                    retarget(&dnd, active, Some(target), handlers.on_over);
                }
            }
            KeyCommand::Drop => finish_drag(&dnd, dnd.over_id_read.get_untracked(), handlers.on_end),
            KeyCommand::Cancel => finish_drag(&dnd, None, handlers.on_end),
            KeyCommand::Lift => {}
        }
    });

    if let Some(doc) = document() {
        let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    }
    on_keydown.forget();
}
