use std::any::Any;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};

use forma_core::coords::Rect;
use forma_core::runtime::{ListenerGuard, WindowListeners};

use crate::contract::{Clearable, Focusable, NotificationLog};
use crate::event::{EventResult, UiEvent};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

// ── WidgetId ──────────────────────────────────────────────────────────────

/// Unique identifier of a widget instance.
///
/// Allocated once per widget construction via [`WidgetId::new()`] and stable
/// for the widget's lifetime, attached or not.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate a new, globally unique `WidgetId`.
    pub fn new() -> Self {
        WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ── Contexts ──────────────────────────────────────────────────────────────

/// Work the host runs on a widget's behalf after the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Focus the widget again, if it is still attached by then.
    Refocus(WidgetId),
}

/// Per-event context handed to widgets.
///
/// Widgets never touch the host directly; they leave requests here and the
/// host applies them once the handler returns.
#[derive(Debug, Default)]
pub struct EventCtx {
    focus_request: Option<WidgetId>,
    deferred: Vec<DeferredTask>,
}

impl EventCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus `id` as soon as the current handler returns.
    #[inline]
    pub fn request_focus(&mut self, id: WidgetId) {
        self.focus_request = Some(id);
    }

    /// Focus `id` after the current turn has completed.
    ///
    /// Not cancellable. Dropped by the host if `id` is detached by then.
    #[inline]
    pub fn defer_focus(&mut self, id: WidgetId) {
        self.deferred.push(DeferredTask::Refocus(id));
    }

    #[inline]
    pub fn focus_request(&self) -> Option<WidgetId> {
        self.focus_request
    }

    #[inline]
    pub fn deferred(&self) -> &[DeferredTask] {
        &self.deferred
    }

    pub(crate) fn into_parts(self) -> (Option<WidgetId>, Vec<DeferredTask>) {
        (self.focus_request, self.deferred)
    }
}

/// Resources a widget may acquire while it is attached to a host.
pub struct AttachCtx<'a> {
    listeners: &'a WindowListeners<WidgetId>,
    log: &'a NotificationLog,
}

impl<'a> AttachCtx<'a> {
    pub fn new(listeners: &'a WindowListeners<WidgetId>, log: &'a NotificationLog) -> Self {
        Self { listeners, log }
    }

    /// Subscribe `id` to window-level pointer events until the guard drops.
    #[must_use = "dropping the guard unsubscribes immediately"]
    pub fn subscribe_window(&self, id: WidgetId) -> ListenerGuard<WidgetId> {
        self.listeners.subscribe(id)
    }

    /// The host's notification log.
    pub fn log(&self) -> NotificationLog {
        self.log.clone()
    }
}

// ── Widget trait ──────────────────────────────────────────────────────────

/// Which clickable affordance inside a widget was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// The "clear" button of text and numeric inputs.
    Clear,
    /// The show/hide button of password inputs.
    ToggleVisibility,
}

/// The trait every form input implements.
///
/// The value side of the contract lives in [`crate::contract`]; this trait
/// adds what a host needs to route events, configure widgets from markup and
/// drive their attached lifetime without knowing the concrete type.
pub trait Widget: Focusable + Clearable + 'static {
    fn id(&self) -> WidgetId;

    /// Markup name of the widget type, e.g. `"InputNumber"`.
    fn kind(&self) -> &'static str;

    /// Handle a targeted event. `rect` is the widget's bounding box.
    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &mut EventCtx) -> EventResult;

    /// Handle a window-level event. Only called while subscribed.
    fn on_window_event(&mut self, _event: &UiEvent, _rect: Rect, _ctx: &mut EventCtx) -> EventResult {
        EventResult::Ignored
    }

    /// Called when the host attaches the widget.
    fn attached(&mut self, _ctx: &AttachCtx<'_>) {}

    /// Called when the host detaches the widget. Must release everything
    /// acquired in [`Widget::attached`].
    fn detached(&mut self) {}

    /// Apply a markup attribute. `None` means the attribute was removed.
    ///
    /// Returns `false` when the widget does not know `name`.
    fn set_attribute(&mut self, name: &str, value: Option<&str>) -> bool;

    /// Press an affordance. Returns `false` when it is absent or hidden.
    fn activate(&mut self, _affordance: Affordance, _ctx: &mut EventCtx) -> bool {
        false
    }

    /// The value as text, for logs and tooling.
    fn display_value(&self) -> String;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ── Element ───────────────────────────────────────────────────────────────

/// A type-erased widget, the unit a [`crate::form::Form`] owns.
///
/// Any `Widget` converts to `Element` via `From` / `Into`. The concrete type
/// is recovered with [`Element::downcast_ref`] / [`Element::downcast_mut`].
pub struct Element(Box<dyn Widget>);

impl Element {
    pub fn new<W: Widget>(w: W) -> Self {
        Self(Box::new(w))
    }

    pub fn downcast_ref<W: Widget>(&self) -> Option<&W> {
        self.0.as_any().downcast_ref::<W>()
    }

    pub fn downcast_mut<W: Widget>(&mut self) -> Option<&mut W> {
        self.0.as_any_mut().downcast_mut::<W>()
    }
}

impl Deref for Element {
    type Target = dyn Widget;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for Element {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

impl<W: Widget> From<W> for Element {
    fn from(w: W) -> Self {
        Self::new(w)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.0.id())
            .field("kind", &self.0.kind())
            .finish()
    }
}
