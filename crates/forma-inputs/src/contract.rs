//! The value contract shared by every input.
//!
//! A widget stores its value in a [`ValueCell`]. The cell is the only place a
//! value is written: a candidate goes through the widget's
//! [`FilterPipeline`], is stored, and then observers are told about it, in
//! that order, once per commit.
//!
//! The capability traits ([`ValueHolder`], [`Clearable`], [`Focusable`])
//! expose that contract without tying callers to a concrete widget.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use forma_core::numbers::format_number;

use crate::filter::{FilterError, FilterPipeline};
use crate::widget::WidgetId;

// ── Values ────────────────────────────────────────────────────────────────

/// A type a widget can hold as its value.
///
/// Equality is the value-domain test used by [`ValueHolder::has_same_value_as`];
/// for `f64` that means `NaN` never equals anything.
pub trait FormValue: Clone + PartialEq + 'static {
    /// The value as text, for logs and tooling.
    fn display(&self) -> String;
}

impl FormValue for String {
    fn display(&self) -> String {
        self.clone()
    }
}

impl FormValue for f64 {
    fn display(&self) -> String {
        format_number(*self)
    }
}

// ── Capability traits ─────────────────────────────────────────────────────

/// Something holding a value of type `T`.
pub trait ValueHolder<T: FormValue> {
    /// The stored value.
    fn value(&self) -> &T;

    /// The value [`Clearable::clear_value`] resets to.
    fn default_value(&self) -> T;

    /// Commit `candidate` the way the widget's own input would.
    ///
    /// Fails, leaving the stored value untouched, when a filter rejects it.
    fn set_value(&mut self, candidate: T) -> Result<(), FilterError>;

    /// Value-domain equality with the stored value.
    fn has_same_value_as(&self, candidate: &T) -> bool {
        self.value() == candidate
    }
}

pub trait Clearable {
    /// Reset to the default value through the commit path. Notifies even when
    /// nothing changed; a filter rejecting the default leaves the value as is.
    fn clear_value(&mut self);
}

pub trait Focusable {
    /// Focus the widget and notify. Returns `false`, without notifying, when
    /// the widget cannot take focus.
    fn focus(&mut self) -> bool;

    /// Blur the widget and notify.
    fn blur(&mut self);

    fn is_focused(&self) -> bool;

    /// Whether the widget takes part in focus at all (not disabled).
    fn is_focusable(&self) -> bool;
}

// ── Notifications ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Update,
    Focus,
    Blur,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotificationKind::Update => "update",
            NotificationKind::Focus => "focus",
            NotificationKind::Blur => "blur",
        })
    }
}

/// One entry of a host's notification log.
#[derive(Debug, Clone, PartialEq)]
pub struct FormNotification {
    pub widget: WidgetId,
    pub kind: NotificationKind,
    /// Display form of the value at the time of the notification.
    pub value: String,
}

impl fmt::Display for FormNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.kind, self.widget, self.value)
    }
}

/// Shared, append-only record of notifications, owned by the host.
pub type NotificationLog = Rc<RefCell<Vec<FormNotification>>>;

/// Typed observer lists of one widget.
pub struct Observers<T> {
    update: Vec<Box<dyn FnMut(&T)>>,
    focus: Vec<Box<dyn FnMut()>>,
    blur: Vec<Box<dyn FnMut()>>,
}

impl<T> Observers<T> {
    pub fn new() -> Self {
        Self { update: Vec::new(), focus: Vec::new(), blur: Vec::new() }
    }

    pub fn on_update(&mut self, f: impl FnMut(&T) + 'static) {
        self.update.push(Box::new(f));
    }

    pub fn on_focus(&mut self, f: impl FnMut() + 'static) {
        self.focus.push(Box::new(f));
    }

    pub fn on_blur(&mut self, f: impl FnMut() + 'static) {
        self.blur.push(Box::new(f));
    }
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ── ValueCell ─────────────────────────────────────────────────────────────

/// Value storage plus the commit path.
pub struct ValueCell<T: FormValue> {
    value: T,
    default: T,
    filters: Rc<FilterPipeline<T>>,
    observers: Observers<T>,
    sink: Option<(WidgetId, NotificationLog)>,
    redacted: bool,
}

impl<T: FormValue> ValueCell<T> {
    /// A cell holding `default`, with an empty pipeline.
    pub fn new(default: T) -> Self {
        Self {
            value: default.clone(),
            default,
            filters: Rc::new(FilterPipeline::new()),
            observers: Observers::new(),
            sink: None,
            redacted: false,
        }
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }

    #[inline]
    pub fn default_value(&self) -> &T {
        &self.default
    }

    pub fn set_default(&mut self, default: T) {
        self.default = default;
    }

    pub fn filters(&self) -> &Rc<FilterPipeline<T>> {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: Rc<FilterPipeline<T>>) {
        self.filters = filters;
    }

    pub fn observers_mut(&mut self) -> &mut Observers<T> {
        &mut self.observers
    }

    /// Report notifications to `log` as coming from `id`.
    pub fn bind(&mut self, id: WidgetId, log: NotificationLog) {
        self.sink = Some((id, log));
    }

    pub fn unbind(&mut self) {
        self.sink = None;
    }

    /// Log values masked instead of in clear text.
    pub fn set_redacted(&mut self, redacted: bool) {
        self.redacted = redacted;
    }

    /// Store `value` unfiltered, without notifying.
    ///
    /// For building a widget before anyone can observe it.
    pub fn init(&mut self, value: T) {
        self.value = value;
    }

    /// Filter, store, notify.
    ///
    /// A rejected candidate leaves the stored value as it was and notifies
    /// nobody.
    pub fn commit(&mut self, candidate: T) -> Result<(), FilterError> {
        let value = match self.filters.apply(candidate) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("{e}; keeping {:?}", self.logged_value());
                return Err(e);
            }
        };
        self.value = value;
        self.emit(NotificationKind::Update);
        Ok(())
    }

    /// Commit the default value.
    ///
    /// Notifies even when the value already equals the default. A rejected
    /// default keeps the stored value, like any other rejected commit.
    pub fn clear(&mut self) -> Result<(), FilterError> {
        self.commit(self.default.clone())
    }

    pub fn emit_focus(&mut self) {
        self.emit(NotificationKind::Focus);
    }

    pub fn emit_blur(&mut self) {
        self.emit(NotificationKind::Blur);
    }

    fn emit(&mut self, kind: NotificationKind) {
        match kind {
            NotificationKind::Update => {
                for f in &mut self.observers.update {
                    f(&self.value);
                }
            }
            NotificationKind::Focus => {
                for f in &mut self.observers.focus {
                    f();
                }
            }
            NotificationKind::Blur => {
                for f in &mut self.observers.blur {
                    f();
                }
            }
        }
        if let Some((id, log)) = &self.sink {
            let value = self.logged_value();
            log.borrow_mut().push(FormNotification { widget: *id, kind, value });
        }
    }

    fn logged_value(&self) -> String {
        let text = self.value.display();
        if self.redacted {
            "\u{2022}".repeat(text.chars().count())
        } else {
            text
        }
    }
}

impl<T: FormValue + fmt::Debug> fmt::Debug for ValueCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueCell")
            .field("value", &self.value)
            .field("default", &self.default)
            .field("filters", &self.filters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorded(cell: &mut ValueCell<String>) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        cell.observers_mut().on_update(move |v: &String| sink.borrow_mut().push(v.clone()));
        seen
    }

    #[test]
    fn commit_stores_filtered_value_then_notifies_once() {
        let mut cell = ValueCell::new(String::new());
        cell.set_filters(Rc::new(FilterPipeline::new().with(|s: String| s.to_uppercase())));
        let seen = recorded(&mut cell);

        assert_eq!(cell.commit("abc".to_string()), Ok(()));
        assert_eq!(cell.get(), "ABC");
        assert_eq!(*seen.borrow(), vec!["ABC".to_string()]);
    }

    #[test]
    fn rejected_commit_keeps_value_and_is_silent() {
        let mut cell = ValueCell::new("keep".to_string());
        cell.set_filters(Rc::new(
            FilterPipeline::new().with_fallible(|_: String| Err(FilterError::new("no"))),
        ));
        let seen = recorded(&mut cell);

        assert!(cell.commit("new".to_string()).is_err());
        assert_eq!(cell.get(), "keep");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn clear_notifies_even_when_already_default() {
        let mut cell = ValueCell::new(String::new());
        let seen = recorded(&mut cell);
        assert_eq!(cell.clear(), Ok(()));
        assert_eq!(cell.clear(), Ok(()));
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(cell.get(), "");
    }

    #[test]
    fn clear_rejected_by_a_filter_keeps_the_value() {
        let mut cell = ValueCell::new(String::new());
        cell.set_filters(Rc::new(FilterPipeline::new().with_fallible(|s: String| {
            if s.is_empty() { Err(FilterError::new("empty")) } else { Ok(s) }
        })));
        assert_eq!(cell.commit("x".to_string()), Ok(()));
        let seen = recorded(&mut cell);
        assert!(cell.clear().is_err());
        assert_eq!(cell.get(), "x");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn clear_runs_the_default_through_filters() {
        let mut cell = ValueCell::new(String::new());
        cell.set_filters(Rc::new(FilterPipeline::new().with(|s: String| format!("[{s}]"))));
        let seen = recorded(&mut cell);
        assert_eq!(cell.clear(), Ok(()));
        assert_eq!(cell.get(), "[]");
        assert_eq!(*seen.borrow(), vec!["[]".to_string()]);
    }

    #[test]
    fn bound_cell_writes_to_log() {
        let log: NotificationLog = Rc::new(RefCell::new(Vec::new()));
        let id = WidgetId::new();
        let mut cell = ValueCell::new(0.0_f64);
        cell.bind(id, log.clone());
        cell.emit_focus();
        assert_eq!(cell.commit(2.5), Ok(()));
        cell.emit_blur();
        cell.unbind();
        assert_eq!(cell.commit(3.0), Ok(()));

        let kinds: Vec<_> = log.borrow().iter().map(|n| (n.kind, n.value.clone())).collect();
        assert_eq!(kinds, vec![
            (NotificationKind::Focus, "0".to_string()),
            (NotificationKind::Update, "2.5".to_string()),
            (NotificationKind::Blur, "2.5".to_string()),
        ]);
    }

    #[test]
    fn redacted_values_are_masked_in_the_log() {
        let log: NotificationLog = Rc::new(RefCell::new(Vec::new()));
        let mut cell = ValueCell::new(String::new());
        cell.set_redacted(true);
        cell.bind(WidgetId::new(), log.clone());
        assert_eq!(cell.commit("pwd".to_string()), Ok(()));
        assert_eq!(log.borrow()[0].value, "\u{2022}\u{2022}\u{2022}");
    }

    #[test]
    fn number_display() {
        assert_eq!(1.5_f64.display(), "1.5");
        assert_eq!(f64::NAN.display(), "NaN");
    }
}
