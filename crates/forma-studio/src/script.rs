//! Line-oriented interaction scripts.
//!
//! One command per line; blank lines and lines starting with `#` are
//! skipped. Widgets are addressed by the name they were attached under.

use anyhow::{anyhow, bail, Context, Result};
use forma_inputs::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Focus(String),
    Blur(String),
    Tab { back: bool },
    Type { name: String, text: String },
    Key { name: String, key: Key, shift: bool },
    Down { pos: Point, touches: usize },
    Move { pos: Point, touches: usize },
    Up { pos: Point },
    Cancel,
    Leave,
    Clear(String),
    Press(String),
    Toggle(String),
    Attr { name: String, attr: String, value: Option<String> },
    Detach(String),
    Flush,
    Show,
}

/// Parse one script line. `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = split_word(line);
    let args: Vec<&str> = rest.split_whitespace().collect();

    let cmd = match verb {
        "focus"  => Command::Focus(name_arg(&args, verb)?),
        "blur"   => Command::Blur(name_arg(&args, verb)?),
        "clear"  => Command::Clear(name_arg(&args, verb)?),
        "press"  => Command::Press(name_arg(&args, verb)?),
        "toggle" => Command::Toggle(name_arg(&args, verb)?),
        "detach" => Command::Detach(name_arg(&args, verb)?),
        "tab"    => Command::Tab { back: args.first() == Some(&"shift") },
        "cancel" => Command::Cancel,
        "leave"  => Command::Leave,
        "flush"  => Command::Flush,
        "show"   => Command::Show,
        "type" => {
            let (name, text) = split_word(rest);
            if name.is_empty() {
                bail!("type: missing widget name");
            }
            Command::Type { name: name.to_string(), text: text.to_string() }
        }
        "key" => {
            let name = name_arg(&args, verb)?;
            let key_name = args.get(1).ok_or_else(|| anyhow!("key: missing key name"))?;
            let key = Key::from_name(key_name).ok_or_else(|| anyhow!("key: unknown key {key_name:?}"))?;
            Command::Key { name, key, shift: args.get(2) == Some(&"shift") }
        }
        "down" => Command::Down { pos: point_arg(&args, verb)?, touches: touches_arg(&args)? },
        "move" => Command::Move { pos: point_arg(&args, verb)?, touches: touches_arg(&args)? },
        "up"   => Command::Up { pos: point_arg(&args, verb)? },
        "attr" => {
            let name = name_arg(&args, verb)?;
            let attr = args.get(1).ok_or_else(|| anyhow!("attr: missing attribute name"))?;
            let value = (args.len() > 2).then(|| args[2..].join(" "));
            Command::Attr { name, attr: attr.to_string(), value }
        }
        other => bail!("unknown command {other:?}"),
    };
    Ok(Some(cmd))
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim_start()),
        None => (s, ""),
    }
}

fn name_arg(args: &[&str], verb: &str) -> Result<String> {
    args.first()
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow!("{verb}: missing widget name"))
}

fn point_arg(args: &[&str], verb: &str) -> Result<Point> {
    let coord = |i: usize, axis: &str| -> Result<f64> {
        let raw = args.get(i).ok_or_else(|| anyhow!("{verb}: missing {axis}"))?;
        raw.parse::<f64>().with_context(|| format!("{verb}: bad {axis} {raw:?}"))
    };
    Ok(Point::new(coord(0, "x")?, coord(1, "y")?))
}

fn touches_arg(args: &[&str]) -> Result<usize> {
    match args.get(2) {
        Some(raw) => raw.parse().with_context(|| format!("bad touch count {raw:?}")),
        None => Ok(0),
    }
}

// ── Session ───────────────────────────────────────────────────────────────

/// A form plus the name resolution scripts need.
pub struct Session {
    form: Form,
}

impl Session {
    pub fn new(form: Form) -> Self {
        Self { form }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    fn widget(&self, name: &str) -> Result<WidgetId> {
        self.form.find(name).ok_or_else(|| anyhow!("no widget named {name:?}"))
    }

    /// Focus `id` unless it already holds focus.
    fn ensure_focus(&mut self, id: WidgetId) {
        if self.form.focused() != Some(id) {
            self.form.focus(id);
        }
    }

    /// Run one command and return the notifications it produced.
    pub fn run(&mut self, cmd: &Command) -> Result<Vec<FormNotification>> {
        match cmd {
            Command::Focus(name) => {
                let id = self.widget(name)?;
                if !self.form.focus(id) {
                    log::warn!("{name} cannot take focus");
                }
            }
            Command::Blur(name) => {
                let id = self.widget(name)?;
                self.form.blur(id);
            }
            Command::Tab { back } => {
                let modifiers = if *back { Modifiers::SHIFT } else { Modifiers::default() };
                self.form.dispatch_ui(UiEvent::KeyPress { key: Key::Tab, modifiers });
            }
            Command::Type { name, text } => {
                let id = self.widget(name)?;
                self.ensure_focus(id);
                self.form.dispatch_ui(UiEvent::TextInput { text: text.clone() });
            }
            Command::Key { name, key, shift } => {
                let id = self.widget(name)?;
                self.ensure_focus(id);
                let modifiers = if *shift { Modifiers::SHIFT } else { Modifiers::default() };
                self.form.dispatch_ui(UiEvent::KeyPress { key: *key, modifiers });
            }
            Command::Down { pos, touches } => {
                self.form.dispatch_ui(UiEvent::PointerDown { pos: *pos, touches: *touches });
            }
            Command::Move { pos, touches } => {
                self.form.dispatch_ui(UiEvent::PointerMove { pos: *pos, touches: *touches });
            }
            Command::Up { pos } => {
                self.form.dispatch_ui(UiEvent::PointerUp { pos: *pos });
            }
            Command::Cancel => {
                self.form.dispatch_ui(UiEvent::PointerCancel);
            }
            Command::Leave => {
                self.form.dispatch_ui(UiEvent::PointerLeave);
            }
            Command::Clear(name) => {
                let id = self.widget(name)?;
                self.form.clear(id);
            }
            Command::Press(name) => {
                let id = self.widget(name)?;
                if !self.form.activate(id, Affordance::Clear) {
                    log::warn!("{name} shows no clear button");
                }
            }
            Command::Toggle(name) => {
                let id = self.widget(name)?;
                if !self.form.activate(id, Affordance::ToggleVisibility) {
                    log::warn!("{name} has no visibility toggle");
                }
            }
            Command::Attr { name, attr, value } => {
                let id = self.widget(name)?;
                if !self.form.set_attribute(id, attr, value.as_deref()) {
                    log::warn!("{name} ignores attribute {attr:?}");
                }
            }
            Command::Detach(name) => {
                let id = self.widget(name)?;
                self.form.detach(id);
            }
            Command::Flush => {
                let ran = self.form.run_deferred();
                log::debug!("ran {ran} deferred tasks");
            }
            Command::Show => {}
        }
        Ok(self.form.take_notifications())
    }

    /// One line per attached widget: name, kind, value, focus marker.
    pub fn describe(&self) -> Vec<String> {
        let focused = self.form.focused();
        self.form
            .ids()
            .filter_map(|id| {
                let el = self.form.element(id)?;
                let name = self.form.name_of(id).unwrap_or_default();
                let marker = if focused == Some(id) { "*" } else { " " };
                Some(format!("{marker} {name:<10} {:<20} {:?}", el.kind(), el.display_value()))
            })
            .collect()
    }

    /// Resolve a notification's widget back to its name.
    pub fn name_of(&self, id: WidgetId) -> &str {
        self.form.name_of(id).unwrap_or("?")
    }
}
