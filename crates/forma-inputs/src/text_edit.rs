use forma_core::input::Key;

use crate::event::UiEvent;

/// What a widget lets its editing surface do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditPolicy {
    /// Text may change (not disabled, not read-only).
    pub editable: bool,
    /// Selected text may leave through the clipboard.
    pub copyable: bool,
    /// Enter inserts a line break.
    pub multiline: bool,
}

impl EditPolicy {
    pub const SINGLE_LINE: EditPolicy = EditPolicy { editable: true, copyable: true, multiline: false };
    pub const MULTI_LINE: EditPolicy = EditPolicy { editable: true, copyable: true, multiline: true };
}

/// Outcome of [`TextEditState::on_event`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// The event was handled.
    pub consumed: bool,
    /// The text changed; the owner should commit it.
    pub changed: bool,
}

impl EditOutcome {
    const IGNORED: EditOutcome = EditOutcome { consumed: false, changed: false };
    const MOVED: EditOutcome = EditOutcome { consumed: true, changed: false };
    const EDITED: EditOutcome = EditOutcome { consumed: true, changed: true };

    fn edited_if(changed: bool) -> Self {
        EditOutcome { consumed: true, changed }
    }
}

/// The editable text surface behind text-like inputs (caret and anchor).
///
/// The surface text is what the user sees and types into; the widget decides
/// how it maps to the stored value. All offsets are byte offsets on UTF-8
/// character boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextEditState {
    text: String,
    /// Byte offset of the caret.
    cursor: usize,
    /// Byte offset of the selection anchor. `cursor == anchor` means no selection.
    anchor: usize,
}

impl TextEditState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self { text, cursor: end, anchor: end }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the whole text, caret at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
        self.anchor = self.cursor;
    }

    /// Returns `(lo, hi)` sorted byte range of the selection.
    #[inline]
    pub fn sel_range(&self) -> (usize, usize) {
        (self.cursor.min(self.anchor), self.cursor.max(self.anchor))
    }

    #[inline]
    pub fn has_selection(&self) -> bool {
        self.cursor != self.anchor
    }

    pub fn selected_text(&self) -> &str {
        let (lo, hi) = self.sel_range();
        &self.text[lo..hi]
    }

    // ── cursor movement ───────────────────────────────────────────────────

    /// Move one character to the left.
    ///
    /// If there is a selection and `shift` is false, collapses to the left edge.
    pub fn move_left(&mut self, shift: bool) {
        if !shift && self.has_selection() {
            let left = self.sel_range().0;
            self.cursor = left;
            self.anchor = left;
        } else {
            self.cursor = prev_char(&self.text, self.cursor);
            if !shift { self.anchor = self.cursor; }
        }
    }

    pub fn move_right(&mut self, shift: bool) {
        if !shift && self.has_selection() {
            let right = self.sel_range().1;
            self.cursor = right;
            self.anchor = right;
        } else {
            self.cursor = next_char(&self.text, self.cursor);
            if !shift { self.anchor = self.cursor; }
        }
    }

    /// Ctrl+Left.
    pub fn move_word_left(&mut self, shift: bool) {
        self.cursor = prev_word(&self.text, self.cursor);
        if !shift { self.anchor = self.cursor; }
    }

    /// Ctrl+Right.
    pub fn move_word_right(&mut self, shift: bool) {
        self.cursor = next_word(&self.text, self.cursor);
        if !shift { self.anchor = self.cursor; }
    }

    pub fn move_home(&mut self, shift: bool) {
        self.cursor = 0;
        if !shift { self.anchor = self.cursor; }
    }

    pub fn move_end(&mut self, shift: bool) {
        self.cursor = self.text.len();
        if !shift { self.anchor = self.cursor; }
    }

    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.cursor = self.text.len();
    }

    // ── editing ───────────────────────────────────────────────────────────

    /// Insert `s` at the cursor, replacing the selection if any.
    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
        self.anchor = self.cursor;
    }

    /// Backspace. Returns `true` if text changed.
    pub fn delete_backward(&mut self) -> bool {
        if self.delete_selection() { return true; }
        if self.cursor == 0 { return false; }
        let prev = prev_char(&self.text, self.cursor);
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        self.anchor = prev;
        true
    }

    /// Delete key. Returns `true` if text changed.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() { return true; }
        if self.cursor >= self.text.len() { return false; }
        let next = next_char(&self.text, self.cursor);
        self.text.drain(self.cursor..next);
        true
    }

    // ── clipboard ─────────────────────────────────────────────────────────

    /// Copy the selection to the system clipboard. No-op without a selection.
    pub fn copy(&self) {
        if !self.has_selection() { return; }
        match arboard::Clipboard::new() {
            Ok(mut cb) => {
                if let Err(e) = cb.set_text(self.selected_text().to_string()) {
                    log::warn!("clipboard write failed: {e}");
                }
            }
            Err(e) => log::warn!("clipboard unavailable: {e}"),
        }
    }

    /// Cut the selection; returns `true` if text changed.
    pub fn cut(&mut self) -> bool {
        if !self.has_selection() { return false; }
        self.copy();
        self.delete_selection()
    }

    /// Paste at the cursor; returns `true` if text changed.
    pub fn paste(&mut self, multiline: bool) -> bool {
        let text = match arboard::Clipboard::new().and_then(|mut cb| cb.get_text()) {
            Ok(t) => t,
            Err(e) => {
                log::debug!("nothing to paste: {e}");
                return false;
            }
        };
        let text = if multiline { text } else { text.replace(['\r', '\n'], " ") };
        if text.is_empty() { return false; }
        self.insert_str(&text);
        true
    }

    // ── event handling ────────────────────────────────────────────────────

    /// Handle keyboard text editing events under `policy`.
    ///
    /// Navigation and selection always work; anything that would change the
    /// text is swallowed when the policy is not editable. Escape, Tab and
    /// the arrow keys a widget gives its own meaning (Up/Down) are left to
    /// the caller.
    pub fn on_event(&mut self, event: &UiEvent, policy: EditPolicy) -> EditOutcome {
        match event {
            UiEvent::TextInput { text } => {
                if !policy.editable { return EditOutcome::MOVED; }
                self.insert_str(text);
                EditOutcome::EDITED
            }

            UiEvent::KeyPress { key, modifiers } => {
                let shift = modifiers.shift;
                let ctrl = modifiers.ctrl || modifiers.meta;

                match key {
                    Key::Backspace => {
                        if !policy.editable { return EditOutcome::MOVED; }
                        EditOutcome::edited_if(self.delete_backward())
                    }
                    Key::Delete => {
                        if !policy.editable { return EditOutcome::MOVED; }
                        EditOutcome::edited_if(self.delete_forward())
                    }
                    Key::Enter if policy.multiline => {
                        if !policy.editable { return EditOutcome::MOVED; }
                        self.insert_str("\n");
                        EditOutcome::EDITED
                    }
                    Key::ArrowLeft => {
                        if ctrl { self.move_word_left(shift); } else { self.move_left(shift); }
                        EditOutcome::MOVED
                    }
                    Key::ArrowRight => {
                        if ctrl { self.move_word_right(shift); } else { self.move_right(shift); }
                        EditOutcome::MOVED
                    }
                    Key::Home => {
                        self.move_home(shift);
                        EditOutcome::MOVED
                    }
                    Key::End => {
                        self.move_end(shift);
                        EditOutcome::MOVED
                    }
                    Key::A if ctrl => {
                        self.select_all();
                        EditOutcome::MOVED
                    }
                    Key::C if ctrl => {
                        if policy.copyable { self.copy(); }
                        EditOutcome::MOVED
                    }
                    Key::X if ctrl => {
                        if !policy.editable || !policy.copyable { return EditOutcome::MOVED; }
                        EditOutcome::edited_if(self.cut())
                    }
                    Key::V if ctrl => {
                        if !policy.editable { return EditOutcome::MOVED; }
                        EditOutcome::edited_if(self.paste(policy.multiline))
                    }
                    _ => EditOutcome::IGNORED,
                }
            }

            _ => EditOutcome::IGNORED,
        }
    }

    // ── private ───────────────────────────────────────────────────────────

    /// Delete selection; returns true if anything was deleted.
    fn delete_selection(&mut self) -> bool {
        if !self.has_selection() { return false; }
        let (lo, hi) = self.sel_range();
        self.text.drain(lo..hi);
        self.cursor = lo;
        self.anchor = lo;
        true
    }
}

// ── UTF-8 helpers ─────────────────────────────────────────────────────────

fn prev_char(s: &str, from: usize) -> usize {
    s[..from].char_indices().next_back().map_or(0, |(i, _)| i)
}

fn next_char(s: &str, from: usize) -> usize {
    s[from..].chars().next().map_or(s.len(), |c| from + c.len_utf8())
}

/// Jump backward over whitespace then word characters.
fn prev_word(s: &str, from: usize) -> usize {
    let trimmed = s[..from].trim_end();
    trimmed.trim_end_matches(|c: char| !c.is_whitespace()).len()
}

/// Jump forward over word characters then whitespace.
fn next_word(s: &str, from: usize) -> usize {
    let after = &s[from..];
    let after_ws = after.trim_start_matches(|c: char| !c.is_whitespace()).trim_start();
    from + (after.len() - after_ws.len())
}
