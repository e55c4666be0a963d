//! Debug UI interface.
//!
//! The scene declares its parameter panel through these traits every frame,
//! immediate-mode style. The desktop app implements them on top of egui;
//! [`HeadlessUi`] implements them for tests and the CLI.

use std::collections::BTreeMap;

/// Frame-level access to the debug UI.
pub trait DebugUi {
    /// The UI wants exclusive keyboard input this frame.
    fn wants_keyboard(&self) -> bool;

    /// The UI wants exclusive mouse input this frame.
    fn wants_mouse(&self) -> bool;

    /// Declare a window and its contents.
    fn window(&mut self, title: &str, body: &mut dyn FnMut(&mut dyn DebugPanel));
}

/// Widgets inside a window. Editing widgets return `true` when the user
/// changed the value this frame.
pub trait DebugPanel {
    fn text(&mut self, text: &str);

    /// Collapsible section. `id` disambiguates sections sharing a label.
    fn collapsing(&mut self, label: &str, id: usize, body: &mut dyn FnMut(&mut dyn DebugPanel));

    fn drag_float3(&mut self, label: &str, value: &mut [f32; 3]) -> bool;

    /// Edit the RGB channels of `value`; alpha is left as is.
    fn color_edit3(&mut self, label: &str, value: &mut [f32; 4]) -> bool;

    fn button(&mut self, label: &str) -> bool;
}

/// A scripted change for a [`HeadlessUi`] widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEdit {
    Float3([f32; 3]),
    Color([f32; 3]),
    Click,
}

/// Debug UI without a screen.
///
/// Widgets are addressed by path: window title, then `label#id` for each
/// enclosing section, then the widget label, joined with `/`
/// (e.g. `Window/Quad#1/Rotation`). Scripted edits fire once, the next time
/// a widget with that path is declared. Every declared widget is appended to
/// the transcript. Sections are always expanded.
#[derive(Debug, Default)]
pub struct HeadlessUi {
    wants_keyboard: bool,
    wants_mouse: bool,
    edits: BTreeMap<String, UiEdit>,
    path: Vec<String>,
    transcript: Vec<String>,
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture_keyboard(&mut self, captured: bool) {
        self.wants_keyboard = captured;
    }

    pub fn capture_mouse(&mut self, captured: bool) {
        self.wants_mouse = captured;
    }

    /// Queue an edit for the widget at `path`.
    pub fn script(&mut self, path: impl Into<String>, edit: UiEdit) {
        self.edits.insert(path.into(), edit);
    }

    /// Edits queued but not yet fired.
    pub fn pending(&self) -> usize {
        self.edits.len()
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    fn declare(&mut self, label: &str) -> Option<UiEdit> {
        self.path.push(label.to_owned());
        let path = self.path.join("/");
        self.path.pop();
        let edit = self.edits.remove(&path);
        self.transcript.push(path);
        edit
    }
}

impl DebugUi for HeadlessUi {
    fn wants_keyboard(&self) -> bool {
        self.wants_keyboard
    }

    fn wants_mouse(&self) -> bool {
        self.wants_mouse
    }

    fn window(&mut self, title: &str, body: &mut dyn FnMut(&mut dyn DebugPanel)) {
        self.path.push(title.to_owned());
        body(self);
        self.path.pop();
    }
}

impl DebugPanel for HeadlessUi {
    fn text(&mut self, text: &str) {
        let path = self.path.join("/");
        self.transcript.push(format!("{path}: {text}"));
    }

    fn collapsing(&mut self, label: &str, id: usize, body: &mut dyn FnMut(&mut dyn DebugPanel)) {
        self.path.push(format!("{label}#{id}"));
        body(self);
        self.path.pop();
    }

    fn drag_float3(&mut self, label: &str, value: &mut [f32; 3]) -> bool {
        match self.declare(label) {
            Some(UiEdit::Float3(v)) => {
                *value = v;
                true
            }
            _ => false,
        }
    }

    fn color_edit3(&mut self, label: &str, value: &mut [f32; 4]) -> bool {
        match self.declare(label) {
            Some(UiEdit::Color([r, g, b])) => {
                value[..3].copy_from_slice(&[r, g, b]);
                true
            }
            _ => false,
        }
    }

    fn button(&mut self, label: &str) -> bool {
        matches!(self.declare(label), Some(UiEdit::Click))
    }
}
