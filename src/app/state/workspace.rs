use super::surface::EditorSurface;
use crate::app::config::EditorConfig;
use crate::domain::document::MarkdownDocument;
use crate::domain::script::SurfaceSignal;
use crate::domain::sync::TextBridge;
use crate::domain::window::{WindowHost, WindowId};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct DocumentWindow<'a> {
    pub id: WindowId,
    pub title: String,
    pub document: MarkdownDocument,
    pub bridge: TextBridge,
    pub surface: EditorSurface<'a>,
    /// Text last read from or written to the bound path.
    pub on_disk: Option<String>,
}

/// All open document tabs. They form a single tab group in tab order.
#[derive(Debug, Clone, Default)]
pub struct Workspace<'a> {
    windows: Vec<DocumentWindow<'a>>,
    active: Option<WindowId>,
    next_id: u64,
}

impl<'a> Workspace<'a> {
    /// Adds a tab after the others and makes it the key window. Its surface
    /// starts loading right away.
    pub fn open(&mut self, document: MarkdownDocument, config: &EditorConfig) -> WindowId {
        self.next_id += 1;
        let id = WindowId(self.next_id);
        let mut surface = EditorSurface::new(config);
        surface.load();
        let on_disk = document.path.as_ref().map(|_| document.text.clone());
        self.windows.push(DocumentWindow {
            id,
            title: document.display_name(),
            on_disk,
            document,
            bridge: TextBridge::new(),
            surface,
        });
        self.active = Some(id);
        id
    }

    /// Removes a tab; the tab to its left (or the new first tab) becomes key.
    pub fn close(&mut self, id: WindowId) -> Option<DocumentWindow<'a>> {
        let index = self.index_of(id)?;
        let window = self.windows.remove(index);
        if self.active == Some(id) {
            self.active = self
                .windows
                .get(index.saturating_sub(1))
                .map(|w| w.id);
        }
        Some(window)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentWindow<'a>> {
        self.windows.iter()
    }

    pub fn get(&self, id: WindowId) -> Option<&DocumentWindow<'a>> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut DocumentWindow<'a>> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    pub fn active_id(&self) -> Option<WindowId> {
        self.active
    }

    pub fn active(&self) -> Option<&DocumentWindow<'a>> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut DocumentWindow<'a>> {
        let id = self.active?;
        self.get_mut(id)
    }

    pub fn index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id == id)
    }

    pub fn find_by_path(&self, path: &Path) -> Option<WindowId> {
        self.windows
            .iter()
            .find(|w| w.document.path.as_deref() == Some(path))
            .map(|w| w.id)
    }

    /// Moves the key window `offset` tabs over, wrapping at the ends.
    pub fn cycle(&mut self, offset: isize) {
        let Some(index) = self.active.and_then(|id| self.index_of(id)) else {
            return;
        };
        let len = self.windows.len() as isize;
        let next = (index as isize + offset).rem_euclid(len) as usize;
        self.active = Some(self.windows[next].id);
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.windows.iter().any(|w| w.document.dirty)
    }

    /// Pushes native text changes to each surface, as far as its bridge allows.
    pub fn reconcile(&mut self) {
        for window in &mut self.windows {
            if let Some(call) = window.bridge.on_native_change(&window.document.text) {
                tracing::trace!(window = %window.id, "pushing text to surface");
                window.surface.evaluate(&call.to_script());
            }
        }
    }

    pub fn drain_surface_signals(&mut self) -> Vec<(WindowId, SurfaceSignal)> {
        self.windows
            .iter_mut()
            .flat_map(|w| {
                let id = w.id;
                w.surface
                    .drain_signals()
                    .into_iter()
                    .map(move |signal| (id, signal))
            })
            .collect()
    }
}

impl WindowHost for Workspace<'_> {
    fn windows(&self) -> Vec<WindowId> {
        self.windows.iter().map(|w| w.id).collect()
    }

    fn key_window(&self) -> Option<WindowId> {
        self.active
    }

    fn tab_peers(&self, window: WindowId) -> Vec<WindowId> {
        if self.index_of(window).is_none() {
            return Vec::new();
        }
        self.windows()
    }

    fn activate(&mut self, window: WindowId) {
        if self.index_of(window).is_some() {
            self.active = Some(window);
        }
    }

    fn title(&self, window: WindowId) -> Option<String> {
        self.get(window).map(|w| w.title.clone())
    }

    fn set_title(&mut self, window: WindowId, title: String) {
        if let Some(w) = self.get_mut(window) {
            w.title = title;
        }
    }
}
