//! Keeps the native document text and the surface-held text equal.
//!
//! Either side can originate a change. The bridge remembers what it last
//! sent to the surface and whether it is in the middle of applying a change
//! that came *from* the surface, so neither side's update is ever echoed
//! back to where it came from.

use super::script::ScriptCall;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SyncStatus {
    #[default]
    Idle,
    /// A surface-originated change has been written to the native value and
    /// the native side has not yet finished observing it.
    ApplyingRemoteUpdate,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBridge {
    last_sent: Option<String>,
    ready: bool,
    status: SyncStatus,
}

impl TextBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn last_sent(&self) -> Option<&str> {
        self.last_sent.as_deref()
    }

    /// The surface finished loading: it always receives the current native text.
    pub fn on_ready(&mut self, native: &str) -> ScriptCall {
        self.ready = true;
        self.push(native)
    }

    pub fn should_push(&self, native: &str) -> bool {
        self.ready
            && self.status == SyncStatus::Idle
            && self.last_sent.as_deref() != Some(native)
    }

    pub fn on_native_change(&mut self, native: &str) -> Option<ScriptCall> {
        if !self.should_push(native) {
            return None;
        }
        Some(self.push(native))
    }

    /// Applies surface text to the native value. Returns whether the native
    /// value actually changed. The caller must call [`TextBridge::settle`] on
    /// a later tick, after the native side has reacted to the change.
    pub fn on_remote_change(&mut self, native: &mut String, text: String) -> bool {
        self.status = SyncStatus::ApplyingRemoteUpdate;
        self.last_sent = Some(text.clone());
        if *native == text {
            return false;
        }
        *native = text;
        true
    }

    pub fn settle(&mut self) {
        self.status = SyncStatus::Idle;
    }

    fn push(&mut self, native: &str) -> ScriptCall {
        self.last_sent = Some(native.to_string());
        ScriptCall::SetMarkdown(native.to_string())
    }
}
