use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::AppState,
};
use crate::domain::script::{ScriptCall, SurfaceSignal};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::EditorInput(key) => {
            if let Some(window) = state.workspace.active_mut() {
                window.surface.input(*key);
            }
            UpdateResult::Handled(None)
        }
        Action::EditorScroll(rows) => {
            if let Some(window) = state.workspace.active_mut() {
                window.surface.scroll(*rows);
            }
            UpdateResult::Handled(None)
        }
        Action::Undo => UpdateResult::Handled(evaluate(state, ScriptCall::Undo)),
        Action::Redo => UpdateResult::Handled(evaluate(state, ScriptCall::Redo)),
        Action::ToggleBold => UpdateResult::Handled(evaluate(state, ScriptCall::ToggleBold)),
        Action::ToggleItalic => UpdateResult::Handled(evaluate(state, ScriptCall::ToggleItalic)),
        Action::Surface(id, signal) => {
            let Some(window) = state.workspace.get_mut(*id) else {
                tracing::debug!(window = %id, "signal from a closed tab");
                return UpdateResult::Handled(None);
            };
            match signal {
                SurfaceSignal::Ready => {
                    let call = window.bridge.on_ready(&window.document.text);
                    window.surface.evaluate(&call.to_script());
                    UpdateResult::Handled(None)
                }
                SurfaceSignal::ContentChanged(text) => {
                    if window
                        .bridge
                        .on_remote_change(&mut window.document.text, text.clone())
                    {
                        window.document.dirty = true;
                    }
                    UpdateResult::Handled(Some(Command::SettleRemoteUpdate(*id)))
                }
            }
        }
        Action::RemoteUpdateSettled(id) => {
            if let Some(window) = state.workspace.get_mut(*id) {
                window.bridge.settle();
            }
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

fn evaluate(state: &mut AppState, call: ScriptCall) -> Option<Command> {
    if let Some(window) = state.workspace.active_mut() {
        window.surface.evaluate(&call.to_script());
    }
    None
}
