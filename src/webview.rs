//! `View` backed by the desktop webview. Every call becomes a `ui-update`
//! event; `ui/main.js` applies it to the page elements by id.

use crate::render::ChunkList;
use crate::view::View;
use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tracing::warn;

pub const UI_UPDATE_EVENT: &str = "ui-update";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiPatch<'a> {
    SubmitEnabled { enabled: bool },
    Loading { visible: bool },
    ClearOutput,
    Chunks { list: &'a ChunkList },
    Answer { text: &'a str },
}

pub struct WebviewView {
    app: AppHandle,
}

impl WebviewView {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn emit(&self, patch: UiPatch<'_>) {
        if let Err(e) = self.app.emit(UI_UPDATE_EVENT, &patch) {
            warn!(error = %e, ?patch, "failed to deliver ui update");
        }
    }
}

impl View for WebviewView {
    fn set_submit_enabled(&mut self, enabled: bool) {
        self.emit(UiPatch::SubmitEnabled { enabled });
    }

    fn set_loading(&mut self, visible: bool) {
        self.emit(UiPatch::Loading { visible });
    }

    fn clear_output(&mut self) {
        self.emit(UiPatch::ClearOutput);
    }

    fn show_chunks(&mut self, chunks: &ChunkList) {
        self.emit(UiPatch::Chunks { list: chunks });
    }

    fn set_answer(&mut self, text: &str) {
        self.emit(UiPatch::Answer { text });
    }

    /// Blocks until dismissed. Commands run on the async runtime, so this
    /// never waits on the main thread.
    fn alert(&mut self, message: &str) {
        self.app
            .dialog()
            .message(message)
            .title("DocuMind")
            .kind(MessageDialogKind::Warning)
            .blocking_show();
    }
}
