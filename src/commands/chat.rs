use crate::controller::SubmissionController;
use crate::error::ChatError;
use crate::transport::HttpTransport;
use crate::webview::WebviewView;
use tauri::State;
use tokio::sync::Mutex;
use tracing::warn;

pub type DesktopController = SubmissionController<HttpTransport, WebviewView>;

pub struct ChatSession {
    controller: Mutex<DesktopController>,
}

impl ChatSession {
    pub fn new(controller: DesktopController) -> Self {
        Self {
            controller: Mutex::new(controller),
        }
    }
}

/// Form submission from the page. The page disables its submit button while a
/// request runs; a submission that arrives anyway is turned away, not queued.
#[tauri::command]
pub async fn submit_prompt(session: State<'_, ChatSession>, prompt: String) -> Result<(), ChatError> {
    let Ok(mut controller) = session.controller.try_lock() else {
        warn!("submission ignored, another request is in flight");
        return Err(ChatError::Busy);
    };
    controller.submit(&prompt).await;
    Ok(())
}
