pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod render;
pub mod telemetry;
pub mod transport;
pub mod view;

#[cfg(feature = "desktop")]
mod commands;
#[cfg(feature = "desktop")]
mod webview;

pub use config::{Config, Flow};
pub use controller::SubmissionController;
pub use error::{ChatError, ConfigError};
pub use transport::{Endpoint, HttpTransport, Transport};
pub use view::{PageModel, View};

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::chat::{submit_prompt, ChatSession};
    use tauri::Manager;

    telemetry::init();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let config = Config::from_env().inspect_err(|e| {
                tracing::error!(error = %e, "invalid configuration");
            })?;
            tracing::info!(backend = %config.backend_url, flow = ?config.flow, "starting DocuMind");

            let transport = HttpTransport::new(config.backend_url.as_str());
            let view = webview::WebviewView::new(app.handle().clone());
            app.manage(ChatSession::new(SubmissionController::new(
                transport,
                view,
                config.flow,
            )));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![submit_prompt])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
