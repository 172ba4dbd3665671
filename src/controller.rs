//! Submission lifecycle: validate, reset the page, talk to the backend,
//! render the outcome, and always hand the submit control back.

use crate::config::Flow;
use crate::error::{ChatError, Stage};
use crate::models::{
    check_distances, ChatResponse, ChatResult, GenerateResponse, Prompt, RelevantChunksResponse,
    RequestState, RetrievedChunk,
};
use crate::render::{render_chunks, render_error};
use crate::transport::{Endpoint, Transport};
use crate::view::View;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error, info, info_span, warn, Instrument};

pub struct SubmissionController<T, V> {
    transport: T,
    view: V,
    flow: Flow,
    state: RequestState,
}

impl<T: Transport, V: View> SubmissionController<T, V> {
    pub fn new(transport: T, view: V, flow: Flow) -> Self {
        Self {
            transport,
            view,
            flow,
            state: RequestState::Idle,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one submission to completion. A blank prompt raises an alert and
    /// leaves the state untouched; anything else ends in `Succeeded` or
    /// `Failed` with the submit control enabled again.
    pub async fn submit(&mut self, raw: &str) -> &RequestState {
        let prompt = match Prompt::parse(raw) {
            Ok(prompt) => prompt,
            Err(err) => {
                warn!("rejected empty prompt");
                self.view.alert(&err.to_string());
                return &self.state;
            }
        };

        let span = info_span!(
            "submission",
            request_id = %uuid::Uuid::new_v4(),
            flow = ?self.flow,
        );
        self.run(prompt).instrument(span).await;
        &self.state
    }

    async fn run(&mut self, prompt: Prompt) {
        self.enter_submitting();

        // Rendering happens inside the guarded future too, so a panicking view
        // cannot skip the exit action.
        let settled = AssertUnwindSafe(self.settle(&prompt)).catch_unwind().await;
        if let Err(panic) = settled {
            let message = ChatError::Internal(panic_message(&*panic)).to_string();
            error!(error = %message, "submission panicked");
            let view = &mut self.view;
            let shown = std::panic::catch_unwind(AssertUnwindSafe(|| {
                view.set_answer(&render_error(&message))
            }));
            if shown.is_err() {
                warn!("could not render failure message");
            }
            self.state = RequestState::Failed(message);
        }

        self.exit_submitting();
    }

    async fn settle(&mut self, prompt: &Prompt) {
        match self.exchange(prompt).await {
            Ok(result) => {
                // The two-step flow already put its chunks on screen.
                if !matches!(self.state, RequestState::Retrieved(_)) {
                    self.view.show_chunks(&render_chunks(&result.relevant_chunks));
                }
                self.view.set_answer(&result.answer);
                info!(chunks = result.relevant_chunks.len(), "submission succeeded");
                self.state = RequestState::Succeeded(result);
            }
            Err(err) => {
                let message = err.to_string();
                error!(error = %message, "submission failed");
                self.view.set_answer(&render_error(&message));
                self.state = RequestState::Failed(message);
            }
        }
    }

    fn enter_submitting(&mut self) {
        self.state = RequestState::Submitting;
        self.view.set_submit_enabled(false);
        self.view.set_loading(true);
        self.view.clear_output();
    }

    fn exit_submitting(&mut self) {
        self.view.set_submit_enabled(true);
        self.view.set_loading(false);
    }

    async fn exchange(&mut self, prompt: &Prompt) -> Result<ChatResult, ChatError> {
        match self.flow {
            Flow::Combined => self.exchange_combined(prompt).await,
            Flow::TwoStep => self.exchange_two_step(prompt).await,
        }
    }

    async fn exchange_combined(&mut self, prompt: &Prompt) -> Result<ChatResult, ChatError> {
        debug!("requesting chunks and answer");
        let value = self
            .transport
            .send(Endpoint::Chat, json!({ "prompt": prompt.as_str() }))
            .await?;
        let resp: ChatResponse = decode(value)?;
        check_distances(&resp.relevant_chunks)?;
        Ok(ChatResult {
            relevant_chunks: resp.relevant_chunks,
            answer: resp.llm_response,
        })
    }

    async fn exchange_two_step(&mut self, prompt: &Prompt) -> Result<ChatResult, ChatError> {
        debug!("fetching relevant chunks");
        let chunks = self
            .fetch_chunks(prompt)
            .await
            .map_err(|e| e.in_stage(Stage::Retrieval))?;
        info!(count = chunks.len(), "received chunks");

        self.view.show_chunks(&render_chunks(&chunks));
        self.state = RequestState::Retrieved(chunks.clone());

        debug!("requesting generated answer");
        let answer = self
            .generate(prompt, &chunks)
            .await
            .map_err(|e| e.in_stage(Stage::Generation))?;
        info!("received final response");

        Ok(ChatResult {
            relevant_chunks: chunks,
            answer,
        })
    }

    async fn fetch_chunks(&self, prompt: &Prompt) -> Result<Vec<RetrievedChunk>, ChatError> {
        let value = self
            .transport
            .send(Endpoint::RelevantChunks, json!({ "prompt": prompt.as_str() }))
            .await?;
        let resp: RelevantChunksResponse = decode(value)?;
        check_distances(&resp.relevant_chunks)?;
        Ok(resp.relevant_chunks)
    }

    async fn generate(
        &self,
        prompt: &Prompt,
        chunks: &[RetrievedChunk],
    ) -> Result<String, ChatError> {
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let value = self
            .transport
            .send(
                Endpoint::Generate,
                json!({ "prompt": prompt.as_str(), "chunks": texts }),
            )
            .await?;
        let resp: GenerateResponse = decode(value)?;
        Ok(resp.response)
    }
}

fn decode<R: DeserializeOwned>(value: Value) -> Result<R, ChatError> {
    serde_json::from_value(value).map_err(|e| ChatError::Decode(e.to_string()))
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
