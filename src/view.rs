use crate::render::ChunkList;

/// Display targets the submission controller writes to. Implementations map
/// each call onto the page elements; the controller is the only writer.
pub trait View {
    fn set_submit_enabled(&mut self, enabled: bool);
    fn set_loading(&mut self, visible: bool);
    /// Hide and empty the chunk area and clear the answer text.
    fn clear_output(&mut self);
    /// Replace the chunk area's content and reveal it.
    fn show_chunks(&mut self, chunks: &ChunkList);
    /// Plain text; never interpreted as markup.
    fn set_answer(&mut self, text: &str);
    fn alert(&mut self, message: &str);
}

/// In-memory model of the page, in the state it would be after each call.
#[derive(Debug, Clone, PartialEq)]
pub struct PageModel {
    pub submit_enabled: bool,
    pub loading_visible: bool,
    pub chunks_visible: bool,
    pub chunks: Option<ChunkList>,
    pub answer: String,
    pub alerts: Vec<String>,
    /// Number of `clear_output` calls, one per submission that left `Idle`.
    pub clears: usize,
}

impl Default for PageModel {
    fn default() -> Self {
        Self {
            submit_enabled: true,
            loading_visible: false,
            chunks_visible: false,
            chunks: None,
            answer: String::new(),
            alerts: Vec::new(),
            clears: 0,
        }
    }
}

impl View for PageModel {
    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading_visible = visible;
    }

    fn clear_output(&mut self) {
        self.chunks_visible = false;
        self.chunks = None;
        self.answer.clear();
        self.clears += 1;
    }

    fn show_chunks(&mut self, chunks: &ChunkList) {
        self.chunks = Some(chunks.clone());
        self.chunks_visible = true;
    }

    fn set_answer(&mut self, text: &str) {
        self.answer = text.to_string();
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
