//! Modal presenter state.

/// Pre-rendered content chosen by whoever opened the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalBody {
    /// Literal text shown verbatim (e.g. an SSH public key).
    Secret(String),
    /// A prompt followed by a URL the operator should open.
    Link { prompt: String, url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub body: ModalBody,
}

impl Modal {
    pub fn secret(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: ModalBody::Secret(text.into()),
        }
    }

    pub fn link(
        title: impl Into<String>,
        prompt: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: ModalBody::Link {
                prompt: prompt.into(),
                url: url.into(),
            },
        }
    }
}

/// Open modals, newest on top.
///
/// Opening while another is shown stacks; only explicit dismissal removes
/// one, and only the topmost.
#[derive(Debug, Clone, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    /// Dismiss the topmost modal.
    pub fn close(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
