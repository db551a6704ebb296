//! Chat store - per-provider conversation state
//!
//! Owns both providers' conversations, in-progress drafts, and error slots.
//! All operations are synchronous state transitions with no I/O. UI layers
//! subscribe to a revision channel instead of reaching into globals; the
//! channel ticks on every visible mutation.
//!
//! Conversation mutations additionally mark the store dirty so the caller
//! knows a snapshot is worth persisting.

use parking_lot::RwLock;
use tokio::sync::watch;

use crate::chat::{ErrorInfo, Message, ProviderId, Role};
use crate::window::window_history;

#[derive(Debug, Default)]
struct Lane {
    conversation: Vec<Message>,
    draft: String,
    error: Option<ErrorInfo>,
}

#[derive(Debug, Default)]
struct StoreState {
    lanes: [Lane; 2],
    stick_to_bottom: bool,
    dirty: bool,
}

/// Shared conversation state for both provider lanes.
#[derive(Debug)]
pub struct ChatStore {
    state: RwLock<StoreState>,
    revision: watch::Sender<u64>,
}

impl Default for ChatStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatStore {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: RwLock::new(StoreState::default()),
            revision,
        }
    }

    /// Subscribe to store changes. The value is a monotonic revision
    /// counter; receivers should re-read whatever state they render.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn tick(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    // --- conversation ---

    /// Append a user turn to one lane.
    pub fn append_user(&self, id: ProviderId, text: impl Into<String>) {
        {
            let mut state = self.state.write();
            state.lanes[id.index()].conversation.push(Message::user(text));
            state.dirty = true;
        }
        self.tick();
    }

    /// Append an archived assistant turn to one lane.
    pub fn append_assistant(&self, id: ProviderId, text: impl Into<String>) {
        {
            let mut state = self.state.write();
            state.lanes[id.index()]
                .conversation
                .push(Message::assistant(text));
            state.dirty = true;
        }
        self.tick();
    }

    /// Remove the trailing entry of one lane if it is an assistant turn.
    ///
    /// This is the retry precondition: only a completed assistant reply may
    /// be replaced. No-op (returning false) on an empty lane or when the
    /// last entry is a user turn that never got its reply.
    pub fn drop_last_if_assistant(&self, id: ProviderId) -> bool {
        let dropped = {
            let mut state = self.state.write();
            let conversation = &mut state.lanes[id.index()].conversation;
            if conversation.last().map(|m| m.role) == Some(Role::Assistant) {
                conversation.pop();
                state.dirty = true;
                true
            } else {
                false
            }
        };
        if dropped {
            self.tick();
        }
        dropped
    }

    /// Clear one lane's conversation, draft, and error.
    pub fn clear(&self, id: ProviderId) {
        {
            let mut state = self.state.write();
            state.lanes[id.index()] = Lane::default();
            state.dirty = true;
        }
        self.tick();
    }

    /// Clear both lanes.
    pub fn clear_all(&self) {
        {
            let mut state = self.state.write();
            state.lanes = Default::default();
            state.dirty = true;
        }
        self.tick();
    }

    /// Snapshot one lane's conversation.
    pub fn conversation(&self, id: ProviderId) -> Vec<Message> {
        self.state.read().lanes[id.index()].conversation.clone()
    }

    /// Build the bounded outbound window for one lane.
    pub fn window(&self, id: ProviderId, max: usize) -> Vec<Message> {
        window_history(&self.state.read().lanes[id.index()].conversation, max)
    }

    // --- draft ---

    /// Reset a lane for a fresh request: clears the draft and error slot.
    pub fn begin_draft(&self, id: ProviderId) {
        {
            let mut state = self.state.write();
            let lane = &mut state.lanes[id.index()];
            lane.draft.clear();
            lane.error = None;
        }
        self.tick();
    }

    /// Fold a decoded fragment into a lane's draft.
    ///
    /// A fragment that is exactly one newline is suppressed when the draft
    /// already ends in a newline; some providers' stream framing otherwise
    /// produces runs of blank lines. Everything else, including empty
    /// fragments, is appended verbatim.
    pub fn push_draft(&self, id: ProviderId, fragment: &str) {
        {
            let mut state = self.state.write();
            let lane = &mut state.lanes[id.index()];
            if fragment == "\n" && lane.draft.ends_with('\n') {
                return;
            }
            lane.draft.push_str(fragment);
        }
        self.tick();
    }

    /// Read a lane's in-progress draft.
    pub fn draft(&self, id: ProviderId) -> String {
        self.state.read().lanes[id.index()].draft.clone()
    }

    /// Commit a lane's draft into its conversation.
    ///
    /// Archiving an empty draft is a no-op (e.g. a request cancelled before
    /// any bytes arrived). Returns whether anything was archived.
    pub fn archive_draft(&self, id: ProviderId) -> bool {
        let archived = {
            let mut state = self.state.write();
            let lane = &mut state.lanes[id.index()];
            if lane.draft.is_empty() {
                false
            } else {
                let text = std::mem::take(&mut lane.draft);
                lane.conversation.push(Message::assistant(text));
                state.dirty = true;
                true
            }
        };
        if archived {
            self.tick();
        }
        archived
    }

    // --- errors ---

    pub fn set_error(&self, id: ProviderId, error: ErrorInfo) {
        {
            let mut state = self.state.write();
            state.lanes[id.index()].error = Some(error);
        }
        self.tick();
    }

    pub fn error(&self, id: ProviderId) -> Option<ErrorInfo> {
        self.state.read().lanes[id.index()].error.clone()
    }

    // --- stickiness / persistence bookkeeping ---

    pub fn stick_to_bottom(&self) -> bool {
        self.state.read().stick_to_bottom
    }

    pub fn set_stick_to_bottom(&self, stick: bool) {
        {
            let mut state = self.state.write();
            state.stick_to_bottom = stick;
            state.dirty = true;
        }
        self.tick();
    }

    /// Whether any persisted state changed since the last `mark_clean`.
    pub fn is_dirty(&self) -> bool {
        self.state.read().dirty
    }

    pub fn mark_clean(&self) {
        self.state.write().dirty = false;
    }

    /// Replace all persisted state, e.g. from a restored snapshot.
    ///
    /// Leaves the store clean: restoring is not a change worth writing back.
    pub fn restore(&self, gemini: Vec<Message>, openai: Vec<Message>, stick_to_bottom: bool) {
        {
            let mut state = self.state.write();
            state.lanes[ProviderId::Gemini.index()] = Lane {
                conversation: gemini,
                ..Default::default()
            };
            state.lanes[ProviderId::OpenAi.index()] = Lane {
                conversation: openai,
                ..Default::default()
            };
            state.stick_to_bottom = stick_to_bottom;
            state.dirty = false;
        }
        self.tick();
    }
}
