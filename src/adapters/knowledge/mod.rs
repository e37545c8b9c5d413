//! Knowledge Responder Adapters.
//!
//! - `ContentFirstResponder` - stored site text first, then a bounded model call
//! - `KnowledgePrompt` - sales-assistant instructions for the model

mod content_first;
mod prompt;

pub use content_first::{
    ContentFirstResponder, BUSY_REPLY, FOUND_PREFIX, MAX_EXCERPT_CHARS, NOT_CONFIGURED_REPLY,
};
pub use prompt::KnowledgePrompt;
