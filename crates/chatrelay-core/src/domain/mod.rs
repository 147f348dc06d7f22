//! Domain types for the relay.
//!
//! Pure data structures with no infrastructure dependencies.

pub mod chat;
pub mod completion;

pub use chat::{ChatMessage, ConversationWindow, InboundChat, MessageRole};
pub use completion::{ChatReply, CompletionRequest, ExtractedCompletion, ProbeReport};
