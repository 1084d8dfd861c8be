//! Chat front end state: the bubble list, the send flow, and the HTTP
//! transport that talks to the daemon.

pub mod chat;
pub mod log;
pub mod send_fsm;
pub mod transport;

pub use chat::{ChatClient, PendingSend, ERROR_BUBBLE_TEXT, PLACEHOLDER_TEXT};
pub use log::{MessageLog, UiMessage};
pub use transport::{HttpTransport, MessageTransport};
