//! HTTP API: the presentation boundary.
//!
//! The interactive UI is an external collaborator; it uploads the
//! spreadsheet files, renders the summaries this API returns, and asks for
//! the two-sheet export. Every request is stateless: all state is rebuilt
//! from the uploaded files on each invocation.

pub mod logs;
pub mod server;
pub mod types;
