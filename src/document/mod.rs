//! Word container handling and data structures
//!
//! This module opens .docx payloads, decodes their text, stages their
//! embedded media in a transient workspace, and defines the payload and
//! asset types exchanged with callers.

pub(crate) mod io;
pub mod models;
pub(crate) mod parsing;
pub mod workspace;

pub use models::*;
pub use workspace::TransientWorkspace;
