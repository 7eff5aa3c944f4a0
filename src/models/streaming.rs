//! Streaming session models.

use serde::{Deserialize, Serialize};

/// A market streaming session.
///
/// Sessions are short-lived; the id must be used to open the event stream
/// within minutes of creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSession {
    /// URL of the event stream
    pub url: String,
    /// Session id to pass as `sessionid`
    pub sessionid: String,
}
