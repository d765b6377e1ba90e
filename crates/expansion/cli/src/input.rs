//! Input document loading
//!
//! The input is one JSON document holding the customer messages and the
//! existing intent hierarchy:
//!
//! ```json
//! {
//!   "customer_messages": [{ "id": 1, "current_message": "...", "conversation_history": [] }],
//!   "intent_mapper": { "primary_intents": [...] }
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use expansion_taxonomy::{HierarchyDocument, IntentHierarchy, Message};

use crate::error::{CliError, CliResult};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InputDocument {
    customer_messages: Vec<RawMessage>,
    intent_mapper: HierarchyDocument,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMessage {
    id: Option<Value>,
    current_message: Option<String>,
    conversation_history: Vec<Value>,
}

impl RawMessage {
    /// Numeric ids (or numeric strings) are kept; anything else falls back
    /// to the message's position in the input.
    fn into_message(self, index: usize) -> Message {
        let id = match &self.id {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
        .unwrap_or(index as u64);

        Message {
            id,
            text: self.current_message.unwrap_or_default(),
            history: self.conversation_history,
        }
    }
}

/// Parsed and validated input.
#[derive(Debug, Clone)]
pub struct InputData {
    pub messages: Vec<Message>,
    pub hierarchy: IntentHierarchy,
}

pub fn load_input(path: &Path) -> CliResult<InputData> {
    info!(path = %path.display(), "Loading data");
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    let data = parse_input(&contents)?;
    info!(
        messages = data.messages.len(),
        intents = data.hierarchy.total_count(),
        "Loaded customer messages"
    );
    Ok(data)
}

pub fn parse_input(contents: &str) -> CliResult<InputData> {
    let doc: InputDocument = serde_json::from_str(contents)?;

    let hierarchy = IntentHierarchy::try_from(doc.intent_mapper)
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;
    let messages = doc
        .customer_messages
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.into_message(i))
        .collect();

    Ok(InputData {
        messages,
        hierarchy,
    })
}
