//! Server-side script definitions (stored procedures and triggers).

use serde::{Deserialize, Serialize};

/// A named server-side stored procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureDefinition {
    /// Unique script identifier within the collection.
    pub id: String,
    /// The script body, in the store's scripting language.
    pub body: String,
}

impl ProcedureDefinition {
    /// Create a new stored procedure definition.
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }
}

/// When a trigger fires relative to its operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    /// Before the operation is applied.
    Pre,
    /// After the operation is applied.
    Post,
}

/// The document operation a trigger is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerOperation {
    /// Document creation.
    Create,
    /// Document replacement.
    Replace,
    /// Document deletion.
    Delete,
}

/// A named server-side trigger.
///
/// Triggers are only registered by this core; the store invokes them
/// implicitly on matching operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerDefinition {
    /// Unique script identifier within the collection.
    pub id: String,
    /// The script body, in the store's scripting language.
    pub body: String,
    /// When the trigger fires.
    pub trigger_type: TriggerType,
    /// The operation the trigger is bound to.
    pub trigger_operation: TriggerOperation,
}

impl TriggerDefinition {
    /// Create a new trigger definition.
    pub fn new(
        id: impl Into<String>,
        body: impl Into<String>,
        trigger_type: TriggerType,
        trigger_operation: TriggerOperation,
    ) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
            trigger_type,
            trigger_operation,
        }
    }
}
