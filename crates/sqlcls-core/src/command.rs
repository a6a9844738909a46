//! The command-dispatch seam.
//!
//! Every protocol-level operation of the wrapped driver (queries, pings,
//! connects, transaction control) funnels through one internal queue. The
//! [`CommandQueue`] trait is that queue's explicit extension point: a unit
//! of work goes in, a queue ticket comes back, and the unit's optional
//! completion callback fires on a later turn when the driver finishes the
//! operation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::Callback;
use crate::error::Result;

/// Protocol-level operation class carried by a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    /// Text protocol query
    Query,
    /// Ping server
    Ping,
    /// Establish connection / handshake
    Connect,
    /// Quit connection
    Quit,
    /// Begin transaction
    Begin,
    /// Commit transaction
    Commit,
    /// Rollback transaction
    Rollback,
}

impl CommandKind {
    /// Lowercase name for log fields.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Query => "query",
            CommandKind::Ping => "ping",
            CommandKind::Connect => "connect",
            CommandKind::Quit => "quit",
            CommandKind::Begin => "begin",
            CommandKind::Commit => "commit",
            CommandKind::Rollback => "rollback",
        }
    }
}

/// Ticket assigned by the queue when a command is accepted.
///
/// The binding layer passes tickets through unchanged; equality against the
/// inner queue's ticket is how pass-through is asserted in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommandId(u64);

impl CommandId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A unit of work submitted to the driver's command queue.
///
/// The callback is optional: fire-and-forget commands (a `quit`, a ping
/// nobody waits on) carry `None` and must cross every layer untouched.
pub struct Command<R> {
    /// Operation class
    pub kind: CommandKind,
    /// SQL text, for commands that carry one
    pub sql: Option<String>,
    /// Completion callback, invoked once by the driver
    pub callback: Option<Callback<R>>,
}

impl<R> Command<R> {
    /// Create a command with no SQL and no callback.
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            sql: None,
            callback: None,
        }
    }

    /// Shorthand for a `Query` command with the given SQL.
    pub fn query(sql: impl Into<String>) -> Self {
        Self::new(CommandKind::Query).sql(sql)
    }

    /// Set the SQL text.
    pub fn sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    /// Attach a completion callback.
    pub fn callback(mut self, callback: impl FnOnce(Result<R>) + Send + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Whether this command carries a completion callback.
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl<R> fmt::Debug for Command<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("kind", &self.kind)
            .field("sql", &self.sql)
            .field("has_callback", &self.callback.is_some())
            .finish_non_exhaustive()
    }
}

/// The driver's command-dispatch entry point.
pub trait CommandQueue: Send + Sync {
    /// Reply value delivered to command callbacks.
    type Reply: Send + 'static;

    /// Submit a unit of work for execution on a later turn.
    ///
    /// The returned ticket identifies the queued command. Execution errors
    /// are delivered error-first through the command's callback, not here.
    fn enqueue(&self, command: Command<Self::Reply>) -> CommandId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_callback_presence() {
        let bare: Command<()> = Command::new(CommandKind::Ping);
        assert!(!bare.has_callback());
        assert_eq!(bare.sql, None);

        let cmd: Command<u64> = Command::query("SELECT 1").callback(|_| {});
        assert_eq!(cmd.kind, CommandKind::Query);
        assert_eq!(cmd.sql.as_deref(), Some("SELECT 1"));
        assert!(cmd.has_callback());
    }

    #[test]
    fn debug_elides_the_callback() {
        let cmd: Command<()> = Command::query("SELECT 1").callback(|_| {});
        let rendered = format!("{cmd:?}");
        assert!(rendered.contains("has_callback: true"));
        assert!(rendered.contains("Query"));
        assert!(rendered.ends_with(".. }"));
    }

    #[test]
    fn command_kind_log_names() {
        assert_eq!(CommandKind::Query.as_str(), "query");
        assert_eq!(CommandKind::Rollback.as_str(), "rollback");
    }

    #[test]
    fn command_id_display_and_order() {
        assert_eq!(CommandId::new(7).to_string(), "#7");
        assert!(CommandId::new(1) < CommandId::new(2));
        assert_eq!(CommandId::new(3).get(), 3);
    }
}
