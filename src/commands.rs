//! History commands
//!
//! Translates named commands (`?op=append&value=x`) into [`RingList`]
//! operations and renders each result as a JSON body.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::errors::CommandError;
use crate::ring::RingList;

/// Decoded query-string parameters.
///
/// Only the first occurrence of a key counts, and blank values are treated
/// as absent.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    pub fn parse(raw: &str) -> Self {
        let mut params = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            params
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// A signed decimal step count of any magnitude.
///
/// Only its residue modulo the history length matters, so the digits are
/// kept as text and reduced when the command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Steps {
    negative: bool,
    digits: String,
}

impl Steps {
    /// Accepts an optional `+`/`-` sign followed by ASCII digits.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            negative,
            digits: digits.to_string(),
        })
    }

    /// The equivalent step count in `[0, len)`.
    pub fn reduce(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let modulus = len as u128;
        let rem = self
            .digits
            .bytes()
            .fold(0u128, |acc, d| (acc * 10 + u128::from(d - b'0')) % modulus);
        let rem = if self.negative && rem != 0 {
            modulus - rem
        } else {
            rem
        };
        rem as usize
    }
}

impl From<i64> for Steps {
    fn from(steps: i64) -> Self {
        Self {
            negative: steps < 0,
            digits: steps.unsigned_abs().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    State,
    Append(Value),
    Prepend(Value),
    Pop,
    PopLeft,
    Clear,
    Rotate(Steps),
    Remove { value: Value, all: bool },
}

impl Command {
    /// Build a command from `/api/list` parameters. `op` defaults to `state`.
    pub fn from_query(query: &QueryParams) -> Result<Self, CommandError> {
        let op = query.get("op").unwrap_or("state").trim().to_lowercase();
        let command = match op.as_str() {
            "state" => Command::State,
            "append" => Command::Append(required_value(query)?),
            "prepend" => Command::Prepend(required_value(query)?),
            "pop" => Command::Pop,
            "popleft" => Command::PopLeft,
            "clear" => Command::Clear,
            "rotate" => {
                let raw = query.get("steps").unwrap_or("0");
                let steps = Steps::parse(raw).ok_or_else(|| CommandError::InvalidArgument {
                    name: "steps".to_string(),
                    message: "must be an integer".to_string(),
                })?;
                Command::Rotate(steps)
            }
            "remove" => Command::Remove {
                value: required_value(query)?,
                all: matches!(query.get("all"), Some("1" | "true" | "True")),
            },
            _ => return Err(CommandError::UnsupportedOperation { op }),
        };
        Ok(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::State => "state",
            Command::Append(_) => "append",
            Command::Prepend(_) => "prepend",
            Command::Pop => "pop",
            Command::PopLeft => "popleft",
            Command::Clear => "clear",
            Command::Rotate(_) => "rotate",
            Command::Remove { .. } => "remove",
        }
    }
}

fn required_value(query: &QueryParams) -> Result<Value, CommandError> {
    query
        .get("value")
        .map(|v| Value::String(v.to_string()))
        .ok_or_else(|| CommandError::MissingParameter {
            name: "value".to_string(),
        })
}

/// Run one command against the history and render the response body.
pub fn execute(history: &mut RingList<Value>, command: Command) -> Result<Value, CommandError> {
    let body = match command {
        Command::State => json!({
            "len": history.len(),
            "capacity": history.capacity(),
            "items": history.to_list(false),
        }),
        Command::Append(value) => {
            if let Some(evicted) = history.append(value) {
                tracing::debug!("append evicted {}", evicted);
            }
            json!({ "ok": true, "len": history.len() })
        }
        Command::Prepend(value) => {
            if let Some(evicted) = history.prepend(value) {
                tracing::debug!("prepend evicted {}", evicted);
            }
            json!({ "ok": true, "len": history.len() })
        }
        Command::Pop => {
            let popped = history.pop()?;
            json!({ "popped": popped, "len": history.len() })
        }
        Command::PopLeft => {
            let popped = history.popleft()?;
            json!({ "popleft": popped, "len": history.len() })
        }
        Command::Clear => {
            history.clear();
            json!({ "ok": true, "len": history.len() })
        }
        Command::Rotate(steps) => {
            // reduce() is below len, so the cast cannot wrap.
            history.rotate(steps.reduce(history.len()) as i64);
            json!({ "ok": true, "len": history.len(), "items": history.to_list(false) })
        }
        Command::Remove { value, all } => {
            let removed = history.remove_value(&value, all);
            json!({ "removed": removed, "len": history.len() })
        }
    };
    Ok(body)
}

/// JSON body for a failed command.
pub fn error_body(err: &CommandError) -> Value {
    match err {
        CommandError::UnsupportedOperation { op } => json!({ "error": err.to_string(), "op": op }),
        _ => json!({ "error": err.to_string() }),
    }
}
