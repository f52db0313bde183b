//! Custom waiters.
//!
//! A waiter polls one provider operation until an acceptor decides the
//! outcome. Waiter definitions use the provider's version-2 waiter model:
//!
//! ```json
//! {
//!   "version": 2,
//!   "waiters": {
//!     "QueueEmpty": {
//!       "delay": 15,
//!       "maxAttempts": 40,
//!       "operation": "GetQueueAttributes",
//!       "acceptors": [
//!         {"state": "success", "matcher": "path",
//!          "argument": "Attributes.ApproximateNumberOfMessages", "expected": "0"},
//!         {"state": "failure", "matcher": "error", "expected": "AWS.SimpleQueueService.NonExistentQueue"}
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! Path arguments support the subset of JMESPath the provider's own models
//! use: field access (`a.b`), indexing (`a[0]`, `a[-1]`) and projections
//! (`a[].b`, `a[*].b`). Polling runs on the caller's task; nothing is
//! spawned.

use crate::client::ClientHandle;
use crate::error::{BoxError, FacadeResult, ProviderError, WaiterError};
use crate::guard::{guard, guard_sync};
use crate::wire::WireMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};

const MODEL_VERSION: u32 = 2;

/// A set of named waiter definitions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WaiterModel {
    /// Model format version. Only version 2 is understood.
    pub version: u32,
    /// Waiter definitions by name.
    pub waiters: HashMap<String, WaiterConfig>,
}

impl WaiterModel {
    /// Read a model from its JSON form.
    pub fn from_value(value: Value) -> Result<Self, WaiterError> {
        let model: WaiterModel =
            serde_json::from_value(value).map_err(|e| WaiterError::InvalidConfig {
                message: e.to_string(),
            })?;
        if model.version != MODEL_VERSION {
            return Err(WaiterError::InvalidConfig {
                message: format!(
                    "unsupported waiter model version {}, expected {}",
                    model.version, MODEL_VERSION
                ),
            });
        }
        Ok(model)
    }

    /// Names of every waiter in the model.
    pub fn waiter_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.waiters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// One waiter definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaiterConfig {
    /// Seconds to sleep between attempts.
    pub delay: u64,
    /// Attempts before giving up, including the first.
    pub max_attempts: u32,
    /// Provider operation to poll.
    pub operation: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Acceptors, checked in order after every attempt.
    pub acceptors: Vec<Acceptor>,
}

/// What a matching acceptor means for the waiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceptorState {
    /// Stop and return the response.
    Success,
    /// Stop and fail.
    Failure,
    /// Keep polling.
    Retry,
}

/// How an acceptor inspects an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Matcher {
    /// The path value equals `expected`.
    Path,
    /// Every element of the path's list equals `expected`.
    PathAll,
    /// At least one element of the path's list equals `expected`.
    PathAny,
    /// The HTTP status equals `expected`.
    Status,
    /// The attempt failed with error code `expected`.
    Error,
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Matcher::Path => "path",
            Matcher::PathAll => "pathAll",
            Matcher::PathAny => "pathAny",
            Matcher::Status => "status",
            Matcher::Error => "error",
        };
        f.write_str(name)
    }
}

/// A rule deciding the waiter's state from one attempt.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Acceptor {
    /// State to enter on a match.
    pub state: AcceptorState,
    /// Matcher kind.
    pub matcher: Matcher,
    /// Value to compare against.
    pub expected: Value,
    /// Path expression for the path matchers.
    #[serde(default)]
    pub argument: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Field(String),
    Index(i64),
    Project,
}

#[derive(Debug, Clone, PartialEq)]
struct Path(Vec<Step>);

impl Path {
    fn parse(expression: &str) -> Result<Self, String> {
        let mut steps = Vec::new();
        for segment in expression.split('.') {
            let (field, mut rest) = match segment.find('[') {
                Some(i) => segment.split_at(i),
                None => (segment, ""),
            };
            if field.is_empty() && (steps.is_empty() || rest.is_empty()) {
                return Err(format!("empty field in '{}'", expression));
            }
            if !field.is_empty() {
                steps.push(Step::Field(field.to_string()));
            }
            while !rest.is_empty() {
                let close = rest
                    .find(']')
                    .ok_or_else(|| format!("unclosed bracket in '{}'", expression))?;
                let inner = rest[1..close].trim();
                steps.push(match inner {
                    "" | "*" => Step::Project,
                    index => Step::Index(
                        index
                            .parse()
                            .map_err(|_| format!("bad index '{}' in '{}'", index, expression))?,
                    ),
                });
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(format!("unexpected '{}' in '{}'", rest, expression));
                }
            }
        }
        Ok(Path(steps))
    }

    fn evaluate(&self, value: &Value) -> Value {
        evaluate(value, &self.0)
    }
}

fn evaluate(value: &Value, steps: &[Step]) -> Value {
    let Some((step, rest)) = steps.split_first() else {
        return value.clone();
    };
    match step {
        Step::Field(name) => match value.get(name) {
            Some(inner) => evaluate(inner, rest),
            None => Value::Null,
        },
        Step::Index(index) => {
            let Some(items) = value.as_array() else {
                return Value::Null;
            };
            let position = if *index < 0 {
                items.len() as i64 + index
            } else {
                *index
            };
            usize::try_from(position)
                .ok()
                .and_then(|i| items.get(i))
                .map_or(Value::Null, |inner| evaluate(inner, rest))
        }
        Step::Project => match value.as_array() {
            Some(items) => Value::Array(
                items
                    .iter()
                    .map(|item| evaluate(item, rest))
                    .filter(|v| !v.is_null())
                    .collect(),
            ),
            None => Value::Null,
        },
    }
}

/// A validated acceptor.
#[derive(Debug, Clone)]
struct Rule {
    acceptor: Acceptor,
    path: Option<Path>,
}

impl Rule {
    fn new(acceptor: Acceptor) -> Result<Self, WaiterError> {
        let invalid = |message: String| WaiterError::InvalidConfig { message };
        let path = match acceptor.matcher {
            Matcher::Path | Matcher::PathAll | Matcher::PathAny => {
                let argument = acceptor.argument.as_deref().ok_or_else(|| {
                    invalid(format!("{} acceptor requires an argument", acceptor.matcher))
                })?;
                Some(Path::parse(argument).map_err(invalid)?)
            }
            Matcher::Status if !acceptor.expected.is_u64() => {
                return Err(invalid("status acceptor expects an HTTP status".to_string()));
            }
            Matcher::Error if !(acceptor.expected.is_string() || acceptor.expected.is_boolean()) => {
                return Err(invalid(
                    "error acceptor expects an error code or a boolean".to_string(),
                ));
            }
            _ => None,
        };
        Ok(Self { acceptor, path })
    }

    fn matches(&self, outcome: &Result<WireMap, ProviderError>) -> bool {
        let expected = &self.acceptor.expected;
        match (self.acceptor.matcher, outcome) {
            (Matcher::Path, Ok(response)) => self.select(response) == *expected,
            (Matcher::PathAll, Ok(response)) => match self.select(response) {
                Value::Array(items) => !items.is_empty() && items.iter().all(|v| v == expected),
                _ => false,
            },
            (Matcher::PathAny, Ok(response)) => match self.select(response) {
                Value::Array(items) => items.iter().any(|v| v == expected),
                _ => false,
            },
            (Matcher::Status, Ok(_)) => expected.as_u64() == Some(200),
            (Matcher::Status, Err(ProviderError::Service { status, .. })) => {
                status.map(u64::from) == expected.as_u64()
            }
            (Matcher::Error, Ok(_)) => *expected == Value::Bool(false),
            (Matcher::Error, Err(error)) => match expected {
                Value::Bool(any) => *any,
                Value::String(code) => error.code() == Some(code.as_str()),
                _ => false,
            },
            _ => false,
        }
    }

    fn select(&self, response: &WireMap) -> Value {
        match &self.path {
            Some(path) => path.evaluate(&Value::Object(response.clone())),
            None => Value::Null,
        }
    }

    fn describe(&self) -> String {
        match &self.acceptor.argument {
            Some(argument) => format!(
                "For expression \"{}\" we matched expected {}: {}",
                argument, self.acceptor.matcher, self.acceptor.expected
            ),
            None => format!(
                "Matched expected {}: {}",
                self.acceptor.matcher, self.acceptor.expected
            ),
        }
    }
}

/// A ready-to-run waiter bound to one client.
#[derive(Debug, Clone)]
pub struct Waiter {
    name: String,
    delay: Duration,
    max_attempts: u32,
    operation: String,
    rules: Vec<Rule>,
    client: ClientHandle,
}

/// Build the waiter `name` from `model`, polling through `client`.
///
/// The definition is validated here: an unknown name, zero attempts or a
/// malformed acceptor fails before anything is sent.
pub fn create_waiter(name: &str, model: &WaiterModel, client: ClientHandle) -> FacadeResult<Waiter> {
    guard_sync(crate::operation!("create_waiter"), || {
        let config = model
            .waiters
            .get(name)
            .ok_or_else(|| WaiterError::UnknownWaiter {
                name: name.to_string(),
            })?;
        if config.max_attempts == 0 {
            return Err(WaiterError::InvalidConfig {
                message: "maxAttempts must be at least 1".to_string(),
            });
        }
        let rules = config
            .acceptors
            .iter()
            .cloned()
            .map(Rule::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok::<_, WaiterError>(Waiter {
            name: name.to_string(),
            delay: Duration::from_secs(config.delay),
            max_attempts: config.max_attempts,
            operation: config.operation.clone(),
            rules,
            client,
        })
    })
}

impl Waiter {
    /// Waiter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operation the waiter polls.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Poll until an acceptor decides the outcome.
    ///
    /// Returns the response of the attempt that matched a success acceptor
    /// (an empty map when the success was an error match). A failure
    /// acceptor, an error no acceptor matches, or running out of attempts
    /// ends the wait with an error.
    pub async fn wait(&self, params: WireMap) -> FacadeResult<WireMap> {
        guard(crate::operation!("wait"), async {
            for attempt in 1..=self.max_attempts {
                let outcome = self.client.invoke(&self.operation, params.clone()).await;
                let matched = self.rules.iter().find(|rule| rule.matches(&outcome));

                trace!(
                    waiter = %self.name,
                    attempt,
                    state = ?matched.map(|rule| rule.acceptor.state),
                    "Waiter attempt"
                );

                match matched {
                    Some(rule) => match rule.acceptor.state {
                        AcceptorState::Success => {
                            debug!(waiter = %self.name, attempts = attempt, "Waiter succeeded");
                            return Ok::<_, BoxError>(outcome.unwrap_or_default());
                        }
                        AcceptorState::Failure => {
                            return Err(WaiterError::FailureState {
                                name: self.name.clone(),
                                reason: format!(
                                    "Waiter encountered a terminal failure state: {}",
                                    rule.describe()
                                ),
                            }
                            .into());
                        }
                        AcceptorState::Retry => {}
                    },
                    None => {
                        if let Err(error) = outcome {
                            return Err(BoxError::from(error));
                        }
                    }
                }

                if attempt < self.max_attempts {
                    tokio::time::sleep(self.delay).await;
                }
            }

            Err(WaiterError::MaxAttemptsExceeded {
                name: self.name.clone(),
                attempts: self.max_attempts,
            }
            .into())
        })
        .await
    }
}
