use serde::{Deserialize, de::Error as _};
use serde_json::Value;

use crate::testing::TestStatus;

/// The value a test script evaluates to.
///
/// Scripts are their own assertions: they report a status, optionally a message, and may
/// break themselves down into named child outcomes. A message explains a FAILURE or ERROR and
/// is refused on any other status. Any other shape is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Outcome {
    #[serde(default)]
    pub name: Option<String>,
    pub status: TestStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub children: Vec<Outcome>,
}

impl Outcome {
    /// Validates `value` against the outcome schema. Only mappings are accepted at the top.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        if value.is_object() {
            let outcome: Outcome = serde_json::from_value(value)?;
            outcome.validate()?;
            return Ok(outcome);
        }

        let kind = match value {
            Value::Object(_) => "a table",
            Value::Null => "nothing",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "a list",
        };
        Err(serde_json::Error::custom(format!(
            "expected a table with a status, found {}",
            kind
        )))
    }

    fn validate(&self) -> Result<(), serde_json::Error> {
        if self.message.is_some()
            && matches!(self.status, TestStatus::Success | TestStatus::Ignored)
        {
            return Err(serde_json::Error::custom(format!(
                "a {} outcome cannot carry a message",
                self.status
            )));
        }

        self.children.iter().try_for_each(Outcome::validate)
    }
}
