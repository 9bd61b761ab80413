use serde::{Deserialize, Serialize, ser::SerializeStruct};
use std::fmt;

use crate::{engine::Outcome, testing::aggregate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Success,
    Failure,
    Error,
    Ignored,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Success => "SUCCESS",
            TestStatus::Failure => "FAILURE",
            TestStatus::Error => "ERROR",
            TestStatus::Ignored => "IGNORED",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the result tree.
///
/// Leaves carry the status reported for one test. Containers (directories, suites, scripts that
/// report child outcomes) never carry a status of their own; [`status`](Self::status) derives it
/// from the children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    name: String,
    status: Option<TestStatus>,
    message: Option<String>,
    children: Vec<TestResult>,
}

impl TestResult {
    pub fn leaf(name: impl Into<String>, status: TestStatus) -> Self {
        Self {
            name: name.into(),
            status: Some(status),
            message: None,
            children: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::leaf(name, TestStatus::Error).with_message(message)
    }

    pub fn container(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: None,
            message: None,
            children: Vec::new(),
        }
    }

    /// Builds the node for a script outcome.
    ///
    /// An outcome with children becomes a container whose status is derived from those
    /// children. A FAILURE or ERROR declared on the container itself is kept as a leaf of the
    /// same name ahead of the children. Unnamed children are numbered from 1.
    pub fn from_outcome(default_name: impl Into<String>, outcome: Outcome) -> Self {
        let name = outcome.name.unwrap_or_else(|| default_name.into());
        let verdict = Self::leaf(name.clone(), outcome.status);
        let verdict = match outcome.message {
            Some(message) => verdict.with_message(message),
            None => verdict,
        };

        if outcome.children.is_empty() {
            return verdict;
        }

        let mut suite = Self::container(name);
        if matches!(outcome.status, TestStatus::Failure | TestStatus::Error) {
            suite.attach(verdict);
        }
        for (idx, child) in outcome.children.into_iter().enumerate() {
            suite.attach(Self::from_outcome(format!("#{}", idx + 1), child));
        }
        suite
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The status set on a leaf, `None` for containers.
    pub fn declared_status(&self) -> Option<TestStatus> {
        self.status
    }

    /// Effective status: the leaf's own, or the one aggregated from the children.
    pub fn status(&self) -> TestStatus {
        match self.status {
            Some(status) => status,
            None => aggregate::suite_status(&self.children),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn children(&self) -> &[TestResult] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.status.is_some()
    }

    /// Appends `child` if it is worth keeping. Returns whether it was attached.
    ///
    /// Leaves cannot hold children; attaching to one is refused.
    pub fn attach(&mut self, child: TestResult) -> bool {
        if self.is_leaf() || !aggregate::attachable(&child) {
            return false;
        }
        self.children.push(child);
        true
    }

    pub fn is_all_success(&self) -> bool {
        aggregate::is_all_success(self)
    }

    pub fn tally(&self) -> aggregate::Tally {
        aggregate::Tally::of(self)
    }
}

impl Serialize for TestResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut node = serializer.serialize_struct("TestResult", 4)?;
        node.serialize_field("name", &self.name)?;
        node.serialize_field("status", &self.status())?;
        if let Some(message) = &self.message {
            node.serialize_field("message", message)?;
        }
        if !self.children.is_empty() {
            node.serialize_field("children", &self.children)?;
        }
        node.end()
    }
}
