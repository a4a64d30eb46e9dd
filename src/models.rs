use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The only rule this tool can produce.
pub const PACKAGE_CYCLE_RULE: &str = "Package_Dependency_Cycles";

/// Path used for issues that belong to the whole project rather than a file.
pub const PROJECT_SUMMARY_PATH: &str = ".TCA_PROJECT_SUMMARY";

/// A normalized issue as consumed by the CI host.
///
/// Field order is the serialization order of `result.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub path: String,
    pub line: u32,
    pub column: u32,
    pub msg: String,
    pub rule: String,
    pub refs: Vec<serde_json::Value>,
}

/// A package whose dependency sequence contains its own name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleFinding {
    pub package: String,
    /// Dependency names in document order, ending with the self reference.
    pub chain: Vec<String>,
}

impl CycleFinding {
    /// Render the loop starting and ending at the package, e.g. `a->b->a`.
    pub fn render_chain(&self) -> String {
        std::iter::once(self.package.as_str())
            .chain(self.chain.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("->")
    }
}

/// Enabled rule identifiers for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet(BTreeSet<String>);

impl RuleSet {
    pub fn contains(&self, rule: &str) -> bool {
        self.0.contains(rule)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RuleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        RuleSet(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for RuleSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

/// Language used for issue messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Locale {
    #[default]
    En,
    Zh,
}
