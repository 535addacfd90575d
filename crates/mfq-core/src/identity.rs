use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};

///
/// GroupingVariableId
///
/// Name of a grouping variable (`g1`, `g2`, ...). Ordering is lexicographic
/// on the raw name and drives output-field layout.
///

#[derive(
    Clone, Debug, Deref, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct GroupingVariableId(String);

impl GroupingVariableId {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupingVariableId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for GroupingVariableId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
