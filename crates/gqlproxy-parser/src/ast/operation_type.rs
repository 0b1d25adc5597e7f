use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// The three GraphQL operation kinds.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    /// Matches an operation keyword, ignoring ASCII case (`query`, `QUERY`
    /// and `Query` are all accepted).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("query") {
            Some(Self::Query)
        } else if keyword.eq_ignore_ascii_case("mutation") {
            Some(Self::Mutation)
        } else if keyword.eq_ignore_ascii_case("subscription") {
            Some(Self::Subscription)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }

    /// The root type name used in error messages (`Query`, `Mutation`,
    /// `Subscription`).
    pub fn root_type_name(&self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Subscription => "Subscription",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
