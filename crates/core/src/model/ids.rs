use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a Case.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

/// Identifier for a Section, unique within its Case.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

/// Identifier for a Question, unique within its Case.
///
/// Question ids are case-scoped, not globally unique: in-memory maps keyed
/// by `QuestionId` are only meaningful relative to one case at a time.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

/// Short identifier for an answer Choice (e.g. "a".."d").
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            /// Creates a new id from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

string_id!(CaseId);
string_id!(SectionId);
string_id!(QuestionId);
string_id!(ChoiceId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_id_display_and_debug() {
        let id = CaseId::new("choledocholithiasis");
        assert_eq!(id.to_string(), "choledocholithiasis");
        assert_eq!(format!("{id:?}"), "CaseId(choledocholithiasis)");
    }

    #[test]
    fn choice_id_equality() {
        assert_eq!(ChoiceId::new("a"), ChoiceId::from("a"));
        assert_ne!(ChoiceId::new("a"), ChoiceId::new("b"));
    }

    #[test]
    fn question_id_serializes_transparently() {
        let id = QuestionId::new("q1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"q1\"");
        let back: QuestionId = serde_json::from_str("\"q1\"").unwrap();
        assert_eq!(back, id);
    }
}
