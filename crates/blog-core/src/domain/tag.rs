use serde::{Deserialize, Serialize};

/// Generated tag identifier.
pub type TagId = i64;

/// Tag entity - a named label shared by every owner.
///
/// Names are case-sensitive and globally unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}
