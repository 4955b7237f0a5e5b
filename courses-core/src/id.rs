use bson::oid::ObjectId;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use utoipa::ToSchema;

/// Identifier the store assigns to a course. Travels over the wire as a 24 character hex string.
#[derive(Debug, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[repr(transparent)]
#[schema(value_type = String)]
pub struct CourseId(ObjectId);

impl CourseId {
    pub fn new(id: ObjectId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

#[derive(Debug, thiserror::Error)]
#[error("'{0}' is not a valid course id")]
pub struct InvalidCourseId(String);

impl FromStr for CourseId {
    type Err = InvalidCourseId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidCourseId(s.to_string()))
    }
}

impl Display for CourseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for CourseId {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.to_hex().serialize(ser)
    }
}

impl<'de> Deserialize<'de> for CourseId {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(de)?;
        hex.parse().map_err(D::Error::custom)
    }
}
