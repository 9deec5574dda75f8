use crate::errors::domain::DomainError;

/// How a single record is addressed: surrogate id or natural key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(i64),
    Name(String),
}

impl Lookup {
    /// Id wins when both are supplied; supplying neither is a caller bug.
    pub fn from_parts(id: Option<i64>, name: Option<String>) -> Result<Self, DomainError> {
        match (id, name) {
            (Some(id), _) => Ok(Lookup::Id(id)),
            (None, Some(name)) => Ok(Lookup::Name(name)),
            (None, None) => Err(DomainError::contract(
                "Lookup requires an id or a name; neither was supplied",
            )),
        }
    }
}

impl From<i64> for Lookup {
    fn from(id: i64) -> Self {
        Lookup::Id(id)
    }
}

impl From<&str> for Lookup {
    fn from(name: &str) -> Self {
        Lookup::Name(name.to_string())
    }
}
