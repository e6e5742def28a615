//! The `"name/key"` addressing scheme.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Addresses one field of a named object: `"name/key"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectPath {
    /// The object name.
    pub name: String,
    /// The data field to extract.
    pub key: String,
}

impl FromStr for ObjectPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self, Error> {
        let mut parts = path.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(key), None) => Ok(Self {
                name: name.to_owned(),
                key: key.to_owned(),
            }),
            _ => Err(Error::Path {
                path: path.to_owned(),
            }),
        }
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.key)
    }
}
