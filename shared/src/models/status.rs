//! Availability flag shared by menus, categories, zones and tables

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a record can be used for new orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Unavailable,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" | "active" | "true" | "1" => Ok(Self::Available),
            "unavailable" | "inactive" | "false" | "0" => Ok(Self::Unavailable),
            other => Err(format!("invalid status: {}", other)),
        }
    }
}

// Toggle switches in the browser send booleans, forms send strings.
impl<'de> Deserialize<'de> for Availability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AvailabilityVisitor;

        impl Visitor<'_> for AvailabilityVisitor {
            type Value = Availability;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("\"available\", \"unavailable\" or a boolean")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Availability, E> {
                Ok(if value {
                    Availability::Available
                } else {
                    Availability::Unavailable
                })
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Availability, E> {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(AvailabilityVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_strings_and_bools() {
        let a: Availability = serde_json::from_str("\"available\"").unwrap();
        assert_eq!(a, Availability::Available);
        let a: Availability = serde_json::from_str("\"Unavailable\"").unwrap();
        assert_eq!(a, Availability::Unavailable);
        let a: Availability = serde_json::from_str("false").unwrap();
        assert_eq!(a, Availability::Unavailable);
        assert!(serde_json::from_str::<Availability>("\"sold-out\"").is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Availability::Unavailable).unwrap();
        assert_eq!(json, "\"unavailable\"");
    }
}
