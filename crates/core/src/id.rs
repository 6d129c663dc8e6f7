//! Strongly-typed identifiers used across the domain.
//!
//! All identifiers are opaque text. Parsing through [`FromStr`] validates that
//! the text is not blank; the `From<&str>`/`From<String>` conversions trust
//! their input and exist for callers rebuilding values they already checked.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Stock-keeping unit: the kind of product a line requests or a batch holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

/// Identifier of the customer order an order line belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

/// Unique reference of a purchased batch of stock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchReference(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl PartialEq<str> for $t {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $t {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.trim().is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: cannot be empty", $name)));
                }
                Ok(Self(s.to_owned()))
            }
        }
    };
}

macro_rules! impl_generated_id {
    ($t:ty) => {
        impl $t {
            /// Mint a fresh identifier.
            ///
            /// Uses UUIDv7 text (time-ordered). Prefer passing IDs explicitly in
            /// tests for determinism.
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }
        }
    };
}

impl_string_newtype!(Sku, "Sku");
impl_string_newtype!(OrderId, "OrderId");
impl_string_newtype!(BatchReference, "BatchReference");

impl_generated_id!(OrderId);
impl_generated_id!(BatchReference);
