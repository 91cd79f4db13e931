// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::roles::{RawRoles, RoleSet, resolve};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            #[must_use]
            pub fn new_random() -> Self {
                Self(Uuid::new_v4())
            }

            #[must_use]
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| DomainError::InvalidIdentifier(s.to_string()))
            }
        }
    };
}

uuid_id!(
    /// Identifier of an advertisement.
    AdId
);

uuid_id!(
    /// Identifier of a transaction.
    TransactionId
);

/// Opaque identifier of an actor as issued by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.trim().to_string())
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The party invoking an operation.
///
/// Built once per request from raw session data and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    id: ActorId,
    roles: RoleSet,
}

impl Actor {
    #[must_use]
    pub const fn new(id: ActorId, roles: RoleSet) -> Self {
        Self { id, roles }
    }

    /// Builds an actor from loosely-typed role data.
    #[must_use]
    pub fn from_raw(id: &str, raw_roles: &RawRoles) -> Self {
        Self::new(ActorId::new(id), resolve(raw_roles))
    }

    #[must_use]
    pub const fn id(&self) -> &ActorId {
        &self.id
    }

    #[must_use]
    pub const fn roles(&self) -> &RoleSet {
        &self.roles
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }

    #[must_use]
    pub fn is_user(&self) -> bool {
        self.roles.is_user()
    }

    /// Whether the actor may post ads and open transactions.
    #[must_use]
    pub fn is_authenticated_trader(&self) -> bool {
        self.is_user() || self.is_admin()
    }
}

/// The two kinds of resource governed by a lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Ad,
    Transaction,
}

impl ResourceKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ad => "ad",
            Self::Transaction => "transaction",
        }
    }
}

impl FromStr for ResourceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ad" | "ads" => Ok(Self::Ad),
            "transaction" | "transactions" => Ok(Self::Transaction),
            _ => Err(DomainError::UnknownResourceKind(s.to_string())),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
