// Resource module
// Bookable tables and the sectors that group them

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ModelError;

/// Identifier of a resource group (sector).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub String);

/// Identifier of a bookable resource (table).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }
    };
}

string_id!(GroupId);
string_id!(ResourceId);

/// A sector of the floor plan. `sort_order` alone decides its vertical position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    pub id: GroupId,
    pub name: String,
    pub sort_order: i32,
    #[serde(default)]
    pub color: Option<String>,
}

impl ResourceGroup {
    pub fn new(id: impl Into<GroupId>, name: impl Into<String>, sort_order: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sort_order,
            color: None,
        }
    }
}

/// A bookable table inside a sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub group_id: GroupId,
    pub name: String,
    pub capacity_min: u32,
    pub capacity_max: u32,
    pub sort_order: i32,
}

impl Resource {
    pub fn new(
        id: impl Into<ResourceId>,
        group_id: impl Into<GroupId>,
        capacity_min: u32,
        capacity_max: u32,
        sort_order: i32,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.0.clone(),
            id,
            group_id: group_id.into(),
            capacity_min,
            capacity_max,
            sort_order,
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.capacity_min > self.capacity_max {
            return Err(ModelError::InvertedCapacity {
                min: self.capacity_min,
                max: self.capacity_max,
            });
        }
        Ok(())
    }

    /// Whether a party of `party_size` can be seated here.
    pub fn fits(&self, party_size: u32) -> bool {
        (self.capacity_min..=self.capacity_max).contains(&party_size)
    }
}
