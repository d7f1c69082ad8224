//! Static resource registry.
//!
//! Every resource the tool can converge is described by one
//! [`ResourceDescriptor`]: where its collection lives, which fields identify
//! it, and which of its fields point at other resources. The engine is
//! generic over descriptors; nothing is resolved by attribute name at
//! runtime.

mod references;
mod resources;

use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

pub use references::reference_resource;
pub use resources::RESOURCES;

/// Nautobot application that owns a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceFamily {
    Circuits,
    Cloud,
    Dcim,
    Extras,
    Ipam,
    Tenancy,
    Users,
    Virtualization,
}

impl ResourceFamily {
    /// URL segment under `/api/`
    pub fn app(&self) -> &'static str {
        match self {
            Self::Circuits => "circuits",
            Self::Cloud => "cloud",
            Self::Dcim => "dcim",
            Self::Extras => "extras",
            Self::Ipam => "ipam",
            Self::Tenancy => "tenancy",
            Self::Users => "users",
            Self::Virtualization => "virtualization",
        }
    }
}

/// Declarative description of one convergeable resource type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceDescriptor {
    /// Resource-type tag used in task documents, e.g. `device_type`
    pub tag: &'static str,
    pub family: ResourceFamily,
    /// Collection segment, e.g. `device-types`
    pub collection: &'static str,
    /// Field naming the object in messages; also the natural key used
    /// when another resource references this one by a bare value.
    pub label: &'static str,
    /// Default existence-check filter fields
    pub query_params: &'static [&'static str],
    /// Fields that must be declared for any lifecycle target
    pub required: &'static [&'static str],
    /// Field -> resource tag, for fields whose meaning differs from the
    /// global reference table (e.g. `parent`)
    pub references: &'static [(&'static str, &'static str)],
    /// Accepted on write but never returned, so never compared
    pub write_only: &'static [&'static str],
}

impl ResourceDescriptor {
    pub const fn new(
        tag: &'static str,
        family: ResourceFamily,
        collection: &'static str,
        label: &'static str,
        query_params: &'static [&'static str],
        required: &'static [&'static str],
    ) -> Self {
        Self {
            tag,
            family,
            collection,
            label,
            query_params,
            required,
            references: &[],
            write_only: &[],
        }
    }

    pub const fn with_references(mut self, references: &'static [(&'static str, &'static str)]) -> Self {
        self.references = references;
        self
    }

    pub const fn with_write_only(mut self, fields: &'static [&'static str]) -> Self {
        self.write_only = fields;
        self
    }

    /// Collection path relative to `/api`, e.g. `/dcim/device-types/`
    pub fn path(&self) -> String {
        format!("/{}/{}/", self.family.app(), self.collection)
    }

    /// Resource referenced by `field` on this resource, if it is a reference
    pub fn reference_target(&self, field: &str) -> Option<&'static ResourceDescriptor> {
        // A field named after the resource itself is its own value (prefix.prefix)
        if field == self.tag && !self.references.iter().any(|(f, _)| *f == field) {
            return None;
        }
        let tag = self
            .references
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, tag)| *tag)
            .or_else(|| reference_resource(field))?;
        lookup(tag)
    }
}

fn index() -> &'static HashMap<&'static str, &'static ResourceDescriptor> {
    static INDEX: OnceLock<HashMap<&'static str, &'static ResourceDescriptor>> = OnceLock::new();
    INDEX.get_or_init(|| RESOURCES.iter().map(|d| (d.tag, d)).collect())
}

/// Find a descriptor by resource-type tag
pub fn lookup(tag: &str) -> Option<&'static ResourceDescriptor> {
    index().get(tag).copied()
}

/// All descriptors, in registry order
pub fn all() -> &'static [ResourceDescriptor] {
    RESOURCES
}
