use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::annotations::Annotations;
use crate::error::{ConnectorError, ConnectorResult};

lazy_static! {
    static ref RESOURCE_ID: Regex = Regex::new(r"^[^\s\p{Cc}]+$").expect("valid resource id pattern");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTrait {
    Group,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceType {
    pub id: &'static str,
    pub display_name: &'static str,
    pub traits: &'static [ResourceTrait],
}

pub static TEAM_RESOURCE_TYPE: ResourceType = ResourceType {
    id: "team",
    display_name: "Team",
    traits: &[ResourceTrait::Group],
};

pub static USER_RESOURCE_TYPE: ResourceType = ResourceType {
    id: "user",
    display_name: "User",
    traits: &[ResourceTrait::User],
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceId {
    pub resource_type: String,
    pub resource: String,
}

impl ResourceId {
    pub fn new(resource_type: &ResourceType, resource: &str) -> ConnectorResult<Self> {
        if !RESOURCE_ID.is_match(resource) {
            return Err(ConnectorError::InvalidResource(format!(
                "malformed {} id {:?}",
                resource_type.id, resource
            )));
        }

        Ok(Self {
            resource_type: resource_type.id.to_string(),
            resource: resource.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceTraits {
    Group {
        profile: Map<String, Value>,
    },
    User {
        profile: Map<String, Value>,
        status: UserStatus,
        login: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub id: ResourceId,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_resource_id: Option<ResourceId>,
    pub traits: ResourceTraits,
}

impl Resource {
    pub fn is_type(&self, resource_type: &ResourceType) -> bool {
        self.id.resource_type == resource_type.id
    }
}

pub fn new_group_resource(
    display_name: &str,
    resource_type: &ResourceType,
    id: &str,
    profile: Map<String, Value>,
    parent_resource_id: Option<&ResourceId>,
) -> ConnectorResult<Resource> {
    Ok(Resource {
        id: ResourceId::new(resource_type, id)?,
        display_name: display_name.to_string(),
        parent_resource_id: parent_resource_id.cloned(),
        traits: ResourceTraits::Group { profile },
    })
}

pub fn new_user_resource(
    display_name: &str,
    resource_type: &ResourceType,
    id: &str,
    profile: Map<String, Value>,
    status: UserStatus,
    login: &str,
    parent_resource_id: Option<&ResourceId>,
) -> ConnectorResult<Resource> {
    Ok(Resource {
        id: ResourceId::new(resource_type, id)?,
        display_name: display_name.to_string(),
        parent_resource_id: parent_resource_id.cloned(),
        traits: ResourceTraits::User {
            profile,
            status,
            login: login.to_string(),
        },
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementPurpose {
    Permission,
    Assignment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entitlement {
    pub id: String,
    pub resource: ResourceId,
    pub slug: String,
    pub display_name: String,
    pub description: String,
    pub purpose: EntitlementPurpose,
    pub grantable_to: Vec<String>,
}

/// `<resource type>:<resource id>:<permission>`
pub fn entitlement_id(resource: &Resource, permission: &str) -> String {
    format!("{}:{}:{}", resource.id.resource_type, resource.id.resource, permission)
}

pub fn new_permission_entitlement(
    resource: &Resource,
    permission: &str,
    display_name: String,
    description: String,
    grantable_to: &[&ResourceType],
) -> Entitlement {
    Entitlement {
        id: entitlement_id(resource, permission),
        resource: resource.id.clone(),
        slug: permission.to_string(),
        display_name,
        description,
        purpose: EntitlementPurpose::Permission,
        grantable_to: grantable_to.iter().map(|t| t.id.to_string()).collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grant {
    pub id: String,
    pub entitlement_id: String,
    pub principal: Resource,
    #[serde(skip_serializing_if = "Annotations::is_empty")]
    pub annotations: Annotations,
}

/// Binds `principal` to the `permission` entitlement of `resource`.
pub fn new_grant(
    resource: &Resource,
    permission: &str,
    principal: Resource,
    annotations: Annotations,
) -> Grant {
    let entitlement_id = entitlement_id(resource, permission);
    Grant {
        id: format!(
            "{}:{}:{}",
            entitlement_id, principal.id.resource_type, principal.id.resource
        ),
        entitlement_id,
        principal,
        annotations,
    }
}
