use serde_json::json;

use crate::connector::resource::{EntitlementPurpose, ResourceTraits, UserStatus};
use crate::connector::teams::{team_entitlements, team_grant_id, team_grants, team_resource};
use crate::connector::users::member_resource;
use crate::error::ConnectorError;
use crate::models::{Connection, Member, MemberEdge, MemberNode, MembershipRole, Team};

fn member(n: u32) -> Member {
    Member {
        id: format!("ari:cloud:identity::user/user-{}", n),
        account_id: format!("user-{}", n),
        name: format!("User {}", n),
    }
}

fn team_with(members: Vec<(Member, MembershipRole)>) -> Team {
    Team {
        id: "ari:cloud:identity::team/team-1".to_string(),
        organization_id: "org-1".to_string(),
        display_name: "Platform".to_string(),
        description: Some("Runs the platform".to_string()),
        members: Connection {
            page_info: Default::default(),
            edges: members
                .into_iter()
                .map(|(member, role)| MemberEdge {
                    node: MemberNode { member, role },
                })
                .collect(),
        },
    }
}

#[test]
fn test_team_resource_is_group_with_profile() {
    let resource = team_resource(&team_with(vec![]), None).unwrap();

    assert_eq!(resource.id.resource_type, "team");
    assert_eq!(resource.id.resource, "ari:cloud:identity::team/team-1");
    assert_eq!(resource.display_name, "Platform");
    assert_eq!(resource.parent_resource_id, None);
    match resource.traits {
        ResourceTraits::Group { profile } => {
            assert_eq!(profile["team_id"], json!("ari:cloud:identity::team/team-1"));
            assert_eq!(profile["display_name"], json!("Platform"));
            assert_eq!(profile["description"], json!("Runs the platform"));
        }
        other => panic!("Expected group traits, got {:?}", other),
    }
}

#[test]
fn test_member_resource_is_enabled_user() {
    let resource = member_resource(&member(1), None).unwrap();

    assert_eq!(resource.id.resource_type, "user");
    assert_eq!(resource.display_name, "User 1");
    match resource.traits {
        ResourceTraits::User { profile, status, login } => {
            assert_eq!(status, UserStatus::Enabled);
            assert_eq!(login, "User 1");
            assert_eq!(profile["account_id"], json!("user-1"));
            assert_eq!(profile["username"], json!("User 1"));
        }
        other => panic!("Expected user traits, got {:?}", other),
    }
}

#[test]
fn test_malformed_identifier_is_rejected() {
    let mut broken = member(1);
    broken.id = "has whitespace".to_string();
    assert!(matches!(member_resource(&broken, None), Err(ConnectorError::InvalidResource(_))));

    let mut team = team_with(vec![]);
    team.id = String::new();
    assert!(matches!(team_resource(&team, None), Err(ConnectorError::InvalidResource(_))));
}

#[test]
fn test_two_entitlements_per_team() {
    let resource = team_resource(&team_with(vec![]), None).unwrap();
    let entitlements = team_entitlements(&resource);

    assert_eq!(entitlements.len(), 2);
    assert_eq!(entitlements[0].slug, "REGULAR");
    assert_eq!(entitlements[1].slug, "ADMIN");
    for entitlement in &entitlements {
        assert_eq!(entitlement.purpose, EntitlementPurpose::Permission);
        assert_eq!(entitlement.grantable_to, vec!["user".to_string()]);
    }
    assert_eq!(entitlements[1].display_name, "Platform Team ADMIN");
    assert_eq!(entitlements[1].description, "Team Membership Role ADMIN for team Platform");
    assert_eq!(
        entitlements[0].id,
        "team:ari:cloud:identity::team/team-1:REGULAR"
    );
}

#[test]
fn test_one_grant_per_membership_edge() {
    let team = team_with(vec![
        (member(1), MembershipRole::Regular),
        (member(2), MembershipRole::Admin),
    ]);
    let resource = team_resource(&team, None).unwrap();
    let grants = team_grants(&resource, &team).unwrap();

    assert_eq!(grants.len(), 2);
    assert_eq!(grants[0].entitlement_id, "team:ari:cloud:identity::team/team-1:REGULAR");
    assert_eq!(grants[1].entitlement_id, "team:ari:cloud:identity::team/team-1:ADMIN");
    assert_eq!(grants[1].principal.parent_resource_id.as_ref(), Some(&resource.id));
    assert_eq!(
        grants[1].annotations.v1_identifier(),
        Some("team-grant:ari:cloud:identity::team/team-1:ari:cloud:identity::user/user-2:ADMIN")
    );
}

#[test]
fn test_grant_identifier_is_deterministic() {
    let a = team_grant_id("team-1", "user-1", MembershipRole::Regular);
    let b = team_grant_id("team-1", "user-1", MembershipRole::Regular);
    assert_eq!(a, b);
    assert_eq!(a, "team-grant:team-1:user-1:REGULAR");
}

#[test]
fn test_unknown_role_fails_to_decode() {
    let result = serde_json::from_value::<MemberNode>(json!({
        "role": "OWNER",
        "member": { "id": "u", "accountId": "a", "name": "n" }
    }));
    assert!(result.is_err());
}

#[test]
fn test_team_without_member_edges_decodes_empty() {
    let team: Team = serde_json::from_value(json!({
        "id": "team-1",
        "organizationId": "org",
        "displayName": "Team One",
        "members": { "pageInfo": { "hasNextPage": false, "endCursor": null } }
    }))
    .unwrap();
    assert!(team.members.edges.is_empty());

    let bare: Connection<MemberEdge> = serde_json::from_value(json!({})).unwrap();
    assert!(bare.edges.is_empty());
    assert!(!bare.page_info.has_next_page);
}
