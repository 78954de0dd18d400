use std::fs;

use serde_json::json;

use crate::client::{QueryTemplate, TeamSearchVariables, TemplateStore};
use crate::error::ConnectorError;

#[test]
fn test_bundled_team_query_renders() {
    let variables = TeamSearchVariables::new("org-1", "None", 100, None).unwrap();
    let request = TemplateStore::bundled()
        .render("Teams.query.graphql", &variables)
        .unwrap();

    assert!(request.query.starts_with("query TeamSearch"));
    assert!(request.query.contains("teamSearchV2"));
    assert_eq!(request.query, request.query.trim());
}

#[test]
fn test_unknown_template_name_is_not_found() {
    let result = TemplateStore::bundled().render("Users.query.graphql", json!({}));
    assert!(matches!(result, Err(ConnectorError::TemplateNotFound(name)) if name == "Users.query.graphql"));
}

#[test]
fn test_override_directory_is_used() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Teams.query.graphql"), "\n  query Custom { team }  \n").unwrap();

    let store = TemplateStore::from_dir(dir.path());
    assert_eq!(store.load(QueryTemplate::TeamSearch).unwrap(), "query Custom { team }");
}

#[test]
fn test_missing_file_in_override_directory_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = TemplateStore::from_dir(dir.path());

    let result = store.load(QueryTemplate::TeamSearch);
    assert!(matches!(result, Err(ConnectorError::TemplateNotFound(_))));
}

#[test]
fn test_unreadable_template_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be cannot be read as text.
    fs::create_dir(dir.path().join("Teams.query.graphql")).unwrap();

    let result = TemplateStore::from_dir(dir.path()).load(QueryTemplate::TeamSearch);
    assert!(matches!(result, Err(ConnectorError::IoError(_))));
}

#[test]
fn test_outer_variables_omit_member_paging() {
    let variables = TeamSearchVariables::new("org-1", "None", 50, None).unwrap();
    assert_eq!(
        serde_json::to_value(&variables).unwrap(),
        json!({ "organizationId": "org-1", "siteId": "None", "firstTeam": 50 })
    );
}

#[test]
fn test_inner_variables_keep_outer_scope() {
    let outer = TeamSearchVariables::new("org-1", "None", 50, Some("team-cursor".to_string())).unwrap();
    let inner = outer.with_members(50, Some("member-cursor".to_string()));

    assert_eq!(
        serde_json::to_value(&inner).unwrap(),
        json!({
            "organizationId": "org-1",
            "siteId": "None",
            "firstTeam": 50,
            "afterTeam": "team-cursor",
            "firstMember": 50,
            "afterMember": "member-cursor"
        })
    );
}

#[test]
fn test_empty_cursors_are_dropped() {
    let outer = TeamSearchVariables::new("org-1", "None", 10, Some(String::new())).unwrap();
    assert_eq!(outer.after_team, None);
    assert_eq!(outer.with_members(10, Some(String::new())).after_member, None);
}

#[test]
fn test_variables_require_organization() {
    let result = TeamSearchVariables::new("  ", "None", 10, None);
    assert!(matches!(result, Err(ConnectorError::ConfigError(_))));
}
