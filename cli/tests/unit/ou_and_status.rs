//! OU search and link status services.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use gecos_assistant::application::services::{LinkStatus, link_status, search_organizational_units};
use gecos_assistant::domain::{AccessData, ValidationError, WorkflowError};
use gecos_common::LinkRecord;

use crate::helpers::{CC_URL, access};
use crate::mocks::{MemoryLinks, MockDirectory};

#[tokio::test]
async fn test_ou_search_returns_matches() {
    let directory = MockDirectory::default();
    let ous = search_organizational_units(&directory, &access(), "Mad")
        .await
        .unwrap();
    assert_eq!(ous.len(), 1);
    assert_eq!(ous[0].label, "root/Madrid");
    assert_eq!(
        directory.calls(),
        vec!["validate_credentials", "search_organizational_units Mad"]
    );
}

#[tokio::test]
async fn test_ou_search_validates_access_first() {
    let directory = MockDirectory::default();
    let err = search_organizational_units(&directory, &AccessData::new("", "a", "b"), "x")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Validation(ValidationError::EmptyUrl)
    ));
    assert!(directory.calls().is_empty());
}

#[tokio::test]
async fn test_ou_search_non_list_response_is_remote_error() {
    let directory = MockDirectory {
        ou_search_fails: true,
        ..MockDirectory::default()
    };
    let err = search_organizational_units(&directory, &access(), "x")
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::RemoteCommunication(_)));
    assert!(err.to_string().contains("did not return a list"));
}

fn record(linked: bool) -> LinkRecord {
    LinkRecord {
        uri: CC_URL.to_string(),
        gcc_username: "admin".to_string(),
        gcc_nodename: "node-7".to_string(),
        gcc_workstation_name: String::new(),
        gcc_ou: "Madrid".to_string(),
        gcc_link: linked,
        linked_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn test_link_status_without_record_is_not_linked() {
    let status = link_status(&MemoryLinks::default()).unwrap();
    assert!(!status.is_linked());
}

#[test]
fn test_link_status_reports_record_fields() {
    let links = MemoryLinks::default();
    *links.record.borrow_mut() = Some(record(true));
    let status = link_status(&links).unwrap();
    match &status {
        LinkStatus::Linked {
            url, node_name, ..
        } => {
            assert_eq!(url, CC_URL);
            assert_eq!(node_name, "node-7");
        }
        LinkStatus::NotLinked => panic!("expected a linked status"),
    }

    let doc = serde_json::to_value(&status).unwrap();
    assert_eq!(doc["status"], "linked");
    assert!(doc.get("workstation_name").is_none());
    assert_eq!(doc["organizational_unit"], "Madrid");
}

#[test]
fn test_link_status_ignores_unlinked_record() {
    let links = MemoryLinks::default();
    *links.record.borrow_mut() = Some(record(false));
    assert!(!link_status(&links).unwrap().is_linked());
}
