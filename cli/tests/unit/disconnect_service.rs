//! Disconnect pipeline driven through recording mocks.

#![allow(clippy::unwrap_used)]

use chrono::Utc;
use gecos_assistant::domain::workstation::node_name_from_hw_address;
use gecos_assistant::domain::{
    AccessData, Outcome, Step, StepStatus, ValidationError, WorkflowError,
};
use gecos_common::LinkRecord;

use crate::helpers::{CC_URL, MAC, access, linked_workstation, workstation};
use crate::mocks::{MemoryFiles, MockRunner, Rig};

const NODE: &str = "node-7";

fn linked_rig() -> Rig {
    let rig = Rig::default();
    let paths = &rig.config.paths;
    let files = MemoryFiles::with_files(&[
        &paths.control_file,
        &paths.client_identity,
        &paths.client_wrapper,
    ]);
    *rig.links.record.borrow_mut() = Some(LinkRecord {
        uri: CC_URL.to_string(),
        gcc_username: "admin".to_string(),
        gcc_nodename: NODE.to_string(),
        gcc_workstation_name: "ws-01".to_string(),
        gcc_ou: "Madrid".to_string(),
        gcc_link: true,
        linked_at: Utc::now(),
    });
    Rig { files, ..rig }
}

fn knife(object: &str) -> String {
    format!("knife {object} delete {NODE} -c /etc/chef/knife.rb -y")
}

#[tokio::test]
async fn test_disconnect_happy_path_unlinks_and_unregisters() {
    let rig = linked_rig();
    let report = rig.disconnect(&access(), &linked_workstation(NODE)).await;

    assert!(report.is_success(), "{:?}", report.outcome);
    assert!(report.board.all_done());
    assert_eq!(
        rig.runner.lines(),
        vec![knife("node"), knife("client"), "service chef-client stop".to_string()]
    );

    let paths = &rig.config.paths;
    let client = rig.files.text(&paths.client_config).unwrap();
    assert!(client.contains("\"CHEF_URL\""));
    assert!(client.contains("\"ADMIN_NAME\""));
    assert!(client.contains("\"NODE_NAME\""));
    for removed in [
        &paths.control_file,
        &paths.client_identity,
        &paths.client_wrapper,
        &paths.knife_config,
        &paths.validation_certificate,
    ] {
        assert!(!rig.files.exists(removed), "{}", removed.display());
    }

    assert!(rig.directory.called(&format!("unregister_computer {NODE}")));
    assert!(!rig.directory.called("list_computer_names"));
    assert_eq!(rig.links.deletes.get(), 1);
    assert!(rig.links.record.borrow().is_none());
    assert!(
        rig.reporter
            .labels
            .borrow()
            .contains(&"Unregister from GECOS CC".to_string())
    );
    assert_eq!(report.direction, gecos_assistant::domain::Direction::Disconnect);
}

#[tokio::test]
async fn test_disconnect_knife_config_points_at_validation_key() {
    let mut rig = linked_rig();
    // Stop before Clean so knife.rb is still there.
    rig.runner = MockRunner::failing("knife client");
    let report = rig.disconnect(&access(), &linked_workstation(NODE)).await;

    assert_eq!(report.board.status(Step::Link), StepStatus::Error);
    let knife_rb = rig.files.text(&rig.config.paths.knife_config).unwrap();
    assert!(knife_rb.contains("\"/etc/chef/validation.pem\""));
    assert!(knife_rb.contains("\"https://cc.example.org/\""));
    assert!(knife_rb.contains("\"admin\""));
    assert_eq!(rig.files.mode(&rig.config.paths.knife_config), Some(0o644));
    assert!(!rig.directory.called("unregister_computer"));
    assert!(rig.links.record.borrow().is_some());
}

#[tokio::test]
async fn test_disconnect_node_delete_failure_keeps_client_wrapper() {
    let mut rig = linked_rig();
    rig.runner = MockRunner::failing("knife node");
    let report = rig.disconnect(&access(), &linked_workstation(NODE)).await;

    assert!(matches!(
        report.outcome,
        Outcome::Failed {
            step: Step::Link,
            error: WorkflowError::ExternalCommand { .. },
        }
    ));
    let paths = &rig.config.paths;
    assert!(!rig.files.exists(&paths.control_file));
    assert!(!rig.files.exists(&paths.client_identity));
    assert!(rig.files.exists(&paths.client_wrapper));
    assert_eq!(rig.runner.lines(), vec![knife("node")]);
    assert_eq!(report.board.status(Step::Register), StepStatus::Pending);
}

#[tokio::test]
async fn test_disconnect_control_file_removal_failure_halts_link() {
    let mut rig = linked_rig();
    rig.files.fail_removes_of = Some(rig.config.paths.control_file.clone());
    let report = rig.disconnect(&access(), &linked_workstation(NODE)).await;

    match report.error() {
        Some(WorkflowError::FileSystem { path, .. }) => {
            assert_eq!(path, &rig.config.paths.control_file);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(rig.runner.lines().is_empty());
}

#[tokio::test]
async fn test_disconnect_refused_unregister_keeps_record() {
    let mut rig = linked_rig();
    rig.directory.unregister_ok = false;
    let report = rig.disconnect(&access(), &linked_workstation(NODE)).await;

    assert!(matches!(
        report.outcome,
        Outcome::Failed {
            step: Step::Register,
            error: WorkflowError::RemoteCommunication(_),
        }
    ));
    assert_eq!(rig.links.deletes.get(), 0);
    assert_eq!(report.board.status(Step::Link), StepStatus::Done);
    assert_eq!(report.board.status(Step::Clean), StepStatus::Pending);
}

#[tokio::test]
async fn test_disconnect_service_stop_failure_only_warns() {
    let mut rig = linked_rig();
    rig.runner = MockRunner::failing("service chef-client stop");
    let report = rig.disconnect(&access(), &linked_workstation(NODE)).await;

    assert!(report.is_success(), "{:?}", report.outcome);
    assert_eq!(rig.reporter.warnings.borrow().len(), 1);
}

#[tokio::test]
async fn test_disconnect_clean_removal_failure_only_warns() {
    let mut rig = linked_rig();
    rig.files.fail_removes_of = Some(rig.config.paths.knife_config.clone());
    let report = rig.disconnect(&access(), &linked_workstation(NODE)).await;

    assert!(report.is_success(), "{:?}", report.outcome);
    assert!(rig.reporter.warnings.borrow()[0].contains("knife.rb"));
    assert_eq!(report.board.status(Step::Clean), StepStatus::Done);
}

#[tokio::test]
async fn test_disconnect_blank_login_fails_before_any_remote_call() {
    let rig = linked_rig();
    let report = rig
        .disconnect(
            &AccessData::new(CC_URL, "", "secret"),
            &linked_workstation(NODE),
        )
        .await;

    assert!(matches!(
        report.outcome,
        Outcome::Failed {
            step: Step::CheckCredentials,
            error: WorkflowError::Validation(ValidationError::EmptyLogin),
        }
    ));
    assert!(rig.directory.calls().is_empty());
    assert!(rig.runner.lines().is_empty());
    assert!(rig.reporter.finished.get());
}

#[tokio::test]
async fn test_disconnect_without_node_name_derives_it_from_the_network() {
    let mut rig = linked_rig();
    rig.directory.computers = vec!["ws-01".to_string()];
    let report = rig.disconnect(&access(), &workstation()).await;

    assert!(report.is_success(), "{:?}", report.outcome);
    let node = node_name_from_hw_address(MAC);
    assert_eq!(report.node_name.as_deref(), Some(node.as_str()));
    assert!(!rig.directory.called("list_computer_names"));
    assert!(rig.directory.called(&format!("unregister_computer {node}")));
    assert!(
        rig.runner
            .lines()
            .contains(&format!("knife node delete {node} -c /etc/chef/knife.rb -y"))
    );
}
