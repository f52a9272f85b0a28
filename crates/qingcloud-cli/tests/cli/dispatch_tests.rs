use qingcloud::QingCloudError;
use qingcloud_cli::Dispatcher;
use qingcloud_cli::commands::{DescribeInstances, RunInstances, TerminateInstances};
use test_log::test;

use super::test_utilities::{OneShotServer, find_closed_port, test_config};

const DESCRIBE_REPLY: &str =
    r#"{"action":"DescribeInstancesResponse","instance_set":[],"ret_code":0,"total_count":0}"#;

#[test]
fn describe_round_trip_prints_pretty_reply() {
    let server = OneShotServer::start(200, DESCRIBE_REPLY).unwrap();
    let dispatcher = Dispatcher::with_endpoint(test_config("pek3a"), server.endpoint.clone()).unwrap();

    let mut describe = DescribeInstances {
        instances: vec!["i-abc".to_string()],
        exclude_reserved: true,
        limit: 500,
        ..DescribeInstances::default()
    };
    let mut out = Vec::new();
    let response = dispatcher.dispatch(&mut describe, &mut out).unwrap();
    assert!(response.status.is_success());

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.starts_with("{\n    \"action\": \"DescribeInstancesResponse\",\n"));

    let request = server.request_line();
    assert!(request.starts_with("GET /iaas/?access_key_id=QYACCESSKEYIDEXAMPLE&action=DescribeInstances&"));
    assert!(request.ends_with(" HTTP/1.1"));
    for expected in [
        "&exclude_reserved=1&",
        "&instances.1=i-abc&",
        "&limit=20&",
        "&signature_method=HmacSHA256&",
        "&version=1&",
        "&zone=pek3a&signature=",
    ] {
        assert!(request.contains(expected), "{expected} missing from {request}");
    }
}

#[test]
fn http_error_status_prints_body_then_fails() {
    let reply = r#"{"ret_code":1200,"message":"PermissionDenied"}"#;
    let server = OneShotServer::start(500, reply).unwrap();
    let dispatcher = Dispatcher::with_endpoint(test_config("gd2"), server.endpoint.clone()).unwrap();

    let mut terminate = TerminateInstances {
        instances: vec!["i-1".to_string()],
        direct_cease: true,
    };
    let mut out = Vec::new();
    let err = dispatcher.dispatch(&mut terminate, &mut out).unwrap_err();

    assert!(err.is_transport());
    assert!(err.to_string().contains("500"));
    assert!(String::from_utf8(out).unwrap().contains("PermissionDenied"));
    assert!(server.request_line().contains("&direct_cease=1&"));
}

#[test]
fn unreachable_endpoint_is_a_transport_failure() {
    let port = find_closed_port().unwrap();
    let dispatcher =
        Dispatcher::with_endpoint(test_config("sh1a"), format!("http://127.0.0.1:{port}/iaas/?")).unwrap();

    let mut terminate = TerminateInstances {
        instances: vec!["i-1".to_string()],
        direct_cease: false,
    };
    let mut out = Vec::new();
    let err = dispatcher.dispatch(&mut terminate, &mut out).unwrap_err();

    assert!(matches!(err, QingCloudError::TransportFailure { .. }));
    assert!(out.is_empty());
}

#[test]
fn validation_failure_sends_nothing() {
    let port = find_closed_port().unwrap();
    let dispatcher =
        Dispatcher::with_endpoint(test_config("pek3"), format!("http://127.0.0.1:{port}/iaas/?")).unwrap();

    let mut run = RunInstances {
        image_id: "centos73x64".to_string(),
        cpu: 3,
        memory: 2048,
        ..RunInstances::default()
    };
    let mut out = Vec::new();
    let err = dispatcher.dispatch(&mut run, &mut out).unwrap_err();

    assert!(err.is_client_error());
    assert!(err.to_string().starts_with("Invalid value for 'cpu'"));
}

#[test]
fn invalid_zone_fails_before_command_validation() {
    let dispatcher = Dispatcher::new(test_config("nowhere")).unwrap();
    let mut run = RunInstances {
        image_id: "centos73x64".to_string(),
        cpu: 3,
        memory: 2048,
        ..RunInstances::default()
    };

    let err = dispatcher.prepare(&mut run, chrono::Utc::now()).unwrap_err();
    assert!(err.to_string().starts_with("Invalid value for 'zone'"));
}
