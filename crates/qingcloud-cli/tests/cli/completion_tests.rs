use qingcloud_cli::Dispatcher;
use qingcloud_cli::completion::fetch_instance_candidates;
use test_log::test;

use super::test_utilities::{OneShotServer, find_closed_port, test_config};

#[test]
fn instance_ids_come_from_a_signed_describe_call() {
    let reply = r#"{"action":"DescribeInstancesResponse","instance_set":[{"instance_id":"i-web1","instance_name":"web"},{"instance_id":"i-db1"}],"ret_code":0,"total_count":2}"#;
    let server = OneShotServer::start(200, reply).unwrap();
    let dispatcher = Dispatcher::with_endpoint(test_config("pek3"), server.endpoint.clone()).unwrap();

    let ids: Vec<String> = fetch_instance_candidates(&dispatcher)
        .unwrap()
        .iter()
        .map(|candidate| candidate.get_value().to_string_lossy().into_owned())
        .collect();
    assert_eq!(ids, vec!["i-web1", "i-db1"]);

    let request = server.request_line();
    assert!(request.contains("&action=DescribeInstances&"));
    assert!(request.contains("&limit=100&"));
    assert!(request.contains("&signature="));
}

#[test]
fn failed_describe_offers_nothing() {
    let server = OneShotServer::start(500, r#"{"ret_code":5000}"#).unwrap();
    let dispatcher = Dispatcher::with_endpoint(test_config("pek3"), server.endpoint.clone()).unwrap();
    assert!(fetch_instance_candidates(&dispatcher).is_err());
    server.request_line();

    let port = find_closed_port().unwrap();
    let offline =
        Dispatcher::with_endpoint(test_config("pek3"), format!("http://127.0.0.1:{port}/iaas/?")).unwrap();
    assert!(fetch_instance_candidates(&offline).is_err());
}
