use serde_json::json;
use std::sync::Arc;
use zoho_crm::api::models::{
    ActionWrapper, ConvertActionResponse, ConvertActionWrapper, RecordResponseWrapper, Trigger,
};
use zoho_crm::api::operations::Param;
use zoho_crm::api::{
    ActionError, ActionResponse, ApiException, ApiResponse, LeadConverter, NormalizedResult, Pagination,
    Record, ResponseBody, SuccessResponse, SuccessfulConvert, ZohoClient,
};

use super::mock::{Call, MockOperations};

fn added(id: &str) -> SuccessResponse {
    SuccessResponse {
        code: "SUCCESS".into(),
        details: json!({"id": id}).as_object().cloned().unwrap(),
        message: "record added".into(),
        status: "success".into(),
    }
}

fn action(data: Vec<ActionResponse>) -> ApiResponse {
    ApiResponse::new(201, ResponseBody::Action(ActionWrapper { data }))
}

fn records(data: Vec<Record>) -> ApiResponse {
    ApiResponse::new(200, ResponseBody::Records(RecordResponseWrapper { data, info: None }))
}

fn client(mock: MockOperations) -> (ZohoClient<Arc<MockOperations>>, Arc<MockOperations>) {
    let mock = Arc::new(mock);
    (ZohoClient::new(Arc::clone(&mock), "Leads"), mock)
}

#[tokio::test]
async fn test_create_builds_record_from_fields() {
    let (client, mock) = client(MockOperations::new().reply(action(vec![ActionResponse::Success(added("77"))])));

    let result = client
        .create([("Last_Name", json!("Doe")), ("Company", json!("Acme"))])
        .await;

    assert_eq!(result, NormalizedResult::Success(added("77")));
    assert_eq!(result.success().and_then(|s| s.record_id().map(String::from)), Some("77".to_string()));

    let expected: Record = [("Last_Name", json!("Doe")), ("Company", json!("Acme"))]
        .into_iter()
        .collect();
    match &mock.calls()[..] {
        [Call::Create { module, body }] => {
            assert_eq!(module, "Leads");
            assert_eq!(body.data, vec![expected]);
            assert_eq!(body.trigger, None);
        }
        calls => panic!("unexpected calls: {:?}", calls),
    }
}

#[tokio::test]
async fn test_create_validation_error_surfaces_as_failure() {
    let (client, _) = client(MockOperations::new().reply(action(vec![ActionResponse::Error(ActionError {
        code: Some("MANDATORY_NOT_FOUND".into()),
        status: Some("INVALID_DATA".into()),
        message: Some("Required field missing".into()),
        details: None,
    })])));

    let result = client.create([("Company", "Acme")]).await;

    assert_eq!(
        result,
        NormalizedResult::Failure {
            status: "INVALID_DATA".into(),
            message: "Required field missing".into(),
        }
    );
}

#[tokio::test]
async fn test_update_submits_record_unchanged() {
    let mut record = Record::with_id("4150868000001944196");
    record.add_key_value("Phone", "555-0100");

    let (client, mock) = client(MockOperations::new().reply(action(vec![ActionResponse::Success(added("1"))])));
    assert!(client.update(record.clone()).await.is_success());

    assert_eq!(
        mock.calls(),
        vec![Call::Update {
            module: "Leads".into(),
            body: zoho_crm::api::models::BodyWrapper::new(vec![record]),
        }]
    );
}

#[tokio::test]
async fn test_delete_sends_all_ids_in_one_request() {
    let (client, mock) = client(MockOperations::new().reply(action(vec![ActionResponse::Success(added("1"))])));

    assert!(client.delete(&["1", "2", "3"]).await.is_success());

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    let Call::Delete { params, .. } = &calls[0] else {
        panic!("expected delete, got {:?}", calls[0]);
    };
    assert_eq!(params.get_all(Param::Ids), vec!["1", "2", "3"]);
    assert_eq!(params.to_query_pairs(), vec![("ids", "1,2,3".to_string())]);
}

#[tokio::test]
async fn test_delete_record_wraps_single_id() {
    let (client, mock) = client(MockOperations::new());

    // No reply queued: the mock answers 204
    assert!(client.delete_record("9").await.is_empty());

    let calls = mock.calls();
    let Call::Delete { params, .. } = &calls[0] else {
        panic!("expected delete");
    };
    assert_eq!(params.get_all(Param::Ids), vec!["9"]);
}

#[tokio::test]
async fn test_get_record_returns_first_record() {
    let (client, mock) = client(MockOperations::new().reply(records(vec![Record::with_id("5")])));

    let record = client.get_record("5").await;

    assert_eq!(record.as_ref().and_then(|r| r.id()), Some("5"));
    assert_eq!(
        mock.calls(),
        vec![Call::GetRecord {
            id: "5".into(),
            module: "Leads".into(),
        }]
    );
}

#[tokio::test]
async fn test_get_record_with_empty_id_issues_no_request() {
    let (client, mock) = client(MockOperations::new());

    assert_eq!(client.get_record("").await, None);
    assert_eq!(client.get_record("   ").await, None);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_get_record_without_data_is_none() {
    let (client, _) = client(
        MockOperations::new()
            .reply(ApiResponse::no_body(204))
            .reply(records(Vec::new()))
            .fail("connection reset"),
    );

    assert_eq!(client.get_record("1").await, None);
    assert_eq!(client.get_record("1").await, None);
    assert_eq!(client.get_record("1").await, None);
}

#[tokio::test]
async fn test_get_records_paginates() {
    let data: Vec<Record> = (1..=3).map(|i| Record::with_id(i.to_string())).collect();
    let (client, mock) = client(MockOperations::new().reply(records(data.clone())).reply(records(Vec::new())));

    assert_eq!(client.get_records(Pagination::default()).await, data);
    assert!(client.get_records(Pagination::new(2, 50)).await.is_empty());

    let pages: Vec<Vec<(&'static str, String)>> = mock
        .calls()
        .iter()
        .map(|call| match call {
            Call::GetRecords { params, .. } => params.to_query_pairs(),
            other => panic!("unexpected call {:?}", other),
        })
        .collect();
    assert_eq!(
        pages,
        vec![
            vec![("page", "1".to_string()), ("per_page", "200".to_string())],
            vec![("page", "2".to_string()), ("per_page", "50".to_string())],
        ]
    );
}

#[tokio::test]
async fn test_search_variants_set_their_own_key() {
    let (client, mock) = client(MockOperations::new());

    client
        .search_records_by_criteria("(Last_Name:equals:Doe)", Pagination::default())
        .await;
    client.search_records_by_word("acme", Pagination::default()).await;
    client.search_records_by_phone("555-0100", Pagination::page(2)).await;
    client
        .search_records_by_email("jane@example.com", Pagination::default())
        .await;

    let keys: Vec<(&'static str, String, String)> = mock
        .calls()
        .iter()
        .map(|call| match call {
            Call::Search { params, .. } => {
                let pairs = params.to_query_pairs();
                (pairs[0].0, pairs[0].1.clone(), pairs[1].1.clone())
            }
            other => panic!("unexpected call {:?}", other),
        })
        .collect();

    assert_eq!(
        keys,
        vec![
            ("criteria", "(Last_Name:equals:Doe)".to_string(), "1".to_string()),
            ("word", "acme".to_string(), "1".to_string()),
            ("phone", "555-0100".to_string(), "2".to_string()),
            ("email", "jane@example.com".to_string(), "1".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_search_exception_is_empty_list() {
    let (client, _) = client(MockOperations::new().reply(ApiResponse::new(
        400,
        ResponseBody::Exception(ApiException {
            status: "error".into(),
            code: "INVALID_QUERY".into(),
            message: "invalid query formed".into(),
            details: None,
        }),
    )));

    assert!(client.search_records_by_word("x", Pagination::default()).await.is_empty());
}

#[tokio::test]
async fn test_bulk_create_always_sets_triggers() {
    let entries = vec![
        ActionResponse::Success(added("1")),
        ActionResponse::Error(ActionError {
            status: Some("error".into()),
            message: Some("duplicate data".into()),
            ..ActionError::default()
        }),
    ];
    let (client, mock) = client(MockOperations::new().reply(action(entries.clone())));

    let result = client
        .bulk_create(vec![Record::with_id("a"), Record::with_id("b")])
        .await;
    assert_eq!(result, entries);

    let calls = mock.calls();
    let Call::Create { body, .. } = &calls[0] else {
        panic!("expected create");
    };
    assert_eq!(body.data.len(), 2);
    assert_eq!(
        body.trigger,
        Some(vec![Trigger::Approval, Trigger::Workflow, Trigger::Blueprint])
    );
}

#[tokio::test]
async fn test_bulk_create_degrades_silently() {
    let (client, _) = client(MockOperations::new().fail("timed out").reply(ApiResponse::unexpected(500)));

    assert!(client.bulk_create(vec![Record::new()]).await.is_empty());
    assert!(client.bulk_create(vec![Record::new()]).await.is_empty());
}

#[tokio::test]
async fn test_convert_lead() {
    let converted = SuccessfulConvert {
        contacts: Some("10".into()),
        deals: None,
        accounts: Some("11".into()),
    };
    let (client, mock) = client(MockOperations::new().reply(ApiResponse::new(
        200,
        ResponseBody::Convert(ConvertActionWrapper {
            data: vec![ConvertActionResponse::Success(converted.clone())],
        }),
    )));

    let converter = LeadConverter {
        overwrite: Some(true),
        ..LeadConverter::default()
    };
    assert_eq!(client.convert_lead("42", vec![converter.clone()]).await, Some(converted));

    match &mock.calls()[..] {
        [Call::Convert { id, body }] => {
            assert_eq!(id, "42");
            assert_eq!(body.data, vec![converter]);
        }
        calls => panic!("unexpected calls: {:?}", calls),
    }
}

#[tokio::test]
async fn test_transport_errors_never_escape() {
    let (client, _) = client(
        MockOperations::new()
            .fail("dns failure")
            .fail("dns failure")
            .fail("dns failure")
            .fail("dns failure"),
    );

    assert!(client.create([("Last_Name", "Doe")]).await.is_empty());
    assert!(client.update(Record::with_id("1")).await.is_empty());
    assert!(client.get_records(Pagination::default()).await.is_empty());
    assert_eq!(client.convert_lead("1", Vec::new()).await, None);
}

#[tokio::test]
async fn test_for_module_shares_binding() {
    let (client, mock) = client(MockOperations::new());
    let contacts = client.for_module("Contacts");

    contacts.get_records(Pagination::default()).await;

    assert_eq!(contacts.module_api_name(), "Contacts");
    assert!(matches!(&mock.calls()[0], Call::GetRecords { module, .. } if module == "Contacts"));
}
