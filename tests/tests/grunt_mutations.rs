use tests::{fixtures, MockDriver};

use arbiter::{driver::Rows, Grunt};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

async fn fetch_opportunity(driver: &MockDriver) -> Grunt {
    driver.respond(
        "Opportunity",
        vec![json!({ "Id": "006A", "Name": "Roof", "Status": "Active", "Amount": 10 })],
    );

    fixtures::db(driver)
        .model("Opportunity")
        .unwrap()
        .find_by_id("006A")
        .select("*")
        .await
        .unwrap()
        .into_one()
        .unwrap()
}

#[tokio::test]
async fn valid_writes_are_staged_by_remote_name() {
    let driver = MockDriver::new();
    let mut opp = fetch_opportunity(&driver).await;

    opp.set("status", "Suspended").set("amount", "42");

    assert_eq!(opp.get("status"), Some(&json!("Suspended")));
    assert_eq!(
        Value::Object(opp.changeset().clone()),
        json!({ "Status": "Suspended", "Amount": 42 })
    );
    assert!(opp.errors().is_empty());
}

#[tokio::test]
async fn unchanged_and_non_writable_values_are_not_staged() {
    let driver = MockDriver::new();
    let mut opp = fetch_opportunity(&driver).await;

    opp.set("status", "Active").set("name", "Renamed");

    assert_eq!(opp.get("name"), Some(&json!("Renamed")));
    assert!(!opp.is_dirty());
}

#[tokio::test]
async fn invalid_writes_are_kept_locally_and_block_save() {
    let driver = MockDriver::new();
    let mut opp = fetch_opportunity(&driver).await;

    opp.set("status", "Suspended");
    opp.set("status", "Deleted");

    assert_eq!(opp.get("status"), Some(&json!("Deleted")));
    assert!(opp.changeset().is_empty());
    assert!(opp.error("status").unwrap().is_validation());

    let err = opp.save().await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        "Opportunity could not be saved: invalid value for field status: \
         only accepts [Active, Suspended, Inactive], got \"Deleted\""
    );
    assert!(driver.log().updates().is_empty());

    // A later valid write clears the error
    opp.set("status", "Inactive");
    assert!(opp.errors().is_empty());
    opp.save().await.unwrap();
    assert_eq!(driver.log().updates().len(), 1);
}

#[tokio::test]
async fn save_updates_only_the_changeset() {
    let driver = MockDriver::new();
    let mut opp = fetch_opportunity(&driver).await;

    opp.set("amount", 99);
    opp.save().await.unwrap();

    let updates = driver.log().updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].object, "Opportunity");
    assert_eq!(updates[0].id, json!("006A"));
    assert_eq!(Value::Object(updates[0].fields.clone()), json!({ "Amount": 99 }));
    assert!(!opp.is_dirty());
}

#[tokio::test]
async fn save_without_changes_does_nothing() {
    let driver = MockDriver::new();
    let mut opp = fetch_opportunity(&driver).await;

    opp.save().await.unwrap();
    assert_eq!(driver.log().len(), 1);
}

#[tokio::test]
async fn failed_save_keeps_the_changeset() {
    let driver = MockDriver::new();
    let mut opp = fetch_opportunity(&driver).await;

    opp.set("status", "Inactive");
    driver.fail_ops(1);

    assert!(opp.save().await.unwrap_err().is_driver());
    assert_eq!(Value::Object(opp.changeset().clone()), json!({ "Status": "Inactive" }));

    opp.save().await.unwrap();
    assert!(opp.changeset().is_empty());
}

#[tokio::test]
async fn deleting_id_is_rejected() {
    let driver = MockDriver::new();
    let mut opp = fetch_opportunity(&driver).await;

    assert!(opp.delete("id").unwrap_err().is_validation());
    assert!(opp.delete("Id").is_err());
    assert_eq!(opp.id(), Some(&json!("006A")));

    assert_eq!(opp.delete("name").unwrap(), Some(json!("Roof")));
    assert_eq!(opp.get("name"), None);
}

#[tokio::test]
async fn new_records_are_created_then_refetchable() {
    let driver = MockDriver::new();
    let db = fixtures::db(&driver);
    let cases = db.model("Case").unwrap();

    let mut case = cases.new([("subject", json!("Leaky roof")), ("status", json!("New"))]);
    assert!(case.id().is_none());

    case.save().await.unwrap();

    let creates = driver.log().creates();
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].object, "Case");
    // Unset writables are validated on create, so defaults apply
    assert_eq!(
        Value::Object(creates[0].fields.clone()),
        json!({ "Subject": "Leaky roof", "Status": "New", "Origin": "Web" })
    );
    assert_eq!(case.id(), Some(&json!("Case-1")));
    assert_eq!(case.get("origin"), Some(&json!("Web")));
    assert!(case.changeset().is_empty());

    // Feed the created record back as the remote would answer a read
    let mut row = creates[0].fields.clone();
    row.insert("Id".to_string(), json!("Case-1"));
    driver.respond("Case", vec![Value::Object(row)]);

    let fetched = cases
        .find_by_id("Case-1")
        .select("subject, status, origin")
        .await
        .unwrap()
        .into_one()
        .unwrap();

    for field in ["id", "subject", "status", "origin"] {
        assert_eq!(fetched.get(field), case.get(field), "{field}");
    }
}

#[tokio::test]
async fn creating_without_required_fields_fails() {
    let driver = MockDriver::new();
    let mut case = fixtures::db(&driver)
        .model("Case")
        .unwrap()
        .new(Map::new());

    let err = case.save().await.unwrap_err();
    assert!(err.is_validation());
    assert!(case.error("subject").is_some());
    assert_eq!(driver.connects(), 0);
}

#[tokio::test]
async fn create_returning_no_id_is_an_invalid_result() {
    use arbiter::driver::{Connection, Driver, Operation, Response};
    use arbiter_core::async_trait;
    use std::sync::Arc;

    #[derive(Debug)]
    struct NoIds;

    #[async_trait]
    impl Driver for NoIds {
        async fn connect(&self) -> arbiter::Result<Arc<dyn Connection>> {
            Ok(Arc::new(NoIds))
        }
    }

    #[async_trait]
    impl Connection for NoIds {
        async fn exec(&self, _: Operation) -> arbiter::Result<Response> {
            Ok(Response {
                rows: Rows::Created(Value::Null),
            })
        }
    }

    let db = fixtures::models().build(NoIds).unwrap();
    let mut case = db.model("Case").unwrap().new([("subject", "Hello")]);

    assert!(case.save().await.unwrap_err().is_invalid_result());
    assert!(case.is_dirty());
}

#[tokio::test]
async fn allowed_mutations_restrict_the_rest() {
    let driver = MockDriver::new();
    driver.respond(
        "Opportunity",
        vec![json!({ "Id": "006A", "Status": "Active", "Amount": 10 })],
    );

    let mut opp = fixtures::db(&driver)
        .model("Opportunity")
        .unwrap()
        .query()
        .select("*")
        .allow_mutations(["amount"])
        .exec()
        .await
        .unwrap()
        .into_one()
        .unwrap();

    assert_eq!(opp.restrictions().iter().collect::<Vec<_>>(), vec!["status"]);

    opp.set("amount", 11).set("status", "Inactive");

    assert_eq!(Value::Object(opp.changeset().clone()), json!({ "Amount": 11 }));
    assert!(opp.error("status").unwrap().is_validation());
    assert!(opp.save().await.is_err());
}

#[tokio::test]
async fn rejected_mutations_and_bad_names() {
    let driver = MockDriver::new();
    let opportunities = fixtures::db(&driver).model("Opportunity").unwrap();

    driver.respond("Opportunity", vec![json!({ "Id": "006A" })]);
    let mut opp = opportunities
        .query()
        .reject_mutations("status")
        .exec()
        .await
        .unwrap()
        .into_one()
        .unwrap();

    opp.set("status", "Inactive").set("amount", 5);
    assert!(opp.error("status").is_some());
    assert!(opp.error("amount").is_none());

    let err = opportunities
        .query()
        .allow_mutations(["amount", "name"])
        .exec()
        .await
        .unwrap_err();
    assert!(err.is_invalid_configuration());
    assert_eq!(driver.log().finds().len(), 1);
}

#[tokio::test]
async fn serializes_as_local_field_map() {
    let driver = MockDriver::new();
    let mut opp = fetch_opportunity(&driver).await;
    opp.set("status", "Inactive");

    assert_eq!(
        serde_json::to_value(&opp).unwrap(),
        json!({ "id": "006A", "name": "Roof", "status": "Inactive", "amount": 10 })
    );
    assert!(driver
        .log()
        .finds()
        .iter()
        .all(|find| matches!(find.select.limit, Some(1))));
}
