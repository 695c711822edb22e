use tests::{fixtures, MockDriver};

use arbiter::{Associated, Query};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

fn cases_comments_users(driver: &MockDriver) {
    driver
        .respond(
            "Case",
            vec![
                json!({ "Id": "case1" }),
                json!({ "Id": "case2" }),
                json!({ "Id": "case3" }),
                json!({ "Id": "case4" }),
            ],
        )
        .respond(
            "CaseComment",
            vec![
                json!({ "Id": "1", "ParentId": "case1", "CommentBody": "That guy was nuts...", "CreatedById": "user1" }),
                json!({ "Id": "3", "ParentId": "case3", "CommentBody": "We need to convert this guy right now!", "CreatedById": "user2" }),
                json!({ "Id": "2", "ParentId": "case1", "CommentBody": "Yeah Stephen was right that guy is nuts", "CreatedById": "user2" }),
            ],
        )
        .respond(
            "User",
            vec![
                json!({ "Id": "user1", "FirstName": "Stephen", "LastName": "Bolton" }),
                json!({ "Id": "user2", "FirstName": "Jasper", "LastName": "Collins" }),
            ],
        );
}

#[tokio::test]
async fn stitches_nested_associations_onto_parents() {
    let driver = MockDriver::new();
    cases_comments_users(&driver);

    let cases = fixtures::db(&driver)
        .model("Case")
        .unwrap()
        .find_by_ids(["case1", "case2", "case3", "case4"])
        .with("comments", |comments| {
            comments
                .select("*")
                .with("owner", |owner| owner.select("*"))
        })
        .exec()
        .await
        .unwrap()
        .into_many();

    let comment_ids = cases
        .iter()
        .map(|case| {
            case.many("comments")
                .iter()
                .map(|comment| comment.id().cloned().unwrap())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    // Per-parent order follows the order comments came back in
    assert_eq!(
        comment_ids,
        vec![vec![json!("1"), json!("2")], vec![], vec![json!("3")], vec![]]
    );

    assert!(matches!(
        cases[1].association("comments"),
        Some(Associated::Many(comments)) if comments.is_empty()
    ));

    let case1 = serde_json::to_value(&cases[0]).unwrap();
    assert_eq!(
        case1["comments"][1],
        json!({
            "id": "2",
            "comment": "Yeah Stephen was right that guy is nuts",
            "createdById": "user2",
            "case": "case1",
            "owner": { "id": "user2", "firstName": "Jasper", "lastName": "Collins" },
        })
    );

    let owner = cases[2].many("comments")[0].one("owner").unwrap();
    assert_eq!(owner.get("firstName"), Some(&json!("Jasper")));

    assert_eq!(
        driver.log().soql(),
        vec![
            "SELECT Id FROM Case WHERE Id IN ('case1', 'case2', 'case3', 'case4')",
            "SELECT Id, ParentId, CommentBody, CreatedById FROM CaseComment \
             WHERE ParentId IN ('case1', 'case2', 'case3', 'case4')",
            "SELECT Id, FirstName, LastName FROM User WHERE Id IN ('user1', 'user2')",
        ]
    );
}

#[tokio::test]
async fn has_one_without_match_is_null() {
    let driver = MockDriver::new();
    driver
        .respond(
            "CaseComment",
            vec![
                json!({ "Id": "1", "CreatedById": "user1" }),
                json!({ "Id": "2", "CreatedById": "ghost" }),
                json!({ "Id": "3", "CreatedById": null }),
            ],
        )
        .respond("User", vec![json!({ "Id": "user1", "FirstName": "Stephen" })]);

    let comments = fixtures::db(&driver)
        .model("CaseComment")
        .unwrap()
        .query()
        .with("owner", |owner| owner.select("firstName"))
        .exec()
        .await
        .unwrap()
        .into_many();

    assert!(comments[0].one("owner").is_some());
    assert!(comments[1].one("owner").is_none());
    assert!(matches!(comments[1].association("owner"), Some(Associated::One(None))));
    assert!(comments[2].one("owner").is_none());

    let serialized = serde_json::to_value(&comments[1]).unwrap();
    assert_eq!(serialized["owner"], Value::Null);

    // The parent query selects the join field; nulls never join
    assert_eq!(
        driver.log().soql(),
        vec![
            "SELECT Id, CreatedById FROM CaseComment",
            "SELECT Id, FirstName FROM User WHERE Id IN ('user1', 'ghost')",
        ]
    );
}

#[tokio::test]
async fn zero_parents_issue_no_secondary_query() {
    let driver = MockDriver::new();

    let cases = fixtures::db(&driver)
        .model("Case")
        .unwrap()
        .query()
        .with("comments", |comments| comments)
        .exec()
        .await
        .unwrap();

    assert!(cases.is_empty());
    assert_eq!(driver.log().len(), 1);
}

#[tokio::test]
async fn parents_without_join_values_issue_no_secondary_query() {
    let driver = MockDriver::new();
    driver.respond("CaseComment", vec![json!({ "Id": "1", "CreatedById": null })]);

    let comments = fixtures::db(&driver)
        .model("CaseComment")
        .unwrap()
        .query()
        .with("owner", |owner| owner)
        .exec()
        .await
        .unwrap()
        .into_many();

    assert!(matches!(comments[0].association("owner"), Some(Associated::One(None))));
    assert_eq!(driver.log().count(|op| op.object() == "User"), 0);
}

#[tokio::test]
async fn has_many_of_a_single_parent() {
    let driver = MockDriver::new();
    driver
        .respond("Opportunity", vec![json!({ "Id": "006A", "Name": "Roof" })])
        .respond(
            "OpportunityLineItem",
            vec![
                json!({ "Id": "00kA", "Name": "Panels", "OpportunityId": "006A" }),
                json!({ "Id": "00kB", "Name": "Inverter", "OpportunityId": "006A" }),
            ],
        );

    let opportunity = fixtures::db(&driver)
        .model("Opportunity")
        .unwrap()
        .find_by_id("006A")
        .select("name")
        .with("lineItems", |items| items.select("name").sort("name"))
        .await
        .unwrap()
        .into_one()
        .unwrap();

    let names = opportunity
        .many("lineItems")
        .iter()
        .map(|item| item.get("name").cloned().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(names, vec![json!("Panels"), json!("Inverter")]);

    assert_eq!(
        driver.log().soql()[1],
        "SELECT Id, OpportunityId, Name FROM OpportunityLineItem \
         WHERE OpportunityId IN ('006A') ORDER BY Name ASC"
    );
}

#[tokio::test]
async fn unknown_association_is_a_configuration_error() {
    let driver = MockDriver::new();

    let err = fixtures::db(&driver)
        .model("User")
        .unwrap()
        .query()
        .with("cases", |cases| cases)
        .exec()
        .await
        .unwrap_err();

    assert!(err.is_invalid_configuration());
    assert_eq!(
        err.to_string(),
        "invalid configuration: cannot fetch association cases; not configured on User"
    );
    assert!(driver.log().is_empty());
}

#[tokio::test]
async fn association_callbacks_cannot_execute_their_query() {
    let driver = MockDriver::new();
    driver.respond("Case", vec![json!({ "Id": "case1" })]);

    let stash: Arc<Mutex<Option<Query>>> = Arc::default();
    let slot = stash.clone();

    fixtures::db(&driver)
        .model("Case")
        .unwrap()
        .query()
        .with("comments", move |comments| {
            *slot.lock().unwrap() = Some(comments.clone());
            comments
        })
        .exec()
        .await
        .unwrap();

    let held = stash.lock().unwrap().take().unwrap();
    let err = held.exec().await.unwrap_err();

    assert!(err.is_invalid_configuration());
    assert!(err.to_string().contains("do not execute a query passed to with()"));
    assert_eq!(driver.log().finds().len(), 2);
}

#[tokio::test]
async fn secondary_query_failure_fails_the_whole_query() {
    let driver = MockDriver::new();
    driver.respond("Case", vec![json!({ "Id": "case1" })]);

    let db = fixtures::db(&driver);
    let query = db
        .model("Case")
        .unwrap()
        .query()
        .with("comments", |comments| comments.select("bogus"));

    let err = query.exec().await.unwrap_err();
    assert!(err.is_unknown_field());
    assert_eq!(driver.log().finds().len(), 1);
}

#[tokio::test]
async fn raw_callback_filters_keep_the_join_keys() {
    let driver = MockDriver::new();
    driver
        .respond("Case", vec![json!({ "Id": "case1" })])
        .respond(
            "CaseComment",
            vec![json!({ "Id": "1", "ParentId": "case1", "CommentBody": "Call back" })],
        );

    let cases = fixtures::db(&driver)
        .model("Case")
        .unwrap()
        .query()
        .with("comments", |comments| {
            comments.select("comment").filter("CommentBody != null")
        })
        .exec()
        .await
        .unwrap()
        .into_many();

    assert_eq!(cases[0].many("comments").len(), 1);
    assert_eq!(
        driver.log().soql()[1],
        "SELECT Id, ParentId, CommentBody FROM CaseComment \
         WHERE ParentId IN ('case1') AND (CommentBody != null)"
    );
}

#[tokio::test]
async fn sibling_associations_are_fetched_together() {
    let driver = MockDriver::new();
    driver
        .respond(
            "CaseComment",
            vec![
                json!({ "Id": "1", "ParentId": "case1", "CreatedById": "user1" }),
                json!({ "Id": "2", "ParentId": "case2", "CreatedById": "user1" }),
            ],
        )
        .respond("User", vec![json!({ "Id": "user1", "FirstName": "Stephen" })])
        .respond(
            "Case",
            vec![
                json!({ "Id": "case2", "Subject": "Leaky roof" }),
                json!({ "Id": "case1", "Subject": "Broken panel" }),
            ],
        );

    let comments = fixtures::db(&driver)
        .model("CaseComment")
        .unwrap()
        .query()
        .with("owner", |owner| owner.select("firstName"))
        .with("parent", |parent| parent.select("subject"))
        .exec()
        .await
        .unwrap()
        .into_many();

    for comment in &comments {
        assert_eq!(
            comment.one("owner").unwrap().get("firstName"),
            Some(&json!("Stephen"))
        );
    }
    assert_eq!(
        comments[0].one("parent").unwrap().get("subject"),
        Some(&json!("Broken panel"))
    );
    assert_eq!(
        comments[1].one("parent").unwrap().get("subject"),
        Some(&json!("Leaky roof"))
    );

    let mut soql = driver.log().soql();
    assert_eq!(soql.remove(0), "SELECT Id, CreatedById, ParentId FROM CaseComment");
    soql.sort();
    assert_eq!(
        soql,
        vec![
            "SELECT Id, Subject FROM Case WHERE Id IN ('case1', 'case2')",
            "SELECT Id, FirstName FROM User WHERE Id IN ('user1')",
        ]
    );
}
