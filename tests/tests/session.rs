use tests::{fixtures, MockDriver};

use arbiter::db::SessionConfig;
use std::time::Duration;

#[tokio::test]
async fn connection_is_reused_within_the_window() {
    let driver = MockDriver::new();
    let db = fixtures::db(&driver);
    let users = db.model("User").unwrap();

    users.query().exec().await.unwrap();
    users.query().exec().await.unwrap();
    db.model("Case").unwrap().query().exec().await.unwrap();

    assert_eq!(driver.connects(), 1);
}

#[tokio::test]
async fn concurrent_queries_share_one_login() {
    let driver = MockDriver::new();
    let db = fixtures::db(&driver);
    let users = db.model("User").unwrap();

    let (first, second) = (users.query(), users.query());
    let (a, b) = tokio::join!(first.exec(), second.exec());
    a.unwrap();
    b.unwrap();

    assert_eq!(driver.connects(), 1);
}

#[tokio::test]
async fn expired_sessions_reconnect() {
    let driver = MockDriver::new();
    let db = fixtures::models()
        .max_connection_time(Duration::ZERO)
        .build(driver.clone())
        .unwrap();
    let users = db.model("User").unwrap();

    users.query().exec().await.unwrap();
    users.query().exec().await.unwrap();

    assert_eq!(driver.connects(), 2);
}

#[tokio::test]
async fn invalidated_sessions_reconnect() {
    let driver = MockDriver::new();
    let db = fixtures::db(&driver);
    let users = db.model("User").unwrap();

    users.query().exec().await.unwrap();
    db.invalidate_session().await;
    users.query().exec().await.unwrap();

    assert_eq!(driver.connects(), 2);
}

#[tokio::test]
async fn failed_logins_are_not_cached() {
    let driver = MockDriver::new();
    driver.fail_connects(1);
    let db = fixtures::db(&driver);
    let users = db.model("User").unwrap();

    let err = users.query().exec().await.unwrap_err();
    assert!(err.is_driver());
    assert_eq!(
        err.to_string(),
        "INVALID_LOGIN: invalid username or password"
    );

    users.query().exec().await.unwrap();
    assert_eq!(driver.connects(), 2);
}

#[test]
fn default_window_is_six_hours() {
    assert_eq!(
        SessionConfig::default().max_connection_time,
        Duration::from_secs(6 * 60 * 60)
    );
}

#[test]
fn registry_rejects_duplicates_and_dangling_associations() {
    let driver = MockDriver::new();

    let err = fixtures::models()
        .register("User", fixtures::user())
        .build(driver.clone())
        .unwrap_err();
    assert!(err.is_invalid_configuration());
    assert_eq!(
        err.to_string(),
        "invalid configuration: model User is registered twice"
    );

    let mut builder = arbiter::Db::builder();
    builder.register("Case", fixtures::case());
    let err = builder.build(driver).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid configuration: association comments on Case refers to unregistered model CaseComment"
    );
}

#[test]
fn unknown_models_are_configuration_errors() {
    let db = fixtures::db(&MockDriver::new());
    assert!(db.model("Account").unwrap_err().is_invalid_configuration());
    assert_eq!(
        db.model_names().collect::<Vec<_>>(),
        vec!["Opportunity", "LineItem", "Case", "CaseComment", "User"]
    );
}
