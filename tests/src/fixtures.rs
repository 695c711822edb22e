//! Models shared by the integration tests.

use crate::MockDriver;

use arbiter::{db::Builder, AssociationConfig, Db, Field, FieldType, Schema};

pub fn opportunity() -> Schema {
    Schema::builder("Opportunity")
        .field("name", "Name")
        .field(
            "status",
            Field::new("Status")
                .writable()
                .one_of(["Active", "Suspended", "Inactive"]),
        )
        .field(
            "amount",
            Field::new("Amount").writable().ty(FieldType::Number),
        )
        .field(
            "project",
            Schema::builder("Project__c")
                .field("name", "Name")
                .field(
                    "proposalCAD",
                    Schema::builder("Proposal_CAD__c")
                        .field("proposalCompleted", "Proposal_Completed__c")
                        .build()
                        .expect("proposal schema"),
                )
                .build()
                .expect("project schema"),
        )
        .field(
            "lineItems",
            AssociationConfig::has_many("id", "oppId", "LineItem"),
        )
        .build()
        .expect("opportunity schema")
}

pub fn line_item() -> Schema {
    Schema::builder("OpportunityLineItem")
        .field("name", "Name")
        .field("oppId", Field::new("OpportunityId").rel("Opportunity"))
        .field("description", "Description")
        .build()
        .expect("line item schema")
}

pub fn case() -> Schema {
    Schema::builder("Case")
        .field("status", Field::new("Status").writable())
        .field(
            "subject",
            Field::new("Subject").writable().required(),
        )
        .field(
            "origin",
            Field::new("Origin").writable().default_value("Web"),
        )
        .field("recordTypId", "RecordTypeId")
        .field(
            "comments",
            AssociationConfig::has_many("id", "case", "CaseComment"),
        )
        .build()
        .expect("case schema")
}

pub fn case_comment() -> Schema {
    Schema::builder("CaseComment")
        .field("comment", "CommentBody")
        .field("createdById", "CreatedById")
        .field("case", "ParentId")
        .field("owner", AssociationConfig::has_one("createdById", "id", "User"))
        .field("parent", AssociationConfig::has_one("case", "id", "Case"))
        .build()
        .expect("case comment schema")
}

pub fn user() -> Schema {
    Schema::builder("User")
        .field("firstName", "FirstName")
        .field("lastName", "LastName")
        .build()
        .expect("user schema")
}

/// Every fixture model, registered under the names associations use.
pub fn models() -> Builder {
    let mut builder = Db::builder();
    builder
        .register("Opportunity", opportunity())
        .register("LineItem", line_item())
        .register("Case", case())
        .register("CaseComment", case_comment())
        .register("User", user());
    builder
}

pub fn db(driver: &MockDriver) -> Db {
    crate::init_logging();
    models().build(driver.clone()).expect("fixture registry")
}
