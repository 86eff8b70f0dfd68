use async_graphql::{EmptySubscription, MergedObject, Schema};
use sqlx::SqlitePool;

use crate::applications::resolvers::{ApplicationMutation, ApplicationQuery};
use crate::companies::resolvers::{CompanyMutation, CompanyQuery};
use crate::contacts::resolvers::{ContactMutation, ContactQuery};
use crate::links::resolvers::LinkMutation;

#[derive(MergedObject, Default)]
pub struct QueryRoot(CompanyQuery, ContactQuery, ApplicationQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(CompanyMutation, ContactMutation, ApplicationMutation, LinkMutation);

pub type TrackerSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the GraphQL schema. The pool is the only shared handle; resolvers
/// read it from the request context.
pub fn build_schema(pool: SqlitePool) -> TrackerSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(pool)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use async_graphql::{Request, Variables};
    use serde_json::{json, Value};

    async fn run(schema: &TrackerSchema, query: &str, vars: Value) -> Value {
        let response = schema
            .execute(Request::new(query).variables(Variables::from_json(vars)))
            .await;
        assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
        response.data.into_json().unwrap()
    }

    async fn error_code(schema: &TrackerSchema, query: &str, vars: Value) -> String {
        let response = schema
            .execute(Request::new(query).variables(Variables::from_json(vars)))
            .await;
        let err = response.errors.first().expect("expected an error");
        let ext = err.extensions.as_ref().expect("extensions");
        match ext.get("code") {
            Some(async_graphql::Value::String(code)) => code.clone(),
            other => panic!("unexpected code {other:?}"),
        }
    }

    const CREATE_COMPANY: &str = r#"
        mutation($input: CreateCompanyInput!) {
            createCompany(input: $input) { id name size type }
        }"#;

    const CREATE_CONTACT: &str = r#"
        mutation($input: CreateContactInput!) {
            createContact(input: $input) { id contactStatus }
        }"#;

    const CREATE_APPLICATION: &str = r#"
        mutation($input: CreateApplicationInput!) {
            createApplication(input: $input) { id status priority preference postedDate }
        }"#;

    const LINK: &str = r#"
        mutation($applicationId: ID!, $contactId: ID!, $role: String) {
            linkContactToApplication(applicationId: $applicationId, contactId: $contactId, role: $role) {
                id role contact { name } application { jobTitle }
            }
        }"#;

    async fn seed_company(schema: &TrackerSchema, name: &str) -> String {
        let data = run(schema, CREATE_COMPANY, json!({ "input": { "name": name } })).await;
        data["createCompany"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_company_create_and_exact_name_lookup() {
        let schema = build_schema(test_pool().await);
        let data = run(
            &schema,
            CREATE_COMPANY,
            json!({ "input": { "name": "TechCorp", "size": "MEDIUM", "type": "STARTUP" } }),
        )
        .await;
        assert_eq!(data["createCompany"]["type"], "STARTUP");

        let data = run(
            &schema,
            r#"{ companies(filter: { name: "TechCorp" }) { name size } }"#,
            json!({}),
        )
        .await;
        assert_eq!(data["companies"], json!([{ "name": "TechCorp", "size": "MEDIUM" }]));

        let code = error_code(&schema, CREATE_COMPANY, json!({ "input": { "name": "TechCorp" } })).await;
        assert_eq!(code, "CONFLICT");
    }

    #[tokio::test]
    async fn test_application_defaults_and_relations() {
        let schema = build_schema(test_pool().await);
        let company_id = seed_company(&schema, "MegaCorp").await;

        let app = run(
            &schema,
            CREATE_APPLICATION,
            json!({ "input": {
                "companyId": company_id,
                "jobTitle": "Staff Engineer",
                "postedDate": "2024-10-15"
            } }),
        )
        .await;
        let app = &app["createApplication"];
        assert_eq!(app["status"], "NOT_STARTED");
        assert_eq!(app["priority"], "MEDIUM");
        assert_eq!(app["preference"], "NEUTRAL");
        assert!(app["postedDate"].as_str().unwrap().starts_with("2024-10-15T00:00:00"));

        let contact = run(
            &schema,
            CREATE_CONTACT,
            json!({ "input": { "companyId": company_id, "name": "Jane Smith" } }),
        )
        .await;
        assert_eq!(contact["createContact"]["contactStatus"], "TO_REACH_OUT");
        let contact_id = contact["createContact"]["id"].as_str().unwrap();
        let app_id = app["id"].as_str().unwrap();

        for _ in 0..2 {
            run(
                &schema,
                LINK,
                json!({ "applicationId": app_id, "contactId": contact_id, "role": "Recruiter" }),
            )
            .await;
        }

        let data = run(
            &schema,
            r#"query($id: ID!) {
                application(id: $id) {
                    company { name }
                    contacts { name }
                    contactLinks { role contact { name } }
                }
            }"#,
            json!({ "id": app_id }),
        )
        .await;
        assert_eq!(data["application"]["company"]["name"], "MegaCorp");
        assert_eq!(data["application"]["contactLinks"].as_array().unwrap().len(), 2);
        assert_eq!(data["application"]["contacts"][0]["name"], "Jane Smith");

        let data = run(
            &schema,
            r#"query($id: ID!) {
                contact(id: $id) {
                    company { name }
                    applicationLinks { application { jobTitle company { name } } }
                }
            }"#,
            json!({ "id": contact_id }),
        )
        .await;
        assert_eq!(
            data["contact"]["applicationLinks"][0]["application"]["company"]["name"],
            "MegaCorp"
        );
    }

    #[tokio::test]
    async fn test_update_distinguishes_null_from_absent() {
        let schema = build_schema(test_pool().await);
        let company_id = seed_company(&schema, "TechCorp").await;
        let app = run(
            &schema,
            CREATE_APPLICATION,
            json!({ "input": {
                "companyId": company_id,
                "jobTitle": "SWE",
                "postedDate": "2024-10-15"
            } }),
        )
        .await;
        let app_id = app["createApplication"]["id"].as_str().unwrap();

        let update = r#"
            mutation($id: ID!, $input: UpdateApplicationInput!) {
                updateApplication(id: $id, input: $input) { status postedDate jobTitle }
            }"#;

        let data = run(
            &schema,
            update,
            json!({ "id": app_id, "input": { "status": "PHONE_SCREEN" } }),
        )
        .await;
        assert_eq!(data["updateApplication"]["status"], "PHONE_SCREEN");
        assert!(data["updateApplication"]["postedDate"].is_string());

        let data = run(
            &schema,
            update,
            json!({ "id": app_id, "input": { "postedDate": null } }),
        )
        .await;
        assert!(data["updateApplication"]["postedDate"].is_null());
        assert_eq!(data["updateApplication"]["status"], "PHONE_SCREEN");

        let code = error_code(&schema, update, json!({ "id": app_id, "input": { "jobTitle": null } })).await;
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let schema = build_schema(test_pool().await);

        let data = run(&schema, r#"{ company(id: "nope") { id } }"#, json!({})).await;
        assert!(data["company"].is_null());

        let code = error_code(&schema, r#"mutation { deleteContact(id: "nope") { id } }"#, json!({})).await;
        assert_eq!(code, "NOT_FOUND");

        let code = error_code(
            &schema,
            r#"mutation { updateApplicationContact(id: "nope", role: "x") { id } }"#,
            json!({}),
        )
        .await;
        assert_eq!(code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_company_with_dependents_is_rejected() {
        let schema = build_schema(test_pool().await);
        let company_id = seed_company(&schema, "TechCorp").await;
        run(
            &schema,
            CREATE_CONTACT,
            json!({ "input": { "companyId": company_id, "name": "John Doe" } }),
        )
        .await;

        let code = error_code(
            &schema,
            r#"mutation($id: ID!) { deleteCompany(id: $id) { id } }"#,
            json!({ "id": company_id }),
        )
        .await;
        assert_eq!(code, "CONSTRAINT_VIOLATION");
    }
}
