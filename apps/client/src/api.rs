//! GraphQL-over-HTTP client for the tracker API.
//!
//! One `TrackerClient` is built in `main` and passed to every command.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::ClientError;
use crate::filters::{ApplicationFilter, CompanyFilter, ContactFilter};
use crate::graphql::{applications, companies, contacts};
use crate::models::{
    Application, ApplicationRef, Company, Contact, ContactLink, CreateApplicationInput,
    CreateCompanyInput, CreateContactInput, Deleted, UpdateApplicationInput, UpdateCompanyInput,
    UpdateContactInput,
};

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQLError>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
    #[serde(default)]
    extensions: Option<Value>,
}

impl GraphQLError {
    fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.get("code")?.as_str()
    }
}

/// Pulls `data.<field>` out of a response body, turning GraphQL errors into
/// `ClientError::Api` with the first error's code.
fn decode_field<T: DeserializeOwned>(body: &str, field: &str) -> Result<T, ClientError> {
    let response: GraphQLResponse = serde_json::from_str(body)?;

    if let Some(first) = response.errors.first() {
        let message = response
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ClientError::Api {
            code: first.code().unwrap_or("UNKNOWN").to_string(),
            message,
        });
    }

    let value = response
        .data
        .and_then(|mut data| data.get_mut(field).map(Value::take))
        .ok_or_else(|| ClientError::EmptyData(field.to_string()))?;

    Ok(serde_json::from_value(value)?)
}

#[derive(Clone)]
pub struct TrackerClient {
    http: Client,
    endpoint: String,
}

impl TrackerClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            endpoint: endpoint.into(),
        })
    }

    /// Sends one document and decodes the named top-level field.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
        field: &str,
    ) -> Result<T, ClientError> {
        debug!("POST {} ({field})", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match decode_field(&body, field) {
            Err(ClientError::Json(_)) if !status.is_success() => Err(ClientError::Api {
                code: format!("HTTP_{}", status.as_u16()),
                message: body,
            }),
            result => result,
        }
    }

    pub async fn companies(&self, filter: &CompanyFilter) -> Result<Vec<Company>, ClientError> {
        self.execute(companies::COMPANIES_QUERY, json!({ "filter": filter }), "companies")
            .await
    }

    pub async fn company(&self, id: &str) -> Result<Option<Company>, ClientError> {
        self.execute(companies::COMPANY_QUERY, json!({ "id": id }), "company")
            .await
    }

    pub async fn create_company(&self, input: &CreateCompanyInput) -> Result<Company, ClientError> {
        self.execute(companies::CREATE_COMPANY, json!({ "input": input }), "createCompany")
            .await
    }

    pub async fn update_company(
        &self,
        id: &str,
        input: &UpdateCompanyInput,
    ) -> Result<Company, ClientError> {
        self.execute(
            companies::UPDATE_COMPANY,
            json!({ "id": id, "input": input }),
            "updateCompany",
        )
        .await
    }

    pub async fn delete_company(&self, id: &str) -> Result<Deleted, ClientError> {
        self.execute(companies::DELETE_COMPANY, json!({ "id": id }), "deleteCompany")
            .await
    }

    pub async fn contacts(&self, filter: &ContactFilter) -> Result<Vec<Contact>, ClientError> {
        self.execute(contacts::CONTACTS_QUERY, json!({ "filter": filter }), "contacts")
            .await
    }

    pub async fn contact(&self, id: &str) -> Result<Option<Contact>, ClientError> {
        self.execute(contacts::CONTACT_QUERY, json!({ "id": id }), "contact")
            .await
    }

    pub async fn create_contact(&self, input: &CreateContactInput) -> Result<Contact, ClientError> {
        self.execute(contacts::CREATE_CONTACT, json!({ "input": input }), "createContact")
            .await
    }

    pub async fn update_contact(
        &self,
        id: &str,
        input: &UpdateContactInput,
    ) -> Result<Contact, ClientError> {
        self.execute(
            contacts::UPDATE_CONTACT,
            json!({ "id": id, "input": input }),
            "updateContact",
        )
        .await
    }

    pub async fn delete_contact(&self, id: &str) -> Result<Deleted, ClientError> {
        self.execute(contacts::DELETE_CONTACT, json!({ "id": id }), "deleteContact")
            .await
    }

    pub async fn applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<Application>, ClientError> {
        self.execute(
            applications::APPLICATIONS_QUERY,
            json!({ "filter": filter }),
            "applications",
        )
        .await
    }

    pub async fn application(&self, id: &str) -> Result<Option<Application>, ClientError> {
        self.execute(applications::APPLICATION_QUERY, json!({ "id": id }), "application")
            .await
    }

    pub async fn create_application(
        &self,
        input: &CreateApplicationInput,
    ) -> Result<ApplicationRef, ClientError> {
        self.execute(
            applications::CREATE_APPLICATION,
            json!({ "input": input }),
            "createApplication",
        )
        .await
    }

    pub async fn update_application(
        &self,
        id: &str,
        input: &UpdateApplicationInput,
    ) -> Result<ApplicationRef, ClientError> {
        self.execute(
            applications::UPDATE_APPLICATION,
            json!({ "id": id, "input": input }),
            "updateApplication",
        )
        .await
    }

    pub async fn delete_application(&self, id: &str) -> Result<Deleted, ClientError> {
        self.execute(applications::DELETE_APPLICATION, json!({ "id": id }), "deleteApplication")
            .await
    }

    pub async fn link_contact(
        &self,
        application_id: &str,
        contact_id: &str,
        role: Option<&str>,
    ) -> Result<ContactLink, ClientError> {
        self.execute(
            applications::LINK_CONTACT_TO_APPLICATION,
            json!({ "applicationId": application_id, "contactId": contact_id, "role": role }),
            "linkContactToApplication",
        )
        .await
    }

    pub async fn unlink_contact(&self, link_id: &str) -> Result<Deleted, ClientError> {
        self.execute(
            applications::UNLINK_CONTACT_FROM_APPLICATION,
            json!({ "applicationContactId": link_id }),
            "unlinkContactFromApplication",
        )
        .await
    }

    /// `None` clears the role.
    pub async fn update_link_role(
        &self,
        link_id: &str,
        role: Option<&str>,
    ) -> Result<ContactLink, ClientError> {
        self.execute(
            applications::UPDATE_APPLICATION_CONTACT,
            json!({ "id": link_id, "role": role }),
            "updateApplicationContact",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_field_reads_data() {
        let body = r#"{"data":{"companies":[{"id":"c1","name":"TechCorp","size":"MEDIUM","type":"STARTUP","comments":null,"contacts":[]}]}}"#;
        let companies: Vec<Company> = decode_field(body, "companies").unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].name, "TechCorp");
    }

    #[test]
    fn test_null_lookup_is_none() {
        let body = r#"{"data":{"company":null}}"#;
        let company: Option<Company> = decode_field(body, "company").unwrap();
        assert!(company.is_none());
    }

    #[test]
    fn test_graphql_errors_carry_code() {
        let body = r#"{"data":null,"errors":[{"message":"Company nope not found","extensions":{"code":"NOT_FOUND"}}]}"#;
        match decode_field::<Deleted>(body, "deleteCompany").unwrap_err() {
            ClientError::Api { code, message } => {
                assert_eq!(code, "NOT_FOUND");
                assert_eq!(message, "Company nope not found");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_is_empty_data() {
        let err = decode_field::<Deleted>(r#"{"data":{}}"#, "deleteContact").unwrap_err();
        assert!(matches!(err, ClientError::EmptyData(field) if field == "deleteContact"));
    }
}
