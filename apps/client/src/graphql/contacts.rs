pub const CONTACTS_QUERY: &str = r#"
query GetContacts($filter: ContactFilterInput) {
  contacts(filter: $filter) {
    id
    name
    title
    email
    phone
    linkedinProfile
    seniority
    contactStatus
    referredBy
    notes
    company {
      id
      name
    }
  }
}
"#;

pub const CONTACT_QUERY: &str = r#"
query GetContact($id: ID!) {
  contact(id: $id) {
    id
    name
    title
    email
    phone
    linkedinProfile
    seniority
    contactStatus
    referredBy
    notes
    company {
      id
      name
    }
  }
}
"#;

pub const CREATE_CONTACT: &str = r#"
mutation CreateContact($input: CreateContactInput!) {
  createContact(input: $input) {
    id
    name
    title
    email
    phone
    linkedinProfile
    seniority
    contactStatus
    referredBy
    notes
  }
}
"#;

pub const UPDATE_CONTACT: &str = r#"
mutation UpdateContact($id: ID!, $input: UpdateContactInput!) {
  updateContact(id: $id, input: $input) {
    id
    name
    title
    email
    phone
    linkedinProfile
    seniority
    contactStatus
    referredBy
    notes
  }
}
"#;

pub const DELETE_CONTACT: &str = r#"
mutation DeleteContact($id: ID!) {
  deleteContact(id: $id) {
    id
  }
}
"#;
