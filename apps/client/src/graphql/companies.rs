pub const COMPANIES_QUERY: &str = r#"
query GetCompanies($filter: CompanyFilterInput) {
  companies(filter: $filter) {
    id
    name
    size
    type
    comments
    contacts {
      id
      name
      title
      email
      phone
      linkedinProfile
      seniority
      contactStatus
    }
  }
}
"#;

pub const COMPANY_QUERY: &str = r#"
query GetCompany($id: ID!) {
  company(id: $id) {
    id
    name
    size
    type
    comments
    contacts {
      id
      name
      title
      email
      phone
      linkedinProfile
      seniority
      contactStatus
    }
    applications {
      id
      jobTitle
      status
    }
  }
}
"#;

pub const CREATE_COMPANY: &str = r#"
mutation CreateCompany($input: CreateCompanyInput!) {
  createCompany(input: $input) {
    id
    name
    size
    type
    comments
  }
}
"#;

pub const UPDATE_COMPANY: &str = r#"
mutation UpdateCompany($id: ID!, $input: UpdateCompanyInput!) {
  updateCompany(id: $id, input: $input) {
    id
    name
    size
    type
    comments
  }
}
"#;

pub const DELETE_COMPANY: &str = r#"
mutation DeleteCompany($id: ID!) {
  deleteCompany(id: $id) {
    id
  }
}
"#;
