pub const APPLICATIONS_QUERY: &str = r#"
query GetApplications($filter: ApplicationFilterInput) {
  applications(filter: $filter) {
    id
    jobTitle
    linkedinUrl
    companyJobUrl
    priority
    salaryMin
    salaryMax
    status
    location
    remoteType
    preference
    requirements
    postedDate
    postingEndDate
    appliedDate
    offerDeadline
    comments
    company {
      id
      name
    }
    contactLinks {
      id
      role
      contact {
        id
        name
        email
        phone
        title
        linkedinProfile
        contactStatus
        referredBy
        notes
      }
    }
  }
}
"#;

pub const APPLICATION_QUERY: &str = r#"
query GetApplication($id: ID!) {
  application(id: $id) {
    id
    jobTitle
    linkedinUrl
    companyJobUrl
    priority
    salaryMin
    salaryMax
    status
    location
    remoteType
    preference
    requirements
    postedDate
    postingEndDate
    appliedDate
    offerDeadline
    comments
    company {
      id
      name
    }
    contactLinks {
      id
      role
      contact {
        id
        name
        email
        phone
        title
        linkedinProfile
        contactStatus
        referredBy
        notes
      }
    }
  }
}
"#;

pub const CREATE_APPLICATION: &str = r#"
mutation CreateApplication($input: CreateApplicationInput!) {
  createApplication(input: $input) {
    id
    jobTitle
    status
  }
}
"#;

pub const UPDATE_APPLICATION: &str = r#"
mutation UpdateApplication($id: ID!, $input: UpdateApplicationInput!) {
  updateApplication(id: $id, input: $input) {
    id
    jobTitle
    status
  }
}
"#;

pub const DELETE_APPLICATION: &str = r#"
mutation DeleteApplication($id: ID!) {
  deleteApplication(id: $id) {
    id
  }
}
"#;

pub const LINK_CONTACT_TO_APPLICATION: &str = r#"
mutation LinkContactToApplication($applicationId: ID!, $contactId: ID!, $role: String) {
  linkContactToApplication(applicationId: $applicationId, contactId: $contactId, role: $role) {
    id
    role
    contact {
      id
      name
      title
      email
      phone
      linkedinProfile
      contactStatus
    }
    application {
      id
      jobTitle
    }
  }
}
"#;

pub const UNLINK_CONTACT_FROM_APPLICATION: &str = r#"
mutation UnlinkContactFromApplication($applicationContactId: ID!) {
  unlinkContactFromApplication(applicationContactId: $applicationContactId) {
    id
  }
}
"#;

pub const UPDATE_APPLICATION_CONTACT: &str = r#"
mutation UpdateApplicationContact($id: ID!, $role: String) {
  updateApplicationContact(id: $id, role: $role) {
    id
    role
    contact {
      id
      name
      title
      email
      phone
      linkedinProfile
      contactStatus
    }
  }
}
"#;
