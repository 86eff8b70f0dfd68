//! GraphQL documents sent by the client, one module per entity.

pub mod applications;
pub mod companies;
pub mod contacts;
