pub mod resolvers;
pub mod store;
