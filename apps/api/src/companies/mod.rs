pub mod inputs;
pub mod resolvers;
pub mod store;
