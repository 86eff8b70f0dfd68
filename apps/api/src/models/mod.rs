pub mod application;
pub mod company;
pub mod contact;
pub mod enums;
pub mod link;

pub use application::Application;
pub use company::Company;
pub use contact::Contact;
pub use link::ApplicationContact;
