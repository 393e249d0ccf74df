//! Domain definitions.

pub mod address;
pub mod agent;
pub mod client;
pub mod contract;
pub mod geo;
pub mod image;
pub mod invoice;
pub mod payment;
pub mod person;
pub mod property;
pub mod user;

pub use self::{
    address::Address, agent::Agent, client::Client, contract::Contract,
    image::Image, invoice::Invoice, payment::Payment, property::Property,
    user::User,
};
