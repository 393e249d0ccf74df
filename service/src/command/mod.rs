//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_address;
pub mod create_agent;
pub mod create_client;
pub mod create_invoice;
pub mod create_property;
pub mod create_rent_contract;
pub mod create_user;
pub mod create_user_session;
pub mod delete_image;
pub mod register_payment;
pub mod set_cover_image;
pub mod store_image;
pub mod update_agent;
pub mod update_client;
pub mod update_invoice;
pub mod update_property;
pub mod update_rent_contract;
pub mod update_user;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    create_address::CreateAddress, create_agent::CreateAgent,
    create_client::CreateClient, create_invoice::CreateInvoice,
    create_property::CreateProperty,
    create_rent_contract::CreateRentContract, create_user::CreateUser,
    create_user_session::CreateUserSession, delete_image::DeleteImage,
    register_payment::RegisterPayment, set_cover_image::SetCoverImage,
    store_image::StoreImage, update_agent::UpdateAgent,
    update_client::UpdateClient, update_invoice::UpdateInvoice,
    update_property::UpdateProperty,
    update_rent_contract::UpdateRentContract, update_user::UpdateUser,
};
