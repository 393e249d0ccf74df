//! [`Contract`] read model definition.
//!
//! [`Contract`]: crate::domain::Contract

use common::Date;

use crate::domain::contract::WindowDays;

/// Selector of [`Contract`]s due a rent-increase notification.
///
/// Selects [`contract::Status::Active`] contracts whose next-increase date
/// lies within `[today, today + window]` and which have not been notified
/// since the day before their next-increase date.
///
/// [`Contract`]: crate::domain::Contract
/// [`contract::Status::Active`]: crate::domain::contract::Status::Active
#[derive(Clone, Copy, Debug)]
pub struct PendingIncreases {
    /// Reference [`Date`] the window is anchored at.
    pub today: Date,

    /// Look-ahead [`WindowDays`].
    pub window: WindowDays,
}

pub mod list {
    //! [`Contract`]s list definitions.
    //!
    //! [`Contract`]: crate::domain::Contract

    use common::pagination;

    use crate::domain::{client, contract, property};
    #[cfg(doc)]
    use crate::domain::Contract;

    /// Selector of a [`Contract`]s list.
    pub type Selector = pagination::Selector<Filter>;

    /// Filter of a [`Contract`]s list.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// ID of the rented [`Property`] to filter by.
        ///
        /// [`Property`]: crate::domain::Property
        pub property_id: Option<property::Id>,

        /// ID of the tenant [`Client`] to filter by.
        ///
        /// [`Client`]: crate::domain::Client
        pub tenant_id: Option<client::Id>,

        /// [`contract::Status`] to filter by.
        pub status: Option<contract::Status>,
    }
}
