//! [`Invoice`] read model definition.
//!
//! [`Invoice`]: crate::domain::Invoice

pub mod list {
    //! [`Invoice`]s list definitions.
    //!
    //! [`Invoice`]: crate::domain::Invoice

    use common::pagination;

    use crate::domain::client;
    #[cfg(doc)]
    use crate::domain::{Client, Invoice};

    /// Selector of an [`Invoice`]s list.
    pub type Selector = pagination::Selector<Filter>;

    /// Filter of an [`Invoice`]s list.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// ID of the billed [`Client`] to filter by.
        pub client_id: Option<client::Id>,
    }
}
