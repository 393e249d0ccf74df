//! [`Property`] read model definition.
//!
//! [`Property`]: crate::domain::Property

pub mod list {
    //! [`Property`]s list definitions.
    //!
    //! [`Property`]: crate::domain::Property

    use common::pagination;

    use crate::domain::property;
    #[cfg(doc)]
    use crate::domain::Property;

    /// Selector of a [`Property`]s list.
    pub type Selector = pagination::Selector<Filter>;

    /// Filter of a [`Property`]s list.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`property::Status`] to filter by.
        pub status: Option<property::Status>,

        /// [`property::Operation`] to filter by.
        pub operation: Option<property::Operation>,
    }
}
