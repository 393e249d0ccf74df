//! Abstractions for offset pagination.

/// Arguments of an offset pagination: the number of leading items to skip
/// and the maximum number of items to return.
#[derive(Clone, Copy, Debug)]
pub struct Arguments {
    /// Number of leading items to skip.
    skip: u64,

    /// Maximum number of items to return.
    limit: u64,
}

impl Arguments {
    /// Default [`limit`] applied when the caller provides none.
    ///
    /// [`limit`]: Arguments::limit
    pub const DEFAULT_LIMIT: u64 = 100;

    /// Maximum allowed [`limit`].
    ///
    /// [`limit`]: Arguments::limit
    pub const MAX_LIMIT: u64 = 200;

    /// Creates a new [`Arguments`] from the provided optional parameters.
    ///
    /// [`None`] is returned if the provided `limit` is zero or exceeds
    /// [`MAX_LIMIT`].
    ///
    /// [`MAX_LIMIT`]: Arguments::MAX_LIMIT
    #[must_use]
    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Option<Self> {
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);
        ((1..=Self::MAX_LIMIT).contains(&limit)).then_some(Self {
            skip: skip.unwrap_or(0),
            limit,
        })
    }

    /// Returns the number of leading items this [`Arguments`] skips.
    #[must_use]
    pub fn skip(&self) -> u64 {
        self.skip
    }

    /// Returns the maximum number of items this [`Arguments`] returns.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns the `OFFSET` SQL parameter of this [`Arguments`].
    #[must_use]
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// Returns the `LIMIT` SQL parameter of this [`Arguments`].
    #[expect(clippy::missing_panics_doc, reason = "limit is within 1..=200")]
    #[must_use]
    pub fn sql_limit(&self) -> i64 {
        i64::try_from(self.limit).expect("within 1..=200")
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Pagination selector.
#[derive(Clone, Copy, Debug)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

#[cfg(test)]
mod spec {
    use super::Arguments;

    #[test]
    fn defaults() {
        let args = Arguments::new(None, None).unwrap();
        assert_eq!(args.skip(), 0);
        assert_eq!(args.limit(), Arguments::DEFAULT_LIMIT);
    }

    #[test]
    fn accepts_limit_within_bounds() {
        assert!(Arguments::new(Some(10), Some(1)).is_some());
        assert!(Arguments::new(None, Some(200)).is_some());
    }

    #[test]
    fn rejects_limit_out_of_bounds() {
        assert!(Arguments::new(None, Some(0)).is_none());
        assert!(Arguments::new(None, Some(201)).is_none());
    }
}
