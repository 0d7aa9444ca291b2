use crate::error::CoreError;

/// An offset/limit window over the store's default (insertion) order.
///
/// No cursor stability is promised: concurrent inserts or deletes may shift
/// records between pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    skip: i64,
    limit: i64,
}

impl Page {
    /// Number of records returned when the caller does not ask for a limit.
    pub const DEFAULT_LIMIT: i64 = 100;
    /// Largest accepted `limit`.
    pub const MAX_LIMIT: i64 = 1000;

    /// Build a page, rejecting out-of-range parameters.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPage`] if `skip` is negative or `limit` is
    /// outside `[1, 1000]`.
    pub fn new(skip: i64, limit: i64) -> Result<Self, CoreError> {
        if skip < 0 {
            return Err(CoreError::InvalidPage {
                parameter: "skip",
                value: skip,
                reason: "must be greater than or equal to 0",
            });
        }
        if !(1..=Self::MAX_LIMIT).contains(&limit) {
            return Err(CoreError::InvalidPage {
                parameter: "limit",
                value: limit,
                reason: "must be between 1 and 1000",
            });
        }
        Ok(Self { skip, limit })
    }

    #[must_use]
    pub const fn skip(self) -> i64 {
        self.skip
    }

    #[must_use]
    pub const fn limit(self) -> i64 {
        self.limit
    }

    /// Apply the window to an already ordered iterator.
    pub fn window<I: Iterator>(self, items: I) -> impl Iterator<Item = I::Item> {
        let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.skip(skip).take(limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: Self::DEFAULT_LIMIT }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_match_documented_values() {
        let page = Page::default();
        assert_eq!(page.skip(), 0);
        assert_eq!(page.limit(), 100);
    }

    #[test]
    fn page_rejects_out_of_range_parameters() {
        assert!(matches!(
            Page::new(-1, 10),
            Err(CoreError::InvalidPage { parameter: "skip", .. })
        ));
        assert!(matches!(
            Page::new(0, 0),
            Err(CoreError::InvalidPage { parameter: "limit", .. })
        ));
        assert!(matches!(
            Page::new(0, 1001),
            Err(CoreError::InvalidPage { parameter: "limit", .. })
        ));
        assert!(Page::new(0, 1).is_ok());
        assert!(Page::new(5, 1000).is_ok());
    }

    proptest::proptest! {
        #[test]
        fn proptest_window_respects_skip_and_limit(
            len in 0usize..200,
            skip in 0i64..250,
            limit in 1i64..=1000,
        ) {
            let page = match Page::new(skip, limit) {
                Ok(p) => p,
                Err(e) => panic!("valid page rejected: {e}"),
            };
            let got: Vec<usize> = page.window(0..len).collect();
            proptest::prop_assert!(got.len() <= usize::try_from(limit).unwrap_or(usize::MAX));
            if let Some(first) = got.first() {
                proptest::prop_assert_eq!(*first as i64, skip, "first record must follow the skipped ones");
            }
        }
    }
}
