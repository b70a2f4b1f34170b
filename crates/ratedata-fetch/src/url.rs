//! Rate data archive URL construction.

use ratedata_types::BundleKey;

/// Base URL of the rate data archive.
pub const BASE_URL: &str = "http://ratedata.gaincapital.com";

/// Builds the URL of one weekly bundle.
///
/// URL format: `{BASE_URL}/{YEAR}/{MM} {MonthName}/{SYMBOL}_Week{N}.zip`
///
/// The month directory contains a space, which is percent-encoded when the
/// request is sent.
///
/// # Example
///
/// ```
/// use ratedata_fetch::url::bundle_url;
/// use ratedata_types::BundleKey;
///
/// let key = BundleKey::new("EUR_USD".parse().unwrap(), 2015, 3, 2);
/// assert_eq!(
///     bundle_url(&key),
///     "http://ratedata.gaincapital.com/2015/03 March/EUR_USD_Week2.zip"
/// );
/// ```
#[must_use]
pub fn bundle_url(key: &BundleKey) -> String {
    bundle_url_with_base(BASE_URL, key)
}

/// Builds a bundle URL against another base, e.g. a mirror.
#[must_use]
pub fn bundle_url_with_base(base: &str, key: &BundleKey) -> String {
    format!(
        "{}/{}/{:02} {}/{}_Week{}.zip",
        base.trim_end_matches('/'),
        key.year,
        key.month,
        key.month_name(),
        key.symbol,
        key.week
    )
}
