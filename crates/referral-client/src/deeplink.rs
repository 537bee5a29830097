//! Pre-filled messaging link sent to a referred contact.

use url::Url;

/// Promotional text carrying the referrer's code.
pub fn referral_message(site_url: &str, referral_code: &str) -> String {
    format!(
        "Hi User,\n\n\
         You have been referred to {site_url}\n\n\
         BeepKart is a trusted place to buy and sell used bikes.\n\n\
         Use this referral code to transact and get Rs 500 \n\n\
         Referral code: {referral_code}"
    )
}

/// `<messaging_url>?phone=<contact>&text=<message>`, query-encoded.
pub fn referral_link(
    messaging_url: &str,
    contact: &str,
    site_url: &str,
    referral_code: &str,
) -> Result<Url, url::ParseError> {
    let text = referral_message(site_url, referral_code);
    Url::parse_with_params(messaging_url, &[("phone", contact), ("text", text.as_str())])
}
