/*!
 * Canned reply generation for customer queries.
 *
 * Replies come from a fixed keyword rule set evaluated against the English
 * text of the query. Rules are checked in order and the first match wins;
 * queries that match nothing get an acknowledgement echoing the message back.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest prefix of the query echoed back in the fallback reply, in characters
const ECHO_LIMIT: usize = 150;

/// Reply for queries that mention pricing
pub const PRICING_REPLY: &str = "Thanks for asking about pricing! How can I help further?";

/// Reply for queries that mention refunds or returns
pub const REFUND_REPLY: &str = "Sorry to hear that. Please share your order number.";

/// Pricing keywords, matched as case-insensitive substrings
static PRICING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)price|cost").unwrap()
});

/// Refund and return keywords, matched as case-insensitive substrings
static REFUND_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)refund|return").unwrap()
});

/// Produce the canned English reply for a query already in English.
///
/// Pricing rules are evaluated before refund rules, so a query mentioning
/// both gets the pricing reply.
pub fn reply(english_text: &str) -> String {
    if PRICING_REGEX.is_match(english_text) {
        return PRICING_REPLY.to_string();
    }

    if REFUND_REGEX.is_match(english_text) {
        return REFUND_REPLY.to_string();
    }

    // Truncate on character boundaries, not bytes
    let snippet: String = english_text.chars().take(ECHO_LIMIT).collect();
    format!("We received your message: '{}'. Thanks for contacting us!", snippet)
}
