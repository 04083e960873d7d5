//! Splits a raw frame into routing fields and payload.

/// Splits `raw` into its routing fields.
///
/// Every comma before the first `{` separates a field. Everything after
/// the last of those commas is returned verbatim as the final field, so a
/// JSON payload full of commas stays in one piece. With `k` commas before
/// the brace the result has exactly `k + 1` fields.
///
/// A frame with no `{` at all has no payload and no pre-brace commas, so
/// it comes back as a single field.
///
/// ```rust
/// use gameroom_protocol::split_routing;
///
/// let fields = split_routing(r#"player,*,{"a":1,"b":2}"#);
/// assert_eq!(fields, vec!["player", "*", r#"{"a":1,"b":2}"#]);
/// ```
pub fn split_routing(raw: &str) -> Vec<&str> {
    let Some(brace) = raw.find('{') else {
        return vec![raw];
    };

    let mut fields = Vec::new();
    let mut start = 0;
    for (comma, _) in raw[..brace].match_indices(',') {
        fields.push(&raw[start..comma]);
        start = comma + 1;
    }
    fields.push(&raw[start..]);
    fields
}
