use sqlparser::tokenizer::Token;

/// First `KEY='value'` assignment in a `WITH` property list whose value is a
/// non-empty single-quoted string without whitespace.
fn string_property<'a>(clause: &'a [Token], key: &str) -> Option<&'a str> {
    clause.windows(3).find_map(|triple| match triple {
        [Token::Word(k), Token::Eq, Token::SingleQuotedString(value)]
            if k.quote_style.is_none()
                && k.value.eq_ignore_ascii_case(key)
                && !value.is_empty()
                && !value.contains(char::is_whitespace) =>
        {
            Some(value.as_str())
        }
        _ => None,
    })
}

/// `KAFKA_TOPIC='...'` from a `WITH` property list.
pub(crate) fn kafka_topic(clause: &[Token]) -> Option<&str> {
    string_property(clause, "KAFKA_TOPIC")
}

/// `QUERY_ID='...'` from a `WITH` property list.
pub(crate) fn query_id(clause: &[Token]) -> Option<&str> {
    string_property(clause, "QUERY_ID")
}
