/// Escapes text for Telegram's HTML parse mode.
///
/// Admin-authored titles are sent as-is (they may carry markup on purpose);
/// anything echoed back from user input goes through this first.
pub fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }

    result
}

/// `<code>`-wrapped, escaped text
pub fn code(text: &str) -> String {
    format!("<code>{}</code>", escape(text))
}
