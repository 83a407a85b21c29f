pub const NO_UMBRELLA_MESSAGE: &str = "You won't need an umbrella in the next days.";

const UMBRELLA_PREFIX: &str = "You should take an umbrella in these days: ";

/// Renders umbrella days as a sentence: `"..: Monday, Tuesday and Wednesday."`.
pub fn format_message<S: AsRef<str>>(days: &[S]) -> String {
    let (last, rest) = match days.split_last() {
        Some(split) => split,
        None => return NO_UMBRELLA_MESSAGE.to_string(),
    };

    let mut msg = String::from(UMBRELLA_PREFIX);
    if !rest.is_empty() {
        let joined: Vec<&str> = rest.iter().map(AsRef::as_ref).collect();
        msg.push_str(&joined.join(", "));
        msg.push_str(" and ");
    }
    msg.push_str(last.as_ref());
    msg.push('.');
    msg
}
