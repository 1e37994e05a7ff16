//! Path template helpers.
//!
//! Works on OpenAPI path templates that use `{param}` placeholders.

/// Turns a path template into a `format!` string.
///
/// Each placeholder becomes `{}`; any other brace is escaped so the result is
/// always a valid format string. The returned names line up with the `{}`
/// slots.
///
/// ## Examples
///
/// ```
/// use lawgen::parser::format_template;
///
/// let (format, params) = format_template("/law_data/{law_id}");
/// assert_eq!(format, "/law_data/{}");
/// assert_eq!(params, vec!["law_id"]);
///
/// let (format, params) = format_template("/odd/{}/x}");
/// assert_eq!(format, "/odd/{{}}/x}}");
/// assert!(params.is_empty());
/// ```
pub fn format_template(path: &str) -> (String, Vec<&str>) {
    let mut format = String::with_capacity(path.len());
    let mut params = Vec::new();
    let mut rest = path;

    while let Some(open) = rest.find(['{', '}']) {
        let (literal, tail) = rest.split_at(open);
        format.push_str(literal);

        if tail.starts_with('}') {
            format.push_str("}}");
            rest = &tail[1..];
            continue;
        }

        match tail.find('}') {
            Some(close) if close > 1 && !tail[1..close].contains('{') => {
                format.push_str("{}");
                params.push(&tail[1..close]);
                rest = &tail[close + 1..];
            }
            _ => {
                format.push_str("{{");
                rest = &tail[1..];
            }
        }
    }
    format.push_str(rest);

    (format, params)
}
