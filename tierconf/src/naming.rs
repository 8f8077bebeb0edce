//! External key derivation shared by every configuration source.
//!
//! File keys, environment variable suffixes and flag names are all derived
//! from the same external name, so a field is addressed consistently no
//! matter where its value comes from.

/// Converts a `PascalCase` identifier into `snake_case`.
///
/// Words are split after a lowercase letter followed by an uppercase one, and
/// before the last letter of an uppercase run that is followed by a lowercase
/// letter, so acronyms stay together. Underscores are word boundaries and are
/// dropped. Input that is already `snake_case` is returned unchanged.
///
/// # Examples
///
/// ```
/// use tierconf::naming::camel_to_snake;
///
/// assert_eq!(camel_to_snake("AWSAccessKey"), "aws_access_key");
/// assert_eq!(camel_to_snake("Route53Region"), "route53_region");
/// assert_eq!(camel_to_snake("snake_case"), "snake_case");
/// ```
#[must_use]
pub fn camel_to_snake(camel: &str) -> String {
    let chars: Vec<char> = camel.chars().collect();
    let mut words: Vec<String> = Vec::with_capacity(4);
    let mut word = String::new();

    for (index, &ch) in chars.iter().enumerate() {
        let next = chars.get(index + 1).copied();
        if word.is_empty() {
            if ch != '_' {
                word.push(ch);
            }
        } else if ch == '_' {
            words.push(std::mem::take(&mut word));
        } else if ch.is_lowercase() && next.is_some_and(char::is_uppercase) {
            word.push(ch);
            words.push(std::mem::take(&mut word));
        } else if ch.is_uppercase() && next.is_some_and(char::is_lowercase) {
            words.push(std::mem::take(&mut word));
            word.push(ch);
        } else {
            word.push(ch);
        }
    }
    if !word.is_empty() {
        words.push(word);
    }

    words.join("_").to_lowercase()
}

/// Resolves the external name of a field.
///
/// An explicit name wins outright; otherwise the identifier is converted with
/// [`camel_to_snake`] after stripping any raw-identifier prefix.
///
/// ```
/// use tierconf::naming::external_name;
///
/// assert_eq!(external_name("OpenSearch", None), "open_search");
/// assert_eq!(external_name("OpenSearch", Some("opensearch")), "opensearch");
/// assert_eq!(external_name("r#type", None), "type");
/// ```
#[must_use]
pub fn external_name(ident: &str, explicit: Option<&str>) -> String {
    explicit.map_or_else(
        || camel_to_snake(ident.strip_prefix("r#").unwrap_or(ident)),
        str::to_owned,
    )
}

/// Returns the command-line flag name for an external name.
#[must_use]
pub fn flag_name(name: &str) -> String {
    name.replace('_', "-")
}

/// Returns the environment variable probed for an external name.
///
/// The namespace and name are joined with `_` and upper-cased. An empty
/// namespace yields the bare upper-cased name.
#[must_use]
pub fn env_var_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_uppercase()
    } else {
        format!("{namespace}_{name}").to_uppercase()
    }
}
