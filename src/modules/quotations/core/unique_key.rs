/// Number of leading project name tokens that take part in the key.
pub const PROJECT_NAME_TOKENS: usize = 5;

/// Derives the synthetic key that correlates a quotation with its note.
///
/// The project name is split on every single space (consecutive spaces yield
/// empty tokens, which are kept), truncated to its first five tokens and
/// joined with the requester. The result is trimmed. Missing inputs count as
/// empty strings.
///
/// Two project names that share their first five tokens and have the same
/// requester collapse onto one key. Notes are shared between such rows.
pub fn generate_unique_id(project_name: Option<&str>, requester: Option<&str>) -> String {
    let project_name = project_name.unwrap_or_default();
    let requester = requester.unwrap_or_default();

    let truncated = project_name
        .split(' ')
        .take(PROJECT_NAME_TOKENS)
        .collect::<Vec<_>>()
        .join(" ");

    format!("{truncated} {requester}").trim().to_string()
}
