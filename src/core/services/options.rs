//! Positional-argument scanner
//!
//! Sessions accept ad hoc flags after `--` without a full grammar. A flag's
//! value is simply the token that follows it.

/// Find the value of the first flag in `posargs` matching any of `names`
///
/// Scans left to right. On the first match returns the next token, or
/// `when_empty` when the flag is the last token. Returns `None` when no name
/// occurs at all.
#[must_use]
pub fn find_option(posargs: &[String], names: &[&str], when_empty: Option<&str>) -> Option<String> {
    let index = posargs.iter().position(|arg| names.contains(&arg.as_str()))?;
    posargs
        .get(index + 1)
        .cloned()
        .or_else(|| when_empty.map(str::to_string))
}
