//! Canonical filter names.
//!
//! Pipe expressions refer to filters by a lowercase, underscore-separated
//! name. Definitions may be registered under the declared name of the
//! callable they wrap (`MoneyWithUnderscore`, `addSub`), and [`canonical`]
//! normalizes that to the form template authors write
//! (`money_with_underscore`, `add_sub`).

/// Normalizes a declared callable name to its canonical pipe-syntax form.
///
/// Case-transition boundaries become underscores and the result is entirely
/// lowercase. Names that are already snake_case pass through unchanged, so
/// the function is idempotent.
///
/// # Example
///
/// ```
/// use spigot_filters::canonical;
///
/// assert_eq!(canonical("Money"), "money");
/// assert_eq!(canonical("MoneyWithUnderscore"), "money_with_underscore");
/// assert_eq!(canonical("HTMLBody"), "html_body");
/// assert_eq!(canonical("strip_html"), "strip_html");
/// ```
pub fn canonical(declared: &str) -> String {
    let chars: Vec<char> = declared.chars().collect();
    let mut out = String::with_capacity(declared.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let after_lower = i > 0 && {
                let prev = chars[i - 1];
                prev.is_lowercase() || prev.is_ascii_digit()
            };
            // An uppercase run ends where the next char is lowercase: the
            // last capital of the run starts a new word (HTMLBody -> html_body).
            let run_boundary = i > 0
                && chars[i - 1].is_uppercase()
                && chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if after_lower || run_boundary {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }

    out
}
