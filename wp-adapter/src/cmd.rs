//! WP-CLI command construction.
//!
//! A [`WpCommand`] is an ordered list of verb tokens (the subcommand path
//! plus positional arguments) and an ordered list of named options. Verb
//! order is caller-significant. Rendering produces a shell fragment that is
//! safe inside a POSIX single-quoted context: the only transformation that
//! matters for correctness is the `'` → `'\''` escape applied to every
//! scalar value.

use std::fmt::Display;

/// Value of one named option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Presence-only flag, rendered as `--name`.
    Flag,
    /// Valued option, rendered as `--name='<escaped>'`.
    Scalar(String),
    /// Omitted entirely from the rendered command.
    Omitted,
}

/// One WP-CLI invocation, built per call and discarded after execution.
#[derive(Debug, Clone, Default)]
pub struct WpCommand {
    verbs: Vec<String>,
    options: Vec<(String, OptionValue)>,
}

/// Escapes a value for embedding inside POSIX single quotes.
///
/// Every literal `'` becomes the four-byte sequence `'\''` (close quote,
/// escaped quote, reopen quote). For any input `v`, shell-unquoting the
/// rendered `'<escaped>'` fragment reproduces `v` exactly.
#[must_use]
pub fn escape_single_quotes(value: &str) -> String {
    value.replace('\'', "'\\''")
}

impl WpCommand {
    /// Starts a command from its subcommand path, e.g. `["post", "create"]`.
    #[must_use]
    pub fn new<I, S>(verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            verbs: verbs.into_iter().map(Into::into).collect(),
            options: Vec::new(),
        }
    }

    /// Appends a bare verb or positional argument token.
    #[must_use]
    pub fn arg(mut self, verb: impl Display) -> Self {
        self.verbs.push(verb.to_string());
        self
    }

    /// Appends a positional argument wrapped in escaped single quotes.
    #[must_use]
    pub fn quoted_arg(mut self, value: &str) -> Self {
        self.verbs.push(format!("'{}'", escape_single_quotes(value)));
        self
    }

    /// Appends a presence-only flag with the literal `name`.
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.options.push((name.into(), OptionValue::Flag));
        self
    }

    /// Appends `--name='<value>'` with the literal `name`.
    ///
    /// WP-CLI field names keep their underscores (`--post_title`), so typed
    /// call-sites use this and spell the name exactly.
    #[must_use]
    pub fn option(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.options
            .push((name.into(), OptionValue::Scalar(value.to_string())));
        self
    }

    /// Appends `--name='<value>'` when `value` is present; otherwise omits
    /// the option entirely.
    #[must_use]
    pub fn option_opt(mut self, name: impl Into<String>, value: Option<impl Display>) -> Self {
        let rendered = value.map_or(OptionValue::Omitted, |v| OptionValue::Scalar(v.to_string()));
        self.options.push((name.into(), rendered));
        self
    }

    /// Appends a presence-only flag when `present` is true.
    #[must_use]
    pub fn flag_if(mut self, name: impl Into<String>, present: bool) -> Self {
        let rendered = if present {
            OptionValue::Flag
        } else {
            OptionValue::Omitted
        };
        self.options.push((name.into(), rendered));
        self
    }

    /// Appends a keyword-style option, converting underscores in `name` to
    /// hyphens (`dry_run` → `--dry-run`), following the WP-CLI global-flag
    /// convention. Field names that must keep underscores go through
    /// [`WpCommand::option`] instead.
    #[must_use]
    pub fn kw_option(self, name: &str, value: impl Display) -> Self {
        let hyphenated = name.replace('_', "-");
        self.option(hyphenated, value)
    }

    /// Keyword-style counterpart of [`WpCommand::flag`].
    #[must_use]
    pub fn kw_flag(self, name: &str) -> Self {
        self.flag(name.replace('_', "-"))
    }

    /// True when the command requested JSON output (`--format='json'`),
    /// which marks the result for automatic decoding.
    #[must_use]
    pub fn wants_json(&self) -> bool {
        self.options.iter().any(|(name, value)| {
            name.replace('_', "-") == "format"
                && matches!(value, OptionValue::Scalar(v) if v == "json")
        })
    }

    /// Renders the full command fragment (without the `wp` prefix).
    #[must_use]
    pub fn render(&self) -> String {
        let mut parts: Vec<String> = self.verbs.clone();

        for (name, value) in &self.options {
            match value {
                OptionValue::Flag => parts.push(format!("--{name}")),
                OptionValue::Scalar(v) => {
                    parts.push(format!("--{name}='{}'", escape_single_quotes(v)));
                }
                OptionValue::Omitted => {}
            }
        }

        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reverses the POSIX single-quote rendering: strips the outer quotes
    /// and undoes the `'\''` escape, as a shell would.
    fn unquote(fragment: &str) -> String {
        let inner = fragment
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .unwrap_or(fragment);
        inner.replace("'\\''", "'")
    }

    #[test]
    fn verbs_join_in_given_order() {
        let cmd = WpCommand::new(["post", "create"]).arg(42);
        assert_eq!(cmd.render(), "post create 42");
    }

    #[test]
    fn flag_renders_bare() {
        let cmd = WpCommand::new(["post", "create"]).flag("porcelain");
        assert_eq!(cmd.render(), "post create --porcelain");
    }

    #[test]
    fn omitted_option_renders_nothing() {
        let cmd = WpCommand::new(["post", "delete"])
            .arg(7)
            .flag_if("force", false)
            .option_opt("reassign", None::<u64>);
        assert_eq!(cmd.render(), "post delete 7");
    }

    #[test]
    fn scalar_option_is_single_quoted() {
        let cmd = WpCommand::new(["post", "create"]).option("post_title", "Hello World");
        assert_eq!(cmd.render(), "post create --post_title='Hello World'");
    }

    #[test]
    fn keyword_options_hyphenate() {
        let cmd = WpCommand::new(["search-replace"])
            .quoted_arg("old")
            .quoted_arg("new")
            .kw_flag("dry_run");
        assert_eq!(cmd.render(), "search-replace 'old' 'new' --dry-run");
    }

    #[test]
    fn single_quotes_escape_exactly() {
        let cmd = WpCommand::new(["post", "create"]).option("post_title", "It's a test");
        assert_eq!(
            cmd.render(),
            "post create --post_title='It'\\''s a test'"
        );
    }

    #[test]
    fn escaping_round_trips_through_shell_unquoting() {
        let cases = [
            "plain",
            "it's",
            "''",
            "a'b'c",
            "'leading",
            "trailing'",
            "",
            "nested 'quoted' words",
        ];
        for case in cases {
            let rendered = format!("'{}'", escape_single_quotes(case));
            assert_eq!(unquote(&rendered), case, "round-trip failed for {case:?}");
        }
    }

    #[test]
    fn format_json_marks_for_decoding() {
        assert!(WpCommand::new(["post", "list"])
            .option("format", "json")
            .wants_json());
        assert!(!WpCommand::new(["post", "list"])
            .option("format", "csv")
            .wants_json());
        assert!(!WpCommand::new(["post", "list"]).wants_json());
    }

    #[test]
    fn quoted_positional_argument() {
        let cmd = WpCommand::new(["menu", "create"])
            .quoted_arg("Main Menu")
            .flag("porcelain");
        assert_eq!(cmd.render(), "menu create 'Main Menu' --porcelain");
    }
}
