//! Integration tests for `WpClient` against a scripted remote shell.
//!
//! No network or WordPress installation is involved: the shell fake
//! replays queued `(stdout, stderr)` pairs and records every command line
//! it is asked to run, so tests can assert both the rendered commands and
//! the adapter's classification/decoding behavior.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use wp_adapter::{ExecOutput, RemoteShell, ShellError, WpClient, WpCliError, WpCommand, WpOutput};

/// Replays queued outputs and logs executed command lines.
#[derive(Default)]
struct ScriptedShell {
    responses: Mutex<VecDeque<ExecOutput>>,
    commands: Mutex<Vec<String>>,
}

impl ScriptedShell {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, stdout: &str, stderr: &str) {
        self.responses.lock().unwrap().push_back(ExecOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        });
    }

    fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    fn last_command(&self) -> String {
        self.commands().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl RemoteShell for ScriptedShell {
    async fn execute(&self, command: &str) -> Result<ExecOutput, ShellError> {
        self.commands.lock().unwrap().push(command.to_string());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}

/// Always fails at the transport layer.
struct DeadShell;

#[async_trait]
impl RemoteShell for DeadShell {
    async fn execute(&self, _command: &str) -> Result<ExecOutput, ShellError> {
        Err(ShellError::Connect {
            host: "wp.example.com".to_string(),
            stderr: "Connection refused".to_string(),
        })
    }
}

fn client(shell: Arc<ScriptedShell>) -> WpClient {
    WpClient::new(shell, "/var/www/html")
}

#[tokio::test]
async fn execute_prefixes_cd_interpreter_and_tool() {
    let shell = ScriptedShell::new();
    shell.push("Success", "");
    let wp = client(shell.clone());

    let out = wp.execute("post list").await.unwrap();

    assert_eq!(out, "Success");
    assert_eq!(
        shell.last_command(),
        "cd /var/www/html && php /usr/local/bin/wp post list"
    );
}

#[tokio::test]
async fn stderr_error_prefix_fails_the_call() {
    let shell = ScriptedShell::new();
    shell.push("", "Error: Something went wrong");
    let wp = client(shell);

    let err = wp.execute("post list").await.unwrap_err();
    assert!(matches!(err, WpCliError::Tool { .. }));
    assert!(err.to_string().contains("Something went wrong"));
}

#[tokio::test]
async fn command_not_found_takes_precedence_over_error_prefix() {
    let shell = ScriptedShell::new();
    shell.push("", "bash: wp: command not found\nError: aborted");
    let wp = client(shell);

    let err = wp.execute("post list").await.unwrap_err();
    match err {
        WpCliError::CommandNotFound { wp_cli, php_bin, .. } => {
            assert_eq!(wp_cli, "/usr/local/bin/wp");
            assert_eq!(php_bin, "php");
        }
        other => panic!("expected CommandNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_wraps_as_transport_error() {
    let wp = WpClient::new(Arc::new(DeadShell), "/var/www/html");
    let err = wp.execute("post list").await.unwrap_err();
    assert!(matches!(err, WpCliError::Transport(_)));
    assert!(err.to_string().contains("Connection refused"));
}

#[tokio::test]
async fn invoke_decodes_json_marked_calls() {
    let shell = ScriptedShell::new();
    shell.push(r#"[{"a":1}]"#, "");
    let wp = client(shell.clone());

    let cmd = WpCommand::new(["post", "list"]).option("format", "json");
    let out = wp.invoke(&cmd).await.unwrap();

    let items = out.into_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["a"], 1);
    assert!(shell.last_command().contains("--format='json'"));
}

#[tokio::test]
async fn malformed_json_degrades_to_raw_text() {
    let shell = ScriptedShell::new();
    shell.push("Success: not json at all", "");
    let wp = client(shell);

    let cmd = WpCommand::new(["post", "list"]).option("format", "json");
    let out = wp.invoke(&cmd).await.unwrap();

    assert_eq!(out, WpOutput::Text("Success: not json at all".to_string()));
}

#[tokio::test]
async fn unmarked_invoke_returns_trimmed_text() {
    let shell = ScriptedShell::new();
    shell.push("  42  \n", "");
    let wp = client(shell);

    let out = wp.invoke(&WpCommand::new(["post", "create"])).await.unwrap();
    assert_eq!(out, WpOutput::Text("42".to_string()));
}

#[tokio::test]
async fn create_post_resolves_default_author_and_parses_id() {
    let shell = ScriptedShell::new();
    shell.push("admin", ""); // user get 1 --field='user_login'
    shell.push("42", ""); // post create ... --porcelain
    let wp = client(shell.clone());

    let post_id = wp
        .create_post(&[
            ("post_title", "Hi"),
            ("post_content", "World"),
            ("post_status", "publish"),
        ])
        .await
        .unwrap();

    assert_eq!(post_id, 42);
    let commands = shell.commands();
    assert_eq!(commands.len(), 2);
    assert!(commands[0].contains("user get 1 --field='user_login'"));
    assert!(commands[1].contains("post create"));
    assert!(commands[1].contains("--post_title='Hi'"));
    assert!(commands[1].contains("--post_author='admin'"));
    assert!(commands[1].contains("--porcelain"));
}

#[tokio::test]
async fn create_post_with_explicit_author_skips_resolution() {
    let shell = ScriptedShell::new();
    shell.push("7", "");
    let wp = client(shell.clone());

    let post_id = wp
        .create_post(&[("post_title", "Hi"), ("post_author", "editor")])
        .await
        .unwrap();

    assert_eq!(post_id, 7);
    assert_eq!(shell.commands().len(), 1);
    assert!(shell.last_command().contains("--post_author='editor'"));
}

#[tokio::test]
async fn default_author_falls_back_to_first_administrator() {
    let shell = ScriptedShell::new();
    shell.push("", "Error: Invalid user ID.");
    shell.push("admin\neditor\n", "");
    let wp = client(shell.clone());

    let author = wp.default_author().await;

    assert_eq!(author.as_deref(), Some("admin"));
    let commands = shell.commands();
    assert!(commands[1].contains("user list"));
    assert!(commands[1].contains("--role='administrator'"));
    assert!(commands[1].contains("--format='csv'"));
}

#[tokio::test]
async fn create_post_escapes_single_quotes_in_values() {
    let shell = ScriptedShell::new();
    shell.push("9", "");
    let wp = client(shell.clone());

    wp.create_post(&[("post_title", "It's a test"), ("post_author", "admin")])
        .await
        .unwrap();

    assert!(shell
        .last_command()
        .contains("--post_title='It'\\''s a test'"));
}

#[tokio::test]
async fn update_and_delete_post_render_expected_commands() {
    let shell = ScriptedShell::new();
    shell.push("Success: Updated post 123.", "");
    shell.push("Success: Deleted post 123.", "");
    let wp = client(shell.clone());

    wp.update_post(123, &[("post_title", "Updated Title")]).await.unwrap();
    wp.delete_post(123, true).await.unwrap();

    let commands = shell.commands();
    assert!(commands[0].contains("post update 123 --post_title='Updated Title'"));
    assert!(commands[1].contains("post delete 123 --force"));
}

#[tokio::test]
async fn post_exists_converts_errors_to_false() {
    let shell = ScriptedShell::new();
    shell.push("", "");
    shell.push("", "Error: Post does not exist.");
    let wp = client(shell);

    assert!(wp.post_exists(123).await);
    assert!(!wp.post_exists(999).await);
}

#[tokio::test]
async fn list_posts_passes_type_and_filters() {
    let shell = ScriptedShell::new();
    shell.push(r#"[{"ID":1,"post_title":"Post 1"}]"#, "");
    let wp = client(shell.clone());

    let posts = wp.list_posts("page", &[("post_status", "publish")]).await.unwrap();

    assert_eq!(posts.len(), 1);
    let cmd = shell.last_command();
    assert!(cmd.contains("post list"));
    assert!(cmd.contains("--post_type='page'"));
    assert!(cmd.contains("--post_status='publish'"));
    assert!(cmd.contains("--format='json'"));
}

#[tokio::test]
async fn post_meta_operations_render_positional_values() {
    let shell = ScriptedShell::new();
    shell.push("meta_value", "");
    shell.push("Success", "");
    shell.push("Success", "");
    let wp = client(shell.clone());

    let value = wp.get_post_meta(123, "custom_key").await.unwrap();
    wp.set_post_meta(123, "custom_key", "it's here").await.unwrap();
    wp.delete_post_meta(123, "custom_key").await.unwrap();

    assert_eq!(value, "meta_value");
    let commands = shell.commands();
    assert!(commands[0].contains("post meta get 123 custom_key"));
    assert!(commands[1].contains("post meta set 123 custom_key 'it'\\''s here'"));
    assert!(commands[2].contains("post meta delete 123 custom_key"));
}

#[tokio::test]
async fn user_lifecycle_commands() {
    let shell = ScriptedShell::new();
    shell.push("123", "");
    shell.push("Success", "");
    shell.push("Success", "");
    let wp = client(shell.clone());

    let user_id = wp
        .create_user("testuser", "test@example.com", &[("role", "editor")])
        .await
        .unwrap();
    wp.update_user(123, &[("display_name", "Test User")]).await.unwrap();
    wp.delete_user(123, Some(1)).await.unwrap();

    assert_eq!(user_id, 123);
    let commands = shell.commands();
    assert!(commands[0].contains("user create testuser test@example.com"));
    assert!(commands[0].contains("--role='editor'"));
    assert!(commands[0].contains("--porcelain"));
    assert!(commands[1].contains("user update 123 --display_name='Test User'"));
    assert!(commands[2].contains("user delete 123 --yes --reassign='1'"));
}

#[tokio::test]
async fn set_post_categories_happy_path() {
    let shell = ScriptedShell::new();
    shell.push("Success: Updated post 123.", "");
    let wp = client(shell.clone());

    let applied = wp.set_post_categories(123, &[5, 7]).await.unwrap();

    assert!(applied);
    assert!(shell.last_command().contains("post update 123 --post_category='5,7'"));
}

#[tokio::test]
async fn set_post_categories_empty_input_is_a_noop() {
    let shell = ScriptedShell::new();
    let wp = client(shell.clone());

    let applied = wp.set_post_categories(123, &[]).await.unwrap();

    assert!(!applied);
    assert!(shell.commands().is_empty());
}

#[tokio::test]
async fn set_post_categories_compensates_for_spurious_term_error() {
    let shell = ScriptedShell::new();
    shell.push("", "Error: Term doesn't exist.");
    shell.push(r#"{"ID":123,"post_category":[5,7]}"#, "");
    let wp = client(shell.clone());

    let applied = wp.set_post_categories(123, &[5, 7]).await.unwrap();

    assert!(applied);
    let commands = shell.commands();
    assert_eq!(commands.len(), 2);
    assert!(commands[1].contains("post get 123 --format='json'"));
}

#[tokio::test]
async fn set_post_categories_reraises_when_refetch_lacks_categories() {
    let shell = ScriptedShell::new();
    shell.push("", "Error: Term doesn't exist.");
    shell.push(r#"{"ID":123,"post_title":"Hi"}"#, "");
    let wp = client(shell);

    let err = wp.set_post_categories(123, &[5, 7]).await.unwrap_err();
    assert!(err.to_string().contains("Term doesn't exist"));
}

#[tokio::test]
async fn get_category_by_name_resolves_slug_directly() {
    let shell = ScriptedShell::new();
    shell.push(
        r#"{"term_id":4,"name":"AI","slug":"ai","parent":0}"#,
        "",
    );
    let wp = client(shell.clone());

    let category = wp.get_category_by_name("ai").await.unwrap().unwrap();

    assert_eq!(category.term_id, 4);
    assert_eq!(category.slug, "ai");
    assert!(shell.last_command().contains("term get category 'ai'"));
}

#[tokio::test]
async fn get_category_by_name_falls_back_to_search_scan() {
    let shell = ScriptedShell::new();
    shell.push("", "Error: Term doesn't exist.");
    shell.push(
        r#"[{"term_id":2,"name":"Rag","slug":"retrieval","parent":0,"count":3},
           {"term_id":9,"name":"Other","slug":"other","parent":0,"count":0}]"#,
        "",
    );
    let wp = client(shell.clone());

    let category = wp.get_category_by_name("RAG").await.unwrap().unwrap();

    assert_eq!(category.term_id, 2);
    let commands = shell.commands();
    assert!(commands[1].contains("term list category"));
    assert!(commands[1].contains("--search='RAG'"));
}

#[tokio::test]
async fn get_category_by_name_reports_not_found_as_none() {
    let shell = ScriptedShell::new();
    shell.push("", "Error: Term doesn't exist.");
    shell.push("[]", "");
    let wp = client(shell);

    let category = wp.get_category_by_name("missing").await.unwrap();
    assert!(category.is_none());
}

#[tokio::test]
async fn get_category_by_id_is_idempotent_across_reads() {
    let payload = r#"{"term_id":4,"name":"AI","slug":"ai","parent":0}"#;
    let shell = ScriptedShell::new();
    shell.push(payload, "");
    shell.push(payload, "");
    let wp = client(shell);

    let first = wp.get_category_by_id(4).await.unwrap();
    let second = wp.get_category_by_id(4).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.unwrap().name, "AI");
}

#[tokio::test]
async fn option_and_transient_values_are_quoted_positionals() {
    let shell = ScriptedShell::new();
    shell.push("Success", "");
    shell.push("Success", "");
    let wp = client(shell.clone());

    wp.set_option("blogname", "My Blog").await.unwrap();
    wp.set_transient("greeting", "it's cached", Some(3600)).await.unwrap();

    let commands = shell.commands();
    assert!(commands[0].contains("option set blogname 'My Blog'"));
    assert!(commands[1].contains("transient set greeting 'it'\\''s cached' 3600"));
}

#[tokio::test]
async fn plugin_and_theme_commands() {
    let shell = ScriptedShell::new();
    shell.push(r#"[{"name":"akismet","status":"active"}]"#, "");
    shell.push("Success", "");
    shell.push("Success", "");
    let wp = client(shell.clone());

    let plugins = wp.list_plugins(&[("status", "active")]).await.unwrap();
    wp.update_plugin(None).await.unwrap();
    wp.activate_theme("twentytwentyfour").await.unwrap();

    assert_eq!(plugins.len(), 1);
    let commands = shell.commands();
    assert!(commands[0].contains("plugin list --format='json' --status='active'"));
    assert!(commands[1].contains("plugin update --all"));
    assert!(commands[2].contains("theme activate twentytwentyfour"));
}

#[tokio::test]
async fn db_query_escapes_double_quotes_and_dollars() {
    let shell = ScriptedShell::new();
    shell.push("Query result", "");
    let wp = client(shell.clone());

    let out = wp
        .db_query(r#"SELECT * FROM wp_posts WHERE post_title = "x$y""#)
        .await
        .unwrap();

    assert_eq!(out, "Query result");
    let cmd = shell.last_command();
    assert!(cmd.contains(r#"db query "SELECT * FROM wp_posts WHERE post_title = \"x\$y\"""#));
    assert!(cmd.contains("--format=json"));
}

#[tokio::test]
async fn search_replace_renders_quoted_terms_and_dry_run() {
    let shell = ScriptedShell::new();
    shell.push("4 replacements", "");
    let wp = client(shell.clone());

    let report = wp
        .search_replace("old.example.com", "new.example.com", &["wp_posts"], true)
        .await
        .unwrap();

    assert_eq!(report, "4 replacements");
    assert!(shell
        .last_command()
        .contains("search-replace 'old.example.com' 'new.example.com' wp_posts --dry-run"));
}

#[tokio::test]
async fn best_effort_listings_swallow_failures() {
    let shell = ScriptedShell::new();
    shell.push("", "Error: cron is broken");
    let wp = client(shell);

    assert!(wp.list_cron_events().await.is_empty());
}

#[tokio::test]
async fn verify_installation_reports_version() {
    let shell = ScriptedShell::new();
    shell.push("exists", "");
    shell.push("exists", "");
    shell.push("exists", "");
    shell.push("WP-CLI 2.11.0", "");
    let wp = client(shell.clone());

    let report = wp.verify_installation().await.unwrap();

    assert!(report.verified);
    assert_eq!(report.version.as_deref(), Some("WP-CLI 2.11.0"));
    let commands = shell.commands();
    assert!(commands[0].contains("test -f /usr/local/bin/wp"));
    assert!(commands[1].contains("test -d /var/www/html"));
    assert!(commands[2].contains("test -f /var/www/html/wp-config.php"));
    assert!(commands[3].contains("--version"));
}

#[tokio::test]
async fn verify_installation_fails_with_guidance_when_tool_missing() {
    let shell = ScriptedShell::new();
    shell.push("not found", "");
    let wp = client(shell);

    let err = wp.verify_installation().await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("WP-CLI not found at /usr/local/bin/wp"));
    assert!(message.contains("wp-cli.phar"));
}
