//! `wpsh update` — targeted content edits and category assignment.

use crate::config::Config;
use crate::editor::{apply_edit, preview, EditScope};
use anyhow::bail;

pub struct UpdateArgs<'a> {
    pub post_id: u64,
    pub find: Option<&'a str>,
    pub replace: Option<&'a str>,
    pub line: Option<usize>,
    pub nth: Option<usize>,
    pub preview: bool,
    pub category: Option<&'a str>,
    pub category_id: Option<u64>,
}

pub async fn run(config: &Config, server: Option<&str>, args: UpdateArgs<'_>) -> anyhow::Result<()> {
    let client = super::client_for(config, server)?;

    let edit = match (args.find, args.replace) {
        (Some(find), Some(replace)) => Some((find, replace)),
        (None, None) => None,
        _ => bail!("find and replace must be given together"),
    };

    if edit.is_none() && args.category.is_none() && args.category_id.is_none() {
        bail!("nothing to do: give find/replace text or a category");
    }

    if let Some((find, replace)) = edit {
        let scope = match (args.line, args.nth) {
            (Some(_), Some(_)) => bail!("--line and --nth are mutually exclusive"),
            (Some(line), None) => EditScope::Line(line),
            (None, Some(nth)) => EditScope::Nth(nth),
            (None, None) => EditScope::All,
        };

        let before = client.get_post_field(args.post_id, "post_content").await?;
        let outcome = apply_edit(&before, find, replace, scope)?;

        if args.preview {
            print!("{}", preview(&before, &outcome.content));
            println!("({} replacement(s), not applied)", outcome.replacements);
        } else if outcome.replacements == 0 {
            println!("No occurrences of {find:?} in post {}", args.post_id);
        } else {
            client
                .update_post(args.post_id, &[("post_content", &outcome.content)])
                .await?;
            println!(
                "Updated post {}: {} replacement(s)",
                args.post_id, outcome.replacements
            );
        }
    }

    if let Some(category_id) =
        super::resolve_category(&client, args.category, args.category_id).await?
    {
        client
            .set_post_categories(args.post_id, &[category_id])
            .await?;
        println!("Assigned category {category_id}");
    }
    Ok(())
}
