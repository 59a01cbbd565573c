use blog_core::meta::MetaTag;
use blog_core::{Document, Node, Target};
use colored::Colorize;

pub fn print_list(doc: &Document) {
    let cards: Vec<_> = doc
        .children(Target::PostsList)
        .iter()
        .filter_map(Node::as_element)
        .collect();

    println!("✅ Found {} posts", cards.len());
    println!();

    if cards.is_empty() {
        println!("   No posts found");
        return;
    }

    for (i, card) in cards.iter().enumerate() {
        let part = |n: usize| {
            card.children
                .get(n)
                .map(Node::text_content)
                .unwrap_or_default()
        };
        let link = card
            .children
            .last()
            .and_then(Node::as_element)
            .and_then(|a| a.get_attribute("href"))
            .unwrap_or_default();

        println!("   {}. {}", i + 1, part(0).bold());
        println!("      {}", part(1).dimmed());
        println!("      {}", truncate(&part(2), 80));
        println!("      → {}", link);
        println!();
    }
}

pub fn print_detail(doc: &Document) {
    println!("📄 {}", doc.title().bold());
    if let Some(byline) = doc.text(Target::PostMeta) {
        println!("   {}", byline.dimmed());
    }
    println!();

    for tag in MetaTag::ALL {
        if let Some(content) = doc.meta_content(tag.selector()) {
            println!("   {:<36} {}", tag.selector(), content);
        }
    }
    println!();

    if let Some(html) = doc.inner_html(Target::PostContent) {
        println!("{}", html);
    }
}

/// Pretty-printed JSON of the page's structured data block, if any.
pub fn structured_data(doc: &Document) -> Option<String> {
    let script = doc.structured_data().into_iter().next()?;
    let value: serde_json::Value = serde_json::from_str(&script.text_content()).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

/// Text of the message a not-found render leaves in the content area.
pub fn not_found_message(doc: &Document) -> String {
    doc.inner_html(Target::PostContent)
        .unwrap_or_default()
        .trim_start_matches("<p>")
        .trim_end_matches("</p>")
        .to_string()
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    }
}
