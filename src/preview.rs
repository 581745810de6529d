use crate::{
    naming::{classify, EntryKind},
    tree::{Content, Tree},
};
use colored::{Color, Colorize};

fn paint(text: &str, color: Color, styled: bool) -> String {
    if styled {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

fn render_entry(
    name: &str,
    content: &Content,
    prefix: &str,
    is_last: bool,
    styled: bool,
    out: &mut String,
) {
    let connector = if is_last { "└── " } else { "├── " };
    let color = match classify(name) {
        EntryKind::Directory => Color::Blue,
        EntryKind::File => Color::Green,
    };

    out.push_str(&paint(prefix, Color::Yellow, styled));
    out.push_str(&paint(connector, Color::Yellow, styled));
    out.push_str(&paint(name, color, styled));
    out.push('\n');

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    match content {
        Content::Collection(tree) => render_children(tree, &child_prefix, styled, out),
        Content::Child(node) => {
            render_entry(&node.name, &node.content, &child_prefix, true, styled, out)
        }
        Content::Absent | Content::Text(_) | Content::Readable(_) => {}
    }
}

fn render_children(tree: &Tree, prefix: &str, styled: bool, out: &mut String) {
    let len = tree.len();
    for (i, (name, content)) in tree.iter().enumerate() {
        render_entry(name, content, prefix, i == len - 1, styled, out);
    }
}

/// Renders `tree` below a `label` line, one entry per line.
pub fn render(tree: &Tree, label: &str, styled: bool) -> String {
    let mut out = paint(label, Color::Blue, styled);
    out.push('\n');

    render_children(tree, "", styled, &mut out);

    out
}

pub fn preview_as_tree(tree: &Tree, label: &str) {
    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    let fancy_prompt = format!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue(),
    );

    println!("{}", fancy_prompt);

    print!("{}", render(tree, label, true));
}
