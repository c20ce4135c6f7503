use super::tree::{Node, PresentationTree, Section};
use mathseek_markup::join;
use std::fmt;

const INDENT: &str = "  ";

/// Plain-text layout of the tree, with math written back in `$...$` / `$$...$$`.
impl fmt::Display for PresentationTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", section)?;
        }
        Ok(())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for child in &self.children {
            write_node(f, child, 0)?;
        }
        Ok(())
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);
    match node {
        Node::Text(text) => writeln!(f, "{}{}", indent, text),
        Node::Mixed(segments) => writeln!(f, "{}{}", indent, join(segments)),
        Node::Math(span) if span.display => writeln!(f, "{}$${}$$", indent, span.markup),
        Node::Math(span) => writeln!(f, "{}${}$", indent, span.markup),
        Node::Badge(badge) => writeln!(f, "{}[{}]", indent, badge.label),
        Node::Group { label, children } => {
            writeln!(f, "{}{}:", indent, label)?;
            for child in children {
                write_node(f, child, depth + 1)?;
            }
            Ok(())
        }
        Node::Step {
            number,
            label,
            children,
        } => {
            writeln!(f, "{}Step {}: {}", indent, number, join(label))?;
            for child in children {
                write_node(f, child, depth + 1)?;
            }
            Ok(())
        }
    }
}
