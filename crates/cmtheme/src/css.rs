//! CSS output for an [`OutputTree`].

use std::fmt;

use crate::tree::OutputTree;

/// Renders the `children` of a tree as a stylesheet.
///
/// One block per selector in insertion order, one declaration per line.
/// Selectors without declarations are left out.
///
/// ```text
/// .cm-s-test {
///   background: #000000;
/// }
///
/// .cm-s-test .cm-comment {
///   color: #888888;
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Stylesheet<'a> {
    tree: &'a OutputTree,
}

impl<'a> Stylesheet<'a> {
    pub fn new(tree: &'a OutputTree) -> Self {
        Self { tree }
    }
}

impl fmt::Display for Stylesheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (selector, declarations) in self.tree.children() {
            if declarations.is_empty() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            first = false;

            writeln!(f, "{selector} {{")?;
            for (property, value) in declarations {
                writeln!(f, "  {property}: {value};")?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}

/// Render `tree` as CSS text.
pub fn to_css(tree: &OutputTree) -> String {
    Stylesheet::new(tree).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree() {
        assert_eq!(to_css(&OutputTree::default()), "");
    }

    #[test]
    fn test_blocks_in_insertion_order() {
        let mut tree = OutputTree::default();
        tree.write(".cm-s-test", "background", "#000000");
        tree.write(".cm-s-test .cm-comment", "font-style", "italic");
        tree.write(".cm-s-test .cm-comment", "color", "#888888");
        tree.write(".cm-s-test", "color", "#ffffff");

        let css = to_css(&tree);
        assert_eq!(
            css,
            ".cm-s-test {\n  background: #000000;\n  color: #ffffff;\n}\n\n\
             .cm-s-test .cm-comment {\n  font-style: italic;\n  color: #888888;\n}\n"
        );
    }

    #[test]
    fn test_unsupported_is_not_rendered() {
        let mut tree = OutputTree::default();
        tree.mark_unsupported("guide", crate::tree::Unsupported::GlobalStyling);
        assert_eq!(to_css(&tree), "");
    }
}
