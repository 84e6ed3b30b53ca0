//! Markup parser.
//!
//! Builds a node tree from lexer tokens. Conditional blocks may nest. Malformed
//! structure degrades to literal text rather than failing:
//!
//! - an `{{#if}}` without a matching `{{/if}}` keeps its tag text literally and
//!   its contents are spliced into the enclosing sequence;
//! - an `{{else}}` or `{{/if}}` outside any block, or a second `{{else}}` in the
//!   same block, is kept as literal text.

use crate::contract::FieldKind;
use crate::lexer::{lex, Spanned, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Var(String),
    Conditional {
        var: String,
        then_branch: Vec<Node>,
        else_branch: Vec<Node>,
    },
    Anchor {
        party: String,
        kind: FieldKind,
    },
}

/// A parsed template body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub nodes: Vec<Node>,
}

/// How a name is referenced from markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Interpolation,
    Condition,
}

impl Document {
    /// Every variable name referenced by interpolation or conditionals, in
    /// document order (duplicates included).
    pub fn references(&self) -> Vec<(String, ReferenceKind)> {
        let mut out = Vec::new();
        collect_references(&self.nodes, &mut out);
        out
    }

    /// Every signing anchor in document order.
    pub fn anchors(&self) -> Vec<(String, FieldKind)> {
        let mut out = Vec::new();
        collect_anchors(&self.nodes, &mut out);
        out
    }
}

fn collect_references(nodes: &[Node], out: &mut Vec<(String, ReferenceKind)>) {
    for node in nodes {
        match node {
            Node::Var(name) => out.push((name.clone(), ReferenceKind::Interpolation)),
            Node::Conditional {
                var,
                then_branch,
                else_branch,
            } => {
                out.push((var.clone(), ReferenceKind::Condition));
                collect_references(then_branch, out);
                collect_references(else_branch, out);
            }
            Node::Text(_) | Node::Anchor { .. } => {}
        }
    }
}

fn collect_anchors(nodes: &[Node], out: &mut Vec<(String, FieldKind)>) {
    for node in nodes {
        match node {
            Node::Anchor { party, kind } => out.push((party.clone(), *kind)),
            Node::Conditional {
                then_branch,
                else_branch,
                ..
            } => {
                collect_anchors(then_branch, out);
                collect_anchors(else_branch, out);
            }
            Node::Text(_) | Node::Var(_) => {}
        }
    }
}

/// Append a node, merging adjacent text.
fn push_node(nodes: &mut Vec<Node>, node: Node) {
    if let Node::Text(text) = &node {
        if text.is_empty() {
            return;
        }
        if let Some(Node::Text(prev)) = nodes.last_mut() {
            prev.push_str(text);
            return;
        }
    }
    nodes.push(node);
}

struct Frame {
    var: String,
    open_raw: String,
    then_branch: Vec<Node>,
    /// Raw `{{else}}` text and the nodes after it.
    else_branch: Option<(String, Vec<Node>)>,
}

impl Frame {
    fn active(&mut self) -> &mut Vec<Node> {
        match &mut self.else_branch {
            Some((_, nodes)) => nodes,
            None => &mut self.then_branch,
        }
    }

    /// Flatten an unclosed block back into literal text plus its contents.
    fn into_literal(self) -> Vec<Node> {
        let mut nodes = Vec::new();
        push_node(&mut nodes, Node::Text(self.open_raw));
        for node in self.then_branch {
            push_node(&mut nodes, node);
        }
        if let Some((else_raw, else_nodes)) = self.else_branch {
            push_node(&mut nodes, Node::Text(else_raw));
            for node in else_nodes {
                push_node(&mut nodes, node);
            }
        }
        nodes
    }
}

fn current<'a>(root: &'a mut Vec<Node>, stack: &'a mut [Frame]) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(frame) => frame.active(),
        None => root,
    }
}

/// Parse lexed tokens into a document.
pub fn parse_tokens(tokens: Vec<Spanned>) -> Document {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for Spanned { token, raw, .. } in tokens {
        match token {
            Token::Text(text) => push_node(current(&mut root, &mut stack), Node::Text(text)),
            Token::Var(name) => push_node(current(&mut root, &mut stack), Node::Var(name)),
            Token::Anchor { party, kind } => {
                push_node(current(&mut root, &mut stack), Node::Anchor { party, kind })
            }
            Token::If(var) => stack.push(Frame {
                var,
                open_raw: raw,
                then_branch: Vec::new(),
                else_branch: None,
            }),
            Token::Else => {
                let accepts_else = stack.last().is_some_and(|f| f.else_branch.is_none());
                if accepts_else {
                    if let Some(frame) = stack.last_mut() {
                        frame.else_branch = Some((raw, Vec::new()));
                    }
                } else {
                    push_node(current(&mut root, &mut stack), Node::Text(raw));
                }
            }
            Token::EndIf => match stack.pop() {
                Some(frame) => {
                    let node = Node::Conditional {
                        var: frame.var,
                        then_branch: frame.then_branch,
                        else_branch: frame.else_branch.map(|(_, n)| n).unwrap_or_default(),
                    };
                    push_node(current(&mut root, &mut stack), node);
                }
                None => push_node(&mut root, Node::Text(raw)),
            },
        }
    }

    while let Some(frame) = stack.pop() {
        let target = current(&mut root, &mut stack);
        for node in frame.into_literal() {
            push_node(target, node);
        }
    }

    Document { nodes: root }
}

/// Parse template markup. Never fails; see the module docs for how malformed
/// blocks are handled.
pub fn parse(src: &str) -> Document {
    parse_tokens(lex(src))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    #[test]
    fn parses_if_else_block() {
        let doc = parse("Hello {{name}}, {{#if vip}}welcome back{{else}}welcome{{/if}}.");
        assert_eq!(
            doc.nodes,
            vec![
                text("Hello "),
                Node::Var("name".into()),
                text(", "),
                Node::Conditional {
                    var: "vip".into(),
                    then_branch: vec![text("welcome back")],
                    else_branch: vec![text("welcome")],
                },
                text("."),
            ]
        );
    }

    #[test]
    fn parses_nested_blocks() {
        let doc = parse("{{#if a}}A{{#if b}}B{{/if}}{{else}}Z{{/if}}");
        assert_eq!(
            doc.nodes,
            vec![Node::Conditional {
                var: "a".into(),
                then_branch: vec![
                    text("A"),
                    Node::Conditional {
                        var: "b".into(),
                        then_branch: vec![text("B")],
                        else_branch: vec![],
                    },
                ],
                else_branch: vec![text("Z")],
            }]
        );
    }

    #[test]
    fn unclosed_block_becomes_literal() {
        let doc = parse("x {{#if a}}y {{name}}");
        assert_eq!(
            doc.nodes,
            vec![text("x {{#if a}}y "), Node::Var("name".into())]
        );
    }

    #[test]
    fn stray_closers_become_literal() {
        let doc = parse("a{{/if}}b{{else}}c");
        assert_eq!(doc.nodes, vec![text("a{{/if}}b{{else}}c")]);
    }

    #[test]
    fn second_else_is_literal() {
        let doc = parse("{{#if a}}1{{else}}2{{else}}3{{/if}}");
        assert_eq!(
            doc.nodes,
            vec![Node::Conditional {
                var: "a".into(),
                then_branch: vec![text("1")],
                else_branch: vec![text("2{{else}}3")],
            }]
        );
    }

    #[test]
    fn collects_references_and_anchors() {
        let doc = parse("{{#if is_project}}{{budget}}{{/if}} {{signature_placeholder_client}}");
        assert_eq!(
            doc.references(),
            vec![
                ("is_project".to_string(), ReferenceKind::Condition),
                ("budget".to_string(), ReferenceKind::Interpolation),
            ]
        );
        assert_eq!(
            doc.anchors(),
            vec![("client".to_string(), FieldKind::Signature)]
        );
    }
}
