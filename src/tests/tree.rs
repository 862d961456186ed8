// This is actually defined at `crate::tree::tests_for_tree`

use crate::parser::Parser;
use crate::tests::*;
use crate::tree::*;

use expect_test::expect;

fn names(tree: &Tree, ids: impl IntoIterator<Item=NodeId>) -> Vec<String> {
    ids.into_iter().map(|id| tree[id].name().to_string()).collect()
}

#[test]
fn compact_and_pretty() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    let t = parse(&p, "i");
    expect![[r#"(S'[1,0]:(S[1,0]:(E[1,0]:(T[1,0]:(F[1,0]:(i[1,0]:))(P[2,1]:(ε[2,0]:)))(Q[2,1]:(ε[2,0]:)))($[2,1]:)))"#]]
        .assert_eq(&t.compact().to_string());
    expect![[r#"
        S'[1,0]
        ┊ S[1,0]
        ┊ ┊ E[1,0]
        ┊ ┊ ┊ T[1,0]
        ┊ ┊ ┊ ┊ F[1,0]
        ┊ ┊ ┊ ┊ ┊ i[1,0]
        ┊ ┊ ┊ ┊ P[2,1]
        ┊ ┊ ┊ ┊ ┊ ε[2,0]
        ┊ ┊ ┊ Q[2,1]
        ┊ ┊ ┊ ┊ ε[2,0]
        ┊ ┊ $[2,1]
    "#]].assert_eq(&t.pretty(2).to_string());
}

#[test]
fn leaves_and_word() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    let t = parse(&p, "(i)*i");
    assert_eq!(names(&t, t.leaves()), ["(", "i", "ε", "ε", ")", "*", "i", "ε", "ε", "$"]);
    assert_eq!(t.word(), "(i)*i");
}

#[test]
fn finding_positions() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    let t = parse(&p, "i+i");

    assert_eq!(t.find_position(1), Some(t.root()));
    let plus = t.find_position(2).unwrap();
    assert_eq!(t[plus].name().as_str(), "Q");
    assert_eq!(t[plus].position(), Some(2));
    assert_eq!(t.span(plus), 2);
    let third = t.find_position(3).unwrap();
    assert_eq!(t[third].name().as_str(), "T");
    let end = t.find_position(4).unwrap();
    assert_eq!(t[end].name().as_str(), "$");
    assert_eq!(t.find_position(5), None);

    assert_eq!(t.span(t.root()), 4);
    assert!(t.is_descendant(third, plus));
    assert!(!t.is_descendant(plus, third));
}

#[test]
fn right_siblings_climb() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    let t = parse(&p, "i+i");
    let leaves = t.leaves();
    // the `ε` under the first P is the last thing under T
    let first_eps = leaves[1];
    assert_eq!(t[first_eps].name().as_str(), "ε");
    assert!(t.is_sole_child(first_eps));
    let next = t.right_sibling(first_eps).unwrap();
    assert_eq!(t[next].name().as_str(), "Q");
    assert_eq!(t[next].position(), Some(2));
    let last = *leaves.last().unwrap();
    assert_eq!(t.right_sibling(last), None);
    assert_eq!(t.right_sibling(t.root()), None);
}

#[test]
fn inheriting_a_prefix() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    let t = parse(&p, "i+i");
    let mut frontier = Frontier::new();
    let prefix = Tree::inherit_prefix(&t, 2, &mut frontier);
    expect![[r#"(S'[1,0]:(S[1,0]:(E[1,0]:(T[1,0]:(F[1,0]:(i[1,0]:))(P[2,1]:(ε[2,0]:)))(Q[2,1]:(+[2,0]:)(T[_,1]:)(Q[_,2]:)))($[_,1]:)))"#]]
        .assert_eq(&prefix.compact().to_string());
    assert_eq!(names(&prefix, frontier.iter().copied()), ["T", "Q", "$"]);
    assert!(prefix[prefix.root()].is_inherited());
}

#[test]
fn grafting_moves_positions() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    let old = parse(&p, "i+i");
    let q = old.find_position(2).unwrap();

    let mut t = Tree::new("S'".into());
    let copy = t.graft(&old, q, 3);
    t.replace(t.root(), copy);
    expect![[r#"
        Q[5,0]*
        ┊   +[5,0]*
        ┊   T[6,1]*
        ┊   ┊   F[6,0]*
        ┊   ┊   ┊   i[6,0]*
        ┊   ┊   P[7,1]*
        ┊   ┊   ┊   ε[7,0]*
        ┊   Q[7,2]*
        ┊   ┊   ε[7,0]*
    "#]].assert_eq(&t.pretty(4).to_string());
    assert_eq!(t.word(), "+i");
}

#[test]
fn walks_over_long_chains() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    let terms = 50_000;
    let word = format!("{}i", "i+".repeat(terms - 1));
    let t = parse(&p, &word);
    let len = word.len();

    assert_eq!(t.span(t.root()), len + 1);
    let last = t.find_position(len).unwrap();
    assert_eq!(t[last].name().as_str(), "T");
    assert_eq!(t.span(last), 1);
    let rendered = t.compact().to_string();
    assert_eq!(rendered.matches('(').count(), t.nodes.len());
    assert_eq!(rendered.matches(')').count(), t.nodes.len());

    let mut frontier = Frontier::new();
    let copy = Tree::inherit_prefix(&t, len + 1, &mut frontier);
    assert!(frontier.is_empty());
    assert_eq!(copy.compact().to_string(), rendered);

    let mut host = Tree::new(t[t.root()].name().clone());
    let moved = host.graft(&t, t.root(), 1);
    host.replace(host.root(), moved);
    assert_eq!(host.span(host.root()), len + 1);
    assert_eq!(host.find_position(len + 1).map(|id| host[id].name().to_string()), Some("T".to_string()));
}
