// This is actually defined at `crate::incremental::tests_for_incremental`

use crate::incremental::*;
use crate::parser::Parser;
use crate::tests::*;
use crate::tree::Tree;
use crate::Error;

const STRATEGIES: [Strategy; 2] = [Strategy::Simple, Strategy::Greedy];

fn chars(s: &str) -> Vec<char> { s.chars().collect() }

fn reparsed(p: &Parser, old: &str, new: &str, strategy: Strategy) -> Tree {
    let old_tree = parse(p, old);
    p.reparse(old, &old_tree, new, strategy)
        .unwrap_or_else(|e| panic!("{} reparse of `{}` as `{}` failed: {}", strategy, old, new, e))
}

fn assert_agrees(p: &Parser, old: &str, new: &str) {
    let expected = parse(p, new).compact().to_string();
    for strategy in STRATEGIES {
        let t = reparsed(p, old, new, strategy);
        assert_eq!(t.compact().to_string(), expected, "{} reparse of `{}` as `{}`", strategy, old, new);
        assert_well_formed(&t, new);
    }
}

#[test]
fn affixes() {
    assert_eq!(common_affixes(&chars("i+i+i+i"), &chars("i*i+i+i")), (1, 5));
    assert_eq!(common_affixes(&chars("(i+i)+i+i"), &chars("i+i+i+i")), (0, 4));
    assert_eq!(common_affixes(&chars("i+i"), &chars("i+i+i+i")), (3, 0));
    assert_eq!(common_affixes(&chars("i+i"), &chars("i+i")), (3, 0));
    // prefix and suffix may not overlap
    assert_eq!(common_affixes(&chars("i+i+i"), &chars("i+i")), (3, 0));
    assert_eq!(common_affixes(&chars("ii"), &chars("i")), (1, 0));
    assert_eq!(common_affixes(&chars(""), &chars("i")), (0, 0));
}

#[test]
fn replaced_operator() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    assert_agrees(&p, "i+i+i+i", "i*i+i+i");

    // the tail `+i+i` came over from the old tree
    for strategy in STRATEGIES {
        let t = reparsed(&p, "i+i+i+i", "i*i+i+i", strategy);
        let tail = t.find_position(4).unwrap();
        assert_eq!(t[tail].name().as_str(), "Q");
        assert!(t[tail].is_inherited());
    }
}

#[test]
fn growing_edit() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    assert_agrees(&p, "i+i", "i+i+i+i");
}

#[test]
fn shrinking_structural_edit() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    assert_agrees(&p, "(i+i)+i+i", "i+i+i+i");

    let t = reparsed(&p, "(i+i)+i+i", "i+i+i+i", Strategy::Simple);
    let tail = t.find_position(4).unwrap();
    assert!(t[tail].is_inherited());
    assert_eq!(t[tail].position(), Some(4));
}

#[test]
fn identity_edit_copies_everything() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    assert_agrees(&p, "i*(i+i)", "i*(i+i)");

    let t = reparsed(&p, "i*(i+i)", "i*(i+i)", Strategy::Greedy);
    for id in t.leaves() {
        let leaf = &t[id];
        assert!(leaf.is_inherited() || leaf.name().is_epsilon(), "fresh `{}` in {}", leaf.name(), t.compact());
    }
}

#[test]
fn whitespace_in_either_word() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    assert_agrees(&p, "i + i * i", "i+(i)*i");
    assert_agrees(&p, "i+i*i", " ( i + i ) * i ");
}

#[test]
fn every_pair_of_words() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    let words = [
        "i", "i+i", "i*i", "(i)", "i+i*i", "(i+i)*i", "i*(i+i)",
        "i+i+i+i", "i*i+i+i", "(i+i)+i+i", "((i))", "i+(i*i)+i",
        "i*i*i", "(i)+(i)", "i+i+(i)",
    ];
    for old in words {
        for new in words {
            assert_agrees(&p, old, new);
        }
    }
}

#[test]
fn edit_out_of_the_language() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    let old_tree = parse(&p, "i+i*i");
    for strategy in STRATEGIES {
        assert!(matches!(p.reparse("i+i*i", &old_tree, "i+*i", strategy),
                         Err(Error::WordNotInLanguage { position: 3, .. })));
        assert!(matches!(p.reparse("i+i*i", &old_tree, "i+i*", strategy),
                         Err(Error::WordNotInLanguage { .. })));
    }
}

#[test]
fn strategy_names() {
    assert_eq!("simple".parse::<Strategy>(), Ok(Strategy::Simple));
    assert_eq!("greedy".parse::<Strategy>(), Ok(Strategy::Greedy));
    assert_eq!(Strategy::Greedy.to_string(), "greedy");
    assert_eq!(Strategy::default(), Strategy::Simple);
    let err = "lazy".parse::<Strategy>().unwrap_err();
    assert_eq!(err.to_string(), "unknown strategy `lazy`, expected `simple` or `greedy`");
}

#[test]
fn long_chains_reparse() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    let old = format!("{}i", "i+".repeat(49_999));
    let new = format!("i*{}", &old[2..]);
    assert_agrees(&p, &old, &new);
}

#[test]
fn dollar_in_the_edited_word() {
    let g = expressions();
    let p = Parser::new(&g).unwrap();
    let old_tree = parse(&p, "i+i");
    for strategy in STRATEGIES {
        match p.reparse("i+i", &old_tree, "i$+i", strategy) {
            Err(Error::WordNotInLanguage { position, found }) => {
                assert_eq!(position, 3);
                assert_eq!(found.as_str(), "+");
            }
            other => panic!("{} reparse accepted `i$+i`: {:?}", strategy, other.map(|t| t.word())),
        }
        assert!(matches!(p.reparse("i+i", &old_tree, "i+i$", strategy),
                         Err(Error::WordNotInLanguage { position: 5, .. })));
    }
}
