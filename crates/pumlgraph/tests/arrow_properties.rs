//! Property tests over generated arrow spellings

use proptest::prelude::*;
use pumlgraph::parse;
use pumlgraph::prelude::*;

fn direction() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(""),
        Just("up"),
        Just("down"),
        Just("left"),
        Just("right"),
    ]
}

fn entity_name() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9_]{0,12}".prop_filter("keywords are not entity names", |name| {
        !matches!(
            name.as_str(),
            "class" | "interface" | "package" | "abstract" | "extends" | "implements"
        )
    })
}

proptest! {
    #[test]
    fn left_inheritance_arrows_always_mean_extends(dir in direction()) {
        let source = format!("class A\nclass B\nA <|{}-- B", dir);
        let nodes = parse(&source).unwrap();
        let a = nodes.search_by_name("A").unwrap();
        let b = nodes.search_by_name("B").unwrap();
        prop_assert_eq!(&nodes.get(b).parents, &vec![a]);
        prop_assert!(nodes.get(b).interfaces.is_empty());
    }

    #[test]
    fn left_realization_arrows_always_mean_implements(dir in direction()) {
        let source = format!("interface I\nclass B\nI <|{}.. B", dir);
        let nodes = parse(&source).unwrap();
        let i = nodes.search_by_name("I").unwrap();
        let b = nodes.search_by_name("B").unwrap();
        prop_assert_eq!(&nodes.get(b).interfaces, &vec![i]);
    }

    #[test]
    fn right_arrows_match_their_keyword_spelling(dir in direction(), dotted in any::<bool>()) {
        let (arrow, keyword) = if dotted {
            (format!(".{}.|>", dir), "implements")
        } else {
            (format!("-{}-|>", dir), "extends")
        };
        let via_arrow = parse(&format!("class A\nclass B\nB {} A", arrow)).unwrap();
        let via_keyword = parse(&format!("class A\nclass B\nB {} A", keyword)).unwrap();

        let b_arrow = via_arrow.get(via_arrow.search_by_name("B").unwrap());
        let b_keyword = via_keyword.get(via_keyword.search_by_name("B").unwrap());
        prop_assert_eq!(&b_arrow.parents, &b_keyword.parents);
        prop_assert_eq!(&b_arrow.interfaces, &b_keyword.interfaces);
    }

    #[test]
    fn declared_names_always_resolve(name in entity_name()) {
        let source = format!("class {}\nclass Child\nChild extends {}", name, name);
        let nodes = parse(&source).unwrap();
        let parent = nodes.search_by_name(&name).unwrap();
        let child = nodes.get(nodes.search_by_name("Child").unwrap());
        prop_assert_eq!(&child.parents, &vec![parent]);
    }

    #[test]
    fn registry_iterates_in_declaration_order(names in proptest::collection::vec(entity_name(), 1..8)) {
        let source: String = names
            .iter()
            .map(|name| format!("class \"{}\"\n", name))
            .collect();
        let nodes = parse(&source).unwrap();
        let declared: Vec<_> = nodes.iter().map(|n| n.name.clone()).collect();
        prop_assert_eq!(declared, names);
    }
}

#[test]
fn direction_strategy_is_exhaustive() {
    // the five spellings above times two styles cover every documented variant
    let all = ["", "up", "down", "left", "right"];
    for dir in all {
        for style in ["--", ".."] {
            let arrow = format!("<|{}{}", dir, style);
            let source = format!("class A\nclass B\nA {} B", arrow);
            assert!(parse(&source).is_ok(), "arrow {} failed", arrow);
        }
    }
}

#[test]
fn tokens_are_value_objects() {
    let token = Token::new(TokenKind::ElementValue, "A");
    let clone = token.clone();
    assert_eq!(token, clone);
}
