use prettytree::{
    pretty_print_with, Color, Doc, DocArena, HNode, HNodeEncoder, PrintOptions, Record,
};

fn pp(node: &HNode, width: usize) -> String {
    let mut out = Vec::new();
    pretty_print_with(node, &mut out, width, &PrintOptions::default()).unwrap();
    String::from_utf8(out).unwrap()
}

fn pp_styled(node: &HNode, width: usize) -> String {
    let opts = PrintOptions {
        use_styles: true,
        ..PrintOptions::default()
    };
    let mut out = Vec::new();
    pretty_print_with(node, &mut out, width, &opts).unwrap();
    String::from_utf8(out).unwrap()
}

fn strip_styles(s: &str) -> String {
    let mut out = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn digits(n: usize) -> HNode {
    HNode::Array {
        children: (1..=n)
            .map(|i| HNode::leaf(i.to_string(), Color::OtherConst))
            .collect(),
    }
}

fn sample_tree() -> HNode {
    Record::new("Module")
        .field("name", HNode::leaf("main", Color::StringConst))
        .field(
            "body",
            HNode::Array {
                children: vec![
                    Record::new("Assign")
                        .field("lhs", HNode::leaf("x", Color::StringConst))
                        .field("rhs", HNode::leaf("42", Color::OtherConst))
                        .into(),
                    Record::new("Return")
                        .field("value", HNode::leaf("x", Color::External))
                        .into(),
                    HNode::AlreadySeen { heap_id: 0xbeef },
                ],
            },
        )
        .into()
}

#[test]
fn leaf_prints_bare() {
    let node = HNode::leaf("hello", Color::OtherConst);
    assert_eq!(pp(&node, 80), "hello\n");
}

#[test]
fn leaf_quotes_when_needed() {
    assert_eq!(pp(&HNode::leaf("has space", Color::OtherConst), 80), "\"has space\"\n");
    assert_eq!(pp(&HNode::leaf("", Color::OtherConst), 80), "\"\"\n");
}

#[test]
fn small_array_fits_flat() {
    assert_eq!(pp(&digits(3), 80), "[1 2 3]\n");
}

#[test]
fn narrow_array_breaks_one_per_line() {
    assert_eq!(pp(&digits(3), 3), "[\n    1\n    2\n    3\n]\n");
}

#[test]
fn empty_array() {
    assert_eq!(pp(&HNode::Array { children: vec![] }, 80), "[]\n");
}

#[test]
fn record_fits_flat() {
    let node: HNode = Record::new("Op")
        .field("name", HNode::leaf("x", Color::OtherConst))
        .into();
    assert_eq!(pp(&node, 80), "(Op name:x)\n");
}

#[test]
fn record_breaks_fields_onto_indented_lines() {
    let node: HNode = Record::new("Op")
        .field("a", HNode::leaf("1", Color::OtherConst))
        .field("b", HNode::leaf("2", Color::OtherConst))
        .into();
    assert_eq!(pp(&node, 10), "(Op\n    a:1\n    b:2\n)\n");
}

#[test]
fn fieldless_records() {
    let named: HNode = Record::new("Op").into();
    assert_eq!(pp(&named, 80), "(Op)\n");

    let anonymous: HNode = Record {
        node_type: String::new(),
        left: "(".to_string(),
        right: ")".to_string(),
        fields: vec![],
        unnamed_fields: vec![],
    }
    .into();
    assert_eq!(pp(&anonymous, 80), "()\n");
}

#[test]
fn record_with_unnamed_fields() {
    let mut record = Record::new("Token");
    record.unnamed_fields = vec![
        HNode::leaf("x", Color::OtherConst),
        HNode::leaf("y", Color::OtherConst),
    ];
    assert_eq!(pp(&record.into(), 80), "(Token x y)\n");
}

#[test]
fn back_reference_prints_as_hex_id() {
    assert_eq!(pp(&HNode::AlreadySeen { heap_id: 255 }, 80), "...0xff\n");
    assert_eq!(pp(&HNode::AlreadySeen { heap_id: 0 }, 80), "...0x0\n");
}

#[test]
fn styles_wrap_leaves_in_sgr_escapes() {
    let node = HNode::leaf("x", Color::OtherConst);
    assert_eq!(pp_styled(&node, 80), "\x1b[32mx\x1b[0;0m\n");

    let external = HNode::leaf("x", Color::External);
    assert_eq!(pp_styled(&external, 80), "\x1b[1m\x1b[34mx\x1b[0;0m\n");
}

#[test]
fn styles_never_change_layout() {
    let node = sample_tree();
    for width in [5, 20, 40, 80] {
        assert_eq!(
            strip_styles(&pp_styled(&node, width)),
            pp(&node, width),
            "width {width}"
        );
    }
}

#[test]
fn wide_enough_output_is_one_line() {
    let node = sample_tree();
    let out = pp(&node, 10_000);
    assert_eq!(
        out,
        "(Module name:main body:[(Assign lhs:x rhs:42) (Return value:x) ...0xbeef])\n"
    );
}

#[test]
fn tabular_pads_columns_when_broken() {
    let arena = DocArena::new();
    let mut encoder = HNodeEncoder::new(&arena);
    encoder.set_use_styles(false);
    let items = [arena.text("a"), arena.text("bb"), arena.text("ccc")];
    let doc = encoder.tabular(&items, ",");

    let mut flat = String::new();
    doc.render_fmt(80, &mut flat).unwrap();
    assert_eq!(flat, "a, bb, ccc");

    let mut broken = String::new();
    doc.render_fmt(8, &mut broken).unwrap();
    assert_eq!(broken, "a,   bb,\nccc");
}

#[test]
fn tabular_form_disabled_for_wide_items() {
    let arena = DocArena::new();
    let mut encoder = HNodeEncoder::new(&arena);
    encoder.set_max_tabular_width(3);
    let items = [arena.text("aaaa"), arena.text("b")];
    let doc = encoder.tabular(&items, "");
    assert!(matches!(doc.doc(), Doc::Concat(_)));

    encoder.set_max_tabular_width(22);
    let doc = encoder.tabular(&items, "");
    assert!(matches!(doc.doc(), Doc::Group(_)));
}

#[test]
fn indent_step_is_configurable() {
    let node = digits(3);
    let arena = DocArena::new();
    let mut encoder = HNodeEncoder::new(&arena);
    encoder.set_use_styles(false);
    encoder.set_indent(2);
    let doc = encoder.hnode(&node);
    let mut s = String::new();
    doc.render_fmt(3, &mut s).unwrap();
    assert_eq!(s, "[\n  1\n  2\n  3\n]");
}

#[test]
fn doc_debug_prints_the_document_tree_first() {
    let node = HNode::leaf("x", Color::OtherConst);
    let opts = PrintOptions {
        doc_debug: true,
        ..PrintOptions::default()
    };
    let mut out = Vec::new();
    pretty_print_with(&node, &mut out, 80, &opts).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "(Text s:x)\nx\n");
}

#[test]
fn perf_stats_do_not_disturb_output() {
    let opts = PrintOptions {
        perf_stats: true,
        ..PrintOptions::default()
    };
    let mut out = Vec::new();
    pretty_print_with(&sample_tree(), &mut out, 80, &opts).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), pp(&sample_tree(), 80));
}

#[test]
fn nested_records_break_outside_in() {
    let inner: HNode = Record::new("Pair")
        .field("x", HNode::leaf("1", Color::OtherConst))
        .field("y", HNode::leaf("2", Color::OtherConst))
        .into();
    let node: HNode = Record::new("Wrap").field("p", inner).into();
    assert_eq!(pp(&node, 80), "(Wrap p:(Pair x:1 y:2))\n");
    assert_eq!(pp(&node, 20), "(Wrap\n    p:(Pair x:1 y:2)\n)\n");
}
