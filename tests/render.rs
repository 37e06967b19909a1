//! End-to-end rendering: tree to buffer to flushed bytes to a terminal
//! emulator.

use pretty_assertions::assert_eq;
use weft::render::{CornerStyle, Corners, EdgeStyle, Edges};
use weft::text::Scroll;
use weft::{
    Buffer, Cell, Contains, Dim, Node, Overflow, Position, Rect, Section, Settings, Size, StyleState,
    TextLayout, Tree,
};

/// Feed every flush into a fresh emulator of the buffer's size.
fn emulate(buffer: &Buffer, flushes: &[&[u8]]) -> vt100::Parser {
    let mut parser = vt100::Parser::new(buffer.height(), buffer.width(), 0);
    for bytes in flushes {
        parser.process(bytes);
    }
    parser
}

fn rows(parser: &vt100::Parser) -> Vec<String> {
    let (_, cols) = parser.screen().size();
    parser
        .screen()
        .rows(0, cols)
        .map(|row| row.trim_end().to_string())
        .collect()
}

fn flush(buffer: &mut Buffer) -> Vec<u8> {
    let mut out = Vec::new();
    buffer.flush(&mut out).unwrap();
    out
}

#[test]
fn test_second_flush_of_unchanged_buffer_is_empty() {
    let mut tree = Tree::new().with_child(Node::new().with_title("t").with_text("body"));
    let mut buffer = Buffer::new(12, 4);
    tree.render(&mut buffer);
    assert!(!flush(&mut buffer).is_empty());

    tree.render(&mut buffer);
    let mut out = Vec::new();
    let result = buffer.flush(&mut out).unwrap();
    assert!(out.is_empty());
    assert!(result.is_empty());
}

#[test]
fn test_single_cell_change_touches_only_that_cell() {
    let mut buffer = Buffer::new(10, 3);
    buffer.view().set_str(0, 0, "abcdefghij", &StyleState::new());
    let first = flush(&mut buffer);

    buffer.set(4, 1, Cell::new("X", &StyleState::new()));
    let second = flush(&mut buffer);
    assert_eq!(String::from_utf8_lossy(&second), "\x1b7\x1b[2;5HX\x1b8");

    let parser = emulate(&buffer, &[&first, &second]);
    assert_eq!(rows(&parser), ["abcdefghij", "    X", ""]);
    assert_eq!(parser.screen().cursor_position(), (0, 0));
}

#[test]
fn test_view_writes_reach_the_terminal() {
    let mut buffer = Buffer::new(8, 3);
    {
        let mut outer = buffer.sub(1, 1, 6, 2);
        let mut inner = outer.sub(2, 0, 4, 1);
        inner.set_str(0, 0, "hey", &StyleState::new());
    }
    assert_eq!(buffer.get(3, 1).map(Cell::symbol), Some("h"));

    let out = flush(&mut buffer);
    assert_eq!(rows(&emulate(&buffer, &[&out])), ["", "   hey", ""]);
}

#[test]
fn test_resolved_rects_stay_inside_container() {
    let dims = [
        Dim::from(0u16),
        Dim::from(3u16),
        Dim::from(25u16),
        Dim::from(0.25f32),
        Dim::from(1.5f32),
        Dim::computed(|total| total / 3),
        Dim::computed(|total| total * 2),
    ];
    for x in &dims {
        for width in &dims {
            let pos = Position { x: x.clone(), y: Dim::from(0u16) };
            let size = Size { width: width.clone(), height: Dim::from(1u16) };
            let rect = Rect::resolve(&pos, &size, 10, 4);
            assert!(rect.left() <= 9, "left {} for {x:?}", rect.left());
            assert!(rect.left() <= rect.right());
            assert!(rect.right() <= 10, "right {} for {x:?} {width:?}", rect.right());
        }
    }
}

#[test]
fn test_wrap_produces_full_width_lines() {
    let width = 7;
    let text = "x".repeat(3 * usize::from(width));
    let block = TextLayout::new(width, 10)
        .with_overflow(Overflow::Wrap, Overflow::Scroll)
        .layout(&text, &mut Scroll::default());

    let filled: Vec<_> = block.lines.iter().filter(|line| !line.is_empty()).collect();
    assert_eq!(filled.len(), 3);
    assert!(filled.iter().all(|line| line.len() == usize::from(width)));
}

fn list_node() -> Node {
    let settings = Settings::new().with_border(false);
    let mut node = Node::new().with_id("list").with_settings(settings).with_contains(Contains::List);
    for i in 0..20 {
        node.write(&format!("e{i}"));
    }
    node
}

#[test]
fn test_list_selection_is_centered() {
    let mut tree = Tree::new().with_child(list_node());
    if let Some(node) = tree.node_mut("list") {
        for _ in 0..10 {
            node.scroll_down();
        }
    }
    let mut buffer = Buffer::new(10, 5);
    tree.render(&mut buffer);
    let out = flush(&mut buffer);
    let parser = emulate(&buffer, &[&out]);
    let screen = parser.screen();

    let row = |r: u16| rows(&parser)[usize::from(r)].chars().take(3).collect::<String>();
    assert_eq!((0..5).map(row).collect::<Vec<_>>(), ["e8", "e9", "e10", "e11", "e12"].map(|s| format!("{s:<3}")));
    assert!(screen.cell(2, 0).is_some_and(vt100::Cell::bold));
    assert!(!screen.cell(1, 0).is_some_and(vt100::Cell::bold));
}

#[test]
fn test_first_entry_selected_sits_at_top() {
    let mut tree = Tree::new().with_child(list_node());
    let mut buffer = Buffer::new(10, 5);
    tree.render(&mut buffer);
    let out = flush(&mut buffer);
    let parser = emulate(&buffer, &[&out]);

    let firsts: Vec<String> = rows(&parser).iter().map(|r| r.chars().take(2).collect()).collect();
    assert_eq!(firsts, ["e0", "e1", "e2", "e3", "e4"]);
    assert!(parser.screen().cell(0, 0).is_some_and(vt100::Cell::bold));
}

#[test]
fn test_markup_colors_reach_the_terminal() {
    let mut node = Node::new().with_settings(Settings::new().with_border(false));
    node.format("[red]err[/] ok").unwrap();
    let mut tree = Tree::new().with_child(node);

    let mut buffer = Buffer::new(8, 1);
    tree.render(&mut buffer);
    let out = flush(&mut buffer);
    let parser = emulate(&buffer, &[&out]);
    let screen = parser.screen();

    assert_eq!(rows(&parser), ["err ok"]);
    assert_eq!(screen.cell(0, 0).map(vt100::Cell::fgcolor), Some(vt100::Color::Idx(1)));
    assert_eq!(screen.cell(0, 4).map(vt100::Cell::fgcolor), Some(vt100::Color::Default));
}

#[test]
fn test_sections_borders_and_wide_text() {
    let left = Node::new()
        .with_title("left")
        .with_size(Size::new(0.5f32, 1.0f32))
        .with_text("日本");
    let right = Node::new()
        .with_settings(
            Settings::new()
                .with_edges(Edges::uniform(EdgeStyle::Double))
                .with_corners(Corners::uniform(CornerStyle::Double)),
        )
        .with_pos(Position::new(0.5f32, 0u16))
        .with_size(Size::new(0.5f32, 1.0f32))
        .with_text("ok");
    let mut tree = Tree::new().with_child(Section::new().with_child(left).with_child(right));

    let mut buffer = Buffer::new(16, 3);
    tree.render(&mut buffer);
    let out = flush(&mut buffer);
    assert_eq!(
        rows(&emulate(&buffer, &[&out])),
        ["┌left──┐╔══════╗", "│日本  │║ok    ║", "└──────┘╚══════╝"]
    );
}

#[test]
fn test_resize_repaints_whole_screen() {
    let mut tree = Tree::new().with_child(Node::new().with_text("hi"));
    let mut buffer = Buffer::new(6, 3);
    tree.render(&mut buffer);
    flush(&mut buffer);

    buffer.resize(8, 3);
    tree.render(&mut buffer);
    let mut out = Vec::new();
    let result = buffer.flush(&mut out).unwrap();
    assert_eq!(result.cells_changed, 24);

    // A fresh terminal sees the complete frame from this flush alone.
    assert_eq!(rows(&emulate(&buffer, &[&out])), ["┌──────┐", "│hi    │", "└──────┘"]);
}

#[test]
fn test_scroll_mutators_respect_overflow() {
    let hidden = Settings::new().with_overflow(Overflow::Hidden, Overflow::Hidden);
    let mut node = Node::new().with_settings(hidden);
    assert!(!node.scroll_down());
    assert!(!node.scroll_right());

    let mut tree = Tree::new().with_child(
        Node::new()
            .with_id("log")
            .with_settings(Settings::new().with_border(false))
            .with_text("one\ntwo\nthree\nfour"),
    );
    if let Some(node) = tree.node_mut("log") {
        assert!(node.scroll_down());
    }
    let mut buffer = Buffer::new(6, 2);
    tree.render(&mut buffer);
    let lines = buffer.to_lines();
    assert!(lines[0].starts_with("two"));
}
