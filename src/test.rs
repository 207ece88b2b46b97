use insta::assert_snapshot;
use proptest::prelude::*;

use super::*;
use crate::renderer::BUILT_IN_STAGES;

fn init_tracing() {
    _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(true)
        .try_init();
}

fn list_item(bullet: &str, content: &str) -> String {
    format!(
        "<line-height=0%><width=100><align=right>{bullet}</width></align>\n\
         </line-height><indent=120>{content}</indent>"
    )
}

fn everything_on() -> Config {
    let mut config = Config::default();
    config.superscript.render_superscript = true;
    config
}

#[test]
fn render_inline_markup() {
    init_tracing();
    let input = "Some **bold**, *italic* and `code`\n~~gone~~ [link](https://x.io)";
    let output = markdown_to_rich_text(input);
    assert_snapshot!(output, @r###"
    Some <b>bold</b>, <i>italic</i> and <space=0.3em><font="Noto/Noto Mono/NotoMono-Regular"><mark=#0000003C padding="25,25,0,0">code</mark></font><space=0.3em>
    <s>gone</s> <color=#1D7CEAFF><link="https://x.io">link</link></color>
    "###);
}

#[test]
fn render_auto_numbered_list() {
    init_tracing();
    let output = markdown_to_rich_text("1. one\n1. two");
    assert_snapshot!(output, @r###"
    <line-height=0%><width=100><align=right>1.</width></align>
    </line-height><indent=120>one</indent>
    <line-height=0%><width=100><align=right>2.</width></align>
    </line-height><indent=120>two</indent>
    "###);
}

#[test]
fn render_links_inside_lists() {
    init_tracing();
    let output = markdown_to_rich_text("- see [docs](https://a.io) or http://b.io");
    assert_snapshot!(output, @r###"
    <line-height=0%><width=100><align=right>•</width></align>
    </line-height><indent=120>see <color=#1D7CEAFF><link="https://a.io">docs</link></color> or <color=#1D7CEAFF><link="http://b.io">http://b.io</link></color></indent>
    "###);
}

#[test]
fn header_needs_a_space() {
    init_tracing();
    assert_eq!(markdown_to_rich_text("#hashtag"), "#hashtag");

    let mut config = Config::default();
    config.headers.levels = vec![HeaderLevel::new(2.0, true, false, 1.0)];
    assert_eq!(
        markdown_to_rich_text_with_config("# Title\n\nnext", &config),
        "<size=2em><b>Title</b></size>\n<size=1em>\u{200B}</size>\nnext"
    );
}

#[test]
fn underlined_header() {
    init_tracing();
    assert_eq!(
        markdown_to_rich_text("Title\n===\n\ntext"),
        "<size=2em><u><b>Title</b></u></size>\n<size=0.45em>\u{200B}</size>\ntext"
    );
}

#[test]
fn underline_below_an_empty_line() {
    init_tracing();
    assert_eq!(
        markdown_to_rich_text("a\n\n---"),
        "a\n<size=1.7em><u><b></b></u></size>\n<size=0.3em>\u{200B}</size>"
    );
}

#[test]
fn header_content_keeps_inline_markup() {
    init_tracing();
    assert_eq!(
        markdown_to_rich_text("### A *small* header"),
        "<size=1.5em><b>A <i>small</i> header</b></size>"
    );
}

#[test]
fn ordered_list_numbering() {
    init_tracing();
    assert_eq!(
        markdown_to_rich_text("1. a\n1. b\n1. c"),
        [list_item("1.", "a"), list_item("2.", "b"), list_item("3.", "c")].join("\n")
    );
    assert_eq!(
        markdown_to_rich_text("5. a\n5. b"),
        [list_item("5.", "a"), list_item("5.", "b")].join("\n")
    );
}

#[test]
fn autolink_domain_heuristic() {
    init_tracing();
    assert_eq!(
        markdown_to_rich_text("see http://example.com now"),
        "see <color=#1D7CEAFF><link=\"http://example.com\">http://example.com</link></color> now"
    );
    assert_eq!(
        markdown_to_rich_text("see http://examplecom now"),
        "see http://examplecom now"
    );
}

#[test]
fn explicit_link_with_white_links() {
    init_tracing();
    let mut config = Config::default();
    config.links.link_color = Color::WHITE;
    assert_eq!(
        markdown_to_rich_text_with_config("[click](http://x.com)", &config),
        r#"<color=#FFFFFFFF><link="http://x.com">click</link></color>"#
    );
}

#[test]
fn empty_line_before_a_list_becomes_spacing() {
    init_tracing();
    assert_eq!(
        markdown_to_rich_text("text\n\n- a"),
        format!("text\n<size=0.76em>\u{200B}</size>\n{}", list_item("•", "a"))
    );
}

#[test]
fn space_line_before_a_list_is_kept() {
    init_tracing();
    assert_eq!(
        markdown_to_rich_text("text\n \n- a"),
        format!("text\n \n<size=0.76em>\u{200B}</size>\n{}", list_item("•", "a"))
    );
}

#[test]
fn list_followed_by_text() {
    init_tracing();
    assert_eq!(
        markdown_to_rich_text("- a\n\n\ntext\n"),
        format!("{}\n<size=0.76em>\u{200B}</size>\ntext\n", list_item("•", "a"))
    );
}

#[test]
fn escaped_delimiters_render_literally() {
    init_tracing();
    assert_eq!(
        markdown_to_rich_text(r"\*a\* \~~b\~~ \# c \\ d"),
        r"*a* ~~b~~ # c \ d"
    );
    assert_eq!(markdown_to_rich_text(r"\# Not a header"), "# Not a header");
}

#[test]
fn runs_of_indicators() {
    init_tracing();
    assert_eq!(markdown_to_rich_text("*****x***"), "**<i><b>x</b></i>");
    assert_eq!(markdown_to_rich_text("***both***"), "<i><b>both</b></i>");
}

#[test]
fn superscript() {
    init_tracing();
    let config = everything_on();
    assert_eq!(
        markdown_to_rich_text_with_config("E = mc^2", &config),
        "E = mc<sup>2</sup> "
    );
    assert_eq!(
        markdown_to_rich_text_with_config("e^(i pi) and x^y z", &config),
        "e<sup>i pi</sup> and x<sup>y</sup> z"
    );
    assert_eq!(markdown_to_rich_text("E = mc^2"), "E = mc^2");
}

#[test]
fn trailing_newline_is_kept() {
    init_tracing();
    assert_eq!(markdown_to_rich_text("*a*\n"), "<i>a</i>\n");
    assert_eq!(markdown_to_rich_text("*a*"), "<i>a</i>");
}

#[test]
fn preprocessor_can_exempt_lines() {
    init_tracing();
    let mut builder = RendererBuilder::with_config(everything_on());
    builder.preprocessor(|line: &mut LineBuffer| {
        if line.starts_with("raw:") {
            line.disable_future_processing();
        }
    });
    let input = "raw: # **a** `b` [c](d) ^e\n# **a**";
    assert_eq!(
        markdown_to_rich_text_with_builder(input, builder),
        "raw: # **a** `b` [c](d) ^e\n<size=2em><u><b><b>a</b></b></u></size>\n<size=0.45em>\u{200B}</size>"
    );
}

proptest! {
    #[test]
    fn disabled_lines_are_never_touched(
        text in prop::collection::vec("[^\n]{0,30}", 1..6)
    ) {
        let config = everything_on();
        let mut lines = text.iter().map(LineBuffer::new).collect::<Vec<_>>();
        for line in &mut lines {
            line.disable_future_processing();
        }
        let expected = lines.clone();

        for stage in BUILT_IN_STAGES {
            stage.process(&mut lines, &config);
        }
        prop_assert_eq!(lines, expected);
    }

    #[test]
    fn stages_ignore_text_without_trigger_characters(
        text in prop::collection::vec("[a-zA-Z0-9 ,;:!?'\"]{0,30}", 1..6)
    ) {
        let config = everything_on();
        let expected = text.iter().map(LineBuffer::new).collect::<Vec<_>>();

        for stage in BUILT_IN_STAGES {
            let mut lines = expected.clone();
            stage.process(&mut lines, &config);
            prop_assert_eq!(&lines, &expected, "{} changed plain text", stage.name());
        }
    }
}
