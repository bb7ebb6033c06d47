mod common;

use anyhow::Result;
use toc::{
    Document, ListKind, Locale, NoControllers, Page, TocConfig, TocError, TocItem, TocWidget,
};

fn guide_page() -> Result<Page> {
    let content = std::fs::read_to_string(common::fixture("guide.md"))?;
    let (doc, _) = Document::from_markdown(&content);
    Ok(Page::new(doc))
}

fn widget(config: TocConfig) -> TocWidget {
    TocWidget::connect(config, Locale::new("en"), &mut NoControllers)
}

#[test]
fn test_guide_builds_nested_list() -> Result<()> {
    common::init_logging();
    let mut page = guide_page()?;
    let mut toc = widget(TocConfig {
        levels: "1,2,3".to_string(),
        ..TocConfig::with_src("main .content")
    });

    let view = toc.render(&mut page)?;
    assert_eq!(view.kind, ListKind::Headings);

    let ids: Vec<&str> = view.links().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["h1-0", "install", "h2-2", "h3-3", "h2-4", "h1-5", "h2-6"]
    );
    let content = view.content.as_ref().expect("source mode renders content");
    assert_eq!(content.depths(), vec![0, 1, 1, 2, 1, 0, 1]);

    // ids were written back to the headings
    let doc = page.document();
    for id in ids {
        let heading = doc.get_element_by_id(id).expect("heading carries its id");
        assert!(doc.data(heading, "lvl").is_some());
    }
    Ok(())
}

#[test]
fn test_default_levels_skip_h3() -> Result<()> {
    let mut page = guide_page()?;
    let mut toc = widget(TocConfig::with_src("article"));
    let view = toc.render(&mut page)?;

    let texts: Vec<&str> = view.links().iter().map(|l| l.text.as_str()).collect();
    assert!(!texts.contains(&"Environment variables"));
    assert_eq!(texts.len(), 6);
    Ok(())
}

#[test]
fn test_digit_and_tag_levels_render_identically() -> Result<()> {
    let mut first_page = guide_page()?;
    let mut second_page = guide_page()?;

    let digits = widget(TocConfig {
        levels: "1,2".to_string(),
        ..TocConfig::with_src("article")
    })
    .render(&mut first_page)?;
    let tags = widget(TocConfig {
        levels: "H1,H2".to_string(),
        ..TocConfig::with_src("article")
    })
    .render(&mut second_page)?;

    assert_eq!(digits, tags);
    Ok(())
}

#[test]
fn test_html_output() -> Result<()> {
    let mut page = guide_page()?;
    let mut toc = widget(TocConfig {
        levels: "H1,H2,H3".to_string(),
        ..TocConfig::with_src("article")
    });
    let html = toc.render(&mut page)?.to_html();

    assert!(html.starts_with(
        "<nav role=\"navigation\" aria-label=\"Table Of Contents\" class=\"toc\">"
    ));
    assert!(html.contains("<ul class=\"content\">"));
    assert!(html.contains("<li data-lvl=\"2\"><a href=\"#install\">Installation</a></li>"));
    assert!(html.contains("<li data-lvl=\"3\"><a href=\"#h3-3\">Environment variables</a></li>"));
    assert_eq!(html.matches("<ul").count(), 4);
    assert_eq!(html.matches("</ul>").count(), 4);
    Ok(())
}

#[test]
fn test_items_render_flat_list_in_order() -> Result<()> {
    let mut page = guide_page()?;
    let mut toc = widget(TocConfig::with_items(vec![
        TocItem::new("a", "Intro"),
        TocItem::new("b", "Next"),
    ]));
    let view = toc.render(&mut page)?;

    assert_eq!(view.kind, ListKind::Items);
    let content = view.content.as_ref().expect("items mode renders content");
    assert_eq!(content.depths(), vec![0, 0]);
    let hrefs: Vec<String> = view.links().iter().map(|l| l.href()).collect();
    assert_eq!(hrefs, vec!["#a", "#b"]);

    let html = view.to_html();
    assert!(html.contains("<a class=\"toc-item\" data-dest=\"a\" href=\"#a\">Intro</a>"));
    assert!(html.contains("<a class=\"toc-item\" data-dest=\"b\" href=\"#b\">Next</a>"));
    Ok(())
}

#[test]
fn test_unresolved_selector_names_selector() -> Result<()> {
    let mut page = guide_page()?;
    let mut toc = widget(TocConfig::with_src("#sidebar"));
    match toc.render(&mut page) {
        Err(TocError::SourceNotFound { selector }) => assert_eq!(selector, "#sidebar"),
        other => panic!("expected SourceNotFound, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_invalid_selector_is_config_error() -> Result<()> {
    let mut page = guide_page()?;
    let mut toc = widget(TocConfig::with_src("main > article"));
    let err = toc.render(&mut page).unwrap_err();
    assert!(err.is_config_error());
    Ok(())
}

#[test]
fn test_repeated_render_is_stable() -> Result<()> {
    let mut page = guide_page()?;
    let mut toc = widget(TocConfig::with_src("article"));
    let first = toc.render(&mut page)?;
    let second = toc.render(&mut page)?;
    assert_eq!(first, second);
    Ok(())
}
