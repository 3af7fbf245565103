//! End-to-end tests over rendered HTML: the default templates, sort links,
//! actions, and nested sub-tables working together.

use std::sync::Arc;

use minijinja::Value;

use trestle::prelude::*;
use trestle::views::SortedView;

fn people() -> Value {
    Value::from_serialize(&serde_json::json!([
        {"id": 1, "first_name": "John", "last_name": "Doe",
         "favorite_foods": ["Pizza", "French Fry"]},
        {"id": 2, "first_name": "Jane", "last_name": "Doe",
         "favorite_foods": ["Burger", "Chicken"]},
        {"id": 3, "first_name": "Zach", "last_name": "Perkitny",
         "favorite_foods": ["Egg", "Salmon"]},
    ]))
}

fn tables() -> Tables {
    Tables::builder()
        .routes(RouteTable::new().route("person-edit", "/people/{}/edit"))
        .build()
        .unwrap()
}

fn root() -> Arc<Scope> {
    Arc::new(Scope::new())
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn renders_headers_and_rows() {
    let block = Block::new()
        .header(Header::new().key("first_name"))
        .header(Header::new().key("last_name"));

    let html = tables()
        .render(&people(), &block, &TableOptions::new(), &root())
        .unwrap();

    assert_eq!(count(&html, "<th scope=\"col\""), 2);
    assert_eq!(count(&html, "<tr>"), 4); // header row + 3 data rows
    assert_eq!(count(&html, "<td>"), 6);
    assert!(html.contains("First Name"));
    assert!(html.contains("<td>Zach</td>"));
}

#[test]
fn untaken_conditional_branch_renders_nothing() {
    let block = Block::new()
        .header(Header::new().key("first_name"))
        .when(Condition::when(
            "show_last_name",
            Block::new().header(Header::new().key("last_name")),
        ));

    let scope = Arc::new(Scope::new().with("show_last_name", Value::from(false)));
    let html = tables()
        .render(&people(), &block, &TableOptions::new(), &scope)
        .unwrap();

    // Last Name neither in the header row nor in the body rows.
    assert_eq!(count(&html, "<th scope=\"col\""), 1);
    assert_eq!(count(&html, "<td>"), 3);
    assert!(!html.contains("Last Name"));
}

#[test]
fn header_body_renders_custom_cell_content() {
    let block = Block::new().header(
        Header::new()
            .text("Name")
            .body("<span>{{ tablerow.first_name }} {{ tablerow.last_name }}</span>"),
    );

    let html = tables()
        .render(&people(), &block, &TableOptions::new(), &root())
        .unwrap();

    assert_eq!(count(&html, "<span>"), 3);
    assert!(html.contains("<span>Jane Doe</span>"));
}

#[test]
fn row_actions_add_a_column_with_icons() {
    let block = Block::new()
        .header(Header::new().key("first_name"))
        .header(Header::new().key("last_name"))
        .row_action(
            RowAction::view("person-edit")
                .args(["id"])
                .classname("fa fa-something"),
        );

    let html = tables()
        .render(&people(), &block, &TableOptions::new(), &root())
        .unwrap();

    // Action column adds a header cell.
    assert_eq!(count(&html, "<th scope=\"col\""), 3);
    assert_eq!(count(&html, "<i class=\"fa fa-something\"></i>"), 3);
    assert!(html.contains("href=\"/people/2/edit\""));
}

#[test]
fn subtables_double_the_body_rows() {
    let block = Block::new()
        .header(Header::new().key("first_name"))
        .header(Header::new().key("last_name"))
        .subtable(Subtable::table(NestedTable::new(
            "tablerow.favorite_foods",
            Block::new().header(Header::new().text("Name").body("{{ tablerow }}")),
        )));

    let html = tables()
        .render(&people(), &block, &TableOptions::new(), &root())
        .unwrap();

    // Toggle column adds a header cell to the outer table; each data row
    // gains a collapsible sibling carrying the nested table.
    let outer_head = &html[..html.find("<tbody>").unwrap()];
    assert_eq!(count(outer_head, "<th scope=\"col\""), 3);
    assert_eq!(count(&html, "View Details"), 3);
    assert_eq!(count(&html, "<tr class=\"collapse\""), 3);
    assert_eq!(count(&html, "<table class=\"table\">"), 4);
    assert!(html.contains("<td>Burger</td>"));

    // colspan covers every column including the extras.
    assert_eq!(count(&html, "colspan=\"3\""), 3);
}

#[test]
fn subtable_toggle_ids_match_their_rows() {
    let block = Block::new()
        .header(Header::new().key("first_name"))
        .subtable(Subtable::fragment("<p>{{ tablerow.first_name }}</p>"));

    let html = tables()
        .render(&people(), &block, &TableOptions::new(), &root())
        .unwrap();

    assert_eq!(count(&html, "href=\"#subtable-"), 3);
    for (at, _) in html.match_indices("href=\"#subtable-") {
        let rest = &html[at + 6..]; // from the '#'
        let anchor = &rest[1..rest.find('"').unwrap()];
        assert!(
            html.contains(&format!("id=\"{}\"", anchor)),
            "toggle target {} should exist",
            anchor
        );
    }
}

#[test]
fn collapse_class_option_lands_on_collapsible_rows() {
    let block = Block::new()
        .header(Header::new().key("first_name"))
        .subtable(Subtable::fragment("x"));

    let html = tables()
        .render(
            &people(),
            &block,
            &TableOptions::new()
                .collapse_class("bg-light")
                .toggle_text("More"),
            &root(),
        )
        .unwrap();

    assert_eq!(count(&html, "<tr class=\"collapse bg-light\""), 3);
    assert_eq!(count(&html, ">More</a>"), 3);
}

#[test]
fn sortable_header_renders_a_toggling_link() {
    struct Page;
    impl SortedView for Page {}

    let params = QueryParams::parse("sort=-age&page=2");
    let scope = Page
        .contribute_context(&params, Scope::new())
        .with("request", RequestInfo::new("/people", params).into_value());
    let scope = Arc::new(scope);

    let block = Block::new()
        .header(Header::new().key("age").sortable(true))
        .header(Header::new().key("first_name"));

    let html = tables()
        .render(&people(), &block, &TableOptions::new(), &scope)
        .unwrap();

    // Descending now; the link offers ascending and keeps the page param.
    assert!(html.contains("sorted-desc"));
    assert!(html.contains("href=\"?sort=age&amp;page=2\""));
    assert!(html.contains(">Age"));
    // The non-sortable header renders as plain text.
    assert!(!html.contains("?sort=first_name"));
}

#[test]
fn unsorted_sortable_header_links_ascending_first() {
    let block = Block::new().header(Header::new().key("age").sortable(true));
    let html = tables()
        .render(&people(), &block, &TableOptions::new(), &root())
        .unwrap();

    assert!(html.contains("href=\"?sort=age\""));
    assert!(!html.contains("sorted-asc"));
    assert!(!html.contains("sorted-desc"));
}

#[test]
fn values_are_html_escaped() {
    let data = Value::from_serialize(&serde_json::json!([
        {"first_name": "<script>alert(1)</script>"},
    ]));
    let block = Block::new().header(Header::new().key("first_name"));

    let html = tables()
        .render(&data, &block, &TableOptions::new(), &root())
        .unwrap();

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn custom_table_template_by_name() {
    let tables = Tables::builder()
        .template("compact.html", "{{ tableheaders | length }}x{{ tabledata | length }}")
        .build()
        .unwrap();

    let block = Block::new()
        .header(Header::new().key("first_name"))
        .header(Header::new().key("last_name"));
    let html = tables
        .render(
            &people(),
            &block,
            &TableOptions::new().template_name("compact.html"),
            &root(),
        )
        .unwrap();

    assert_eq!(html, "2x3");
}

#[test]
fn missing_data_source_fails_before_rendering() {
    let err = tables()
        .render(
            &Value::UNDEFINED,
            &Block::new(),
            &TableOptions::new(),
            &root(),
        )
        .unwrap_err();
    assert!(matches!(err, ComposeError::MissingArgument(_)));
}
