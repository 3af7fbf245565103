//! Framework template definitions.
//!
//! Templates are stored as `(name, content)` pairs for registration with
//! the environment. User templates registered under the same name replace
//! them.

use trestle_compose::{DEFAULT_SORTLINK_TEMPLATE, DEFAULT_TABLE_TEMPLATE};

/// Framework-supplied templates.
///
/// Each entry is `(name, content)`. Names carry the `trestle/` namespace
/// and an `.html` extension so auto-escaping stays on.
pub const FRAMEWORK_TEMPLATES: &[(&str, &str)] = &[
    (DEFAULT_TABLE_TEMPLATE, TABLE_TEMPLATE),
    (DEFAULT_SORTLINK_TEMPLATE, SORTLINK_TEMPLATE),
];

/// Default Bootstrap 4 table template.
///
/// Renders the full table: header row (with sort links for sortable
/// headers), one body row per data row, a trailing action column when any
/// row actions were declared, and a toggle column plus one collapsible
/// extra row per data row when sub-tables were declared.
///
/// Template variables:
/// - `tableid`: process-unique table identifier
/// - `tabledata`: the data rows
/// - `tableheaders`: header objects (`key`, `text`, `sortable`,
///   `container_classname`, `has_body`, `cell(row, index)`)
/// - `tablerowactions`: action objects (`classname`, `text`, `url(row)`)
/// - `subtables`: sub-table objects (`render(row, index)`)
/// - `tablecolspan`: column count including the extra columns
/// - `collapseclass`: extra class for the collapsible rows
/// - `subtabletoggletext`: link text for the sub-table toggle
const TABLE_TEMPLATE: &str = r##"<table class="table">
  <thead>
    <tr>
      {%- for header in tableheaders %}
      <th scope="col"{% if header.container_classname %} class="{{ header.container_classname }}"{% endif %}>
        {%- if header.sortable and header.key %}{{ sortlink(key=header.key, text=header.text) }}{% else %}{{ header.text }}{% endif -%}
      </th>
      {%- endfor %}
      {%- if tablerowactions %}
      <th scope="col" class="text-right"></th>
      {%- endif %}
      {%- if subtables %}
      <th scope="col"></th>
      {%- endif %}
    </tr>
  </thead>
  <tbody>
    {%- for tablerow in tabledata %}
    {%- set rowloop = loop %}
    <tr>
      {%- for header in tableheaders %}
      <td>{% if header.has_body %}{{ header.cell(tablerow, rowloop.index) }}{% else %}{{ tablerow | get_attr_or_item(header.key) }}{% endif %}</td>
      {%- endfor %}
      {%- if tablerowactions %}
      <td class="text-right">
        {%- for action in tablerowactions %}
        <a href="{{ action.url(tablerow) }}"{% if action.classname and not action.text %} title="{{ action.view }}"{% endif %}>
          {%- if action.classname %}<i class="{{ action.classname }}"></i>{% endif %}
          {%- if action.text %}{{ action.text }}{% endif -%}
        </a>
        {%- endfor %}
      </td>
      {%- endif %}
      {%- if subtables %}
      <td>
        <a data-toggle="collapse" href="#subtable-{{ tableid }}-{{ rowloop.index }}" role="button">{{ subtabletoggletext }}</a>
      </td>
      {%- endif %}
    </tr>
    {%- if subtables %}
    <tr class="collapse{% if collapseclass %} {{ collapseclass }}{% endif %}" id="subtable-{{ tableid }}-{{ rowloop.index }}">
      <td colspan="{{ tablecolspan }}">
        {%- for sub in subtables %}
        {{ sub.render(tablerow, rowloop.index) }}
        {%- endfor %}
      </td>
    </tr>
    {%- endif %}
    {%- endfor %}
  </tbody>
</table>
"##;

/// Default Bootstrap 4 sort-link template.
///
/// Template variables:
/// - `ordering`: `"asc"`, `"desc"`, or none when the column is unsorted
/// - `text`: the display label
/// - `url`: the outbound link carrying the candidate next sort key
const SORTLINK_TEMPLATE: &str = r##"<a class="text-nowrap{% if ordering %} sorted-{{ ordering }}{% endif %}" href="{{ url }}">{{ text }}{% if ordering == "asc" %} <span aria-hidden="true">&#9650;</span>{% elif ordering == "desc" %} <span aria-hidden="true">&#9660;</span>{% endif %}</a>
"##;
