//! @ai:module:intent Micro-grammars embedded in tag text: type lists, path templates, parameter lists
//! @ai:module:layer domain
//! @ai:module:public_api split_type_list, path_placeholders, parse_parameter_list, list_values, split_name_options, nickname, ParameterListMatch
//! @ai:module:stateless true

use regex::Regex;
use std::sync::LazyLock;

/// Name of the placeholder every path template may end with; never a user parameter.
pub const FORMAT_PLACEHOLDER: &str = "format_type";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?P<name>[^}]+)\}").expect("Invalid regex"));

static PARAMETER_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\A\[(?P<type>\w*)\]\s*(?P<name>\w*)(?P<required>\(required\))?\s*(?P<description>.*)\n(?P<values>[\s\S]*)\z",
    )
    .expect("Invalid regex")
});

static FORMAT_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.?\{format_type\}").expect("Invalid regex"));

static NICKNAME_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_:]+").expect("Invalid regex"));

/// @ai:intent Pieces of a raw type annotation such as `Array<Widget>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeFragments<'a> {
    pub name: &'a str,
    pub array: bool,
}

/// @ai:intent Captures of the `@parameter_list` shorthand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterListMatch<'a> {
    pub type_name: &'a str,
    pub name: &'a str,
    pub required: bool,
    pub description: &'a str,
    pub values: Vec<String>,
}

/// @ai:intent Split a raw type annotation on `<` and `>`
/// @ai:post array is true iff some fragment equals "array" ignoring case; name is the last fragment
/// @ai:post input without `<`/`>` is returned verbatim as a non-array name
/// @ai:example "Array<Widget>" -> name "Widget", array true
/// @ai:effects pure
pub fn split_type_list(raw: &str) -> TypeFragments<'_> {
    if !raw.contains(['<', '>']) {
        return TypeFragments {
            name: raw,
            array: false,
        };
    }

    let fragments: Vec<&str> = raw
        .split(['<', '>'])
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();

    TypeFragments {
        name: fragments.last().copied().unwrap_or(""),
        array: fragments.iter().any(|f| f.eq_ignore_ascii_case("array")),
    }
}

/// @ai:intent Extract `{placeholder}` names from a path template, in template order
/// @ai:post the format placeholder is never returned
/// @ai:effects pure
pub fn path_placeholders(path: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .captures_iter(path)
        .filter_map(|c| c.name("name"))
        .map(|m| m.as_str())
        .filter(|name| *name != FORMAT_PLACEHOLDER)
        .collect()
}

/// @ai:intent Match the `@parameter_list` shorthand
/// @ai:pre text spans at least two lines; the first carries `[Type] name(required)? description`
/// @ai:post None when the text does not fit the grammar
/// @ai:effects pure
pub fn parse_parameter_list(text: &str) -> Option<ParameterListMatch<'_>> {
    let captures = PARAMETER_LIST_RE.captures(text)?;
    let group = |name: &str| captures.name(name).map(|m| m.as_str()).unwrap_or("");

    Some(ParameterListMatch {
        type_name: group("type"),
        name: group("name"),
        required: captures.name("required").is_some(),
        description: group("description").trim(),
        values: list_values(group("values")),
    })
}

/// @ai:intent Split the remainder of a parameter list on `[List]` markers
/// @ai:example " 1\n[List] 2" -> ["1", "2"]
/// @ai:effects pure
pub fn list_values(list: &str) -> Vec<String> {
    list.split("[List]")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// @ai:intent Split a tag name slot like `status(required, body)` into name and options
/// @ai:effects pure
pub fn split_name_options(raw: &str) -> (&str, Vec<&str>) {
    let mut parts = raw.split(['(', ')']);
    let name = parts.next().unwrap_or("").trim();
    let options = parts
        .next()
        .map(|opts| {
            opts.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    (name, options)
}

/// @ai:intent Derive an operation nickname from its path template and method
/// @ai:example ("/accounts/{account_id}.{format_type}", "PUT") -> "accounts-account_idput"
/// @ai:effects pure
pub fn nickname(path: &str, http_method: &str) -> String {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = FORMAT_SUFFIX_RE.replace_all(path, "");
    let slug = NICKNAME_SEPARATOR_RE.replace_all(&path, "-");

    format!("{}{}", slug.trim_matches('-'), http_method.to_lowercase())
}
