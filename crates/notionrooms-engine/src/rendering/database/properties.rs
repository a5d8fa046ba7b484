use crate::model::{FileRef, Person, PropertyType, PropertyValue, SelectOption};
use crate::rendering::RenderOptions;
use crate::rendering::format::{format_date, format_date_range, format_number};
use crate::rendering::html::{CHECK_ICON, escape, url_attr};
use crate::rendering::inline::render_rich_text;

/// Formats one cell value for display.
///
/// Total over every supported column type: a null value, a value whose shape
/// does not match `kind`, or an unsupported type all format as `""`.
pub fn format_property(
    value: &PropertyValue,
    kind: PropertyType,
    options: &RenderOptions,
) -> String {
    match (kind, value) {
        (PropertyType::Title, PropertyValue::Title { title: text })
        | (PropertyType::RichText, PropertyValue::RichText { rich_text: text }) => {
            render_rich_text(text, options)
        }
        (PropertyType::Number, PropertyValue::Number { number }) => {
            number.map(format_number).unwrap_or_default()
        }
        (PropertyType::Select, PropertyValue::Select { select }) => {
            select.as_ref().map(pill).unwrap_or_default()
        }
        (PropertyType::MultiSelect, PropertyValue::MultiSelect { multi_select }) => {
            multi_select.iter().map(pill).collect()
        }
        (PropertyType::Date, PropertyValue::Date { date }) => {
            date.as_ref().map(format_date_range).unwrap_or_default()
        }
        (PropertyType::CreatedTime, PropertyValue::CreatedTime { created_time: time })
        | (
            PropertyType::LastEditedTime,
            PropertyValue::LastEditedTime {
                last_edited_time: time,
            },
        ) => time.as_deref().map(format_date).unwrap_or_default(),
        (PropertyType::Checkbox, PropertyValue::Checkbox { checkbox }) => checkbox_html(*checkbox),
        (PropertyType::Url, PropertyValue::Url { url }) => url
            .as_deref()
            .map(|url| link(url, url))
            .unwrap_or_default(),
        (PropertyType::Email, PropertyValue::Email { email }) => email
            .as_deref()
            .map(|email| link(&format!("mailto:{email}"), email))
            .unwrap_or_default(),
        (PropertyType::PhoneNumber, PropertyValue::PhoneNumber { phone_number }) => phone_number
            .as_deref()
            .map(|phone| link(&format!("tel:{phone}"), phone))
            .unwrap_or_default(),
        (PropertyType::Files, PropertyValue::Files { files }) => files.iter().map(file).collect(),
        (PropertyType::People, PropertyValue::People { people }) => {
            people.iter().map(person).collect()
        }
        _ => String::new(),
    }
}

/// Select option as a colored pill using the palette tokens.
fn pill(option: &SelectOption) -> String {
    let hue = option.color.hue;
    format!(
        "<span class=\"select-pill\" style=\"color: {}; background-color: {}\">{}</span>",
        hue.text_token(),
        hue.background_token(),
        escape(&option.name)
    )
}

fn checkbox_html(checked: bool) -> String {
    if checked {
        format!("<div class=\"checkbox checked\">{CHECK_ICON}</div>")
    } else {
        "<div class=\"checkbox\"></div>".to_string()
    }
}

fn link(href: &str, text: &str) -> String {
    format!("<a href=\"{}\">{}</a>", url_attr(href), escape(text))
}

fn file(file: &FileRef) -> String {
    let src = url_attr(file.source.url());
    if file.is_image {
        format!(
            "<img class=\"property-image\" src=\"{src}\" alt=\"{}\">",
            escape(&file.name)
        )
    } else {
        format!(
            "<a class=\"property-file\" href=\"{src}\" download>{}</a>",
            escape(&file.name)
        )
    }
}

/// Resolved people show their name and avatar; anything unresolved shows
/// `N/A` and nothing else.
fn person(person: &Person) -> String {
    let Some(name) = person.name.as_deref() else {
        return "<span class=\"person\">N/A</span>".to_string();
    };
    let avatar = person
        .avatar_url
        .as_deref()
        .map(|url| format!("<img class=\"avatar\" src=\"{}\" alt=\"\">", url_attr(url)))
        .unwrap_or_default();
    format!("<span class=\"person\">{avatar}{}</span>", escape(name))
}
