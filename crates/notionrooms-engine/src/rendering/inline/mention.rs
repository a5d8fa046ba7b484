//! Mentions: link previews, page and database references, users and dates.

use super::{annotate, wrap_link};
use crate::model::{LinkMention, Mention, RichText};
use crate::rendering::RenderOptions;
use crate::rendering::format::format_date_range;
use crate::rendering::html::{escape, hostname, truncate, url_attr};

/// Characters of a link title shown in the compact card.
const CARD_TITLE_BUDGET: usize = 30;

pub fn render_mention(mention: &Mention, span: &RichText, options: &RenderOptions) -> String {
    match mention {
        Mention::LinkMention { link_mention } => render_link_card(link_mention),
        Mention::LinkPreview { link_preview } => render_link_card(&LinkMention {
            href: link_preview.url.clone(),
            ..LinkMention::default()
        }),
        Mention::Page { page: target } | Mention::Database { database: target } => {
            let html = annotate(&span.plain_text, &span.annotations, None);
            let inner = format!("<span class=\"page-mention\">{html}</span>");
            wrap_link(&options.page_url(&target.id), inner)
        }
        Mention::User { user } => {
            let name = user
                .name
                .as_deref()
                .map(|name| format!("@{name}"))
                .unwrap_or_else(|| span.plain_text.clone());
            format!(
                "<span class=\"user-mention\">{}</span>",
                annotate(&name, &span.annotations, None)
            )
        }
        Mention::Date { date } => {
            let formatted = format_date_range(date);
            let text = if formatted.is_empty() {
                span.plain_text.as_str()
            } else {
                formatted.as_str()
            };
            format!(
                "<span class=\"date-mention\">{}</span>",
                annotate(text, &span.annotations, None)
            )
        }
        Mention::Other => annotate(&span.plain_text, &span.annotations, span.link()),
    }
}

/// Compact card (icon, domain, shortened title) with a hover box holding
/// the thumbnail, full title and description. Missing parts are omitted.
fn render_link_card(link: &LinkMention) -> String {
    let href = url_attr(&link.href);
    let domain = hostname(&link.href).unwrap_or_else(|| link.href.clone());
    let title = link.title.as_deref().unwrap_or(&domain);

    let icon = link
        .icon_url
        .as_deref()
        .map(|url| {
            format!(
                "<img class=\"link-preview-icon\" src=\"{}\" alt=\"\">",
                url_attr(url)
            )
        })
        .unwrap_or_default();
    let thumbnail = link
        .thumbnail_url
        .as_deref()
        .map(|url| {
            format!(
                "<img class=\"link-preview-thumbnail\" src=\"{}\" alt=\"\">",
                url_attr(url)
            )
        })
        .unwrap_or_default();
    let description = link
        .description
        .as_deref()
        .filter(|text| !text.is_empty())
        .map(|text| {
            format!(
                "<span class=\"link-preview-description\">{}</span>",
                escape(text)
            )
        })
        .unwrap_or_default();

    format!(
        "<span class=\"link-preview-hover\">\
         <a class=\"link-preview\" href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\">\
         {icon}<span class=\"link-preview-domain\">{domain}</span>\
         <span class=\"link-preview-title\">{short}</span></a>\
         <span class=\"hover-box\">{thumbnail}\
         <span class=\"link-preview-full-title\">{full}</span>{description}\
         <span class=\"link-preview-footer\">{icon}<span>{domain}</span></span>\
         </span></span>",
        domain = escape(&domain),
        short = escape(&truncate(title, CARD_TITLE_BUDGET)),
        full = escape(title),
    )
}
