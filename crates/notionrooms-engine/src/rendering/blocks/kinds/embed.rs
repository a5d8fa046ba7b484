//! Embed URL classification.
//!
//! An embed URL is matched against an ordered provider list; the first match
//! decides the iframe source and height, and anything unmatched falls back to
//! a plain iframe of the URL itself. Each provider renders through its own
//! fixed [`FrameTemplate`]: video players fill a 16:9 wrapper, everything else
//! takes a fixed height, and the permission list is per provider.

use std::sync::OnceLock;

use regex::Regex;

use super::text::caption;
use crate::model::RichText;
use crate::rendering::RenderContext;
use crate::rendering::html::{encode_query, escape, safe_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    YouTube,
    Loom,
    Vimeo,
    Twitter,
    Spotify,
    GoogleMaps,
    Figma,
    SoundCloud,
    GoogleSheets,
    Airtable,
    Generic,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::YouTube => "youtube",
            Provider::Loom => "loom",
            Provider::Vimeo => "vimeo",
            Provider::Twitter => "twitter",
            Provider::Spotify => "spotify",
            Provider::GoogleMaps => "google-maps",
            Provider::Figma => "figma",
            Provider::SoundCloud => "soundcloud",
            Provider::GoogleSheets => "google-sheets",
            Provider::Airtable => "airtable",
            Provider::Generic => "generic",
        }
    }

    pub fn is_video(self) -> bool {
        matches!(self, Provider::YouTube | Provider::Loom | Provider::Vimeo)
    }

    /// The provider's fixed frame markup.
    pub fn template(self) -> FrameTemplate {
        match self {
            Provider::YouTube => FrameTemplate::responsive(
                "frameborder=\"0\" allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\" allowfullscreen",
            ),
            Provider::Loom => FrameTemplate::responsive(
                "frameborder=\"0\" webkitallowfullscreen mozallowfullscreen allowfullscreen",
            ),
            Provider::Vimeo => FrameTemplate::responsive(
                "frameborder=\"0\" allow=\"autoplay; fullscreen; picture-in-picture\" allowfullscreen",
            ),
            Provider::Twitter => FrameTemplate::sized("frameborder=\"0\" scrolling=\"no\""),
            Provider::Spotify => FrameTemplate::sized(
                "frameborder=\"0\" style=\"border-radius: 12px;\" allow=\"autoplay; clipboard-write; encrypted-media; fullscreen; picture-in-picture\" loading=\"lazy\"",
            ),
            Provider::GoogleMaps => FrameTemplate::sized(
                "style=\"border: 0;\" allowfullscreen loading=\"lazy\" referrerpolicy=\"no-referrer-when-downgrade\"",
            ),
            Provider::Figma => FrameTemplate::sized(
                "style=\"border: 1px solid rgba(0, 0, 0, 0.1);\" allowfullscreen",
            ),
            Provider::SoundCloud => {
                FrameTemplate::sized("frameborder=\"no\" scrolling=\"no\" allow=\"autoplay\"")
            }
            Provider::GoogleSheets => FrameTemplate::sized("frameborder=\"0\""),
            Provider::Airtable => FrameTemplate::sized(
                "frameborder=\"0\" style=\"background: transparent; border: 1px solid #ccc;\"",
            ),
            Provider::Generic => {
                FrameTemplate::sized("frameborder=\"0\" allowfullscreen loading=\"lazy\"")
            }
        }
    }
}

/// 16:9 box the responsive players fill.
const RESPONSIVE_WRAPPER: &str =
    "position: relative; padding-bottom: 56.25%; height: 0; overflow: hidden;";
const RESPONSIVE_FRAME: &str = "position: absolute; top: 0; left: 0; width: 100%; height: 100%;";

/// Fixed iframe markup for one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTemplate {
    /// Fills a 16:9 wrapper instead of taking the embed's height.
    pub responsive: bool,
    /// Attributes following `src` and the size, emitted verbatim.
    pub attrs: &'static str,
}

impl FrameTemplate {
    const fn responsive(attrs: &'static str) -> Self {
        Self {
            responsive: true,
            attrs,
        }
    }

    const fn sized(attrs: &'static str) -> Self {
        Self {
            responsive: false,
            attrs,
        }
    }
}

/// Where an embed points and how tall its frame is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub provider: Provider,
    pub src: String,
    /// Frame height in pixels; ignored by responsive templates.
    pub height: u32,
    /// Element id for frames a client script resizes after load.
    pub frame_id: Option<String>,
}

impl Embed {
    fn new(provider: Provider, src: String, height: u32) -> Self {
        Self {
            provider,
            src,
            height,
            frame_id: None,
        }
    }

    pub fn to_html(&self) -> String {
        let template = self.provider.template();
        let id = self
            .frame_id
            .as_deref()
            .map(|id| format!(" id=\"{}\"", escape(id)))
            .unwrap_or_default();
        let size = if template.responsive {
            format!("style=\"{RESPONSIVE_FRAME}\"")
        } else {
            format!("width=\"100%\" height=\"{}\"", self.height)
        };
        let frame = format!(
            "<iframe{id} class=\"embed embed-{}\" src=\"{}\" {size} {}></iframe>",
            self.provider.as_str(),
            escape(&self.src),
            template.attrs
        );
        if template.responsive {
            format!("<div class=\"video-block\" style=\"{RESPONSIVE_WRAPPER}\">{frame}</div>")
        } else {
            frame
        }
    }
}

struct Patterns {
    youtube: Regex,
    loom: Regex,
    vimeo: Regex,
    twitter: Regex,
    spotify: Regex,
    maps: Regex,
    maps_coordinates: Regex,
    maps_place: Regex,
    figma: Regex,
    soundcloud: Regex,
    sheets: Regex,
    airtable: Regex,
}

fn patterns() -> Option<&'static Patterns> {
    static PATTERNS: OnceLock<Option<Patterns>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            Some(Patterns {
                youtube: Regex::new(
                    r"^https?://(?:www\.|m\.)?(?:youtube\.com/(?:watch\?(?:.*&)?v=|embed/|shorts/|live/)|youtu\.be/)([A-Za-z0-9_-]{6,})",
                )
                .ok()?,
                loom: Regex::new(r"^https?://(?:www\.)?loom\.com/(?:share|embed)/([A-Za-z0-9]+)")
                    .ok()?,
                vimeo: Regex::new(r"^https?://(?:www\.|player\.)?vimeo\.com/(?:video/)?(\d+)")
                    .ok()?,
                twitter: Regex::new(
                    r"^https?://(?:www\.|mobile\.)?(?:twitter|x)\.com/[^/]+/status/(\d+)",
                )
                .ok()?,
                spotify: Regex::new(
                    r"^https?://open\.spotify\.com/(?:embed/)?(track|album|playlist|episode|show|artist)/([A-Za-z0-9]+)",
                )
                .ok()?,
                maps: Regex::new(
                    r"^https?://(?:(?:www\.)?google\.[a-z.]+/maps|maps\.google\.[a-z.]+|goo\.gl/maps|maps\.app\.goo\.gl)",
                )
                .ok()?,
                maps_coordinates: Regex::new(r"@(-?\d+(?:\.\d+)?),(-?\d+(?:\.\d+)?)").ok()?,
                maps_place: Regex::new(r"/place/([^/@?]+)").ok()?,
                figma: Regex::new(
                    r"^https://(?:[\w-]+\.)?figma\.com/(?:file|design|proto|board)/[A-Za-z0-9]+",
                )
                .ok()?,
                soundcloud: Regex::new(r"^https?://(?:www\.|m\.)?soundcloud\.com/").ok()?,
                sheets: Regex::new(
                    r"^https://docs\.google\.com/spreadsheets/d/([A-Za-z0-9_-]+)",
                )
                .ok()?,
                airtable: Regex::new(r"^https://(?:www\.)?airtable\.com/(?:embed/)?(shr[A-Za-z0-9]+)")
                    .ok()?,
            })
        })
        .as_ref()
}

/// Classifies an embed URL. The first matching provider wins.
pub fn classify_embed(url: &str) -> Embed {
    let url = url.trim();
    let Some(p) = patterns() else {
        return Embed::new(Provider::Generic, url.to_string(), 500);
    };

    if let Some(c) = p.youtube.captures(url) {
        return Embed::new(
            Provider::YouTube,
            format!("https://www.youtube.com/embed/{}", &c[1]),
            400,
        );
    }
    if let Some(c) = p.loom.captures(url) {
        return Embed::new(
            Provider::Loom,
            format!("https://www.loom.com/embed/{}", &c[1]),
            400,
        );
    }
    if let Some(c) = p.vimeo.captures(url) {
        return Embed::new(
            Provider::Vimeo,
            format!("https://player.vimeo.com/video/{}", &c[1]),
            400,
        );
    }
    if let Some(c) = p.twitter.captures(url) {
        let mut embed = Embed::new(
            Provider::Twitter,
            format!("https://platform.twitter.com/embed/Tweet.html?id={}", &c[1]),
            500,
        );
        embed.frame_id = Some(format!("if-{}", &c[1]));
        return embed;
    }
    if let Some(c) = p.spotify.captures(url) {
        let height = match &c[1] {
            "track" | "episode" => 152,
            _ => 352,
        };
        return Embed::new(
            Provider::Spotify,
            format!("https://open.spotify.com/embed/{}/{}", &c[1], &c[2]),
            height,
        );
    }
    if p.maps.is_match(url) {
        return Embed::new(Provider::GoogleMaps, maps_src(p, url), 450);
    }
    if p.figma.is_match(url) {
        return Embed::new(
            Provider::Figma,
            format!(
                "https://www.figma.com/embed?embed_host=notionrooms&url={}",
                encode_query(url)
            ),
            450,
        );
    }
    if p.soundcloud.is_match(url) {
        return Embed::new(
            Provider::SoundCloud,
            format!("https://w.soundcloud.com/player/?url={}", encode_query(url)),
            166,
        );
    }
    if let Some(c) = p.sheets.captures(url) {
        return Embed::new(
            Provider::GoogleSheets,
            format!("https://docs.google.com/spreadsheets/d/{}/preview", &c[1]),
            500,
        );
    }
    if let Some(c) = p.airtable.captures(url) {
        return Embed::new(
            Provider::Airtable,
            format!("https://airtable.com/embed/{}", &c[1]),
            533,
        );
    }

    Embed::new(Provider::Generic, url.to_string(), 500)
}

fn maps_src(p: &Patterns, url: &str) -> String {
    if url.contains("/maps/embed") {
        return url.to_string();
    }
    let query = if let Some(c) = p.maps_coordinates.captures(url) {
        format!("{},{}", &c[1], &c[2])
    } else if let Some(c) = p.maps_place.captures(url) {
        encode_query(&c[1].replace('+', " "))
    } else {
        encode_query(url)
    };
    format!("https://maps.google.com/maps?q={query}&output=embed")
}

/// Renders an `embed` block. Unsafe URLs render nothing.
pub fn render_embed(url: &str, caption_spans: &[RichText], ctx: &RenderContext<'_>) -> String {
    if safe_url(url).is_none() {
        log::warn!("Skipping embed with unsupported URL");
        return String::new();
    }
    let embed = classify_embed(url);
    format!(
        "<figure class=\"embed-container\">{}{}</figure>",
        embed.to_html(),
        caption(caption_spans, ctx)
    )
}
