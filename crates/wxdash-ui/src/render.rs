//! Plain-text rendering of the dashboard for a terminal.

use wxdash_core::{GlyphStyle, UiConfig};
use wxdash_weather::Pictogram;

use crate::models::DashboardView;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub glyphs: GlyphStyle,
    /// Print each strip card's detailed forecast under it
    pub show_details: bool,
}

impl From<&UiConfig> for RenderOptions {
    fn from(config: &UiConfig) -> Self {
        Self {
            glyphs: config.glyphs,
            show_details: config.show_details,
        }
    }
}

impl RenderOptions {
    fn icon(&self, icon: Option<Pictogram>) -> &'static str {
        match (icon, self.glyphs) {
            (None, _) => "",
            (Some(p), GlyphStyle::Unicode) => p.glyph(),
            (Some(p), GlyphStyle::Ascii) => p.label(),
        }
    }
}

pub fn render_text(view: &DashboardView, options: &RenderOptions) -> String {
    let mut lines = Vec::new();

    if let Some(banner) = &view.banner {
        lines.push(format!("! {}", banner));
        lines.push(String::new());
    }

    let current = &view.current;
    lines.push(current.location.clone());
    lines.push(current.period.clone());
    lines.push(
        format!("{}  {}", current.temperature, options.icon(current.icon))
            .trim_end()
            .to_string(),
    );
    lines.push(current.coordinate.clone());

    lines.push(String::new());
    lines.push("7 day forecast".to_string());

    for card in &view.strip {
        lines.push(
            format!(
                "  {:<16}{:>4}  {}",
                card.name,
                card.temperature,
                options.icon(card.icon)
            )
            .trim_end()
            .to_string(),
        );
        if options.show_details && !card.detail.is_empty() {
            lines.push(format!("      {}", card.detail));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentCard, StripCard};

    fn view() -> DashboardView {
        DashboardView {
            banner: None,
            current: CurrentCard {
                location: "Washington county, KS".into(),
                period: "Friday".into(),
                temperature: "47 degrees F".into(),
                icon: Some(Pictogram::Rain),
                coordinate: "37.7456,-97.0892".into(),
                detail: String::new(),
            },
            strip: vec![
                StripCard {
                    name: "Friday Night".into(),
                    temperature: "35".into(),
                    icon: Some(Pictogram::Sunny),
                    detail: "Mostly clear, with a low around 35.".into(),
                },
                StripCard {
                    name: "Saturday".into(),
                    temperature: "52".into(),
                    icon: None,
                    detail: String::new(),
                },
            ],
        }
    }

    #[test]
    fn test_renders_current_card_first() {
        let text = render_text(&view(), &RenderOptions::default());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Washington county, KS");
        assert_eq!(lines[1], "Friday");
        assert_eq!(lines[2], "47 degrees F  ☔");
        assert_eq!(lines[3], "37.7456,-97.0892");
        assert!(text.contains("7 day forecast"));
    }

    #[test]
    fn test_ascii_glyphs() {
        let options = RenderOptions {
            glyphs: GlyphStyle::Ascii,
            show_details: false,
        };
        let text = render_text(&view(), &options);
        assert!(text.is_ascii());
        assert!(text.contains("47 degrees F  [rain]"));
        assert!(text.contains("[sun]"));
    }

    #[test]
    fn test_details_are_optional() {
        let plain = render_text(&view(), &RenderOptions::default());
        assert!(!plain.contains("Mostly clear"));

        let detailed = render_text(
            &view(),
            &RenderOptions {
                show_details: true,
                ..Default::default()
            },
        );
        assert!(detailed.contains("      Mostly clear, with a low around 35."));
    }

    #[test]
    fn test_strip_card_without_icon() {
        let text = render_text(&view(), &RenderOptions::default());
        let saturday = text.lines().find(|l| l.contains("Saturday")).unwrap_or_default();
        assert_eq!(saturday, "  Saturday          52");
    }

    #[test]
    fn test_banner_goes_on_top() {
        let mut v = view();
        v.banner = Some("Loading forecast for 37.7456,-97.0892...".into());
        let text = render_text(&v, &RenderOptions::default());
        assert!(text.starts_with("! Loading forecast"));
    }

    #[test]
    fn test_empty_view_does_not_fail() {
        let text = render_text(&DashboardView::default(), &RenderOptions::default());
        assert!(text.contains("7 day forecast"));
    }
}
