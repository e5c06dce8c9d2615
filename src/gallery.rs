// certificate cards for the certifications page
use crate::config::{Achievement, AchievementStatus};
use std::fmt::Write as _;

/// Element the cards are appended to.
pub const GALLERY_CONTAINER_ID: &str = "certificates-container";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn status_class(status: AchievementStatus) -> &'static str {
    match status {
        AchievementStatus::Certified => "cert-status certified",
        AchievementStatus::InProgress => "cert-status in-progress",
        AchievementStatus::Planned => "cert-status planned",
    }
}

/// Markup for one card. Text fields are escaped; the image id is trusted
/// to be a bare file stem (checked when the config loads).
pub fn card_markup(achievement: &Achievement) -> String {
    let card_class = if achievement.status == AchievementStatus::Planned {
        "cert-card planned"
    } else {
        "cert-card"
    };

    let mut html = String::new();
    let _ = write!(html, r#"<div class="{}" data-id="{}">"#, card_class, achievement.id);
    let _ = write!(html, r#"<div class="cert-icon">{}</div>"#, escape_html(&achievement.icon));
    let _ = write!(html, "<h3>{}</h3>", escape_html(&achievement.title));
    let _ = write!(html, r#"<p class="cert-issuer">{}</p>"#, escape_html(&achievement.issuer));
    let _ = write!(html, r#"<p class="cert-date">{}</p>"#, escape_html(&achievement.date));
    let _ = write!(html, r#"<p class="cert-desc">{}</p>"#, escape_html(&achievement.description));
    if let Some(image) = &achievement.image {
        let image = escape_html(image);
        let _ = write!(
            html,
            concat!(
                r#"<div class="cert-image-preview">"#,
                r#"<a href="assets/images/{img}.jpg" target="_blank" rel="noopener">"#,
                r#"<img src="assets/images/{img}.jpg" alt="{alt}" "#,
                r#"onerror="this.onerror=null; this.src='assets/images/{img}.png';">"#,
                r#"</a><p class="cert-hint">Click to view full size</p></div>"#
            ),
            img = image,
            alt = escape_html(&achievement.title),
        );
    }
    let _ = write!(
        html,
        r#"<p class="{}">{}</p></div>"#,
        status_class(achievement.status),
        achievement.status.label()
    );
    html
}

/// All cards, in configuration order.
pub fn gallery_markup(achievements: &[Achievement]) -> String {
    achievements.iter().map(card_markup).collect()
}
