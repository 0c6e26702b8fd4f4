use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown icon identifier: {0:?}")]
pub struct UnknownIcon(pub String);

/// Every icon the site can draw. Content naming anything else is rejected
/// when it is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    Camera,
    User,
    Mountain,
    Baby,
    Mail,
    Phone,
    Instagram,
    Facebook,
    MessageCircle,
    Star,
    X,
    ChevronLeft,
    ChevronRight,
}

impl Icon {
    pub const ALL: [Icon; 13] = [
        Icon::Camera,
        Icon::User,
        Icon::Mountain,
        Icon::Baby,
        Icon::Mail,
        Icon::Phone,
        Icon::Instagram,
        Icon::Facebook,
        Icon::MessageCircle,
        Icon::Star,
        Icon::X,
        Icon::ChevronLeft,
        Icon::ChevronRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Icon::Camera => "Camera",
            Icon::User => "User",
            Icon::Mountain => "Mountain",
            Icon::Baby => "Baby",
            Icon::Mail => "Mail",
            Icon::Phone => "Phone",
            Icon::Instagram => "Instagram",
            Icon::Facebook => "Facebook",
            Icon::MessageCircle => "MessageCircle",
            Icon::Star => "Star",
            Icon::X => "X",
            Icon::ChevronLeft => "ChevronLeft",
            Icon::ChevronRight => "ChevronRight",
        }
    }

    /// Inline SVG markup sized to `size` pixels.
    pub fn svg(self, size: u16) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">{}</svg>"#,
            self.outline(),
        )
    }

    // Outlines are drawn with `stroke="currentColor"` at a 24x24 view box.
    fn outline(self) -> &'static str {
        match self {
            Icon::Camera => {
                r#"<path d="M14.5 4h-5L7 7H4a2 2 0 0 0-2 2v9a2 2 0 0 0 2 2h16a2 2 0 0 0 2-2V9a2 2 0 0 0-2-2h-3l-2.5-3z"/><circle cx="12" cy="13" r="3"/>"#
            },
            Icon::User => {
                r#"<path d="M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2"/><circle cx="12" cy="7" r="4"/>"#
            },
            Icon::Mountain => r#"<path d="m8 3 4 8 5-5 5 15H2L8 3z"/>"#,
            Icon::Baby => {
                r#"<path d="M9 12h.01"/><path d="M15 12h.01"/><path d="M10 16c.5.3 1.2.5 2 .5s1.5-.2 2-.5"/><path d="M19 6.3a9 9 0 0 1 1.8 3.9 2 2 0 0 1 0 3.6 9 9 0 0 1-17.6 0 2 2 0 0 1 0-3.6A9 9 0 0 1 12 3c2 0 3.5 1.1 3.5 2.5s-.9 2.5-2 2.5c-.8 0-1.5-.4-1.5-1"/>"#
            },
            Icon::Mail => {
                r#"<rect width="20" height="16" x="2" y="4" rx="2"/><path d="m22 7-8.97 5.7a1.94 1.94 0 0 1-2.06 0L2 7"/>"#
            },
            Icon::Phone => {
                r#"<path d="M22 16.92v3a2 2 0 0 1-2.18 2 19.79 19.79 0 0 1-8.63-3.07 19.5 19.5 0 0 1-6-6 19.79 19.79 0 0 1-3.07-8.67A2 2 0 0 1 4.11 2h3a2 2 0 0 1 2 1.72c.13.96.36 1.9.7 2.81a2 2 0 0 1-.45 2.11L8.09 9.91a16 16 0 0 0 6 6l1.27-1.27a2 2 0 0 1 2.11-.45c.91.34 1.85.57 2.81.7A2 2 0 0 1 22 16.92z"/>"#
            },
            Icon::Instagram => {
                r#"<rect width="20" height="20" x="2" y="2" rx="5" ry="5"/><path d="M16 11.37A4 4 0 1 1 12.63 8 4 4 0 0 1 16 11.37z"/><line x1="17.5" x2="17.51" y1="6.5" y2="6.5"/>"#
            },
            Icon::Facebook => {
                r#"<path d="M18 2h-3a5 5 0 0 0-5 5v3H7v4h3v8h4v-8h3l1-4h-4V7a1 1 0 0 1 1-1h3z"/>"#
            },
            Icon::MessageCircle => r#"<path d="M7.9 20A9 9 0 1 0 4 16.1L2 22z"/>"#,
            Icon::Star => {
                r#"<polygon points="12 2 15.09 8.26 22 9.27 17 14.14 18.18 21.02 12 17.77 5.82 21.02 7 14.14 2 9.27 8.91 8.26 12 2"/>"#
            },
            Icon::X => r#"<path d="M18 6 6 18"/><path d="m6 6 12 12"/>"#,
            Icon::ChevronLeft => r#"<path d="m15 18-6-6 6-6"/>"#,
            Icon::ChevronRight => r#"<path d="m9 18 6-6-6-6"/>"#,
        }
    }
}

impl FromStr for Icon {
    type Err = UnknownIcon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Icon::ALL
            .into_iter()
            .find(|icon| icon.name() == s)
            .ok_or_else(|| UnknownIcon(s.to_string()))
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_icon_round_trips_through_its_name() {
        for icon in Icon::ALL {
            assert_eq!(icon.name().parse::<Icon>(), Ok(icon));
            assert_eq!(icon.to_string(), icon.name());
        }
    }

    #[test]
    fn every_icon_has_a_distinct_name_and_outline() {
        let names: std::collections::HashSet<_> = Icon::ALL.iter().map(|icon| icon.name()).collect();
        assert_eq!(names.len(), Icon::ALL.len());
        for icon in Icon::ALL {
            assert!(icon.outline().starts_with('<'), "{} has no outline", icon);
        }
    }

    #[test]
    fn unknown_identifiers_are_rejected() {
        assert_eq!(
            "Sparkles".parse::<Icon>(),
            Err(UnknownIcon("Sparkles".to_string()))
        );
        assert!("camera".parse::<Icon>().is_err());
    }

    #[test]
    fn svg_embeds_size_and_outline() {
        let svg = Icon::Star.svg(20);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="20""#));
        assert!(svg.contains("<polygon"));
    }
}
