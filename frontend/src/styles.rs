//! Class names and inline style rules the interactions write. The look itself
//! lives in the page stylesheet; these only flip state on top of it.

pub type Rules = &'static [(&'static str, &'static str)];

pub const SCROLLED: &str = "scrolled";
pub const TOGGLE_OPEN: &str = "is-active";
pub const MENU_OPEN: &str = "active";
pub const LINK_ACTIVE: &str = "active";
pub const REVEALED: &str = "fade-in";
pub const ZOOMED: &str = "zoomed";
pub const KEYBOARD_NAVIGATION: &str = "keyboard-navigation";

pub const OVERLAY_ID: &str = "image-overlay";

pub const IMAGE_HIDDEN: Rules = &[("opacity", "0"), ("transition", "opacity 0.5s ease-in-out")];
pub const IMAGE_SHOWN: Rules = &[("opacity", "1")];

pub const STORY_HOVER: Rules = &[("transform", "scale(1.02) rotate(1deg)")];
pub const STORY_REST: Rules = &[("transform", "scale(1) rotate(0deg)")];

pub const GALLERY_IDLE: Rules = &[("cursor", "zoom-in")];

pub const GALLERY_ZOOMED: Rules = &[
    ("position", "fixed"),
    ("top", "50%"),
    ("left", "50%"),
    ("transform", "translate(-50%, -50%) scale(1.5)"),
    ("z-index", "9999"),
    ("max-width", "95vw"),
    ("max-height", "95vh"),
    ("cursor", "zoom-out"),
];

pub const GALLERY_UNZOOMED: Rules = &[
    ("position", "relative"),
    ("top", "auto"),
    ("left", "auto"),
    ("transform", "scale(1)"),
    ("z-index", "auto"),
    ("max-width", "100%"),
    ("max-height", "none"),
    ("cursor", "zoom-in"),
];

pub const OVERLAY: Rules = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("background-color", "rgba(0, 0, 0, 0.9)"),
    ("z-index", "9998"),
];

pub const RIPPLE: Rules = &[
    ("position", "absolute"),
    ("width", "100%"),
    ("height", "100%"),
    ("border-radius", "50%"),
    ("background", "rgba(255, 255, 255, 0.5)"),
    ("transform", "scale(0)"),
    ("animation", "ripple 0.6s ease-out"),
];

/// Applied to the icon so the ripple stays clipped inside it.
pub const RIPPLE_HOST: Rules = &[("position", "relative"), ("overflow", "hidden")];

pub const RIPPLE_KEYFRAMES: &str = r#"
    @keyframes ripple {
        to {
            transform: scale(2);
            opacity: 0;
        }
    }
"#;
