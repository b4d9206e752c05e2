/// Synthetic events the controller reacts to. The browser layer builds these
/// from DOM events; tests build them directly.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Scroll,
    /// Trailing edge of a scroll burst.
    HighlightTick,
    MenuToggleClicked,
    NavLinkClicked(usize),
    /// Any click on the document. `inside_menu` covers the toggle as well.
    DocumentClicked { inside_menu: bool },
    OverlayClicked,
    SectionVisible(usize),
    ImageVisible { index: usize, complete: bool },
    ImageLoaded(usize),
    StoryEnter,
    StoryLeave,
    GalleryClicked,
    SocialClicked { index: usize, label: Option<String> },
    SocialKeyPress { index: usize, key: String },
    KeyDown { key: String },
    MouseDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Window,
    Document,
    /// Only resolved when the menu it controls is present too.
    MenuToggle,
    NavLinks,
    Story,
    Gallery,
    SocialIcons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Navbar,
    Highlight,
    MenuToggle,
    NavLink,
    OutsideClick,
    OverlayClick,
    StoryEnter,
    StoryLeave,
    GalleryZoom,
    SocialClick,
    SocialKey,
    KeyboardMode,
    PointerMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub event: &'static str,
    pub target: Target,
    pub route: Route,
    /// Passive listeners cannot cancel the default action.
    pub passive: bool,
}

const fn sub(event: &'static str, target: Target, route: Route, passive: bool) -> Subscription {
    Subscription {
        event,
        target,
        route,
        passive,
    }
}

const SUBSCRIPTIONS: &[Subscription] = &[
    sub("scroll", Target::Window, Route::Navbar, true),
    sub("scroll", Target::Window, Route::Highlight, true),
    sub("click", Target::MenuToggle, Route::MenuToggle, true),
    sub("click", Target::NavLinks, Route::NavLink, false),
    sub("click", Target::Document, Route::OutsideClick, true),
    sub("click", Target::Document, Route::OverlayClick, true),
    sub("mouseenter", Target::Story, Route::StoryEnter, true),
    sub("mouseleave", Target::Story, Route::StoryLeave, true),
    sub("click", Target::Gallery, Route::GalleryZoom, true),
    sub("click", Target::SocialIcons, Route::SocialClick, true),
    sub("keypress", Target::SocialIcons, Route::SocialKey, false),
    sub("keydown", Target::Document, Route::KeyboardMode, true),
    sub("mousedown", Target::Document, Route::PointerMode, true),
];

/// Every listener the page installs, in registration order.
pub fn subscriptions() -> &'static [Subscription] {
    SUBSCRIPTIONS
}
