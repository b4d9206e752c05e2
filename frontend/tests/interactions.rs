use time_tariff::config::PageConfig;
use time_tariff::controller::{Effect, Node, PageController};
use time_tariff::events::PageEvent;
use time_tariff::layout::{Layout, SectionBox};

/// Three 1000px sections under an 80px navbar, amenities in the middle.
struct Page {
    scroll_y: f64,
    sections: Vec<SectionBox>,
}

impl Page {
    fn new() -> Self {
        Self {
            scroll_y: 0.0,
            sections: vec![
                SectionBox::new("home", 0.0, 1000.0),
                SectionBox::new("amenities", 1000.0, 1000.0),
                SectionBox::new("contact", 2000.0, 1000.0),
            ],
        }
    }

    fn at(scroll_y: f64) -> Self {
        Self {
            scroll_y,
            ..Self::new()
        }
    }
}

impl Layout for Page {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        720.0
    }

    fn navbar_height(&self) -> f64 {
        80.0
    }

    fn landmark_top(&self) -> Option<f64> {
        self.sections
            .iter()
            .find(|s| s.id.as_deref() == Some("amenities"))
            .map(|s| s.top)
    }

    fn sections(&self) -> Vec<SectionBox> {
        self.sections.clone()
    }

    fn fragment_top(&self, id: &str) -> Option<f64> {
        self.sections
            .iter()
            .find(|s| s.id.as_deref() == Some(id))
            .map(|s| s.top)
    }
}

fn controller() -> PageController {
    PageController::new(
        &PageConfig::default(),
        [Some("#home"), Some("#amenities"), Some("#contact")],
    )
}

fn overlays_shown(effects: &[Effect]) -> usize {
    effects.iter().filter(|e| **e == Effect::ShowOverlay).count()
}

#[test]
fn navbar_state_follows_threshold_monotonically() {
    let mut c = controller();
    // amenities top 1000 - 100 pre-roll
    for offset in (0..3000).step_by(50) {
        let offset = offset as f64;
        c.handle(PageEvent::Scroll, &Page::at(offset));
        assert_eq!(c.is_scrolled(), offset >= 900.0, "offset {}", offset);
    }
}

#[test]
fn navbar_check_is_idempotent() {
    let mut c = controller();
    let first = c.handle(PageEvent::Scroll, &Page::at(1200.0));
    let second = c.handle(PageEvent::Scroll, &Page::at(1200.0));
    assert_eq!(first, second);
    assert!(c.is_scrolled());
}

#[test]
fn paired_menu_toggles_return_to_closed() {
    let mut c = controller();
    let page = Page::new();
    for taps in 1..=6 {
        c.handle(PageEvent::MenuToggleClicked, &page);
        assert_eq!(c.is_menu_open(), taps % 2 == 1);
    }
    assert!(!c.is_menu_open());
}

#[test]
fn link_to_missing_fragment_does_not_scroll() {
    let mut c = PageController::new(&PageConfig::default(), [Some("#gone"), Some("#")]);
    for index in 0..2 {
        let effects = c.handle(PageEvent::NavLinkClicked(index), &Page::new());
        assert_eq!(effects, vec![Effect::PreventDefault], "link {}", index);
    }
}

#[test]
fn link_scrolls_below_navbar() {
    let mut c = controller();
    let effects = c.handle(PageEvent::NavLinkClicked(1), &Page::new());
    assert_eq!(
        effects,
        vec![Effect::PreventDefault, Effect::ScrollTo { top: 920.0 }]
    );
}

#[test]
fn at_most_one_link_is_active_while_scrolling() {
    let mut c = controller();
    for offset in (0..4000).step_by(40) {
        let effects = c.handle(PageEvent::HighlightTick, &Page::at(offset as f64));
        let active: Vec<_> = effects
            .iter()
            .filter(|e| matches!(e, Effect::Class { node: Node::NavLink(_), on: true, .. }))
            .collect();
        assert!(active.len() <= 1, "offset {}", offset);
    }
}

#[test]
fn midpoint_of_second_section_activates_its_link() {
    let mut c = controller();
    c.handle(PageEvent::HighlightTick, &Page::at(1500.0));
    assert_eq!(c.active_link(), Some(1));
}

#[test]
fn reveals_survive_scrolling_away() {
    let mut c = controller();
    c.handle(PageEvent::SectionVisible(0), &Page::new());
    c.handle(
        PageEvent::ImageVisible {
            index: 2,
            complete: false,
        },
        &Page::new(),
    );
    for offset in [500.0, 2500.0, 0.0] {
        c.handle(PageEvent::Scroll, &Page::at(offset));
        c.handle(PageEvent::HighlightTick, &Page::at(offset));
    }
    assert!(c.is_section_revealed(0));
    assert!(c.is_image_revealed(2));
    assert!(c
        .handle(PageEvent::SectionVisible(0), &Page::new())
        .is_empty());
}

#[test]
fn zoom_taps_toggle_a_single_overlay() {
    let mut c = controller();
    let page = Page::new();

    let zoom_in = c.handle(PageEvent::GalleryClicked, &page);
    assert_eq!(overlays_shown(&zoom_in), 1);
    assert!(c.is_zoomed());

    let zoom_out = c.handle(PageEvent::GalleryClicked, &page);
    assert_eq!(overlays_shown(&zoom_out), 0);
    assert!(zoom_out.contains(&Effect::HideOverlay));
    assert!(!c.is_zoomed());

    let again = c.handle(PageEvent::GalleryClicked, &page);
    assert_eq!(overlays_shown(&again), 1);
    let via_overlay = c.handle(PageEvent::OverlayClicked, &page);
    assert!(via_overlay.contains(&Effect::HideOverlay));
}

#[test]
fn keyboard_mode_round_trip() {
    let mut c = controller();
    let page = Page::new();
    let tab = || PageEvent::KeyDown {
        key: "Tab".to_string(),
    };

    assert!(!c.keyboard_navigation());
    c.handle(tab(), &page);
    assert!(c.keyboard_navigation());
    c.handle(PageEvent::MouseDown, &page);
    assert!(!c.keyboard_navigation());
    c.handle(tab(), &page);
    assert!(c.keyboard_navigation());
}

#[test]
fn keyboard_activation_matches_click() {
    let mut c = controller();
    let page = Page::new();
    let effects = c.handle(
        PageEvent::SocialKeyPress {
            index: 2,
            key: "Enter".to_string(),
        },
        &page,
    );
    assert!(effects.contains(&Effect::Click(Node::Social(2))));

    let clicked = c.handle(
        PageEvent::SocialClicked {
            index: 2,
            label: None,
        },
        &page,
    );
    assert_eq!(
        clicked,
        vec![
            Effect::Log("User clicked on unknown".to_string()),
            Effect::Ripple(Node::Social(2)),
        ]
    );
}

/// No navbar, no landmark, and a leading section without an id.
struct BarePage {
    scroll_y: f64,
}

impl Layout for BarePage {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        720.0
    }

    fn navbar_height(&self) -> f64 {
        0.0
    }

    fn landmark_top(&self) -> Option<f64> {
        None
    }

    fn sections(&self) -> Vec<SectionBox> {
        vec![
            SectionBox {
                id: None,
                top: 0.0,
                height: 1000.0,
            },
            SectionBox::new("menu", 1000.0, 1000.0),
        ]
    }

    fn fragment_top(&self, id: &str) -> Option<f64> {
        (id == "menu").then_some(1000.0)
    }
}

fn bare_controller() -> PageController {
    PageController::new(&PageConfig::default(), [Some("#menu")])
}

#[test]
fn without_navbar_or_landmark_threshold_is_viewport() {
    let mut c = bare_controller();
    c.handle(PageEvent::Scroll, &BarePage { scroll_y: 719.0 });
    assert!(!c.is_scrolled());
    let effects = c.handle(PageEvent::Scroll, &BarePage { scroll_y: 720.0 });
    assert!(c.is_scrolled());
    assert_eq!(
        effects,
        vec![Effect::Class {
            node: Node::Navbar,
            class: "scrolled",
            on: true
        }]
    );
}

#[test]
fn without_navbar_scroll_target_is_section_top() {
    let mut c = bare_controller();
    let effects = c.handle(PageEvent::NavLinkClicked(0), &BarePage { scroll_y: 0.0 });
    assert_eq!(
        effects,
        vec![Effect::PreventDefault, Effect::ScrollTo { top: 1000.0 }]
    );
}

#[test]
fn section_without_id_leaves_every_link_inactive() {
    let mut c = bare_controller();
    let effects = c.handle(PageEvent::HighlightTick, &BarePage { scroll_y: 500.0 });
    assert_eq!(c.active_link(), None);
    assert_eq!(
        effects,
        vec![Effect::Class {
            node: Node::NavLink(0),
            class: "active",
            on: false
        }]
    );
}

#[test]
fn without_navbar_bands_only_subtract_the_lead() {
    let mut c = bare_controller();
    // second band starts at 1000 - 0 - 100
    c.handle(PageEvent::HighlightTick, &BarePage { scroll_y: 899.0 });
    assert_eq!(c.active_link(), None);
    c.handle(PageEvent::HighlightTick, &BarePage { scroll_y: 900.0 });
    assert_eq!(c.active_link(), Some(0));
}
