use std::collections::BTreeSet;

use crate::config::PageConfig;
use crate::events::PageEvent;
use crate::layout::{active_section, fragment_id, navbar_trigger, Layout};
use crate::styles::{self, Rules};

/// Elements the controller can address. Indexed nodes follow document order
/// of their selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Navbar,
    MenuToggle,
    Menu,
    NavLink(usize),
    Section(usize),
    Image(usize),
    Story,
    Gallery,
    Social(usize),
    Body,
}

/// What the page should do in response to an event, in application order.
/// Effects on nodes the page does not have are dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Class {
        node: Node,
        class: &'static str,
        on: bool,
    },
    Style {
        node: Node,
        rules: Rules,
    },
    PreventDefault,
    ScrollTo {
        top: f64,
    },
    Unobserve(Node),
    AwaitLoad(Node),
    ShowOverlay,
    HideOverlay,
    Ripple(Node),
    Click(Node),
    Log(String),
}

pub struct PageController {
    navbar_preroll: f64,
    highlight_lead: f64,
    /// Fragment id of each nav link, `None` for links leaving the page and
    /// empty for a bare `#`.
    link_targets: Vec<Option<String>>,
    scrolled: bool,
    menu_open: bool,
    zoomed: bool,
    keyboard_navigation: bool,
    active_link: Option<usize>,
    revealed_sections: BTreeSet<usize>,
    revealed_images: BTreeSet<usize>,
}

impl PageController {
    pub fn new<I, S>(config: &PageConfig, link_hrefs: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let link_targets = link_hrefs
            .into_iter()
            .map(|href| {
                href.as_ref()
                    .and_then(|h| fragment_id(h.as_ref()))
                    .map(str::to_string)
            })
            .collect();

        Self {
            navbar_preroll: config.navbar_preroll,
            highlight_lead: config.highlight_lead,
            link_targets,
            scrolled: false,
            menu_open: false,
            zoomed: false,
            keyboard_navigation: false,
            active_link: None,
            revealed_sections: BTreeSet::new(),
            revealed_images: BTreeSet::new(),
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn keyboard_navigation(&self) -> bool {
        self.keyboard_navigation
    }

    pub fn active_link(&self) -> Option<usize> {
        self.active_link
    }

    pub fn is_section_revealed(&self, index: usize) -> bool {
        self.revealed_sections.contains(&index)
    }

    pub fn is_image_revealed(&self, index: usize) -> bool {
        self.revealed_images.contains(&index)
    }

    /// Runs once when the page is wired up.
    pub fn startup(&mut self, layout: &dyn Layout) -> Vec<Effect> {
        let mut effects = self.update_navbar(layout);
        effects.push(Effect::Style {
            node: Node::Gallery,
            rules: styles::GALLERY_IDLE,
        });
        effects
    }

    pub fn handle(&mut self, event: PageEvent, layout: &dyn Layout) -> Vec<Effect> {
        match event {
            PageEvent::Scroll => self.update_navbar(layout),
            PageEvent::HighlightTick => self.highlight(layout),
            PageEvent::MenuToggleClicked => {
                let open = !self.menu_open;
                self.set_menu(open)
            }
            PageEvent::NavLinkClicked(index) => self.follow_link(index, layout),
            PageEvent::DocumentClicked { inside_menu } => {
                if self.menu_open && !inside_menu {
                    self.set_menu(false)
                } else {
                    Vec::new()
                }
            }
            PageEvent::OverlayClicked => {
                if self.zoomed {
                    self.toggle_zoom()
                } else {
                    Vec::new()
                }
            }
            PageEvent::SectionVisible(index) => self.reveal_section(index),
            PageEvent::ImageVisible { index, complete } => self.reveal_image(index, complete),
            PageEvent::ImageLoaded(index) => vec![Effect::Style {
                node: Node::Image(index),
                rules: styles::IMAGE_SHOWN,
            }],
            PageEvent::StoryEnter => vec![Effect::Style {
                node: Node::Story,
                rules: styles::STORY_HOVER,
            }],
            PageEvent::StoryLeave => vec![Effect::Style {
                node: Node::Story,
                rules: styles::STORY_REST,
            }],
            PageEvent::GalleryClicked => self.toggle_zoom(),
            PageEvent::SocialClicked { index, label } => {
                let label = label.as_deref().unwrap_or("unknown");
                vec![
                    Effect::Log(format!("User clicked on {}", label)),
                    Effect::Ripple(Node::Social(index)),
                ]
            }
            PageEvent::SocialKeyPress { index, key } => match key.as_str() {
                "Enter" | " " => vec![Effect::PreventDefault, Effect::Click(Node::Social(index))],
                _ => Vec::new(),
            },
            PageEvent::KeyDown { key } => {
                if key == "Tab" {
                    self.set_keyboard_navigation(true)
                } else {
                    Vec::new()
                }
            }
            PageEvent::MouseDown => self.set_keyboard_navigation(false),
        }
    }

    fn update_navbar(&mut self, layout: &dyn Layout) -> Vec<Effect> {
        let trigger = navbar_trigger(
            layout.landmark_top(),
            layout.viewport_height(),
            self.navbar_preroll,
        );
        self.scrolled = layout.scroll_y() >= trigger;
        vec![Effect::Class {
            node: Node::Navbar,
            class: styles::SCROLLED,
            on: self.scrolled,
        }]
    }

    fn highlight(&mut self, layout: &dyn Layout) -> Vec<Effect> {
        let sections = layout.sections();
        let section = active_section(
            &sections,
            layout.scroll_y(),
            layout.navbar_height(),
            self.highlight_lead,
        );

        self.active_link = section
            .and_then(|i| sections[i].id.as_deref())
            .filter(|id| !id.is_empty())
            .and_then(|id| {
                self.link_targets
                    .iter()
                    .position(|target| target.as_deref() == Some(id))
            });

        (0..self.link_targets.len())
            .map(|i| Effect::Class {
                node: Node::NavLink(i),
                class: styles::LINK_ACTIVE,
                on: self.active_link == Some(i),
            })
            .collect()
    }

    fn set_menu(&mut self, open: bool) -> Vec<Effect> {
        self.menu_open = open;
        vec![
            Effect::Class {
                node: Node::MenuToggle,
                class: styles::TOGGLE_OPEN,
                on: open,
            },
            Effect::Class {
                node: Node::Menu,
                class: styles::MENU_OPEN,
                on: open,
            },
        ]
    }

    fn follow_link(&mut self, index: usize, layout: &dyn Layout) -> Vec<Effect> {
        let mut effects = if self.menu_open {
            self.set_menu(false)
        } else {
            Vec::new()
        };

        let Some(target) = self.link_targets.get(index).and_then(|t| t.as_deref()) else {
            return effects;
        };

        effects.push(Effect::PreventDefault);
        if target.is_empty() {
            return effects;
        }
        if let Some(top) = layout.fragment_top(target) {
            effects.push(Effect::ScrollTo {
                top: top - layout.navbar_height(),
            });
        }
        effects
    }

    fn reveal_section(&mut self, index: usize) -> Vec<Effect> {
        if !self.revealed_sections.insert(index) {
            return Vec::new();
        }
        vec![
            Effect::Class {
                node: Node::Section(index),
                class: styles::REVEALED,
                on: true,
            },
            Effect::Unobserve(Node::Section(index)),
        ]
    }

    fn reveal_image(&mut self, index: usize, complete: bool) -> Vec<Effect> {
        if !self.revealed_images.insert(index) {
            return Vec::new();
        }
        let node = Node::Image(index);
        let shown = if complete {
            Effect::Style {
                node,
                rules: styles::IMAGE_SHOWN,
            }
        } else {
            Effect::AwaitLoad(node)
        };
        vec![
            Effect::Style {
                node,
                rules: styles::IMAGE_HIDDEN,
            },
            shown,
            Effect::Unobserve(node),
        ]
    }

    fn toggle_zoom(&mut self) -> Vec<Effect> {
        self.zoomed = !self.zoomed;
        if self.zoomed {
            vec![
                Effect::Class {
                    node: Node::Gallery,
                    class: styles::ZOOMED,
                    on: true,
                },
                Effect::Style {
                    node: Node::Gallery,
                    rules: styles::GALLERY_ZOOMED,
                },
                Effect::ShowOverlay,
            ]
        } else {
            vec![
                Effect::Class {
                    node: Node::Gallery,
                    class: styles::ZOOMED,
                    on: false,
                },
                Effect::Style {
                    node: Node::Gallery,
                    rules: styles::GALLERY_UNZOOMED,
                },
                Effect::HideOverlay,
            ]
        }
    }

    fn set_keyboard_navigation(&mut self, on: bool) -> Vec<Effect> {
        self.keyboard_navigation = on;
        vec![Effect::Class {
            node: Node::Body,
            class: styles::KEYBOARD_NAVIGATION,
            on,
        }]
    }
}
