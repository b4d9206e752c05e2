use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::config::PageConfig;
use crate::controller::{Effect, Node, PageController};
use crate::debounce::{debounce, Debounce};
use crate::error::PageError;
use crate::events::{subscriptions, PageEvent, Route, Target};
use crate::layout::{Layout, SectionBox};
use crate::styles::{self, Rules};
use crate::timer::GlooTimer;
use crate::transient::Transient;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

struct Observer {
    inner: IntersectionObserver,
    _callback: ObserverCallback,
}

/// The live page: resolved markup, the controller, and everything keeping
/// listeners alive. Every element is optional; a missing one switches off
/// only the feature that needs it.
pub struct Page {
    window: Window,
    document: Document,
    config: PageConfig,
    navbar: Option<HtmlElement>,
    landmark: Option<HtmlElement>,
    menu_toggle: Option<HtmlElement>,
    menu: Option<HtmlElement>,
    nav_links: Vec<HtmlElement>,
    sections: Vec<HtmlElement>,
    images: Vec<HtmlImageElement>,
    story: Option<HtmlElement>,
    gallery: Option<HtmlElement>,
    social_icons: Vec<HtmlElement>,
    controller: RefCell<PageController>,
    overlay: RefCell<Option<HtmlElement>>,
    listeners: RefCell<Vec<EventListener>>,
    section_observer: RefCell<Option<Observer>>,
    image_observer: RefCell<Option<Observer>>,
    highlight: RefCell<Option<Debounce<GlooTimer, ()>>>,
}

fn by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn first<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    match document.query_selector(selector) {
        Ok(found) => found.and_then(|el| el.dyn_into::<T>().ok()),
        Err(_) => {
            warn!("Bad selector {:?}", selector);
            None
        }
    }
}

fn all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    let Ok(list) = document.query_selector_all(selector) else {
        warn!("Bad selector {:?}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

fn set_styles(el: &HtmlElement, rules: Rules) {
    let style = el.style();
    for &(property, value) in rules {
        if let Err(e) = style.set_property(property, value) {
            warn!("Failed to set {}: {:?}", property, e);
        }
    }
}

fn event_node(event: &Event) -> Option<web_sys::Node> {
    event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
}

impl Page {
    pub fn install() -> Result<Rc<Page>, PageError> {
        let window = web_sys::window().ok_or(PageError::NoWindow)?;
        let document = window.document().ok_or(PageError::NoDocument)?;
        let config = PageConfig::from_document(&document);

        let nav_links: Vec<HtmlElement> = all(&document, &config.nav_link_selector);
        let controller =
            PageController::new(&config, nav_links.iter().map(|link| link.get_attribute("href")));

        let page = Rc::new(Page {
            navbar: by_id(&document, &config.navbar_id),
            landmark: by_id(&document, &config.landmark_id),
            menu_toggle: by_id(&document, &config.menu_toggle_id),
            menu: first(&document, &config.menu_selector),
            nav_links,
            sections: all(&document, &config.section_selector),
            images: all(&document, &config.image_selector),
            story: first(&document, &config.story_selector),
            gallery: first(&document, &config.gallery_selector),
            social_icons: all(&document, &config.social_selector),
            controller: RefCell::new(controller),
            overlay: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            section_observer: RefCell::new(None),
            image_observer: RefCell::new(None),
            highlight: RefCell::new(None),
            window,
            document,
            config,
        });

        let weak = Rc::downgrade(&page);
        page.highlight.replace(Some(debounce(
            GlooTimer,
            page.config.highlight_debounce_ms,
            move |()| {
                if let Some(page) = weak.upgrade() {
                    page.dispatch(PageEvent::HighlightTick, None);
                }
            },
        )));

        // Each of these only takes its own feature down.
        if let Err(e) = page.inject_keyframes() {
            warn!("Ripple keyframes unavailable: {}", e);
        }
        page.subscribe();
        if let Err(e) = page.observe_sections() {
            warn!("Section reveal disabled: {}", e);
        }
        if let Err(e) = page.observe_images() {
            warn!("Image reveal disabled: {}", e);
        }

        let effects = page.controller.borrow_mut().startup(&*page);
        page.apply(effects, None);

        debug!(
            "Wired {} nav links, {} sections, {} images, {} social icons",
            page.nav_links.len(),
            page.sections.len(),
            page.images.len(),
            page.social_icons.len()
        );
        Ok(page)
    }

    fn inject_keyframes(&self) -> Result<(), PageError> {
        let Some(head) = self.document.head() else {
            return Ok(());
        };
        let style = self.document.create_element("style")?;
        style.set_text_content(Some(styles::RIPPLE_KEYFRAMES));
        head.append_child(&style)?;
        Ok(())
    }

    fn resolve(&self, target: Target) -> Vec<EventTarget> {
        let one = |el: &Option<HtmlElement>| -> Vec<EventTarget> {
            el.iter().map(|el| el.clone().into()).collect()
        };
        let many = |els: &[HtmlElement]| -> Vec<EventTarget> {
            els.iter().map(|el| el.clone().into()).collect()
        };

        match target {
            Target::Window => vec![self.window.clone().into()],
            Target::Document => vec![self.document.clone().into()],
            Target::MenuToggle if self.menu.is_some() => one(&self.menu_toggle),
            Target::MenuToggle => Vec::new(),
            Target::NavLinks => many(&self.nav_links),
            Target::Story => one(&self.story),
            Target::Gallery => one(&self.gallery),
            Target::SocialIcons => many(&self.social_icons),
        }
    }

    fn subscribe(self: &Rc<Self>) {
        for sub in subscriptions() {
            for (index, target) in self.resolve(sub.target).into_iter().enumerate() {
                let page = Rc::downgrade(self);
                let route = sub.route;
                let options = if sub.passive {
                    EventListenerOptions::default()
                } else {
                    EventListenerOptions::enable_prevent_default()
                };
                let listener =
                    EventListener::new_with_options(&target, sub.event, options, move |event| {
                        if let Some(page) = page.upgrade() {
                            page.route(route, index, event);
                        }
                    });
                self.listeners.borrow_mut().push(listener);
            }
        }
    }

    fn route(self: &Rc<Self>, route: Route, index: usize, event: &Event) {
        let page_event = match route {
            Route::Navbar => PageEvent::Scroll,
            Route::Highlight => {
                if let Some(highlight) = self.highlight.borrow().as_ref() {
                    highlight.call(());
                }
                return;
            }
            Route::MenuToggle => PageEvent::MenuToggleClicked,
            Route::NavLink => PageEvent::NavLinkClicked(index),
            Route::OutsideClick => PageEvent::DocumentClicked {
                inside_menu: self.inside_menu(event),
            },
            Route::OverlayClick => {
                if !self.on_overlay(event) {
                    return;
                }
                PageEvent::OverlayClicked
            }
            Route::StoryEnter => PageEvent::StoryEnter,
            Route::StoryLeave => PageEvent::StoryLeave,
            Route::GalleryZoom => PageEvent::GalleryClicked,
            Route::SocialClick => PageEvent::SocialClicked {
                index,
                label: self
                    .social_icons
                    .get(index)
                    .and_then(|icon| icon.get_attribute("aria-label")),
            },
            Route::SocialKey => match event.dyn_ref::<KeyboardEvent>() {
                Some(key_event) => PageEvent::SocialKeyPress {
                    index,
                    key: key_event.key(),
                },
                None => return,
            },
            Route::KeyboardMode => match event.dyn_ref::<KeyboardEvent>() {
                Some(key_event) => PageEvent::KeyDown {
                    key: key_event.key(),
                },
                None => return,
            },
            Route::PointerMode => PageEvent::MouseDown,
        };
        self.dispatch(page_event, Some(event));
    }

    fn inside_menu(&self, event: &Event) -> bool {
        let Some(node) = event_node(event) else {
            return false;
        };
        [&self.menu, &self.menu_toggle]
            .into_iter()
            .flatten()
            .any(|el| el.contains(Some(&node)))
    }

    fn on_overlay(&self, event: &Event) -> bool {
        let Some(node) = event_node(event) else {
            return false;
        };
        self.overlay
            .borrow()
            .as_ref()
            .map_or(false, |overlay| overlay.contains(Some(&node)))
    }

    fn dispatch(self: &Rc<Self>, event: PageEvent, raw: Option<&Event>) {
        let effects = self.controller.borrow_mut().handle(event, &**self);
        self.apply(effects, raw);
    }

    fn element(&self, node: Node) -> Option<HtmlElement> {
        match node {
            Node::Navbar => self.navbar.clone(),
            Node::MenuToggle => self.menu_toggle.clone(),
            Node::Menu => self.menu.clone(),
            Node::NavLink(i) => self.nav_links.get(i).cloned(),
            Node::Section(i) => self.sections.get(i).cloned(),
            Node::Image(i) => self.images.get(i).map(|img| HtmlElement::from(img.clone())),
            Node::Story => self.story.clone(),
            Node::Gallery => self.gallery.clone(),
            Node::Social(i) => self.social_icons.get(i).cloned(),
            Node::Body => self.document.body(),
        }
    }

    fn apply(self: &Rc<Self>, effects: Vec<Effect>, raw: Option<&Event>) {
        for effect in effects {
            match effect {
                Effect::Class { node, class, on } => {
                    if let Some(el) = self.element(node) {
                        let list = el.class_list();
                        let result = if on {
                            list.add_1(class)
                        } else {
                            list.remove_1(class)
                        };
                        if let Err(e) = result {
                            warn!("Failed to update class {}: {:?}", class, e);
                        }
                    }
                }
                Effect::Style { node, rules } => {
                    if let Some(el) = self.element(node) {
                        set_styles(&el, rules);
                    }
                }
                Effect::PreventDefault => {
                    if let Some(event) = raw {
                        event.prevent_default();
                    }
                }
                Effect::ScrollTo { top } => {
                    let options = ScrollToOptions::new();
                    options.set_top(top);
                    options.set_behavior(ScrollBehavior::Smooth);
                    self.window.scroll_to_with_scroll_to_options(&options);
                }
                Effect::Unobserve(node) => self.unobserve(node),
                Effect::AwaitLoad(node) => self.await_load(node),
                Effect::ShowOverlay => self.show_overlay(),
                Effect::HideOverlay => self.hide_overlay(),
                Effect::Ripple(node) => self.ripple(node),
                Effect::Click(node) => {
                    if let Some(el) = self.element(node) {
                        el.click();
                    }
                }
                Effect::Log(line) => info!("{}", line),
            }
        }
    }

    fn observe(
        self: &Rc<Self>,
        targets: Vec<Element>,
        init: &IntersectionObserverInit,
        on_visible: fn(&Page, usize) -> PageEvent,
    ) -> Result<Option<Observer>, PageError> {
        if targets.is_empty() {
            return Ok(None);
        }

        let page = Rc::downgrade(self);
        let watched = targets.clone();
        let callback = ObserverCallback::new(move |entries: Array, _: IntersectionObserver| {
            let Some(page) = page.upgrade() else {
                return;
            };
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let target = web_sys::Node::from(entry.target());
                if let Some(index) = watched.iter().position(|el| el.is_same_node(Some(&target))) {
                    let event = on_visible(&page, index);
                    page.dispatch(event, None);
                }
            }
        });

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), init)?;
        for target in &targets {
            observer.observe(target);
        }
        Ok(Some(Observer {
            inner: observer,
            _callback: callback,
        }))
    }

    fn observe_sections(self: &Rc<Self>) -> Result<(), PageError> {
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(self.config.reveal_threshold));
        init.set_root_margin(&self.config.reveal_root_margin);

        let targets = self.sections.iter().map(|s| Element::from(s.clone())).collect();
        let observer = self.observe(targets, &init, |_, index| PageEvent::SectionVisible(index))?;
        self.section_observer.replace(observer);
        Ok(())
    }

    fn observe_images(self: &Rc<Self>) -> Result<(), PageError> {
        let init = IntersectionObserverInit::new();
        let targets = self.images.iter().map(|img| Element::from(img.clone())).collect();
        let observer = self.observe(targets, &init, |page, index| PageEvent::ImageVisible {
            index,
            complete: page.images.get(index).map_or(false, |img| img.complete()),
        })?;
        self.image_observer.replace(observer);
        Ok(())
    }

    fn unobserve(&self, node: Node) {
        let observer = match node {
            Node::Section(_) => &self.section_observer,
            Node::Image(_) => &self.image_observer,
            _ => return,
        };
        if let (Some(observer), Some(target)) = (observer.borrow().as_ref(), self.element(node)) {
            observer.inner.unobserve(&target);
        }
    }

    fn await_load(self: &Rc<Self>, node: Node) {
        let Node::Image(index) = node else {
            return;
        };
        let Some(img) = self.images.get(index) else {
            return;
        };
        let page = Rc::downgrade(self);
        let listener = EventListener::once(img, "load", move |_| {
            if let Some(page) = page.upgrade() {
                page.dispatch(PageEvent::ImageLoaded(index), None);
            }
        });
        self.listeners.borrow_mut().push(listener);
    }

    fn create_html(&self, tag: &str) -> Result<HtmlElement, PageError> {
        self.document
            .create_element(tag)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PageError::Js(format!("<{}> is not an HTML element", tag)))
    }

    fn show_overlay(&self) {
        if self.overlay.borrow().is_some() {
            return;
        }
        let Some(body) = self.document.body() else {
            return;
        };
        let overlay = match self.create_html("div") {
            Ok(overlay) => overlay,
            Err(e) => {
                warn!("Failed to create overlay: {}", e);
                return;
            }
        };
        overlay.set_id(styles::OVERLAY_ID);
        set_styles(&overlay, styles::OVERLAY);
        if let Err(e) = body.append_child(&overlay) {
            warn!("Failed to attach overlay: {:?}", e);
            return;
        }
        self.overlay.replace(Some(overlay));
    }

    fn hide_overlay(&self) {
        let overlay = self.overlay.borrow_mut().take();
        if let Some(overlay) = overlay {
            overlay.remove();
        }
    }

    fn ripple(&self, node: Node) {
        let Some(icon) = self.element(node) else {
            return;
        };
        let ripple = match self.create_html("span") {
            Ok(ripple) => ripple,
            Err(e) => {
                warn!("Failed to create ripple: {}", e);
                return;
            }
        };
        set_styles(&ripple, styles::RIPPLE);
        set_styles(&icon, styles::RIPPLE_HOST);
        if let Err(e) = icon.append_child(&ripple) {
            warn!("Failed to attach ripple: {:?}", e);
            return;
        }
        Transient::spawn(&GlooTimer, Element::from(ripple), self.config.ripple_ms);
    }
}

impl Layout for Page {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn navbar_height(&self) -> f64 {
        self.navbar
            .as_ref()
            .map_or(0.0, |navbar| f64::from(navbar.offset_height()))
    }

    fn landmark_top(&self) -> Option<f64> {
        self.landmark
            .as_ref()
            .map(|landmark| f64::from(landmark.offset_top()))
    }

    fn sections(&self) -> Vec<SectionBox> {
        self.sections
            .iter()
            .map(|section| SectionBox {
                id: Some(section.id()).filter(|id| !id.is_empty()),
                top: f64::from(section.offset_top()),
                height: f64::from(section.offset_height()),
            })
            .collect()
    }

    fn fragment_top(&self, id: &str) -> Option<f64> {
        by_id(&self.document, id).map(|el| f64::from(el.offset_top()))
    }
}
