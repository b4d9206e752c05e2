/// Geometry the controller reads. The browser implementation measures the
/// live page on every call; tests hand in fixed numbers.
pub trait Layout {
    fn scroll_y(&self) -> f64;
    fn viewport_height(&self) -> f64;
    /// 0 when the page has no navbar.
    fn navbar_height(&self) -> f64;
    fn landmark_top(&self) -> Option<f64>;
    /// Top-level content sections in document order.
    fn sections(&self) -> Vec<SectionBox>;
    /// Top offset of the element with the given id, if it exists.
    fn fragment_top(&self, id: &str) -> Option<f64>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBox {
    pub id: Option<String>,
    pub top: f64,
    pub height: f64,
}

impl SectionBox {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: Some(id.into()),
            top,
            height,
        }
    }
}

/// Half-open scroll range `[start, end)` attributed to one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub start: f64,
    pub end: f64,
}

impl Band {
    pub fn for_section(section: &SectionBox, navbar_height: f64, lead: f64) -> Self {
        let start = section.top - navbar_height - lead;
        Self {
            start,
            end: start + section.height,
        }
    }

    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Scroll offset from which the navbar counts as scrolled. Without the
/// landmark section the viewport height stands in.
pub fn navbar_trigger(landmark_top: Option<f64>, viewport_height: f64, preroll: f64) -> f64 {
    match landmark_top {
        Some(top) => top - preroll,
        None => viewport_height,
    }
}

/// Index of the first section (document order) whose band holds `offset`.
/// Overlapping bands are not expected from the page layout; if they occur
/// the earlier section wins.
pub fn active_section(
    sections: &[SectionBox],
    offset: f64,
    navbar_height: f64,
    lead: f64,
) -> Option<usize> {
    sections
        .iter()
        .position(|section| Band::for_section(section, navbar_height, lead).contains(offset))
}

/// `"#menu"` -> `Some("menu")`, bare `"#"` -> `Some("")`. Anything that is
/// not an in-page fragment yields `None`.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.trim().strip_prefix('#')
}
