use std::collections::HashSet;

use super::error::{SiteError, SiteResult};

/// A top-level page of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Home,
    About,
    Services,
    Technology,
    Contact,
}

impl PageId {
    /// Pages reachable through a polyhedron face.
    pub const DETAIL: [PageId; 4] = [Self::About, Self::Services, Self::Technology, Self::Contact];

    pub fn parse(id: &str) -> SiteResult<Self> {
        match id {
            "home" => Ok(Self::Home),
            "about" => Ok(Self::About),
            "services" => Ok(Self::Services),
            "technology" => Ok(Self::Technology),
            "contact" => Ok(Self::Contact),
            other => Err(SiteError::UnknownPage(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Services => "services",
            Self::Technology => "technology",
            Self::Contact => "contact",
        }
    }

    /// The face that opens this page. `None` for home.
    pub fn face(self) -> Option<FaceId> {
        match self {
            Self::Home => None,
            Self::About => Some(FaceId::Front),
            Self::Services => Some(FaceId::Back),
            Self::Technology => Some(FaceId::Left),
            Self::Contact => Some(FaceId::Right),
        }
    }

    /// The view element holding this page.
    pub fn view(self) -> View {
        match self {
            Self::Home => View::Home,
            page => View::Page(page),
        }
    }
}

/// A clickable face of the polyhedron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceId {
    Front,
    Back,
    Left,
    Right,
}

impl FaceId {
    pub fn parse(id: &str) -> SiteResult<Self> {
        match id {
            "front" => Ok(Self::Front),
            "back" => Ok(Self::Back),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(SiteError::UnknownFace(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    pub fn page(self) -> PageId {
        match self {
            Self::Front => PageId::About,
            Self::Back => PageId::Services,
            Self::Left => PageId::Technology,
            Self::Right => PageId::Contact,
        }
    }
}

/// Logical case identifiers of the case menu. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseId {
    Case1,
    Case2,
    Case3,
    Case4,
}

impl CaseId {
    pub const ALL: [CaseId; 4] = [Self::Case1, Self::Case2, Self::Case3, Self::Case4];

    pub fn parse(id: &str) -> SiteResult<Self> {
        match id {
            "case1" => Ok(Self::Case1),
            "case2" => Ok(Self::Case2),
            "case3" => Ok(Self::Case3),
            "case4" => Ok(Self::Case4),
            other => Err(SiteError::UnknownCase(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Case1 => "case1",
            Self::Case2 => "case2",
            Self::Case3 => "case3",
            Self::Case4 => "case4",
        }
    }

    /// Yaw preset (degrees) that brings this case's face to the front.
    pub fn yaw_deg(self) -> f32 {
        match self {
            Self::Case1 => 0.0,
            Self::Case2 => 90.0,
            Self::Case3 => 270.0,
            Self::Case4 => 180.0,
        }
    }
}

/// A page element whose class list the storyboards drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Loader,
    Home,
    Page(PageId),
    Pyramid,
    Hologram,
    GlassCanvas,
    MiniLoader,
    AuxMenu,
    Case(CaseId),
    CaseFace(CaseId),
}

/// A class toggled on a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Hidden,
    Visible,
    FadeOut,
    Active,
    Dragging,
    Glowing,
}

impl Class {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Visible => "visible",
            Self::FadeOut => "fade-out",
            Self::Active => "active",
            Self::Dragging => "dragging",
            Self::Glowing => "glowing",
        }
    }
}

/// Boolean class flags per view, standing in for DOM class lists.
#[derive(Debug, Clone, Default)]
pub struct ViewFlags {
    set: HashSet<(View, Class)>,
}

impl ViewFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear a flag. Returns true when the flag actually changed.
    pub fn set(&mut self, view: View, class: Class, on: bool) -> bool {
        if on {
            self.set.insert((view, class))
        } else {
            self.set.remove(&(view, class))
        }
    }

    pub fn has(&self, view: View, class: Class) -> bool {
        self.set.contains(&(view, class))
    }

    /// A view counts as shown when it is not hidden.
    pub fn is_shown(&self, view: View) -> bool {
        !self.has(view, Class::Hidden)
    }
}

/// Output events for the DOM layer, drained once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteEvent {
    ClassChanged { view: View, class: Class, on: bool },
    GlyphRevealed { index: usize, glyph: char },
    GlyphColored { index: usize, color: String },
    FormAcknowledged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_and_faces_map_both_ways() {
        for page in PageId::DETAIL {
            let face = page.face().unwrap();
            assert_eq!(face.page(), page);
        }
        assert_eq!(PageId::Home.face(), None);
    }

    #[test]
    fn parse_rejects_unknown_ids() {
        assert!(matches!(CaseId::parse("case5"), Err(SiteError::UnknownCase(id)) if id == "case5"));
        assert!(matches!(PageId::parse("blog"), Err(SiteError::UnknownPage(_))));
        assert!(matches!(FaceId::parse("top"), Err(SiteError::UnknownFace(_))));
        assert_eq!(CaseId::parse("case3").unwrap(), CaseId::Case3);
    }

    #[test]
    fn case_yaw_presets() {
        let yaws: Vec<f32> = CaseId::ALL.iter().map(|c| c.yaw_deg()).collect();
        assert_eq!(yaws, vec![0.0, 90.0, 270.0, 180.0]);
    }

    #[test]
    fn view_flags_report_changes() {
        let mut flags = ViewFlags::new();
        assert!(flags.set(View::Home, Class::Visible, true));
        assert!(!flags.set(View::Home, Class::Visible, true));
        assert!(flags.has(View::Home, Class::Visible));
        assert!(flags.set(View::Home, Class::Visible, false));
        assert!(!flags.set(View::Home, Class::Visible, false));
    }
}
