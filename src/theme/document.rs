//! Theme document model
//!
//! The top level of a theme is a map of screens plus a handful of reserved
//! `#` sections. Parsing turns that map into a list of typed `Section`s so the
//! composer matches on kinds instead of sniffing key prefixes.
//!
//! ```json
//! {
//!   "#config":   { "name": "Default" },
//!   "#base":     { "font": "Roboto.ttf", "font-size": 20 },
//!   "#pallet":   { "accent": "#3399ff" },
//!   "#elements": { "button": { "area": [0, 0, 120, 40], "fill": "accent" } },
//!   "#schemes":  { "Dark": { "#pallet": { "accent": "#224488" } } },
//!   "main_menu": {
//!     "#base": { "font-color": "#ffffff" },
//!     "title": { "area": [0, 0, 1.0, 40], "text": "Ports" },
//!     "title[wide]": { "font-size": 28 },
//!     "#element:button:ok": { "text": "OK" }
//!   }
//! }
//! ```

use super::error::{Result, ThemeError};
use super::requirements::{split_requirements, Requirement};
use super::value::{ThemeMap, ThemeValue};
use indexmap::IndexMap;

const ELEMENT_PREFIX: &str = "#element:";

/// Reserved top-level section names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Base,
    Resources,
    Elements,
    Schemes,
    Pallet,
    Override,
    Config,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Base,
        SectionKind::Resources,
        SectionKind::Elements,
        SectionKind::Schemes,
        SectionKind::Pallet,
        SectionKind::Override,
        SectionKind::Config,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SectionKind::Base => "#base",
            SectionKind::Resources => "#resources",
            SectionKind::Elements => "#elements",
            SectionKind::Schemes => "#schemes",
            SectionKind::Pallet => "#pallet",
            SectionKind::Override => "#override",
            SectionKind::Config => "#config",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().find(|k| k.key() == key).copied()
    }
}

/// Overlay selected by color scheme name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scheme {
    pub base: ThemeMap,
    pub resources: ThemeMap,
    pub pallet: ThemeMap,
}

/// What a screen entry key denotes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// `#base`: replaces the running base for later entries
    Base,
    /// `#element:Element[:name]`: instance of a `#elements` template
    Element { element: String, name: String },
    /// Ordinary region
    Region { name: String },
}

/// One entry of a screen, in document order
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenEntry {
    pub kind: EntryKind,
    pub requirements: Vec<Requirement>,
    pub data: ThemeMap,
}

impl ScreenEntry {
    fn parse(screen: &str, key: &str, value: &ThemeValue) -> Result<Self> {
        let (bare, requirements) = split_requirements(key)?;

        let kind = if bare == "#base" {
            EntryKind::Base
        } else if let Some(rest) = bare.strip_prefix(ELEMENT_PREFIX) {
            let mut parts = rest.splitn(2, ':');
            let element = parts.next().unwrap_or_default().to_string();
            let name = parts
                .next()
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| element.clone());
            if element.is_empty() {
                return Err(ThemeError::UnknownElement {
                    screen: screen.to_string(),
                    element,
                });
            }
            EntryKind::Element { element, name }
        } else if bare.starts_with('#') {
            return Err(ThemeError::UnknownSection(format!("{}/{}", screen, bare)));
        } else {
            EntryKind::Region {
                name: bare.to_string(),
            }
        };

        let data = match value {
            ThemeValue::Map(map) => map.clone(),
            v if v.is_null() => ThemeMap::new(),
            other => {
                return Err(ThemeError::SectionNotAMap {
                    section: format!("{}/{}", screen, key),
                    found: other.kind(),
                })
            }
        };

        Ok(Self {
            kind,
            requirements,
            data,
        })
    }

    /// Name the entry produces in the composed screen
    pub fn output_name(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Base => None,
            EntryKind::Element { name, .. } => Some(name),
            EntryKind::Region { name } => Some(name),
        }
    }
}

/// Top-level section of a theme document
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Base(ThemeMap),
    Resources(ThemeMap),
    Elements(ThemeMap),
    Schemes(IndexMap<String, Scheme>),
    Pallet(ThemeMap),
    Override(ThemeMap),
    Config(ThemeMap),
    Screen {
        name: String,
        entries: Vec<ScreenEntry>,
    },
}

/// A parsed theme
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDocument {
    sections: Vec<Section>,
}

fn expect_map(section: &str, value: &ThemeValue) -> Result<ThemeMap> {
    match value {
        ThemeValue::Map(map) => Ok(map.clone()),
        other => Err(ThemeError::SectionNotAMap {
            section: section.to_string(),
            found: other.kind(),
        }),
    }
}

fn parse_scheme(name: &str, value: &ThemeValue) -> Result<Scheme> {
    let section = format!("#schemes/{}", name);
    let mut scheme = Scheme::default();
    for (key, value) in expect_map(&section, value)? {
        let slot = match SectionKind::from_key(&key) {
            Some(SectionKind::Base) => &mut scheme.base,
            Some(SectionKind::Resources) => &mut scheme.resources,
            Some(SectionKind::Pallet) => &mut scheme.pallet,
            _ => return Err(ThemeError::UnknownSection(format!("{}/{}", section, key))),
        };
        *slot = expect_map(&format!("{}/{}", section, key), &value)?;
    }
    Ok(scheme)
}

impl ThemeDocument {
    pub fn parse(value: &ThemeValue) -> Result<Self> {
        let top = value
            .as_map()
            .ok_or_else(|| ThemeError::NotAMap(value.kind()))?;

        let mut sections = Vec::with_capacity(top.len());
        for (key, value) in top {
            let section = if key.starts_with('#') {
                let kind = SectionKind::from_key(key)
                    .ok_or_else(|| ThemeError::UnknownSection(key.clone()))?;
                match kind {
                    SectionKind::Base => Section::Base(expect_map(key, value)?),
                    SectionKind::Resources => Section::Resources(expect_map(key, value)?),
                    SectionKind::Elements => Section::Elements(expect_map(key, value)?),
                    SectionKind::Pallet => Section::Pallet(expect_map(key, value)?),
                    SectionKind::Override => Section::Override(expect_map(key, value)?),
                    SectionKind::Config => Section::Config(expect_map(key, value)?),
                    SectionKind::Schemes => {
                        let mut schemes = IndexMap::new();
                        for (name, scheme) in expect_map(key, value)? {
                            let parsed = parse_scheme(&name, &scheme)?;
                            schemes.insert(name, parsed);
                        }
                        Section::Schemes(schemes)
                    }
                }
            } else {
                let entries = expect_map(key, value)?
                    .iter()
                    .map(|(entry_key, entry)| ScreenEntry::parse(key, entry_key, entry))
                    .collect::<Result<Vec<_>>>()?;
                Section::Screen {
                    name: key.clone(),
                    entries,
                }
            };
            sections.push(section);
        }

        Ok(Self { sections })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::parse(&value.into())
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Screen names in document order
    pub fn screen_names(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter_map(|s| match s {
                Section::Screen { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Declared color scheme names in document order
    pub fn scheme_names(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter_map(|s| match s {
                Section::Schemes(schemes) => Some(schemes.keys().map(String::as_str)),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: serde_json::Value) -> Result<ThemeDocument> {
        ThemeDocument::parse(&v.into())
    }

    #[test]
    fn reserved_sections_become_typed() {
        let d = doc(json!({
            "#base": {"font-size": 20},
            "#pallet": {"accent": "#ffffff"},
            "#config": {"name": "Test"},
            "main": {"title": {"text": "hi"}}
        }))
        .unwrap();
        assert!(matches!(d.sections()[0], Section::Base(_)));
        assert!(matches!(d.sections()[1], Section::Pallet(_)));
        assert!(matches!(d.sections()[2], Section::Config(_)));
        assert_eq!(d.screen_names(), vec!["main"]);
    }

    #[test]
    fn unknown_reserved_section_fails() {
        let err = doc(json!({"#bsae": {}})).unwrap_err();
        assert!(matches!(err, ThemeError::UnknownSection(s) if s == "#bsae"));
    }

    #[test]
    fn screen_entries_are_classified() {
        let d = doc(json!({
            "main": {
                "#base": {"fill": "#000000"},
                "title[wide]": {"text": "hi"},
                "#element:button": {},
                "#element:button:ok": null
            }
        }))
        .unwrap();
        let Section::Screen { entries, .. } = &d.sections()[0] else {
            panic!("expected screen");
        };
        assert_eq!(entries[0].kind, EntryKind::Base);
        assert_eq!(
            entries[1].kind,
            EntryKind::Region {
                name: "title".into()
            }
        );
        assert_eq!(entries[1].requirements.len(), 1);
        assert_eq!(
            entries[2].kind,
            EntryKind::Element {
                element: "button".into(),
                name: "button".into()
            }
        );
        assert_eq!(entries[3].output_name(), Some("ok"));
        assert!(entries[3].data.is_empty());
    }

    #[test]
    fn schemes_only_accept_overlay_sections() {
        let d = doc(json!({
            "#schemes": {
                "Dark": {"#pallet": {"bg": "#000000"}},
                "Light": {"#base": {"fill": "#ffffff"}}
            }
        }))
        .unwrap();
        assert_eq!(d.scheme_names(), vec!["Dark", "Light"]);

        let err = doc(json!({"#schemes": {"Dark": {"#elements": {}}}})).unwrap_err();
        assert!(matches!(err, ThemeError::UnknownSection(_)));
    }

    #[test]
    fn non_map_entries_fail() {
        let err = doc(json!({"main": {"title": [1, 2]}})).unwrap_err();
        assert!(matches!(err, ThemeError::SectionNotAMap { found: "list", .. }));
        let err = doc(json!([1])).unwrap_err();
        assert!(matches!(err, ThemeError::NotAMap("list")));
    }

    #[test]
    fn from_json_str_reports_parse_errors() {
        assert!(matches!(
            ThemeDocument::from_json_str("{"),
            Err(ThemeError::Json(_))
        ));
    }
}
