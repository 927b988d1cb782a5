//! Theme composition
//!
//! Turns a `ThemeDocument` plus the device's capability set into fully
//! resolved attribute maps, one per region per screen.
//!
//! Order of operations:
//! 1. Overlay the selected color scheme onto `#base`, `#resources`, `#pallet`
//! 2. Gate every reserved section against the capability set
//! 3. Register each `#elements` entry that has an `area` as a named rect
//! 4. Walk each screen's entries in document order, merging over the running
//!    base (see `compose_screen`)
//! 5. Merge `#override` entries into the composed regions

use super::document::{EntryKind, ScreenEntry, Section, ThemeDocument};
use super::error::{Result, ThemeError};
use super::requirements::{gate_map, satisfied, CapabilitySet};
use super::value::{merge_maps, ThemeMap, ThemeValue};
use crate::geometry::{NamedRects, ROOT};
use indexmap::IndexMap;
use serde::Serialize;

/// Output of composition
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComposedTheme {
    /// Color scheme that was applied, if the theme declares any
    pub scheme: Option<String>,
    /// `#config` passthrough
    pub config: ThemeMap,
    /// Named colors
    pub pallet: ThemeMap,
    /// Logical resource name -> file name
    pub resources: ThemeMap,
    /// Gated element templates
    pub elements: ThemeMap,
    /// screen -> region -> resolved attributes
    pub screens: IndexMap<String, ThemeMap>,
}

impl ComposedTheme {
    pub fn screen(&self, name: &str) -> Result<&ThemeMap> {
        self.screens
            .get(name)
            .ok_or_else(|| ThemeError::UnknownScreen(name.to_string()))
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Sections collected from the document before composition
#[derive(Default)]
struct Parts<'a> {
    base: ThemeMap,
    resources: ThemeMap,
    elements: ThemeMap,
    pallet: ThemeMap,
    overrides: ThemeMap,
    config: ThemeMap,
    schemes: Vec<(&'a str, &'a super::document::Scheme)>,
    screens: Vec<(&'a str, &'a [ScreenEntry])>,
}

impl<'a> Parts<'a> {
    fn collect(doc: &'a ThemeDocument) -> Self {
        let mut parts = Parts::default();
        for section in doc.sections() {
            match section {
                Section::Base(map) => parts.base = merge_maps(&parts.base, map),
                Section::Resources(map) => parts.resources = merge_maps(&parts.resources, map),
                Section::Elements(map) => parts.elements = merge_maps(&parts.elements, map),
                Section::Pallet(map) => parts.pallet = merge_maps(&parts.pallet, map),
                Section::Override(map) => parts.overrides = merge_maps(&parts.overrides, map),
                Section::Config(map) => parts.config = merge_maps(&parts.config, map),
                Section::Schemes(schemes) => parts
                    .schemes
                    .extend(schemes.iter().map(|(name, s)| (name.as_str(), s))),
                Section::Screen { name, entries } => {
                    parts.screens.push((name.as_str(), entries.as_slice()))
                }
            }
        }
        parts
    }

    /// Overlay the requested scheme; `None` picks the first declared one
    fn apply_scheme(&mut self, requested: Option<&str>) -> Result<Option<String>> {
        let chosen = match requested {
            Some(name) => match self.schemes.iter().find(|(n, _)| *n == name) {
                Some(found) => Some(*found),
                None => {
                    return Err(ThemeError::UnknownScheme {
                        requested: name.to_string(),
                        available: self
                            .schemes
                            .iter()
                            .map(|(n, _)| *n)
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
                }
            },
            None => self.schemes.first().copied(),
        };

        let Some((name, scheme)) = chosen else {
            return Ok(None);
        };
        self.base = merge_maps(&self.base, &scheme.base);
        self.resources = merge_maps(&self.resources, &scheme.resources);
        self.pallet = merge_maps(&self.pallet, &scheme.pallet);
        tracing::debug!(scheme = name, "applied color scheme");
        Ok(Some(name.to_string()))
    }
}

/// Compose every screen of `doc`
///
/// Elements with an `area` are registered in `rects` as a side effect.
pub fn compose(
    doc: &ThemeDocument,
    caps: &CapabilitySet,
    scheme: Option<&str>,
    rects: &mut NamedRects,
) -> Result<ComposedTheme> {
    let mut parts = Parts::collect(doc);
    let scheme = parts.apply_scheme(scheme)?;

    let base = gate_map(&parts.base, caps)?;
    let elements = gate_map(&parts.elements, caps)?;
    let overrides = gate_map(&parts.overrides, caps)?;

    register_elements(&elements, rects)?;

    let mut screens = IndexMap::new();
    for (name, entries) in &parts.screens {
        let mut regions = compose_screen(name, entries, &base, &elements, caps)?;
        if let Some(ThemeValue::Map(screen_overrides)) = overrides.get(*name) {
            apply_overrides(&mut regions, screen_overrides, &base);
        }
        tracing::debug!(screen = *name, regions = regions.len(), "composed screen");
        screens.insert(name.to_string(), regions);
    }

    for name in overrides.keys() {
        if !screens.contains_key(name) {
            tracing::warn!(screen = %name, "#override names a screen the theme does not define");
        }
    }

    Ok(ComposedTheme {
        scheme,
        config: gate_map(&parts.config, caps)?,
        pallet: gate_map(&parts.pallet, caps)?,
        resources: gate_map(&parts.resources, caps)?,
        elements,
        screens,
    })
}

fn register_elements(elements: &ThemeMap, rects: &mut NamedRects) -> Result<()> {
    for (name, element) in elements {
        let Some(map) = element.as_map() else {
            continue;
        };
        let Some(area) = map.get("area") else {
            continue;
        };
        let parent = map.get("parent").and_then(ThemeValue::as_str).unwrap_or(ROOT);
        rects
            .make_rect(parent, Some(name), &area.to_json())
            .map_err(|source| ThemeError::Geometry {
                screen: "#elements".to_string(),
                region: name.clone(),
                source,
            })?;
    }
    Ok(())
}

/// Merge one screen's entries in document order
///
/// - `#base` restarts the running base from the theme base plus its data
/// - ordinary entries resolve to `running_base ⊕ data`
/// - `#element:E[:name]` resolves to `running_base ⊕ elements[E] ⊕ data`
/// - an entry with a met requirement suffix whose name was already produced
///   merges into that earlier result instead of starting from the base
fn compose_screen(
    screen: &str,
    entries: &[ScreenEntry],
    theme_base: &ThemeMap,
    elements: &ThemeMap,
    caps: &CapabilitySet,
) -> Result<ThemeMap> {
    let mut running_base = theme_base.clone();
    let mut out = ThemeMap::new();

    for entry in entries {
        if !satisfied(&entry.requirements, caps) {
            tracing::trace!(screen, entry = ?entry.kind, "skipped by requirements");
            continue;
        }
        let qualified = !entry.requirements.is_empty();
        let data = gate_map(&entry.data, caps)?;

        let (name, layer) = match &entry.kind {
            EntryKind::Base => {
                running_base = if qualified {
                    merge_maps(&running_base, &data)
                } else {
                    merge_maps(theme_base, &data)
                };
                continue;
            }
            EntryKind::Region { name } => (name, data),
            EntryKind::Element { element, name } => {
                let template = elements
                    .get(element)
                    .and_then(ThemeValue::as_map)
                    .ok_or_else(|| ThemeError::UnknownElement {
                        screen: screen.to_string(),
                        element: element.clone(),
                    })?;
                (name, merge_maps(template, &data))
            }
        };

        let resolved = match out.get(name) {
            Some(ThemeValue::Map(prior)) if qualified => merge_maps(prior, &layer),
            _ => merge_maps(&running_base, &layer),
        };
        out.insert(name.clone(), ThemeValue::Map(resolved));
    }

    Ok(out)
}

fn apply_overrides(regions: &mut ThemeMap, overrides: &ThemeMap, theme_base: &ThemeMap) {
    for (region, attrs) in overrides {
        let Some(attrs) = attrs.as_map() else {
            continue;
        };
        let merged = match regions.get(region) {
            Some(ThemeValue::Map(prior)) => merge_maps(prior, attrs),
            _ => merge_maps(theme_base, attrs),
        };
        regions.insert(region.clone(), ThemeValue::Map(merged));
    }
}
