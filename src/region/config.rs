// Typed region attributes
//
// A composed region is an untyped attribute map. `RegionConfig::from_attrs`
// reads every recognized key through serde into a concrete field, so a
// wrong type, a bad enum token or an out-of-range color fails here, while
// the screen is being built, with screen/region/attribute in the error.
//
// Unknown keys are ignored; themes carry keys for other frontends.

use super::color::{Color, Pallet};
use crate::geometry::{Anchor, CoordSpec, MAX_PIXELS};
use crate::theme::{Result, ThemeError, ThemeMap};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Largest `font-size` a theme may ask for
pub const MAX_FONT_SIZE: u32 = 4096;

/// How an image fills the region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMode {
    #[default]
    Stretch,
    Fit,
    Center,
    /// Scale the middle, keep the `image-slice` borders
    Ninepatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
    /// Run to the end, pause, jump back to the start
    Slide,
    /// Run to the end, pause, run back, pause
    Marquee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollAxis {
    #[default]
    Horizontal,
    Vertical,
}

/// Every attribute a region understands, validated
#[derive(Debug, Clone, PartialEq)]
pub struct RegionConfig {
    pub area: CoordSpec,
    pub parent: Option<String>,

    // ─── Box ─────────────────────────────────────────────────
    pub fill: Option<Color>,
    pub outline: Option<Color>,
    pub thickness: i32,
    pub roundness: i32,
    pub border_x: i32,
    pub border_y: i32,

    // ─── Image ───────────────────────────────────────────────
    pub image: Option<String>,
    pub image_mode: ImageMode,
    pub image_slice: Option<[i32; 4]>,

    // ─── Text ────────────────────────────────────────────────
    pub text: Option<String>,
    pub font: Option<String>,
    pub font_size: u32,
    pub font_color: Color,
    pub align: Anchor,
    pub wrap: bool,

    // ─── Auto-scroll ─────────────────────────────────────────
    pub autoscroll: Option<ScrollMode>,
    pub scroll_axis: ScrollAxis,
    /// Milliseconds per scroll step
    pub scroll_speed: u64,
    /// Pixels per scroll step
    pub scroll_amount: i32,
    /// Dwell at the start and at the end, milliseconds
    pub scroll_delay: [u64; 2],

    // ─── List / bar ──────────────────────────────────────────
    pub list: Vec<String>,
    /// Parallel to `list`; `None` marks a header or separator
    pub options: Option<Vec<Value>>,
    pub item_size: i32,
    pub selected: usize,
    pub allow_wrap: bool,
    pub select_fill: Option<Color>,
    pub select_font_color: Option<Color>,
    /// `None` splits left and right groups
    pub bar: Vec<Option<String>>,
    pub bar_spacing: i32,
    pub selectedx: usize,
    pub focus: bool,

    // ─── Audio ───────────────────────────────────────────────
    pub select_sound: Option<String>,
    pub activate_sound: Option<String>,
    pub music: Option<String>,
}

/// Attribute reader carrying error context
struct Attrs<'a> {
    screen: &'a str,
    region: &'a str,
    map: &'a ThemeMap,
    pallet: &'a Pallet,
}

impl Attrs<'_> {
    fn invalid(&self, attribute: &str, reason: impl ToString) -> ThemeError {
        ThemeError::InvalidAttribute {
            screen: self.screen.to_string(),
            region: self.region.to_string(),
            attribute: attribute.to_string(),
            reason: reason.to_string(),
        }
    }

    fn raw(&self, key: &str) -> Option<Value> {
        self.map
            .get(key)
            .filter(|v| !v.is_null())
            .map(|v| v.to_json())
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.raw(key)
            .map(|v| serde_json::from_value(v).map_err(|e| self.invalid(key, e)))
            .transpose()
    }

    fn or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    fn color(&self, key: &str) -> Result<Option<Color>> {
        self.raw(key)
            .map(|v| Color::parse(&v, self.pallet).map_err(|e| self.invalid(key, e)))
            .transpose()
    }

    /// Pixel size in `0..=MAX_PIXELS`
    fn non_negative(&self, key: &str, default: i32) -> Result<i32> {
        let value = self.or(key, default)?;
        if !(0..=MAX_PIXELS).contains(&value) {
            return Err(self.invalid(
                key,
                format!("must be within 0..={}, found {}", MAX_PIXELS, value),
            ));
        }
        Ok(value)
    }
}

impl RegionConfig {
    pub fn from_attrs(screen: &str, region: &str, map: &ThemeMap, pallet: &Pallet) -> Result<Self> {
        let a = Attrs {
            screen,
            region,
            map,
            pallet,
        };

        let area = match a.raw("area") {
            Some(v) => CoordSpec::from_json(&v).map_err(|source| ThemeError::Geometry {
                screen: screen.to_string(),
                region: region.to_string(),
                source,
            })?,
            None => CoordSpec::FULL,
        };

        let font_size: u32 = a.or("font-size", 20)?;
        if !(1..=MAX_FONT_SIZE).contains(&font_size) {
            return Err(a.invalid(
                "font-size",
                format!("must be within 1..={}, found {}", MAX_FONT_SIZE, font_size),
            ));
        }

        let list: Vec<String> = a.or("list", Vec::new())?;
        let options: Option<Vec<Value>> = a.get("options")?;
        if let Some(options) = &options {
            if options.len() > list.len() {
                return Err(a.invalid(
                    "options",
                    format!("{} options for {} list entries", options.len(), list.len()),
                ));
            }
        }

        let bar: Vec<Option<String>> = a.or("bar", Vec::new())?;
        if bar.iter().filter(|item| item.is_none()).count() > 1 {
            return Err(a.invalid("bar", "at most one null separator is allowed"));
        }

        let item_size = a.non_negative("item-size", (font_size as i32 * 3) / 2)?;
        if item_size == 0 {
            return Err(a.invalid("item-size", "must be at least 1"));
        }

        let image_slice: Option<[i32; 4]> = a.get("image-slice")?;
        if image_slice.is_some_and(|s| s.iter().any(|v| !(0..=MAX_PIXELS).contains(v))) {
            return Err(a.invalid(
                "image-slice",
                format!("slice borders must be within 0..={}", MAX_PIXELS),
            ));
        }

        Ok(Self {
            area,
            parent: a.get("parent")?,
            fill: a.color("fill")?,
            outline: a.color("outline")?,
            thickness: a.non_negative("thickness", 1)?,
            roundness: a.non_negative("roundness", 0)?,
            border_x: a.non_negative("border-x", 0)?,
            border_y: a.non_negative("border-y", 0)?,
            image: a.get("image")?,
            image_mode: a.or("image-mode", ImageMode::default())?,
            image_slice,
            text: a.get("text")?,
            font: a.get("font")?,
            font_size,
            font_color: a.color("font-color")?.unwrap_or(Color::WHITE),
            align: a.or("align", Anchor::TopLeft)?,
            wrap: a.or("wrap", false)?,
            autoscroll: a.get("autoscroll")?,
            scroll_axis: a.or("scroll-axis", ScrollAxis::default())?,
            scroll_speed: a.or("scroll-speed", 30u64)?.max(1),
            scroll_amount: a.non_negative("scroll-amount", 1)?.max(1),
            scroll_delay: a.or("scroll-delay", [1000u64, 1000u64])?,
            list,
            options,
            item_size,
            selected: a.or("selected", 0usize)?,
            allow_wrap: a.or("allow-wrap", false)?,
            select_fill: a.color("select-fill")?,
            select_font_color: a.color("select-font-color")?,
            bar,
            bar_spacing: a.non_negative("bar-spacing", 8)?,
            selectedx: a.or("selectedx", 0usize)?,
            focus: a.or("focus", false)?,
            select_sound: a.get("select-sound")?,
            activate_sound: a.get("activate-sound")?,
            music: a.get("music")?,
        })
    }

    /// Whether list entry `index` can take the selection
    pub fn is_selectable(&self, index: usize) -> bool {
        if index >= self.list.len() {
            return false;
        }
        match &self.options {
            None => true,
            Some(options) => options.get(index).is_some_and(|o| !o.is_null()),
        }
    }

    pub fn option(&self, index: usize) -> Option<&Value> {
        self.options
            .as_ref()
            .and_then(|o| o.get(index))
            .filter(|o| !o.is_null())
    }
}
