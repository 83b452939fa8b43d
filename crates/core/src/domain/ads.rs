use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const MOBILE_BREAKPOINT_PX: u32 = 768;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AdPosition {
    Top,
    Bottom,
    Left,
    Right,
    SidebarLeft,
    SidebarRight,
    MobileTop,
    MobileBottom,
    Mobile,
    Desktop,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotDevice {
    Mobile,
    Desktop,
    Any,
}

impl AdPosition {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let normalized = value.trim().to_ascii_lowercase();
        let position = match normalized.as_str() {
            "" => return Err(CoreError::InvalidAdPosition(value.to_string())),
            "top" => AdPosition::Top,
            "bottom" => AdPosition::Bottom,
            "left" => AdPosition::Left,
            "right" => AdPosition::Right,
            "sidebar-left" => AdPosition::SidebarLeft,
            "sidebar-right" => AdPosition::SidebarRight,
            "mobile-top" => AdPosition::MobileTop,
            "mobile-bottom" => AdPosition::MobileBottom,
            "mobile" => AdPosition::Mobile,
            "desktop" => AdPosition::Desktop,
            _ => AdPosition::Other(normalized),
        };
        Ok(position)
    }

    pub fn as_str(&self) -> &str {
        match self {
            AdPosition::Top => "top",
            AdPosition::Bottom => "bottom",
            AdPosition::Left => "left",
            AdPosition::Right => "right",
            AdPosition::SidebarLeft => "sidebar-left",
            AdPosition::SidebarRight => "sidebar-right",
            AdPosition::MobileTop => "mobile-top",
            AdPosition::MobileBottom => "mobile-bottom",
            AdPosition::Mobile => "mobile",
            AdPosition::Desktop => "desktop",
            AdPosition::Other(name) => name,
        }
    }

    pub fn device(&self) -> SlotDevice {
        match self {
            AdPosition::MobileTop | AdPosition::MobileBottom | AdPosition::Mobile => {
                SlotDevice::Mobile
            }
            AdPosition::Left
            | AdPosition::Right
            | AdPosition::SidebarLeft
            | AdPosition::SidebarRight
            | AdPosition::Desktop => SlotDevice::Desktop,
            AdPosition::Top | AdPosition::Bottom | AdPosition::Other(_) => SlotDevice::Any,
        }
    }

    pub fn text_capacity(&self) -> usize {
        match self.device() {
            SlotDevice::Desktop => 400,
            SlotDevice::Mobile => 120,
            SlotDevice::Any => 200,
        }
    }
}

impl TryFrom<String> for AdPosition {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AdPosition::parse(&value)
    }
}

impl From<AdPosition> for String {
    fn from(value: AdPosition) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AdPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
}

impl Viewport {
    pub fn new(width: u32) -> Self {
        Self { width }
    }

    pub fn is_mobile(self) -> bool {
        self.width < MOBILE_BREAKPOINT_PX
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdCreative {
    pub id: i64,
    pub content: String,
    pub link_url: Option<String>,
    pub position: AdPosition,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdDraft {
    pub content: String,
    pub link_url: Option<String>,
    pub position: AdPosition,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<AdPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl AdPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.link_url.is_none()
            && self.position.is_none()
            && self.is_active.is_none()
    }
}

/// Whether a creative placed at `creative` may be shown in `slot`.
///
/// Exact matches always qualify. Generic `mobile`/`desktop` creatives fill
/// slots of that device class, but only when the viewport is of that class.
pub fn slot_accepts(slot: &AdPosition, creative: &AdPosition, viewport: Viewport) -> bool {
    if slot == creative {
        return true;
    }
    match creative {
        AdPosition::Mobile => slot.device() == SlotDevice::Mobile && viewport.is_mobile(),
        AdPosition::Desktop => slot.device() == SlotDevice::Desktop && !viewport.is_mobile(),
        _ => false,
    }
}

pub fn creatives_for_slot(
    creatives: &[AdCreative],
    slot: &AdPosition,
    viewport: Viewport,
) -> Vec<AdCreative> {
    creatives
        .iter()
        .filter(|creative| creative.is_active)
        .filter(|creative| slot_accepts(slot, &creative.position, viewport))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creative(id: i64, position: AdPosition, is_active: bool) -> AdCreative {
        AdCreative {
            id,
            content: format!("<b>ad {id}</b>"),
            link_url: None,
            position,
            is_active,
            created_at: None,
        }
    }

    #[test]
    fn parse_known_and_unknown_positions() {
        assert_eq!(AdPosition::parse("Sidebar-Left").unwrap(), AdPosition::SidebarLeft);
        assert_eq!(
            AdPosition::parse("footer").unwrap(),
            AdPosition::Other("footer".to_string())
        );
        assert!(AdPosition::parse("  ").is_err());
    }

    #[test]
    fn position_serializes_as_plain_string() {
        let json = serde_json::to_string(&AdPosition::MobileTop).unwrap();
        assert_eq!(json, "\"mobile-top\"");
        let parsed: AdPosition = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(parsed, AdPosition::Right);
    }

    #[test]
    fn exact_match_ignores_viewport() {
        let narrow = Viewport::new(375);
        assert!(slot_accepts(&AdPosition::Left, &AdPosition::Left, narrow));
    }

    #[test]
    fn generic_mobile_creative_needs_mobile_viewport() {
        let slot = AdPosition::MobileBottom;
        assert!(slot_accepts(&slot, &AdPosition::Mobile, Viewport::new(400)));
        assert!(!slot_accepts(&slot, &AdPosition::Mobile, Viewport::new(1280)));
        assert!(!slot_accepts(&AdPosition::Top, &AdPosition::Mobile, Viewport::new(400)));
    }

    #[test]
    fn generic_desktop_creative_needs_wide_viewport() {
        let slot = AdPosition::SidebarRight;
        assert!(slot_accepts(&slot, &AdPosition::Desktop, Viewport::new(MOBILE_BREAKPOINT_PX)));
        assert!(!slot_accepts(&slot, &AdPosition::Desktop, Viewport::new(700)));
    }

    #[test]
    fn creatives_for_slot_drops_inactive_and_mismatched() {
        let creatives = vec![
            creative(1, AdPosition::Top, true),
            creative(2, AdPosition::Top, false),
            creative(3, AdPosition::Bottom, true),
            creative(4, AdPosition::Top, true),
        ];
        let ids: Vec<_> = creatives_for_slot(&creatives, &AdPosition::Top, Viewport::new(1280))
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, [1, 4]);
    }
}
