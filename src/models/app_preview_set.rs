//! App preview set model and the device classes previews are grouped by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::envelope::{PagedRelationship, Relationship, Resource, ResourceKind};

/// Marker for the `appPreviewSets` resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppPreviewSet;

impl ResourceKind for AppPreviewSet {
    const TYPE: &'static str = "appPreviewSets";
    type Attributes = AppPreviewSetAttributes;
    type Relationships = AppPreviewSetRelationships;
}

/// Device class a preview targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreviewType {
    #[serde(rename = "APPLE_TV")]
    AppleTv,
    #[serde(rename = "DESKTOP")]
    Desktop,
    #[serde(rename = "IPAD_105")]
    Ipad105,
    #[serde(rename = "IPAD_97")]
    Ipad97,
    #[serde(rename = "IPAD_PRO_129")]
    IpadPro129,
    #[serde(rename = "IPAD_PRO_3GEN_11")]
    IpadPro3Gen11,
    #[serde(rename = "IPAD_PRO_3GEN_129")]
    IpadPro3Gen129,
    #[serde(rename = "IPHONE_35")]
    Iphone35,
    #[serde(rename = "IPHONE_40")]
    Iphone40,
    #[serde(rename = "IPHONE_47")]
    Iphone47,
    #[serde(rename = "IPHONE_55")]
    Iphone55,
    #[serde(rename = "IPHONE_58")]
    Iphone58,
    #[serde(rename = "IPHONE_65")]
    Iphone65,
    #[serde(rename = "WATCH_SERIES_3")]
    WatchSeries3,
    #[serde(rename = "WATCH_SERIES_4")]
    WatchSeries4,
}

impl PreviewType {
    /// Every preview type, in wire order.
    pub const ALL: [PreviewType; 15] = [
        PreviewType::AppleTv,
        PreviewType::Desktop,
        PreviewType::Ipad105,
        PreviewType::Ipad97,
        PreviewType::IpadPro129,
        PreviewType::IpadPro3Gen11,
        PreviewType::IpadPro3Gen129,
        PreviewType::Iphone35,
        PreviewType::Iphone40,
        PreviewType::Iphone47,
        PreviewType::Iphone55,
        PreviewType::Iphone58,
        PreviewType::Iphone65,
        PreviewType::WatchSeries3,
        PreviewType::WatchSeries4,
    ];

    /// The wire literal, e.g. `IPHONE_65`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewType::AppleTv => "APPLE_TV",
            PreviewType::Desktop => "DESKTOP",
            PreviewType::Ipad105 => "IPAD_105",
            PreviewType::Ipad97 => "IPAD_97",
            PreviewType::IpadPro129 => "IPAD_PRO_129",
            PreviewType::IpadPro3Gen11 => "IPAD_PRO_3GEN_11",
            PreviewType::IpadPro3Gen129 => "IPAD_PRO_3GEN_129",
            PreviewType::Iphone35 => "IPHONE_35",
            PreviewType::Iphone40 => "IPHONE_40",
            PreviewType::Iphone47 => "IPHONE_47",
            PreviewType::Iphone55 => "IPHONE_55",
            PreviewType::Iphone58 => "IPHONE_58",
            PreviewType::Iphone65 => "IPHONE_65",
            PreviewType::WatchSeries3 => "WATCH_SERIES_3",
            PreviewType::WatchSeries4 => "WATCH_SERIES_4",
        }
    }
}

impl fmt::Display for PreviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreviewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PreviewType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown preview type: {s}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPreviewSetAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_type: Option<PreviewType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPreviewSetRelationships {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_store_version_localization: Option<Relationship>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_previews: Option<PagedRelationship>,
}

impl Resource<AppPreviewSet> {
    pub fn preview_type(&self) -> Option<PreviewType> {
        self.attributes.as_ref()?.preview_type
    }

    /// Ids of the previews in this set, when linkage was included.
    pub fn app_preview_ids(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.app_previews.as_ref())
            .and_then(|p| p.data.as_ref())
            .map(|data| data.iter().map(|d| d.id.as_str()).collect())
            .unwrap_or_default()
    }
}
