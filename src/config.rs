use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::overlay::OverlayAsset;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub text: TextConfig,
    #[serde(default)]
    pub draw: DrawConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OverlayConfig {
    /// 顔オーバーレイを出力するか
    #[serde(default)]
    pub enabled: bool,
    /// 顔幅に対する画像幅の倍率
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f32,
    /// オーバーレイ画像の幅（ピクセル）
    #[serde(default = "default_image_size")]
    pub image_width: u32,
    /// オーバーレイ画像の高さ（ピクセル）
    #[serde(default = "default_image_size")]
    pub image_height: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TextConfig {
    #[serde(default = "default_text_x")]
    pub x: f32,
    /// 1行目のベースライン
    #[serde(default = "default_text_y_start")]
    pub y_start: f32,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    #[serde(default = "default_text_size")]
    pub size: f32,
    /// 小数点以下の桁数
    #[serde(default = "default_precision")]
    pub precision: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DrawConfig {
    #[serde(default = "default_marker_diameter")]
    pub marker_diameter: f32,
    /// 推論側が骨格線を渡さないとき接続表から補完する
    #[serde(default = "default_derive_skeleton")]
    pub derive_skeleton: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct InputConfig {
    /// 壊れた行をスキップして続行する
    #[serde(default)]
    pub lenient: bool,
}

fn default_scale_factor() -> f32 {
    3.0
}

fn default_image_size() -> u32 {
    1
}

fn default_text_x() -> f32 {
    10.0
}

fn default_text_y_start() -> f32 {
    20.0
}

fn default_line_height() -> f32 {
    20.0
}

fn default_text_size() -> f32 {
    16.0
}

fn default_precision() -> usize {
    2
}

fn default_marker_diameter() -> f32 {
    10.0
}

fn default_derive_skeleton() -> bool {
    true
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            scale_factor: default_scale_factor(),
            image_width: default_image_size(),
            image_height: default_image_size(),
        }
    }
}

impl OverlayConfig {
    pub fn asset(&self) -> OverlayAsset {
        OverlayAsset::new(self.image_width, self.image_height)
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            x: default_text_x(),
            y_start: default_text_y_start(),
            line_height: default_line_height(),
            size: default_text_size(),
            precision: default_precision(),
        }
    }
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            marker_diameter: default_marker_diameter(),
            derive_skeleton: default_derive_skeleton(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// 読めなければデフォルト設定
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{:#}; using defaults", e);
                Self::default()
            }
        }
    }
}
