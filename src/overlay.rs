use serde::{Deserialize, Serialize};

use crate::face::FaceAnchor;

/// オーバーレイ画像のピクセルサイズ（縦横比のみ使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayAsset {
    pub width: u32,
    pub height: u32,
}

impl OverlayAsset {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 高さ / 幅。幅0なら None
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.width == 0 {
            return None;
        }
        Some(self.height as f32 / self.width as f32)
    }
}

/// 描画側へ渡す画像の配置矩形（左上基準）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayPlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl OverlayPlacement {
    /// 顔アンカーを中心に、基準距離 × `scale_factor` の幅で配置
    pub fn from_anchor(
        anchor: &FaceAnchor,
        asset: OverlayAsset,
        scale_factor: f32,
    ) -> Option<Self> {
        let aspect = asset.aspect_ratio()?;
        let width = anchor.reference_distance * scale_factor;
        let height = width * aspect;
        Some(Self {
            x: anchor.center.x - width / 2.0,
            y: anchor.center.y - height / 2.0,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::FacePair;
    use crate::pose::Point2D;

    fn anchor(cx: f32, cy: f32, distance: f32) -> FaceAnchor {
        FaceAnchor {
            center: Point2D::new(cx, cy),
            reference_distance: distance,
            source: FacePair::Ears,
        }
    }

    #[test]
    fn test_placement_centered_on_anchor() {
        let asset = OverlayAsset::new(200, 300);
        let face = anchor(320.0, 240.0, 40.0);
        let placement = OverlayPlacement::from_anchor(&face, asset, 3.0).unwrap();
        assert!((placement.width - 120.0).abs() < 1e-4);
        assert!((placement.height - 180.0).abs() < 1e-4);
        assert!((placement.x - 260.0).abs() < 1e-4);
        assert!((placement.y - 150.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_width_asset() {
        assert_eq!(OverlayAsset::new(0, 100).aspect_ratio(), None);
        let asset = OverlayAsset::new(0, 100);
        assert!(OverlayPlacement::from_anchor(&anchor(0.0, 0.0, 10.0), asset, 3.0).is_none());
    }
}
