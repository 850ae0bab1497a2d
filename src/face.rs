use serde::Serialize;

use crate::pose::{Detection, KeypointName, Point2D};

/// アンカーの算出に使ったキーポイントの組
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FacePair {
    Ears,
    Eyes,
}

impl FacePair {
    fn names(self) -> (KeypointName, KeypointName) {
        match self {
            Self::Ears => (KeypointName::LeftEar, KeypointName::RightEar),
            Self::Eyes => (KeypointName::LeftEye, KeypointName::RightEye),
        }
    }
}

/// 顔オーバーレイの配置基準
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceAnchor {
    /// 左右の点の中点
    pub center: Point2D,
    /// 左右の点の距離（ピクセル）
    pub reference_distance: f32,
    pub source: FacePair,
}

/// 両耳、なければ両目から顔の中心と幅を求める
///
/// 耳と目を片方ずつ混ぜることはしない。
pub fn resolve_face_anchor(detection: &Detection) -> Option<FaceAnchor> {
    [FacePair::Ears, FacePair::Eyes]
        .into_iter()
        .find_map(|pair| anchor_from_pair(detection, pair))
}

fn anchor_from_pair(detection: &Detection, pair: FacePair) -> Option<FaceAnchor> {
    let (left_name, right_name) = pair.names();
    let left = detection.lookup(left_name)?;
    let right = detection.lookup(right_name)?;
    Some(FaceAnchor {
        center: left.midpoint(right),
        reference_distance: left.distance(right),
        source: pair,
    })
}
