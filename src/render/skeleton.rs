use crate::pose::{Bone, Detection, KeypointName};

/// 骨格の接続定義 (開始キーポイント, 終了キーポイント)
///
/// 推論側が骨格線を渡さない場合にのみ使う。
pub const SKELETON_CONNECTIONS: [(KeypointName, KeypointName); 12] = [
    // 上半身
    (KeypointName::LeftShoulder, KeypointName::RightShoulder),
    (KeypointName::LeftShoulder, KeypointName::LeftElbow),
    (KeypointName::LeftElbow, KeypointName::LeftWrist),
    (KeypointName::RightShoulder, KeypointName::RightElbow),
    (KeypointName::RightElbow, KeypointName::RightWrist),
    // 胴体
    (KeypointName::LeftShoulder, KeypointName::LeftHip),
    (KeypointName::RightShoulder, KeypointName::RightHip),
    (KeypointName::LeftHip, KeypointName::RightHip),
    // 下半身
    (KeypointName::LeftHip, KeypointName::LeftKnee),
    (KeypointName::LeftKnee, KeypointName::LeftAnkle),
    (KeypointName::RightHip, KeypointName::RightKnee),
    (KeypointName::RightKnee, KeypointName::RightAnkle),
];

/// キーポイントの色 (RGB)
pub const KEYPOINT_COLOR: u32 = 0xFF0000; // 赤

/// 骨格線の色 (RGB)
pub const SKELETON_COLOR: u32 = 0x00FF00; // 緑

/// 角度テキストの色 (RGB)
pub const LABEL_COLOR: u32 = 0xFFFFFF; // 白

/// 描画する骨格線
///
/// 推論側の骨格線があればそのまま使う（空でも補完しない）。
/// 無い場合は `derive` 指定時のみ、両端が有効な接続から組み立てる。
pub fn skeleton_bones(detection: &Detection, derive: bool) -> Vec<Bone> {
    match &detection.skeleton {
        Some(bones) => bones.clone(),
        None if derive => SKELETON_CONNECTIONS
            .iter()
            .filter_map(|&(start, end)| Some((detection.lookup(start)?, detection.lookup(end)?)))
            .collect(),
        None => Vec::new(),
    }
}
