use serde::Serialize;

use crate::angles::AngleReport;
use crate::config::{DrawConfig, TextConfig};
use crate::overlay::OverlayPlacement;
use crate::pose::{Detection, Point2D};
use crate::render::skeleton::{skeleton_bones, KEYPOINT_COLOR, LABEL_COLOR, SKELETON_COLOR};

/// 描画側へ渡す1要素。ラスタライズはしない
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DrawCommand {
    /// キーポイント位置の塗りつぶし円
    Marker {
        center: Point2D,
        diameter: f32,
        color: u32,
    },
    /// 骨格線
    Bone {
        from: Point2D,
        to: Point2D,
        color: u32,
    },
    /// テキスト（左下基準）
    Label {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: u32,
    },
    /// 顔オーバーレイ画像の配置
    Overlay { placement: OverlayPlacement },
}

/// 1人分のキーポイントと骨格線
///
/// キーポイントを先に、骨格線を後に積む。
pub fn push_detection(commands: &mut Vec<DrawCommand>, detection: &Detection, config: &DrawConfig) {
    commands.extend(detection.confident_keypoints().map(|kp| DrawCommand::Marker {
        center: kp.position,
        diameter: config.marker_diameter,
        color: KEYPOINT_COLOR,
    }));
    commands.extend(
        skeleton_bones(detection, config.derive_skeleton)
            .into_iter()
            .map(|(from, to)| DrawCommand::Bone {
                from,
                to,
                color: SKELETON_COLOR,
            }),
    );
}

/// 角度テキストを上から順に積む
pub fn push_angle_labels(
    commands: &mut Vec<DrawCommand>,
    report: &AngleReport,
    config: &TextConfig,
) {
    for (i, text) in report.labels(config.precision).into_iter().enumerate() {
        commands.push(DrawCommand::Label {
            text,
            x: config.x,
            y: config.y_start + config.line_height * i as f32,
            size: config.size,
            color: LABEL_COLOR,
        });
    }
}
