//! Per-frame glue between the inference results and the renderer.
//!
//! Two selection policies run side by side and stay separate: the analysis
//! (angles, face anchor) looks only at the first detection, while the
//! visualization covers every detection in the frame.

use serde::Serialize;

use crate::angles::{all_body_angles, AngleReport};
use crate::config::{Config, DrawConfig, TextConfig};
use crate::face::{resolve_face_anchor, FaceAnchor};
use crate::overlay::{OverlayAsset, OverlayPlacement};
use crate::pose::Detection;
use crate::render::draw_list::{push_angle_labels, push_detection, DrawCommand};

/// 推論側から届いた最新の検出結果
///
/// コールバックで上書きし、フレーム開始時に `snapshot` を読む。
#[derive(Debug, Default)]
pub struct PoseFeed {
    latest: Vec<Detection>,
    received: u64,
}

impl PoseFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// 前回の結果を丸ごと置き換える
    pub fn receive(&mut self, detections: Vec<Detection>) {
        self.latest = detections;
        self.received += 1;
    }

    pub fn snapshot(&self) -> &[Detection] {
        &self.latest
    }

    /// これまでに受信した結果の数
    pub fn received_count(&self) -> u64 {
        self.received
    }
}

/// 主被写体（先頭の検出）の解析結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryAnalysis {
    pub angles: AngleReport,
    pub face_anchor: Option<FaceAnchor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOutput {
    /// None なら主被写体なし
    pub primary: Option<PrimaryAnalysis>,
    pub draw_list: Vec<DrawCommand>,
}

/// 顔オーバーレイの設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySettings {
    pub asset: OverlayAsset,
    pub scale_factor: f32,
}

pub struct FramePipeline {
    draw: DrawConfig,
    text: TextConfig,
    overlay: Option<OverlaySettings>,
}

impl FramePipeline {
    pub fn new(draw: DrawConfig, text: TextConfig, overlay: Option<OverlaySettings>) -> Self {
        Self { draw, text, overlay }
    }

    pub fn from_config(config: &Config) -> Self {
        let overlay = config.overlay.enabled.then(|| OverlaySettings {
            asset: config.overlay.asset(),
            scale_factor: config.overlay.scale_factor,
        });
        Self::new(config.draw.clone(), config.text.clone(), overlay)
    }

    /// 1フレーム分の処理
    pub fn process(&self, detections: &[Detection]) -> FrameOutput {
        let mut draw_list = Vec::new();

        // 全員分のキーポイントと骨格
        for detection in detections {
            push_detection(&mut draw_list, detection, &self.draw);
        }

        let primary = match primary_subject(detections) {
            Some(detection) => {
                let analysis = analyze(detection);
                push_angle_labels(&mut draw_list, &analysis.angles, &self.text);
                if let Some(placement) = self.overlay_placement(&analysis) {
                    draw_list.push(DrawCommand::Overlay { placement });
                }
                Some(analysis)
            }
            None => {
                log::debug!("no primary subject in frame");
                None
            }
        };

        log::trace!(
            "frame: {} detections, {} draw commands",
            detections.len(),
            draw_list.len()
        );

        FrameOutput { primary, draw_list }
    }

    fn overlay_placement(&self, analysis: &PrimaryAnalysis) -> Option<OverlayPlacement> {
        let settings = self.overlay?;
        let anchor = analysis.face_anchor.as_ref()?;
        OverlayPlacement::from_anchor(anchor, settings.asset, settings.scale_factor)
    }
}

/// 先頭の検出を主被写体とする（フレーム間の同一性は追跡しない）
pub fn primary_subject(detections: &[Detection]) -> Option<&Detection> {
    detections.first()
}

/// 1人分の角度と顔アンカー
pub fn analyze(detection: &Detection) -> PrimaryAnalysis {
    PrimaryAnalysis {
        angles: all_body_angles(detection),
        face_anchor: resolve_face_anchor(detection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angles::Joint;
    use crate::pose::{Keypoint, KeypointName, Point2D};

    fn pipeline(overlay: Option<OverlaySettings>) -> FramePipeline {
        FramePipeline::new(DrawConfig::default(), TextConfig::default(), overlay)
    }

    /// 左腕を直角に曲げ、両耳が見えている人
    fn person(offset_x: f32) -> Detection {
        use KeypointName::*;
        let points = [
            (LeftEar, 30.0, 0.0),
            (RightEar, 10.0, 0.0),
            (LeftShoulder, 40.0, 20.0),
            (LeftElbow, 40.0, 50.0),
            (LeftWrist, 70.0, 50.0),
        ];
        Detection::new(
            points
                .iter()
                .map(|&(name, x, y)| Keypoint::new(name, x + offset_x, y, 0.9))
                .collect(),
        )
    }

    fn count_markers(output: &FrameOutput) -> usize {
        output
            .draw_list
            .iter()
            .filter(|c| matches!(c, DrawCommand::Marker { .. }))
            .count()
    }

    #[test]
    fn test_empty_frame() {
        let output = pipeline(None).process(&[]);
        assert!(output.primary.is_none());
        assert!(output.draw_list.is_empty());
    }

    #[test]
    fn test_primary_is_first_detection() {
        let mut second = person(100.0);
        // 2人目だけ左肘が見えない
        second.keypoints.retain(|kp| kp.name != KeypointName::LeftElbow);
        let output = pipeline(None).process(&[person(0.0), second]);

        let primary = output.primary.unwrap();
        let elbow = primary.angles.get(Joint::LeftElbow).unwrap();
        assert!((elbow - 90.0).abs() < 1e-3);
        assert_eq!(primary.face_anchor.unwrap().center, Point2D::new(20.0, 0.0));
    }

    #[test]
    fn test_visualization_covers_every_detection() {
        let output = pipeline(None).process(&[person(0.0), person(100.0)]);
        assert_eq!(count_markers(&output), 10);
        let bones = output
            .draw_list
            .iter()
            .filter(|c| matches!(c, DrawCommand::Bone { .. }))
            .count();
        assert_eq!(bones, 4);
    }

    #[test]
    fn test_labels_only_for_primary() {
        let output = pipeline(None).process(&[person(0.0), person(100.0)]);
        let labels: Vec<_> = output
            .draw_list
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Label { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["leftElbow: 90.00°".to_string()]);
    }

    #[test]
    fn test_overlay_placed_when_enabled() {
        let settings = OverlaySettings {
            asset: OverlayAsset::new(100, 50),
            scale_factor: 3.0,
        };
        let output = pipeline(Some(settings)).process(&[person(0.0)]);
        let placement = output
            .draw_list
            .iter()
            .find_map(|c| match c {
                DrawCommand::Overlay { placement } => Some(*placement),
                _ => None,
            })
            .unwrap();
        assert!((placement.width - 60.0).abs() < 1e-4);
        assert!((placement.height - 30.0).abs() < 1e-4);
        assert!((placement.x - -10.0).abs() < 1e-4);
        assert!((placement.y - -15.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_overlay_without_face() {
        let settings = OverlaySettings {
            asset: OverlayAsset::new(100, 50),
            scale_factor: 3.0,
        };
        let mut det = person(0.0);
        det.keypoints.retain(|kp| kp.name != KeypointName::RightEar);
        let output = pipeline(Some(settings)).process(&[det]);
        assert!(output.primary.unwrap().face_anchor.is_none());
        assert!(!output.draw_list.iter().any(|c| matches!(c, DrawCommand::Overlay { .. })));
    }

    #[test]
    fn test_feed_replaces_previous_result() {
        let mut feed = PoseFeed::new();
        feed.receive(vec![person(0.0), person(100.0)]);
        feed.receive(vec![]);
        assert!(feed.snapshot().is_empty());
        assert_eq!(feed.received_count(), 2);

        let output = pipeline(None).process(feed.snapshot());
        assert!(output.primary.is_none());
    }

    #[test]
    fn test_from_config_overlay_disabled_by_default() {
        let p = FramePipeline::from_config(&Config::default());
        assert!(p.overlay.is_none());
    }
}
