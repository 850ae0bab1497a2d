use std::fmt;

use serde::{Serialize, Serializer};

use crate::geometry::joint_angle;
use crate::pose::{Detection, KeypointName};

/// 角度を計算する関節
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    LeftElbow,
    RightElbow,
    LeftShoulder,
    RightShoulder,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
}

impl Joint {
    pub const COUNT: usize = 8;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeftElbow => "leftElbow",
            Self::RightElbow => "rightElbow",
            Self::LeftShoulder => "leftShoulder",
            Self::RightShoulder => "rightShoulder",
            Self::LeftHip => "leftHip",
            Self::RightHip => "rightHip",
            Self::LeftKnee => "leftKnee",
            Self::RightKnee => "rightKnee",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 関節角を定義する3キーポイント（`vertex` が頂点）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointDefinition {
    pub joint: Joint,
    pub a: KeypointName,
    pub vertex: KeypointName,
    pub c: KeypointName,
}

impl JointDefinition {
    const fn new(joint: Joint, a: KeypointName, vertex: KeypointName, c: KeypointName) -> Self {
        Self { joint, a, vertex, c }
    }

    /// 3点すべてが有効なときのみ角度を返す
    pub fn measure(&self, detection: &Detection) -> Option<f32> {
        let a = detection.lookup(self.a)?;
        let b = detection.lookup(self.vertex)?;
        let c = detection.lookup(self.c)?;
        Some(joint_angle(a, b, c))
    }
}

/// 関節の定義表。並び順がそのまま表示順になる
pub const JOINT_TABLE: [JointDefinition; Joint::COUNT] = {
    use KeypointName::*;
    [
        // 肘
        JointDefinition::new(Joint::LeftElbow, LeftWrist, LeftElbow, LeftShoulder),
        JointDefinition::new(Joint::RightElbow, RightWrist, RightElbow, RightShoulder),
        // 肩
        JointDefinition::new(Joint::LeftShoulder, LeftElbow, LeftShoulder, LeftHip),
        JointDefinition::new(Joint::RightShoulder, RightElbow, RightShoulder, RightHip),
        // 腰
        JointDefinition::new(Joint::LeftHip, LeftShoulder, LeftHip, LeftKnee),
        JointDefinition::new(Joint::RightHip, RightShoulder, RightHip, RightKnee),
        // 膝
        JointDefinition::new(Joint::LeftKnee, LeftHip, LeftKnee, LeftAnkle),
        JointDefinition::new(Joint::RightKnee, RightHip, RightKnee, RightAnkle),
    ]
};

/// 1検出分の関節角。None は「データなし」で、0度とは区別する
#[derive(Debug, Clone, PartialEq)]
pub struct AngleReport {
    entries: [(Joint, Option<f32>); Joint::COUNT],
}

impl AngleReport {
    pub fn get(&self, joint: Joint) -> Option<f32> {
        self.entries
            .iter()
            .find(|(j, _)| *j == joint)
            .and_then(|(_, angle)| *angle)
    }

    /// 定義表の順に全エントリ
    pub fn iter(&self) -> impl Iterator<Item = (Joint, Option<f32>)> + '_ {
        self.entries.iter().copied()
    }

    /// 値のあるエントリのみ
    pub fn present(&self) -> impl Iterator<Item = (Joint, f32)> + '_ {
        self.entries
            .iter()
            .filter_map(|&(joint, angle)| angle.map(|a| (joint, a)))
    }

    /// 画面表示用のテキスト行 (例: `leftElbow: 90.00°`)
    ///
    /// 整数部は2桁にゼロ埋めする。値のない関節は行を出さない。
    pub fn labels(&self, precision: usize) -> Vec<String> {
        self.present()
            .map(|(joint, angle)| format!("{}: {}°", joint, format_degrees(angle, precision)))
            .collect()
    }
}

/// 角度の表示形式。整数部は2桁にゼロ埋め (例: `05.10`)
pub fn format_degrees(value: f32, precision: usize) -> String {
    let width = if precision > 0 { 2 + 1 + precision } else { 2 };
    format!("{:0width$.precision$}", value, width = width, precision = precision)
}

impl Serialize for AngleReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(joint, angle)| (joint.as_str(), angle)))
    }
}

/// 定義表の全関節について角度を計算
pub fn all_body_angles(detection: &Detection) -> AngleReport {
    AngleReport {
        entries: JOINT_TABLE.map(|def| (def.joint, def.measure(detection))),
    }
}
