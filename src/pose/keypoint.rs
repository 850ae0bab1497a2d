use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PoseError;

/// キーポイントを有効とみなす信頼度の下限（この値ちょうどは無効）
pub const CONFIDENCE_THRESHOLD: f32 = 0.2;

/// PoseNet の 17 キーポイント名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeypointName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl KeypointName {
    pub const COUNT: usize = 17;

    /// 全キーポイント（名前の照合に使う）
    pub const ALL: [KeypointName; Self::COUNT] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// 推論側の命名 (camelCase)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "leftEye",
            Self::RightEye => "rightEye",
            Self::LeftEar => "leftEar",
            Self::RightEar => "rightEar",
            Self::LeftShoulder => "leftShoulder",
            Self::RightShoulder => "rightShoulder",
            Self::LeftElbow => "leftElbow",
            Self::RightElbow => "rightElbow",
            Self::LeftWrist => "leftWrist",
            Self::RightWrist => "rightWrist",
            Self::LeftHip => "leftHip",
            Self::RightHip => "rightHip",
            Self::LeftKnee => "leftKnee",
            Self::RightKnee => "rightKnee",
            Self::LeftAnkle => "leftAnkle",
            Self::RightAnkle => "rightAnkle",
        }
    }
}

impl FromStr for KeypointName {
    type Err = PoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| PoseError::UnknownKeypoint(s.to_string()))
    }
}

impl fmt::Display for KeypointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 画像上の2D座標（ピクセル）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Point2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 原点からの長さ（ベクトルとして扱う場合）
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Point2D) -> f32 {
        (self - other).length()
    }

    pub fn midpoint(self, other: Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// 単一キーポイント
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub name: KeypointName,
    pub position: Point2D,
    /// 信頼度スコア (0.0〜1.0)
    pub confidence: f32,
}

impl Keypoint {
    pub fn new(name: KeypointName, x: f32, y: f32, confidence: f32) -> Self {
        Self {
            name,
            position: Point2D::new(x, y),
            confidence,
        }
    }

    /// 信頼度が閾値を超えているか（閾値ちょうど・NaN は無効）
    pub fn is_confident(&self) -> bool {
        self.confidence > CONFIDENCE_THRESHOLD
    }
}

/// 骨格線の端点ペア
pub type Bone = (Point2D, Point2D);

/// 1フレーム・1人分の検出結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    pub keypoints: Vec<Keypoint>,
    /// 推論側が計算済みの骨格線。None なら未提供
    pub skeleton: Option<Vec<Bone>>,
}

impl Detection {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self {
            keypoints,
            skeleton: None,
        }
    }

    pub fn with_skeleton(mut self, skeleton: Vec<Bone>) -> Self {
        self.skeleton = Some(skeleton);
        self
    }

    /// 名前でキーポイント位置を取得
    ///
    /// 同名が複数ある場合は先頭のみを見る。信頼度が閾値以下なら None。
    pub fn lookup(&self, name: KeypointName) -> Option<Point2D> {
        self.keypoints
            .iter()
            .find(|kp| kp.name == name)
            .filter(|kp| kp.is_confident())
            .map(|kp| kp.position)
    }

    /// 閾値を超えるキーポイントのみ
    pub fn confident_keypoints(&self) -> impl Iterator<Item = &Keypoint> + '_ {
        self.keypoints.iter().filter(|kp| kp.is_confident())
    }
}
