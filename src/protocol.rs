//! Newline-delimited JSON input from the pose-inference producer.
//!
//! One line per frame. Each line is the producer's result array:
//!
//! ```json
//! [{"pose": {"keypoints": [
//!     {"part": "nose", "score": 0.98, "position": {"x": 320.0, "y": 120.0}}]},
//!   "skeleton": [[{"part": "leftHip", ...}, {"part": "leftKnee", ...}]]}]
//! ```
//!
//! Part names are checked against the closed keypoint vocabulary here, so a typo
//! fails when the frame is read rather than turning into a silently missing point.

use std::io::BufRead;

use serde::Deserialize;

use crate::error::PoseError;
use crate::pose::{Bone, Detection, Keypoint, KeypointName, Point2D};

// --- Producer wire types ---

#[derive(Debug, Deserialize)]
struct WirePart {
    part: String,
    score: f32,
    position: Point2D,
}

#[derive(Debug, Deserialize)]
struct WirePose {
    keypoints: Vec<WirePart>,
}

#[derive(Debug, Deserialize)]
struct WireDetection {
    pose: WirePose,
    /// 省略時は None（空配列とは区別する）
    #[serde(default)]
    skeleton: Option<Vec<[WirePart; 2]>>,
}

impl TryFrom<WirePart> for Keypoint {
    type Error = PoseError;

    fn try_from(part: WirePart) -> Result<Self, Self::Error> {
        let name: KeypointName = part.part.parse()?;
        Ok(Keypoint {
            name,
            position: part.position,
            confidence: part.score,
        })
    }
}

impl TryFrom<WireDetection> for Detection {
    type Error = PoseError;

    fn try_from(wire: WireDetection) -> Result<Self, Self::Error> {
        let keypoints = wire
            .pose
            .keypoints
            .into_iter()
            .map(Keypoint::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let skeleton = wire
            .skeleton
            .map(|edges| {
                edges
                    .into_iter()
                    .map(|[a, b]| -> Result<Bone, PoseError> {
                        // 端点名も語彙チェックする
                        a.part.parse::<KeypointName>()?;
                        b.part.parse::<KeypointName>()?;
                        Ok((a.position, b.position))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Detection { keypoints, skeleton })
    }
}

/// 1フレーム分（1行）をパース
pub fn parse_frame(line: &str) -> Result<Vec<Detection>, PoseError> {
    let wire: Vec<WireDetection> = serde_json::from_str(line)?;
    wire.into_iter().map(Detection::try_from).collect()
}

/// 行単位でフレームを読むイテレータ。空行は飛ばす
pub struct FrameReader<R> {
    reader: R,
    line_no: usize,
    buf: Vec<u8>,
    /// 読み込みエラー後は何も返さない
    done: bool,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: Vec::new(),
            done: false,
        }
    }

    /// 直前に読んだ行番号（1始まり）
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = Result<Vec<Detection>, PoseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            let read = self.reader.read_until(b'\n', &mut self.buf);
            if let Ok(0) = read {
                self.done = true;
                return None;
            }
            self.line_no += 1;

            let parsed = match read {
                Ok(_) => match std::str::from_utf8(&self.buf) {
                    Ok(line) if line.trim().is_empty() => continue,
                    Ok(line) => parse_frame(line.trim()),
                    Err(e) => Err(e.into()),
                },
                Err(e) => {
                    self.done = true;
                    Err(e.into())
                }
            };
            return Some(parsed.map_err(|e| PoseError::Line {
                line: self.line_no,
                source: Box::new(e),
            }));
        }
        None
    }
}
