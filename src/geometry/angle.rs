use crate::pose::Point2D;

/// 頂点 `b` における角度（度）を返す
///
/// `b - a` と `b - c` のなす角。結果は常に 0〜180。
/// どちらかのベクトル長が 0 の場合は 0 を返すため、真っ直ぐな関節と区別できない。
/// 区別が必要なら [`joint_angle_strict`] を使う。
pub fn joint_angle(a: Point2D, b: Point2D, c: Point2D) -> f32 {
    joint_angle_strict(a, b, c).unwrap_or(0.0)
}

/// [`joint_angle`] と同じ計算だが、縮退（点の重なり）を None で返す
pub fn joint_angle_strict(a: Point2D, b: Point2D, c: Point2D) -> Option<f32> {
    // 微小なベクトルの二乗がアンダーフローしないよう f64 で計算する
    let ab = (f64::from(b.x) - f64::from(a.x), f64::from(b.y) - f64::from(a.y));
    let cb = (f64::from(b.x) - f64::from(c.x), f64::from(b.y) - f64::from(c.y));

    let mag_ab = ab.0.hypot(ab.1);
    let mag_cb = cb.0.hypot(cb.1);
    if mag_ab == 0.0 || mag_cb == 0.0 {
        return None;
    }

    // 浮動小数の誤差で ±1 をわずかに超えることがある
    let dot = ab.0 * cb.0 + ab.1 * cb.1;
    let cos_angle = (dot / (mag_ab * mag_cb)).clamp(-1.0, 1.0);
    Some(cos_angle.acos().to_degrees() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq_f32(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() < eps
    }

    fn p(x: f32, y: f32) -> Point2D {
        Point2D::new(x, y)
    }

    #[test]
    fn test_right_angle() {
        let angle = joint_angle(p(0.0, 1.0), p(0.0, 0.0), p(1.0, 0.0));
        assert!(approx_eq_f32(angle, 90.0, 1e-4));
    }

    #[test]
    fn test_straight_angle() {
        let angle = joint_angle(p(1.0, 0.0), p(0.0, 0.0), p(-1.0, 0.0));
        assert!(approx_eq_f32(angle, 180.0, 1e-4));
    }

    #[test]
    fn test_folded_angle() {
        let angle = joint_angle(p(1.0, 0.0), p(0.0, 0.0), p(1.0, 0.0));
        assert!(approx_eq_f32(angle, 0.0, 1e-4));
    }

    #[test]
    fn test_forty_five_degrees() {
        let angle = joint_angle(p(1.0, 0.0), p(0.0, 0.0), p(1.0, 1.0));
        assert!(approx_eq_f32(angle, 45.0, 1e-3));
    }

    #[test]
    fn test_vertex_not_at_origin() {
        // 肘 (100, 100)、手首は真上、肩は真横
        let angle = joint_angle(p(100.0, 40.0), p(100.0, 100.0), p(180.0, 100.0));
        assert!(approx_eq_f32(angle, 90.0, 1e-3));
    }

    #[test]
    fn test_symmetric_in_outer_points() {
        let cases = [
            (p(3.0, 7.0), p(1.0, 2.0), p(-4.0, 5.0)),
            (p(640.0, 0.0), p(320.0, 240.0), p(0.0, 480.0)),
            (p(0.5, 0.1), p(0.2, 0.2), p(0.3, 0.9)),
        ];
        for (a, b, c) in cases {
            assert_eq!(joint_angle(a, b, c), joint_angle(c, b, a));
        }
    }

    #[test]
    fn test_output_range() {
        let points = [p(0.0, 0.0), p(1.0, 3.0), p(-2.0, 5.0), p(7.0, -1.0), p(0.1, 0.1)];
        for a in points {
            for b in points {
                for c in points {
                    let angle = joint_angle(a, b, c);
                    assert!(angle >= 0.0 && angle <= 180.0 + 1e-3, "angle {} out of range", angle);
                }
            }
        }
    }

    #[test]
    fn test_degenerate_returns_zero() {
        assert_eq!(joint_angle(p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0)), 0.0);
        assert_eq!(joint_angle(p(1.0, 0.0), p(0.0, 0.0), p(0.0, 0.0)), 0.0);
        assert_eq!(joint_angle(p(2.0, 2.0), p(2.0, 2.0), p(2.0, 2.0)), 0.0);
    }

    #[test]
    fn test_strict_flags_degenerate() {
        assert_eq!(joint_angle_strict(p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0)), None);
        let folded = joint_angle_strict(p(1.0, 0.0), p(0.0, 0.0), p(1.0, 0.0)).unwrap();
        assert!(approx_eq_f32(folded, 0.0, 1e-4));
    }

    #[test]
    fn test_nearly_collinear_is_clamped() {
        // cos がわずかに 1 を超えても NaN にならない
        let angle = joint_angle(p(1e-3, 1e-3), p(0.0, 0.0), p(3e-3, 3e-3));
        assert!(!angle.is_nan());
        assert!(approx_eq_f32(angle, 0.0, 0.1));
    }

    #[test]
    fn test_tiny_segments_not_degenerate() {
        let angle = joint_angle(p(0.0, 1e-23), p(0.0, 0.0), p(1e-23, 0.0));
        assert!(approx_eq_f32(angle, 90.0, 1e-3));
    }
}
