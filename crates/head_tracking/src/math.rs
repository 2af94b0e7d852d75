//! Скалярные и векторные helpers для solver
//!
//! Семантика повторяет движковые `Mathf`/`Vector3` helpers, на которые
//! опирается алгоритм (clamped lerp, epsilon normalize, reflect).

use bevy::prelude::*;

/// Векторы короче этого считаются нулевыми при нормализации
pub const NORMALIZE_EPSILON: f32 = 1e-5;

/// Абсолютный пол для `approximately` (сравнение с нулём ≈ точное)
const APPROX_FLOOR: f32 = f32::MIN_POSITIVE * 8.0;

/// Относительное сравнение float'ов
///
/// `|b - a| < max(1e-6 * max(|a|, |b|), APPROX_FLOOR)`
pub fn approximately(a: f32, b: f32) -> bool {
    (b - a).abs() < f32::max(1e-6 * f32::max(a.abs(), b.abs()), APPROX_FLOOR)
}

/// Clamp без паники (`f32::clamp` паникует при `lo > hi`), сначала проверяется `lo`
pub fn clamp_between(value: f32, lo: f32, hi: f32) -> f32 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Где `value` лежит между `a` и `b`, в [0, 1]. При `a == b` → 0.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a != b {
        ((value - a) / (b - a)).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Lerp с `t`, зажатым в [0, 1] (NaN → 0)
///
/// Форма `from * (1 - t) + to * t` даёт ровно `from`/`to` на концах.
pub fn lerp_clamped(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    from * (1.0 - t) + to * t
}

/// Единичный вектор или `Vec3::ZERO`, если длина ≤ `NORMALIZE_EPSILON`
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let length = v.length();
    if length > NORMALIZE_EPSILON {
        v / length
    } else {
        Vec3::ZERO
    }
}

/// Проекция на горизонтальную плоскость (нормаль +Y)
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Отражение `v` относительно плоскости с нормалью `normal` (ожидается unit)
pub fn reflect(v: Vec3, normal: Vec3) -> Vec3 {
    v - 2.0 * v.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approximately() {
        assert!(approximately(30.0, 30.000_01));
        assert!(!approximately(30.0, 30.01));
        assert!(approximately(0.0, 0.0));
        // Сравнение с нулём почти точное
        assert!(!approximately(1e-20, 0.0));
    }

    #[test]
    fn test_inverse_lerp_mirror_range() {
        // [0, -1] → [0, 1]
        assert_eq!(inverse_lerp(0.0, -1.0, 0.0), 0.0);
        assert_eq!(inverse_lerp(0.0, -1.0, -0.5), 0.5);
        assert_eq!(inverse_lerp(0.0, -1.0, -1.0), 1.0);
        // За пределами диапазона — clamp
        assert_eq!(inverse_lerp(0.0, -1.0, 0.7), 0.0);
        assert_eq!(inverse_lerp(0.0, -1.0, -3.0), 1.0);
        // Вырожденный диапазон
        assert_eq!(inverse_lerp(2.0, 2.0, 5.0), 0.0);
    }

    #[test]
    fn test_lerp_clamped_does_not_overshoot() {
        let from = Vec3::ZERO;
        let to = Vec3::new(10.0, 0.0, 0.0);

        assert_eq!(lerp_clamped(from, to, 0.5), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(lerp_clamped(from, to, 25.0), to);
        assert_eq!(lerp_clamped(from, to, -1.0), from);
        assert_eq!(lerp_clamped(from, to, f32::NAN), from);

        // Концы точные даже для "неудобных" значений
        let a = Vec3::new(0.1, -7.3, 1e6);
        let b = Vec3::new(3.3, 0.7, -2e-3);
        assert_eq!(lerp_clamped(a, b, 1.0), b);
        assert_eq!(lerp_clamped(a, b, 0.0), a);
    }

    #[test]
    fn test_normalize_zero_vector_is_zero() {
        assert_eq!(normalize_or_zero(Vec3::ZERO), Vec3::ZERO);
        assert_eq!(normalize_or_zero(Vec3::splat(1e-7)), Vec3::ZERO);

        let unit = normalize_or_zero(Vec3::new(3.0, 0.0, 4.0));
        assert!((unit.length() - 1.0).abs() < 1e-6);
        assert!((unit - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_reflect_across_forward_plane() {
        let reflected = reflect(Vec3::new(1.0, 2.0, -5.0), Vec3::Z);
        assert_eq!(reflected, Vec3::new(1.0, 2.0, 5.0));

        // Вектор в плоскости не меняется
        assert_eq!(reflect(Vec3::new(3.0, 1.0, 0.0), Vec3::Z), Vec3::new(3.0, 1.0, 0.0));
    }

    #[test]
    fn test_clamp_between_crossed_bounds() {
        assert_eq!(clamp_between(0.5, 0.0, 1.0), 0.5);
        assert_eq!(clamp_between(-2.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp_between(2.0, 1.0, -1.0), -1.0);
        assert_eq!(clamp_between(0.5, 1.0, -1.0), 1.0);
    }

    #[test]
    fn test_flatten_drops_vertical() {
        assert_eq!(flatten(Vec3::new(1.0, 7.0, -2.0)), Vec3::new(1.0, 0.0, -2.0));
    }
}
