//! Vertical angle clamp
//!
//! Ограничивает угол возвышения (от горизонтальной плоскости) локального
//! вектора конусом [min_degrees, max_degrees].
//!
//! Асимметрия (сохраняется намеренно):
//! - чисто вертикальный вектор (x ≈ 0, z ≈ 0) → сохраняет длину
//! - общий случай → меняется только Y, горизонталь фиксирована,
//!   общая длина НЕ сохраняется

use bevy::prelude::*;

use crate::math::{approximately, clamp_between, normalize_or_zero};

/// Границы угла возвышения в градусах
///
/// Инвариант (обеспечивает `HeadTrackingConfig::clamped`): min ≤ 0 ≤ max
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalAngleLimits {
    pub min_degrees: f32,
    pub max_degrees: f32,
}

impl VerticalAngleLimits {
    pub fn new(min_degrees: f32, max_degrees: f32) -> Self {
        Self {
            min_degrees,
            max_degrees,
        }
    }

    pub fn clamp(&self, local: Vec3) -> Vec3 {
        clamp_vertical_angle(local, self.min_degrees, self.max_degrees)
    }
}

/// tan(angle) для границы; ±90° → ±∞
///
/// `tan(90f32.to_radians())` — огромное ОТРИЦАТЕЛЬНОЕ число
/// (радианы округляются чуть дальше π/2), что перевернуло бы границы.
fn slope_bound(degrees: f32) -> f32 {
    if degrees >= 90.0 {
        f32::INFINITY
    } else if degrees <= -90.0 {
        f32::NEG_INFINITY
    } else {
        degrees.to_radians().tan()
    }
}

pub fn clamp_vertical_angle(local: Vec3, min_degrees: f32, max_degrees: f32) -> Vec3 {
    // Прямо над/под якорем
    if approximately(local.x, 0.0) && approximately(local.z, 0.0) {
        let clamped_y = clamp_between(local.y, slope_bound(min_degrees), slope_bound(max_degrees));
        return normalize_or_zero(Vec3::new(0.0, clamped_y, 0.0)) * local.length();
    }

    let horizontal = Vec2::new(local.x, local.z).length();
    let current_angle = local.y.atan2(horizontal).to_degrees();
    let clamped_angle = clamp_between(current_angle, min_degrees, max_degrees);

    if approximately(current_angle, clamped_angle) {
        return local;
    }

    let new_y = clamped_angle.to_radians().tan() * horizontal;
    Vec3::new(local.x, new_y, local.z)
}
