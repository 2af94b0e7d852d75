//! Frame update solver — чистая математика без ECS
//!
//! Алгоритм (один вызов на кадр):
//! 1. world anchor = reference.position + offset
//! 2. to_target = target - world anchor ("local" = только сдвиг, без поворота)
//! 3. Если цель за спиной (по горизонтали) → частичное зеркалирование
//!    относительно плоскости с нормалью look_dir_flat
//! 4. Vertical angle clamp
//! 5. Минимальная дистанция `MIN_DISTANCE`
//! 6. Сглаживание (см. `smooth_toward`)

use bevy::prelude::*;

use crate::config::{HeadTrackingConfig, MIN_DISTANCE, MIRROR_THRESHOLD, SMOOTHING_SPEED};
use crate::math::{flatten, inverse_lerp, lerp_clamped, normalize_or_zero, reflect};

/// Reference frame: позиция + направление взгляда + смещение якоря
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReferenceFrame {
    pub position: Vec3,
    pub forward: Vec3,
    pub offset: Vec3,
}

impl ReferenceFrame {
    pub fn new(position: Vec3, forward: Vec3, offset: Vec3) -> Self {
        Self {
            position,
            forward,
            offset,
        }
    }

    pub fn world_anchor(&self) -> Vec3 {
        self.position + self.offset
    }

    /// Горизонтальное направление взгляда (zero, если смотрим строго вверх/вниз)
    pub fn look_dir_flat(&self) -> Vec3 {
        normalize_or_zero(flatten(self.forward))
    }

    /// "Прямо вперёд" для вырожденного (нулевого) local вектора
    ///
    /// look_dir_flat → normalize(forward) → -Z (forward identity Transform'а)
    pub fn fallback_direction(&self) -> Vec3 {
        let flat = self.look_dir_flat();
        if flat != Vec3::ZERO {
            return flat;
        }

        let raw = normalize_or_zero(self.forward);
        if raw != Vec3::ZERO {
            raw
        } else {
            Vec3::NEG_Z
        }
    }
}

/// Зеркалирование цели, оказавшейся за спиной
///
/// dot(look_dir_flat, to_target_flat) < 0 → смешиваем `to_target` с его
/// отражением на `inverse_lerp(0, -1, dot) * weight`. Иначе вектор не трогаем.
pub fn mirror_behind(to_target: Vec3, look_dir_flat: Vec3, weight: f32) -> Vec3 {
    let to_target_flat = normalize_or_zero(flatten(to_target));
    let dot = look_dir_flat.dot(to_target_flat);

    if dot >= MIRROR_THRESHOLD {
        return to_target;
    }

    let mirror_amount = inverse_lerp(MIRROR_THRESHOLD, -1.0, dot) * weight;
    let mirrored = reflect(to_target, look_dir_flat);
    lerp_clamped(to_target, mirrored, mirror_amount)
}

/// Не ближе `MIN_DISTANCE` к якорю; направление сохраняется
pub fn enforce_min_distance(local: Vec3, fallback_direction: Vec3) -> Vec3 {
    if local.length() >= MIN_DISTANCE {
        return local;
    }

    let direction = normalize_or_zero(local);
    let direction = if direction == Vec3::ZERO {
        fallback_direction
    } else {
        direction
    };
    direction * MIN_DISTANCE
}

/// Шаги 1–5: желаемая позиция относительно world anchor
pub fn solve_local_position(frame: &ReferenceFrame, target: Vec3, config: &HeadTrackingConfig) -> Vec3 {
    let to_target = target - frame.world_anchor();

    let mirrored = mirror_behind(to_target, frame.look_dir_flat(), config.weight);
    // Vertical constraints ДО нормализации дистанции
    let clamped = config.vertical_limits().clamp(mirrored);

    enforce_min_distance(clamped, frame.fallback_direction())
}

/// Желаемая world-space позиция (без сглаживания)
pub fn solve_world_position(frame: &ReferenceFrame, target: Vec3, config: &HeadTrackingConfig) -> Vec3 {
    frame.world_anchor() + solve_local_position(frame, target, config)
}

/// Результат шага сглаживания
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedStep {
    /// Новое состояние сглаживания
    pub smoothed_position: Vec3,
    /// Позиция для follower'а
    pub output: Vec3,
}

/// Сглаживание к `target_world`
///
/// factor = SMOOTHING_SPEED * delta, зажат в [0, 1] (без overshoot при
/// больших delta). Отрицательный/не конечный delta → 0 (состояние стоит).
/// smoothness = 1 → output == smoothed, smoothness = 0 → output == target_world.
pub fn smooth_toward(smoothed_position: Vec3, target_world: Vec3, smoothness: f32, delta_seconds: f32) -> SmoothedStep {
    let delta = if delta_seconds.is_finite() && delta_seconds > 0.0 {
        delta_seconds
    } else {
        0.0
    };

    let smoothed_position = lerp_clamped(smoothed_position, target_world, SMOOTHING_SPEED * delta);
    let output = lerp_clamped(smoothed_position, target_world, 1.0 - smoothness);

    SmoothedStep {
        smoothed_position,
        output,
    }
}
