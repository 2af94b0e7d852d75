//! Настройки follower'а и константы алгоритма

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vertical_clamp::VerticalAngleLimits;

/// Скорость сглаживания (множитель delta time для lerp factor)
pub const SMOOTHING_SPEED: f32 = 5.0;

/// Минимальная дистанция якоря от reference anchor (метры)
pub const MIN_DISTANCE: f32 = 1.0;

/// dot ниже этого порога = цель "за спиной"
pub const MIRROR_THRESHOLD: f32 = 0.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} = {value} вне допустимого диапазона [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{field} не конечное число ({value})")]
    NotFinite { field: &'static str, value: f32 },
}

/// Настройки head tracking follower'а
///
/// Диапазоны:
/// - `weight` ∈ [0, 1] — сила зеркалирования, когда цель прямо сзади
/// - `smoothness` ∈ [0, 1] — 0 = без сглаживания, 1 = полностью сглажено
/// - `min_vertical_angle` ∈ [-90, 0] (градусы)
/// - `max_vertical_angle` ∈ [0, 90] (градусы)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadTrackingConfig {
    pub weight: f32,
    pub smoothness: f32,
    pub min_vertical_angle: f32,
    pub max_vertical_angle: f32,
}

impl Default for HeadTrackingConfig {
    fn default() -> Self {
        Self {
            weight: 1.0,
            smoothness: 1.0,
            min_vertical_angle: -30.0,
            max_vertical_angle: 30.0,
        }
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field, value });
    }
    if value < min || value > max {
        return Err(ConfigError::OutOfRange { field, value, min, max });
    }
    Ok(())
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

impl HeadTrackingConfig {
    /// Строгий конструктор: любое значение вне диапазона → ошибка
    pub fn try_new(
        weight: f32,
        smoothness: f32,
        min_vertical_angle: f32,
        max_vertical_angle: f32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            weight,
            smoothness,
            min_vertical_angle,
            max_vertical_angle,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("weight", self.weight, 0.0, 1.0)?;
        check_range("smoothness", self.smoothness, 0.0, 1.0)?;
        check_range("min_vertical_angle", self.min_vertical_angle, -90.0, 0.0)?;
        check_range("max_vertical_angle", self.max_vertical_angle, 0.0, 90.0)?;
        Ok(())
    }

    /// Мягкий путь: каждое поле зажимается в диапазон, NaN → default
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        Self {
            weight: clamp_or(self.weight, 0.0, 1.0, defaults.weight),
            smoothness: clamp_or(self.smoothness, 0.0, 1.0, defaults.smoothness),
            min_vertical_angle: clamp_or(self.min_vertical_angle, -90.0, 0.0, defaults.min_vertical_angle),
            max_vertical_angle: clamp_or(self.max_vertical_angle, 0.0, 90.0, defaults.max_vertical_angle),
        }
    }

    pub fn vertical_limits(&self) -> VerticalAngleLimits {
        VerticalAngleLimits::new(self.min_vertical_angle, self.max_vertical_angle)
    }
}
