//! Head Tracking Follow
//!
//! Per-frame solver для якоря, который следит за целью, зеркалит её, когда
//! она уходит за спину reference'а, и держит якорь в вертикальном конусе.
//!
//! Слои:
//! - solver / vertical_clamp / math — чистая математика (без ECS)
//! - components / systems — Bevy ECS обвязка (Update, `Time` delta)
//! - config — настройки с диапазонами и валидацией

use bevy::prelude::*;

// Публичные модули
pub mod components;
pub mod config;
pub mod logger;
pub mod math;
pub mod solver;
pub mod systems;
pub mod vertical_clamp;

// Re-export основных типов
pub use components::{FollowState, HeadTrackingFollow};
pub use config::{ConfigError, HeadTrackingConfig, MIN_DISTANCE, MIRROR_THRESHOLD, SMOOTHING_SPEED};
pub use logger::init_logger;
pub use solver::{
    enforce_min_distance, mirror_behind, smooth_toward, solve_local_position, solve_world_position,
    ReferenceFrame, SmoothedStep,
};
pub use systems::update_head_tracking_follow;
pub use vertical_clamp::{clamp_vertical_angle, VerticalAngleLimits};

/// System set для упорядочивания относительно систем хоста
///
/// Системы, двигающие reference/цель, стоит ставить `.before(HeadTrackingSet)`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeadTrackingSet;

/// Head tracking plugin
///
/// Регистрирует `update_head_tracking_follow` в Update.
pub struct HeadTrackingPlugin;

impl Plugin for HeadTrackingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, update_head_tracking_follow.in_set(HeadTrackingSet));
    }
}

/// Создаёт minimal Bevy App (headless) с HeadTrackingPlugin
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, HeadTrackingPlugin));

    app
}
