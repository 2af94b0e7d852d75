//! ECS компоненты head tracking follower'а

use bevy::prelude::*;

use crate::config::HeadTrackingConfig;
use crate::solver::{smooth_toward, solve_world_position, ReferenceFrame};

/// Follower, который держит якорь "перед" reference'ом
///
/// - `source_object` — цель, за которой следим
/// - `source_position` — reference (позиция + forward)
/// - `offset` — смещение якоря от reference позиции (world space)
///
/// Любой из источников `None` или despawned → кадр пропускается,
/// Transform follower'а не меняется.
///
/// Автоматически добавляет `FollowState` и `Transform` через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(FollowState, Transform)]
pub struct HeadTrackingFollow {
    pub source_object: Option<Entity>,
    pub source_position: Option<Entity>,
    pub offset: Vec3,
    pub config: HeadTrackingConfig,
}

impl HeadTrackingFollow {
    pub fn new(source_object: Entity, source_position: Entity) -> Self {
        Self {
            source_object: Some(source_object),
            source_position: Some(source_position),
            ..default()
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_config(mut self, config: HeadTrackingConfig) -> Self {
        self.config = config;
        self
    }
}

/// Состояние сглаживания follower'а (живёт столько же, сколько entity)
///
/// `smoothed_position` стартует с нуля. `sources_missing` — только для
/// edge-triggered логов (не спамим каждый кадр).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FollowState {
    pub smoothed_position: Vec3,
    pub sources_missing: bool,
}

impl FollowState {
    /// Один кадр solver'а: обновляет сглаживание, возвращает позицию follower'а
    pub fn advance(
        &mut self,
        frame: &ReferenceFrame,
        target: Vec3,
        config: &HeadTrackingConfig,
        delta_seconds: f32,
    ) -> Vec3 {
        let config = config.clamped();
        let target_world = solve_world_position(frame, target, &config);
        let step = smooth_toward(self.smoothed_position, target_world, config.smoothness, delta_seconds);

        self.smoothed_position = step.smoothed_position;
        step.output
    }

    /// Snap сглаживания (телепорт, respawn)
    pub fn reset(&mut self, position: Vec3) {
        self.smoothed_position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_converges_toward_target() {
        let frame = ReferenceFrame::new(Vec3::ZERO, Vec3::Z, Vec3::ZERO);
        let config = HeadTrackingConfig::default(); // smoothness = 1
        let target = Vec3::new(0.0, 0.0, 5.0);

        let mut state = FollowState::default();
        let mut last_distance = f32::MAX;
        for _ in 0..30 {
            let output = state.advance(&frame, target, &config, 1.0 / 60.0);
            let distance = output.distance(target);
            assert!(distance < last_distance);
            last_distance = distance;
        }

        assert!(last_distance < 5.0 * 0.2);
    }

    #[test]
    fn test_advance_sanitizes_config() {
        let frame = ReferenceFrame::new(Vec3::ZERO, Vec3::Z, Vec3::ZERO);
        let broken = HeadTrackingConfig {
            weight: 1.0,
            smoothness: -3.0, // → 0
            min_vertical_angle: 45.0, // → 0
            max_vertical_angle: -45.0, // → 0
        };

        let mut state = FollowState::default();
        let output = state.advance(&frame, Vec3::new(0.0, 4.0, 4.0), &broken, 0.016);

        // Конус схлопнут до горизонта, без сглаживания
        assert!((output - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-4);
    }

    #[test]
    fn test_reset_snaps_state() {
        let mut state = FollowState::default();
        state.reset(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(state.smoothed_position, Vec3::new(1.0, 2.0, 3.0));
        assert!(!state.sources_missing);
    }

    #[test]
    fn test_builder() {
        let object = Entity::from_raw(1);
        let reference = Entity::from_raw(2);
        let follow = HeadTrackingFollow::new(object, reference)
            .with_offset(Vec3::Y)
            .with_config(HeadTrackingConfig {
                smoothness: 0.0,
                ..default()
            });

        assert_eq!(follow.source_object, Some(object));
        assert_eq!(follow.source_position, Some(reference));
        assert_eq!(follow.offset, Vec3::Y);
        assert_eq!(follow.config.smoothness, 0.0);
    }
}
