//! Headless demo head tracking follower'а
//!
//! Reference стоит в origin и смотрит вперёд (-Z), цель ходит по кругу
//! вокруг него (половину круга — за спиной), follower зеркалит её вперёд.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use head_tracking::logger::{log, log_info};
use head_tracking::{create_headless_app, init_logger, HeadTrackingConfig, HeadTrackingFollow, HeadTrackingSet};

const FRAME_COUNT: usize = 600;
const ORBIT_RADIUS: f32 = 5.0;
const ORBIT_SPEED: f32 = 0.5; // рад/сек

#[derive(Component)]
struct OrbitingTarget;

/// Двигает цель по кругу (высота меняется, чтобы задеть vertical clamp)
fn orbit_target(time: Res<Time>, mut targets: Query<&mut Transform, With<OrbitingTarget>>) {
    let angle = time.elapsed_secs() * ORBIT_SPEED;
    for mut transform in targets.iter_mut() {
        transform.translation = Vec3::new(
            angle.sin() * ORBIT_RADIUS,
            (angle * 3.0).sin() * 4.0,
            -angle.cos() * ORBIT_RADIUS,
        );
    }
}

fn main() {
    init_logger();
    log_info("Starting head tracking headless demo");

    let mut app = create_headless_app();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(1.0 / 60.0)))
        .add_systems(Update, orbit_target.before(HeadTrackingSet));

    let world = app.world_mut();
    let reference = world.spawn(Transform::from_xyz(0.0, 1.6, 0.0)).id();
    let target = world
        .spawn((OrbitingTarget, Transform::from_xyz(0.0, 0.0, -ORBIT_RADIUS)))
        .id();
    let follower = world
        .spawn(
            HeadTrackingFollow::new(target, reference)
                .with_offset(Vec3::new(0.0, 0.1, 0.0))
                .with_config(HeadTrackingConfig {
                    smoothness: 0.5,
                    ..default()
                }),
        )
        .id();

    for frame in 0..FRAME_COUNT {
        app.update();

        if frame % 60 == 0 {
            let world = app.world();
            let target_position = world.get::<Transform>(target).map(|t| t.translation);
            let follower_position = world.get::<Transform>(follower).map(|t| t.translation);
            log(&format!(
                "Frame {}: target {:?} → follower {:?}",
                frame, target_position, follower_position
            ));
        }
    }

    log_info("Demo complete!");
}
