//! Per-frame система follower'а

use bevy::prelude::*;
use bevy::transform::helper::TransformHelper;

use crate::components::{FollowState, HeadTrackingFollow};
use crate::logger;
use crate::solver::ReferenceFrame;

/// Система: пересчитать позицию всех head tracking follower'ов
///
/// Работает в Update (кадровый delta из `Time`).
/// Всё в world space: позы источников собираются по иерархии `ChildOf`
/// (`TransformHelper`), результат переводится в пространство родителя
/// follower'а перед записью в `Transform::translation`.
///
/// Два прохода:
/// 1. solve — читаем позы (до любых записей в этом кадре)
/// 2. write — пишем translation
///
/// Источником может быть другой follower: он виден с позицией прошлого кадра.
///
/// Нет источника → кадр пропускается: Transform и сглаживание не трогаем,
/// debug-лог только на переходе в это состояние.
pub fn update_head_tracking_follow(
    time: Res<Time>,
    mut followers: Query<(Entity, &HeadTrackingFollow, &mut FollowState, Option<&ChildOf>)>,
    mut transforms: ParamSet<(TransformHelper, Query<&mut Transform, With<HeadTrackingFollow>>)>,
    mut solved: Local<Vec<(Entity, Vec3)>>,
) {
    let delta = time.delta_secs();
    solved.clear();

    {
        let helper = transforms.p0();
        let world_pose = |entity: Entity| helper.compute_global_transform(entity).ok();

        for (entity, follow, mut state, child_of) in followers.iter_mut() {
            let resolved = follow
                .source_position
                .zip(follow.source_object)
                .and_then(|(reference, object)| Some((world_pose(reference)?, world_pose(object)?)));

            let Some((reference, object)) = resolved else {
                if !state.sources_missing {
                    state.sources_missing = true;
                    logger::log(&format!(
                        "HeadTrackingFollow {:?}: source_position/source_object не заданы или despawned, пропускаем",
                        entity
                    ));
                }
                continue;
            };

            // Родитель исчез посреди кадра → не знаем, куда писать
            let parent = match child_of {
                Some(child_of) => match world_pose(child_of.parent()) {
                    Some(parent) => Some(parent),
                    None => continue,
                },
                None => None,
            };

            if state.sources_missing {
                state.sources_missing = false;
                logger::log(&format!("HeadTrackingFollow {:?}: источники снова доступны", entity));
            }

            let frame = ReferenceFrame::new(reference.translation(), reference.forward().as_vec3(), follow.offset);
            let world_position = state.advance(&frame, object.translation(), &follow.config, delta);

            let local_position = match parent {
                Some(parent) => parent.affine().inverse().transform_point3(world_position),
                None => world_position,
            };
            solved.push((entity, local_position));
        }
    }

    let mut follower_transforms = transforms.p1();
    for &(entity, translation) in solved.iter() {
        if let Ok(mut transform) = follower_transforms.get_mut(entity) {
            transform.translation = translation;
        }
    }
}
