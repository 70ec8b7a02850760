//! Visual effects - hit particles

use bevy::prelude::*;

use super::HitEvent;

/// A short-lived spark thrown off by a hit
#[derive(Component)]
pub struct HitParticle {
    pub velocity: Vec2,
    pub lifetime: f32,
}

/// Spawn a burst of particles at every hit
pub fn spawn_hit_particles(mut commands: Commands, mut hits: EventReader<HitEvent>) {
    for hit in hits.read() {
        // Kills get a bigger burst
        let particle_count = if hit.killed { 16 } else { 8 };
        for i in 0..particle_count {
            let angle = (i as f32 / particle_count as f32) * std::f32::consts::TAU;
            let speed = 100.0 + rand::random::<f32>() * 50.0;
            let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;

            commands.spawn((
                HitParticle {
                    velocity,
                    lifetime: 0.5 + rand::random::<f32>() * 0.2,
                },
                Sprite {
                    color: hit.color,
                    custom_size: Some(Vec2::splat(6.0 + rand::random::<f32>() * 4.0)),
                    ..default()
                },
                Transform::from_translation(hit.position.extend(500.0)),
            ));
        }
    }
}

/// Move, fade and shrink particles
pub fn update_hit_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut HitParticle, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut particle, mut transform, mut sprite) in query.iter_mut() {
        transform.translation.x += particle.velocity.x * dt;
        transform.translation.y += particle.velocity.y * dt;

        particle.velocity *= 0.95;
        particle.lifetime -= dt;

        if particle.lifetime <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }

        let progress = 1.0 - (particle.lifetime / 0.7).min(1.0);
        sprite.color = sprite.color.with_alpha(1.0 - progress);

        if let Some(size) = &mut sprite.custom_size {
            *size *= 0.98;
        }
    }
}

/// Drop leftover particles when leaving a session
pub fn clear_hit_particles(mut commands: Commands, query: Query<Entity, With<HitParticle>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
