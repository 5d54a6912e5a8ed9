use bevy::prelude::*;
use bevy::render::camera::CameraProjection;

/// Logical pixel position (origin top-left) to normalised device coordinates.
pub fn viewport_to_ndc(position: Vec2, viewport_size: Vec2) -> Option<Vec2> {
    if viewport_size.x <= 0.0 || viewport_size.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        position.x / viewport_size.x * 2.0 - 1.0,
        1.0 - position.y / viewport_size.y * 2.0,
    ))
}

pub fn ndc_to_viewport(ndc: Vec2, viewport_size: Vec2) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport_size.x,
        (1.0 - ndc.y) * 0.5 * viewport_size.y,
    )
}

/// World-space ray through an NDC point, unprojected with the inverse of the
/// camera's projection. Reverse-Z: the near plane is at depth 1.
pub fn ndc_to_ray(
    projection: &Projection,
    camera_transform: &GlobalTransform,
    ndc: Vec2,
) -> Option<Ray3d> {
    let world_from_clip =
        camera_transform.compute_matrix() * projection.get_clip_from_view().inverse();
    let near = world_from_clip.project_point3(ndc.extend(1.0));
    let far = world_from_clip.project_point3(ndc.extend(f32::EPSILON));
    if !near.is_finite() || !far.is_finite() {
        return None;
    }
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// Project a world point to NDC. `None` when the point is behind the camera.
pub fn world_to_ndc(
    projection: &Projection,
    camera_transform: &GlobalTransform,
    point: Vec3,
) -> Option<Vec3> {
    let clip_from_world =
        projection.get_clip_from_view() * camera_transform.compute_matrix().inverse();
    let ndc = clip_from_world.project_point3(point);
    (ndc.is_finite() && ndc.z > 0.0 && ndc.z <= 1.0).then_some(ndc)
}

/// Ray–sphere intersection, returns the nearest non-negative `t` or `None`.
/// A ray starting inside the sphere hits its far side.
pub fn ray_hits_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_origin = origin - center;
    let b = to_origin.dot(direction);
    let c = to_origin.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let (t_near, t_far) = (-b - root, -b + root);
    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}
