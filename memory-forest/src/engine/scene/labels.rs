use bevy::prelude::*;
use bevy::ui::UiTargetCamera;
use constants::palette::{LABEL_BACKGROUND, LABEL_BORDER, LABEL_TEXT};

use super::builder::YearLabelAnchor;
use crate::constants::render_settings::{
    LABEL_BORDER_WIDTH, LABEL_CORNER_RADIUS, LABEL_FONT_SIZE, LABEL_MAX_SCALE, LABEL_MIN_SCALE,
    LABEL_REFERENCE_DISTANCE, LABEL_SIZE,
};
use crate::engine::camera::orbit_camera::ForestCamera;
use crate::engine::core::lifecycle::ForestLifecycle;
use crate::tools::marker_picking::ray::{ndc_to_viewport, world_to_ndc};

/// Screen-space year panel following a `YearLabelAnchor`.
#[derive(Component, Debug)]
pub struct YearLabel {
    pub anchor: Entity,
}

/// Spawns a hidden label panel; `position_year_labels` reveals it once its
/// anchor projects onto the screen.
pub fn spawn_year_label(commands: &mut Commands, anchor: Entity, camera: Entity, year: &str) -> Entity {
    commands
        .spawn((
            YearLabel { anchor },
            Name::new(format!("Year label {year}")),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(LABEL_SIZE.x),
                height: Val::Px(LABEL_SIZE.y),
                border: UiRect::all(Val::Px(LABEL_BORDER_WIDTH)),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(LABEL_BACKGROUND),
            BorderColor(LABEL_BORDER),
            BorderRadius::all(Val::Px(LABEL_CORNER_RADIUS)),
            UiTargetCamera(camera),
            ZIndex::default(),
            Visibility::Hidden,
        ))
        .with_children(|label| {
            label.spawn((
                Text::new(year),
                TextFont {
                    font_size: LABEL_FONT_SIZE,
                    ..default()
                },
                TextColor(LABEL_TEXT),
            ));
        })
        .id()
}

/// Size factor for a label `distance` world units from the camera.
pub fn label_scale(distance: f32) -> f32 {
    if distance <= f32::EPSILON {
        return LABEL_MAX_SCALE;
    }
    (LABEL_REFERENCE_DISTANCE / distance).clamp(LABEL_MIN_SCALE, LABEL_MAX_SCALE)
}

// Projects each anchor through the forest camera and centres its label there.
// Labels shrink with distance and nearer ones draw on top.
pub fn position_year_labels(
    lifecycle: Res<ForestLifecycle>,
    windows: Query<&Window>,
    cameras: Query<(&Projection, &Transform), With<ForestCamera>>,
    anchors: Query<&GlobalTransform, With<YearLabelAnchor>>,
    mut labels: Query<(&YearLabel, &Children, &mut Node, &mut ZIndex, &mut Visibility)>,
    mut texts: Query<&mut TextFont>,
) {
    let Some(window) = lifecycle
        .mounted_window()
        .and_then(|entity| windows.get(entity).ok())
    else {
        return;
    };
    let Ok((projection, camera)) = cameras.single() else {
        return;
    };
    let eye = camera.translation;
    let camera = GlobalTransform::from(*camera);
    let viewport = window.size();

    for (label, children, mut node, mut z_index, mut visibility) in &mut labels {
        let projected = anchors.get(label.anchor).ok().and_then(|anchor| {
            let point = anchor.translation();
            world_to_ndc(projection, &camera, point).map(|ndc| (ndc, eye.distance(point)))
        });

        let Some((ndc, distance)) = projected else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };

        let scale = label_scale(distance);
        let size = LABEL_SIZE * scale;
        let centre = ndc_to_viewport(ndc.truncate(), viewport);
        node.left = Val::Px(centre.x - size.x * 0.5);
        node.top = Val::Px(centre.y - size.y * 0.5);
        node.width = Val::Px(size.x);
        node.height = Val::Px(size.y);
        z_index.set_if_neq(ZIndex(-(distance * 100.0) as i32));
        visibility.set_if_neq(Visibility::Inherited);

        let children: &[Entity] = children;
        for &child in children {
            if let Ok(mut font) = texts.get_mut(child) {
                let font_size = LABEL_FONT_SIZE * scale;
                if font.font_size != font_size {
                    font.font_size = font_size;
                }
            }
        }
    }
}
